//! HTTP client for the coach backend

use reqwest::Client;
use serde::de::DeserializeOwned;

use super::error::CoachError;
use super::models::{
    DiagnosticQuestion, DiagnosticQuestionsResponse, GenerateQuiz, ProgressResponse, ProgressRow,
    QuizMode, ReviewSchedule, SubmitRequest, SubmitResponse, TopicsResponse,
};
use crate::quiz::model::{Quiz, Topic};

/// Coach backend API client
///
/// Every request carries a bounded timeout, so a dead backend resolves to
/// an error in finite time instead of hanging the caller.
pub struct CoachClient {
    /// HTTP client
    client: Client,
    /// Backend base URL without a trailing slash
    base_url: String,
    /// Learner this client acts for
    user_id: u32,
}

impl CoachClient {
    /// Create a new client for the given backend
    pub fn new(base_url: impl Into<String>, user_id: u32, timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            user_id,
        }
    }

    /// Fetch the topic catalog
    pub async fn topics(&self) -> Result<Vec<Topic>, CoachError> {
        let response = self.client.get(self.url("/api/topics")).send().await?;
        let envelope: TopicsResponse = Self::decode(response).await?;
        Ok(envelope.topics)
    }

    /// Ask the backend to generate a quiz
    ///
    /// Diagnostic quizzes use their own endpoint; practice and review both
    /// go through the practice endpoint with per-request tuning.
    pub async fn generate_quiz(&self, request: &GenerateQuiz) -> Result<Quiz, CoachError> {
        let response = match request.mode {
            QuizMode::Diagnostic => {
                self.client
                    .post(self.url("/api/quiz/diagnostic"))
                    .query(&[("user_id", self.user_id.to_string())])
                    .json(&request.topic_ids)
                    .send()
                    .await?
            }
            QuizMode::Practice | QuizMode::Review => {
                self.client
                    .post(self.url("/api/quiz/practice"))
                    .query(&[
                        ("user_id", self.user_id.to_string()),
                        ("num_questions", request.num_questions.to_string()),
                        ("focus_weaknesses", request.focus_weaknesses.to_string()),
                    ])
                    .json(&request.topic_ids)
                    .send()
                    .await?
            }
        };

        Self::decode(response).await
    }

    /// Submit a finished quiz for server-side grading and recommendations
    pub async fn submit_results(&self, request: &SubmitRequest) -> Result<SubmitResponse, CoachError> {
        let response = self
            .client
            .post(self.url("/api/quiz/submit"))
            .query(&[("user_id", self.user_id.to_string())])
            .json(request)
            .send()
            .await?;

        Self::decode(response).await
    }

    /// Fetch the learner's per-topic mastery list
    pub async fn progress(&self) -> Result<Vec<ProgressRow>, CoachError> {
        let path = format!("/api/users/{}/progress", self.user_id);
        let response = self.client.get(self.url(&path)).send().await?;
        let envelope: ProgressResponse = Self::decode(response).await?;
        Ok(envelope.progress)
    }

    /// Fetch the onboarding diagnostic question set
    pub async fn diagnostic_questions(&self) -> Result<Vec<DiagnosticQuestion>, CoachError> {
        let response = self.client.get(self.url("/api/diagnostic-questions")).send().await?;
        let envelope: DiagnosticQuestionsResponse = Self::decode(response).await?;
        Ok(envelope.questions)
    }

    /// Fetch the day-keyed review schedule for the next `days` days
    pub async fn review_schedule(&self, days: u32) -> Result<ReviewSchedule, CoachError> {
        let path = format!("/api/users/{}/review-schedule", self.user_id);
        let response = self
            .client
            .get(self.url(&path))
            .query(&[("days", days.to_string())])
            .send()
            .await?;

        Self::decode(response).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Turn a non-success status into an error, otherwise decode the body
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, CoachError> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CoachError::ApiError { status: status.as_u16(), message });
        }

        let body = response.text().await?;
        let decoded: T = serde_json::from_str(&body)?;
        Ok(decoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_creation() {
        let client = CoachClient::new("http://localhost:8000", 8, 5);
        assert_eq!(client.base_url, "http://localhost:8000");
        assert_eq!(client.user_id, 8);
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let client = CoachClient::new("http://localhost:8000/", 1, 5);
        assert_eq!(client.url("/api/topics"), "http://localhost:8000/api/topics");
    }
}
