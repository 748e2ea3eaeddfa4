//! Remote-first data access with deterministic local fallback
//!
//! Every coach operation is attempted against the backend once; any
//! failure substitutes the matching built-in dataset. Errors never cross
//! this boundary, so callers always receive usable data tagged with where
//! it came from.

use std::future::Future;

use super::client::CoachClient;
use super::error::CoachError;
use super::fallback;
use super::models::{
    DiagnosticQuestion, GenerateQuiz, ProgressRow, ReviewSchedule, SubmitRequest, SubmitResponse,
};
use crate::quiz::model::{Quiz, Topic};
use crate::quiz::score::ScoreSummary;

/// Where a value was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    /// The live backend answered
    Remote,
    /// A built-in dataset was substituted
    Fallback,
}

/// A value tagged with where it was obtained
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sourced<T> {
    /// The data itself
    pub value: T,
    /// Where it came from
    pub source: DataSource,
}

impl<T> Sourced<T> {
    /// Whether this value came from the built-in datasets
    pub fn is_fallback(&self) -> bool {
        self.source == DataSource::Fallback
    }

    /// Map the value, keeping the source tag
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Sourced<U> {
        Sourced { value: f(self.value), source: self.source }
    }
}

/// Resolve `attempt` to its value, or absorb the failure and substitute
///
/// The single try-then-fallback rule every operation goes through. A
/// failure is logged and replaced by `substitute()`; it never propagates.
pub async fn with_fallback<T, F, S>(operation: &'static str, attempt: F, substitute: S) -> Sourced<T>
where
    F: Future<Output = Result<T, CoachError>>,
    S: FnOnce() -> T,
{
    match attempt.await {
        Ok(value) => Sourced { value, source: DataSource::Remote },
        Err(e) => {
            if e.is_connectivity() {
                tracing::warn!("Coach unreachable for {}: {}", operation, e);
            } else {
                tracing::warn!("Coach call {} failed: {}", operation, e);
            }
            tracing::debug!("Serving built-in {} data (dataset {})", operation, fallback::FALLBACK_DATASET_VERSION);
            Sourced { value: substitute(), source: DataSource::Fallback }
        }
    }
}

/// Coach access that degrades to built-in data instead of failing
///
/// Calls are independent: a failed call never taints the next one, and a
/// later successful call returns to remote data on its own.
pub struct ResilientCoach {
    client: CoachClient,
}

impl ResilientCoach {
    /// Wrap a backend client
    pub fn new(client: CoachClient) -> Self {
        Self { client }
    }

    /// Topic catalog, or the built-in catalog
    pub async fn topics(&self) -> Sourced<Vec<Topic>> {
        with_fallback("topics", self.client.topics(), fallback::fallback_topics).await
    }

    /// Generated quiz, or the built-in five-question quiz
    pub async fn generate_quiz(&self, request: &GenerateQuiz) -> Sourced<Quiz> {
        with_fallback("generate_quiz", self.client.generate_quiz(request), || {
            fallback::fallback_quiz(request.mode)
        })
        .await
    }

    /// Server-side grading, or an echo of the local summary with canned
    /// recommendations
    pub async fn submit_results(
        &self,
        request: &SubmitRequest,
        local: &ScoreSummary,
    ) -> Sourced<SubmitResponse> {
        with_fallback("submit_results", self.client.submit_results(request), || {
            fallback::fallback_submit_response(local)
        })
        .await
    }

    /// Per-topic mastery list, or the built-in rows
    pub async fn progress(&self) -> Sourced<Vec<ProgressRow>> {
        with_fallback("progress", self.client.progress(), fallback::fallback_progress).await
    }

    /// Onboarding question set, or the built-in set
    pub async fn diagnostic_questions(&self) -> Sourced<Vec<DiagnosticQuestion>> {
        with_fallback(
            "diagnostic_questions",
            self.client.diagnostic_questions(),
            fallback::fallback_diagnostic_questions,
        )
        .await
    }

    /// Review schedule for the next `days` days, or the built-in schedule
    pub async fn review_schedule(&self, days: u32) -> Sourced<ReviewSchedule> {
        with_fallback("review_schedule", self.client.review_schedule(days), || {
            fallback::fallback_schedule(days)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::coach::models::QuizMode;

    fn refused_error() -> CoachError {
        CoachError::ApiError { status: 503, message: "unavailable".to_string() }
    }

    /// A coach whose backend address can never be reached
    fn offline_coach() -> ResilientCoach {
        ResilientCoach::new(CoachClient::new("http://127.0.0.1:9", 1, 1))
    }

    #[test]
    fn sourced_map_keeps_the_tag() {
        let sourced = Sourced { value: 2, source: DataSource::Fallback };
        let mapped = sourced.map(|n| n * 10);
        assert_eq!(mapped.value, 20);
        assert!(mapped.is_fallback());
    }

    #[tokio::test]
    async fn success_is_tagged_remote() {
        let result = with_fallback("op", async { Ok::<_, CoachError>(7) }, || 0).await;
        assert_eq!(result.value, 7);
        assert_eq!(result.source, DataSource::Remote);
    }

    #[tokio::test]
    async fn failure_substitutes_and_is_tagged_fallback() {
        let result = with_fallback("op", async { Err::<u32, _>(refused_error()) }, || 42).await;
        assert_eq!(result.value, 42);
        assert!(result.is_fallback());
    }

    #[tokio::test]
    async fn failures_do_not_taint_later_calls() {
        let failed = with_fallback("op", async { Err::<u32, _>(refused_error()) }, || 0).await;
        assert!(failed.is_fallback());

        let ok = with_fallback("op", async { Ok::<_, CoachError>(1) }, || 0).await;
        assert_eq!(ok.source, DataSource::Remote);
    }

    #[tokio::test]
    async fn offline_runs_produce_identical_fallback_data() {
        let coach = offline_coach();

        let first = coach.topics().await;
        let second = coach.topics().await;
        assert!(first.is_fallback());
        assert_eq!(first.value, second.value);

        let request = GenerateQuiz::new(QuizMode::Practice);
        let quiz_a = coach.generate_quiz(&request).await;
        let quiz_b = coach.generate_quiz(&request).await;
        assert!(quiz_a.is_fallback());
        assert_eq!(quiz_a.value, quiz_b.value);
    }

    #[tokio::test]
    async fn offline_submit_echoes_the_local_summary() {
        let coach = offline_coach();
        let summary = ScoreSummary::from_counts(5, 4);
        let request = SubmitRequest::new("quiz_1", Vec::new());

        let response = coach.submit_results(&request, &summary).await;
        assert!(response.is_fallback());
        assert_eq!(response.value.correct, 4);
        assert_eq!(response.value.total, 5);
        assert_eq!(response.value.recommendations.len(), 2);
    }
}
