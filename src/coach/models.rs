//! Data models for coach backend requests and responses

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::quiz::score::AnswerRecord;

/// Kinds of quiz the backend can generate
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum QuizMode {
    /// Calibration quiz with an even difficulty spread
    Diagnostic,
    /// Regular practice over the chosen topics
    #[default]
    Practice,
    /// Revisit previously studied material
    Review,
}

impl QuizMode {
    /// Get a human-readable display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Diagnostic => "Diagnostic",
            Self::Practice => "Practice",
            Self::Review => "Review",
        }
    }

    /// Parse mode from string (for command line)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "diagnostic" | "diag" => Some(Self::Diagnostic),
            "practice" => Some(Self::Practice),
            "review" => Some(Self::Review),
            _ => None,
        }
    }

    /// List all available modes
    pub fn all() -> &'static [QuizMode] {
        &[Self::Diagnostic, Self::Practice, Self::Review]
    }
}

impl std::str::FromStr for QuizMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Unknown quiz mode: {}. Options: diagnostic, practice, review", s))
    }
}

/// Parameters for requesting a generated quiz
///
/// The backend takes these as query parameters plus a JSON body of topic
/// ids, so this struct is split by the client rather than serialized whole.
#[derive(Debug, Clone)]
pub struct GenerateQuiz {
    /// Kind of quiz to generate
    pub mode: QuizMode,
    /// Topics the quiz should draw from
    pub topic_ids: Vec<String>,
    /// Target question count (practice and review)
    pub num_questions: u32,
    /// Bias selection toward detected weak concepts (practice and review)
    pub focus_weaknesses: bool,
}

impl GenerateQuiz {
    /// Create a request with default settings
    pub fn new(mode: QuizMode) -> Self {
        Self { mode, topic_ids: Vec::new(), num_questions: 10, focus_weaknesses: false }
    }

    /// Set the topics to draw questions from
    pub fn with_topics(mut self, topic_ids: Vec<String>) -> Self {
        self.topic_ids = topic_ids;
        self
    }

    /// Set the target question count
    pub fn with_num_questions(mut self, num_questions: u32) -> Self {
        self.num_questions = num_questions;
        self
    }

    /// Focus question selection on detected weaknesses
    pub fn with_focus_weaknesses(mut self, focus_weaknesses: bool) -> Self {
        self.focus_weaknesses = focus_weaknesses;
        self
    }
}

/// Request body for submitting a finished quiz
#[derive(Debug, Clone, Serialize)]
pub struct SubmitRequest {
    /// Quiz being submitted
    pub quiz_id: String,
    /// Answers in question order
    pub answers: Vec<AnswerRecord>,
}

impl SubmitRequest {
    /// Create a submission for a quiz
    pub fn new(quiz_id: impl Into<String>, answers: Vec<AnswerRecord>) -> Self {
        Self { quiz_id: quiz_id.into(), answers }
    }
}

/// Backend's grading of a submitted quiz
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitResponse {
    /// Score percentage in 0.0..=100.0
    pub score: f32,
    /// Correctly answered question count
    pub correct: u32,
    /// Total question count
    pub total: u32,
    /// Concepts the backend flagged as weak
    #[serde(default)]
    pub weak_concepts: Vec<String>,
    /// Study recommendations
    #[serde(default)]
    pub recommendations: Vec<String>,
}

/// One row of the per-topic mastery list
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProgressRow {
    /// Topic identifier
    pub topic_id: String,
    /// Topic display name
    pub topic_name: String,
    /// Mastery percentage in 0.0..=100.0
    pub mastery_level: f32,
    /// Total minutes spent on this topic
    pub time_spent_minutes: u32,
    /// Next scheduled review date (ISO 8601), if scheduled
    #[serde(default)]
    pub next_review: Option<String>,
    /// Detected weakness in 0.0..=1.0, if analyzed
    #[serde(default)]
    pub weakness_score: Option<f32>,
}

impl ProgressRow {
    /// Mastery at or above 70 counts a topic as learned
    pub fn is_mastered(&self) -> bool {
        self.mastery_level >= 70.0
    }

    /// Weakness above 0.4 flags a topic for extra practice
    pub fn needs_attention(&self) -> bool {
        self.weakness_score.map(|w| w > 0.4).unwrap_or(false)
    }
}

/// Input style of an onboarding diagnostic question
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticKind {
    /// Free-text answer
    Text,
    /// Pick one option
    Choice,
    /// Pick any number of options
    Multi,
}

/// One onboarding diagnostic question
///
/// Consumed by the UI only; these are never graded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticQuestion {
    /// Question identifier
    pub id: String,
    /// Question text
    pub text: String,
    /// Input style
    #[serde(rename = "type")]
    pub kind: DiagnosticKind,
    /// Options for choice and multi questions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

/// One topic due for review on a given day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReviewEntry {
    /// Topic identifier
    pub topic_id: String,
    /// Topic display name
    pub topic_name: String,
}

/// Day-keyed review schedule
///
/// Keys are `YYYY-MM-DD` dates; the BTreeMap keeps them in calendar order.
/// Every day in the requested window is present, possibly with an empty list.
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewSchedule {
    /// Topics to review, grouped by day
    pub schedule: BTreeMap<String, Vec<ReviewEntry>>,
}

// Response envelopes the backend wraps list payloads in.

/// Envelope for the topic catalog
#[derive(Debug, Clone, Deserialize)]
pub struct TopicsResponse {
    /// All known topics
    pub topics: Vec<crate::quiz::model::Topic>,
}

/// Envelope for the progress list
#[derive(Debug, Clone, Deserialize)]
pub struct ProgressResponse {
    /// One row per studied topic
    pub progress: Vec<ProgressRow>,
}

/// Envelope for the diagnostic question set
#[derive(Debug, Clone, Deserialize)]
pub struct DiagnosticQuestionsResponse {
    /// Questions in presentation order
    pub questions: Vec<DiagnosticQuestion>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_parse() {
        assert_eq!(QuizMode::parse("diagnostic"), Some(QuizMode::Diagnostic));
        assert_eq!(QuizMode::parse("diag"), Some(QuizMode::Diagnostic));
        assert_eq!(QuizMode::parse("practice"), Some(QuizMode::Practice));
        assert_eq!(QuizMode::parse("REVIEW"), Some(QuizMode::Review));
        assert_eq!(QuizMode::parse("cram"), None);
    }

    #[test]
    fn generate_quiz_builder() {
        let request = GenerateQuiz::new(QuizMode::Practice)
            .with_topics(vec!["python-basics".into(), "data-structures".into()])
            .with_num_questions(5)
            .with_focus_weaknesses(true);

        assert_eq!(request.mode, QuizMode::Practice);
        assert_eq!(request.topic_ids.len(), 2);
        assert_eq!(request.num_questions, 5);
        assert!(request.focus_weaknesses);
    }

    #[test]
    fn progress_row_deserializes_backend_json() {
        let json = r#"{
            "topic_id": "python-basics",
            "topic_name": "Python Basics",
            "mastery_level": 82.5,
            "time_spent_minutes": 340,
            "next_review": "2024-03-18T09:00:00",
            "weakness_score": 0.15
        }"#;

        let row: ProgressRow = serde_json::from_str(json).unwrap();
        assert_eq!(row.topic_id, "python-basics");
        assert!(row.is_mastered());
        assert!(!row.needs_attention());
    }

    #[test]
    fn progress_row_tolerates_missing_optionals() {
        let json = r#"{
            "topic_id": "sql",
            "topic_name": "SQL",
            "mastery_level": 35.0,
            "time_spent_minutes": 60,
            "next_review": null,
            "weakness_score": 0.7
        }"#;

        let row: ProgressRow = serde_json::from_str(json).unwrap();
        assert!(!row.is_mastered());
        assert!(row.needs_attention());
        assert_eq!(row.next_review, None);
    }

    #[test]
    fn diagnostic_question_kinds_deserialize() {
        let json = r#"[
            {"id": "d1", "text": "What is your primary learning goal?", "type": "text"},
            {"id": "d2", "text": "How much time can you dedicate daily?", "type": "choice",
             "options": ["30 min", "1 hour", "2 hours", "3+ hours"]},
            {"id": "d4", "text": "What topics interest you most?", "type": "multi",
             "options": ["Programming", "Data Science"]}
        ]"#;

        let questions: Vec<DiagnosticQuestion> = serde_json::from_str(json).unwrap();
        assert_eq!(questions[0].kind, DiagnosticKind::Text);
        assert_eq!(questions[0].options, None);
        assert_eq!(questions[1].kind, DiagnosticKind::Choice);
        assert_eq!(questions[2].kind, DiagnosticKind::Multi);
    }

    #[test]
    fn review_schedule_keeps_days_in_calendar_order() {
        let json = r#"{"schedule": {
            "2024-03-20": [],
            "2024-03-18": [{"topic_id": "sql", "topic_name": "SQL"}],
            "2024-03-19": [{"topic_id": "python-basics", "topic_name": "Python Basics"}]
        }}"#;

        let schedule: ReviewSchedule = serde_json::from_str(json).unwrap();
        let days: Vec<&str> = schedule.schedule.keys().map(String::as_str).collect();
        assert_eq!(days, vec!["2024-03-18", "2024-03-19", "2024-03-20"]);
    }

    #[test]
    fn submit_response_defaults_empty_lists() {
        let json = r#"{"score": 80.0, "correct": 4, "total": 5}"#;
        let response: SubmitResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.correct, 4);
        assert!(response.recommendations.is_empty());
        assert!(response.weak_concepts.is_empty());
    }

    #[test]
    fn submit_request_serializes_answers_in_order() {
        let request = SubmitRequest::new(
            "quiz_12345",
            vec![AnswerRecord::new("q1", "Paris"), AnswerRecord::new("q2", "True")],
        );

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["quiz_id"], "quiz_12345");
        assert_eq!(json["answers"][0]["question_id"], "q1");
        assert_eq!(json["answers"][1]["answer"], "True");
    }
}
