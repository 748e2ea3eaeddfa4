//! Grading for completed quiz sessions
//!
//! One rule for every question kind: the learner's answer matches the
//! correct answer case-insensitively, with no whitespace trimming.

use serde::{Deserialize, Serialize};

/// Fixed per-answer time reported on submission; real timing is not measured
pub const PLACEHOLDER_TIME_SECONDS: u32 = 30;

/// The single grading rule
pub fn answer_is_correct(learner: &str, correct: &str) -> bool {
    learner.to_lowercase() == correct.to_lowercase()
}

/// One submitted answer, produced at scoring time in question order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    /// Question this answer belongs to
    pub question_id: String,
    /// The learner's raw answer; empty if the question was never answered
    pub answer: String,
    /// Seconds spent, always [`PLACEHOLDER_TIME_SECONDS`]
    pub time_seconds: u32,
}

impl AnswerRecord {
    /// Create a record for the given question and raw answer
    pub fn new(question_id: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question_id: question_id.into(),
            answer: answer.into(),
            time_seconds: PLACEHOLDER_TIME_SECONDS,
        }
    }
}

/// Discrete mood tier derived from the score percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    /// Below 50%
    Discouraged,
    /// 50-69%
    Neutral,
    /// 70-89%
    Pleased,
    /// 90% and above
    Elated,
}

impl Mood {
    /// Tier for a percentage in 0..=100
    pub fn from_percentage(percentage: u8) -> Self {
        match percentage {
            0..=49 => Self::Discouraged,
            50..=69 => Self::Neutral,
            70..=89 => Self::Pleased,
            _ => Self::Elated,
        }
    }

    /// Lowercase label, as shown in the results view
    pub fn label(&self) -> &'static str {
        match self {
            Self::Discouraged => "discouraged",
            Self::Neutral => "neutral",
            Self::Pleased => "pleased",
            Self::Elated => "elated",
        }
    }
}

/// Aggregate result of grading a completed session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSummary {
    /// Total questions in the quiz
    pub total: u32,
    /// Questions answered correctly
    pub correct: u32,
    /// Questions answered incorrectly or not at all
    pub incorrect: u32,
    /// Integer percentage, rounded half-up
    pub percentage: u8,
    /// Mood tier for the percentage
    pub mood: Mood,
}

impl ScoreSummary {
    /// Build a summary from question and correct counts
    ///
    /// `total` must be at least 1; the engine guarantees this because empty
    /// quizzes are rejected at `begin`.
    pub fn from_counts(total: u32, correct: u32) -> Self {
        let percentage = ((correct as f64) * 100.0 / (total as f64)).round() as u8;
        Self {
            total,
            correct,
            incorrect: total.saturating_sub(correct),
            percentage,
            mood: Mood::from_percentage(percentage),
        }
    }
}

/// Everything grading produces: the summary plus the per-question records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreReport {
    /// Aggregate summary
    pub summary: ScoreSummary,
    /// One record per question, in question order
    pub records: Vec<AnswerRecord>,
}
