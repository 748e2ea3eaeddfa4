//! Quiz domain and session engine
//!
//! Provides the quiz value types, the session state machine that drives
//! one attempt from first question to completion, and the grading rules.

pub mod model;
pub mod score;
pub mod session;

// Re-export commonly used types
pub use model::{Question, QuestionKind, Quiz, Topic};
pub use score::{AnswerRecord, Mood, ScoreReport, ScoreSummary};
pub use session::{Advance, QuestionView, QuizSession, SessionError, SessionStatus};
