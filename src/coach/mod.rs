//! Coach backend integration module
//!
//! Provides the HTTP client for the coach API, the request/response
//! models, and the resilient layer that substitutes built-in datasets
//! whenever the backend cannot be reached.

pub mod client;
pub mod error;
pub mod fallback;
pub mod models;
pub mod resilient;

// Re-export commonly used types
pub use client::CoachClient;
pub use error::CoachError;
pub use models::{DiagnosticQuestion, GenerateQuiz, ProgressRow, QuizMode, ReviewSchedule, SubmitRequest, SubmitResponse};
pub use resilient::{DataSource, ResilientCoach, Sourced};
