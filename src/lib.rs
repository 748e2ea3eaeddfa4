//! Mentor - a quiz-driven study client that keeps working offline
//!
//! Mentor talks to a learning-coach backend for topics, generated quizzes,
//! progress and review schedules, and silently substitutes deterministic
//! built-in data whenever the backend cannot be reached. Quiz grading
//! always happens locally.

pub mod app;
pub mod coach;
pub mod config;
pub mod quiz;
pub mod report;

pub use app::App;
pub use config::Config;
