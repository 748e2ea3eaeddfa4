//! Error types for the coach backend integration

use thiserror::Error;

/// Errors that can occur when talking to the coach backend
#[derive(Debug, Error)]
pub enum CoachError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Backend returned an error response
    #[error("API error ({status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the backend
        message: String,
    },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl CoachError {
    /// Check if this error means the backend never sent a usable reply
    /// (connectivity or timeout), as opposed to replying with an error
    pub fn is_connectivity(&self) -> bool {
        match self {
            CoachError::RequestError(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }
}
