//! Error types for the AI service client.

use thiserror::Error;

/// Errors that can occur when calling the external AI services.
#[derive(Debug, Error)]
pub enum AiError {
    /// HTTP request failed (transport, DNS, timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service returned a non-success status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the response body.
        message: String,
    },

    /// Failed to parse the response body.
    #[error("parse error: {0}")]
    Parse(String),
}

/// Error response body from the AI services.
#[derive(Debug, serde::Deserialize)]
pub(crate) struct ApiErrorResponse {
    /// Error message.
    pub message: String,
}
