//! Client error types

use thiserror::Error;

use crate::validation::ValidationReport;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Backend rejected the payload
    #[error("Validation error: {0}")]
    Validation(String),

    /// Any other non-success status
    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// Draft did not pass the submission gate; nothing was sent
    #[error("Draft rejected: {0}")]
    Rejected(ValidationReport),

    /// Local file access (image embedding)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
