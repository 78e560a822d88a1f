//! Error types for papergen

use std::time::Duration;
use thiserror::Error;

/// Result type alias for papergen operations
pub type PaperResult<T> = Result<T, PaperError>;

/// Main error type for papergen
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PaperError {
    /// Configuration related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input errors
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The endpoint answered with a non-success status
    #[error("HTTP error: {status} {reason}")]
    Http { status: u16, reason: String },

    /// Connection failures and mid-stream read errors
    #[error("Transport error: {0}")]
    Transport(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(String),

    /// The stream stalled or ran past its time limit
    #[error("Generation timed out after {0:?}")]
    Timeout(Duration),

    /// Generation was cancelled by the caller
    #[error("Generation was cancelled")]
    Cancelled,

    /// Another generation is still in flight
    #[error("Generation {request_id} is still in progress")]
    Busy { request_id: u64 },

    /// A newer generation replaced this one; its results were discarded
    #[error("Generation {request_id} was superseded by a newer request")]
    Superseded { request_id: u64 },
}

impl PaperError {
    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a new invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Create a new transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Create an HTTP status error from a response status
    pub fn http(status: reqwest::StatusCode) -> Self {
        Self::Http {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown Status").to_string(),
        }
    }

    /// Whether a caller could reasonably try again.
    ///
    /// The client itself never retries; the CLI uses this to suggest
    /// running the command again.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http { status, .. } => matches!(status, 429 | 502 | 503 | 504),
            Self::Transport(_) | Self::Timeout(_) | Self::Busy { .. } => true,
            _ => false,
        }
    }
}

impl From<std::io::Error> for PaperError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error.to_string())
    }
}

impl From<serde_json::Error> for PaperError {
    fn from(error: serde_json::Error) -> Self {
        Self::Json(error.to_string())
    }
}

impl From<reqwest::Error> for PaperError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Transport(format!("request timed out: {}", error))
        } else if let Some(status) = error.status() {
            Self::http(status)
        } else {
            Self::Transport(error.to_string())
        }
    }
}
