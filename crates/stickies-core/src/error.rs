//! Error types for stickies-core

use thiserror::Error;

use crate::models::FieldErrors;

/// Result type alias using stickies-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in stickies-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Draft failed local validation; never sent to the server
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    /// Transport failure talking to the notes API
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx response from the notes API
    #[error("Server returned HTTP {status}: {message}")]
    Server { status: u16, message: String },

    /// Note not found
    #[error("Note not found: {0}")]
    NotFound(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Intent not allowed in the store's current state
    #[error("Invalid state: {0}")]
    InvalidState(&'static str),
}

impl Error {
    /// Whether re-triggering the same action may succeed.
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Server { .. })
    }
}
