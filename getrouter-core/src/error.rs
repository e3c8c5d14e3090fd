//! Core error types for getrouter.

use thiserror::Error;

/// Core error type for getrouter operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Invalid data from an API response or a local file.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Invalid timestamp.
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}
