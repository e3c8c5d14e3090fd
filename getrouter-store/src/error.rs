//! Store error types.

use thiserror::Error;

/// Errors that can occur while reading or writing local files.
#[derive(Debug, Error)]
pub enum StoreError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// `~/.codex/auth.json` is not a JSON object.
    #[error("Invalid auth.json format.")]
    InvalidAuthJson,

    /// The home directory could not be determined.
    #[error("Could not determine the home directory")]
    HomeDirNotFound,
}

impl From<StoreError> for getrouter_fetch::FetchError {
    fn from(err: StoreError) -> Self {
        Self::TokenStore(err.to_string())
    }
}
