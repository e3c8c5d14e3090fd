//! Fetch error types.

use serde_json::Value;
use thiserror::Error;

use crate::retry::is_retryable_status;

// ============================================================================
// Main Fetch Error
// ============================================================================

/// Error type for fetch operations.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Core error.
    #[error("Core error: {0}")]
    Core(#[from] getrouter_core::CoreError),

    /// Persisting refreshed credentials failed.
    #[error("Token store error: {0}")]
    TokenStore(String),

    /// The device login code was already exchanged.
    #[error("Auth code already used. Please log in again.")]
    AuthCodeUsed,

    /// The device login code expired.
    #[error("Auth code expired. Please log in again.")]
    AuthCodeExpired,

    /// The user did not confirm the login in time.
    #[error("Login timed out. Please run getrouter login again.")]
    LoginTimedOut,
}

impl FetchError {
    /// HTTP status of an API error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api(err) => Some(err.status),
            _ => None,
        }
    }

    /// Whether retrying the same request may succeed.
    ///
    /// Network failures, server errors, 408 and 429 are retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(err) => err.is_connect() || err.is_timeout() || err.is_request(),
            Self::Api(err) => is_retryable_status(err.status),
            _ => false,
        }
    }
}

// ============================================================================
// API Error
// ============================================================================

/// Error payload returned by the dashboard API.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ApiError {
    /// HTTP status.
    pub status: u16,
    /// Machine-readable code, when the payload has one.
    pub code: Option<String>,
    /// Human-readable message.
    pub message: String,
    /// Extra details from the payload.
    pub details: Option<Value>,
}

impl ApiError {
    /// Builds an error from a response payload, falling back to
    /// `fallback_message` when the payload has no string `message`.
    pub fn from_payload(payload: Option<&Value>, fallback_message: &str, status: u16) -> Self {
        let object = payload.and_then(Value::as_object);
        let field = |name: &str| object.and_then(|o| o.get(name));

        Self {
            status,
            code: field("code").and_then(Value::as_str).map(str::to_string),
            message: field("message")
                .and_then(Value::as_str)
                .unwrap_or(fallback_message)
                .to_string(),
            details: field("details").filter(|d| !d.is_null()).cloned(),
        }
    }
}
