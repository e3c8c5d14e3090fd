//! JSON output formatting.

use anyhow::Result;
use getrouter_core::{AuthStatus, Consumer, Subscription};
use getrouter_store::mask_secret;
use serde::Serialize;

// ============================================================================
// Output Types
// ============================================================================

/// `getrouter status --format json`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusOutput {
    pub auth: AuthOutput,
    pub subscription: Option<Subscription>,
}

/// Auth part of [`StatusOutput`]; tokens are masked.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthOutput {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

impl From<&AuthStatus> for AuthOutput {
    fn from(status: &AuthStatus) -> Self {
        match status {
            AuthStatus::LoggedOut => Self {
                status: "logged_out",
                expires_at: None,
                token_type: None,
                access_token: None,
                refresh_token: None,
            },
            AuthStatus::LoggedIn {
                expires_at,
                access_token,
                refresh_token,
                token_type,
            } => Self {
                status: "logged_in",
                expires_at: Some(expires_at.clone()),
                token_type: Some(token_type.clone()),
                access_token: Some(mask_secret(access_token)),
                refresh_token: Some(mask_secret(refresh_token)),
            },
        }
    }
}

/// One key, with the secret masked unless asked otherwise.
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct ConsumerOutput(pub Consumer);

impl ConsumerOutput {
    /// Wraps `consumer`, masking `apiKey` unless `show_api_key`.
    pub fn new(consumer: &Consumer, show_api_key: bool) -> Self {
        let mut consumer = consumer.clone();
        if !show_api_key {
            consumer.api_key = consumer.api_key.as_deref().map(mask_secret);
        }
        Self(consumer)
    }
}

// ============================================================================
// Printing
// ============================================================================

/// Prints `value` as indented JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
