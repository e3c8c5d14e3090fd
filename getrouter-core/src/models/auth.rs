//! Dashboard login state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Default `tokenType` for stored credentials.
pub const DEFAULT_TOKEN_TYPE: &str = "Bearer";

// ============================================================================
// Auth State
// ============================================================================

/// Credentials persisted in `<config dir>/auth.json`.
///
/// Empty strings mean "not set"; a logged-out state is the default value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuthState {
    /// Dashboard access token.
    pub access_token: String,
    /// Token used to obtain a new access token.
    pub refresh_token: String,
    /// RFC 3339 expiry of the access token.
    pub expires_at: String,
    /// Authorization scheme, normally `Bearer`.
    pub token_type: String,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            refresh_token: String::new(),
            expires_at: String::new(),
            token_type: DEFAULT_TOKEN_TYPE.to_string(),
        }
    }
}

impl AuthState {
    /// Builds a state from a token response. Returns `None` unless both
    /// tokens are present.
    pub fn from_token(token: &AuthToken) -> Option<Self> {
        let access_token = token.access_token.as_deref().filter(|t| !t.is_empty())?;
        let refresh_token = token.refresh_token.as_deref().filter(|t| !t.is_empty())?;
        Some(Self {
            access_token: access_token.to_string(),
            refresh_token: refresh_token.to_string(),
            expires_at: token.expires_at.clone().unwrap_or_default(),
            token_type: DEFAULT_TOKEN_TYPE.to_string(),
        })
    }

    /// Parses [`AuthState::expires_at`].
    pub fn expiry(&self) -> Result<DateTime<Utc>, CoreError> {
        DateTime::parse_from_rfc3339(&self.expires_at)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|_| CoreError::InvalidTimestamp(self.expires_at.clone()))
    }

    /// Returns true when the expiry is missing, unparsable or not after `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expiry().map_or(true, |expiry| expiry <= now)
    }

    /// Login status as of `now`.
    pub fn status(&self, now: DateTime<Utc>) -> AuthStatus {
        if self.access_token.is_empty() || self.refresh_token.is_empty() || self.is_expired(now) {
            return AuthStatus::LoggedOut;
        }
        AuthStatus::LoggedIn {
            expires_at: self.expires_at.clone(),
            access_token: self.access_token.clone(),
            refresh_token: self.refresh_token.clone(),
            token_type: self.token_type.clone(),
        }
    }
}

// ============================================================================
// Auth Token
// ============================================================================

/// Token pair returned by the authorize and refresh endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthToken {
    /// Access token.
    #[serde(default)]
    pub access_token: Option<String>,
    /// Refresh token.
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// RFC 3339 expiry.
    #[serde(default)]
    pub expires_at: Option<String>,
}

// ============================================================================
// Auth Status
// ============================================================================

/// Whether the user is logged in, with the stored details when they are.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthStatus {
    /// No usable credentials.
    LoggedOut,
    /// Valid, unexpired credentials.
    LoggedIn {
        /// RFC 3339 expiry.
        expires_at: String,
        /// Access token.
        access_token: String,
        /// Refresh token.
        refresh_token: String,
        /// Authorization scheme.
        token_type: String,
    },
}

impl AuthStatus {
    /// Returns true for [`AuthStatus::LoggedIn`].
    pub fn is_logged_in(&self) -> bool {
        matches!(self, Self::LoggedIn { .. })
    }
}
