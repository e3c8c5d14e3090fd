//! Access token refresh.

use chrono::{DateTime, Duration, Utc};
use getrouter_core::{AuthState, AuthToken};
use reqwest::header;
use serde_json::json;
use tracing::{debug, instrument, warn};

use crate::client::ApiClient;
use crate::error::FetchError;

/// Path of the token refresh endpoint.
pub const REFRESH_PATH: &str = "v1/dashboard/auth/token";

/// Tokens this close to expiry are refreshed ahead of time.
const EXPIRY_BUFFER_SECS: i64 = 60;

/// Returns true when `expires_at` is empty, unparsable, or within one minute
/// of `now`.
pub fn is_token_expiring_soon(expires_at: &str, now: DateTime<Utc>) -> bool {
    if expires_at.is_empty() {
        return true;
    }
    match DateTime::parse_from_rfc3339(expires_at) {
        Ok(expiry) => expiry.with_timezone(&Utc) <= now + Duration::seconds(EXPIRY_BUFFER_SECS),
        Err(_) => true,
    }
}

/// Exchanges the stored refresh token for a new token pair.
///
/// Returns `Ok(None)` when there is no refresh token or the server rejects
/// it. The new pair is saved when both tokens are present.
#[instrument(skip(client))]
pub async fn refresh_access_token(client: &ApiClient) -> Result<Option<AuthToken>, FetchError> {
    let auth = client.tokens().load().await;
    if auth.refresh_token.is_empty() {
        debug!("No refresh token stored");
        return Ok(None);
    }

    let response = client
        .http()
        .post(client.url(REFRESH_PATH))
        .header(header::CONTENT_TYPE, "application/json")
        .body(json!({ "refreshToken": auth.refresh_token }).to_string())
        .send()
        .await?;

    if !response.status().is_success() {
        warn!(status = %response.status(), "Token refresh rejected");
        return Ok(None);
    }

    let token: AuthToken = response.json().await?;
    if let Some(state) = AuthState::from_token(&token) {
        client.tokens().save(&state).await?;
        debug!("Stored refreshed tokens");
    }
    Ok(Some(token))
}

/// Makes sure a usable access token is stored, refreshing it when it is
/// about to expire. Returns false when the user has to log in again.
pub async fn ensure_valid_token(client: &ApiClient) -> Result<bool, FetchError> {
    let auth = client.tokens().load().await;
    if auth.access_token.is_empty() || auth.refresh_token.is_empty() {
        return Ok(false);
    }
    if !is_token_expiring_soon(&auth.expires_at, Utc::now()) {
        return Ok(true);
    }
    let refreshed = refresh_access_token(client).await?;
    Ok(refreshed
        .and_then(|token| token.access_token)
        .is_some_and(|token| !token.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_expiring_soon() {
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
        assert!(is_token_expiring_soon("", now));
        assert!(is_token_expiring_soon("not a date", now));
        assert!(is_token_expiring_soon("2026-01-01T12:00:30Z", now));
        assert!(is_token_expiring_soon("2026-01-01T11:00:00Z", now));
        assert!(!is_token_expiring_soon("2026-01-01T12:05:00Z", now));
    }
}
