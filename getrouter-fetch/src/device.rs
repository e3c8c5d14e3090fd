//! Browser-based device login.
//!
//! The CLI generates a short code, opens `https://getrouter.dev/auth/<code>`
//! and polls the authorize endpoint until the user confirms the login in the
//! browser.

use std::future::Future;
use std::time::Duration;

use getrouter_core::AuthToken;
use rand::Rng;
use tokio::time::Instant;
use tracing::{debug, instrument};

use crate::client::ApiClient;
use crate::error::FetchError;
use crate::services;

/// Alphabet for login codes.
const AUTH_CODE_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz234567";

/// Length of a login code.
pub const AUTH_CODE_LEN: usize = 13;

/// Origin of the browser login page.
pub const LOGIN_ORIGIN: &str = "https://getrouter.dev";

/// Generates a random 13-character login code.
pub fn generate_auth_code() -> String {
    let mut rng = rand::thread_rng();
    (0..AUTH_CODE_LEN)
        .map(|_| char::from(AUTH_CODE_ALPHABET[rng.gen_range(0..AUTH_CODE_ALPHABET.len())]))
        .collect()
}

/// Browser URL for a login code.
pub fn build_login_url(code: &str) -> String {
    format!("{LOGIN_ORIGIN}/auth/{code}")
}

// ============================================================================
// Polling
// ============================================================================

/// Timing for [`poll_authorize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollOptions {
    /// Give up after this long.
    pub timeout: Duration,
    /// First delay between polls.
    pub initial_delay: Duration,
    /// Delays double up to this bound.
    pub max_delay: Duration,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5 * 60),
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(10),
        }
    }
}

/// Polls the authorize endpoint until the code is confirmed.
#[instrument(skip(client, options))]
pub async fn poll_authorize(
    client: &ApiClient,
    code: &str,
    options: &PollOptions,
) -> Result<AuthToken, FetchError> {
    poll_with(|| services::authorize(client, code), options).await
}

/// Polling loop behind [`poll_authorize`], generic over the authorize call.
///
/// A 404 means "not confirmed yet"; 400 and 403 mean the code is used or
/// expired; anything else is returned as is.
pub async fn poll_with<F, Fut>(
    mut authorize: F,
    options: &PollOptions,
) -> Result<AuthToken, FetchError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<AuthToken, FetchError>>,
{
    let start = Instant::now();
    let mut delay = options.initial_delay;
    let mut attempt = 0u32;

    loop {
        match authorize().await {
            Ok(token) => return Ok(token),
            Err(err) => match err.status() {
                Some(404) => {}
                Some(400) => return Err(FetchError::AuthCodeUsed),
                Some(403) => return Err(FetchError::AuthCodeExpired),
                _ => return Err(err),
            },
        }

        if start.elapsed() >= options.timeout {
            return Err(FetchError::LoginTimedOut);
        }

        attempt += 1;
        debug!(
            attempt,
            delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            "Login not confirmed yet"
        );
        tokio::time::sleep(delay).await;
        delay = delay.saturating_mul(2).min(options.max_delay);
    }
}
