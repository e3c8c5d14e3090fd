//! Login and logout.

use anyhow::{bail, Result};
use getrouter_core::AuthState;
use getrouter_fetch::{build_login_url, generate_auth_code, poll_authorize, PollOptions};
use tracing::{debug, info};

use crate::context::AppContext;
use crate::Cli;

/// Runs `getrouter login`.
pub async fn login(_cli: &Cli) -> Result<()> {
    let ctx = AppContext::load().await?;
    let code = generate_auth_code();
    let url = build_login_url(&code);

    println!("🔐 To authenticate, visit:");
    println!("{url}");
    println!("⏳ Waiting for confirmation...");
    if let Err(e) = webbrowser::open(&url) {
        debug!(error = %e, "Failed to open browser");
        println!("⚠️ Unable to open browser. Please open the URL manually.");
    }

    complete_login(&ctx, &code, &PollOptions::default()).await?;
    println!("✅ Login successful.");
    Ok(())
}

/// Waits for `code` to be confirmed and stores the issued tokens.
pub async fn complete_login(ctx: &AppContext, code: &str, options: &PollOptions) -> Result<()> {
    let client = ctx.anonymous_client()?;
    let token = poll_authorize(&client, code, options).await?;
    let Some(state) = AuthState::from_token(&token) else {
        bail!("Login response did not include tokens.");
    };
    ctx.auth.write_auth(&state).await?;
    info!(expires_at = %state.expires_at, "Logged in");
    Ok(())
}

/// Runs `getrouter logout`.
pub async fn logout(_cli: &Cli) -> Result<()> {
    let ctx = AppContext::load().await?;
    ctx.auth.clear_auth().await?;
    println!("Cleared local auth data.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::Utc;
    use getrouter_core::AuthStatus;
    use getrouter_store::AppConfig;
    use tempfile::TempDir;
    use wiremock::matchers::{body_json, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn fast_poll() -> PollOptions {
        PollOptions {
            timeout: Duration::from_secs(5),
            initial_delay: Duration::from_millis(5),
            max_delay: Duration::from_millis(10),
        }
    }

    fn context(dir: &TempDir, server: &MockServer) -> AppContext {
        let config = AppConfig {
            api_base: server.uri(),
            json: false,
        };
        AppContext::new(dir.path().join("getrouter"), dir.path().join("home"), config)
    }

    #[tokio::test]
    async fn test_complete_login_stores_tokens() {
        let dir = TempDir::new().unwrap();
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/dashboard/auth/authorize"))
            .and(body_json(serde_json::json!({ "code": "abc" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "accessToken": "access",
                "refreshToken": "refresh",
                "expiresAt": "2999-01-01T00:00:00Z"
            })))
            .mount(&server)
            .await;
        // The login exchange is anonymous.
        Mock::given(header_exists("authorization"))
            .respond_with(ResponseTemplate::new(500))
            .with_priority(1)
            .mount(&server)
            .await;

        let ctx = context(&dir, &server);
        complete_login(&ctx, "abc", &fast_poll()).await.unwrap();

        let state = ctx.auth.read_auth().await;
        assert_eq!(state.access_token, "access");
        assert_eq!(state.refresh_token, "refresh");
        assert_eq!(state.token_type, "Bearer");
        assert!(ctx.auth.auth_status(Utc::now()).await.is_logged_in());
    }

    #[tokio::test]
    async fn test_complete_login_expired_code() {
        let dir = TempDir::new().unwrap();
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/dashboard/auth/authorize"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let ctx = context(&dir, &server);
        assert!(complete_login(&ctx, "abc", &fast_poll()).await.is_err());
        assert_eq!(ctx.auth.auth_status(Utc::now()).await, AuthStatus::LoggedOut);
    }
}
