//! Dashboard API client.
//!
//! Every call goes through [`ApiClient::request_json`], which adds the
//! stored credentials, refreshes them once on a 401, retries transient
//! failures and turns error payloads into [`ApiError`]s.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use getrouter_core::AuthState;
use reqwest::{header, Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::error::{ApiError, FetchError};
use crate::refresh::refresh_access_token;
use crate::retry::RetryStrategy;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User agent string for getrouter.
const USER_AGENT: &str = concat!("getrouter/", env!("CARGO_PKG_VERSION"));

/// Default dashboard origin.
pub const DEFAULT_API_BASE: &str = "https://getrouter.dev";

/// Cookie name used when no override is set.
pub const DEFAULT_AUTH_COOKIE: &str = "access_token";

// ============================================================================
// Token Store
// ============================================================================

/// Where the client reads and writes dashboard credentials.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Current credentials (the default state when none are stored).
    async fn load(&self) -> AuthState;

    /// Replaces the stored credentials.
    async fn save(&self, state: &AuthState) -> Result<(), FetchError>;
}

/// In-memory [`TokenStore`].
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    state: Mutex<AuthState>,
}

impl MemoryTokenStore {
    /// Creates a store holding `state`.
    pub fn new(state: AuthState) -> Self {
        Self {
            state: Mutex::new(state),
        }
    }

    /// Snapshot of the stored state.
    pub fn snapshot(&self) -> AuthState {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn load(&self) -> AuthState {
        self.snapshot()
    }

    async fn save(&self, state: &AuthState) -> Result<(), FetchError> {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = state.clone();
        Ok(())
    }
}

// ============================================================================
// URL & Headers
// ============================================================================

/// Joins `base` and `path` with exactly one `/`.
pub fn build_api_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{base}/{path}")
}

/// Picks the auth cookie name from `GETROUTER_AUTH_COOKIE`, then
/// `KRATOS_AUTH_COOKIE`, then [`DEFAULT_AUTH_COOKIE`].
pub fn resolve_cookie_name(router: Option<String>, kratos: Option<String>) -> String {
    router
        .filter(|name| !name.is_empty())
        .or(kratos.filter(|name| !name.is_empty()))
        .unwrap_or_else(|| DEFAULT_AUTH_COOKIE.to_string())
}

/// Auth cookie name from the process environment.
pub fn auth_cookie_name() -> String {
    resolve_cookie_name(
        std::env::var("GETROUTER_AUTH_COOKIE").ok(),
        std::env::var("KRATOS_AUTH_COOKIE").ok(),
    )
}

// ============================================================================
// API Client
// ============================================================================

/// JSON client for the getrouter dashboard API.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    api_base: String,
    tokens: Arc<dyn TokenStore>,
    retry: RetryStrategy,
    include_auth: bool,
    cookie_name: String,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("api_base", &self.api_base)
            .field("retry", &self.retry)
            .field("include_auth", &self.include_auth)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Creates a client for `api_base` using credentials from `tokens`.
    pub fn new(
        api_base: impl Into<String>,
        tokens: Arc<dyn TokenStore>,
    ) -> Result<Self, FetchError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            http,
            api_base: api_base.into(),
            tokens,
            retry: RetryStrategy::default(),
            include_auth: true,
            cookie_name: auth_cookie_name(),
        })
    }

    /// Sets the retry strategy for this client.
    pub fn with_retry_strategy(mut self, strategy: RetryStrategy) -> Self {
        self.retry = strategy;
        self
    }

    /// Sends requests without credentials (used by login).
    pub fn without_auth(mut self) -> Self {
        self.include_auth = false;
        self
    }

    /// Overrides the auth cookie name.
    pub fn with_cookie_name(mut self, name: impl Into<String>) -> Self {
        self.cookie_name = name.into();
        self
    }

    /// The configured API origin.
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// The credential store.
    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    /// The default retry strategy.
    pub fn retry_strategy(&self) -> &RetryStrategy {
        &self.retry
    }

    /// Absolute URL for an API path.
    pub fn url(&self, path: &str) -> String {
        build_api_url(&self.api_base, path)
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    /// Sends a JSON request with the client's retry strategy.
    pub async fn request_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<T, FetchError> {
        self.request_json_with(method, path, body, &self.retry).await
    }

    /// Sends a JSON request with an explicit retry strategy.
    #[instrument(skip(self, body, retry), fields(method = %method, path = %path))]
    pub async fn request_json_with<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        retry: &RetryStrategy,
    ) -> Result<T, FetchError> {
        retry.run(|| self.send_once(&method, path, body)).await
    }

    async fn send_once<T: DeserializeOwned>(
        &self,
        method: &Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<T, FetchError> {
        let url = self.url(path);
        let auth = if self.include_auth {
            Some(self.tokens.load().await)
        } else {
            None
        };
        let access_token = auth
            .as_ref()
            .map(|auth| auth.access_token.as_str())
            .filter(|token| !token.is_empty());

        let mut response = self.build_request(method, &url, body, access_token).send().await?;
        debug!(status = %response.status(), "Response received");

        let can_refresh = auth.as_ref().is_some_and(|auth| !auth.refresh_token.is_empty());
        if response.status() == StatusCode::UNAUTHORIZED && can_refresh {
            debug!("Access token rejected, refreshing");
            let refreshed = refresh_access_token(self)
                .await?
                .and_then(|token| token.access_token)
                .filter(|token| !token.is_empty());
            if let Some(token) = refreshed {
                response = self.build_request(method, &url, body, Some(&token)).send().await?;
                debug!(status = %response.status(), "Response after refresh");
            }
        }

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            let payload = serde_json::from_str::<Value>(&text).ok();
            let fallback = status
                .canonical_reason()
                .map_or_else(|| format!("HTTP {}", status.as_u16()), str::to_string);
            return Err(ApiError::from_payload(payload.as_ref(), &fallback, status.as_u16()).into());
        }

        let text = if text.trim().is_empty() { "null" } else { text.as_str() };
        Ok(serde_json::from_str(text)?)
    }

    fn build_request(
        &self,
        method: &Method,
        url: &str,
        body: Option<&Value>,
        access_token: Option<&str>,
    ) -> RequestBuilder {
        let mut request = self
            .http
            .request(method.clone(), url)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = access_token {
            request = request
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .header(header::COOKIE, format!("{}={token}", self.cookie_name));
        }
        if let Some(body) = body {
            request = request.body(body.to_string());
        }
        request
    }
}
