// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # getrouter Fetch
//!
//! HTTP access to the getrouter dashboard API.
//!
//! ## Client
//!
//! - [`client::ApiClient`] - JSON requests with auth headers and token refresh
//! - [`client::TokenStore`] - Where credentials are loaded from and saved to
//! - [`retry::RetryStrategy`] - Exponential backoff for transient failures
//!
//! ## Auth
//!
//! - [`device`] - Browser login codes and authorize polling
//! - [`refresh`] - Access token refresh
//!
//! ## Endpoints
//!
//! The [`services`] module wraps every dashboard endpoint the CLI uses;
//! [`pagination::fetch_all_pages`] walks `nextPageToken` listings.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use getrouter_fetch::{services, ApiClient, MemoryTokenStore};
//!
//! let client = ApiClient::new("https://getrouter.dev", Arc::new(MemoryTokenStore::default()))?;
//! let keys = services::list_all_consumers(&client).await?;
//! ```

// Core modules
pub mod client;
pub mod device;
pub mod error;
pub mod pagination;
pub mod refresh;
pub mod retry;
pub mod services;

// Re-export key types at crate root

// Errors
pub use error::{ApiError, FetchError};

// Client
pub use client::{
    auth_cookie_name, build_api_url, resolve_cookie_name, ApiClient, MemoryTokenStore, TokenStore,
    DEFAULT_API_BASE, DEFAULT_AUTH_COOKIE,
};
pub use reqwest::Method;
pub use retry::{is_retryable_status, RetryStrategy};

// Auth
pub use device::{build_login_url, generate_auth_code, poll_authorize, PollOptions};
pub use refresh::{ensure_valid_token, is_token_expiring_soon, refresh_access_token};

// Endpoints
pub use pagination::{fetch_all_pages, Page};
pub use services::{ListConsumersResponse, ListModelsResponse, ListUsagesResponse};
