// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # getrouter Core
//!
//! Domain models shared by the getrouter crates.
//!
//! ## Key Types
//!
//! ### Auth
//! - [`AuthState`] - Credentials stored on disk
//! - [`AuthStatus`] - Logged in or out
//! - [`AuthToken`] - Token pair returned by the API
//!
//! ### Dashboard
//! - [`Consumer`] - An API key
//! - [`Model`] - An available model
//! - [`Subscription`] / [`Plan`] - Current plan and limits
//!
//! ### Usage
//! - [`RawUsage`] - One usage record
//! - [`AggregatedUsage`] - Per-day totals from [`aggregate_usages`]

pub mod error;
pub mod models;

// Re-export error types
pub use error::CoreError;

// Re-export all model types
pub use models::{
    // Auth
    AuthState,
    AuthStatus,
    AuthToken,
    DEFAULT_TOKEN_TYPE,
    // Dashboard
    Consumer,
    Model,
    Plan,
    Subscription,
    UNNAMED_CONSUMER,
    sort_consumers_by_updated_at_desc,
    // Usage
    AggregatedUsage,
    RawUsage,
    TokenCount,
    aggregate_usages,
};
