//! Domain models for getrouter.
//!
//! ## Submodules
//!
//! - [`auth`] - Stored credentials and login status
//! - [`consumer`] - API keys and models
//! - [`subscription`] - Current plan and limits
//! - [`usage`] - Usage records and daily aggregation

mod auth;
mod consumer;
mod subscription;
mod usage;

pub use auth::{AuthState, AuthStatus, AuthToken, DEFAULT_TOKEN_TYPE};
pub use consumer::{sort_consumers_by_updated_at_desc, Consumer, Model, UNNAMED_CONSUMER};
pub use subscription::{Plan, Subscription};
pub use usage::{aggregate_usages, AggregatedUsage, RawUsage, TokenCount};
