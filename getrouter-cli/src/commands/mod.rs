//! CLI command implementations.

pub mod auth;
pub mod claude;
pub mod codex;
pub mod keys;
pub mod models;
pub mod status;
pub mod usages;

use anyhow::{bail, Result};
use getrouter_core::Consumer;
use getrouter_fetch::{services, ApiClient};

use crate::interactive::{keys::select_consumer, Prompter};

/// Raised when a picked key comes back without its secret.
pub(crate) const MISSING_API_KEY: &str = "API key not found. Please create one or choose another.";

/// Fails with `message` unless a user can answer prompts.
pub(crate) fn require_interactive(prompter: &dyn Prompter, message: &str) -> Result<()> {
    if !prompter.is_interactive() {
        bail!("{message}");
    }
    Ok(())
}

/// Lets the user search for a key and fetches it with its secret.
/// `None` when nothing was picked.
pub(crate) async fn select_consumer_with_key(
    client: &ApiClient,
    prompter: &mut dyn Prompter,
) -> Result<Option<(Consumer, String)>> {
    let Some(selected) = select_consumer(client, prompter).await? else {
        return Ok(None);
    };
    let Some(id) = selected.id.as_deref().filter(|id| !id.is_empty()) else {
        return Ok(None);
    };
    let consumer = services::get_consumer(client, id).await?;
    match consumer.api_key.clone().filter(|key| !key.is_empty()) {
        Some(api_key) => Ok(Some((selected, api_key))),
        None => bail!("{MISSING_API_KEY}"),
    }
}
