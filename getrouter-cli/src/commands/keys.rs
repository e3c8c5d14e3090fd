//! Keys command - list, create, update and delete API keys.

use anyhow::Result;
use clap::{Args, Subcommand};
use getrouter_core::{sort_consumers_by_updated_at_desc, Consumer};
use getrouter_fetch::{services, ApiClient};
use getrouter_store::mask_secret;
use tracing::debug;

use super::require_interactive;
use crate::context::AppContext;
use crate::interactive::keys::{
    confirm_delete, prompt_key_enabled, prompt_key_name, select_consumer_from_list,
};
use crate::interactive::{Prompter, TerminalPrompter};
use crate::output::{print_json, render_table, ConsumerOutput};
use crate::Cli;

const KEY_HEADERS: [&str; 5] = ["NAME", "ENABLED", "LAST_ACCESS", "CREATED_AT", "API_KEY"];
const KEY_MAX_COL_WIDTH: usize = 64;

/// Arguments for the keys command.
#[derive(Args)]
pub struct KeysArgs {
    /// Show full API keys.
    #[arg(long)]
    pub show: bool,

    #[command(subcommand)]
    pub action: Option<KeysAction>,
}

/// Keys subcommands.
#[derive(Subcommand)]
pub enum KeysAction {
    /// List API keys.
    List {
        /// Show full API keys.
        #[arg(long)]
        show: bool,
    },

    /// Create an API key.
    Create,

    /// Update an API key.
    Update {
        /// Key id (prompted when omitted).
        id: Option<String>,
    },

    /// Delete an API key.
    Delete {
        /// Key id (prompted when omitted).
        id: Option<String>,
    },
}

/// Runs the keys command.
pub async fn run(args: &KeysArgs, cli: &Cli) -> Result<()> {
    let ctx = AppContext::load().await?;
    let client = ctx.client()?;
    let json = ctx.json_output(cli);
    let mut prompter = TerminalPrompter::new();

    match &args.action {
        None => print_consumers(&list_keys(&client).await?, args.show, json),
        Some(KeysAction::List { show }) => {
            print_consumers(&list_keys(&client).await?, *show || args.show, json)
        }
        Some(KeysAction::Create) => {
            let Some(consumer) = create_key(&client, &mut prompter).await? else {
                return Ok(());
            };
            print_consumers(std::slice::from_ref(&consumer), true, json)?;
            if !json {
                println!("Please store this API key securely.");
            }
            Ok(())
        }
        Some(KeysAction::Update { id }) => {
            match update_key(&client, &mut prompter, id.as_deref()).await? {
                Some(consumer) => print_consumers(&[consumer], false, json),
                None => Ok(()),
            }
        }
        Some(KeysAction::Delete { id }) => {
            match delete_key(&client, &mut prompter, id.as_deref()).await? {
                Some(consumer) => print_consumers(&[consumer], false, json),
                None => Ok(()),
            }
        }
    }
}

// ============================================================================
// Output
// ============================================================================

fn consumer_row(consumer: &Consumer, show_api_key: bool) -> Vec<String> {
    let api_key = consumer.api_key.as_deref().unwrap_or_default();
    let api_key = if show_api_key { api_key.to_string() } else { mask_secret(api_key) };
    vec![
        consumer.name.clone().unwrap_or_default(),
        consumer.enabled.map(|e| e.to_string()).unwrap_or_default(),
        consumer.last_access.clone().unwrap_or_default(),
        consumer.created_at.clone().unwrap_or_default(),
        api_key,
    ]
}

/// Table of keys, secrets masked unless `show_api_key`.
pub fn render_consumers(consumers: &[Consumer], show_api_key: bool) -> String {
    let rows: Vec<_> = consumers
        .iter()
        .map(|consumer| consumer_row(consumer, show_api_key))
        .collect();
    render_table(&KEY_HEADERS, &rows, KEY_MAX_COL_WIDTH)
}

fn print_consumers(consumers: &[Consumer], show_api_key: bool, json: bool) -> Result<()> {
    if json {
        let output: Vec<_> = consumers
            .iter()
            .map(|consumer| ConsumerOutput::new(consumer, show_api_key))
            .collect();
        return print_json(&output);
    }
    println!("{}", render_consumers(consumers, show_api_key));
    Ok(())
}

// ============================================================================
// Actions
// ============================================================================

/// Every key, newest first.
pub async fn list_keys(client: &ApiClient) -> Result<Vec<Consumer>> {
    let mut consumers = services::list_all_consumers(client).await?;
    sort_consumers_by_updated_at_desc(&mut consumers);
    Ok(consumers)
}

/// Applies the prompted `name` and `enabled` to `consumer`.
///
/// Returns the updated key and the comma-separated list of fields that
/// actually changed (empty when nothing did).
pub fn apply_key_changes(
    consumer: &Consumer,
    name: Option<String>,
    enabled: Option<bool>,
) -> (Consumer, String) {
    let mut mask = Vec::new();
    let mut updated = consumer.clone();
    if let Some(name) = name.filter(|name| consumer.name.as_ref() != Some(name)) {
        updated.name = Some(name);
        mask.push("name");
    }
    if let Some(enabled) = enabled.filter(|enabled| consumer.enabled != Some(*enabled)) {
        updated.enabled = Some(enabled);
        mask.push("enabled");
    }
    (updated, mask.join(","))
}

async fn save_changes(
    client: &ApiClient,
    consumer: Consumer,
    name: Option<String>,
    enabled: Option<bool>,
) -> Result<Consumer> {
    let (updated, mask) = apply_key_changes(&consumer, name, enabled);
    if mask.is_empty() {
        debug!("No key fields changed");
        return Ok(consumer);
    }
    Ok(services::update_consumer(client, &updated, &mask).await?)
}

async fn resolve_key(
    client: &ApiClient,
    prompter: &mut dyn Prompter,
    id: Option<&str>,
    message: &str,
) -> Result<Option<Consumer>> {
    match id {
        Some(id) => Ok(Some(services::get_consumer(client, id).await?)),
        None => {
            require_interactive(prompter, "Interactive mode required when key id is omitted.")?;
            select_consumer_from_list(client, prompter, message).await
        }
    }
}

/// Prompts for name and state, then creates the key. `None` on cancel.
pub async fn create_key(
    client: &ApiClient,
    prompter: &mut dyn Prompter,
) -> Result<Option<Consumer>> {
    require_interactive(prompter, "Interactive mode required for keys create.")?;
    let Some(name) = prompt_key_name(prompter, None) else {
        return Ok(None);
    };
    let Some(enabled) = prompt_key_enabled(prompter, true) else {
        return Ok(None);
    };
    let consumer = services::create_consumer(client).await?;
    Ok(Some(save_changes(client, consumer, name, Some(enabled)).await?))
}

/// Picks a key (or fetches `id`) and updates its name and state.
pub async fn update_key(
    client: &ApiClient,
    prompter: &mut dyn Prompter,
    id: Option<&str>,
) -> Result<Option<Consumer>> {
    require_interactive(prompter, "Interactive mode required for keys update.")?;
    let Some(selected) = resolve_key(client, prompter, id, "Select key to update").await? else {
        return Ok(None);
    };
    if selected.id.as_deref().is_none_or(str::is_empty) {
        return Ok(None);
    }
    let Some(name) = prompt_key_name(prompter, selected.name.as_deref()) else {
        return Ok(None);
    };
    let Some(enabled) = prompt_key_enabled(prompter, selected.enabled.unwrap_or(true)) else {
        return Ok(None);
    };
    Ok(Some(save_changes(client, selected, name, Some(enabled)).await?))
}

/// Picks a key (or fetches `id`) and deletes it after confirmation.
/// Returns the deleted key.
pub async fn delete_key(
    client: &ApiClient,
    prompter: &mut dyn Prompter,
    id: Option<&str>,
) -> Result<Option<Consumer>> {
    require_interactive(prompter, "Interactive mode required for keys delete.")?;
    let Some(selected) = resolve_key(client, prompter, id, "Select key to delete").await? else {
        return Ok(None);
    };
    let Some(key_id) = selected.id.as_deref().filter(|id| !id.is_empty()) else {
        return Ok(None);
    };
    if !confirm_delete(prompter, &selected) {
        return Ok(None);
    }
    services::delete_consumer(client, key_id).await?;
    Ok(Some(selected))
}
