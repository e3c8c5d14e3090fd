//! Codex command - point Codex at getrouter, or undo it.

use anyhow::Result;
use chrono::Utc;
use clap::{Args, Subcommand};
use getrouter_setup::{
    merge_auth_json, merge_codex_toml, read_codex_toml_root_values, read_openai_key,
    remove_auth_json, remove_codex_config, CodexBackup, CodexConfigInput, InstallRecord,
    RemovalPolicy, PROVIDER_ID,
};
use tracing::{debug, info};

use super::{require_interactive, select_consumer_with_key};
use crate::context::AppContext;
use crate::interactive::codex::{
    codex_model_choices, map_reasoning_value, reasoning_fuzzy_choices, reasoning_label,
    reasoning_prompt, MODEL_PROMPT, REASONING_CHOICES,
};
use crate::interactive::{Prompter, TerminalPrompter};
use crate::Cli;

/// Arguments for the codex command.
#[derive(Args)]
pub struct CodexArgs {
    /// Set codex model (skips model selection).
    #[arg(long, short)]
    pub model: Option<String>,

    #[command(subcommand)]
    pub action: Option<CodexAction>,
}

/// Codex subcommands.
#[derive(Subcommand)]
pub enum CodexAction {
    /// Remove getrouter Codex configuration.
    Uninstall {
        /// Leave model, model_reasoning_effort and model_provider in place.
        #[arg(long)]
        keep_root: bool,
    },
}

/// Runs the codex command.
pub async fn run(args: &CodexArgs, _cli: &Cli) -> Result<()> {
    let ctx = AppContext::load().await?;
    let lines = match &args.action {
        None => install(&ctx, &mut TerminalPrompter::new(), args.model.as_deref()).await?,
        Some(CodexAction::Uninstall { keep_root }) => uninstall(&ctx, *keep_root).await?,
    };
    for line in lines {
        println!("{line}");
    }
    Ok(())
}

// ============================================================================
// Install
// ============================================================================

/// Asks for model, reasoning and key, then updates Codex's files.
///
/// Returns the lines to print; empty when the user cancelled.
pub async fn install(
    ctx: &AppContext,
    prompter: &mut dyn Prompter,
    model: Option<&str>,
) -> Result<Vec<String>> {
    require_interactive(prompter, "Interactive mode required for codex configuration.")?;
    let client = ctx.client()?;

    let model = match model.map(str::trim).filter(|m| !m.is_empty()) {
        Some(model) => model.to_string(),
        None => {
            let choices = codex_model_choices(&client).await;
            let Some(index) = prompter.fuzzy_select(MODEL_PROMPT, &choices) else {
                return Ok(Vec::new());
            };
            choices[index].title.clone()
        }
    };

    let Some(index) = prompter.fuzzy_select(&reasoning_prompt(&model), &reasoning_fuzzy_choices())
    else {
        return Ok(Vec::new());
    };
    let reasoning_id = REASONING_CHOICES[index].id;
    let reasoning = map_reasoning_value(reasoning_id);

    let Some((consumer, api_key)) = select_consumer_with_key(&client, prompter).await? else {
        return Ok(Vec::new());
    };

    let mut lines = vec![
        format!("Model: {model}"),
        format!("Reasoning: {} ({reasoning})", reasoning_label(reasoning_id)),
        format!("Provider: {PROVIDER_ID}"),
        format!("Key: {}", consumer.display_name()),
    ];

    let existing_config = ctx.codex.read_config_toml().await?;
    let existing_auth = ctx.codex.read_auth_json().await?;

    let input = CodexConfigInput::new(model, reasoning);
    let merged_config = merge_codex_toml(&existing_config, &input);
    let merged_auth = merge_auth_json(&existing_auth, &api_key);

    let backups = ctx.backups();
    let now = Utc::now();
    let mut backup = backups.load().await.unwrap_or_else(|| CodexBackup::new(now));
    backup.record_install(
        InstallRecord {
            observed_root: &read_codex_toml_root_values(&existing_config),
            installed_root: &read_codex_toml_root_values(&merged_config),
            observed_key: read_openai_key(&existing_auth),
            installed_key: &api_key,
        },
        now,
    );
    backups.save(&backup).await?;

    ctx.codex.write_config_toml(&merged_config).await?;
    ctx.codex.write_auth_json(&merged_auth).await?;
    info!(model = %input.model, reasoning = %input.reasoning, "Codex configured");

    lines.push("✅ Updated ~/.codex/config.toml".to_string());
    lines.push("✅ Updated ~/.codex/auth.json".to_string());
    Ok(lines)
}

// ============================================================================
// Uninstall
// ============================================================================

/// Removes getrouter's entries from Codex's files, restoring what the
/// install replaced when a backup exists. Returns one line per file.
pub async fn uninstall(ctx: &AppContext, keep_root: bool) -> Result<Vec<String>> {
    let backups = ctx.backups();
    let backup = backups.load().await;
    debug!(has_backup = backup.is_some(), keep_root, "Uninstalling codex configuration");

    let policy = if keep_root {
        RemovalPolicy::PreserveRootKeys
    } else {
        backup
            .as_ref()
            .map_or(RemovalPolicy::DeleteRootKeys, CodexBackup::removal_policy)
    };
    let auth_options = backup
        .as_ref()
        .map(CodexBackup::auth_removal_options)
        .unwrap_or_default();

    let mut lines = Vec::new();

    let config_path = ctx.codex.config_path();
    if ctx.codex.config_exists().await? {
        let content = ctx.codex.read_config_toml().await?;
        let removal = remove_codex_config(&content, &policy);
        if removal.changed {
            ctx.codex.write_config_toml(&removal.content).await?;
            lines.push(format!("✅ Removed getrouter entries from {}", config_path.display()));
        } else {
            lines.push(format!("ℹ️ No getrouter entries in {}", config_path.display()));
        }
    } else {
        lines.push(format!("ℹ️ {} not found", config_path.display()));
    }

    let auth_path = ctx.codex.auth_path();
    if ctx.codex.auth_exists().await? {
        let data = ctx.codex.read_auth_json().await?;
        let removal = remove_auth_json(&data, &auth_options);
        if removal.changed {
            ctx.codex.write_auth_json(&removal.data).await?;
            lines.push(format!("✅ Removed getrouter entries from {}", auth_path.display()));
        } else {
            lines.push(format!("ℹ️ No getrouter entries in {}", auth_path.display()));
        }
    } else {
        lines.push(format!("ℹ️ {} not found", auth_path.display()));
    }

    backups.delete().await?;
    Ok(lines)
}
