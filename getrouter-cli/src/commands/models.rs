//! Models command - list the models available to the account.

use anyhow::Result;
use clap::{Args, Subcommand};
use getrouter_core::Model;
use getrouter_fetch::services;

use crate::context::AppContext;
use crate::output::{print_json, render_table, DEFAULT_MAX_COL_WIDTH};
use crate::Cli;

const MODEL_HEADERS: [&str; 5] = ["ID", "NAME", "AUTHOR", "ENABLED", "UPDATED_AT"];

/// Arguments for the models command.
#[derive(Args)]
pub struct ModelsArgs {
    #[command(subcommand)]
    pub action: Option<ModelsAction>,
}

/// Models subcommands.
#[derive(Subcommand)]
pub enum ModelsAction {
    /// List models.
    List,
}

/// Runs the models command. `models` and `models list` are the same.
pub async fn run(args: &ModelsArgs, cli: &Cli) -> Result<()> {
    match args.action {
        None | Some(ModelsAction::List) => list(cli).await,
    }
}

async fn list(cli: &Cli) -> Result<()> {
    let ctx = AppContext::load().await?;
    let models = services::list_models(&ctx.client()?).await?;
    if ctx.json_output(cli) {
        return print_json(&models);
    }
    println!("{}", render_models(&models));
    Ok(())
}

/// `🧠 Models` and the table, or `😕 No models found`.
pub fn render_models(models: &[Model]) -> String {
    if models.is_empty() {
        return "😕 No models found".to_string();
    }
    let rows: Vec<_> = models
        .iter()
        .map(|model| {
            vec![
                model.id.clone().unwrap_or_default(),
                model.name.clone().unwrap_or_default(),
                model.author.clone().unwrap_or_default(),
                model.enabled.map(|e| e.to_string()).unwrap_or_default(),
                model.updated_at.clone().unwrap_or_default(),
            ]
        })
        .collect();
    format!("🧠 Models\n{}", render_table(&MODEL_HEADERS, &rows, DEFAULT_MAX_COL_WIDTH))
}
