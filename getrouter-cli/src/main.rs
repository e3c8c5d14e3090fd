// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! getrouter CLI - API keys and tool setup for getrouter.dev.
//!
//! # Examples
//!
//! ```bash
//! # Log in through the browser
//! getrouter login
//!
//! # Point Codex at getrouter
//! getrouter codex
//!
//! # Undo it, restoring the previous model settings
//! getrouter codex uninstall
//!
//! # Manage API keys
//! getrouter keys list --show
//!
//! # Plan, limits and the last week of usage
//! getrouter status
//! getrouter usages --format json
//! ```

mod commands;
mod context;
mod interactive;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{auth, claude, codex, keys, models, status, usages};

// ============================================================================
// CLI Definition
// ============================================================================

/// getrouter CLI.
#[derive(Parser)]
#[command(name = "getrouter")]
#[command(about = "CLI for getrouter.dev")]
#[command(long_about = r#"
getrouter manages your getrouter.dev API keys and configures AI coding tools
to use the getrouter proxy.

Examples:
  getrouter login                 # Browser login
  getrouter codex                 # Configure Codex
  getrouter codex uninstall       # Remove the Codex configuration
  getrouter claude --install      # Configure Claude via your shell rc
  getrouter keys                  # List API keys
  getrouter status                # Login and subscription status
"#)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Quiet mode (no log output).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Login with the browser device flow.
    Login,

    /// Clear local auth state.
    Logout,

    /// Configure Codex.
    Codex(codex::CodexArgs),

    /// Configure the Claude environment.
    Claude(claude::ClaudeArgs),

    /// Manage API keys.
    Keys(keys::KeysArgs),

    /// List models.
    Models(models::ModelsArgs),

    /// Show login and subscription status.
    Status,

    /// Show recent usage.
    Usages,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[repr(i32)]
pub enum ExitCode {
    /// Success.
    #[allow(dead_code)]
    Success = 0,
    /// General error.
    Error = 1,
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return;
    }

    let filter = if verbose {
        EnvFilter::new("getrouter=debug,info")
    } else {
        EnvFilter::new("getrouter=warn")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Commands::Login => auth::login(&cli).await,
        Commands::Logout => auth::logout(&cli).await,
        Commands::Codex(args) => codex::run(args, &cli).await,
        Commands::Claude(args) => claude::run(args, &cli).await,
        Commands::Keys(args) => keys::run(args, &cli).await,
        Commands::Models(args) => models::run(args, &cli).await,
        Commands::Status => status::run(&cli).await,
        Commands::Usages => usages::run(&cli).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(ExitCode::Error as i32);
    }

    Ok(())
}
