//! Paths, settings and clients shared by the commands.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use getrouter_fetch::ApiClient;
use getrouter_store::{
    default_config_dir, home_dir, AppConfig, AuthStore, BackupStore, CodexHome, ConfigStore,
};
use tracing::debug;

use crate::{Cli, OutputFormat};

/// Everything a command needs from the environment.
#[derive(Debug, Clone)]
pub struct AppContext {
    /// `$GETROUTER_CONFIG_DIR` or `~/.getrouter`.
    pub config_dir: PathBuf,
    /// The user's home directory (shell rc files live here).
    pub home: PathBuf,
    /// Loaded `config.json`.
    pub config: AppConfig,
    /// Dashboard credentials.
    pub auth: Arc<AuthStore>,
    /// Codex's files.
    pub codex: CodexHome,
}

impl AppContext {
    /// Loads the context from the real environment.
    pub async fn load() -> Result<Self> {
        let config_dir = default_config_dir();
        let home = home_dir()?;
        let config = ConfigStore::new(&config_dir).read_config().await;
        debug!(config_dir = %config_dir.display(), api_base = %config.api_base, "Context loaded");
        Ok(Self::new(config_dir, home, config))
    }

    /// Context rooted at explicit directories.
    pub fn new(config_dir: PathBuf, home: PathBuf, config: AppConfig) -> Self {
        Self {
            auth: Arc::new(AuthStore::new(&config_dir)),
            codex: CodexHome::new(home.join(".codex")),
            config_dir,
            home,
            config,
        }
    }

    /// Store for the Codex install backup.
    pub fn backups(&self) -> BackupStore {
        BackupStore::new(&self.config_dir)
    }

    /// API client that sends the stored credentials.
    pub fn client(&self) -> Result<ApiClient> {
        Ok(ApiClient::new(self.config.api_base.clone(), self.auth.clone())?)
    }

    /// API client for endpoints that must not see credentials.
    pub fn anonymous_client(&self) -> Result<ApiClient> {
        Ok(self.client()?.without_auth())
    }

    /// Whether output should be JSON (flag or `config.json`).
    pub fn json_output(&self, cli: &Cli) -> bool {
        cli.format == OutputFormat::Json || self.config.json
    }
}
