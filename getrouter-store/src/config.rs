//! CLI configuration (`<config dir>/config.json`).

use std::path::{Path, PathBuf};

use getrouter_fetch::DEFAULT_API_BASE;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::StoreError;
use crate::persistence::{read_json_file, save_json};

/// Settings read from `config.json`. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    /// Dashboard API origin.
    pub api_base: String,
    /// Print JSON instead of tables.
    pub json: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            json: false,
        }
    }
}

/// Reads and writes [`AppConfig`].
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Store for `<config_dir>/config.json`.
    pub fn new(config_dir: &Path) -> Self {
        Self {
            path: config_dir.join("config.json"),
        }
    }

    /// Path of the config file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the config merged over defaults.
    pub async fn read_config(&self) -> AppConfig {
        let config = read_json_file(&self.path).await.unwrap_or_default();
        debug!(path = %self.path.display(), ?config, "Loaded configuration");
        config
    }

    /// Saves the config.
    pub async fn write_config(&self, config: &AppConfig) -> Result<(), StoreError> {
        save_json(&self.path, config).await
    }
}
