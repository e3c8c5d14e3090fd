//! Persistence of the Codex install backup (`<config dir>/codex-backup.json`).

use std::path::{Path, PathBuf};

use getrouter_setup::{CodexBackup, BACKUP_VERSION};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::StoreError;
use crate::persistence::{read_json_file, remove_file_if_exists, save_json};

/// File name of the backup.
pub const BACKUP_FILE: &str = "codex-backup.json";

/// Reads, writes and deletes the [`CodexBackup`].
#[derive(Debug, Clone)]
pub struct BackupStore {
    path: PathBuf,
}

impl BackupStore {
    /// Store for `<config_dir>/codex-backup.json`.
    pub fn new(config_dir: &Path) -> Self {
        Self {
            path: config_dir.join(BACKUP_FILE),
        }
    }

    /// Path of the backup file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the backup. Missing, invalid and other-version files all read
    /// as `None`.
    pub async fn load(&self) -> Option<CodexBackup> {
        let raw: Value = read_json_file(&self.path).await?;
        let version = raw.get("version").and_then(Value::as_u64);
        if version != Some(u64::from(BACKUP_VERSION)) {
            warn!(path = %self.path.display(), ?version, "Ignoring backup with unsupported version");
            return None;
        }
        match serde_json::from_value::<CodexBackup>(raw) {
            Ok(backup) => Some(backup),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Ignoring malformed backup");
                None
            }
        }
    }

    /// Saves the backup with owner-only permissions.
    pub async fn save(&self, backup: &CodexBackup) -> Result<(), StoreError> {
        save_json(&self.path, backup).await?;
        debug!(path = %self.path.display(), "Backup saved");
        Ok(())
    }

    /// Deletes the backup. Returns whether a file was removed.
    pub async fn delete(&self) -> Result<bool, StoreError> {
        remove_file_if_exists(&self.path).await
    }
}
