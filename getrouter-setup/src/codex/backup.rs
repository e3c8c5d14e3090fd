//! Record of what an install replaced, so an uninstall can put it back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::auth::AuthRemovalOptions;
use super::config::RemovalPolicy;
use super::root::RootValues;

/// On-disk format version.
pub const BACKUP_VERSION: u32 = 1;

/// Backup of the Codex values replaced by getrouter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodexBackup {
    /// Format version; see [`BACKUP_VERSION`].
    pub version: u32,
    /// When the backup was first written.
    pub created_at: DateTime<Utc>,
    /// When the backup was last updated.
    pub updated_at: DateTime<Utc>,
    /// config.toml root keys.
    #[serde(default)]
    pub config: ConfigBackup,
    /// auth.json key.
    #[serde(default)]
    pub auth: AuthBackup,
}

/// Root key values before and after install.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigBackup {
    /// Values found before the first install.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<RootValues>,
    /// Values the last install wrote.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installed: Option<RootValues>,
}

/// `OPENAI_API_KEY` before and after install.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthBackup {
    /// Key found before the first install.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_openai_key: Option<String>,
    /// Key the last install wrote.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installed_openai_key: Option<String>,
}

/// State observed and written by one install.
#[derive(Debug, Clone, Copy)]
pub struct InstallRecord<'a> {
    /// Root values read before merging.
    pub observed_root: &'a RootValues,
    /// Root values the merge wrote.
    pub installed_root: &'a RootValues,
    /// `OPENAI_API_KEY` read before merging.
    pub observed_key: Option<&'a str>,
    /// Key the merge wrote.
    pub installed_key: &'a str,
}

impl CodexBackup {
    /// Creates an empty backup.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            version: BACKUP_VERSION,
            created_at: now,
            updated_at: now,
            config: ConfigBackup::default(),
            auth: AuthBackup::default(),
        }
    }

    /// Returns true when the version is one this build understands.
    pub fn is_supported(&self) -> bool {
        self.version == BACKUP_VERSION
    }

    /// Folds an install into the backup.
    ///
    /// Previous values are captured once and stay frozen across reinstalls,
    /// unless the user switched away from getrouter in between.
    pub fn record_install(&mut self, record: InstallRecord<'_>, now: DateTime<Utc>) {
        let observed = record.observed_root;
        let repointed = self.config.installed.as_ref() != Some(observed);
        if !observed.is_owned() && (self.config.previous.is_none() || repointed) {
            debug!("capturing previous codex root values");
            self.config.previous = Some(observed.clone());
        }

        if let Some(key) = record.observed_key.filter(|key| *key != record.installed_key) {
            let replaced = self.auth.installed_openai_key.as_deref() != Some(key);
            if self.auth.previous_openai_key.is_none() || replaced {
                debug!("capturing previous OPENAI_API_KEY");
                self.auth.previous_openai_key = Some(key.to_string());
            }
        }

        self.config.installed = Some(record.installed_root.clone());
        self.auth.installed_openai_key = Some(record.installed_key.to_string());
        self.updated_at = now;
    }

    /// How an uninstall should treat config.toml root keys.
    pub fn removal_policy(&self) -> RemovalPolicy {
        match &self.config.previous {
            Some(previous) => RemovalPolicy::RestoreRootKeys(previous.clone()),
            None => RemovalPolicy::DeleteRootKeys,
        }
    }

    /// How an uninstall should treat `OPENAI_API_KEY`.
    pub fn auth_removal_options(&self) -> AuthRemovalOptions {
        AuthRemovalOptions {
            installed: self.auth.installed_openai_key.clone(),
            restore: self.auth.previous_openai_key.clone(),
        }
    }
}
