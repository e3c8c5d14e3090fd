//! Codex's own files under `~/.codex`.

use std::path::{Path, PathBuf};

use getrouter_setup::AuthJson;
use serde_json::Value;
use tracing::debug;

use crate::error::StoreError;
use crate::persistence::{home_dir, write_text_atomic};

/// Codex's config directory and the two files getrouter edits.
#[derive(Debug, Clone)]
pub struct CodexHome {
    dir: PathBuf,
}

impl CodexHome {
    /// Codex home at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `~/.codex`.
    pub fn from_home() -> Result<Self, StoreError> {
        Ok(Self::new(home_dir()?.join(".codex")))
    }

    /// The directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `config.toml`.
    pub fn config_path(&self) -> PathBuf {
        self.dir.join("config.toml")
    }

    /// `auth.json`.
    pub fn auth_path(&self) -> PathBuf {
        self.dir.join("auth.json")
    }

    /// Whether `config.toml` exists.
    pub async fn config_exists(&self) -> Result<bool, StoreError> {
        Ok(tokio::fs::try_exists(self.config_path()).await?)
    }

    /// Whether `auth.json` exists.
    pub async fn auth_exists(&self) -> Result<bool, StoreError> {
        Ok(tokio::fs::try_exists(self.auth_path()).await?)
    }

    /// Contents of `config.toml`, empty when the file is missing.
    pub async fn read_config_toml(&self) -> Result<String, StoreError> {
        match tokio::fs::read_to_string(self.config_path()).await {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Parsed `auth.json`, empty when the file is missing or blank.
    pub async fn read_auth_json(&self) -> Result<AuthJson, StoreError> {
        let raw = match tokio::fs::read_to_string(self.auth_path()).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(AuthJson::new()),
            Err(e) => return Err(e.into()),
        };
        parse_auth_json(&raw)
    }

    /// Writes `config.toml`.
    pub async fn write_config_toml(&self, content: &str) -> Result<(), StoreError> {
        debug!(path = %self.config_path().display(), "Writing codex config");
        write_text_atomic(&self.config_path(), content, false).await
    }

    /// Writes `auth.json` (2-space indent, owner-only).
    pub async fn write_auth_json(&self, data: &AuthJson) -> Result<(), StoreError> {
        debug!(path = %self.auth_path().display(), "Writing codex auth");
        let json = serde_json::to_string_pretty(data)?;
        write_text_atomic(&self.auth_path(), &json, true).await
    }
}

/// Parses `auth.json` text. Blank text is an empty object; unparsable text
/// and anything other than an object are rejected.
pub fn parse_auth_json(raw: &str) -> Result<AuthJson, StoreError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(AuthJson::new());
    }
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Ok(map),
        _ => Err(StoreError::InvalidAuthJson),
    }
}
