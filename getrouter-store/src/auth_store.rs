//! Dashboard credentials (`<config dir>/auth.json`).

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use getrouter_core::{AuthState, AuthStatus};
use getrouter_fetch::{FetchError, TokenStore};
use tracing::{debug, instrument};

use crate::error::StoreError;
use crate::persistence::{read_json_file, save_json};

/// File-backed credential store.
#[derive(Debug, Clone)]
pub struct AuthStore {
    path: PathBuf,
}

impl AuthStore {
    /// Store for `<config_dir>/auth.json`.
    pub fn new(config_dir: &Path) -> Self {
        Self {
            path: config_dir.join("auth.json"),
        }
    }

    /// Path of the credentials file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored credentials merged over the logged-out defaults.
    pub async fn read_auth(&self) -> AuthState {
        read_json_file(&self.path).await.unwrap_or_default()
    }

    /// Saves credentials with owner-only permissions.
    #[instrument(skip(self, state))]
    pub async fn write_auth(&self, state: &AuthState) -> Result<(), StoreError> {
        save_json(&self.path, state).await?;
        debug!(path = %self.path.display(), "Credentials saved");
        Ok(())
    }

    /// Replaces the stored credentials with the logged-out defaults.
    pub async fn clear_auth(&self) -> Result<(), StoreError> {
        self.write_auth(&AuthState::default()).await
    }

    /// Login status as of `now`.
    pub async fn auth_status(&self, now: DateTime<Utc>) -> AuthStatus {
        self.read_auth().await.status(now)
    }
}

#[async_trait]
impl TokenStore for AuthStore {
    async fn load(&self) -> AuthState {
        self.read_auth().await
    }

    async fn save(&self, state: &AuthState) -> Result<(), FetchError> {
        Ok(self.write_auth(state).await?)
    }
}
