// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # getrouter Store
//!
//! Local files for the getrouter CLI.
//!
//! This crate provides:
//!
//! - **ConfigStore**: `config.json` (API base, output format)
//! - **AuthStore**: dashboard credentials; also the client's token store
//! - **BackupStore**: the Codex install backup
//! - **CodexHome**: `~/.codex/config.toml` and `~/.codex/auth.json`
//! - **Persistence**: atomic, permission-aware file I/O helpers
//!
//! Everything except Codex's files lives under `$GETROUTER_CONFIG_DIR`
//! (default `~/.getrouter`).
//!
//! ## Usage
//!
//! ```ignore
//! use getrouter_store::{default_config_dir, AuthStore};
//!
//! let auth = AuthStore::new(&default_config_dir());
//! let status = auth.auth_status(chrono::Utc::now()).await;
//! ```

pub mod auth_store;
pub mod backup_store;
pub mod codex_home;
pub mod config;
pub mod error;
pub mod persistence;
pub mod redact;
pub mod shell;

pub use auth_store::AuthStore;
pub use backup_store::{BackupStore, BACKUP_FILE};
pub use codex_home::{parse_auth_json, CodexHome};
pub use config::{AppConfig, ConfigStore};
pub use error::StoreError;
pub use persistence::{
    corrupt_backup_path, default_config_dir, home_dir, load_json, read_json_file,
    remove_file_if_exists, resolve_config_dir, save_json, write_text_atomic, CONFIG_DIR_ENV,
};
pub use redact::{mask_secret, redact_secrets, SECRET_KEYS};
pub use shell::{append_rc_if_missing, write_env_file, write_hook_file};

#[cfg(test)]
mod persistence_tests;
