//! Codex configuration engine.
//!
//! Structural, reversible edits of `~/.codex/config.toml` and
//! `~/.codex/auth.json`. All functions here are pure: callers read the files,
//! hand over their contents, and write back whatever is returned.

mod auth;
mod backup;
mod config;
mod legacy;
mod provider;
mod root;

pub use auth::{
    merge_auth_json, read_openai_key, remove_auth_json, AuthJson, AuthRemoval,
    AuthRemovalOptions, OPENAI_API_KEY,
};
pub use backup::{AuthBackup, CodexBackup, ConfigBackup, InstallRecord, BACKUP_VERSION};
pub use config::{
    merge_codex_toml, read_codex_toml_root_values, remove_codex_config, CodexConfigInput,
    ConfigRemoval, RemovalPolicy,
};
pub use provider::{PROVIDER_BASE_URL, PROVIDER_ID, PROVIDER_SECTION};
pub use root::{RootValues, MODEL_KEY, PROVIDER_KEY, REASONING_KEY, ROOT_KEYS};
