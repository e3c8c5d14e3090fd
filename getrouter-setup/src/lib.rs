// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # getrouter Setup
//!
//! Pure configuration transforms for the third-party CLIs that getrouter
//! points at its proxy endpoints.
//!
//! Nothing in this crate touches the filesystem: every function takes the
//! current file contents and returns the new ones.
//!
//! ## Key Types
//!
//! ### Codex
//! - [`merge_codex_toml`] / [`remove_codex_config`] - install and uninstall
//!   passes over `~/.codex/config.toml`
//! - [`merge_auth_json`] / [`remove_auth_json`] - `OPENAI_API_KEY` in
//!   `~/.codex/auth.json`
//! - [`CodexBackup`] - what an install replaced
//! - [`RemovalPolicy`] - how an uninstall treats the root keys
//!
//! ### Shell
//! - [`render_env`] / [`render_hook`] - env files and the wrapper function

pub mod codex;
pub mod env;
pub mod toml_lines;

pub use codex::{
    merge_auth_json, merge_codex_toml, read_codex_toml_root_values, read_openai_key,
    remove_auth_json, remove_codex_config, AuthBackup, AuthJson, AuthRemoval, AuthRemovalOptions,
    CodexBackup, CodexConfigInput, ConfigBackup, ConfigRemoval, InstallRecord, RemovalPolicy,
    RootValues, BACKUP_VERSION, MODEL_KEY, OPENAI_API_KEY, PROVIDER_BASE_URL, PROVIDER_ID,
    PROVIDER_KEY, PROVIDER_SECTION, REASONING_KEY, ROOT_KEYS,
};
pub use env::{
    detect_shell, env_file_path, format_source_line, hook_file_path, render_env, render_hook,
    resolve_env_shell, shell_rc_path, EnvShell, EnvVars, RcShell,
};
pub use toml_lines::{Line, LineKind, TomlDocument};
