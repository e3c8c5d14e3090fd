//! Persistence round-trip and edge case tests.
//!
//! Tests file I/O, corrupt-file handling and the individual stores.

use chrono::{Duration, TimeZone, Utc};
use getrouter_core::{AuthState, AuthStatus};
use getrouter_fetch::TokenStore;
use getrouter_setup::{CodexBackup, AuthJson};
use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::TempDir;

use crate::persistence::{load_json, read_json_file, save_json, write_text_atomic};
use crate::{
    append_rc_if_missing, write_env_file, AppConfig, AuthStore, BackupStore, CodexHome,
    ConfigStore,
};

async fn entries(dir: &std::path::Path) -> Vec<String> {
    let mut names = Vec::new();
    let mut read_dir = tokio::fs::read_dir(dir).await.unwrap();
    while let Some(entry) = read_dir.next_entry().await.unwrap() {
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    names.sort();
    names
}

// ============================================================================
// JSON Persistence Tests
// ============================================================================

#[tokio::test]
async fn test_save_and_load_json_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("test.json");

    let data = json!({"apiBase": "https://example.test", "json": true});
    save_json(&file_path, &data).await.unwrap();

    let loaded: serde_json::Value = load_json(&file_path).await.unwrap();
    assert_eq!(loaded, data);
    assert_eq!(entries(temp_dir.path()).await, vec!["test.json"]);
}

#[tokio::test]
async fn test_save_creates_parent_directories() {
    let temp_dir = TempDir::new().unwrap();
    let nested_path = temp_dir.path().join("deeply").join("nested").join("test.json");

    save_json(&nested_path, &json!({"key": "value"})).await.unwrap();
    assert!(nested_path.exists());
}

#[cfg(unix)]
#[tokio::test]
async fn test_secure_write_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path().join("cfg");
    let file = dir.join("auth.json");
    save_json(&file, &json!({})).await.unwrap();

    let file_mode = tokio::fs::metadata(&file).await.unwrap().permissions().mode() & 0o777;
    let dir_mode = tokio::fs::metadata(&dir).await.unwrap().permissions().mode() & 0o777;
    assert_eq!(file_mode, 0o600);
    assert_eq!(dir_mode, 0o700);
}

#[tokio::test]
async fn test_read_json_file_missing_is_none() {
    let temp_dir = TempDir::new().unwrap();
    let value: Option<serde_json::Value> = read_json_file(&temp_dir.path().join("nope.json")).await;
    assert!(value.is_none());
}

#[tokio::test]
async fn test_read_json_file_quarantines_invalid_json() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("config.json");
    tokio::fs::write(&file_path, "{not json").await.unwrap();

    let value: Option<serde_json::Value> = read_json_file(&file_path).await;
    assert!(value.is_none());
    assert!(!file_path.exists());

    let names = entries(temp_dir.path()).await;
    assert_eq!(names.len(), 1);
    assert!(names[0].starts_with("config.corrupt-"));
    assert!(names[0].ends_with(".json"));
}

#[tokio::test]
async fn test_write_text_atomic_replaces_content() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("config.toml");
    write_text_atomic(&file_path, "a = 1\n", false).await.unwrap();
    write_text_atomic(&file_path, "b = 2\n", false).await.unwrap();

    assert_eq!(tokio::fs::read_to_string(&file_path).await.unwrap(), "b = 2\n");
    assert_eq!(entries(temp_dir.path()).await, vec!["config.toml"]);
}

#[cfg(unix)]
#[tokio::test]
async fn test_write_text_atomic_follows_symlink() {
    let temp_dir = TempDir::new().unwrap();
    let dotfiles = temp_dir.path().join("dotfiles");
    tokio::fs::create_dir_all(&dotfiles).await.unwrap();
    let real = dotfiles.join("config.toml");
    tokio::fs::write(&real, "a = 1\n").await.unwrap();
    let link = temp_dir.path().join("config.toml");
    tokio::fs::symlink(&real, &link).await.unwrap();

    write_text_atomic(&link, "b = 2\n", false).await.unwrap();

    let meta = tokio::fs::symlink_metadata(&link).await.unwrap();
    assert!(meta.file_type().is_symlink());
    assert_eq!(tokio::fs::read_to_string(&real).await.unwrap(), "b = 2\n");
    assert_eq!(entries(&dotfiles).await, vec!["config.toml"]);
}

#[cfg(unix)]
#[tokio::test]
async fn test_write_text_atomic_keeps_existing_mode() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("config.toml");
    tokio::fs::write(&file_path, "a = 1\n").await.unwrap();
    tokio::fs::set_permissions(&file_path, std::fs::Permissions::from_mode(0o640))
        .await
        .unwrap();

    write_text_atomic(&file_path, "b = 2\n", false).await.unwrap();

    let mode = tokio::fs::metadata(&file_path).await.unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o640);
}

#[tokio::test]
async fn test_write_text_atomic_failure_leaves_no_temp_file() {
    let temp_dir = TempDir::new().unwrap();
    let occupied = temp_dir.path().join("config.toml");
    tokio::fs::create_dir_all(occupied.join("inner")).await.unwrap();

    assert!(write_text_atomic(&occupied, "a = 1\n", false).await.is_err());
    assert_eq!(entries(temp_dir.path()).await, vec!["config.toml"]);
}

// ============================================================================
// Store Tests
// ============================================================================

#[tokio::test]
async fn test_config_merged_over_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let store = ConfigStore::new(temp_dir.path());
    assert_eq!(store.read_config().await, AppConfig::default());

    tokio::fs::write(store.path(), r#"{"json": true}"#).await.unwrap();
    let config = store.read_config().await;
    assert!(config.json);
    assert_eq!(config.api_base, "https://getrouter.dev");

    let custom = AppConfig {
        api_base: "http://localhost:8080".to_string(),
        json: false,
    };
    store.write_config(&custom).await.unwrap();
    assert_eq!(store.read_config().await, custom);
}

#[tokio::test]
async fn test_auth_store_status_and_clear() {
    let temp_dir = TempDir::new().unwrap();
    let store = AuthStore::new(temp_dir.path());
    let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    assert_eq!(store.auth_status(now).await, AuthStatus::LoggedOut);

    let state = AuthState {
        access_token: "access".to_string(),
        refresh_token: "refresh".to_string(),
        expires_at: (now + Duration::hours(1)).to_rfc3339(),
        ..AuthState::default()
    };
    store.save(&state).await.unwrap();
    assert!(store.auth_status(now).await.is_logged_in());
    assert_eq!(store.load().await, state);

    store.clear_auth().await.unwrap();
    let cleared = store.read_auth().await;
    assert_eq!(cleared, AuthState::default());
    assert_eq!(cleared.token_type, "Bearer");
}

#[tokio::test]
async fn test_backup_store_lifecycle() {
    let temp_dir = TempDir::new().unwrap();
    let store = BackupStore::new(temp_dir.path());
    assert!(store.load().await.is_none());

    let backup = CodexBackup::new(Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap());
    store.save(&backup).await.unwrap();
    assert_eq!(store.load().await, Some(backup));

    assert!(store.delete().await.unwrap());
    assert!(!store.delete().await.unwrap());
}

#[tokio::test]
async fn test_backup_store_ignores_other_versions() {
    let temp_dir = TempDir::new().unwrap();
    let store = BackupStore::new(temp_dir.path());
    tokio::fs::write(store.path(), r#"{"version": 2, "anything": true}"#)
        .await
        .unwrap();
    assert!(store.load().await.is_none());
    assert!(store.path().exists());
}

#[tokio::test]
async fn test_codex_home_files() {
    let temp_dir = TempDir::new().unwrap();
    let home = CodexHome::new(temp_dir.path().join(".codex"));

    assert!(!home.config_exists().await.unwrap());
    assert_eq!(home.read_config_toml().await.unwrap(), "");
    assert!(home.read_auth_json().await.unwrap().is_empty());

    home.write_config_toml("model = \"gpt-5.2\"\n").await.unwrap();
    assert_eq!(home.read_config_toml().await.unwrap(), "model = \"gpt-5.2\"\n");

    let mut auth = AuthJson::new();
    auth.insert("OPENAI_API_KEY".to_string(), json!("sk-test"));
    home.write_auth_json(&auth).await.unwrap();
    let raw = tokio::fs::read_to_string(home.auth_path()).await.unwrap();
    assert_eq!(raw, "{\n  \"OPENAI_API_KEY\": \"sk-test\"\n}");
    assert_eq!(home.read_auth_json().await.unwrap(), auth);
}

// ============================================================================
// Shell File Tests
// ============================================================================

#[tokio::test]
async fn test_append_rc_if_missing() {
    let temp_dir = TempDir::new().unwrap();
    let rc = temp_dir.path().join(".bashrc");
    tokio::fs::write(&rc, "alias ll='ls -l'").await.unwrap();

    assert!(append_rc_if_missing(&rc, "source /x/hook.sh").await.unwrap());
    assert!(!append_rc_if_missing(&rc, "source /x/hook.sh").await.unwrap());
    assert_eq!(
        tokio::fs::read_to_string(&rc).await.unwrap(),
        "alias ll='ls -l'\nsource /x/hook.sh\n"
    );

    let fish = temp_dir.path().join(".config").join("fish").join("config.fish");
    assert!(append_rc_if_missing(&fish, "source /x/hook.fish").await.unwrap());
    assert_eq!(tokio::fs::read_to_string(&fish).await.unwrap(), "source /x/hook.fish\n");
}

#[cfg(unix)]
#[tokio::test]
async fn test_env_file_is_private() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("env.sh");
    write_env_file(&path, "export ANTHROPIC_API_KEY='k'\n").await.unwrap();
    let mode = tokio::fs::metadata(&path).await.unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o600);
}
