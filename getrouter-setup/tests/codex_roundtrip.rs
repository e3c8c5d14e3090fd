//! Install/uninstall round trips over realistic Codex configs.

use getrouter_setup::{
    merge_auth_json, merge_codex_toml, read_codex_toml_root_values, read_openai_key,
    remove_auth_json, remove_codex_config, AuthJson, CodexBackup, CodexConfigInput,
    InstallRecord, RemovalPolicy,
};
use chrono::Utc;
use pretty_assertions::assert_eq;
use serde_json::json;

const USER_CONFIG: &str = r#"# personal settings
model = "o3"
model_provider = "openai"
approval_policy = "on-request"

[model_providers.openai]
name = "OpenAI"
base_url = "https://api.openai.com/v1"

[tui]
notifications = true
"#;

fn input() -> CodexConfigInput {
    CodexConfigInput::new("gpt-5.2-codex", "xhigh")
}

fn lines_without_tool_entries(content: &str) -> Vec<String> {
    let mut in_provider = false;
    content
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            if trimmed.starts_with('[') {
                in_provider = trimmed == "[model_providers.getrouter]";
            }
            !in_provider
                && !trimmed.starts_with("model =")
                && !trimmed.starts_with("model_reasoning_effort =")
                && !trimmed.starts_with("model_provider =")
                && !trimmed.is_empty()
        })
        .map(str::to_string)
        .collect()
}

#[test]
fn merge_scenario_keeps_foreign_content() {
    let content = "other = \"keep\"\nmodel = \"old-model\"\n\n[model_providers.other]\nname = \"x\"\n\n[model_providers.getrouter]\nname = \"old\"\nextra = \"keep\"\n";
    let output = merge_codex_toml(content, &input());

    for expected in [
        "model = \"gpt-5.2-codex\"",
        "model_reasoning_effort = \"xhigh\"",
        "model_provider = \"getrouter\"",
        "base_url = \"https://api.getrouter.dev/codex\"",
        "wire_api = \"responses\"",
        "requires_openai_auth = true",
        "other = \"keep\"",
        "extra = \"keep\"",
    ] {
        assert!(output.lines().any(|line| line == expected), "missing {expected}");
    }
    assert!(!output.contains("name = \"old\""));
    assert!(output.contains("[model_providers.other]\nname = \"x\""));
}

#[test]
fn merge_is_idempotent() {
    for content in ["", USER_CONFIG, "[tui]\nx = 1", "a = 1\r\nb = 2\r\n"] {
        let once = merge_codex_toml(content, &input());
        assert_eq!(merge_codex_toml(&once, &input()), once);
    }
}

#[test]
fn merge_leaves_other_lines_alone() {
    let merged = merge_codex_toml(USER_CONFIG, &input());
    let before: Vec<String> = lines_without_tool_entries(USER_CONFIG);
    assert_eq!(lines_without_tool_entries(&merged), before);
}

#[test]
fn restore_round_trip_reproduces_root_values() {
    let previous = read_codex_toml_root_values(USER_CONFIG);
    let merged = merge_codex_toml(USER_CONFIG, &input());
    let removal = remove_codex_config(&merged, &RemovalPolicy::RestoreRootKeys(previous.clone()));

    assert!(removal.changed);
    assert_eq!(read_codex_toml_root_values(&removal.content), previous);
    assert!(!removal.content.contains("model_reasoning_effort"));
    assert!(!removal.content.contains("[model_providers.getrouter]"));
    assert_eq!(
        lines_without_tool_entries(&removal.content),
        lines_without_tool_entries(USER_CONFIG)
    );
    assert_eq!(removal.content, USER_CONFIG);
}

#[test]
fn uninstall_without_backup_removes_everything() {
    let content = "model = \"gpt-5.2-codex\"\nmodel_reasoning_effort = \"xhigh\"\nmodel_provider = \"getrouter\"\n\n[model_providers.getrouter]\nname = \"getrouter\"\n\n[model_providers.openai]\nname = \"openai\"";
    let removal = remove_codex_config(content, &RemovalPolicy::DeleteRootKeys);

    assert!(removal.changed);
    assert_eq!(removal.content, "[model_providers.openai]\nname = \"openai\"");
}

#[test]
fn foreign_provider_keeps_root_keys() {
    let content = "model = \"o3\"\nmodel_provider = \"openai\"\n\n[model_providers.getrouter]\nname = \"getrouter\"\n";
    let removal = remove_codex_config(content, &RemovalPolicy::DeleteRootKeys);

    assert!(removal.changed);
    assert_eq!(removal.content, "model = \"o3\"\nmodel_provider = \"openai\"\n");
}

#[test]
fn full_lifecycle_with_backup() {
    let auth: AuthJson = json!({"OPENAI_API_KEY": "user-key", "tokens": {"id": 1}})
        .as_object()
        .cloned()
        .unwrap();
    let mut backup = CodexBackup::new(Utc::now());

    // First install.
    let observed_root = read_codex_toml_root_values(USER_CONFIG);
    let config = merge_codex_toml(USER_CONFIG, &input());
    let installed_root = read_codex_toml_root_values(&config);
    let auth_installed = merge_auth_json(&auth, "router-key");
    backup.record_install(
        InstallRecord {
            observed_root: &observed_root,
            installed_root: &installed_root,
            observed_key: read_openai_key(&auth),
            installed_key: "router-key",
        },
        Utc::now(),
    );

    // Reinstall with another model keeps the original backup.
    let second = CodexConfigInput::new("gpt-5.2", "medium");
    let observed_again = read_codex_toml_root_values(&config);
    let config = merge_codex_toml(&config, &second);
    let installed_again = read_codex_toml_root_values(&config);
    backup.record_install(
        InstallRecord {
            observed_root: &observed_again,
            installed_root: &installed_again,
            observed_key: read_openai_key(&auth_installed),
            installed_key: "router-key",
        },
        Utc::now(),
    );
    assert_eq!(backup.config.previous.as_ref(), Some(&observed_root));

    // Uninstall.
    let removal = remove_codex_config(&config, &backup.removal_policy());
    assert_eq!(read_codex_toml_root_values(&removal.content), observed_root);
    let auth_removed = remove_auth_json(&auth_installed, &backup.auth_removal_options());
    assert!(auth_removed.changed);
    assert_eq!(auth_removed.data, auth);
}
