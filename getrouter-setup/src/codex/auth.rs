//! `OPENAI_API_KEY` handling in `~/.codex/auth.json`.

use serde_json::{Map, Value};

use super::legacy::strip_auth_markers;

/// The only field of auth.json that is ever written.
pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";

/// Parsed auth.json object.
pub type AuthJson = Map<String, Value>;

/// What an uninstall may do with `OPENAI_API_KEY`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthRemovalOptions {
    /// Key most recently written by an install.
    pub installed: Option<String>,
    /// Key to put back in its place.
    pub restore: Option<String>,
}

/// Result of [`remove_auth_json`].
#[derive(Debug, Clone, PartialEq)]
pub struct AuthRemoval {
    /// New object.
    pub data: AuthJson,
    /// Whether anything was removed or replaced.
    pub changed: bool,
}

/// Current `OPENAI_API_KEY`, when it is a string.
pub fn read_openai_key(data: &AuthJson) -> Option<&str> {
    data.get(OPENAI_API_KEY).and_then(Value::as_str)
}

/// Returns a copy of `data` with `OPENAI_API_KEY` set to `api_key`.
pub fn merge_auth_json(data: &AuthJson, api_key: &str) -> AuthJson {
    let mut next = data.clone();
    strip_auth_markers(&mut next);
    next.insert(OPENAI_API_KEY.to_string(), Value::String(api_key.to_string()));
    next
}

/// Takes back `OPENAI_API_KEY` if it is still the key we installed.
///
/// A key that differs from `options.installed` belongs to the user and is
/// left untouched.
pub fn remove_auth_json(data: &AuthJson, options: &AuthRemovalOptions) -> AuthRemoval {
    let mut next = data.clone();
    let mut changed = strip_auth_markers(&mut next);

    let ours = options
        .installed
        .as_deref()
        .is_some_and(|installed| read_openai_key(&next) == Some(installed));
    if ours {
        match options.restore.as_deref().filter(|key| !key.is_empty()) {
            Some(restore) => {
                next.insert(OPENAI_API_KEY.to_string(), Value::String(restore.to_string()));
            }
            None => {
                next.remove(OPENAI_API_KEY);
            }
        }
        changed = true;
    }

    AuthRemoval { data: next, changed }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> AuthJson {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_merge_keeps_other_fields() {
        let out = merge_auth_json(&object(json!({"existing": "keep"})), "key-123");
        assert_eq!(Value::Object(out), json!({"existing": "keep", "OPENAI_API_KEY": "key-123"}));
    }

    #[test]
    fn test_merge_is_idempotent() {
        let once = merge_auth_json(&AuthJson::new(), "k");
        assert_eq!(merge_auth_json(&once, "k"), once);
    }

    #[test]
    fn test_merge_strips_legacy_markers() {
        let out = merge_auth_json(
            &object(json!({"_getrouter_codex_backup_openai_api_key": "old"})),
            "k",
        );
        assert_eq!(Value::Object(out), json!({"OPENAI_API_KEY": "k"}));
    }

    #[test]
    fn test_remove_restores_previous_key() {
        let removal = remove_auth_json(
            &object(json!({"OPENAI_API_KEY": "new-key", "OTHER": "keep"})),
            &AuthRemovalOptions {
                installed: Some("new-key".to_string()),
                restore: Some("old-key".to_string()),
            },
        );
        assert!(removal.changed);
        assert_eq!(
            Value::Object(removal.data),
            json!({"OPENAI_API_KEY": "old-key", "OTHER": "keep"})
        );
    }

    #[test]
    fn test_remove_deletes_without_restore() {
        let removal = remove_auth_json(
            &object(json!({"OPENAI_API_KEY": "new-key", "OTHER": "keep"})),
            &AuthRemovalOptions {
                installed: Some("new-key".to_string()),
                restore: Some(String::new()),
            },
        );
        assert!(removal.changed);
        assert_eq!(Value::Object(removal.data), json!({"OTHER": "keep"}));
    }

    #[test]
    fn test_remove_leaves_user_key() {
        let data = object(json!({"OPENAI_API_KEY": "user-key", "OTHER": "keep"}));
        let removal = remove_auth_json(&data, &AuthRemovalOptions::default());
        assert!(!removal.changed);
        assert_eq!(removal.data, data);
    }

    #[test]
    fn test_remove_leaves_replaced_key() {
        let data = object(json!({"OPENAI_API_KEY": "rotated"}));
        let removal = remove_auth_json(
            &data,
            &AuthRemovalOptions {
                installed: Some("new-key".to_string()),
                restore: None,
            },
        );
        assert!(!removal.changed);
        assert_eq!(removal.data, data);
    }

    #[test]
    fn test_remove_strips_legacy_markers() {
        let data = object(json!({
            "_getrouter_codex_installed_openai_api_key": "x",
            "OPENAI_API_KEY": "user"
        }));
        let removal = remove_auth_json(&data, &AuthRemovalOptions::default());
        assert!(removal.changed);
        assert_eq!(Value::Object(removal.data), json!({"OPENAI_API_KEY": "user"}));
    }
}
