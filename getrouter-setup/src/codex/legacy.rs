//! Marker keys left behind by older releases, which kept their backups
//! inline in the Codex files. They are stripped on every pass.

use crate::toml_lines::{root_len, Line};

/// Root keys once used to stash the user's previous values in config.toml.
pub(crate) const LEGACY_TOML_MARKERS: [&str; 3] = [
    "_getrouter_codex_backup_model",
    "_getrouter_codex_backup_model_reasoning_effort",
    "_getrouter_codex_backup_model_provider",
];

/// Keys once used to stash API keys in auth.json.
pub(crate) const LEGACY_AUTH_MARKERS: [&str; 2] = [
    "_getrouter_codex_backup_openai_api_key",
    "_getrouter_codex_installed_openai_api_key",
];

/// Drops legacy marker assignments from the root region.
///
/// Returns the remaining lines and whether anything was dropped.
pub(crate) fn strip_toml_markers(lines: Vec<Line>) -> (Vec<Line>, bool) {
    let root = root_len(&lines);
    let before = lines.len();
    let kept: Vec<Line> = lines
        .into_iter()
        .enumerate()
        .filter(|(idx, line)| {
            *idx >= root || !line.key().is_some_and(|key| LEGACY_TOML_MARKERS.contains(&key))
        })
        .map(|(_, line)| line)
        .collect();
    let found = kept.len() != before;
    (kept, found)
}

/// Removes legacy marker keys from an auth.json object.
pub(crate) fn strip_auth_markers(data: &mut serde_json::Map<String, serde_json::Value>) -> bool {
    let mut found = false;
    for key in LEGACY_AUTH_MARKERS {
        found |= data.remove(key).is_some();
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toml_lines::{render_lines, TomlDocument};

    #[test]
    fn test_strip_toml_markers_only_in_root() {
        let doc = TomlDocument::parse(
            "_getrouter_codex_backup_model = \"x\"\nmodel = \"m\"\n[s]\n_getrouter_codex_backup_model = \"y\"",
        );
        let (lines, found) = strip_toml_markers(doc.into_lines());
        assert!(found);
        assert_eq!(
            render_lines(&lines),
            "model = \"m\"\n[s]\n_getrouter_codex_backup_model = \"y\""
        );
    }

    #[test]
    fn test_strip_toml_markers_none_found() {
        let doc = TomlDocument::parse("model = \"m\"");
        let (lines, found) = strip_toml_markers(doc.into_lines());
        assert!(!found);
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn test_strip_auth_markers() {
        let mut data = serde_json::json!({
            "OPENAI_API_KEY": "k",
            "_getrouter_codex_installed_openai_api_key": "k",
        })
        .as_object()
        .cloned()
        .unwrap();
        assert!(strip_auth_markers(&mut data));
        assert_eq!(data.len(), 1);
        assert!(!strip_auth_markers(&mut data));
    }
}
