//! Install and uninstall passes over config.toml.

use tracing::debug;

use super::legacy::strip_toml_markers;
use super::provider::{strip_provider_section, upsert_provider_section, PROVIDER_ID};
use super::root::{
    apply_root_keys, collect_root_values, RootValues, MODEL_KEY, PROVIDER_KEY, REASONING_KEY,
    ROOT_KEYS,
};
use crate::toml_lines::{render_lines, split_root, Line, TomlDocument};

/// Values chosen by the user for an install.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodexConfigInput {
    /// Model id, e.g. `gpt-5.2-codex`.
    pub model: String,
    /// Reasoning effort id, e.g. `medium` or `xhigh`.
    pub reasoning: String,
}

impl CodexConfigInput {
    /// Creates a new input.
    pub fn new(model: impl Into<String>, reasoning: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            reasoning: reasoning.into(),
        }
    }

    /// Root values an install writes, in their raw quoted form.
    pub fn installed_root_values(&self) -> RootValues {
        RootValues {
            model: Some(quote(&self.model)),
            reasoning: Some(quote(&self.reasoning)),
            provider: Some(quote(PROVIDER_ID)),
        }
    }
}

fn quote(value: &str) -> String {
    format!("\"{value}\"")
}

/// What an uninstall does with the root keys when the provider is ours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemovalPolicy {
    /// Delete `model`, `model_reasoning_effort` and `model_provider`.
    DeleteRootKeys,
    /// Set each root key to the recorded raw value, deleting absent ones.
    RestoreRootKeys(RootValues),
    /// Leave the root keys alone. Becomes [`RemovalPolicy::DeleteRootKeys`]
    /// when legacy markers are found.
    PreserveRootKeys,
}

/// Result of [`remove_codex_config`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigRemoval {
    /// New file content.
    pub content: String,
    /// Whether `content` differs from the input.
    pub changed: bool,
}

/// Reads the raw values of the three root keys.
pub fn read_codex_toml_root_values(content: &str) -> RootValues {
    collect_root_values(TomlDocument::parse(content).lines())
}

/// Points config.toml at getrouter.
///
/// Strips legacy markers, writes the root keys, then creates or updates the
/// provider table. Applying it twice gives the same text as applying it once.
pub fn merge_codex_toml(content: &str, input: &CodexConfigInput) -> String {
    let (lines, _) = strip_toml_markers(TomlDocument::parse(content).into_lines());

    let model = quote(&input.model);
    let reasoning = quote(&input.reasoning);
    let provider = quote(PROVIDER_ID);
    let lines = apply_root_keys(
        lines,
        &[
            (MODEL_KEY, Some(model.as_str())),
            (REASONING_KEY, Some(reasoning.as_str())),
            (PROVIDER_KEY, Some(provider.as_str())),
        ],
    );

    render_lines(&upsert_provider_section(lines))
}

/// Removes getrouter from config.toml.
///
/// The provider table is always removed. Root keys are only touched when
/// `model_provider` currently names getrouter; `policy` then decides whether
/// they are deleted, restored or kept.
pub fn remove_codex_config(content: &str, policy: &RemovalPolicy) -> ConfigRemoval {
    let doc = TomlDocument::parse(content);
    let owned = collect_root_values(doc.lines()).is_owned();

    let lines = doc.into_lines();
    let before = lines.len();
    let lines = strip_provider_section(lines);
    let section_removed = lines.len() != before;

    let (root, rest) = split_root(lines);
    let original_root = root.clone();
    let (mut root, legacy_found) = strip_toml_markers(root);

    let policy = match policy {
        RemovalPolicy::PreserveRootKeys if legacy_found => &RemovalPolicy::DeleteRootKeys,
        other => other,
    };

    if owned {
        let updates: Option<Vec<(&str, Option<&str>)>> = match policy {
            RemovalPolicy::DeleteRootKeys => {
                Some(ROOT_KEYS.iter().map(|key| (*key, None)).collect())
            }
            RemovalPolicy::RestoreRootKeys(values) => {
                Some(ROOT_KEYS.iter().map(|key| (*key, values.get(key))).collect())
            }
            RemovalPolicy::PreserveRootKeys => None,
        };
        if let Some(updates) = updates {
            let ended_blank = root.last().is_some_and(Line::is_blank);
            root = trim_trailing_blanks(apply_root_keys(trim_trailing_blanks(root), &updates));
            if ended_blank && rest.is_empty() && !root.is_empty() {
                root.push(Line::blank());
            }
        }
    }
    debug!(owned, legacy_found, section_removed, "computed codex config removal");

    // Nothing removed means nothing to re-join.
    let removed = section_removed || root != original_root;
    let mut lines = root;
    if removed && !rest.is_empty() && lines.last().is_some_and(|last| !last.is_blank()) {
        lines.push(Line::blank());
    }
    lines.extend(rest);

    let output = render_lines(&lines);
    ConfigRemoval {
        changed: output != content,
        content: output,
    }
}

/// Drops blank lines at the end of a root region.
fn trim_trailing_blanks(mut root: Vec<Line>) -> Vec<Line> {
    while root.last().is_some_and(Line::is_blank) {
        root.pop();
    }
    root
}
