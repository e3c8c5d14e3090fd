//! Top-level keys of config.toml that select the active model and provider.

use serde::{Deserialize, Serialize};

use super::provider::PROVIDER_ID;
use crate::toml_lines::{root_len, Line};

/// Root key selecting the model.
pub const MODEL_KEY: &str = "model";
/// Root key selecting the reasoning effort.
pub const REASONING_KEY: &str = "model_reasoning_effort";
/// Root key selecting the provider section.
pub const PROVIDER_KEY: &str = "model_provider";
/// Root keys in the order they are inserted.
pub const ROOT_KEYS: [&str; 3] = [MODEL_KEY, REASONING_KEY, PROVIDER_KEY];

/// Raw right-hand sides of the three root keys, as written in the file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RootValues {
    /// Raw `model` value, e.g. `"gpt-5.2"` including quotes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Raw `model_reasoning_effort` value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
    /// Raw `model_provider` value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
}

impl RootValues {
    /// Returns true when no key is present.
    pub fn is_empty(&self) -> bool {
        self.model.is_none() && self.reasoning.is_none() && self.provider.is_none()
    }

    /// Returns true when the provider points at getrouter.
    pub fn is_owned(&self) -> bool {
        self.provider.as_deref().is_some_and(is_owned_provider)
    }

    /// Value for one of [`ROOT_KEYS`].
    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            MODEL_KEY => self.model.as_deref(),
            REASONING_KEY => self.reasoning.as_deref(),
            PROVIDER_KEY => self.provider.as_deref(),
            _ => None,
        }
    }

    pub(crate) fn set(&mut self, key: &str, value: &str) {
        let slot = match key {
            MODEL_KEY => &mut self.model,
            REASONING_KEY => &mut self.reasoning,
            PROVIDER_KEY => &mut self.provider,
            _ => return,
        };
        if slot.is_none() {
            *slot = Some(value.to_string());
        }
    }
}

/// Returns true when a raw `model_provider` value names getrouter.
///
/// Accepts bare, single-quoted and double-quoted values with an optional
/// trailing comment; comparison ignores case and surrounding whitespace.
pub(crate) fn is_owned_provider(raw: &str) -> bool {
    unquote_scalar(raw).is_some_and(|value| value.trim().eq_ignore_ascii_case(PROVIDER_ID))
}

fn unquote_scalar(raw: &str) -> Option<&str> {
    let raw = raw.trim();
    let (body, rest) = match raw.chars().next()? {
        quote @ ('"' | '\'') => {
            let inner = &raw[1..];
            let end = inner.find(quote)?;
            (&inner[..end], &inner[end + 1..])
        }
        _ => {
            let end = raw.find('#').unwrap_or(raw.len());
            (&raw[..end], "")
        }
    };
    let rest = rest.trim_start();
    if body.is_empty()
        || body.contains(['"', '\''])
        || !(rest.is_empty() || rest.starts_with('#'))
    {
        return None;
    }
    Some(body)
}

/// Sets or deletes root keys.
///
/// For each `(key, value)` pair: `Some` rewrites every root occurrence in
/// place, `None` deletes every root occurrence. Keys not listed are left
/// alone. Absent keys with a value are inserted immediately before the first
/// header (or at the end of the document) and are followed by a blank line
/// when the next line is not blank.
pub(crate) fn apply_root_keys(lines: Vec<Line>, updates: &[(&str, Option<&str>)]) -> Vec<Line> {
    let root = root_len(&lines);

    let mut insert: Vec<Line> = updates
        .iter()
        .filter(|&&(key, _)| !lines[..root].iter().any(|line| line.key() == Some(key)))
        .filter_map(|&(key, value)| value.map(|value| Line::assignment(key, value)))
        .collect();
    if !insert.is_empty() && lines.get(root).is_some_and(|next| !next.is_blank()) {
        insert.push(Line::blank());
    }

    let mut out: Vec<Line> = Vec::with_capacity(lines.len() + insert.len());
    for (idx, line) in lines.into_iter().enumerate() {
        if idx == root {
            out.append(&mut insert);
        }
        let update = line
            .key()
            .filter(|_| idx < root)
            .and_then(|key| updates.iter().find(|(name, _)| *name == key));
        match update {
            Some(&(key, Some(value))) => out.push(Line::assignment(key, value)),
            Some(&(_, None)) => {}
            None => out.push(line),
        }
    }
    out.append(&mut insert);
    out
}

/// Reads the raw values of the three root keys (first occurrence wins).
pub(crate) fn collect_root_values(lines: &[Line]) -> RootValues {
    let mut values = RootValues::default();
    for line in &lines[..root_len(lines)] {
        if let (Some(key), Some(value)) = (line.key(), line.raw_value()) {
            values.set(key, value);
        }
    }
    values
}
