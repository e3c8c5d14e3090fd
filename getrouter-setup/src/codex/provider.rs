//! The `[model_providers.getrouter]` table.

use crate::toml_lines::{find_section, section_end, Line};

/// Provider id written to `model_provider`.
pub const PROVIDER_ID: &str = "getrouter";
/// Name of the provider table.
pub const PROVIDER_SECTION: &str = "model_providers.getrouter";
/// Codex proxy endpoint.
pub const PROVIDER_BASE_URL: &str = "https://api.getrouter.dev/codex";

/// Keys of the provider table in declared order, with their rendered values.
fn provider_entries() -> [(&'static str, String); 4] {
    [
        ("name", format!("\"{PROVIDER_ID}\"")),
        ("base_url", format!("\"{PROVIDER_BASE_URL}\"")),
        ("wire_api", "\"responses\"".to_string()),
        ("requires_openai_auth", "true".to_string()),
    ]
}

/// Creates the provider table or brings its four keys up to date.
///
/// An existing table keeps its position and any extra keys; missing keys are
/// appended at the end of its extent.
pub(crate) fn upsert_provider_section(lines: Vec<Line>) -> Vec<Line> {
    let entries = provider_entries();

    let Some(header) = find_section(&lines, PROVIDER_SECTION) else {
        let mut out = lines;
        if out.last().is_some_and(|last| !last.is_blank()) {
            out.push(Line::blank());
        }
        out.push(Line::header(PROVIDER_SECTION));
        out.extend(entries.iter().map(|(key, value)| Line::assignment(key, value)));
        return out;
    };

    let end = section_end(&lines, header);
    let body = header + 1..end;
    let mut missing: Vec<Line> = entries
        .iter()
        .filter(|(key, _)| !lines[body.clone()].iter().any(|line| line.key() == Some(*key)))
        .map(|(key, value)| Line::assignment(key, value))
        .collect();

    let mut out: Vec<Line> = Vec::with_capacity(lines.len() + missing.len());
    for (idx, line) in lines.into_iter().enumerate() {
        if idx == end {
            out.append(&mut missing);
        }
        let entry = line
            .key()
            .filter(|_| body.contains(&idx))
            .and_then(|key| entries.iter().find(|(name, _)| *name == key));
        match entry {
            Some((key, value)) => out.push(Line::assignment(key, value)),
            None => out.push(line),
        }
    }
    out.append(&mut missing);
    out
}

/// Removes the provider table header and its whole extent.
pub(crate) fn strip_provider_section(mut lines: Vec<Line>) -> Vec<Line> {
    if let Some(header) = find_section(&lines, PROVIDER_SECTION) {
        let end = section_end(&lines, header);
        lines.drain(header..end);
    }
    lines
}
