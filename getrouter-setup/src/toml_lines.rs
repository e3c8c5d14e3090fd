//! Line-oriented model of the TOML subset found in `~/.codex/config.toml`.
//!
//! Only section headers and `key = value` assignments are understood. Every
//! other line (comments, arrays, inline tables, `[[tables]]`, multi-line
//! strings) is classified as opaque and carried through verbatim.
//!
//! Sections are not nested: a section is identified by the text between its
//! brackets, and its extent runs until the next header.

use regex::Regex;
use std::sync::LazyLock;

// ============================================================================
// Classification
// ============================================================================

/// `[name]` with optional surrounding whitespace and nothing else.
static HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\[([^\]]+)\]\s*$").expect("Invalid regex"));

/// `key =` at the start of a line; anything after `=` is the raw value.
static KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([A-Za-z0-9_.-]+)\s*=").expect("Invalid regex"));

/// What a single line of the document is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// A `[section.name]` header, holding the trimmed name.
    Header(String),
    /// A `key = value` assignment, holding the key.
    KeyValue(String),
    /// Anything else.
    Opaque,
}

/// Classifies a raw line of text.
pub fn classify(text: &str) -> LineKind {
    if let Some(caps) = HEADER_RE.captures(text) {
        return LineKind::Header(caps[1].trim().to_string());
    }
    if let Some(caps) = KEY_RE.captures(text) {
        return LineKind::KeyValue(caps[1].to_string());
    }
    LineKind::Opaque
}

// ============================================================================
// Line
// ============================================================================

/// A line of text together with its classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    text: String,
    kind: LineKind,
}

impl Line {
    /// Classifies `text` and wraps it.
    pub fn parse(text: impl Into<String>) -> Self {
        let text = text.into();
        let kind = classify(&text);
        Self { text, kind }
    }

    /// Builds a `key = value` line. `value` is written as-is.
    pub fn assignment(key: &str, value: &str) -> Self {
        Self {
            text: format!("{key} = {value}"),
            kind: LineKind::KeyValue(key.to_string()),
        }
    }

    /// Builds a `[name]` header line.
    pub fn header(name: &str) -> Self {
        Self {
            text: format!("[{name}]"),
            kind: LineKind::Header(name.to_string()),
        }
    }

    /// An empty line.
    pub fn blank() -> Self {
        Self {
            text: String::new(),
            kind: LineKind::Opaque,
        }
    }

    /// The original text of the line.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The classification of the line.
    pub fn kind(&self) -> &LineKind {
        &self.kind
    }

    /// The key, if this is an assignment.
    pub fn key(&self) -> Option<&str> {
        match &self.kind {
            LineKind::KeyValue(key) => Some(key),
            _ => None,
        }
    }

    /// The section name, if this is a header.
    pub fn section(&self) -> Option<&str> {
        match &self.kind {
            LineKind::Header(name) => Some(name),
            _ => None,
        }
    }

    /// Returns true for section headers.
    pub fn is_header(&self) -> bool {
        matches!(self.kind, LineKind::Header(_))
    }

    /// Returns true for lines holding only whitespace.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Trimmed raw right-hand side of an assignment.
    pub fn raw_value(&self) -> Option<&str> {
        self.key()?;
        self.text.split_once('=').map(|(_, rhs)| rhs.trim())
    }
}

// ============================================================================
// Document
// ============================================================================

/// A TOML file as an ordered sequence of classified lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TomlDocument {
    lines: Vec<Line>,
}

impl TomlDocument {
    /// Splits `content` on `\r?\n`. An empty string yields no lines.
    pub fn parse(content: &str) -> Self {
        if content.is_empty() {
            return Self::default();
        }
        let lines = content
            .split('\n')
            .map(|raw| Line::parse(raw.strip_suffix('\r').unwrap_or(raw)))
            .collect();
        Self { lines }
    }

    /// Wraps already classified lines.
    pub fn from_lines(lines: Vec<Line>) -> Self {
        Self { lines }
    }

    /// The lines of the document.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Consumes the document, returning its lines.
    pub fn into_lines(self) -> Vec<Line> {
        self.lines
    }

    /// Lines before the first section header.
    pub fn root(&self) -> &[Line] {
        &self.lines[..root_len(&self.lines)]
    }

    /// Raw value of `key` in the root region (first occurrence).
    pub fn root_value(&self, key: &str) -> Option<&str> {
        self.root()
            .iter()
            .find(|line| line.key() == Some(key))
            .and_then(Line::raw_value)
    }

    /// Joins the lines back together with `\n`.
    pub fn render(&self) -> String {
        render_lines(&self.lines)
    }
}

/// Number of lines before the first header (the root region).
pub fn root_len(lines: &[Line]) -> usize {
    lines.iter().position(Line::is_header).unwrap_or(lines.len())
}

/// Index of the header of section `name`.
///
/// The trimmed line must read exactly `[name]`; `[ name ]` is a different
/// header here.
pub fn find_section(lines: &[Line], name: &str) -> Option<usize> {
    lines.iter().position(|line| {
        line.section() == Some(name)
            && line
                .text()
                .trim()
                .strip_prefix('[')
                .and_then(|rest| rest.strip_suffix(']'))
                == Some(name)
    })
}

/// End (exclusive) of the section whose header sits at `header`.
pub fn section_end(lines: &[Line], header: usize) -> usize {
    lines
        .iter()
        .enumerate()
        .skip(header + 1)
        .find(|(_, line)| line.is_header())
        .map_or(lines.len(), |(idx, _)| idx)
}

/// Splits lines into the root region and everything from the first header on.
pub fn split_root(mut lines: Vec<Line>) -> (Vec<Line>, Vec<Line>) {
    let rest = lines.split_off(root_len(&lines));
    (lines, rest)
}

/// Joins lines with `\n`.
pub fn render_lines(lines: &[Line]) -> String {
    lines
        .iter()
        .map(Line::text)
        .collect::<Vec<_>>()
        .join("\n")
}

// ============================================================================
// Tests
// ============================================================================
