//! Env files, hook files and shell rc edits.

use std::path::Path;

use tracing::debug;

use crate::error::StoreError;
use crate::persistence::write_text_atomic;

/// Writes an env file. It carries API keys, so it is owner-only.
pub async fn write_env_file(path: &Path, content: &str) -> Result<(), StoreError> {
    write_text_atomic(path, content, true).await
}

/// Writes the shell hook file.
pub async fn write_hook_file(path: &Path, content: &str) -> Result<(), StoreError> {
    write_text_atomic(path, content, false).await
}

/// Appends `line` to the rc file unless it already contains it.
///
/// Returns true when the file was changed.
pub async fn append_rc_if_missing(rc_path: &Path, line: &str) -> Result<bool, StoreError> {
    let content = match tokio::fs::read_to_string(rc_path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(e.into()),
    };
    if content.contains(line) {
        debug!(path = %rc_path.display(), "Source line already present");
        return Ok(false);
    }

    let separator = if content.is_empty() || content.ends_with('\n') { "" } else { "\n" };
    if let Some(parent) = rc_path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(rc_path, format!("{content}{separator}{line}\n")).await?;
    debug!(path = %rc_path.display(), "Appended source line");
    Ok(true)
}
