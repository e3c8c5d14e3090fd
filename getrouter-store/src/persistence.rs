//! File persistence helpers.
//!
//! Handles loading and saving files to disk with proper security: writes go
//! through a temp file and a rename, secret files end up `0600` and created
//! directories `0700` on Unix. Unparsable JSON is moved aside instead of
//! being overwritten.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use rand::Rng;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::error::StoreError;

/// Overrides the config directory.
pub const CONFIG_DIR_ENV: &str = "GETROUTER_CONFIG_DIR";

// ============================================================================
// Default Paths
// ============================================================================

/// Config directory from an optional override, else `~/.getrouter`.
pub fn resolve_config_dir(override_dir: Option<OsString>) -> PathBuf {
    match override_dir.filter(|dir| !dir.is_empty()) {
        Some(dir) => PathBuf::from(dir),
        None => dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".getrouter"),
    }
}

/// Returns the config directory (`$GETROUTER_CONFIG_DIR` or `~/.getrouter`).
pub fn default_config_dir() -> PathBuf {
    resolve_config_dir(std::env::var_os(CONFIG_DIR_ENV))
}

/// Returns the user's home directory.
pub fn home_dir() -> Result<PathBuf, StoreError> {
    dirs::home_dir().ok_or(StoreError::HomeDirNotFound)
}

// ============================================================================
// Security: File Permissions
// ============================================================================

/// Sets restrictive file permissions (0o600) on Unix systems.
#[cfg(unix)]
async fn set_restrictive_permissions(path: &Path) -> Result<(), StoreError> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = tokio::fs::metadata(path).await?.permissions();
    perms.set_mode(0o600);
    tokio::fs::set_permissions(path, perms).await?;

    debug!(path = %path.display(), mode = "0600", "Set restrictive permissions");
    Ok(())
}

/// Sets restrictive directory permissions (0o700) on Unix systems.
#[cfg(unix)]
async fn set_restrictive_dir_permissions(path: &Path) -> Result<(), StoreError> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = tokio::fs::metadata(path).await?.permissions();
    perms.set_mode(0o700);
    tokio::fs::set_permissions(path, perms).await?;

    debug!(path = %path.display(), mode = "0700", "Set restrictive directory permissions");
    Ok(())
}

/// No-op for non-Unix systems.
#[cfg(not(unix))]
async fn set_restrictive_permissions(_path: &Path) -> Result<(), StoreError> {
    Ok(())
}

/// No-op for non-Unix systems.
#[cfg(not(unix))]
async fn set_restrictive_dir_permissions(_path: &Path) -> Result<(), StoreError> {
    Ok(())
}

// ============================================================================
// File Operations
// ============================================================================

/// Creates the parent directory of `path` if needed.
///
/// With `secure`, a newly created parent gets 0o700. Existing directories
/// are left alone.
async fn create_parent_dirs(path: &Path, secure: bool) -> Result<(), StoreError> {
    let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) else {
        return Ok(());
    };
    if tokio::fs::try_exists(parent).await? {
        return Ok(());
    }
    debug!(path = %parent.display(), "Creating directory");
    tokio::fs::create_dir_all(parent).await?;
    if secure {
        set_restrictive_dir_permissions(parent).await?;
    }
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Follows a symlink at `path`, so the rename replaces its target and the
/// link stays in place. Dangling links resolve relative to their directory.
async fn resolve_write_target(path: &Path) -> Result<PathBuf, StoreError> {
    match tokio::fs::symlink_metadata(path).await {
        Ok(meta) if meta.file_type().is_symlink() => match tokio::fs::canonicalize(path).await {
            Ok(target) => Ok(target),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let link = tokio::fs::read_link(path).await?;
                Ok(path.parent().map_or_else(|| link.clone(), |dir| dir.join(&link)))
            }
            Err(e) => Err(e.into()),
        },
        _ => Ok(path.to_path_buf()),
    }
}

async fn write_and_rename(
    temp: &Path,
    target: &Path,
    text: &str,
    secure: bool,
) -> Result<(), StoreError> {
    tokio::fs::write(temp, text).await?;
    if secure {
        set_restrictive_permissions(temp).await?;
    } else if let Ok(existing) = tokio::fs::metadata(target).await {
        tokio::fs::set_permissions(temp, existing.permissions()).await?;
    }
    tokio::fs::rename(temp, target).await?;
    Ok(())
}

/// Writes `text` to `path` atomically (temp file + rename).
///
/// With `secure`, the file is restricted to the owner before it replaces the
/// old one; otherwise the old file's mode is kept. Symlinks are followed and
/// the temp file is removed if the write fails.
pub async fn write_text_atomic(path: &Path, text: &str, secure: bool) -> Result<(), StoreError> {
    let target = resolve_write_target(path).await?;
    create_parent_dirs(&target, secure).await?;

    let temp = temp_path(&target);
    if let Err(e) = write_and_rename(&temp, &target, text, secure).await {
        if let Err(cleanup) = tokio::fs::remove_file(&temp).await {
            debug!(path = %temp.display(), error = %cleanup, "Temp file not removed");
        }
        return Err(e);
    }

    debug!(path = %target.display(), secure, "File written");
    Ok(())
}

/// Saves data to a pretty-printed JSON file with secure permissions.
pub async fn save_json<T: Serialize>(path: &Path, data: &T) -> Result<(), StoreError> {
    debug!(path = %path.display(), "Saving JSON file");
    let json = serde_json::to_string_pretty(data)?;
    write_text_atomic(path, &json, true).await
}

/// Loads data from a JSON file.
pub async fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    let content = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&content)?)
}

/// Path a corrupt file is moved to:
/// `<dir>/<base>.corrupt-<stamp>-<suffix><ext>`.
pub fn corrupt_backup_path(path: &Path, stamp: &str, suffix: &str) -> PathBuf {
    let base = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    path.with_file_name(format!("{base}.corrupt-{stamp}-{suffix}{ext}"))
}

fn quarantine_target(path: &Path) -> PathBuf {
    let stamp = Utc::now()
        .to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace([':', '.'], "-");
    let suffix = format!("{:06x}", rand::thread_rng().gen_range(0..0x0100_0000u32));
    corrupt_backup_path(path, &stamp, &suffix)
}

/// Reads a JSON file, returning `None` when it is missing, unreadable or
/// invalid.
///
/// Invalid JSON is renamed to a `.corrupt-*` sibling so the next write
/// starts clean.
pub async fn read_json_file<T: DeserializeOwned>(path: &Path) -> Option<T> {
    let raw = match tokio::fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Unable to read file, continuing with defaults");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            let target = quarantine_target(path);
            match tokio::fs::rename(path, &target).await {
                Ok(()) => warn!(
                    path = %path.display(),
                    moved_to = %target.display(),
                    error = %e,
                    "Invalid JSON moved aside, continuing with defaults"
                ),
                Err(rename_err) => warn!(
                    path = %path.display(),
                    error = %rename_err,
                    "Invalid JSON; fix or delete this file, then try again"
                ),
            }
            None
        }
    }
}

/// Deletes a file, treating "not found" as success. Returns whether a file
/// was removed.
pub async fn remove_file_if_exists(path: &Path) -> Result<bool, StoreError> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}

// ============================================================================
// Tests
// ============================================================================
