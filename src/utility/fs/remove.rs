// pwml-rs: Project Wings Mod Loader - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::{FsError, Result};
use std::path::Path;
use tracing::trace;

use super::walk::list_dir;

/// Empties `dir`, keeping the directory itself.
///
/// A missing directory is created, so the call always leaves an empty
/// directory behind. Returns the number of top-level entries removed.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or read, or if an
/// entry cannot be removed.
pub fn remove_dir_contents(dir: &Path) -> Result<usize> {
    if !dir.exists() {
        std::fs::create_dir_all(dir).map_err(|e| FsError::io(dir, e))?;
        return Ok(0);
    }

    let entries = list_dir(dir)?;
    for entry in &entries {
        // symlink_metadata: never follow a link out of the tree
        let is_dir = entry
            .symlink_metadata()
            .map_err(|e| FsError::io(entry, e))?
            .is_dir();
        let removed = if is_dir {
            std::fs::remove_dir_all(entry)
        } else {
            std::fs::remove_file(entry)
        };
        removed.map_err(|e| FsError::io(entry, e))?;
        trace!(path = %entry.display(), "removed");
    }

    Ok(entries.len())
}

/// Removes a file, treating an already-missing file as success.
///
/// Returns whether a file was removed.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be removed.
pub fn remove_file_if_exists(path: &Path) -> Result<bool> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(FsError::io(path, e).into()),
    }
}
