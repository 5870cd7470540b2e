// pwml-rs: Project Wings Mod Loader - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Writes `contents` to `path` through a temporary file in the same
/// directory, then renames it into place.
///
/// Readers never observe a half-written file. The parent directory is
/// created if needed. Like [`std::fs::write`] this reports a plain I/O
/// error so callers can wrap it in their own error type.
///
/// # Errors
///
/// Returns an error if the parent cannot be created, the temporary file
/// cannot be written, or the rename fails.
pub fn write_atomic(path: &Path, contents: impl AsRef<[u8]>) -> std::io::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    let mut file = NamedTempFile::new_in(parent)?;
    file.write_all(contents.as_ref())?;
    file.flush()?;
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}
