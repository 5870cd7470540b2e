// pwml-rs: Project Wings Mod Loader - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::{FsError, Result};
use anyhow::Context;
use std::path::Path;
use tracing::trace;

use super::walk::{WalkOptions, walk};

/// Counters for one copy operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyStats {
    /// Regular files copied.
    pub files: usize,
    /// Directories created or reused.
    pub directories: usize,
}

impl std::ops::AddAssign for CopyStats {
    fn add_assign(&mut self, rhs: Self) {
        self.files += rhs.files;
        self.directories += rhs.directories;
    }
}

/// Copies one file, creating the destination's parent and overwriting any
/// existing file.
///
/// # Errors
///
/// Returns an error if the parent cannot be created or the copy fails.
pub fn copy_file(src: &Path, dst: &Path) -> Result<()> {
    if let Some(parent) = dst.parent() {
        std::fs::create_dir_all(parent).map_err(|e| FsError::io(parent, e))?;
    }
    std::fs::copy(src, dst).with_context(|| {
        format!("failed to copy {} to {}", src.display(), dst.display())
    })?;
    trace!(src = %src.display(), dst = %dst.display(), "copied file");
    Ok(())
}

/// Recursively copies all contents from `src` directory to `dst` directory.
///
/// Creates `dst` if it doesn't exist. Existing files are overwritten, other
/// files already in `dst` are left alone.
///
/// # Example
/// ```no_run
/// use pwml_rs::utility::fs::copy::copy_dir_contents;
/// use std::path::Path;
///
/// copy_dir_contents(Path::new("mods/vanilla/data/levels"), Path::new("levels"))?;
/// # Ok::<(), anyhow::Error>(())
/// ```
///
/// # Errors
///
/// Returns an error if `src` is missing, an entry cannot be read, or a copy
/// fails.
pub fn copy_dir_contents(src: &Path, dst: &Path) -> Result<CopyStats> {
    copy_dir_contents_with(src, dst, &WalkOptions::default())
}

/// Like [`copy_dir_contents`], skipping the named entries directly under `src`.
///
/// # Errors
///
/// Returns an error if `src` is missing, an entry cannot be read, or a copy
/// fails.
pub fn copy_dir_contents_except(src: &Path, dst: &Path, exclude: &[&str]) -> Result<CopyStats> {
    copy_dir_contents_with(src, dst, &WalkOptions::excluding(exclude.iter().copied()))
}

fn copy_dir_contents_with(src: &Path, dst: &Path, options: &WalkOptions) -> Result<CopyStats> {
    let listing = walk(src, options)?;

    std::fs::create_dir_all(dst).map_err(|e| FsError::io(dst, e))?;

    let mut stats = CopyStats::default();

    for dir in listing.directories() {
        let relative = dir.strip_prefix(src).with_context(|| {
            format!("{} escaped {}", dir.display(), src.display())
        })?;
        let target = dst.join(relative);
        std::fs::create_dir_all(&target).map_err(|e| FsError::io(&target, e))?;
        stats.directories += 1;
    }

    for file in listing.files() {
        let relative = file.strip_prefix(src).with_context(|| {
            format!("{} escaped {}", file.display(), src.display())
        })?;
        copy_file(file, &dst.join(relative))?;
        stats.files += 1;
    }

    if listing.error_count() > 0 {
        anyhow::bail!(
            "{} entries under {} could not be read",
            listing.error_count(),
            src.display()
        );
    }

    Ok(stats)
}
