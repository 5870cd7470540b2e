// pwml-rs: Project Wings Mod Loader - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::{FsError, Result};
use bon::Builder;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Options for directory traversal.
#[derive(Debug, Clone, Builder)]
pub struct WalkOptions {
    /// Maximum depth to traverse (None = unlimited)
    #[builder(setters(name = with_max_depth))]
    max_depth: Option<usize>,
    /// Follow symbolic links
    #[builder(setters(name = with_follow_links), default = false)]
    follow_links: bool,
    /// Entry names skipped directly under the root (exact match)
    #[builder(setters(name = with_exclude), default)]
    exclude: Vec<String>,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl WalkOptions {
    /// Returns the maximum depth to traverse.
    #[must_use]
    pub const fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// Returns whether to follow symbolic links.
    #[must_use]
    pub const fn follow_links(&self) -> bool {
        self.follow_links
    }

    /// Returns the names excluded directly under the root.
    #[must_use]
    pub fn exclude(&self) -> &[String] {
        &self.exclude
    }

    /// Options that skip the given top-level names.
    #[must_use]
    pub fn excluding<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::builder()
            .with_exclude(names.into_iter().map(Into::into).collect())
            .build()
    }
}

/// Result of a walk operation.
///
/// Paths are absolute (rooted at the walk root) and come out in
/// depth-first, name-sorted order; a directory always precedes its contents.
#[derive(Debug)]
pub struct WalkResult {
    files: Vec<PathBuf>,
    directories: Vec<PathBuf>,
    error_count: usize,
}

impl WalkResult {
    pub(crate) const fn new(
        files: Vec<PathBuf>,
        directories: Vec<PathBuf>,
        error_count: usize,
    ) -> Self {
        Self {
            files,
            directories,
            error_count,
        }
    }

    /// Returns the files found during traversal.
    #[must_use]
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Returns the directories found during traversal, excluding the root.
    #[must_use]
    pub fn directories(&self) -> &[PathBuf] {
        &self.directories
    }

    /// Returns the number of entries that could not be read.
    #[must_use]
    pub const fn error_count(&self) -> usize {
        self.error_count
    }
}

/// Builds a sequential `WalkBuilder` that sees every entry.
///
/// Game folders are not source trees: hidden files and ignore files are
/// regular content here, so all of `ignore`'s standard filters are off.
pub(super) fn build_walker(root: &Path, options: &WalkOptions) -> WalkBuilder {
    let mut builder = WalkBuilder::new(root);

    builder.standard_filters(false);
    builder.follow_links(options.follow_links());
    builder.max_depth(options.max_depth());
    builder.sort_by_file_name(|a, b| a.cmp(b));

    if !options.exclude().is_empty() {
        let exclude = options.exclude().to_vec();
        builder.filter_entry(move |entry| {
            !(entry.depth() == 1
                && entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| exclude.iter().any(|skip| skip == name)))
        });
    }

    builder
}

/// Walks `root` with an explicit worklist, collecting files and directories.
///
/// Unreadable entries are logged and counted, not fatal.
///
/// # Errors
///
/// Returns an error if the root directory does not exist.
///
/// # Example
/// ```no_run
/// use pwml_rs::utility::fs::walk::{walk, WalkOptions};
///
/// let result = walk("mods/vanilla/data", &WalkOptions::default())?;
/// println!("Found {} files", result.files().len());
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn walk<P: AsRef<Path>>(root: P, options: &WalkOptions) -> Result<WalkResult> {
    let root = root.as_ref();

    if !root.is_dir() {
        return Err(FsError::NotFound(root.display().to_string()).into());
    }

    let mut files = Vec::new();
    let mut directories = Vec::new();
    let mut error_count = 0;

    for entry in build_walker(root, options).build() {
        match entry {
            Ok(entry) if entry.depth() == 0 => {}
            Ok(entry) => {
                let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
                let is_file = entry.file_type().is_some_and(|ft| ft.is_file());
                if is_dir {
                    directories.push(entry.into_path());
                } else if is_file {
                    files.push(entry.into_path());
                }
            }
            Err(e) => {
                warn!(error = %e, root = %root.display(), "walk error");
                error_count += 1;
            }
        }
    }

    Ok(WalkResult::new(files, directories, error_count))
}

/// Lists the immediate children of `dir`, sorted by file name.
///
/// # Errors
///
/// Returns an error if `dir` cannot be read.
pub fn list_dir<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let mut entries = std::fs::read_dir(dir)
        .map_err(|e| FsError::io(dir, e))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(|e| FsError::io(dir, e))?;
    entries.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(entries)
}

/// Lists the immediate subdirectories of `dir`, sorted by file name.
///
/// # Errors
///
/// Returns an error if `dir` cannot be read.
pub fn list_subdirs<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    Ok(list_dir(dir)?.into_iter().filter(|p| p.is_dir()).collect())
}
