// pwml-rs: Project Wings Mod Loader - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Mod discovery and activation state.
//!
//! ```text
//! mods/
//!   alpha/metadata.json   ok      --> Mod { id: "alpha", .. }
//!   beta/                 missing --> ModError::MissingMetadata (skipped)
//!   gamma/metadata.json   bad     --> ModError::InvalidMetadata (skipped)
//!
//! active_mods.json {"active": ["alpha"]} --> alpha.active = true
//!
//! ModRegistry: BTreeMap<id, Mod>, iterated in byte-wise id order
//! ```
//!
//! A registry is rebuilt wholesale on every load; nothing is updated
//! incrementally.

pub mod metadata;


use anyhow::Context;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tracing::{debug, warn};
use wax::{Glob, Program};

use crate::config::paths::ModLayout;
use crate::config::types::LoadOrder;
use crate::error::{ModError, Result};
use crate::utility::encoding::decode_text;
use crate::utility::fs::walk::list_dir;
use metadata::{ActiveSet, ModMetadata};

/// One installed mod.
#[derive(Debug, Clone)]
pub struct Mod {
    id: String,
    layout: ModLayout,
    name: String,
    short_description: String,
    description: Option<String>,
    active: bool,
}

impl Mod {
    /// Loads the mod stored at `layout`; its id is the directory name.
    ///
    /// # Errors
    ///
    /// Returns a [`ModError`] if the metadata file is missing or invalid.
    pub fn load(layout: ModLayout) -> std::result::Result<Self, ModError> {
        let id = layout
            .root()
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let metadata = ModMetadata::read(&layout.metadata_file(), &id)?;

        Ok(Self {
            id,
            layout,
            name: metadata.name,
            short_description: metadata.short_description,
            description: None,
            active: false,
        })
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.layout.root()
    }

    #[must_use]
    pub const fn layout(&self) -> &ModLayout {
        &self.layout
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn short_description(&self) -> &str {
        &self.short_description
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    pub const fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Long description from the sidecar file, read on first access.
    ///
    /// A missing or unreadable sidecar yields `None` and is retried on the
    /// next call; a successful read is cached.
    pub fn description(&mut self) -> Option<&str> {
        if self.description.is_none() {
            let path = self.layout.description_file();
            match std::fs::read(&path) {
                Ok(bytes) => {
                    self.description = Some(decode_text(&bytes).0.into_owned());
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
                Err(e) => {
                    warn!(mod_id = %self.id, path = %path.display(), error = %e, "failed to read description");
                    return None;
                }
            }
        }
        self.description.as_deref()
    }
}

/// All mods found under the mods directory, keyed by id.
#[derive(Debug, Default)]
pub struct ModRegistry {
    mods: BTreeMap<String, Mod>,
    activation: ActiveSet,
    problems: Vec<ModError>,
}

impl ModRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scans the immediate subdirectories of `mods_dir`.
    ///
    /// Candidates without valid metadata are logged, recorded in
    /// [`problems`](Self::problems) and skipped.
    ///
    /// # Errors
    ///
    /// Returns an error only if `mods_dir` itself cannot be listed.
    pub fn scan(mods_dir: &Path) -> Result<Self> {
        let mut registry = Self::new();

        let entries = list_dir(mods_dir)
            .with_context(|| format!("failed to list mods in {}", mods_dir.display()))?;

        for path in entries {
            if !path.is_dir() {
                debug!(path = %path.display(), "skipping non-directory in mods folder");
                continue;
            }
            match Mod::load(ModLayout::new(path)) {
                Ok(loaded) => {
                    debug!(mod_id = %loaded.id(), name = %loaded.name(), "found mod");
                    if let Err(e) = registry.register(loaded) {
                        warn!(error = %e, "skipping mod");
                        registry.problems.push(e);
                    }
                }
                Err(e) => {
                    warn!(error = %e, "skipping mod");
                    registry.problems.push(e);
                }
            }
        }

        Ok(registry)
    }

    /// Scans `mods_dir` and stamps activation from `active_file`.
    ///
    /// An unreadable or malformed active list is recorded as a problem and
    /// treated as empty.
    ///
    /// # Errors
    ///
    /// Returns an error only if `mods_dir` cannot be listed.
    pub fn load(mods_dir: &Path, active_file: &Path) -> Result<Self> {
        let mut registry = Self::scan(mods_dir)?;

        let active = match ActiveSet::load(active_file) {
            Ok(active) => active,
            Err(e) => {
                warn!(error = %e, "ignoring active mod list");
                registry.problems.push(e);
                ActiveSet::new()
            }
        };
        registry.stamp_active(&active);

        debug!(
            mods = registry.len(),
            active = registry.active_mods().count(),
            "loaded mod registry"
        );
        Ok(registry)
    }

    /// Adds a mod. The first mod registered under an id wins.
    ///
    /// # Errors
    ///
    /// Returns [`ModError::DuplicateId`] if the id is already taken.
    pub fn register(&mut self, candidate: Mod) -> std::result::Result<(), ModError> {
        if let Some(kept) = self.mods.get(candidate.id()) {
            return Err(ModError::DuplicateId {
                id: candidate.id().to_string(),
                kept: kept.path().display().to_string(),
                ignored: candidate.path().display().to_string(),
            });
        }
        self.mods.insert(candidate.id().to_string(), candidate);
        Ok(())
    }

    /// Marks exactly the mods in `active` as active. Unknown ids are ignored.
    ///
    /// The list order of `active` is remembered for [`LoadOrder::ActiveList`].
    pub fn stamp_active(&mut self, active: &ActiveSet) {
        for (id, entry) in &mut self.mods {
            entry.set_active(active.contains(id));
        }
        for id in active.ids() {
            if !self.mods.contains_key(id) {
                debug!(mod_id = %id, "active mod is not installed");
            }
        }
        self.activation = active.clone();
    }

    /// Problems met while scanning, in scan order.
    #[must_use]
    pub fn problems(&self) -> &[ModError] {
        &self.problems
    }

    /// Mod ids in byte-wise order.
    #[must_use]
    pub fn list(&self) -> Vec<String> {
        self.mods.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Mod> {
        self.mods.values()
    }

    /// Active mods in byte-wise id order.
    pub fn active_mods(&self) -> impl Iterator<Item = &Mod> {
        self.mods.values().filter(|m| m.is_active())
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Mod> {
        self.mods.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.mods.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.mods.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mods.is_empty()
    }

    /// Whether mod `id` is installed and active.
    #[must_use]
    pub fn is_active(&self, id: &str) -> bool {
        self.mods.get(id).is_some_and(Mod::is_active)
    }

    /// Flips the in-memory activation flag of mod `id`.
    ///
    /// An unknown id changes nothing and is logged.
    ///
    /// # Errors
    ///
    /// Returns [`ModError::NotFound`] if no mod has this id.
    pub fn set_active(&mut self, id: &str, active: bool) -> std::result::Result<(), ModError> {
        let Some(entry) = self.mods.get_mut(id) else {
            let action = if active { "activate" } else { "deactivate" };
            warn!(mod_id = %id, "cannot {action} mod: no such mod");
            return Err(ModError::NotFound(id.to_string()));
        };
        entry.set_active(active);
        if active {
            self.activation.insert(id);
        } else {
            self.activation.remove(id);
        }
        debug!(mod_id = %id, active, "set mod activation");
        Ok(())
    }

    #[must_use]
    pub fn name(&self, id: &str) -> Option<&str> {
        self.mods.get(id).map(Mod::name)
    }

    /// Long description of mod `id`, loaded lazily.
    pub fn description(&mut self, id: &str) -> Option<&str> {
        self.mods.get_mut(id).and_then(Mod::description)
    }

    /// Active mods in layering order.
    ///
    /// [`LoadOrder::ActiveList`] follows the persisted list, with mods
    /// enabled since then appended in the order they were enabled.
    #[must_use]
    pub fn active_in(&self, order: LoadOrder) -> Vec<&Mod> {
        match order {
            LoadOrder::Id => self.active_mods().collect(),
            LoadOrder::ActiveList => self
                .activation
                .ids()
                .iter()
                .filter_map(|id| self.mods.get(id))
                .filter(|m| m.is_active())
                .collect(),
        }
    }

    /// Ids of the installed active mods, in activation order.
    #[must_use]
    pub fn active_set(&self) -> ActiveSet {
        self.active_in(LoadOrder::ActiveList)
            .into_iter()
            .map(Mod::id)
            .collect()
    }

    /// Resolves exact ids and glob patterns to installed mod ids.
    ///
    /// Results are deduplicated and keep the order of first match. Patterns
    /// matching nothing are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if a pattern is not a valid glob.
    pub fn resolve(&self, patterns: &[String]) -> Result<Vec<String>> {
        let mut result = Vec::new();
        let mut seen = BTreeSet::new();

        for pattern in patterns {
            let matches: Vec<&str> = if self.mods.contains_key(pattern.as_str()) {
                vec![pattern.as_str()]
            } else {
                let glob = Glob::new(pattern)
                    .with_context(|| format!("invalid mod pattern: {pattern}"))?;
                self.mods
                    .keys()
                    .map(String::as_str)
                    .filter(|id| glob.is_match(*id))
                    .collect()
            };

            if matches.is_empty() {
                warn!(pattern = %pattern, "pattern matched no mods");
            }

            for id in matches {
                if seen.insert(id) {
                    result.push(id.to_string());
                }
            }
        }

        Ok(result)
    }
}
