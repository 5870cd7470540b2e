// pwml-rs: Project Wings Mod Loader - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point for front-ends: one game directory, its mods, and apply.
//!
//! ```text
//! ModManager::open(config)
//!   game dir exists?        no  --> error
//!   mods/ exists?           no  --> create
//!   active_mods.json?       no  --> Bootstrapper (if enabled)
//!                                   active_mods.json = {"active": [vanilla]}
//!   ModRegistry::load(mods/, active_mods.json)
//!
//! list / is_active / set_active / name / description / resolve
//! save_active_set  --> active_mods.json
//! apply            --> CompositionEngine over registry.active_in(order)
//! ```


use anyhow::Context;
use tracing::{info, instrument, warn};

use crate::bootstrap::Bootstrapper;
use crate::compose::{ApplyReport, CompositionEngine};
use crate::config::Config;
use crate::config::paths::GameLayout;
use crate::config::types::LoadOrder;
use crate::error::{FsError, Result};
use crate::registry::ModRegistry;
use crate::registry::metadata::ActiveSet;

/// Mods of one game installation.
#[derive(Debug)]
pub struct ModManager {
    game: GameLayout,
    registry: ModRegistry,
    order: LoadOrder,
}

impl ModManager {
    /// Opens the game directory named by `config`, bootstrapping the
    /// baseline mod on first run.
    ///
    /// A failed bootstrap is logged and does not stop the open; the registry
    /// holds whatever was created.
    ///
    /// # Errors
    ///
    /// Returns an error if the game directory does not exist, the mods
    /// folder cannot be created, or the first-run active list cannot be
    /// written.
    #[instrument(skip_all)]
    pub fn open(config: &Config) -> Result<Self> {
        let root = config
            .game
            .resolve_dir()
            .context("failed to determine the game directory")?;
        if !root.is_dir() {
            return Err(FsError::NotFound(root.display().to_string()).into());
        }
        let game = GameLayout::new(root);

        let mods_dir = game.mods_dir();
        std::fs::create_dir_all(&mods_dir).map_err(|e| FsError::io(&mods_dir, e))?;

        let active_file = game.active_mods_file();
        if config.game.bootstrap && !active_file.exists() {
            let vanilla = config.game.vanilla.as_str();
            info!(mod_id = %vanilla, "first run, creating baseline mod");
            if let Err(e) = Bootstrapper::new(&game, vanilla).run() {
                warn!(error = %format!("{e:#}"), "bootstrap incomplete");
            }
            ActiveSet::from_iter([vanilla]).save(&active_file)?;
        }

        let registry = ModRegistry::load(&mods_dir, &active_file)?;
        info!(
            dir = %game.root().display(),
            mods = registry.len(),
            active = registry.active_mods().count(),
            "opened game directory"
        );

        Ok(Self {
            game,
            registry,
            order: config.apply.order,
        })
    }

    #[must_use]
    pub const fn game(&self) -> &GameLayout {
        &self.game
    }

    #[must_use]
    pub const fn registry(&self) -> &ModRegistry {
        &self.registry
    }

    /// Mod ids in byte-wise order.
    #[must_use]
    pub fn list(&self) -> Vec<String> {
        self.registry.list()
    }

    #[must_use]
    pub fn is_active(&self, id: &str) -> bool {
        self.registry.is_active(id)
    }

    /// Changes the in-memory activation of mod `id`.
    ///
    /// Call [`save_active_set`](Self::save_active_set) to persist it.
    ///
    /// # Errors
    ///
    /// Returns an error if no mod has this id.
    pub fn set_active(&mut self, id: &str, active: bool) -> Result<()> {
        self.registry.set_active(id, active)?;
        Ok(())
    }

    #[must_use]
    pub fn name(&self, id: &str) -> Option<&str> {
        self.registry.name(id)
    }

    /// Long description of mod `id`, read on first access.
    pub fn description(&mut self, id: &str) -> Option<&str> {
        self.registry.description(id)
    }

    /// Resolves ids and glob patterns to installed mod ids.
    ///
    /// # Errors
    ///
    /// Returns an error if a pattern is not a valid glob.
    pub fn resolve(&self, patterns: &[String]) -> Result<Vec<String>> {
        self.registry.resolve(patterns)
    }

    /// Writes the active mods to `active_mods.json`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_active_set(&self) -> Result<()> {
        let active = self.registry.active_set();
        active.save(&self.game.active_mods_file())?;
        info!(active = active.len(), "saved active mod list");
        Ok(())
    }

    /// Rescans the mods folder and the active list from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the mods folder cannot be listed.
    pub fn reload(&mut self) -> Result<()> {
        self.registry = ModRegistry::load(&self.game.mods_dir(), &self.game.active_mods_file())?;
        Ok(())
    }

    /// Rebuilds the game folders from the active mods.
    #[must_use = "the report lists every problem met during apply"]
    pub fn apply(&self) -> ApplyReport {
        let mods = self.registry.active_in(self.order);
        CompositionEngine::new(&self.game).apply(&mods)
    }
}
