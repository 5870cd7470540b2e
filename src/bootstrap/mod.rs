// pwml-rs: Project Wings Mod Loader - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! First-run snapshot of the stock game into a baseline mod.
//!
//! ```text
//! <game>/weapons/Weapons.dat --parse--> stock roster
//! <game>/weapons/<w>/        --copy---> mods/vanilla/data/weapons/<w>/
//!                                         + weapon.json (flags from roster)
//! roster entries without dir ---------> data/weapons/builtin_weapons.json
//! <game>/levels/  (minus received/) --> data/levels/
//! <game>/{objects,sound,music,graphics}/ --> data/<folder>/
//! metadata.json {"name": "Vanilla", ...}
//! ```
//!
//! Steps run in that order; the first failing step stops the rest. A stock
//! folder that does not exist snapshots as an empty folder.


use anyhow::Context;
use std::path::Path;
use tracing::{debug, info, instrument};

use crate::config::paths::{AssetFolder, GameLayout, ModLayout};
use crate::error::Result;
use crate::registry::metadata::ModMetadata;
use crate::roster::codec::read_weapons_dat;
use crate::roster::declaration::{BuiltinWeapons, WeaponDeclaration};
use crate::roster::{Roster, WeaponRole};
use crate::utility::fs::copy::{CopyStats, copy_dir_contents, copy_dir_contents_except};
use crate::utility::fs::walk::list_subdirs;

/// Level subfolder holding levels received from other players; not stock.
pub const RECEIVED_LEVELS: &str = "received";

/// What a bootstrap run produced.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BootstrapReport {
    /// Weapon directories snapshotted with a `weapon.json`.
    pub weapon_dirs: usize,
    /// Roster entries recorded in `builtin_weapons.json`.
    pub builtin_weapons: usize,
    /// Files and directories copied across all folders.
    pub copied: CopyStats,
    /// Stock folders that did not exist.
    pub missing_folders: Vec<AssetFolder>,
}

/// Creates the baseline mod from the game's current assets.
#[derive(Debug, Clone)]
pub struct Bootstrapper<'a> {
    game: &'a GameLayout,
    target: ModLayout,
    id: &'a str,
}

impl<'a> Bootstrapper<'a> {
    /// Bootstrapper writing mod `id` inside `game`'s mods folder.
    #[must_use]
    pub fn new(game: &'a GameLayout, id: &'a str) -> Self {
        Self {
            game,
            target: game.mod_layout(id),
            id,
        }
    }

    /// Layout of the mod being created.
    #[must_use]
    pub const fn target(&self) -> &ModLayout {
        &self.target
    }

    /// Runs every step in order.
    ///
    /// # Errors
    ///
    /// Returns the first failing step's error. Files written by earlier
    /// steps stay on disk.
    #[instrument(skip(self), fields(mod_id = %self.id))]
    pub fn run(&self) -> Result<BootstrapReport> {
        let mut report = BootstrapReport::default();

        let root = self.target.root();
        std::fs::create_dir_all(root)
            .with_context(|| format!("failed to create baseline mod at {}", root.display()))?;
        ModMetadata::vanilla()
            .write(&self.target.metadata_file())
            .context("failed to write baseline metadata")?;

        self.snapshot_weapons(&mut report)
            .context("weapon snapshot failed")?;

        for folder in [
            AssetFolder::Levels,
            AssetFolder::Objects,
            AssetFolder::Sound,
            AssetFolder::Music,
            AssetFolder::Graphics,
        ] {
            self.snapshot_folder(folder, &mut report)
                .with_context(|| format!("{folder} snapshot failed"))?;
        }

        info!(
            weapons = report.weapon_dirs,
            builtin = report.builtin_weapons,
            files = report.copied.files,
            "created baseline mod"
        );
        Ok(report)
    }

    fn snapshot_weapons(&self, report: &mut BootstrapReport) -> Result<()> {
        let stock_dir = self.game.asset_dir(AssetFolder::Weapons);
        let target_dir = self.target.asset_dir(AssetFolder::Weapons);

        let mut builtin: Roster = read_weapons_dat(&self.game.weapons_dat())?;
        let stock = builtin.clone();

        std::fs::create_dir_all(&target_dir)
            .with_context(|| format!("failed to create {}", target_dir.display()))?;

        for weapon_dir in list_subdirs(&stock_dir)? {
            let Some(name) = dir_name(&weapon_dir) else {
                continue;
            };
            let role = stock.get(&name).unwrap_or(WeaponRole::empty());
            builtin.remove(&name);

            report.copied += copy_dir_contents(&weapon_dir, &target_dir.join(&name))?;
            WeaponDeclaration::from(role).write(&self.target.weapon_declaration(&name))?;
            report.weapon_dirs += 1;
            debug!(weapon = %name, %role, "snapshotted weapon");
        }

        BuiltinWeapons::from_roster(&builtin).write(&self.target.builtin_weapons_file())?;
        report.builtin_weapons = builtin.len();
        Ok(())
    }

    fn snapshot_folder(&self, folder: AssetFolder, report: &mut BootstrapReport) -> Result<()> {
        let stock_dir = self.game.asset_dir(folder);
        let target_dir = self.target.asset_dir(folder);

        if !stock_dir.is_dir() {
            debug!(%folder, "stock folder missing, nothing to snapshot");
            std::fs::create_dir_all(&target_dir)
                .with_context(|| format!("failed to create {}", target_dir.display()))?;
            report.missing_folders.push(folder);
            return Ok(());
        }

        let exclude: &[&str] = match folder {
            AssetFolder::Levels => &[RECEIVED_LEVELS],
            _ => &[],
        };
        report.copied += copy_dir_contents_except(&stock_dir, &target_dir, exclude)?;
        debug!(%folder, "snapshotted folder");
        Ok(())
    }
}

fn dir_name(path: &Path) -> Option<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
}
