// pwml-rs: Project Wings Mod Loader - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Composition of active mods into the live game folders.
//!
//! # Apply Pipeline
//!
//! ```text
//! 1. wipe    graphics/ levels/ music/ objects/ sound/ weapons/  -> empty
//!
//! 2. layer   for each active mod, in load order:
//!              data/weapons/<w>/ (+ weapon.json)  -> weapons/<w>/   roster += w
//!              data/weapons/builtin_weapons.json                    roster += all
//!              data/objects/, data/levels/        -> copied wholesale
//!              data/music/    minus menu_music.txt -> music/    menu_music += file
//!              data/graphics/ minus Graphics.xml   -> graphics/ graphics   += file
//!              data/sound/    minus Sounds.xml     -> sound/    sounds     += file
//!
//! 3. flush   roster     -> weapons/Weapons.dat
//!            menu_music -> music/menu_music.txt   (joined by '\n')
//!            graphics   -> graphics/Graphics.xml  (manifest::merge_all)
//!            sounds     -> sound/Sounds.xml       (manifest::merge_all)
//!
//! 4. clear   accumulators emptied for the next apply
//! ```
//!
//! Every phase runs to completion. A failing step is logged and recorded in
//! [`ApplyReport::problems`]; sibling steps carry on. Nothing is rolled back.

#[cfg(test)]
mod tests;

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info, info_span, instrument, warn};

use crate::config::paths::{AssetFolder, GameLayout, WEAPON_JSON};
use crate::error::{FsError, PwmlError, Result};
use crate::manifest::merge_all;
use crate::registry::Mod;
use crate::roster::Roster;
use crate::roster::codec::write_weapons_dat;
use crate::roster::declaration::{BuiltinWeapons, WeaponDeclaration};
use crate::utility::fs::copy::{CopyStats, copy_dir_contents, copy_dir_contents_except};
use crate::utility::fs::remove::{remove_dir_contents, remove_file_if_exists};
use crate::utility::fs::walk::list_subdirs;
use crate::utility::fs::write::write_atomic;

/// Outcome of one apply.
#[derive(Debug, Default)]
pub struct ApplyReport {
    /// Ids of the mods layered, in order.
    pub applied: Vec<String>,
    /// The roster written to `Weapons.dat`.
    pub roster: Roster,
    /// Files and directories copied into the game folders.
    pub copied: CopyStats,
    /// Menu music fragments joined.
    pub menu_music: usize,
    /// Graphics manifest fragments folded.
    pub graphics: usize,
    /// Sound manifest fragments folded.
    pub sounds: usize,
    /// Every failure met, in the order it happened.
    pub problems: Vec<PwmlError>,
    /// Wall-clock time of the whole apply.
    pub elapsed: Duration,
}

impl ApplyReport {
    /// Whether the apply finished without a single problem.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.problems.is_empty()
    }

    fn record(&mut self, context: &str, err: impl Into<PwmlError>) {
        let err = err.into();
        warn!(error = %err, "{context}");
        self.problems.push(err);
    }
}

/// Layers mods over a wiped game directory and rebuilds the collected files.
#[derive(Debug)]
pub struct CompositionEngine<'a> {
    game: &'a GameLayout,
    roster: Roster,
    menu_music: Vec<PathBuf>,
    graphics: Vec<PathBuf>,
    sounds: Vec<PathBuf>,
}

impl<'a> CompositionEngine<'a> {
    #[must_use]
    pub fn new(game: &'a GameLayout) -> Self {
        Self {
            game,
            roster: Roster::new(),
            menu_music: Vec::new(),
            graphics: Vec::new(),
            sounds: Vec::new(),
        }
    }

    /// Rebuilds the game folders from `mods`, layered in the given order.
    ///
    /// Running it twice with the same mods produces identical folders.
    #[instrument(skip_all, fields(mods = mods.len()))]
    pub fn apply(&mut self, mods: &[&Mod]) -> ApplyReport {
        let started = Instant::now();
        let mut report = ApplyReport::default();

        self.wipe(&mut report);
        for m in mods {
            self.layer(m, &mut report);
        }
        self.flush(&mut report);
        self.clear();

        report.elapsed = started.elapsed();
        info!(
            mods = report.applied.len(),
            weapons = report.roster.len(),
            files = report.copied.files,
            problems = report.problems.len(),
            elapsed_ms = report.elapsed.as_millis(),
            "applied mods"
        );
        report
    }

    /// Empties the accumulators.
    pub fn clear(&mut self) {
        self.roster.clear();
        self.menu_music.clear();
        self.graphics.clear();
        self.sounds.clear();
    }

    fn wipe(&self, report: &mut ApplyReport) {
        let _span = info_span!("wipe").entered();
        for folder in AssetFolder::ALL {
            let dir = self.game.asset_dir(folder);
            match remove_dir_contents(&dir) {
                Ok(removed) => debug!(%folder, removed, "wiped folder"),
                Err(e) => report.record("failed to wipe folder", e),
            }
        }
    }

    fn layer(&mut self, m: &Mod, report: &mut ApplyReport) {
        let _span = info_span!("layer", mod_id = %m.id()).entered();
        let layout = m.layout();

        self.layer_weapons(&layout.asset_dir(AssetFolder::Weapons), report);

        let builtin = layout.builtin_weapons_file();
        if builtin.is_file() {
            match BuiltinWeapons::read(&builtin) {
                Ok(weapons) => self.roster.extend(&weapons.into_roster()),
                Err(e) => report.record("skipping built-in weapons", e),
            }
        }

        for folder in [
            AssetFolder::Objects,
            AssetFolder::Levels,
            AssetFolder::Music,
            AssetFolder::Graphics,
            AssetFolder::Sound,
        ] {
            let src = layout.asset_dir(folder);
            if !src.is_dir() {
                continue;
            }
            let dst = self.game.asset_dir(folder);
            let copied = match folder.collected_file() {
                Some(collected) => copy_dir_contents_except(&src, &dst, &[collected]),
                None => copy_dir_contents(&src, &dst),
            };
            match copied {
                Ok(stats) => report.copied += stats,
                Err(e) => report.record("failed to copy folder", e),
            }

            if let Some(fragment) = layout.collected_file(folder)
                && fragment.is_file()
            {
                match folder {
                    AssetFolder::Music => self.menu_music.push(fragment),
                    AssetFolder::Graphics => self.graphics.push(fragment),
                    AssetFolder::Sound => self.sounds.push(fragment),
                    _ => {}
                }
            }
        }

        debug!("layered mod");
        report.applied.push(m.id().to_string());
    }

    fn layer_weapons(&mut self, src: &Path, report: &mut ApplyReport) {
        if !src.is_dir() {
            return;
        }
        let weapon_dirs = match list_subdirs(src) {
            Ok(dirs) => dirs,
            Err(e) => {
                report.record("failed to list weapons", e);
                return;
            }
        };

        let live = self.game.asset_dir(AssetFolder::Weapons);
        for weapon_dir in weapon_dirs {
            let Some(name) = weapon_dir.file_name().map(|n| n.to_string_lossy().into_owned())
            else {
                continue;
            };
            let declaration = weapon_dir.join(WEAPON_JSON);
            if !declaration.is_file() {
                debug!(weapon = %name, "no weapon declaration, skipping folder");
                continue;
            }
            let role = match WeaponDeclaration::read(&declaration) {
                Ok(declared) => declared.role(),
                Err(e) => {
                    report.record("skipping weapon", e);
                    continue;
                }
            };

            let dst = live.join(&name);
            let installed = copy_dir_contents(&weapon_dir, &dst)
                .and_then(|stats| remove_file_if_exists(&dst.join(WEAPON_JSON)).map(|_| stats));
            match installed {
                Ok(stats) => {
                    report.copied += stats;
                    self.roster.declare(&name, role);
                    debug!(weapon = %name, %role, "installed weapon");
                }
                Err(e) => report.record("failed to install weapon", e),
            }
        }
    }

    fn flush(&mut self, report: &mut ApplyReport) {
        let _span = info_span!("flush").entered();

        if let Err(e) = write_weapons_dat(&self.game.weapons_dat(), &self.roster) {
            report.record("failed to write weapon roster", e);
        }
        report.roster = std::mem::take(&mut self.roster);

        if !self.menu_music.is_empty() {
            match self.write_menu_music(report) {
                Ok(()) => report.menu_music = self.menu_music.len(),
                Err(e) => report.record("failed to write menu music", e),
            }
        }

        match merge_all(&self.graphics, &self.game.graphics_manifest()) {
            Ok(folded) => report.graphics = folded,
            Err(e) => report.record("failed to build graphics manifest", e),
        }
        match merge_all(&self.sounds, &self.game.sounds_manifest()) {
            Ok(folded) => report.sounds = folded,
            Err(e) => report.record("failed to build sound manifest", e),
        }
    }

    fn write_menu_music(&self, report: &mut ApplyReport) -> Result<()> {
        let mut fragments = Vec::with_capacity(self.menu_music.len());
        for path in &self.menu_music {
            match std::fs::read(path) {
                Ok(bytes) => fragments.push(bytes),
                Err(e) => report.record("skipping menu music fragment", FsError::io(path, e)),
            }
        }

        let path = self.game.menu_music_file();
        write_atomic(&path, join_menu_music(fragments.iter().map(Vec::as_slice)))
            .map_err(|e| anyhow::anyhow!("failed to write {}: {e}", path.display()))?;
        Ok(())
    }
}

/// Joins menu music fragments with single newlines.
///
/// Works on raw bytes so the file names keep whatever encoding the game
/// shipped. Trailing line breaks of each fragment are dropped, empty
/// fragments are skipped, and the result has no trailing newline.
#[must_use]
pub fn join_menu_music<'s>(fragments: impl IntoIterator<Item = &'s [u8]>) -> Vec<u8> {
    let mut joined = Vec::new();
    for fragment in fragments {
        let end = fragment
            .iter()
            .rposition(|b| !matches!(b, b'\r' | b'\n'))
            .map_or(0, |last| last + 1);
        if end == 0 {
            continue;
        }
        if !joined.is_empty() {
            joined.push(b'\n');
        }
        joined.extend_from_slice(&fragment[..end]);
    }
    joined
}
