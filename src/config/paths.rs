// pwml-rs: Project Wings Mod Loader - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Canonical game and mod directory layout.
//!
//! ```text
//! <game dir>/
//!   active_mods.json
//!   bin/Wings.exe
//!   weapons/   Weapons.dat        <-- generated
//!   sound/     Sounds.xml         <-- generated
//!   graphics/  Graphics.xml       <-- generated
//!   music/     menu_music.txt     <-- generated
//!   objects/  levels/             <-- generated
//!   mods/<id>/
//!     metadata.json
//!     description.pango
//!     data/{weapons,sound,graphics,music,objects,levels}/
//!       weapons/<name>/weapon.json
//!       weapons/builtin_weapons.json
//! ```
//!
//! Every path is derived from one root; nothing here touches the disk.

use std::path::{Path, PathBuf};

pub const MODS_FOLDER: &str = "mods";
pub const BIN_FOLDER: &str = "bin";
pub const MOD_DATA_FOLDER: &str = "data";

pub const METADATA_JSON: &str = "metadata.json";
pub const DESCRIPTION_FILE: &str = "description.pango";
pub const ACTIVE_MODS_JSON: &str = "active_mods.json";
pub const WEAPON_JSON: &str = "weapon.json";
pub const BUILTIN_WEAPONS_JSON: &str = "builtin_weapons.json";

pub const WEAPONS_DAT: &str = "Weapons.dat";
pub const MENU_MUSIC_TXT: &str = "menu_music.txt";
pub const GRAPHICS_XML: &str = "Graphics.xml";
pub const SOUNDS_XML: &str = "Sounds.xml";

pub const WINGS_EXECUTABLE: &str = "Wings.exe";

/// The six game asset folders that are regenerated on every apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AssetFolder {
    Graphics,
    Levels,
    Music,
    Objects,
    Sound,
    Weapons,
}

impl AssetFolder {
    /// All generated folders, in wipe order.
    pub const ALL: [Self; 6] = [
        Self::Graphics,
        Self::Levels,
        Self::Music,
        Self::Objects,
        Self::Sound,
        Self::Weapons,
    ];

    /// Folder name, identical in the game root and in a mod's `data/`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Graphics => "graphics",
            Self::Levels => "levels",
            Self::Music => "music",
            Self::Objects => "objects",
            Self::Sound => "sound",
            Self::Weapons => "weapons",
        }
    }

    /// File inside the folder that is collected from every mod and rebuilt,
    /// rather than copied verbatim.
    #[must_use]
    pub const fn collected_file(self) -> Option<&'static str> {
        match self {
            Self::Graphics => Some(GRAPHICS_XML),
            Self::Music => Some(MENU_MUSIC_TXT),
            Self::Sound => Some(SOUNDS_XML),
            Self::Weapons => Some(WEAPONS_DAT),
            Self::Levels | Self::Objects => None,
        }
    }
}

impl std::fmt::Display for AssetFolder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Absolute paths inside the game's working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameLayout {
    root: PathBuf,
}

impl GameLayout {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The game's working directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn mods_dir(&self) -> PathBuf {
        self.root.join(MODS_FOLDER)
    }

    #[must_use]
    pub fn asset_dir(&self, folder: AssetFolder) -> PathBuf {
        self.root.join(folder.name())
    }

    #[must_use]
    pub fn active_mods_file(&self) -> PathBuf {
        self.root.join(ACTIVE_MODS_JSON)
    }

    #[must_use]
    pub fn weapons_dat(&self) -> PathBuf {
        self.asset_dir(AssetFolder::Weapons).join(WEAPONS_DAT)
    }

    #[must_use]
    pub fn menu_music_file(&self) -> PathBuf {
        self.asset_dir(AssetFolder::Music).join(MENU_MUSIC_TXT)
    }

    #[must_use]
    pub fn graphics_manifest(&self) -> PathBuf {
        self.asset_dir(AssetFolder::Graphics).join(GRAPHICS_XML)
    }

    #[must_use]
    pub fn sounds_manifest(&self) -> PathBuf {
        self.asset_dir(AssetFolder::Sound).join(SOUNDS_XML)
    }

    #[must_use]
    pub fn executable(&self) -> PathBuf {
        self.root.join(BIN_FOLDER).join(WINGS_EXECUTABLE)
    }

    /// Layout of the mod directory `mods/<id>`.
    #[must_use]
    pub fn mod_layout(&self, id: &str) -> ModLayout {
        ModLayout::new(self.mods_dir().join(id))
    }
}

/// Absolute paths inside one mod directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModLayout {
    root: PathBuf,
}

impl ModLayout {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn metadata_file(&self) -> PathBuf {
        self.root.join(METADATA_JSON)
    }

    #[must_use]
    pub fn description_file(&self) -> PathBuf {
        self.root.join(DESCRIPTION_FILE)
    }

    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.root.join(MOD_DATA_FOLDER)
    }

    #[must_use]
    pub fn asset_dir(&self, folder: AssetFolder) -> PathBuf {
        self.data_dir().join(folder.name())
    }

    /// Declaration sidecar of weapon `name`.
    #[must_use]
    pub fn weapon_declaration(&self, name: &str) -> PathBuf {
        self.asset_dir(AssetFolder::Weapons)
            .join(name)
            .join(WEAPON_JSON)
    }

    #[must_use]
    pub fn builtin_weapons_file(&self) -> PathBuf {
        self.asset_dir(AssetFolder::Weapons)
            .join(BUILTIN_WEAPONS_JSON)
    }

    /// The mod's fragment of a collected file (menu music, manifests).
    ///
    /// Returns `None` for folders without a collected file.
    #[must_use]
    pub fn collected_file(&self, folder: AssetFolder) -> Option<PathBuf> {
        folder
            .collected_file()
            .map(|name| self.asset_dir(folder).join(name))
    }
}
