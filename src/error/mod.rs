// pwml-rs: Project Wings Mod Loader - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!              PwmlError (~24 bytes)
//!                     |
//!   +------+------+------+------+------+------+
//!   |      |      |      |      |      |      |
//!   v      v      v      v      v      v      v
//!  Cfg    Mod  Roster Manifest  Fs     Io   Other
//!  Box    Box    Box    Box     Box    Box  Box<str>
//!
//! Sub-errors (unboxed internally):
//!   Config    InvalidValue
//!   Mod       MissingMetadata, InvalidMetadata, InvalidWeaponDeclaration,
//!             InvalidActiveSet, DuplicateId, NotFound
//!   Roster    Read, Write
//!   Manifest  Read, Parse, Serialize, Write
//!   Fs        NotFound, PermissionDenied, IoError
//!
//! All variants boxed => PwmlError fits in 24 bytes.
//! ```

use std::path::Path;

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`PwmlError`].
pub type PwmlResult<T> = std::result::Result<T, PwmlError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum PwmlError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Mod metadata or registry error.
    #[error("mod error: {0}")]
    Mod(#[from] Box<ModError>),

    /// Weapon roster error.
    #[error("roster error: {0}")]
    Roster(#[from] Box<RosterError>),

    /// XML manifest error.
    #[error("manifest error: {0}")]
    Manifest(#[from] Box<ManifestError>),

    /// Filesystem error.
    #[error("filesystem error: {0}")]
    Fs(#[from] Box<FsError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),

    /// Generic error with message.
    #[error("{0}")]
    Other(Box<str>),
}

impl PwmlError {
    /// Flattens an `anyhow` chain into [`PwmlError::Other`].
    #[must_use]
    pub fn other(err: &anyhow::Error) -> Self {
        Self::Other(format!("{err:#}").into_boxed_str())
    }
}

impl From<anyhow::Error> for PwmlError {
    /// Recovers the typed error at the root of an `anyhow` chain when there is
    /// one; context layers are dropped in that case. An io error is only
    /// recovered when it carries no context.
    fn from(err: anyhow::Error) -> Self {
        let err = match err.downcast::<Self>() {
            Ok(pwml) => return pwml,
            Err(err) => err,
        };
        let err = match err.downcast::<FsError>() {
            Ok(fs) => return fs.into(),
            Err(err) => err,
        };
        let err = match err.downcast::<ModError>() {
            Ok(m) => return m.into(),
            Err(err) => err,
        };
        let err = match err.downcast::<ManifestError>() {
            Ok(m) => return m.into(),
            Err(err) => err,
        };
        let err = match err.downcast::<RosterError>() {
            Ok(r) => return r.into(),
            Err(err) => err,
        };
        let err = match err.downcast::<ConfigError>() {
            Ok(c) => return c.into(),
            Err(err) => err,
        };
        let bare_io = err
            .chain()
            .next()
            .is_some_and(|outer| outer.is::<std::io::Error>());
        if !bare_io {
            return Self::other(&err);
        }
        match err.downcast::<std::io::Error>() {
            Ok(io) => io.into(),
            Err(err) => Self::other(&err),
        }
    }
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for PwmlError {
                fn from(err: $error) -> Self {
                    PwmlError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    ConfigError => Config,
    ModError => Mod,
    RosterError => Roster,
    ManifestError => Manifest,
    FsError => Fs,
    std::io::Error => Io,
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}

// --- Mod Errors ---

/// Errors raised while discovering mods and reading their declarations.
#[derive(Debug, Error)]
pub enum ModError {
    /// The candidate directory has no metadata file.
    #[error("missing metadata for mod '{id}'")]
    MissingMetadata { id: String },

    /// The metadata file could not be read or is not the expected JSON.
    #[error("invalid metadata in '{path}': {message}")]
    InvalidMetadata { path: String, message: String },

    /// A weapon declaration file is unreadable or malformed.
    #[error("invalid weapon declaration '{path}': {message}")]
    InvalidWeaponDeclaration { path: String, message: String },

    /// The persisted active-mod list is unreadable or malformed.
    #[error("invalid active mod list '{path}': {message}")]
    InvalidActiveSet { path: String, message: String },

    /// Two candidates resolved to the same mod id.
    #[error("duplicate mod id '{id}': '{kept}' kept, '{ignored}' ignored")]
    DuplicateId {
        id: String,
        kept: String,
        ignored: String,
    },

    /// No mod with this id is known.
    #[error("no such mod: '{0}'")]
    NotFound(String),
}

// --- Roster Errors ---

/// Weapon roster (Weapons.dat) errors.
#[derive(Debug, Error)]
pub enum RosterError {
    /// The roster file could not be read.
    #[error("failed to read roster '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The roster file could not be written.
    #[error("failed to write roster '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// --- Manifest Errors ---

/// XML manifest merge errors.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// A manifest file could not be read.
    #[error("failed to read manifest '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A manifest is not well-formed XML.
    #[error("malformed xml in '{path}': {message}")]
    Parse { path: String, message: String },

    /// The merged document could not be rendered.
    #[error("failed to serialize manifest '{path}': {message}")]
    Serialize { path: String, message: String },

    /// The merged manifest could not be written.
    #[error("failed to write manifest '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// --- Filesystem Errors ---

/// Filesystem operation errors.
#[derive(Debug, Error)]
pub enum FsError {
    /// Path not found.
    #[error("path not found: {0}")]
    NotFound(String),

    /// Permission denied.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// General I/O error.
    #[error("I/O error on '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl FsError {
    /// Classifies an I/O failure on `path`.
    #[must_use]
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        let display = path.display().to_string();
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(display),
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(display),
            _ => Self::IoError {
                path: display,
                source,
            },
        }
    }
}
