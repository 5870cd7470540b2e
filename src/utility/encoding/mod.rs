// pwml-rs: Project Wings Mod Loader - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Legacy text decoding (UTF-8 with a Windows-1252 fallback).
//!
//! ```text
//! bytes --strip BOM--> valid UTF-8? --yes--> str (borrowed)
//!                           |
//!                           no
//!                           v
//!                      CP1252 decode --> String
//! ```
//!
//! Uses `encoding_rs`. Windows-1252 maps every byte, so decoding never fails.

use encoding_rs::WINDOWS_1252;
use std::borrow::Cow;
use std::path::Path;

/// Encoding a text file turned out to be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextEncoding {
    /// UTF-8 (code page 65001), with or without BOM
    #[default]
    Utf8,
    /// Windows-1252 (code page 1252), what older game files use
    Windows1252,
}

impl std::fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Utf8 => write!(f, "UTF-8"),
            Self::Windows1252 => write!(f, "windows-1252"),
        }
    }
}

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Decodes `bytes` as UTF-8, falling back to Windows-1252.
///
/// # Example
/// ```
/// use pwml_rs::utility::encoding::{decode_text, TextEncoding};
///
/// let (text, encoding) = decode_text(b"caf\xe9");
/// assert_eq!(text, "café");
/// assert_eq!(encoding, TextEncoding::Windows1252);
/// ```
#[must_use]
pub fn decode_text(bytes: &[u8]) -> (Cow<'_, str>, TextEncoding) {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(text) => (Cow::Borrowed(text), TextEncoding::Utf8),
        Err(_) => {
            let (text, _had_errors) = WINDOWS_1252.decode_without_bom_handling(bytes);
            (text, TextEncoding::Windows1252)
        }
    }
}

/// Reads a whole file and decodes it with [`decode_text`].
///
/// # Errors
///
/// Returns the underlying I/O error if the file cannot be read.
pub fn read_legacy_text(path: &Path) -> std::io::Result<(String, TextEncoding)> {
    let bytes = std::fs::read(path)?;
    let (text, encoding) = decode_text(&bytes);
    Ok((text.into_owned(), encoding))
}
