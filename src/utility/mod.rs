// pwml-rs: Project Wings Mod Loader - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Utility modules.
//!
//! ```text
//! encoding
//!   decode_text()       UTF-8 (BOM aware) or CP1252 --> UTF-8
//!   read_legacy_text()  file variant
//! fs
//!   walk:   walk(), list_dir(), list_subdirs(), WalkOptions
//!   copy:   copy_dir_contents(), copy_dir_contents_except(), copy_file()
//!   remove: remove_dir_contents(), remove_file_if_exists()
//!   write:  write_atomic()
//! ```

pub mod encoding;
pub mod fs;
