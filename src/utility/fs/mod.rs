// pwml-rs: Project Wings Mod Loader - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Filesystem primitives for snapshotting and layering asset trees.
//!
//! ```text
//! walk:    walk()              ignore::Walk, sorted, worklist based
//!          list_dir()          immediate children, sorted
//! copy:    copy_dir_contents() recursive, overwriting
//!          copy_dir_contents_except()  skip top-level names
//! remove:  remove_dir_contents()  empty (or create) a directory
//! write:   write_atomic()      tempfile + rename
//! ```

pub mod copy;
pub mod remove;
pub mod walk;
pub mod write;
