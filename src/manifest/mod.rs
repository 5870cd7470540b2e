// pwml-rs: Project Wings Mod Loader - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! XML manifest merging (`Graphics.xml`, `Sounds.xml`).
//!
//! ```text
//! merge(A, B):
//!   <rootA attrsA xmlns..>          <rootB ..>
//!     a1 a2                  +        b1 b2
//!   </rootA>                        </rootB>
//!                     |
//!                     v
//!   <rootA attrsA xmlns..> a1 a2 b1 b2 </rootA>
//!
//! merge_all([f1, f2, f3], dest):
//!   dest missing? copy f1 --> dest
//!   dest = merge(dest, f2)
//!   dest = merge(dest, f3)      stop at first failure, no rollback
//! ```
//!
//! No deduplication and no schema checks: the merged manifest is exactly
//! A's identity followed by both child lists. Namespace declarations of B's
//! root that A's root lacks are re-declared on each copied child element.

pub mod dom;

#[cfg(test)]
mod tests;

use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

use crate::error::ManifestError;
use crate::utility::encoding::decode_text;
use crate::utility::fs::write::write_atomic;
use dom::{Document, Node};

/// Merges two documents: `a`'s root identity, `a`'s children, then `b`'s.
#[must_use]
pub fn merge(a: &Document, b: &Document) -> Document {
    let declared = a.root().namespace_declarations();
    let missing: Vec<_> = b
        .root()
        .namespace_declarations()
        .into_iter()
        .filter(|decl| !declared.contains(decl))
        .collect();

    let children = a
        .root()
        .children()
        .iter()
        .cloned()
        .chain(b.root().children().iter().map(|node| match node {
            Node::Element(element) if !missing.is_empty() => {
                Node::Element(element.with_declarations(&missing))
            }
            other => other.clone(),
        }))
        .collect();
    Document::new(a.root().with_children(children))
}

/// Reads and parses one manifest file.
///
/// # Errors
///
/// Returns [`ManifestError::Read`] if the file cannot be read and
/// [`ManifestError::Parse`] if it is not well-formed.
pub fn read_document(path: &Path) -> Result<Document, ManifestError> {
    let bytes = std::fs::read(path).map_err(|source| ManifestError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let (text, _) = decode_text(&bytes);
    Document::parse(&text).map_err(|e| ManifestError::Parse {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Writes a document as indented UTF-8, atomically.
///
/// # Errors
///
/// Returns [`ManifestError::Serialize`] or [`ManifestError::Write`].
pub fn write_document(path: &Path, document: &Document) -> Result<(), ManifestError> {
    let xml = document.to_xml().map_err(|e| ManifestError::Serialize {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    write_atomic(path, xml).map_err(|source| ManifestError::Write {
        path: path.display().to_string(),
        source,
    })
}

/// Merges the files `a` and `b` into `destination`.
///
/// Both inputs must parse before anything is written. `destination` may be
/// one of the inputs.
///
/// # Errors
///
/// Returns the first read, parse or write failure.
pub fn merge_files(a: &Path, b: &Path, destination: &Path) -> Result<(), ManifestError> {
    let doc_a = read_document(a)?;
    let doc_b = read_document(b)?;
    write_document(destination, &merge(&doc_a, &doc_b))
}

/// Folds `fragments` into `destination` in order.
///
/// If `destination` does not exist the first fragment is copied verbatim.
/// Every later fragment is merged into the running destination. Returns the
/// number of fragments folded.
///
/// # Errors
///
/// Stops at the first fragment that cannot be read or parsed; the
/// destination keeps whatever earlier folds produced.
#[instrument(level = "debug", skip(fragments), fields(destination = %destination.display(), count = fragments.len()))]
pub fn merge_all(fragments: &[PathBuf], destination: &Path) -> Result<usize, ManifestError> {
    for (index, fragment) in fragments.iter().enumerate() {
        if destination.exists() {
            merge_files(destination, fragment, destination)?;
        } else {
            copy_verbatim(fragment, destination)?;
        }
        debug!(fragment = %fragment.display(), index, "folded manifest fragment");
    }
    Ok(fragments.len())
}

fn copy_verbatim(fragment: &Path, destination: &Path) -> Result<(), ManifestError> {
    let bytes = std::fs::read(fragment).map_err(|source| ManifestError::Read {
        path: fragment.display().to_string(),
        source,
    })?;
    write_atomic(destination, bytes).map_err(|source| ManifestError::Write {
        path: destination.display().to_string(),
        source,
    })
}
