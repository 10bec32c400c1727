//! File size lookup.

use std::{fs, path::Path};

/// Returns the size of the file at `path` in bytes, or `0` if it cannot be stat'ed.
///
/// A zero result does not mean the file is missing; an empty file also yields zero.
/// Existence is decided by opening the file, not by this probe.
#[must_use]
pub fn file_size(path: impl AsRef<Path>) -> u64 {
    match fs::metadata(path.as_ref()) {
        Ok(meta) => meta.len(),
        Err(err) => {
            log::debug!("stat {} failed: {err}", path.as_ref().display());
            0
        }
    }
}
