//! Failures reported by a counting run.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Failures a counting run reports to the caller.
///
/// The `Display` text of each variant is the message shown to the user.
#[derive(Debug, Error)]
pub enum Error {
    /// Not exactly one path was supplied.
    #[error("No file specified")]
    Usage,

    /// The path could not be opened as a regular file. Nothing was read.
    #[error("Could not open file")]
    Open {
        /// Path as given by the caller.
        path: PathBuf,
        /// Underlying OS error.
        #[source]
        source: io::Error,
    },

    /// A read failed partway through the file.
    #[error("Could not read file")]
    Read {
        /// Path as given by the caller.
        path: PathBuf,
        /// Underlying OS error.
        #[source]
        source: io::Error,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
