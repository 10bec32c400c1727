//! I/O wrapper that publishes bytes consumed to a [`ProgressState`].
//!
//! [`ProgressReader`] is a "pass-through" middleware: every byte successfully read
//! advances the shared cursor. The overhead is a single atomic addition per `read` call.
//!
//! Read granularity is the caller's choice. The word counter drives it through
//! [`Read::bytes`], so the cursor moves one byte at a time; wrap a buffered reader if
//! the inner source is unbuffered.

use std::io::{self, Read};

use crate::ProgressState;

/// A wrapper around [`Read`] that advances a [`ProgressState`] by the bytes read.
pub struct ProgressReader<R> {
    inner: R,
    progress: ProgressState,
}

impl<R> ProgressReader<R> {
    /// Creates a new `ProgressReader` wrapping `inner` with the given `progress` handle.
    pub const fn new(inner: R, progress: ProgressState) -> Self {
        Self { inner, progress }
    }

    /// Returns the progress handle this reader publishes to.
    pub const fn progress(&self) -> &ProgressState {
        &self.progress
    }
}

impl<R: Read> Read for ProgressReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.progress.advance(n as u64);
        Ok(n)
    }
}
