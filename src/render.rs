//! Fixed-width text progress bar.
//!
//! The bar is sampled, not event-driven: [`render_until_complete`] polls the shared
//! [`ProgressState`], converts each [`ProgressSnapshot`] into a marker target and
//! catches up to it. How often it polls has no effect on the characters printed.
//!
//! Markers are `-`, except every [`MARKER_STRIDE`]th one (1-based), which is `+`:
//!
//! ```text
//! ---------+---------+---------+---------+---------+
//! ```

use std::{
    io::{self, Write},
    thread,
};

use crate::{ProgressSnapshot, ProgressState, config::RenderConfig};

/// Number of markers in a complete bar.
pub const BAR_WIDTH: u32 = 50;

/// Every marker at a multiple of this (1-based) index is drawn as `+`.
pub const MARKER_STRIDE: u32 = 10;

/// Character drawn at 1-based marker position `index`.
#[must_use]
pub const fn marker(index: u32) -> u8 {
    if index % MARKER_STRIDE == 0 { b'+' } else { b'-' }
}

/// Number of markers a snapshot calls for, in `0..=BAR_WIDTH`.
///
/// A finished snapshot always calls for the full bar, as does a zero total.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn target_markers(snapshot: &ProgressSnapshot) -> u32 {
    if snapshot.finished() {
        return BAR_WIDTH;
    }
    let scaled = (snapshot.fraction() * f64::from(BAR_WIDTH)).floor();
    scaled.clamp(0.0, f64::from(BAR_WIDTH)) as u32
}

/// Incremental bar writer.
///
/// Remembers how many markers have been written, so each snapshot only adds the
/// difference and the bar never exceeds [`BAR_WIDTH`].
#[derive(Debug, Default)]
pub struct BarRenderer {
    emitted: u32,
}

impl BarRenderer {
    /// Creates a renderer with an empty bar.
    #[must_use]
    pub const fn new() -> Self {
        Self { emitted: 0 }
    }

    /// Markers written so far.
    #[must_use]
    pub const fn emitted(&self) -> u32 {
        self.emitted
    }

    /// Whether the full bar has been written.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.emitted >= BAR_WIDTH
    }

    /// Writes the markers `snapshot` calls for that are not on screen yet, then flushes.
    ///
    /// Returns the number of markers written by this call.
    ///
    /// # Errors
    ///
    /// Propagates write and flush errors from `out`.
    pub fn catch_up<W: Write + ?Sized>(
        &mut self,
        snapshot: &ProgressSnapshot,
        out: &mut W,
    ) -> io::Result<u32> {
        let target = target_markers(snapshot);
        let before = self.emitted;

        while self.emitted < target {
            self.emitted += 1;
            out.write_all(&[marker(self.emitted)])?;
        }
        out.flush()?;

        Ok(self.emitted - before)
    }
}

/// Polls `progress` and draws the bar on `out` until all markers are written, then
/// terminates the line.
///
/// Between samples the thread parks for at most `config.poll_interval`; unparking it
/// forces an immediate re-sample. Returns once the snapshot reaches a fraction of
/// `1.0` or the producer marks the state finished.
///
/// # Errors
///
/// Propagates write errors from `out`. Rendering stops at the first failure.
pub fn render_until_complete<W: Write + ?Sized>(
    progress: &ProgressState,
    config: &RenderConfig,
    out: &mut W,
) -> io::Result<()> {
    let mut bar = BarRenderer::new();
    let mut samples: u64 = 0;
    log::debug!(
        "rendering {} ({} bytes)",
        progress.label(),
        progress.total()
    );

    loop {
        let snapshot = progress.snapshot();
        samples += 1;
        bar.catch_up(&snapshot, out)?;

        if bar.is_complete() || snapshot.fraction() >= 1.0 {
            break;
        }

        thread::park_timeout(config.poll_interval);
    }

    out.write_all(b"\n")?;
    out.flush()?;

    log::debug!("bar complete after {samples} samples");
    Ok(())
}
