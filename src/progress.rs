//! Shared byte-progress state between the counting and rendering threads.
//!
//! [`ProgressState`] follows a "Hot/Cold" split:
//!
//! * **Hot Data:** the byte cursor and the finished flag live in atomics. The counter
//!   bumps the cursor once per byte, so this path never takes a lock.
//! * **Cold Data:** the label, an error message and the stop time sit behind an
//!   [`RwLock`](parking_lot::RwLock). They change at most once per run.
//!
//! The total is fixed at construction and never changes afterwards.
//!
//! # Snapshots
//!
//! The renderer never reads the atomics piecemeal; it calls [`ProgressState::snapshot`]
//! and works from the resulting [`ProgressSnapshot`].

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicU64, Ordering},
    },
    time::Duration,
};

use compact_str::CompactString;
use parking_lot::RwLock;
use web_time::Instant;

/// A thread-safe, cloneable handle to the progress of one counting run.
///
/// Cloning is cheap (Arc bump) and every clone observes the same cursor.
#[derive(Clone)]
pub struct ProgressState {
    /// When the run started. Used only for elapsed/throughput reporting.
    pub(crate) start: Instant,

    /// Number of bytes the run is expected to consume. Immutable.
    pub(crate) total: u64,

    /// Infrequently accessed metadata (label, error state, stop time).
    pub(crate) cold: Arc<RwLock<Cold>>,

    // Only ever advanced with `fetch_add`, so readers see a non-decreasing value.
    pub(crate) current: Arc<AtomicU64>,
    pub(crate) finished: Arc<AtomicBool>,
}

/// "Cold" storage for metadata that changes infrequently.
pub struct Cold {
    pub(crate) label: CompactString,
    pub(crate) stopped: Option<Instant>,
    pub(crate) error: Option<CompactString>,
}

impl ProgressState {
    /// Creates a new state with the cursor at zero.
    ///
    /// # Parameters
    ///
    /// * `label`: A label for the run, usually the file path.
    /// * `total`: The number of bytes expected. Zero means "nothing to wait for".
    pub fn new(label: impl Into<CompactString>, total: u64) -> Self {
        Self {
            start: Instant::now(),
            total,
            cold: Arc::new(RwLock::new(Cold {
                label: label.into(),
                stopped: None,
                error: None,
            })),
            current: Arc::new(AtomicU64::new(0)),
            finished: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Gets the label of the run.
    #[must_use]
    pub fn label(&self) -> CompactString {
        self.cold.read().label.clone()
    }

    /// Returns the error message, if the run failed.
    #[must_use]
    pub fn error(&self) -> Option<CompactString> {
        self.cold.read().error.clone()
    }

    /// Advances the cursor by `amount` bytes.
    ///
    /// This uses `Ordering::Relaxed`; a single atomic location is still observed in
    /// modification order, so no reader can see the cursor move backwards.
    pub fn advance(&self, amount: u64) {
        self.current.fetch_add(amount, Ordering::Relaxed);
    }

    /// Gets the number of bytes consumed so far.
    #[must_use]
    pub fn current(&self) -> u64 {
        self.current.load(Ordering::Relaxed)
    }

    /// Gets the expected total.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Checks if the producer has stopped advancing the cursor.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        // Acquire pairs with the Release in `finish`: the final cursor value is visible.
        self.finished.load(Ordering::Acquire)
    }

    /// Duration since creation, or between creation and [`finish`](Self::finish).
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.cold
            .read()
            .stopped
            .map_or_else(|| self.start.elapsed(), |stopped| stopped.duration_since(self.start))
    }

    /// Marks the run as finished and records the stop time.
    pub fn finish(&self) {
        self.cold.write().stopped.replace(Instant::now());
        self.finished.store(true, Ordering::Release);
    }

    /// Records an error message and marks the run as finished.
    pub fn finish_with_error(&self, error: impl Into<CompactString>) {
        self.cold.write().error = Some(error.into());
        self.finish();
    }

    /// Creates a consistent snapshot of the current state.
    ///
    /// The finished flag is read before the cursor, so a snapshot that reports
    /// `finished` always carries the final byte count.
    #[must_use]
    pub fn snapshot(&self) -> ProgressSnapshot {
        self.into()
    }
}

/// A plain-data view of a [`ProgressState`] at one instant.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProgressSnapshot {
    label: CompactString,
    elapsed: Duration,
    current: u64,
    total: u64,
    finished: bool,
    error: Option<CompactString>,
}

impl From<&ProgressState> for ProgressSnapshot {
    fn from(state: &ProgressState) -> Self {
        let finished = state.is_finished();
        let current = state.current();

        let cold = state.cold.read();
        let label = cold.label.clone();
        let error = cold.error.clone();
        drop(cold);

        Self {
            label,
            elapsed: state.elapsed(),
            current,
            total: state.total,
            finished,
            error,
        }
    }
}

impl ProgressSnapshot {
    /// Builds a snapshot from raw values.
    #[must_use]
    pub fn new(current: u64, total: u64, finished: bool) -> Self {
        Self {
            current,
            total,
            finished,
            ..Self::default()
        }
    }

    /// Returns the label of the run.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the elapsed duration at the time of the snapshot.
    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Returns the number of bytes consumed.
    #[must_use]
    pub const fn current(&self) -> u64 {
        self.current
    }

    /// Returns the expected total.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Returns whether the producer had finished.
    #[must_use]
    pub const fn finished(&self) -> bool {
        self.finished
    }

    /// Returns the error message, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Fraction of the total consumed.
    ///
    /// A zero total counts as complete (`1.0`) instead of dividing by zero. The value is
    /// not clamped: a file that grew while being read can report more than `1.0`.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.current as f64 / self.total as f64
        }
    }

    /// Calculates the average throughput (bytes per second) over the run.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn throughput(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.current as f64 / secs
        } else {
            0.0
        }
    }
}
