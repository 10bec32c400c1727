//! Runtime settings for a counting run.

use std::time::Duration;

/// Default upper bound on the time between two renderer samples.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Settings for the progress renderer.
///
/// The bar width is fixed; only the sampling cadence is tunable.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RenderConfig {
    /// Longest the renderer sleeps between samples. Output does not depend on it.
    pub poll_interval: Duration,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl RenderConfig {
    /// Sets the poll interval.
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }
}
