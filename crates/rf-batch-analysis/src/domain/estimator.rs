//! # Duration Estimator
//!
//! Projects remaining batch time for progress messages. Seeded with a
//! fixed per-item estimate so the first progress message has an ETA
//! before any measurement exists, then refined with a cumulative average
//! of observed durations.

use std::time::Duration;

/// Per-item estimate used before any sample has been recorded.
pub const INITIAL_ITEM_ESTIMATE: Duration = Duration::from_secs(20);

/// Cumulative-average duration estimator.
#[derive(Debug, Clone)]
pub struct DurationEstimator {
    average: Duration,
    samples: u32,
}

impl DurationEstimator {
    /// Estimator seeded with [`INITIAL_ITEM_ESTIMATE`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            average: INITIAL_ITEM_ESTIMATE,
            samples: 0,
        }
    }

    /// Record one measured item duration.
    pub fn record(&mut self, duration: Duration) {
        // The seed is not a sample; the first measurement replaces it.
        let total = self.average.as_secs_f64() * f64::from(self.samples) + duration.as_secs_f64();
        self.samples += 1;
        self.average = Duration::from_secs_f64(total / f64::from(self.samples));
    }

    /// Current per-item average.
    #[must_use]
    pub fn average(&self) -> Duration {
        self.average
    }

    /// Projected minutes for `remaining` items, rounded up.
    #[must_use]
    pub fn eta_minutes(&self, remaining: usize) -> u64 {
        let seconds = self.average.as_secs_f64() * remaining as f64;
        (seconds / 60.0).ceil() as u64
    }
}

impl Default for DurationEstimator {
    fn default() -> Self {
        Self::new()
    }
}
