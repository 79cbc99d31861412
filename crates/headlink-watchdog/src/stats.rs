//! Sweep statistics.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Counters accumulated across sweeps.
///
/// All counters saturate instead of wrapping.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SweepStats {
    /// Number of completed sweeps.
    pub sweeps: u64,
    /// Sum of the watch-set sizes seen by each sweep.
    pub threads_observed: u64,
    /// Successful priority reductions.
    pub demotions: u64,
    /// Failed priority reductions.
    pub failures: u64,
    /// Watch-set size at the most recent sweep.
    pub last_watched: usize,
    /// Timestamp of the most recent sweep.
    #[serde(skip)]
    pub last_sweep: Option<Instant>,
}

impl SweepStats {
    /// Create empty statistics.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one completed sweep.
    pub fn record_sweep(&mut self, watched: usize, demotions: u64, failures: u64) {
        self.sweeps = self.sweeps.saturating_add(1);
        self.threads_observed = self
            .threads_observed
            .saturating_add(u64::try_from(watched).unwrap_or(u64::MAX));
        self.demotions = self.demotions.saturating_add(demotions);
        self.failures = self.failures.saturating_add(failures);
        self.last_watched = watched;
        self.last_sweep = Some(Instant::now());
    }

    /// Time since the most recent sweep, if any.
    #[must_use]
    pub fn since_last_sweep(&self) -> Option<Duration> {
        self.last_sweep.map(|at| at.elapsed())
    }

    /// Share of attempted reductions that failed, as a percentage.
    ///
    /// Returns 0.0 if nothing was attempted.
    #[must_use]
    #[expect(clippy::cast_precision_loss, reason = "approximate ratio")]
    pub fn failure_rate(&self) -> f64 {
        let attempts = self.demotions.saturating_add(self.failures);
        if attempts == 0 {
            0.0
        } else {
            (self.failures as f64 / attempts as f64) * 100.0
        }
    }
}
