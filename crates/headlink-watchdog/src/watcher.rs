//! The thread watcher.
//!
//! A [`ThreadWatcher`] keeps a set of thread ids and, while its timer runs,
//! sweeps that set once per period, asking the [`PriorityAdjuster`] to lower
//! the priority of every member. A thread stays penalized until it calls
//! [`ThreadWatcher::stop_watching`], so long-running work that registered
//! itself degrades gradually instead of starving the rest of the process.
//!
//! Membership is a set: watching twice and unwatching once leaves the thread
//! unwatched. Sweeps work on a snapshot, so a thread that deregisters while a
//! sweep is in progress may receive at most that one last adjustment.

use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, trace, warn};

use crate::config::ThreadWatcherConfig;
use crate::error::{WatchdogError, WatchdogResult};
use crate::guard::WatchGuard;
use crate::priority::{OsPriorityAdjuster, PriorityAdjuster};
use crate::stats::SweepStats;
use crate::thread_id::ThreadId;
use crate::timer::PeriodicTimer;

/// Name of the timer thread.
pub const TIMER_THREAD_NAME: &str = "thread-watch-timer";

/// Lifecycle of the watch timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WatcherState {
    /// The timer has never been started.
    Uninitialized,
    /// The timer is firing.
    Running,
    /// The timer was stopped.
    Stopped,
}

/// State shared with the timer thread.
struct Shared {
    threads: Mutex<BTreeSet<ThreadId>>,
    adjuster: Arc<dyn PriorityAdjuster>,
    reduce_priority: RwLock<bool>,
    stats: Mutex<SweepStats>,
}

impl Shared {
    /// One sweep over a snapshot of the watch set.
    fn on_timeout(&self) {
        let snapshot: Vec<ThreadId> = self.threads.lock().iter().copied().collect();
        let reduce_priority = *self.reduce_priority.read();

        let mut demoted = 0u64;
        let mut failed = 0u64;
        if reduce_priority {
            for &tid in &snapshot {
                match self.adjuster.lower_priority(tid) {
                    Ok(()) => {
                        demoted = demoted.saturating_add(1);
                        trace!(tid = %tid, "Watched thread demoted");
                    }
                    Err(err) => {
                        failed = failed.saturating_add(1);
                        warn!(tid = %tid, error = %err, "Failed to lower thread priority");
                    }
                }
            }
        }

        self.stats.lock().record_sweep(snapshot.len(), demoted, failed);
        debug!(
            watched = snapshot.len(),
            demoted,
            failed,
            reduce_priority,
            "Watch sweep complete"
        );
    }
}

struct TimerSlot {
    state: WatcherState,
    timer: Option<PeriodicTimer>,
}

/// Periodically demotes the priority of registered threads.
///
/// # Thread Safety
///
/// All methods take `&self` and may be called from any thread, including
/// from the watched threads themselves. Share the watcher through an `Arc`;
/// there is no global instance.
///
/// Dropping the watcher stops the timer and waits for an in-flight sweep.
pub struct ThreadWatcher {
    config: ThreadWatcherConfig,
    shared: Arc<Shared>,
    timer: Mutex<TimerSlot>,
}

impl ThreadWatcher {
    /// Create a watcher that adjusts priorities through the OS scheduler.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid.
    pub fn new(config: ThreadWatcherConfig) -> WatchdogResult<Self> {
        let adjuster = Arc::new(OsPriorityAdjuster::new(config.niceness_step));
        Self::with_adjuster(config, adjuster)
    }

    /// Create a watcher with a custom priority collaborator.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid.
    pub fn with_adjuster(
        config: ThreadWatcherConfig,
        adjuster: Arc<dyn PriorityAdjuster>,
    ) -> WatchdogResult<Self> {
        config.validate()?;
        Ok(Self::from_parts(config, adjuster))
    }

    fn from_parts(config: ThreadWatcherConfig, adjuster: Arc<dyn PriorityAdjuster>) -> Self {
        Self {
            shared: Arc::new(Shared {
                threads: Mutex::new(BTreeSet::new()),
                adjuster,
                reduce_priority: RwLock::new(config.reduce_priority),
                stats: Mutex::new(SweepStats::new()),
            }),
            config,
            timer: Mutex::new(TimerSlot {
                state: WatcherState::Uninitialized,
                timer: None,
            }),
        }
    }

    /// Start the timer with the configured sweep period.
    ///
    /// # Errors
    ///
    /// Returns an error if the timer thread cannot be spawned.
    pub fn start(&self) -> WatchdogResult<()> {
        self.start_watch_timer(self.config.sweep_period)
    }

    /// Start the watch timer with the given period.
    ///
    /// A running timer is stopped first, waiting for any in-flight sweep,
    /// and replaced. The first sweep happens one period after this call.
    ///
    /// # Errors
    ///
    /// Returns [`WatchdogError::InvalidTimeout`] for a zero period, or
    /// [`WatchdogError::TimerSpawn`] if the timer thread cannot be spawned.
    pub fn start_watch_timer(&self, period: Duration) -> WatchdogResult<()> {
        if period.is_zero() {
            return Err(WatchdogError::InvalidTimeout(period));
        }

        let mut slot = self.timer.lock();
        if let Some(previous) = slot.timer.take() {
            debug!(period = ?previous.period(), "Replacing running watch timer");
            previous.stop();
            slot.state = WatcherState::Stopped;
        }

        let shared = Arc::clone(&self.shared);
        let timer = PeriodicTimer::start(TIMER_THREAD_NAME, period, move || shared.on_timeout())?;
        slot.timer = Some(timer);
        slot.state = WatcherState::Running;
        info!(period = ?period, "Thread watch timer started");
        Ok(())
    }

    /// Stop the watch timer. No sweep runs after this returns.
    ///
    /// Idempotent; has no effect on a watcher that was never started.
    pub fn stop_watch_timer(&self) {
        let mut slot = self.timer.lock();
        if let Some(timer) = slot.timer.take() {
            timer.stop();
            slot.state = WatcherState::Stopped;
            info!("Thread watch timer stopped");
        }
    }

    /// Add `tid` to the watch set. Idempotent.
    pub fn watch_thread(&self, tid: ThreadId) {
        if self.shared.threads.lock().insert(tid) {
            debug!(tid = %tid, "Watching thread");
        }
    }

    /// Remove `tid` from the watch set. Idempotent.
    pub fn stop_watching(&self, tid: ThreadId) {
        if self.shared.threads.lock().remove(&tid) {
            debug!(tid = %tid, "Stopped watching thread");
        }
    }

    /// Watch the calling thread until the returned guard is dropped.
    pub fn watch_current(&self) -> WatchGuard<'_> {
        WatchGuard::new(self, ThreadId::current())
    }

    /// Whether `tid` is in the watch set.
    #[must_use]
    pub fn is_watching(&self, tid: ThreadId) -> bool {
        self.shared.threads.lock().contains(&tid)
    }

    /// Number of watched threads.
    #[must_use]
    pub fn watched_count(&self) -> usize {
        self.shared.threads.lock().len()
    }

    /// Watched thread ids in ascending order.
    #[must_use]
    pub fn watched_threads(&self) -> Vec<ThreadId> {
        self.shared.threads.lock().iter().copied().collect()
    }

    /// Current timer state.
    #[must_use]
    pub fn state(&self) -> WatcherState {
        self.timer.lock().state
    }

    /// Whether the timer is running.
    #[must_use]
    pub fn is_timer_running(&self) -> bool {
        self.state() == WatcherState::Running
    }

    /// Period of the running timer.
    #[must_use]
    pub fn period(&self) -> Option<Duration> {
        self.timer.lock().timer.as_ref().map(PeriodicTimer::period)
    }

    /// Whether sweeps lower priorities.
    #[must_use]
    pub fn reduce_priority(&self) -> bool {
        *self.shared.reduce_priority.read()
    }

    /// Enable or disable priority reduction. Takes effect on the next sweep.
    pub fn set_reduce_priority(&self, enabled: bool) {
        *self.shared.reduce_priority.write() = enabled;
        info!(enabled, "Priority reduction toggled");
    }

    /// Snapshot of the sweep statistics.
    #[must_use]
    pub fn stats(&self) -> SweepStats {
        self.shared.stats.lock().clone()
    }

    /// Configuration the watcher was created with.
    #[must_use]
    pub fn config(&self) -> &ThreadWatcherConfig {
        &self.config
    }

    /// Run one sweep on the calling thread.
    ///
    /// Behaves exactly like a timer expiry; useful to drive the watcher
    /// deterministically.
    pub fn sweep_now(&self) {
        self.shared.on_timeout();
    }
}

impl Default for ThreadWatcher {
    fn default() -> Self {
        let config = ThreadWatcherConfig::default();
        let adjuster = Arc::new(OsPriorityAdjuster::new(config.niceness_step));
        Self::from_parts(config, adjuster)
    }
}

impl std::fmt::Debug for ThreadWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThreadWatcher")
            .field("config", &self.config)
            .field("state", &self.state())
            .field("watched_count", &self.watched_count())
            .field("reduce_priority", &self.reduce_priority())
            .finish_non_exhaustive()
    }
}
