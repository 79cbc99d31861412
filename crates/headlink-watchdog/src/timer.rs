//! Periodic timer driving the sweep.
//!
//! One dedicated thread waits on a stop channel with a timeout equal to the
//! period. A timeout means "tick"; a stop message or a dropped sender ends
//! the loop.

use crossbeam::channel::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, error};

use crate::error::{WatchdogError, WatchdogResult};

/// A running periodic timer. Dropping it stops the timer.
pub(crate) struct PeriodicTimer {
    period: Duration,
    stop_tx: Sender<()>,
    thread: Option<JoinHandle<()>>,
}

impl PeriodicTimer {
    /// Spawn a timer thread calling `tick` every `period`.
    pub(crate) fn start<F>(name: &str, period: Duration, mut tick: F) -> WatchdogResult<Self>
    where
        F: FnMut() + Send + 'static,
    {
        let (stop_tx, stop_rx) = channel::bounded::<()>(1);
        let thread = thread::Builder::new()
            .name(name.to_string())
            .spawn(move || {
                debug!(period = ?period, "Watch timer thread started");
                loop {
                    match stop_rx.recv_timeout(period) {
                        Err(RecvTimeoutError::Timeout) => tick(),
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                debug!("Watch timer thread stopping");
            })
            .map_err(|e| WatchdogError::timer_spawn(e.to_string()))?;

        Ok(Self {
            period,
            stop_tx,
            thread: Some(thread),
        })
    }

    pub(crate) fn period(&self) -> Duration {
        self.period
    }

    /// Stop the timer and wait for an in-flight tick to finish.
    pub(crate) fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if self.stop_tx.try_send(()).is_err() {
            debug!("Watch timer already signalled");
        }

        let Some(thread) = self.thread.take() else {
            return;
        };
        // Stopping from inside a tick: the loop exits after the tick returns.
        if thread.thread().id() == thread::current().id() {
            return;
        }
        if thread.join().is_err() {
            error!("Watch timer thread panicked");
        }
    }
}

impl Drop for PeriodicTimer {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for PeriodicTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PeriodicTimer")
            .field("period", &self.period)
            .field("running", &self.thread.is_some())
            .finish()
    }
}
