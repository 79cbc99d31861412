//! Error types for the thread watchdog.
//!
//! Only configuration and timer start-up can fail from a caller's point of
//! view. Failures during a sweep are reported as [`PriorityError`] to the
//! watcher, which logs them and retries on the next period.

use std::time::Duration;
use thiserror::Error;

use crate::thread_id::ThreadId;

/// Errors returned by watchdog configuration and timer control.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WatchdogError {
    /// The watch timer period must be non-zero.
    #[error("Invalid watch timer period: {0:?}")]
    InvalidTimeout(Duration),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The timer thread could not be spawned.
    #[error("Failed to spawn watch timer thread: {0}")]
    TimerSpawn(String),
}

impl WatchdogError {
    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_configuration(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration(reason.into())
    }

    /// Create a timer spawn error.
    #[must_use]
    pub fn timer_spawn(reason: impl Into<String>) -> Self {
        Self::TimerSpawn(reason.into())
    }
}

/// A specialized `Result` type for watchdog operations.
pub type WatchdogResult<T> = std::result::Result<T, WatchdogError>;

/// Failure of the OS priority-adjustment collaborator.
#[derive(Debug, Error)]
pub enum PriorityError {
    /// The operating system refused the adjustment.
    #[error("Failed to lower priority of thread {tid}: {source}")]
    Os {
        /// Thread whose priority was being lowered.
        tid: ThreadId,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },

    /// Priority adjustment is not available on this platform.
    #[error("Thread priority adjustment is not supported on this platform")]
    Unsupported,
}

impl PriorityError {
    /// Capture the last OS error for `tid`.
    #[must_use]
    pub fn last_os_error(tid: ThreadId) -> Self {
        Self::Os {
            tid,
            source: std::io::Error::last_os_error(),
        }
    }
}
