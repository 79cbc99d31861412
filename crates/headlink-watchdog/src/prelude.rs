//! Prelude for headlink-watchdog.
//!
//! This module re-exports the most commonly used types for convenient importing.
//!
//! # Example
//!
//! ```rust
//! use headlink_watchdog::prelude::*;
//!
//! let watcher = ThreadWatcher::default();
//! watcher.watch_thread(ThreadId::current());
//! assert_eq!(watcher.state(), WatcherState::Uninitialized);
//! ```

pub use crate::config::{ThreadWatcherConfig, ThreadWatcherConfigBuilder};
pub use crate::error::{PriorityError, WatchdogError, WatchdogResult};
pub use crate::guard::{WatchGuard, spawn_watched};
pub use crate::mock::RecordingAdjuster;
pub use crate::priority::{OsPriorityAdjuster, PriorityAdjuster};
pub use crate::stats::SweepStats;
pub use crate::thread_id::ThreadId;
pub use crate::watcher::{ThreadWatcher, WatcherState};
