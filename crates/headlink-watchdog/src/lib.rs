//! # headlink-watchdog
//!
//! Thread watchdog for the headlink middleware.
//!
//! Worker threads that may run for a long time register with a
//! [`ThreadWatcher`]. While the watcher's timer runs, every period it lowers
//! the scheduling priority of each registered thread by one step. A thread
//! that finishes its work deregisters and is left alone; one that keeps
//! running sinks further with every period, so it cannot starve
//! latency-sensitive threads.
//!
//! ## Architecture
//!
//! - [`watcher`] - The watch set, the sweep and timer control
//! - [`guard`] - Scoped registration and watched thread spawning
//! - [`priority`] - The priority-adjustment collaborator
//! - [`config`] - Watcher configuration and builder
//! - [`stats`] - Sweep counters
//! - [`mock`] - Recording collaborator for tests
//! - [`error`] - Watchdog-specific error types
//!
//! ## Example
//!
//! ```rust
//! use headlink_watchdog::prelude::*;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! # fn main() -> Result<(), WatchdogError> {
//! let adjuster = Arc::new(RecordingAdjuster::new());
//! let watcher = ThreadWatcher::with_adjuster(ThreadWatcherConfig::default(), adjuster.clone())?;
//!
//! watcher.start_watch_timer(Duration::from_secs(60))?;
//! {
//!     let _guard = watcher.watch_current();
//!     watcher.sweep_now();
//! }
//! watcher.stop_watch_timer();
//!
//! assert_eq!(adjuster.total_calls(), 1);
//! assert_eq!(watcher.watched_count(), 0);
//! # Ok(())
//! # }
//! ```

#![deny(
    unsafe_op_in_unsafe_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::panic,
    missing_docs,
    missing_debug_implementations
)]
#![warn(clippy::pedantic)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod config;
pub mod error;
pub mod guard;
pub mod mock;
pub mod priority;
pub mod stats;
pub mod thread_id;
pub mod watcher;

mod platform;
mod timer;

pub mod prelude;

pub use config::{DEFAULT_SWEEP_PERIOD, ThreadWatcherConfig, ThreadWatcherConfigBuilder};
pub use error::{PriorityError, WatchdogError, WatchdogResult};
pub use guard::{WatchGuard, spawn_watched};
pub use mock::RecordingAdjuster;
pub use platform::MAX_NICE;
pub use priority::{OsPriorityAdjuster, PriorityAdjuster};
pub use stats::SweepStats;
pub use thread_id::ThreadId;
pub use watcher::{TIMER_THREAD_NAME, ThreadWatcher, WatcherState};
