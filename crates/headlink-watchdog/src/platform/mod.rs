//! Platform-specific thread identity and priority control.

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "linux")]
pub(crate) use linux::{current_thread_id, lower_priority};

#[cfg(not(target_os = "linux"))]
mod fallback;

#[cfg(not(target_os = "linux"))]
pub(crate) use fallback::{current_thread_id, lower_priority};

/// Highest (least favourable) nice value.
pub const MAX_NICE: i32 = 19;
