//! Thread identifiers understood by the priority collaborator.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a watched thread.
///
/// On Linux this is the kernel thread id, the value `setpriority` expects.
/// Elsewhere it is a process-unique number assigned on first use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ThreadId(pub u32);

impl ThreadId {
    /// Identifier of the calling thread.
    #[must_use]
    pub fn current() -> Self {
        Self(crate::platform::current_thread_id())
    }
}

impl fmt::Display for ThreadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ThreadId {
    fn from(tid: u32) -> Self {
        Self(tid)
    }
}
