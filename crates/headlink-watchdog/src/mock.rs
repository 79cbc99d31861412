//! Test double for the priority collaborator.

use parking_lot::Mutex;
use std::collections::BTreeSet;

use crate::error::PriorityError;
use crate::priority::PriorityAdjuster;
use crate::thread_id::ThreadId;

/// Adjuster that records every call instead of touching the scheduler.
///
/// Threads marked with [`fail_for`](Self::fail_for) get a permission error;
/// the call is still recorded.
#[derive(Debug, Default)]
pub struct RecordingAdjuster {
    calls: Mutex<Vec<ThreadId>>,
    failing: Mutex<BTreeSet<ThreadId>>,
}

impl RecordingAdjuster {
    /// Create an adjuster with no recorded calls.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every future call for `tid` fail.
    pub fn fail_for(&self, tid: ThreadId) {
        self.failing.lock().insert(tid);
    }

    /// Let calls for `tid` succeed again.
    pub fn succeed_for(&self, tid: ThreadId) {
        self.failing.lock().remove(&tid);
    }

    /// All recorded calls in order.
    #[must_use]
    pub fn calls(&self) -> Vec<ThreadId> {
        self.calls.lock().clone()
    }

    /// Number of calls recorded for `tid`.
    #[must_use]
    pub fn calls_for(&self, tid: ThreadId) -> usize {
        self.calls.lock().iter().filter(|&&call| call == tid).count()
    }

    /// Total number of recorded calls.
    #[must_use]
    pub fn total_calls(&self) -> usize {
        self.calls.lock().len()
    }

    /// Forget all recorded calls.
    pub fn clear(&self) {
        self.calls.lock().clear();
    }
}

impl PriorityAdjuster for RecordingAdjuster {
    fn lower_priority(&self, tid: ThreadId) -> Result<(), PriorityError> {
        self.calls.lock().push(tid);
        if self.failing.lock().contains(&tid) {
            return Err(PriorityError::Os {
                tid,
                source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
            });
        }
        Ok(())
    }
}
