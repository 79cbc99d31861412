//! Priority-adjustment collaborator.
//!
//! The watcher never touches the scheduler directly. Each sweep hands every
//! watched [`ThreadId`] to a [`PriorityAdjuster`]; production code uses
//! [`OsPriorityAdjuster`], tests plug in [`RecordingAdjuster`](crate::mock::RecordingAdjuster)
//! or a closure.

use crate::error::PriorityError;
use crate::platform;
use crate::thread_id::ThreadId;

/// Lowers the scheduling priority of a thread.
///
/// Implementations are called from the timer thread and must not block for
/// long.
pub trait PriorityAdjuster: Send + Sync {
    /// Lower the priority of `tid` by one step.
    ///
    /// # Errors
    ///
    /// Returns an error if the adjustment failed; the watcher logs it and
    /// tries again on the next sweep.
    fn lower_priority(&self, tid: ThreadId) -> Result<(), PriorityError>;
}

impl<F> PriorityAdjuster for F
where
    F: Fn(ThreadId) -> Result<(), PriorityError> + Send + Sync,
{
    fn lower_priority(&self, tid: ThreadId) -> Result<(), PriorityError> {
        self(tid)
    }
}

/// Adjuster backed by the operating system scheduler.
///
/// On Linux each call raises the thread's nice value by `niceness_step`,
/// saturating at 19. Other platforms report [`PriorityError::Unsupported`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OsPriorityAdjuster {
    niceness_step: i32,
}

impl OsPriorityAdjuster {
    /// Create an adjuster raising nice values by `niceness_step`.
    #[must_use]
    pub fn new(niceness_step: i32) -> Self {
        Self { niceness_step }
    }

    /// Nice increment applied per call.
    #[must_use]
    pub fn niceness_step(&self) -> i32 {
        self.niceness_step
    }
}

impl Default for OsPriorityAdjuster {
    fn default() -> Self {
        Self::new(1)
    }
}

impl PriorityAdjuster for OsPriorityAdjuster {
    fn lower_priority(&self, tid: ThreadId) -> Result<(), PriorityError> {
        let nice = platform::lower_priority(tid, self.niceness_step)?;
        tracing::trace!(tid = %tid, nice, "Thread priority lowered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_adjuster() {
        let adjuster = |tid: ThreadId| {
            if tid.0 % 2 == 0 {
                Ok(())
            } else {
                Err(PriorityError::Unsupported)
            }
        };
        assert!(matches!(adjuster.lower_priority(ThreadId(2)), Ok(_)));
        assert!(matches!(adjuster.lower_priority(ThreadId(3)), Err(_)));
    }

    #[test]
    fn test_os_adjuster_rejects_thread_id_zero() {
        let result = OsPriorityAdjuster::default().lower_priority(ThreadId(0));
        if cfg!(target_os = "linux") {
            assert!(matches!(result, Err(PriorityError::Os { tid: ThreadId(0), .. })));
        } else {
            assert!(matches!(result, Err(PriorityError::Unsupported)));
        }
    }

    #[test]
    fn test_os_adjuster_on_own_thread() {
        let handle = std::thread::spawn(|| {
            OsPriorityAdjuster::default().lower_priority(ThreadId::current())
        });
        let result = handle.join();
        if cfg!(target_os = "linux") {
            assert!(matches!(result, Ok(Ok(()))));
        } else {
            assert!(matches!(result, Ok(Err(PriorityError::Unsupported))));
        }
    }
}
