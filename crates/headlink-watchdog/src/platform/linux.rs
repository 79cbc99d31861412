//! Linux implementation backed by `gettid` and `setpriority`.
//!
//! Linux keeps a nice value per thread, so `PRIO_PROCESS` with a thread id
//! adjusts only that thread.

#![expect(unsafe_code, reason = "libc thread id and priority calls")]

use super::MAX_NICE;
use crate::error::PriorityError;
use crate::thread_id::ThreadId;

/// Kernel thread id of the caller.
pub(crate) fn current_thread_id() -> u32 {
    // SAFETY: SYS_gettid takes no arguments and always succeeds.
    let tid = unsafe { libc::syscall(libc::SYS_gettid) };
    u32::try_from(tid).unwrap_or_default()
}

/// Raise the nice value of `tid` by `step`, saturating at [`MAX_NICE`].
///
/// Returns the nice value in effect afterwards. Thread id 0 is rejected:
/// the kernel reads it as "the calling thread", which would demote the timer.
pub(crate) fn lower_priority(tid: ThreadId, step: i32) -> Result<i32, PriorityError> {
    if tid.0 == 0 {
        return Err(PriorityError::Os {
            tid,
            source: std::io::Error::from(std::io::ErrorKind::InvalidInput),
        });
    }
    let who = libc::id_t::from(tid.0);

    // getpriority may legitimately return -1; errno is the only failure signal.
    // SAFETY: __errno_location has no preconditions.
    let errno = unsafe { libc::__errno_location() };
    // SAFETY: errno points at this thread's errno, valid for the thread's lifetime.
    unsafe { *errno = 0 };
    // SAFETY: getpriority only reads its integer arguments.
    let current = unsafe { libc::getpriority(libc::PRIO_PROCESS, who) };
    if current == -1 {
        let err = std::io::Error::last_os_error();
        if err.raw_os_error().is_some_and(|code| code != 0) {
            return Err(PriorityError::Os { tid, source: err });
        }
    }

    let target = current.saturating_add(step).min(MAX_NICE);
    if target == current {
        return Ok(current);
    }

    // SAFETY: setpriority only reads its integer arguments.
    if unsafe { libc::setpriority(libc::PRIO_PROCESS, who, target) } != 0 {
        return Err(PriorityError::last_os_error(tid));
    }
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gettid_is_nonzero() {
        assert_ne!(current_thread_id(), 0);
    }

    #[test]
    fn test_lowering_own_priority_succeeds() {
        // Raising one's own nice value needs no privilege.
        let handle = std::thread::spawn(|| {
            let tid = ThreadId(current_thread_id());
            let first = lower_priority(tid, 1)?;
            let second = lower_priority(tid, 1)?;
            Ok::<_, PriorityError>((first, second))
        });
        let result = handle.join();
        assert!(matches!(result, Ok(Ok((first, second))) if second >= first));
    }

    #[test]
    fn test_thread_id_zero_rejected() {
        let result = lower_priority(ThreadId(0), 1);
        assert!(matches!(
            &result,
            Err(PriorityError::Os { tid: ThreadId(0), source })
                if source.kind() == std::io::ErrorKind::InvalidInput
        ));
    }

    #[test]
    fn test_unknown_thread_fails() {
        let result = lower_priority(ThreadId(0x7FFF_FFF0), 1);
        assert!(matches!(result, Err(PriorityError::Os { .. })));
    }
}
