//! Fallback for platforms without per-thread nice values.

use std::cell::Cell;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::error::PriorityError;
use crate::thread_id::ThreadId;

static NEXT_THREAD_ID: AtomicU32 = AtomicU32::new(1);

thread_local! {
    static THREAD_ID: Cell<u32> = const { Cell::new(0) };
}

/// Process-unique id of the caller, assigned on first use.
pub(crate) fn current_thread_id() -> u32 {
    THREAD_ID.with(|id| {
        if id.get() == 0 {
            id.set(NEXT_THREAD_ID.fetch_add(1, Ordering::Relaxed));
        }
        id.get()
    })
}

/// Priority adjustment is unavailable here.
pub(crate) fn lower_priority(_tid: ThreadId, _step: i32) -> Result<i32, PriorityError> {
    Err(PriorityError::Unsupported)
}
