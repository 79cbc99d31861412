//! Scoped registration helpers.

use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::thread_id::ThreadId;
use crate::watcher::ThreadWatcher;

/// Keeps a thread in the watch set until dropped.
///
/// Deregistration also happens when the thread unwinds from a panic.
#[must_use = "the thread stops being watched as soon as the guard is dropped"]
#[derive(Debug)]
pub struct WatchGuard<'a> {
    watcher: &'a ThreadWatcher,
    tid: ThreadId,
}

impl<'a> WatchGuard<'a> {
    pub(crate) fn new(watcher: &'a ThreadWatcher, tid: ThreadId) -> Self {
        watcher.watch_thread(tid);
        Self { watcher, tid }
    }

    /// The watched thread.
    #[must_use]
    pub fn tid(&self) -> ThreadId {
        self.tid
    }
}

impl Drop for WatchGuard<'_> {
    fn drop(&mut self) {
        self.watcher.stop_watching(self.tid);
    }
}

/// Spawn a named thread that is watched for as long as `f` runs.
///
/// # Errors
///
/// Returns the OS error if the thread cannot be spawned.
pub fn spawn_watched<F, T>(
    watcher: &Arc<ThreadWatcher>,
    name: impl Into<String>,
    f: F,
) -> io::Result<JoinHandle<T>>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    let watcher = Arc::clone(watcher);
    thread::Builder::new().name(name.into()).spawn(move || {
        let _guard = watcher.watch_current();
        f()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_registers_and_deregisters() {
        let watcher = ThreadWatcher::default();
        let tid = {
            let guard = watcher.watch_current();
            assert!(watcher.is_watching(guard.tid()));
            guard.tid()
        };
        assert!(!watcher.is_watching(tid));
    }

    #[test]
    fn test_spawn_watched() -> Result<(), Box<dyn std::error::Error>> {
        let watcher = Arc::new(ThreadWatcher::default());
        let inner = Arc::clone(&watcher);
        let handle = spawn_watched(&watcher, "watched-worker", move || {
            inner.is_watching(ThreadId::current())
        })?;
        let was_watched = handle.join().map_err(|_panic| "worker panicked")?;
        assert!(was_watched);
        assert_eq!(watcher.watched_count(), 0);
        Ok(())
    }
}
