//! Single-slot deferred task scheduler.

use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Whether a rescan is waiting on the debounce timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshState {
    Idle,
    PendingRescan,
}

/// Holds at most one armed timer.
///
/// [`Debouncer::arm`] replaces whatever timer is armed, so a burst of
/// calls results in a single run, `delay` after the last call. Once the
/// timer fires the task is detached: re-arming afterwards never cancels a
/// task that has already started.
#[derive(Debug)]
pub struct Debouncer {
    handle: Handle,
    slot: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    /// Creates a debouncer whose timers run on `handle`.
    pub fn new(handle: Handle) -> Self {
        Self {
            handle,
            slot: Mutex::new(None),
        }
    }

    /// Schedules `task` to start after `delay`, cancelling any armed timer.
    pub fn arm<F, Fut>(&self, delay: Duration, task: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let mut slot = self.lock();
        if let Some(previous) = slot.take() {
            previous.abort();
        }

        let runtime = self.handle.clone();
        *slot = Some(self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            runtime.spawn(task());
        }));
    }

    /// Cancels the armed timer. Returns `true` if one was pending.
    pub fn cancel(&self) -> bool {
        match self.lock().take() {
            Some(pending) => {
                let was_pending = !pending.is_finished();
                pending.abort();
                was_pending
            }
            None => false,
        }
    }

    pub fn state(&self) -> RefreshState {
        match self.lock().as_ref() {
            Some(pending) if !pending.is_finished() => RefreshState::PendingRescan,
            _ => RefreshState::Idle,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
