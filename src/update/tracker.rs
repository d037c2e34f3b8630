//! Dispatch tracker: counting barrier over outstanding hash jobs
//!
//! Every dispatch increments the in-flight count and every finished job
//! decrements it. The tracker is idle once the walker has marked traversal
//! done and the count is back at zero; only then may the result conduit be
//! closed.

use parking_lot::Mutex;
use tokio::sync::Notify;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TrackerSnapshot {
    pub in_flight: u64,
    pub dispatched: u64,
    pub completed: u64,
    pub traversal_done: bool,
}

impl TrackerSnapshot {
    pub fn is_idle(&self) -> bool {
        self.traversal_done && self.in_flight == 0
    }
}

#[derive(Debug, Default)]
pub struct DispatchTracker {
    state: Mutex<TrackerSnapshot>,
    idle: Notify,
}

impl DispatchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one dispatched unit of work
    pub fn dispatch(&self) {
        let mut state = self.state.lock();
        state.in_flight += 1;
        state.dispatched += 1;
    }

    /// Record one finished unit (record sent or unit dropped)
    pub fn complete(&self) {
        let idle = {
            let mut state = self.state.lock();
            debug_assert!(state.in_flight > 0, "complete() without matching dispatch()");
            state.in_flight = state.in_flight.saturating_sub(1);
            state.completed += 1;
            state.is_idle()
        };
        if idle {
            self.idle.notify_waiters();
        }
    }

    /// Mark the filesystem walk as returned
    pub fn finish_traversal(&self) {
        let idle = {
            let mut state = self.state.lock();
            state.traversal_done = true;
            state.is_idle()
        };
        if idle {
            self.idle.notify_waiters();
        }
    }

    pub fn snapshot(&self) -> TrackerSnapshot {
        *self.state.lock()
    }

    pub fn is_idle(&self) -> bool {
        self.state.lock().is_idle()
    }

    /// Wait until traversal is done and no unit is in flight
    pub async fn wait_idle(&self) {
        loop {
            // Register before checking so a wakeup between the check and the
            // await is not lost.
            let notified = self.idle.notified();
            if self.is_idle() {
                return;
            }
            notified.await;
        }
    }
}

/// Marks traversal done when dropped, so a failing walk still releases waiters
pub struct TraversalGuard<'a> {
    tracker: &'a DispatchTracker,
}

impl<'a> TraversalGuard<'a> {
    pub fn new(tracker: &'a DispatchTracker) -> Self {
        Self { tracker }
    }
}

impl Drop for TraversalGuard<'_> {
    fn drop(&mut self) {
        self.tracker.finish_traversal();
    }
}
