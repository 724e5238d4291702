//! Cooperative single-threaded task scheduling on a virtual clock.
//!
//! RULE: no OS timers and no threads. Time only moves when a driver
//! calls [`Scheduler::pop_due`] (or `run_until`), which makes every
//! timing-dependent behavior in the core replayable in tests.
//!
//! Cancelling a handle removes a task that has not yet fired; a task
//! already popped by the driver is past the point of no return. That
//! is exactly the "in-flight completion survives cancellation"
//! semantics the refresh simulator documents.

use crate::{
    error::{DashError, DashResult},
    types::Millis,
};

/// Opaque handle for cancelling a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskHandle(u64);

#[derive(Debug)]
struct Entry<T> {
    due: Millis,
    seq: u64,
    task: T,
}

/// A queue of (due-time, task) pairs with explicit virtual time.
/// Ties fire in schedule order.
#[derive(Debug)]
pub struct Scheduler<T> {
    now: Millis,
    next_seq: u64,
    entries: Vec<Entry<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self { now: 0, next_seq: 0, entries: Vec::new() }
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> Millis {
        self.now
    }

    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    /// Schedule `task` to fire `delay_ms` from the current virtual now.
    pub fn schedule(&mut self, delay_ms: Millis, task: T) -> TaskHandle {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push(Entry { due: self.now + delay_ms, seq, task });
        TaskHandle(seq)
    }

    /// Remove a not-yet-fired task. Unknown or already-fired handles
    /// are a no-op — cancellation is idempotent by design.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.seq != handle.0);
        self.entries.len() < before
    }

    /// Pop the earliest task due at or before `until`, advancing the
    /// clock to its due time. Returns None (clock advanced to `until`)
    /// once nothing else is due in the window.
    pub fn pop_due(&mut self, until: Millis) -> Option<(Millis, T)> {
        let idx = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due <= until)
            .min_by_key(|(_, e)| (e.due, e.seq))
            .map(|(i, _)| i);
        match idx {
            Some(i) => {
                let entry = self.entries.remove(i);
                self.now = self.now.max(entry.due);
                Some((entry.due, entry.task))
            }
            None => {
                self.now = self.now.max(until);
                None
            }
        }
    }

    /// Advance to `t`, feeding each due task to `handler` together
    /// with the scheduler itself (so handlers can schedule and cancel).
    pub fn run_until(
        &mut self,
        t: Millis,
        mut handler: impl FnMut(&mut Self, Millis, T),
    ) -> DashResult<()> {
        if t < self.now {
            return Err(DashError::Schedule(format!(
                "run_until({t}) would move time backwards from {}",
                self.now
            )));
        }
        while let Some((due, task)) = self.pop_due(t) {
            handler(self, due, task);
        }
        Ok(())
    }
}
