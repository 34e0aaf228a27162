// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Next-tick queue: one-shot tasks deferred to the next macrotask.
//!
//! All tasks scheduled before a tick fires share a single armed timer. The host
//! arms a platform timer when [`NextTick::is_armed`] flips to `true`, and calls
//! [`NextTick::drain`] when it fires.
//!
//! ```
//! use understory_waypoint::tick::NextTick;
//!
//! let mut q = NextTick::new();
//! let a = q.schedule("a");
//! let b = q.schedule("b");
//! q.cancel(a);
//! let ran: Vec<_> = q.drain().into_iter().map(|(_, t)| t).collect();
//! assert_eq!(ran, ["b"]);
//! assert!(!q.is_pending(b));
//! ```

use alloc::vec::Vec;

/// Handle returned by [`NextTick::schedule`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct TickId(u64);

/// FIFO of one-shot tasks sharing one timer.
#[derive(Clone, Debug)]
pub struct NextTick<T> {
    queue: Vec<(TickId, T)>,
    next: u64,
    armed: bool,
}

impl<T> Default for NextTick<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> NextTick<T> {
    /// Create an empty, disarmed queue.
    pub const fn new() -> Self {
        Self {
            queue: Vec::new(),
            next: 0,
            armed: false,
        }
    }

    /// Queue `task` for the next tick, arming the timer if needed.
    pub fn schedule(&mut self, task: T) -> TickId {
        let id = TickId(self.next);
        self.next += 1;
        self.queue.push((id, task));
        self.armed = true;
        id
    }

    /// Drop a pending task.
    ///
    /// Cancelling an unknown, already cancelled, or already run task does nothing.
    /// The timer is disarmed once nothing is left to run. Returns the task if it was pending.
    pub fn cancel(&mut self, id: TickId) -> Option<T> {
        let index = self.queue.iter().position(|(t, _)| *t == id)?;
        let (_, task) = self.queue.remove(index);
        if self.queue.is_empty() {
            self.armed = false;
        }
        Some(task)
    }

    /// Returns `true` if `id` is still waiting to run.
    pub fn is_pending(&self, id: TickId) -> bool {
        self.queue.iter().any(|(t, _)| *t == id)
    }

    /// Returns `true` while a timer should be outstanding.
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Number of pending tasks.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Returns `true` if nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Fire the tick: disarm and return every pending task in scheduling order.
    ///
    /// Tasks scheduled while the drained ones run go to the following tick.
    pub fn drain(&mut self) -> Vec<(TickId, T)> {
        self.armed = false;
        core::mem::take(&mut self.queue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn run(q: &mut NextTick<u32>, out: &mut Vec<u32>) {
        out.extend(q.drain().into_iter().map(|(_, t)| t));
    }

    #[test]
    fn nothing_runs_before_the_tick() {
        let mut q = NextTick::new();
        q.schedule(0);
        q.schedule(1);
        q.schedule(2);
        assert_eq!(q.len(), 3);
        assert!(q.is_armed());
    }

    #[test]
    fn runs_in_order() {
        let mut q = NextTick::new();
        let mut called = Vec::new();
        q.schedule(0);
        q.schedule(1);
        q.schedule(2);
        run(&mut q, &mut called);
        assert_eq!(called, vec![0, 1, 2]);
        assert!(!q.is_armed());
        assert!(q.is_empty());
    }

    #[test]
    fn cancelled_tasks_do_not_run() {
        let mut q = NextTick::new();
        let mut called = Vec::new();
        q.schedule(0);
        let unsub = q.schedule(1);
        q.schedule(2);
        assert_eq!(q.cancel(unsub), Some(1));
        run(&mut q, &mut called);
        assert_eq!(called, vec![0, 2]);
    }

    #[test]
    fn cancelling_repeatedly_is_harmless() {
        let mut q = NextTick::new();
        let mut called = Vec::new();
        q.schedule(0);
        let unsub = q.schedule(1);
        q.schedule(2);
        q.cancel(unsub);
        assert_eq!(q.cancel(unsub), None);
        assert_eq!(q.cancel(unsub), None);
        run(&mut q, &mut called);
        assert_eq!(called, vec![0, 2]);
    }

    #[test]
    fn cancelling_after_the_task_ran_is_harmless() {
        let mut q = NextTick::new();
        let mut called = Vec::new();
        q.schedule(0);
        let unsub = q.schedule(1);
        q.schedule(2);
        run(&mut q, &mut called);
        assert_eq!(called, vec![0, 1, 2]);

        q.schedule(3);
        q.schedule(4);
        q.schedule(5);
        assert_eq!(q.cancel(unsub), None);
        assert!(q.is_armed());
        run(&mut q, &mut called);
        assert_eq!(called, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn last_cancel_disarms() {
        let mut q = NextTick::new();
        let a = q.schedule(0);
        let b = q.schedule(1);
        q.cancel(a);
        assert!(q.is_armed());
        q.cancel(b);
        assert!(!q.is_armed());
        assert!(q.drain().is_empty());
    }
}
