// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event throttling hooks.
//!
//! The engine recomputes on every event it is handed. Rate limiting is the
//! host's business: either install a [`Throttle`] on the waypoint, which is
//! consulted before each event-driven recompute, or collect events in a
//! [`Coalescer`] and hand the latest one over once per frame.
//!
//! ```
//! use understory_waypoint::throttle::{Coalescer, Throttle};
//!
//! // Admit every other event.
//! let mut n = 0_u32;
//! let mut every_other = move |_: &u32| { n += 1; n % 2 == 1 };
//! assert!(every_other.admit(&10));
//! assert!(!every_other.admit(&11));
//!
//! let mut c = Coalescer::new();
//! c.push(1);
//! c.push(2);
//! assert_eq!(c.take(), Some(2));
//! assert_eq!(c.take(), None);
//! ```

/// Decides whether an incoming event triggers a recompute.
pub trait Throttle<E> {
    /// Returns `true` to recompute for `event` now.
    fn admit(&mut self, event: &E) -> bool;

    /// Drop any pending state. Called when the waypoint detaches.
    fn cancel(&mut self) {}
}

impl<E, F> Throttle<E> for F
where
    F: FnMut(&E) -> bool,
{
    fn admit(&mut self, event: &E) -> bool {
        self(event)
    }
}

/// Keeps only the most recent of a burst of events.
#[derive(Clone, Debug)]
pub struct Coalescer<E> {
    pending: Option<E>,
}

impl<E> Default for Coalescer<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Coalescer<E> {
    /// Create an empty coalescer.
    pub const fn new() -> Self {
        Self { pending: None }
    }

    /// Record `event`, replacing anything pending. Returns `true` if nothing was pending,
    /// meaning the host should request a flush.
    pub fn push(&mut self, event: E) -> bool {
        self.pending.replace(event).is_none()
    }

    /// Take the pending event, if any.
    pub fn take(&mut self) -> Option<E> {
        self.pending.take()
    }

    /// Returns `true` if an event is waiting.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop the pending event.
    pub fn clear(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_throttles() {
        let mut seen = 0;
        let mut t = |e: &i32| {
            seen += 1;
            *e > 0
        };
        assert!(t.admit(&1));
        assert!(!t.admit(&-1));
        Throttle::<i32>::cancel(&mut t);
        drop(t);
        assert_eq!(seen, 2);
    }

    #[test]
    fn coalescer_keeps_latest() {
        let mut c = Coalescer::new();
        assert!(c.push('a'));
        assert!(!c.push('b'));
        assert!(!c.push('c'));
        assert!(c.is_pending());
        assert_eq!(c.take(), Some('c'));
        assert!(!c.is_pending());
        assert!(c.push('d'));
        c.clear();
        assert_eq!(c.take(), None);
    }
}
