// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Position tracker: compute enter/leave transitions from successive measurements.
//!
//! ## Usage
//!
//! 1) Measure the element with [`measure_bounds`](crate::host::measure_bounds).
//! 2) Call [`PositionTracker::update`] with the snapshot.
//! 3) Deliver the returned [`Transition`]s in order.
//!
//! ```
//! use understory_waypoint::tracker::{CallbackKind, PositionTracker};
//! use understory_waypoint::types::{Bounds, Position};
//!
//! let mut t = PositionTracker::new(true);
//! let below = Bounds { waypoint_top: 300.0, waypoint_bottom: 320.0, viewport_top: 0.0, viewport_bottom: 100.0 };
//! let inside = Bounds { waypoint_top: 50.0, waypoint_bottom: 70.0, ..below };
//!
//! let first = t.update(&below);
//! assert_eq!(first.len(), 1);
//! assert_eq!(first[0].kind, CallbackKind::PositionChange);
//!
//! let kinds: Vec<_> = t.update(&inside).iter().map(|e| e.kind).collect();
//! assert_eq!(kinds, [CallbackKind::PositionChange, CallbackKind::Enter]);
//! assert!(t.update(&inside).is_empty());
//! ```

use alloc::vec::Vec;

use crate::position::classify;
use crate::types::{Bounds, Position};

/// Which user callback a [`Transition`] is delivered to.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum CallbackKind {
    /// Any change of position.
    PositionChange,
    /// The element became [`Position::Inside`].
    Enter,
    /// The element stopped being [`Position::Inside`].
    Leave,
}

/// One callback invocation computed by [`PositionTracker::update`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Transition {
    /// Target callback.
    pub kind: CallbackKind,
    /// Position reported as current.
    pub current: Position,
    /// Position reported as previous; `None` before the first measurement.
    pub previous: Option<Position>,
}

impl Transition {
    const fn new(kind: CallbackKind, current: Position, previous: Option<Position>) -> Self {
        Self {
            kind,
            current,
            previous,
        }
    }
}

/// Remembers the last reported position and diffs new measurements against it.
///
/// Emission order for a change from `previous` to `current`:
/// - `PositionChange(current, previous)`.
/// - `Enter(current, previous)` if `current` is inside, otherwise
///   `Leave(current, previous)` if `previous` was inside.
/// - With rapid-scroll compensation, a jump straight between `Below` and `Above`
///   additionally emits `Enter(Inside, previous)` then `Leave(current, Inside)`,
///   so the skipped pass through the window is still observed. The stored
///   position stays `current`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PositionTracker {
    previous: Option<Position>,
    fire_on_rapid_scroll: bool,
}

impl Default for PositionTracker {
    fn default() -> Self {
        Self::new(true)
    }
}

impl PositionTracker {
    /// Create a tracker with no recorded position.
    pub const fn new(fire_on_rapid_scroll: bool) -> Self {
        Self {
            previous: None,
            fire_on_rapid_scroll,
        }
    }

    /// Last recorded position.
    pub fn previous(&self) -> Option<Position> {
        self.previous
    }

    /// Whether rapid-scroll compensation is on.
    pub fn fire_on_rapid_scroll(&self) -> bool {
        self.fire_on_rapid_scroll
    }

    /// Toggle rapid-scroll compensation. The recorded position is kept.
    pub fn set_fire_on_rapid_scroll(&mut self, enabled: bool) {
        self.fire_on_rapid_scroll = enabled;
    }

    /// Forget the recorded position.
    pub fn reset(&mut self) {
        self.previous = None;
    }

    /// Classify `bounds` and return the transitions from the recorded position.
    pub fn update(&mut self, bounds: &Bounds) -> Vec<Transition> {
        self.update_position(classify(bounds))
    }

    /// Like [`update`](Self::update) for an already classified position.
    pub fn update_position(&mut self, current: Position) -> Vec<Transition> {
        let previous = self.previous;
        // Record first: anything reacting to the transitions sees the new state.
        self.previous = Some(current);

        if previous == Some(current) {
            return Vec::new();
        }

        let mut out = Vec::with_capacity(4);
        out.push(Transition::new(CallbackKind::PositionChange, current, previous));

        if current == Position::Inside {
            out.push(Transition::new(CallbackKind::Enter, current, previous));
        } else if previous == Some(Position::Inside) {
            out.push(Transition::new(CallbackKind::Leave, current, previous));
        }

        let is_rapid_jump = matches!(
            (previous, current),
            (Some(Position::Below), Position::Above) | (Some(Position::Above), Position::Below)
        );
        if self.fire_on_rapid_scroll && is_rapid_jump {
            out.push(Transition::new(CallbackKind::Enter, Position::Inside, previous));
            out.push(Transition::new(
                CallbackKind::Leave,
                current,
                Some(Position::Inside),
            ));
        }

        out
    }
}
