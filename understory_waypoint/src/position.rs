// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Position classification and scroll progress.
//!
//! ## Classification
//!
//! [`classify`] maps one [`Bounds`] snapshot to exactly one [`Position`]:
//!
//! 1. A zero-extent visible window is [`Position::Invisible`].
//! 2. Leading edge inside the window is [`Position::Inside`].
//! 3. Trailing edge inside the window is [`Position::Inside`].
//! 4. Element spanning the whole window is [`Position::Inside`].
//! 5. Element entirely past the trailing edge is [`Position::Below`].
//! 6. Element entirely behind the leading edge is [`Position::Above`].
//!
//! Any partial overlap wins over `Above`/`Below`, even when most of the element is outside.
//! Window edges are inclusive.
//!
//! ```
//! use understory_waypoint::position::classify;
//! use understory_waypoint::types::{Bounds, Position};
//!
//! let b = Bounds { waypoint_top: 300.0, waypoint_bottom: 320.0, viewport_top: 0.0, viewport_bottom: 100.0 };
//! assert_eq!(classify(&b), Position::Below);
//! let b = Bounds { waypoint_top: 50.0, ..b };
//! assert_eq!(classify(&b), Position::Inside);
//! ```

use crate::types::{Bounds, Position};

/// Classify `bounds` into a [`Position`].
///
/// Total for finite inputs. Non-finite inputs never panic; a NaN edge falls
/// through every comparison to [`Position::Invisible`].
pub fn classify(bounds: &Bounds) -> Position {
    let Bounds {
        waypoint_top,
        waypoint_bottom,
        viewport_top,
        viewport_bottom,
    } = *bounds;

    if viewport_bottom - viewport_top == 0.0 {
        return Position::Invisible;
    }

    // leading edge within the window
    if viewport_top <= waypoint_top && waypoint_top <= viewport_bottom {
        return Position::Inside;
    }

    // trailing edge within the window
    if viewport_top <= waypoint_bottom && waypoint_bottom <= viewport_bottom {
        return Position::Inside;
    }

    // spans the window on both sides
    if waypoint_top <= viewport_top && viewport_bottom <= waypoint_bottom {
        return Position::Inside;
    }

    if viewport_bottom < waypoint_top {
        return Position::Below;
    }

    if waypoint_top < viewport_top {
        return Position::Above;
    }

    Position::Invisible
}

/// Scroll progress of the element through the visible window, in `[0, 1]`.
///
/// `0` while the element's trailing edge has not yet passed the far side of the
/// window (still below), rising to `1` once its trailing edge is behind the
/// leading edge (above). Zero extents count as `1` so the ratio is always defined.
pub fn progress(bounds: &Bounds) -> f64 {
    let viewport = non_zero_or_one(bounds.viewport_extent());
    let waypoint = non_zero_or_one(bounds.waypoint_extent());
    let distance = viewport + waypoint;
    let traveled = bounds.waypoint_bottom - bounds.viewport_top;
    1.0 - (traveled / distance).clamp(0.0, 1.0)
}

fn non_zero_or_one(v: f64) -> f64 {
    if v == 0.0 || v.is_nan() { 1.0 } else { v }
}

impl Bounds {
    /// Shorthand for [`classify`].
    #[inline]
    pub fn position(&self) -> Position {
        classify(self)
    }

    /// Shorthand for [`progress`].
    #[inline]
    pub fn progress(&self) -> f64 {
        progress(self)
    }
}
