// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types: axes, positions, measurement snapshots, and scroll containers.
//!
//! ## Overview
//!
//! These types describe one measurement of a tracked element against its scroll container.
//! They are produced by [`measure_bounds`](crate::host::measure_bounds), classified by
//! [`classify`](crate::position::classify), and delivered to callbacks through
//! [`CallbackArgs`](crate::waypoint::CallbackArgs).

use kurbo::{Rect, Size};

/// Axis along which visibility is tracked.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Axis {
    /// Track top/bottom edges against vertical scrolling.
    #[default]
    Vertical,
    /// Track left/right edges against horizontal scrolling.
    Horizontal,
}

impl Axis {
    /// Leading and trailing edge of `rect` along this axis.
    #[inline]
    pub fn span(self, rect: Rect) -> (f64, f64) {
        match self {
            Self::Vertical => (rect.y0, rect.y1),
            Self::Horizontal => (rect.x0, rect.x1),
        }
    }

    /// Extent of `size` along this axis.
    #[inline]
    pub fn extent(self, size: Size) -> f64 {
        match self {
            Self::Vertical => size.height,
            Self::Horizontal => size.width,
        }
    }
}

/// Position of the tracked element relative to the visible window of its scroll container.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Position {
    /// Entirely behind the leading edge; already scrolled past.
    Above,
    /// Entirely past the trailing edge; not yet scrolled to.
    Below,
    /// At least partially overlapping the visible window.
    Inside,
    /// The visible window has zero extent, so visibility cannot be judged.
    Invisible,
}

impl Position {
    /// Stable lowercase name, suitable for logs and framework bindings.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Above => "above",
            Self::Below => "below",
            Self::Inside => "inside",
            Self::Invisible => "invisible",
        }
    }
}

impl core::fmt::Display for Position {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One measurement snapshot along the tracked axis.
///
/// All values are in the viewport coordinate frame. `waypoint_bottom >= waypoint_top`
/// is not guaranteed, but every value is expected to be finite. A zero
/// `viewport_bottom - viewport_top` marks a collapsed container.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Bounds {
    /// Leading edge of the tracked element.
    pub waypoint_top: f64,
    /// Trailing edge of the tracked element.
    pub waypoint_bottom: f64,
    /// Leading edge of the visible window, after the top offset.
    pub viewport_top: f64,
    /// Trailing edge of the visible window, after the bottom offset.
    pub viewport_bottom: f64,
}

impl Bounds {
    /// Extent of the visible window.
    #[inline]
    pub fn viewport_extent(&self) -> f64 {
        self.viewport_bottom - self.viewport_top
    }

    /// Extent of the tracked element.
    #[inline]
    pub fn waypoint_extent(&self) -> f64 {
        self.waypoint_bottom - self.waypoint_top
    }
}

/// The container whose visible window the tracked element is judged against.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ScrollContainer<N> {
    /// The global window viewport.
    Window,
    /// A scrollable element.
    Node(N),
}

/// Kinds of notifications a waypoint listens for.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum EventKind {
    /// The scroll container scrolled.
    Scroll,
    /// The window was resized.
    Resize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_selects_edges() {
        let r = Rect::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(Axis::Vertical.span(r), (2.0, 4.0));
        assert_eq!(Axis::Horizontal.span(r), (1.0, 3.0));
        let s = Size::new(640.0, 480.0);
        assert_eq!(Axis::Vertical.extent(s), 480.0);
        assert_eq!(Axis::Horizontal.extent(s), 640.0);
        assert_eq!(Axis::default(), Axis::Vertical);
    }

    #[test]
    fn position_names_are_stable() {
        assert_eq!(Position::Above.as_str(), "above");
        assert_eq!(Position::Below.as_str(), "below");
        assert_eq!(Position::Inside.as_str(), "inside");
        assert_eq!(Position::Invisible.as_str(), "invisible");
        assert_eq!(alloc::format!("{}", Position::Inside), "inside");
    }
}
