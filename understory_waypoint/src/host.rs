// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host capabilities and bounds measurement.
//!
//! ## Overview
//!
//! The engine never touches a document directly. A host (a browser binding, a
//! retained UI tree, a test fixture) provides four small capabilities:
//!
//! - [`ScrollLookup`]: parents and computed overflow, for ancestor resolution.
//! - [`Measure`]: client rects, layout sizes, and the window size.
//! - [`EventRegistry`]: scroll/resize listener registration.
//! - [`TickScheduler`]: one-shot deferral of the initial measurement.
//!
//! [`Host`] is the combination, implemented for every type providing all four.
//!
//! [`measure_bounds`] turns measurements into a [`Bounds`] snapshot.

use kurbo::{Rect, Size};

use crate::ancestor::ScrollLookup;
use crate::offset::{Offset, compute_offset_pixels};
use crate::types::{Axis, Bounds, EventKind, ScrollContainer};

/// Geometry reads.
pub trait Measure<N> {
    /// Border box of `node` relative to the window viewport origin.
    ///
    /// Returns `None` if `node` is detached or otherwise cannot be measured.
    fn client_rect(&self, node: &N) -> Option<Rect>;

    /// Layout size of `node` (`offsetWidth`/`offsetHeight`).
    fn offset_size(&self, node: &N) -> Option<Size>;

    /// Inner size of the window, or `None` when there is no window (for example
    /// while rendering on a server).
    fn viewport_size(&self) -> Option<Size>;
}

/// Listener registration.
///
/// Each call to [`subscribe`](EventRegistry::subscribe) yields a handle that is
/// later passed back to [`unsubscribe`](EventRegistry::unsubscribe) exactly once.
pub trait EventRegistry<N> {
    /// Handle identifying one registration.
    type Subscription;

    /// Start delivering `kind` notifications from `target`.
    fn subscribe(&mut self, target: ScrollContainer<N>, kind: EventKind) -> Self::Subscription;

    /// Stop the registration identified by `subscription`.
    fn unsubscribe(&mut self, subscription: Self::Subscription);
}

/// One-shot deferral to the next macrotask.
pub trait TickScheduler {
    /// Handle identifying one scheduled tick.
    type Tick: Copy + Eq + core::fmt::Debug;

    /// Schedule a tick. The host later reports it back through
    /// [`Waypoint::on_tick`](crate::waypoint::Waypoint::on_tick).
    fn schedule_tick(&mut self) -> Self::Tick;

    /// Cancel a tick that has not fired. Cancelling twice, or after it fired, is a no-op.
    fn cancel_tick(&mut self, tick: Self::Tick);
}

/// Everything a [`Waypoint`](crate::waypoint::Waypoint) needs from its environment.
pub trait Host<N>: ScrollLookup<N> + Measure<N> + EventRegistry<N> + TickScheduler {}

impl<N, T> Host<N> for T where T: ScrollLookup<N> + Measure<N> + EventRegistry<N> + TickScheduler {}

/// Measure `node` against `container` along `axis`.
///
/// - The element's edges come from its client rect.
/// - A [`ScrollContainer::Window`] spans `[0, inner size]`; a node container spans its
///   client-rect leading edge plus its layout size.
/// - Offsets are resolved against the container extent on every call. An offset
///   that fails to parse contributes zero pixels.
///
/// Returns `None` if any measurement is unavailable.
pub fn measure_bounds<N, M>(
    host: &M,
    node: &N,
    container: &ScrollContainer<N>,
    axis: Axis,
    top_offset: &Offset,
    bottom_offset: &Offset,
) -> Option<Bounds>
where
    M: Measure<N> + ?Sized,
{
    let (waypoint_top, waypoint_bottom) = axis.span(host.client_rect(node)?);

    let (context_height, context_scroll_top) = match container {
        ScrollContainer::Window => (axis.extent(host.viewport_size()?), 0.0),
        ScrollContainer::Node(c) => {
            let extent = axis.extent(host.offset_size(c)?);
            let (leading, _) = axis.span(host.client_rect(c)?);
            (extent, leading)
        }
    };

    let top_px = compute_offset_pixels(top_offset, context_height).unwrap_or(0.0);
    let bottom_px = compute_offset_pixels(bottom_offset, context_height).unwrap_or(0.0);
    let context_bottom = context_scroll_top + context_height;

    Some(Bounds {
        waypoint_top,
        waypoint_bottom,
        viewport_top: context_scroll_top + top_px,
        viewport_bottom: context_bottom - bottom_px,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed {
        window: Option<Size>,
    }

    // Node 0 is the tracked element, node 1 a scroll container, node 2 is detached.
    impl Measure<u32> for Fixed {
        fn client_rect(&self, node: &u32) -> Option<Rect> {
            match node {
                0 => Some(Rect::new(10.0, 150.0, 60.0, 170.0)),
                1 => Some(Rect::new(5.0, 100.0, 305.0, 300.0)),
                _ => None,
            }
        }

        fn offset_size(&self, node: &u32) -> Option<Size> {
            (*node == 1).then_some(Size::new(300.0, 200.0))
        }

        fn viewport_size(&self) -> Option<Size> {
            self.window
        }
    }

    const WINDOW: Fixed = Fixed {
        window: Some(Size::new(800.0, 600.0)),
    };

    #[test]
    fn window_container_spans_the_viewport() {
        let b = measure_bounds(
            &WINDOW,
            &0,
            &ScrollContainer::Window,
            Axis::Vertical,
            &Offset::default(),
            &Offset::default(),
        )
        .unwrap();
        assert_eq!(
            b,
            Bounds {
                waypoint_top: 150.0,
                waypoint_bottom: 170.0,
                viewport_top: 0.0,
                viewport_bottom: 600.0,
            }
        );
    }

    #[test]
    fn node_container_uses_its_leading_edge_and_layout_size() {
        let b = measure_bounds(
            &WINDOW,
            &0,
            &ScrollContainer::Node(1),
            Axis::Vertical,
            &Offset::from("10%"),
            &Offset::from("25px"),
        )
        .unwrap();
        assert_eq!(b.viewport_top, 120.0);
        assert_eq!(b.viewport_bottom, 275.0);
    }

    #[test]
    fn horizontal_axis_reads_x_edges_and_widths() {
        let b = measure_bounds(
            &WINDOW,
            &0,
            &ScrollContainer::Node(1),
            Axis::Horizontal,
            &Offset::default(),
            &Offset::from(-5.0),
        )
        .unwrap();
        assert_eq!(
            b,
            Bounds {
                waypoint_top: 10.0,
                waypoint_bottom: 60.0,
                viewport_top: 5.0,
                viewport_bottom: 310.0,
            }
        );
    }

    #[test]
    fn unparseable_offsets_count_as_zero() {
        let b = measure_bounds(
            &WINDOW,
            &0,
            &ScrollContainer::Window,
            Axis::Vertical,
            &Offset::from("bogus"),
            &Offset::from("12em"),
        )
        .unwrap();
        assert_eq!(b.viewport_top, 0.0);
        assert_eq!(b.viewport_bottom, 600.0);
    }

    #[test]
    fn missing_measurements_yield_none() {
        let detached = measure_bounds(
            &WINDOW,
            &2,
            &ScrollContainer::Window,
            Axis::Vertical,
            &Offset::default(),
            &Offset::default(),
        );
        assert!(detached.is_none());

        let no_window = Fixed { window: None };
        let b = measure_bounds(
            &no_window,
            &0,
            &ScrollContainer::Window,
            Axis::Vertical,
            &Offset::default(),
            &Offset::default(),
        );
        assert!(b.is_none());

        let detached_container = measure_bounds(
            &WINDOW,
            &0,
            &ScrollContainer::Node(2),
            Axis::Vertical,
            &Offset::default(),
            &Offset::default(),
        );
        assert!(detached_container.is_none());
    }
}
