// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scrollable-ancestor resolution.
//!
//! ## Overview
//!
//! A waypoint is judged against the visible window of its nearest scrollable
//! ancestor. [`find_scrollable_ancestor`] walks parent-by-parent from the
//! tracked node, reading the overflow property for the tracked axis
//! (`overflow-y` or `overflow-x`, falling back to the `overflow` shorthand),
//! and stops at the first `auto` or `scroll` container. When none is found the
//! window is used.
//!
//! The tree is reached through [`ScrollLookup`]; this module performs no DOM access itself.
//!
//! ```
//! use understory_waypoint::ancestor::{
//!     Overflow, OverflowProperty, ScrollLookup, ScrollableAncestor, find_scrollable_ancestor,
//! };
//! use understory_waypoint::types::{Axis, ScrollContainer};
//!
//! // 3 → 2 → 1, where 2 scrolls vertically.
//! struct Doc;
//! impl ScrollLookup<u32> for Doc {
//!     fn parent_of(&self, n: &u32) -> Option<u32> { (*n > 1).then(|| n - 1) }
//!     fn overflow(&self, n: &u32, p: OverflowProperty) -> Option<Overflow> {
//!         (*n == 2 && p == OverflowProperty::OverflowY).then_some(Overflow::Auto)
//!     }
//! }
//!
//! let found = find_scrollable_ancestor(&Doc, &3, &ScrollableAncestor::Auto, Axis::Vertical);
//! assert_eq!(found, ScrollContainer::Node(2));
//! let found = find_scrollable_ancestor(&Doc, &3, &ScrollableAncestor::Auto, Axis::Horizontal);
//! assert_eq!(found, ScrollContainer::Window);
//! ```

use crate::types::{Axis, ScrollContainer};

/// Computed value of an overflow property.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Overflow {
    /// `visible`
    Visible,
    /// `hidden`
    Hidden,
    /// `clip`
    Clip,
    /// `scroll`
    Scroll,
    /// `auto`
    Auto,
}

impl Overflow {
    /// Returns `true` for `auto` and `scroll`, the values that make a user-scrollable container.
    #[inline]
    pub const fn is_scrollable(self) -> bool {
        matches!(self, Self::Auto | Self::Scroll)
    }
}

/// Overflow properties a resolver can read.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum OverflowProperty {
    /// The `overflow` shorthand.
    Overflow,
    /// `overflow-x`
    OverflowX,
    /// `overflow-y`
    OverflowY,
}

impl OverflowProperty {
    /// The longhand read for `axis`.
    #[inline]
    pub const fn for_axis(axis: Axis) -> Self {
        match axis {
            Axis::Vertical => Self::OverflowY,
            Axis::Horizontal => Self::OverflowX,
        }
    }
}

/// Tree access needed to resolve a scrollable ancestor.
pub trait ScrollLookup<N> {
    /// Returns the parent of `node`, or `None` at the top of the tree.
    fn parent_of(&self, node: &N) -> Option<N>;

    /// Computed value of `property` on `node`.
    ///
    /// Returns `None` when the property is unset or `node` has no computed style.
    fn overflow(&self, node: &N, property: OverflowProperty) -> Option<Overflow>;

    /// Returns `true` for the node whose scrollbar belongs to the window
    /// (the document root element). Such nodes are skipped during the walk.
    fn is_viewport_scroller(&self, _node: &N) -> bool {
        false
    }
}

/// Configured scroll container for a waypoint.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum ScrollableAncestor<N> {
    /// Walk up from the tracked node to find one.
    #[default]
    Auto,
    /// Always use the window. This is the value the `"window"` sentinel string resolves to.
    Window,
    /// Always use this node.
    Node(N),
}

impl<N> ScrollableAncestor<N> {
    /// Sentinel string that selects [`ScrollableAncestor::Window`] in string-typed configuration.
    pub const WINDOW_SENTINEL: &'static str = "window";

    /// Resolve a string-typed ancestor setting. Only the window sentinel is accepted.
    pub fn from_sentinel(text: &str) -> Option<Self> {
        (text == Self::WINDOW_SENTINEL).then_some(Self::Window)
    }
}

/// Find the container `start` is judged against.
///
/// An explicit `configured` ancestor is returned verbatim without walking.
pub fn find_scrollable_ancestor<N, L>(
    lookup: &L,
    start: &N,
    configured: &ScrollableAncestor<N>,
    axis: Axis,
) -> ScrollContainer<N>
where
    N: Clone,
    L: ScrollLookup<N> + ?Sized,
{
    match configured {
        ScrollableAncestor::Window => return ScrollContainer::Window,
        ScrollableAncestor::Node(n) => return ScrollContainer::Node(n.clone()),
        ScrollableAncestor::Auto => {}
    }

    let property = OverflowProperty::for_axis(axis);
    let mut cur = lookup.parent_of(start);
    while let Some(node) = cur {
        if !lookup.is_viewport_scroller(&node) {
            let overflow = lookup
                .overflow(&node, property)
                .or_else(|| lookup.overflow(&node, OverflowProperty::Overflow));
            if overflow.is_some_and(Overflow::is_scrollable) {
                return ScrollContainer::Node(node);
            }
        }
        cur = lookup.parent_of(&node);
    }
    ScrollContainer::Window
}
