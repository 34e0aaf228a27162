// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the scroll tree: node identifiers, flags, overflow styles, and local geometry.

use kurbo::{Rect, Vec2};

/// Identifier for a node in the tree.
///
/// A small, copyable handle made of a slot index and a generation counter.
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed and every `NodeId` pointing at it becomes stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `NodeId`.
///
/// Use [`Tree::is_alive`](crate::Tree::is_alive) to check whether a `NodeId` still refers to a live node.
/// Stale ids never alias a different live node because the generation must match.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    pub(crate) const fn generation(self) -> u32 {
        self.1
    }
}

bitflags::bitflags! {
    /// Node flags controlling display and style participation.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Node generates a box. Without it the node and its subtree measure as zero-sized.
        const DISPLAYED         = 0b0000_0001;
        /// Node has a computed style. Document-like nodes without one report no overflow.
        const STYLED            = 0b0000_0010;
        /// Node is the root element whose scrollbar belongs to the window.
        const VIEWPORT_SCROLLER = 0b0000_0100;
    }
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self::DISPLAYED | Self::STYLED
    }
}

/// Computed value of a CSS-like overflow property.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Overflow {
    /// Content is not clipped.
    #[default]
    Visible,
    /// Content is clipped; no scrollbars, but programmatic scrolling is allowed.
    Hidden,
    /// Content is clipped with no scrolling at all.
    Clip,
    /// Scrollbars are always present.
    Scroll,
    /// Scrollbars appear when content overflows.
    Auto,
}

/// Overflow properties of a node.
///
/// Each property is `None` when unset. The axis-specific properties take precedence
/// over the shorthand when set.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct OverflowStyle {
    /// The `overflow` shorthand.
    pub overflow: Option<Overflow>,
    /// The `overflow-x` longhand.
    pub overflow_x: Option<Overflow>,
    /// The `overflow-y` longhand.
    pub overflow_y: Option<Overflow>,
}

impl OverflowStyle {
    /// Style with both axes set through the shorthand.
    pub const fn both(overflow: Overflow) -> Self {
        Self {
            overflow: Some(overflow),
            overflow_x: None,
            overflow_y: None,
        }
    }

    /// Style with only `overflow-x` set.
    pub const fn x(overflow: Overflow) -> Self {
        Self {
            overflow: None,
            overflow_x: Some(overflow),
            overflow_y: None,
        }
    }

    /// Style with only `overflow-y` set.
    pub const fn y(overflow: Overflow) -> Self {
        Self {
            overflow: None,
            overflow_x: None,
            overflow_y: Some(overflow),
        }
    }
}

/// Local data for a node.
#[derive(Clone, Debug)]
pub struct LocalNode {
    /// Border box in the parent's content space (before the parent's scroll offset is applied).
    /// Roots are placed in document space.
    pub bounds: Rect,
    /// How far this node's content is scrolled. Applies to descendants, not to the node itself.
    pub scroll_offset: Vec2,
    /// Overflow properties.
    pub overflow: OverflowStyle,
    /// Display and style flags.
    pub flags: NodeFlags,
}

impl Default for LocalNode {
    fn default() -> Self {
        Self {
            bounds: Rect::ZERO,
            scroll_offset: Vec2::ZERO,
            overflow: OverflowStyle::default(),
            flags: NodeFlags::default(),
        }
    }
}
