// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! What a waypoint measures.
//!
//! Content is resolved once, at construction, into a closed set of
//! [`TrackedContent`] variants. Each variant says where the tracked node comes from.

use alloc::vec::Vec;

use crate::error::WaypointError;

/// One child handed to a waypoint.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Child {
    /// A host element; its node is the tracked node.
    Element,
    /// A composite component.
    Component {
        /// Whether the component hands a host node back through a reference.
        forwards_ref: bool,
    },
}

/// Raw content as supplied by the caller.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Children {
    /// No content; the waypoint renders a zero-size anchor of its own.
    #[default]
    None,
    /// A render callback that receives the node reference.
    Render,
    /// Child elements. Exactly one is accepted.
    Elements(Vec<Child>),
}

/// Resolved content.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum TrackedContent {
    /// The waypoint's own anchor node.
    Anchor,
    /// A single host element.
    DirectNode,
    /// A single component that forwards a node reference.
    RefForwarding,
    /// A render callback wiring the reference itself.
    RenderCallback,
}

impl TrackedContent {
    /// Resolve `children`.
    ///
    /// # Errors
    ///
    /// - [`WaypointError::InvalidChildren`] for an element list that is empty or has several entries.
    /// - [`WaypointError::MissingNodeRef`] for a component that does not forward a reference.
    pub fn from_children(children: &Children) -> Result<Self, WaypointError> {
        match children {
            Children::None => Ok(Self::Anchor),
            Children::Render => Ok(Self::RenderCallback),
            Children::Elements(list) => match list.as_slice() {
                [Child::Element] => Ok(Self::DirectNode),
                [Child::Component { forwards_ref: true }] => Ok(Self::RefForwarding),
                [Child::Component { forwards_ref: false }] => Err(WaypointError::MissingNodeRef),
                _ => Err(WaypointError::InvalidChildren),
            },
        }
    }

    /// Returns `true` when the node arrives through a reference the content must wire up.
    pub const fn requires_ref(self) -> bool {
        matches!(self, Self::RefForwarding | Self::RenderCallback)
    }

    /// Check that reference-based content registered a node once mounted.
    ///
    /// Anchors and direct elements always get their node from the waypoint itself,
    /// so a missing node there only means layout has not happened yet.
    ///
    /// # Errors
    ///
    /// [`WaypointError::MissingNodeRef`] if the content requires a reference and none was registered.
    pub fn ensure_node<N>(self, node: Option<&N>) -> Result<(), WaypointError> {
        if self.requires_ref() && node.is_none() {
            return Err(WaypointError::MissingNodeRef);
        }
        Ok(())
    }
}
