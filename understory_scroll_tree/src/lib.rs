// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_scroll_tree --heading-base-level=0

//! Understory Scroll Tree: a Kurbo-native retained tree of scroll containers.
//!
//! This crate answers the questions a visibility tracker asks of a document,
//! without a browser:
//!
//! - Who is my parent? ([`Tree::parent`])
//! - What are my overflow properties, if I have a computed style? ([`Tree::overflow`])
//! - Where is my border box relative to the window viewport? ([`Tree::client_rect`])
//! - How large is my layout box? ([`Tree::offset_size`])
//! - How large is the window? ([`Tree::viewport_size`])
//!
//! ## Not a layout engine
//!
//! Upstream code positions boxes. Each [`LocalNode`] carries its border box in
//! the parent's content space, a scroll offset applied to its descendants,
//! overflow properties, and [`NodeFlags`]. Viewport-relative geometry is
//! derived on demand by walking the parent chain, so updates are cheap and
//! never need a commit step.
//!
//! ## API overview
//!
//! - [`Tree`]: container managing nodes, the window viewport size, and the window scroll.
//! - [`LocalNode`]: per-node data (bounds, scroll offset, overflow, flags).
//! - [`NodeFlags`]: display, style, and viewport-scroller bits.
//! - [`Overflow`] / [`OverflowStyle`]: computed overflow values with shorthand fallback.
//! - [`NodeId`]: generational handle of a node.
//!
//! ## Example
//!
//! ```
//! use understory_scroll_tree::{LocalNode, Overflow, OverflowStyle, Tree};
//! use kurbo::{Rect, Size, Vec2};
//!
//! let mut tree = Tree::with_viewport(Size::new(800.0, 600.0));
//! let body = tree.insert(
//!     None,
//!     LocalNode { bounds: Rect::new(0.0, 0.0, 800.0, 2000.0), ..Default::default() },
//! );
//! let list = tree.insert(
//!     Some(body),
//!     LocalNode {
//!         bounds: Rect::new(0.0, 100.0, 300.0, 400.0),
//!         overflow: OverflowStyle::y(Overflow::Auto),
//!         ..Default::default()
//!     },
//! );
//! let row = tree.insert(
//!     Some(list),
//!     LocalNode { bounds: Rect::new(0.0, 500.0, 300.0, 520.0), ..Default::default() },
//! );
//!
//! assert_eq!(tree.client_rect(row), Some(Rect::new(0.0, 600.0, 300.0, 620.0)));
//!
//! // Scroll the list by 450px: the row is now inside the list's visible window.
//! tree.set_scroll_offset(list, Vec2::new(0.0, 450.0));
//! assert_eq!(tree.client_rect(row), Some(Rect::new(0.0, 150.0, 300.0, 170.0)));
//! assert_eq!(tree.offset_size(list), Some(Size::new(300.0, 300.0)));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod tree;
mod types;

pub use tree::Tree;
pub use types::{LocalNode, NodeFlags, NodeId, Overflow, OverflowStyle};
