// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: structure, updates, queries.

use alloc::vec::Vec;
use kurbo::{Rect, Size, Vec2};

use crate::types::{LocalNode, NodeFlags, NodeId, OverflowStyle};

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

/// Retained tree of boxes inside a window viewport.
pub struct Tree {
    nodes: Vec<Option<Node>>, // slots
    generations: Vec<u32>,    // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    viewport: Size,
    window_scroll: Vec2,
}

impl core::fmt::Debug for Tree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        let free = self.free_list.len();
        f.debug_struct("Tree")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &free)
            .field("viewport", &self.viewport)
            .field("window_scroll", &self.window_scroll)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug)]
struct Node {
    generation: u32,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    local: LocalNode,
}

impl Node {
    fn new(generation: u32, local: LocalNode) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            local,
        }
    }
}

impl Tree {
    /// Create an empty tree with a zero-sized viewport.
    pub fn new() -> Self {
        Self::with_viewport(Size::ZERO)
    }

    /// Create an empty tree whose window viewport has the given inner size.
    pub fn with_viewport(viewport: Size) -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            viewport,
            window_scroll: Vec2::ZERO,
        }
    }

    /// Insert a new node as a child of `parent` (or as a root if `None`).
    pub fn insert(&mut self, parent: Option<NodeId>, local: LocalNode) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, local));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, local)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        let id = NodeId::new(idx, generation);
        if let Some(p) = parent.filter(|p| self.is_alive(*p)) {
            self.link_parent(id, p);
        }
        id
    }

    /// Remove a node (and its subtree) from the tree.
    pub fn remove(&mut self, id: NodeId) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(parent) = self.node(id).parent {
            self.unlink_parent(id, parent);
        }
        let children = self.node(id).children.clone();
        for child in children {
            self.remove(child);
        }
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    /// Reparent `id` under `new_parent` (or make it a root if `None`).
    ///
    /// Moving a node under itself or one of its descendants is ignored.
    pub fn reparent(&mut self, id: NodeId, new_parent: Option<NodeId>) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(p) = new_parent
            && (!self.is_alive(p) || self.path_to_root(p).contains(&id))
        {
            return;
        }
        if let Some(parent) = self.node(id).parent {
            self.unlink_parent(id, parent);
        }
        if let Some(p) = new_parent {
            self.link_parent(id, p);
        }
    }

    /// Update the border box.
    pub fn set_bounds(&mut self, id: NodeId, bounds: Rect) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.bounds = bounds;
        }
    }

    /// Update how far the node's content is scrolled.
    pub fn set_scroll_offset(&mut self, id: NodeId, offset: Vec2) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.scroll_offset = offset;
        }
    }

    /// Update overflow properties.
    pub fn set_overflow(&mut self, id: NodeId, overflow: OverflowStyle) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.overflow = overflow;
        }
    }

    /// Update node flags.
    pub fn set_flags(&mut self, id: NodeId, flags: NodeFlags) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.flags = flags;
        }
    }

    /// Resize the window viewport.
    pub fn set_viewport_size(&mut self, size: Size) {
        self.viewport = size;
    }

    /// Scroll the window to `offset`.
    pub fn set_window_scroll(&mut self, offset: Vec2) {
        self.window_scroll = offset;
    }

    /// Inner size of the window viewport.
    pub fn viewport_size(&self) -> Size {
        self.viewport
    }

    /// Current window scroll offset.
    pub fn window_scroll(&self) -> Vec2 {
        self.window_scroll
    }

    /// Returns `true` if `id` refers to a live node.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .is_some_and(|n| n.generation == id.generation())
    }

    /// Parent of `id`, or `None` for roots and stale ids.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id)?.parent
    }

    /// Children of `id` in insertion order. Empty for stale ids.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node_opt(id).map_or(&[][..], |n| n.children.as_slice())
    }

    /// Local data of `id`.
    pub fn local(&self, id: NodeId) -> Option<&LocalNode> {
        self.node_opt(id).map(|n| &n.local)
    }

    /// Overflow properties of `id`, or `None` if the node has no computed style.
    pub fn overflow(&self, id: NodeId) -> Option<OverflowStyle> {
        let n = self.node_opt(id)?;
        n.local
            .flags
            .contains(NodeFlags::STYLED)
            .then_some(n.local.overflow)
    }

    /// Flags of `id`.
    pub fn flags(&self, id: NodeId) -> Option<NodeFlags> {
        self.node_opt(id).map(|n| n.local.flags)
    }

    /// Returns `true` if `id` and all of its ancestors generate a box.
    pub fn is_displayed(&self, id: NodeId) -> bool {
        let mut cur = Some(id);
        while let Some(c) = cur {
            let Some(n) = self.node_opt(c) else {
                return false;
            };
            if !n.local.flags.contains(NodeFlags::DISPLAYED) {
                return false;
            }
            cur = n.parent;
        }
        true
    }

    /// Border box of `id` relative to the window viewport origin.
    ///
    /// Accounts for every ancestor's scroll offset and for the window scroll.
    /// Nodes that are not displayed measure as [`Rect::ZERO`].
    pub fn client_rect(&self, id: NodeId) -> Option<Rect> {
        let node = self.node_opt(id)?;
        if !self.is_displayed(id) {
            return Some(Rect::ZERO);
        }
        let mut origin = node.local.bounds.origin().to_vec2() - self.window_scroll;
        let mut cur = node.parent;
        while let Some(p) = cur {
            let parent = self.node(p);
            origin += parent.local.bounds.origin().to_vec2() - parent.local.scroll_offset;
            cur = parent.parent;
        }
        Some(node.local.bounds.with_origin(origin.to_point()))
    }

    /// Layout size of `id` (border box), zero when not displayed.
    pub fn offset_size(&self, id: NodeId) -> Option<Size> {
        let node = self.node_opt(id)?;
        if !self.is_displayed(id) {
            return Some(Size::ZERO);
        }
        Some(node.local.bounds.size())
    }

    /// Path from root to `id` (inclusive). Empty for stale ids.
    pub fn path_to_root(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut cur = Some(id).filter(|id| self.is_alive(*id));
        while let Some(c) = cur {
            out.push(c);
            cur = self.node(c).parent;
        }
        out.reverse();
        out
    }

    // --- internals ---

    fn node(&self, id: NodeId) -> &Node {
        self.nodes[id.idx()].as_ref().expect("dangling NodeId")
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes[id.idx()].as_mut().expect("dangling NodeId")
    }

    fn node_opt(&self, id: NodeId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.generation()).then_some(n)
    }

    fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.generation() {
            return None;
        }
        Some(n)
    }

    fn link_parent(&mut self, id: NodeId, parent: NodeId) {
        self.node_mut(parent).children.push(id);
        self.node_mut(id).parent = Some(parent);
    }

    fn unlink_parent(&mut self, id: NodeId, parent: NodeId) {
        self.node_mut(parent).children.retain(|c| *c != id);
        self.node_mut(id).parent = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Overflow;
    use alloc::vec;

    fn boxed(x0: f64, y0: f64, x1: f64, y1: f64) -> LocalNode {
        LocalNode {
            bounds: Rect::new(x0, y0, x1, y1),
            ..Default::default()
        }
    }

    #[test]
    fn insert_links_parent_and_children() {
        let mut tree = Tree::new();
        let root = tree.insert(None, boxed(0.0, 0.0, 100.0, 100.0));
        let a = tree.insert(Some(root), boxed(0.0, 0.0, 10.0, 10.0));
        let b = tree.insert(Some(root), boxed(0.0, 10.0, 10.0, 20.0));
        assert_eq!(tree.parent(a), Some(root));
        assert_eq!(tree.parent(root), None);
        assert_eq!(tree.children(root), &[a, b]);
        assert_eq!(tree.path_to_root(b), vec![root, b]);
    }

    #[test]
    fn remove_frees_subtree_and_bumps_generation() {
        let mut tree = Tree::new();
        let root = tree.insert(None, LocalNode::default());
        let a = tree.insert(Some(root), LocalNode::default());
        let leaf = tree.insert(Some(a), LocalNode::default());
        tree.remove(a);
        assert!(!tree.is_alive(a));
        assert!(!tree.is_alive(leaf));
        assert!(tree.children(root).is_empty());

        // Slot reuse must not resurrect the stale id.
        let fresh = tree.insert(Some(root), LocalNode::default());
        assert_ne!(fresh, a);
        assert_ne!(fresh, leaf);
        assert!(tree.is_alive(fresh));
        assert!(tree.local(a).is_none());
        assert!(tree.client_rect(leaf).is_none());
    }

    #[test]
    fn reparent_moves_geometry() {
        let mut tree = Tree::with_viewport(Size::new(100.0, 100.0));
        let root = tree.insert(None, boxed(0.0, 0.0, 100.0, 1000.0));
        let a = tree.insert(Some(root), boxed(0.0, 100.0, 100.0, 200.0));
        let b = tree.insert(Some(root), boxed(0.0, 500.0, 100.0, 600.0));
        let leaf = tree.insert(Some(a), boxed(0.0, 10.0, 10.0, 20.0));
        assert_eq!(tree.client_rect(leaf), Some(Rect::new(0.0, 110.0, 10.0, 120.0)));

        tree.reparent(leaf, Some(b));
        assert_eq!(tree.parent(leaf), Some(b));
        assert!(tree.children(a).is_empty());
        assert_eq!(tree.client_rect(leaf), Some(Rect::new(0.0, 510.0, 10.0, 520.0)));
    }

    #[test]
    fn reparent_under_descendant_is_ignored() {
        let mut tree = Tree::new();
        let root = tree.insert(None, LocalNode::default());
        let a = tree.insert(Some(root), LocalNode::default());
        let leaf = tree.insert(Some(a), LocalNode::default());
        tree.reparent(a, Some(leaf));
        assert_eq!(tree.parent(a), Some(root));
        tree.reparent(a, Some(a));
        assert_eq!(tree.parent(a), Some(root));
    }

    #[test]
    fn reparent_under_removed_node_is_ignored() {
        let mut tree = Tree::new();
        let root = tree.insert(None, LocalNode::default());
        let a = tree.insert(Some(root), LocalNode::default());
        let gone = tree.insert(Some(root), LocalNode::default());
        tree.remove(gone);
        tree.reparent(a, Some(gone));
        assert_eq!(tree.parent(a), Some(root));
        assert_eq!(tree.children(root), &[a]);

        tree.reparent(a, None);
        assert_eq!(tree.parent(a), None);
        assert!(tree.children(root).is_empty());
    }

    #[test]
    fn client_rect_applies_ancestor_and_window_scroll() {
        let mut tree = Tree::with_viewport(Size::new(800.0, 600.0));
        let body = tree.insert(None, boxed(0.0, 0.0, 800.0, 5000.0));
        let scroller = tree.insert(
            Some(body),
            LocalNode {
                bounds: Rect::new(0.0, 100.0, 400.0, 300.0),
                overflow: OverflowStyle::y(Overflow::Auto),
                ..Default::default()
            },
        );
        let item = tree.insert(Some(scroller), boxed(0.0, 250.0, 400.0, 270.0));

        assert_eq!(tree.client_rect(item), Some(Rect::new(0.0, 350.0, 400.0, 370.0)));

        // Scrolling the container moves its content but not the container itself.
        tree.set_scroll_offset(scroller, Vec2::new(0.0, 200.0));
        assert_eq!(tree.client_rect(item), Some(Rect::new(0.0, 150.0, 400.0, 170.0)));
        assert_eq!(tree.client_rect(scroller), Some(Rect::new(0.0, 100.0, 400.0, 300.0)));

        // Window scroll moves everything.
        tree.set_window_scroll(Vec2::new(0.0, 50.0));
        assert_eq!(tree.client_rect(item), Some(Rect::new(0.0, 100.0, 400.0, 120.0)));
        assert_eq!(tree.client_rect(scroller), Some(Rect::new(0.0, 50.0, 400.0, 250.0)));
    }

    #[test]
    fn hidden_subtree_measures_as_zero() {
        let mut tree = Tree::new();
        let root = tree.insert(None, boxed(0.0, 0.0, 100.0, 100.0));
        let panel = tree.insert(Some(root), boxed(0.0, 20.0, 100.0, 80.0));
        let leaf = tree.insert(Some(panel), boxed(0.0, 0.0, 10.0, 10.0));
        tree.set_flags(panel, NodeFlags::STYLED);
        assert!(!tree.is_displayed(leaf));
        assert_eq!(tree.client_rect(leaf), Some(Rect::ZERO));
        assert_eq!(tree.offset_size(panel), Some(Size::ZERO));
        assert_eq!(tree.offset_size(root), Some(Size::new(100.0, 100.0)));
    }

    #[test]
    fn unstyled_nodes_report_no_overflow() {
        let mut tree = Tree::new();
        let document = tree.insert(
            None,
            LocalNode {
                flags: NodeFlags::DISPLAYED,
                ..Default::default()
            },
        );
        let div = tree.insert(
            Some(document),
            LocalNode {
                overflow: OverflowStyle::both(Overflow::Scroll),
                ..Default::default()
            },
        );
        assert_eq!(tree.overflow(document), None);
        assert_eq!(tree.overflow(div), Some(OverflowStyle::both(Overflow::Scroll)));
        tree.set_overflow(div, OverflowStyle::x(Overflow::Hidden));
        assert_eq!(tree.overflow(div), Some(OverflowStyle::x(Overflow::Hidden)));
    }
}
