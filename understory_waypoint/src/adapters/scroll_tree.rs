// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host implementation over Understory Scroll Tree.
//!
//! ## Feature
//!
//! Enable with `scroll_tree_adapter`.
//!
//! ## Notes
//!
//! [`ScrollTreeHost`] owns a [`Tree`], a [`NextTick`] queue standing in for the
//! platform timer, and a listener table. It does not dispatch events itself:
//! after mutating the tree, the caller looks up interested listeners with
//! [`ScrollTreeHost::has_listener`] and forwards the event to its waypoints.
//!
//! ```
//! use kurbo::{Rect, Size, Vec2};
//! use understory_scroll_tree::{LocalNode, Tree};
//! use understory_waypoint::adapters::scroll_tree::ScrollTreeHost;
//! use understory_waypoint::{Children, EventKind, Position, Waypoint, WaypointOptions};
//!
//! let mut tree = Tree::with_viewport(Size::new(800.0, 600.0));
//! let body = tree.insert(None, LocalNode { bounds: Rect::new(0.0, 0.0, 800.0, 3000.0), ..Default::default() });
//! let marker = tree.insert(Some(body), LocalNode { bounds: Rect::new(0.0, 1000.0, 800.0, 1000.0), ..Default::default() });
//! let mut host = ScrollTreeHost::new(tree);
//!
//! let mut w: Waypoint<_, EventKind, ScrollTreeHost> =
//!     Waypoint::new(WaypointOptions::default(), &Children::None).unwrap();
//! w.set_node(Some(marker));
//! w.attach(&mut host);
//! for tick in host.run_ticks() {
//!     w.on_tick(&mut host, tick).unwrap();
//! }
//! assert_eq!(w.previous_position(), Some(Position::Below));
//!
//! host.tree_mut().set_window_scroll(Vec2::new(0.0, 700.0));
//! assert_eq!(w.handle_event(&mut host, &EventKind::Scroll), Some(Position::Inside));
//! ```

use alloc::vec::Vec;

use kurbo::{Rect, Size};
use understory_scroll_tree::{NodeFlags, NodeId, Overflow as TreeOverflow, Tree};

use crate::ancestor::{Overflow, OverflowProperty, ScrollLookup};
use crate::host::{EventRegistry, Measure, TickScheduler};
use crate::tick::{NextTick, TickId};
use crate::types::{EventKind, ScrollContainer};

/// Handle of a listener registered on a [`ScrollTreeHost`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ListenerId(u64);

#[derive(Clone, Debug)]
struct Listener {
    id: ListenerId,
    target: ScrollContainer<NodeId>,
    kind: EventKind,
}

/// A [`Host`](crate::host::Host) backed by a scroll tree.
#[derive(Debug)]
pub struct ScrollTreeHost {
    tree: Tree,
    ticks: NextTick<()>,
    listeners: Vec<Listener>,
    next_listener: u64,
}

impl ScrollTreeHost {
    /// Wrap `tree`.
    pub fn new(tree: Tree) -> Self {
        Self {
            tree,
            ticks: NextTick::new(),
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    /// The underlying tree.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Mutable access to the underlying tree, for layout and scroll updates.
    pub fn tree_mut(&mut self) -> &mut Tree {
        &mut self.tree
    }

    /// Fire the pending tick, returning the handles to report through
    /// [`Waypoint::on_tick`](crate::waypoint::Waypoint::on_tick), in scheduling order.
    pub fn run_ticks(&mut self) -> Vec<TickId> {
        self.ticks.drain().into_iter().map(|(id, ())| id).collect()
    }

    /// Returns `true` while a tick is waiting to fire.
    pub fn has_pending_ticks(&self) -> bool {
        self.ticks.is_armed()
    }

    /// Number of live listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Returns `true` if something listens for `kind` on `target`.
    pub fn has_listener(&self, target: ScrollContainer<NodeId>, kind: EventKind) -> bool {
        self.listeners
            .iter()
            .any(|l| l.target == target && l.kind == kind)
    }
}

fn map_overflow(o: TreeOverflow) -> Overflow {
    match o {
        TreeOverflow::Visible => Overflow::Visible,
        TreeOverflow::Hidden => Overflow::Hidden,
        TreeOverflow::Clip => Overflow::Clip,
        TreeOverflow::Scroll => Overflow::Scroll,
        TreeOverflow::Auto => Overflow::Auto,
    }
}

impl ScrollLookup<NodeId> for ScrollTreeHost {
    fn parent_of(&self, node: &NodeId) -> Option<NodeId> {
        self.tree.parent(*node)
    }

    fn overflow(&self, node: &NodeId, property: OverflowProperty) -> Option<Overflow> {
        let style = self.tree.overflow(*node)?;
        let value = match property {
            OverflowProperty::Overflow => style.overflow,
            OverflowProperty::OverflowX => style.overflow_x,
            OverflowProperty::OverflowY => style.overflow_y,
        };
        value.map(map_overflow)
    }

    fn is_viewport_scroller(&self, node: &NodeId) -> bool {
        self.tree
            .flags(*node)
            .is_some_and(|f| f.contains(NodeFlags::VIEWPORT_SCROLLER))
    }
}

impl Measure<NodeId> for ScrollTreeHost {
    fn client_rect(&self, node: &NodeId) -> Option<Rect> {
        self.tree.client_rect(*node)
    }

    fn offset_size(&self, node: &NodeId) -> Option<Size> {
        self.tree.offset_size(*node)
    }

    fn viewport_size(&self) -> Option<Size> {
        Some(self.tree.viewport_size())
    }
}

impl EventRegistry<NodeId> for ScrollTreeHost {
    type Subscription = ListenerId;

    fn subscribe(&mut self, target: ScrollContainer<NodeId>, kind: EventKind) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push(Listener { id, target, kind });
        id
    }

    fn unsubscribe(&mut self, subscription: ListenerId) {
        self.listeners.retain(|l| l.id != subscription);
    }
}

impl TickScheduler for ScrollTreeHost {
    type Tick = TickId;

    fn schedule_tick(&mut self) -> TickId {
        self.ticks.schedule(())
    }

    fn cancel_tick(&mut self, tick: TickId) {
        let _ = self.ticks.cancel(tick);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use core::cell::RefCell;
    use kurbo::Vec2;
    use understory_scroll_tree::{LocalNode, OverflowStyle};

    use crate::ancestor::find_scrollable_ancestor;
    use crate::content::Children;
    use crate::options::WaypointOptions;
    use crate::types::{Axis, Position};
    use crate::waypoint::{CallbackArgs, Waypoint};

    fn node(bounds: Rect) -> LocalNode {
        LocalNode {
            bounds,
            ..Default::default()
        }
    }

    /// `html` (viewport scroller, overflow auto) > `body` > `list` (overflow-y auto, 300px) > `row`.
    fn page() -> (ScrollTreeHost, NodeId, NodeId, NodeId) {
        let mut tree = Tree::with_viewport(Size::new(800.0, 600.0));
        let html = tree.insert(
            None,
            LocalNode {
                bounds: Rect::new(0.0, 0.0, 800.0, 600.0),
                overflow: OverflowStyle::both(TreeOverflow::Auto),
                flags: NodeFlags::default() | NodeFlags::VIEWPORT_SCROLLER,
                ..Default::default()
            },
        );
        let body = tree.insert(Some(html), node(Rect::new(0.0, 0.0, 800.0, 3000.0)));
        let list = tree.insert(
            Some(body),
            LocalNode {
                bounds: Rect::new(0.0, 100.0, 300.0, 400.0),
                overflow: OverflowStyle::y(TreeOverflow::Auto),
                ..Default::default()
            },
        );
        let row = tree.insert(Some(list), node(Rect::new(0.0, 800.0, 300.0, 820.0)));
        (ScrollTreeHost::new(tree), body, list, row)
    }

    #[test]
    fn resolves_through_the_tree() {
        let (host, body, list, row) = page();
        let v = find_scrollable_ancestor(&host, &row, &Default::default(), Axis::Vertical);
        assert_eq!(v, ScrollContainer::Node(list));
        // The list only scrolls vertically and html belongs to the window.
        let h = find_scrollable_ancestor(&host, &row, &Default::default(), Axis::Horizontal);
        assert_eq!(h, ScrollContainer::Window);
        let from_body = find_scrollable_ancestor(&host, &body, &Default::default(), Axis::Vertical);
        assert_eq!(from_body, ScrollContainer::Window);
    }

    #[test]
    fn unstyled_nodes_report_no_overflow() {
        let (mut host, body, _, _) = page();
        host.tree_mut().set_overflow(body, OverflowStyle::both(TreeOverflow::Scroll));
        host.tree_mut().set_flags(body, NodeFlags::DISPLAYED);
        assert_eq!(host.overflow(&body, OverflowProperty::Overflow), None);
    }

    #[test]
    fn ticks_and_listeners() {
        let (mut host, _, _, _) = page();
        let a = host.schedule_tick();
        let b = host.schedule_tick();
        host.cancel_tick(a);
        host.cancel_tick(a);
        assert!(host.has_pending_ticks());
        assert_eq!(host.run_ticks(), [b]);
        assert!(!host.has_pending_ticks());

        let s = host.subscribe(ScrollContainer::Window, EventKind::Resize);
        assert!(host.has_listener(ScrollContainer::Window, EventKind::Resize));
        assert!(!host.has_listener(ScrollContainer::Window, EventKind::Scroll));
        host.unsubscribe(s);
        assert_eq!(host.listener_count(), 0);
    }

    #[test]
    fn waypoint_in_a_scrolling_list() {
        let (mut host, _, list, row) = page();
        let entered = Rc::new(RefCell::new(0));
        let counter = entered.clone();
        let mut w: Waypoint<NodeId, EventKind, ScrollTreeHost> =
            Waypoint::new(WaypointOptions::default(), &Children::None)
                .unwrap()
                .on_enter(move |_: &CallbackArgs<'_, EventKind>| *counter.borrow_mut() += 1);
        w.set_node(Some(row));
        w.attach(&mut host);
        for tick in host.run_ticks() {
            assert_eq!(w.on_tick(&mut host, tick), Ok(true));
        }
        assert!(host.has_listener(ScrollContainer::Node(list), EventKind::Scroll));
        assert!(host.has_listener(ScrollContainer::Window, EventKind::Resize));
        // Row at 900 viewport-relative, list window is [100, 400].
        assert_eq!(w.previous_position(), Some(Position::Below));

        host.tree_mut().set_scroll_offset(list, Vec2::new(0.0, 600.0));
        assert_eq!(
            w.handle_event(&mut host, &EventKind::Scroll),
            Some(Position::Inside)
        );
        assert_eq!(*entered.borrow(), 1);

        // Hiding the list collapses its window.
        host.tree_mut().set_flags(list, NodeFlags::STYLED);
        assert_eq!(w.refresh(&mut host), Some(Position::Invisible));

        w.detach(&mut host);
        assert_eq!(host.listener_count(), 0);
    }
}
