// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Waypoint basics: scroll the window past a marker.
//!
//! This example attaches one waypoint to a zero-height marker in a tall page,
//! then scrolls the window in steps, printing every callback.
//!
//! Run:
//! - `RUST_LOG=understory_waypoint=debug cargo run -p understory_demos --example waypoint_basics`

use kurbo::{Rect, Size, Vec2};
use understory_scroll_tree::{LocalNode, Tree};
use understory_waypoint::adapters::scroll_tree::ScrollTreeHost;
use understory_waypoint::{CallbackArgs, Children, EventKind, Waypoint, WaypointOptions};

fn report(name: &'static str) -> impl FnMut(&CallbackArgs<'_, EventKind>) {
    move |a: &CallbackArgs<'_, EventKind>| {
        println!(
            "  {name:<16} current={} previous={:?} event={:?} waypoint=[{}, {}] viewport=[{}, {}]",
            a.current_position,
            a.previous_position.map(|p| p.as_str()),
            a.event,
            a.waypoint_top,
            a.waypoint_bottom,
            a.viewport_top,
            a.viewport_bottom,
        );
    }
}

fn main() {
    env_logger::init();

    let mut tree = Tree::with_viewport(Size::new(800.0, 600.0));
    let body = tree.insert(
        None,
        LocalNode {
            bounds: Rect::new(0.0, 0.0, 800.0, 4000.0),
            ..Default::default()
        },
    );
    let marker = tree.insert(
        Some(body),
        LocalNode {
            bounds: Rect::new(0.0, 1500.0, 800.0, 1500.0),
            ..Default::default()
        },
    );
    let mut host = ScrollTreeHost::new(tree);

    let options = WaypointOptions::default()
        .with_top_offset("10%")
        .with_bottom_offset("100px")
        .with_debug(true);
    let mut waypoint: Waypoint<_, EventKind, ScrollTreeHost> =
        Waypoint::new(options, &Children::None)
            .expect("an anchor is always valid content")
            .on_enter(report("on_enter"))
            .on_leave(report("on_leave"))
            .on_position_change(report("on_position_change"));
    waypoint.set_node(Some(marker));

    println!("attach");
    waypoint.attach(&mut host);
    for tick in host.run_ticks() {
        waypoint.on_tick(&mut host, tick).expect("node is registered");
    }

    for y in [400.0, 900.0, 1200.0, 1800.0] {
        println!("scroll window to {y}");
        host.tree_mut().set_window_scroll(Vec2::new(0.0, y));
        if host.has_listener(understory_waypoint::ScrollContainer::Window, EventKind::Scroll) {
            waypoint.handle_event(&mut host, &EventKind::Scroll);
        }
    }

    println!("shrink the window to 300px");
    host.tree_mut().set_viewport_size(Size::new(800.0, 300.0));
    waypoint.handle_event(&mut host, &EventKind::Resize);

    println!("detach");
    waypoint.detach(&mut host);
    println!("listeners left: {}", host.listener_count());
}
