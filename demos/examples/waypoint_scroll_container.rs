// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Waypoints inside a scrolling list.
//!
//! This example places a few rows in an `overflow-y: auto` list, resolves the
//! list as their scrollable ancestor, and then:
//! - scrolls gradually, so rows enter and leave one after another;
//! - jumps from the top to the bottom in one event, showing rapid-scroll
//!   compensation on one row and its absence on another;
//! - resizes the list, showing that percentage offsets follow the container.
//!
//! Run:
//! - `cargo run -p understory_demos --example waypoint_scroll_container`

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::{Rect, Size, Vec2};
use understory_scroll_tree::{LocalNode, NodeId, Overflow, OverflowStyle, Tree};
use understory_waypoint::adapters::scroll_tree::ScrollTreeHost;
use understory_waypoint::{
    CallbackArgs, Children, EventKind, PropValue, ScrollContainer, Waypoint, WaypointOptions,
};

type Log = Rc<RefCell<Vec<String>>>;

fn logger(
    log: &Log,
    row: usize,
    what: &'static str,
) -> impl FnMut(&CallbackArgs<'_, EventKind>) + use<> {
    let log = log.clone();
    move |a: &CallbackArgs<'_, EventKind>| {
        log.borrow_mut().push(format!(
            "row {row}: {what} ({:?} -> {})",
            a.previous_position.map(|p| p.as_str()),
            a.current_position
        ));
    }
}

fn flush(log: &Log) {
    for line in log.borrow_mut().drain(..) {
        println!("  {line}");
    }
}

fn main() {
    env_logger::init();

    let mut tree = Tree::with_viewport(Size::new(800.0, 600.0));
    let body = tree.insert(
        None,
        LocalNode {
            bounds: Rect::new(0.0, 0.0, 800.0, 600.0),
            ..Default::default()
        },
    );
    let list = tree.insert(
        Some(body),
        LocalNode {
            bounds: Rect::new(0.0, 50.0, 300.0, 250.0),
            overflow: OverflowStyle::y(Overflow::Auto),
            ..Default::default()
        },
    );
    let rows: Vec<NodeId> = (0..4)
        .map(|i| {
            let y = 400.0 * f64::from(i) + 300.0;
            tree.insert(
                Some(list),
                LocalNode {
                    bounds: Rect::new(0.0, y, 300.0, y + 40.0),
                    ..Default::default()
                },
            )
        })
        .collect();
    let mut host = ScrollTreeHost::new(tree);

    let log = Log::default();
    let mut waypoints: Vec<Waypoint<NodeId, EventKind, ScrollTreeHost>> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            // Row 3 is configured the way a framework binding would, from props.
            let options = if i == 3 {
                WaypointOptions::from_props([
                    ("fireOnRapidScroll", PropValue::Bool(false)),
                    ("bottomOffset", PropValue::Text("25%".into())),
                ])
                .expect("valid props")
            } else {
                WaypointOptions::default().with_bottom_offset("25%")
            };
            let mut w = Waypoint::new(options, &Children::None)
                .expect("valid content")
                .on_enter(logger(&log, i, "enter"))
                .on_leave(logger(&log, i, "leave"));
            w.set_node(Some(*row));
            w.attach(&mut host);
            w
        })
        .collect();

    // All waypoints share one tick; each claims its own handle.
    for tick in host.run_ticks() {
        for w in &mut waypoints {
            if w.on_tick(&mut host, tick).expect("node is registered") {
                break;
            }
        }
    }
    println!(
        "resolved container: {:?}",
        waypoints[0].container().map(|c| matches!(c, ScrollContainer::Node(_)))
    );
    flush(&log);

    let scroll = |host: &mut ScrollTreeHost,
                  waypoints: &mut [Waypoint<NodeId, EventKind, ScrollTreeHost>],
                  y: f64| {
        println!("scroll list to {y}");
        host.tree_mut().set_scroll_offset(list, Vec2::new(0.0, y));
        for w in waypoints.iter_mut() {
            w.handle_event(host, &EventKind::Scroll);
        }
        flush(&log);
    };

    for y in [200.0, 600.0, 1000.0, 1400.0] {
        scroll(&mut host, &mut waypoints, y);
    }
    // One event from the bottom back to the top.
    scroll(&mut host, &mut waypoints, 0.0);
    // One event all the way down again.
    scroll(&mut host, &mut waypoints, 1600.0);

    println!("grow the list to 600px; the 25% bottom offset grows with it");
    host.tree_mut().set_bounds(list, Rect::new(0.0, 0.0, 300.0, 600.0));
    for w in &mut waypoints {
        w.refresh(&mut host);
    }
    flush(&log);

    for w in &mut waypoints {
        w.detach(&mut host);
    }
    println!("listeners left: {}", host.listener_count());
}
