// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_waypoint --heading-base-level=0

//! Understory Waypoint: a headless, `no_std` engine that reports when an element
//! scrolls into or out of view.
//!
//! ## Overview
//!
//! A waypoint tracks one element against the visible window of its nearest
//! scrollable ancestor (or the window itself). Every time the host reports a
//! scroll or resize, the waypoint measures the element, classifies it as
//! [`Position::Above`], [`Position::Below`], [`Position::Inside`] or
//! [`Position::Invisible`], and invokes `on_enter`, `on_leave` and
//! `on_position_change` for the transition from the last recorded position.
//!
//! It does not own a document, a timer, or an event loop. The host provides
//! those through small traits in [`host`] and [`ancestor`]; the optional
//! [`adapters::scroll_tree`](crate::adapters) host backs them with Understory Scroll Tree.
//!
//! ## Pieces
//!
//! - [`offset`]: pixel and percentage offsets, resolved against the container on every measurement.
//! - [`ancestor`]: scrollable-ancestor resolution along the tracked axis.
//! - [`position`]: pure classification of a [`Bounds`] snapshot.
//! - [`tracker`]: transition computation, including rapid-scroll compensation.
//! - [`waypoint`]: lifecycle (deferred attach, recompute, detach) and callback delivery.
//! - [`tick`], [`throttle`]: host-side helpers for deferral and rate limiting.
//! - [`options`], [`content`], [`error`]: configuration and setup validation.
//!
//! ## Example
//!
//! ```
//! use kurbo::{Rect, Size};
//! use understory_waypoint::ancestor::{Overflow, OverflowProperty, ScrollLookup};
//! use understory_waypoint::host::{EventRegistry, Measure, TickScheduler};
//! use understory_waypoint::{Children, EventKind, Position, ScrollContainer, Waypoint, WaypointOptions};
//!
//! /// A window 600px tall with one element at `top`.
//! struct Page { top: f64, ticks: u32 }
//!
//! impl ScrollLookup<()> for Page {
//!     fn parent_of(&self, _: &()) -> Option<()> { None }
//!     fn overflow(&self, _: &(), _: OverflowProperty) -> Option<Overflow> { None }
//! }
//! impl Measure<()> for Page {
//!     fn client_rect(&self, _: &()) -> Option<Rect> { Some(Rect::new(0.0, self.top, 10.0, self.top + 10.0)) }
//!     fn offset_size(&self, _: &()) -> Option<Size> { None }
//!     fn viewport_size(&self) -> Option<Size> { Some(Size::new(800.0, 600.0)) }
//! }
//! impl EventRegistry<()> for Page {
//!     type Subscription = ();
//!     fn subscribe(&mut self, _: ScrollContainer<()>, _: EventKind) {}
//!     fn unsubscribe(&mut self, _: ()) {}
//! }
//! impl TickScheduler for Page {
//!     type Tick = u32;
//!     fn schedule_tick(&mut self) -> u32 { self.ticks += 1; self.ticks }
//!     fn cancel_tick(&mut self, _: u32) {}
//! }
//!
//! let mut page = Page { top: 900.0, ticks: 0 };
//! let mut w: Waypoint<(), (), Page> = Waypoint::new(WaypointOptions::default(), &Children::None)
//!     .unwrap()
//!     .on_enter(|args| assert_eq!(args.previous_position, Some(Position::Below)));
//! w.set_node(Some(()));
//! w.attach(&mut page);
//! assert!(w.on_tick(&mut page, 1).unwrap());
//!
//! page.top = 200.0;
//! assert_eq!(w.handle_event(&mut page, &()), Some(Position::Inside));
//! w.detach(&mut page);
//! ```
//!
//! ## Logging
//!
//! Diagnostics go through the [`log`] facade under the `understory_waypoint`
//! target. Per-measurement lines are emitted at `debug` only for waypoints
//! configured with `debug: true`; skipped cycles are reported at `trace`.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[macro_use]
mod macros;

pub mod adapters;
pub mod ancestor;
pub mod content;
pub mod error;
pub mod host;
pub mod offset;
pub mod options;
pub mod position;
pub mod throttle;
pub mod tick;
pub mod tracker;
pub mod types;
pub mod waypoint;

pub use ancestor::ScrollableAncestor;
pub use content::{Child, Children, TrackedContent};
pub use error::WaypointError;
pub use host::Host;
pub use offset::Offset;
pub use options::{PropValue, WaypointOptions};
pub use types::{Axis, Bounds, EventKind, Position, ScrollContainer};
pub use waypoint::{CallbackArgs, Waypoint};
