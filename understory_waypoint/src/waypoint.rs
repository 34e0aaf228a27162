// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The waypoint: lifecycle, recomputation, and callback delivery.
//!
//! ## Lifecycle
//!
//! A [`Waypoint`] is `Idle` until [`attach`](Waypoint::attach) schedules one
//! tick. When the host reports that tick through [`on_tick`](Waypoint::on_tick),
//! the waypoint checks its node reference, resolves the scroll container,
//! subscribes to `Scroll` on the container and `Resize` on the window, and
//! performs the initial measurement. From then on every
//! [`recompute`](Waypoint::recompute) (or [`handle_event`](Waypoint::handle_event),
//! or [`refresh`](Waypoint::refresh)) measures, classifies, and invokes the
//! callbacks for each transition in order. [`detach`](Waypoint::detach) undoes
//! whatever was set up, from any state.
//!
//! Hosts without a window (server rendering) never attach: `attach` and
//! `recompute` do nothing when [`Measure::viewport_size`] is `None`.
//!
//! ## Callback order
//!
//! For one recomputation that changes the position:
//! 1. `on_position_change`
//! 2. `on_enter` (now inside) or `on_leave` (was inside)
//! 3. With rapid-scroll compensation, for a jump between below and above,
//!    a synthetic `on_enter` followed by `on_leave`.
//!
//! The recorded position is updated before any callback runs.
//!
//! [`Measure::viewport_size`]: crate::host::Measure::viewport_size

use alloc::boxed::Box;
use core::fmt;
use core::marker::PhantomData;

use crate::ancestor::find_scrollable_ancestor;
use crate::content::{Children, TrackedContent};
use crate::error::WaypointError;
use crate::host::{EventRegistry, Host, TickScheduler, measure_bounds};
use crate::options::WaypointOptions;
use crate::throttle::Throttle;
use crate::tracker::{CallbackKind, PositionTracker};
use crate::types::{Bounds, EventKind, Position, ScrollContainer};

/// Payload delivered to every callback.
#[derive(Debug)]
pub struct CallbackArgs<'a, E> {
    /// Position being reported.
    pub current_position: Position,
    /// Position before this transition; `None` on the first measurement.
    pub previous_position: Option<Position>,
    /// The event that triggered the recomputation, if any.
    pub event: Option<&'a E>,
    /// Leading edge of the tracked element.
    pub waypoint_top: f64,
    /// Trailing edge of the tracked element.
    pub waypoint_bottom: f64,
    /// Leading edge of the visible window.
    pub viewport_top: f64,
    /// Trailing edge of the visible window.
    pub viewport_bottom: f64,
}

impl<E> CallbackArgs<'_, E> {
    /// The measurement this payload was built from.
    pub fn bounds(&self) -> Bounds {
        Bounds {
            waypoint_top: self.waypoint_top,
            waypoint_bottom: self.waypoint_bottom,
            viewport_top: self.viewport_top,
            viewport_bottom: self.viewport_bottom,
        }
    }
}

/// A boxed user callback.
pub type Callback<E> = Box<dyn FnMut(&CallbackArgs<'_, E>)>;

fn noop<E>() -> Callback<E> {
    Box::new(|_| {})
}

/// Subscriptions held while attached.
struct Attachment<S> {
    scroll: Option<S>,
    resize: Option<S>,
}

enum Lifecycle<N, T, S> {
    Idle,
    Scheduled(T),
    Active {
        container: Option<ScrollContainer<N>>,
        attachment: Attachment<S>,
    },
}

impl<N, T, S> Lifecycle<N, T, S> {
    fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Scheduled(_) => "scheduled",
            Self::Active { .. } => "active",
        }
    }
}

/// Tracks one element and reports its position changes.
///
/// - `N`: host node handle.
/// - `E`: event payload forwarded to callbacks.
/// - `H`: host type, which fixes the tick and subscription handles.
pub struct Waypoint<N, E, H>
where
    H: EventRegistry<N> + TickScheduler,
{
    options: WaypointOptions<N>,
    content: TrackedContent,
    on_enter: Callback<E>,
    on_leave: Callback<E>,
    on_position_change: Callback<E>,
    throttle: Option<Box<dyn Throttle<E>>>,
    node: Option<N>,
    tracker: PositionTracker,
    state: Lifecycle<N, H::Tick, H::Subscription>,
    _host: PhantomData<fn(&mut H)>,
}

impl<N, E, H> fmt::Debug for Waypoint<N, E, H>
where
    N: fmt::Debug,
    H: EventRegistry<N> + TickScheduler,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Waypoint")
            .field("options", &self.options)
            .field("content", &self.content)
            .field("node", &self.node)
            .field("tracker", &self.tracker)
            .field("state", &self.state.label())
            .field("throttled", &self.throttle.is_some())
            .finish_non_exhaustive()
    }
}

impl<N, E, H> Waypoint<N, E, H>
where
    N: Clone + fmt::Debug,
    H: Host<N>,
{
    /// Create an idle waypoint.
    ///
    /// # Errors
    ///
    /// Returns the content error from [`TrackedContent::from_children`].
    pub fn new(options: WaypointOptions<N>, children: &Children) -> Result<Self, WaypointError> {
        let content = TrackedContent::from_children(children)?;
        Ok(Self {
            tracker: PositionTracker::new(options.fire_on_rapid_scroll),
            options,
            content,
            on_enter: noop(),
            on_leave: noop(),
            on_position_change: noop(),
            throttle: None,
            node: None,
            state: Lifecycle::Idle,
            _host: PhantomData,
        })
    }

    /// Called when the element becomes inside.
    pub fn on_enter(mut self, f: impl FnMut(&CallbackArgs<'_, E>) + 'static) -> Self {
        self.on_enter = Box::new(f);
        self
    }

    /// Called when the element stops being inside.
    pub fn on_leave(mut self, f: impl FnMut(&CallbackArgs<'_, E>) + 'static) -> Self {
        self.on_leave = Box::new(f);
        self
    }

    /// Called on every position change.
    pub fn on_position_change(mut self, f: impl FnMut(&CallbackArgs<'_, E>) + 'static) -> Self {
        self.on_position_change = Box::new(f);
        self
    }

    /// Gate event-driven recomputation through `throttle`.
    pub fn with_throttle(mut self, throttle: impl Throttle<E> + 'static) -> Self {
        self.throttle = Some(Box::new(throttle));
        self
    }

    /// Options in effect.
    pub fn options(&self) -> &WaypointOptions<N> {
        &self.options
    }

    /// Resolved content kind.
    pub fn content(&self) -> TrackedContent {
        self.content
    }

    /// Tracked node, if registered.
    pub fn node(&self) -> Option<&N> {
        self.node.as_ref()
    }

    /// Register (or clear) the tracked node. This is the node reference callback.
    pub fn set_node(&mut self, node: Option<N>) {
        self.node = node;
    }

    /// Last reported position.
    pub fn previous_position(&self) -> Option<Position> {
        self.tracker.previous()
    }

    /// Resolved scroll container, once known.
    pub fn container(&self) -> Option<&ScrollContainer<N>> {
        match &self.state {
            Lifecycle::Active { container, .. } => container.as_ref(),
            _ => None,
        }
    }

    /// Returns `true` between a successful [`on_tick`](Self::on_tick) and [`detach`](Self::detach).
    pub fn is_attached(&self) -> bool {
        matches!(self.state, Lifecycle::Active { .. })
    }

    /// Returns `true` while the initial tick is pending.
    pub fn is_scheduled(&self) -> bool {
        matches!(self.state, Lifecycle::Scheduled(_))
    }

    /// Schedule the deferred attach step.
    ///
    /// Does nothing if already scheduled or attached, or if the host has no window.
    pub fn attach(&mut self, host: &mut H) {
        if !matches!(self.state, Lifecycle::Idle) {
            return;
        }
        if host.viewport_size().is_none() {
            wtrace!("no window; attach skipped");
            return;
        }
        let tick = host.schedule_tick();
        wtrace!("attach scheduled on tick {tick:?}");
        self.state = Lifecycle::Scheduled(tick);
    }

    /// Run the deferred attach step for `tick`.
    ///
    /// Returns `Ok(false)` if `tick` is not the one this waypoint is waiting for.
    ///
    /// # Errors
    ///
    /// [`WaypointError::MissingNodeRef`] if reference-based content never
    /// registered a node. The waypoint is left idle.
    pub fn on_tick(&mut self, host: &mut H, tick: H::Tick) -> Result<bool, WaypointError> {
        match self.state {
            Lifecycle::Scheduled(t) if t == tick => {}
            _ => return Ok(false),
        }
        self.state = Lifecycle::Idle;
        self.content.ensure_node(self.node.as_ref())?;

        let resize = host.subscribe(ScrollContainer::Window, EventKind::Resize);
        self.state = Lifecycle::Active {
            container: None,
            attachment: Attachment {
                scroll: None,
                resize: Some(resize),
            },
        };
        self.resolve_container(host);
        self.recompute(host, None);
        Ok(true)
    }

    /// Re-check after the element may have moved, without an event.
    pub fn refresh(&mut self, host: &mut H) -> Option<Position> {
        self.recompute(host, None)
    }

    /// Recompute for a scroll or resize `event`, after consulting the throttle.
    ///
    /// Returns `None` when the throttle declines or the cycle is skipped.
    pub fn handle_event(&mut self, host: &mut H, event: &E) -> Option<Position> {
        if self.throttle.as_mut().is_some_and(|t| !t.admit(event)) {
            return None;
        }
        self.recompute(host, Some(event))
    }

    /// Measure, classify, and deliver transitions.
    ///
    /// Returns the classified position, or `None` if the cycle was skipped
    /// because the waypoint is not attached, has no node, the host has no
    /// window, or a measurement was unavailable.
    pub fn recompute(&mut self, host: &mut H, event: Option<&E>) -> Option<Position> {
        if host.viewport_size().is_none() {
            wtrace!("no window; recompute skipped");
            return None;
        }
        let Some(container) = self.resolve_container(host) else {
            wtrace!("not attached or no node; recompute skipped");
            return None;
        };
        let node = self.node.as_ref()?;
        let Some(bounds) = measure_bounds(
            &*host,
            node,
            &container,
            self.options.axis,
            &self.options.top_offset,
            &self.options.bottom_offset,
        ) else {
            wtrace!("measurement unavailable; recompute skipped");
            return None;
        };

        let debug = self.options.debug;
        wdebug!(
            debug,
            "waypoint top {}, bottom {}",
            bounds.waypoint_top,
            bounds.waypoint_bottom
        );
        wdebug!(
            debug,
            "scrollable ancestor {:?}: viewport top {}, bottom {}",
            container,
            bounds.viewport_top,
            bounds.viewport_bottom
        );

        let previous = self.tracker.previous();
        let transitions = self.tracker.update(&bounds);
        let current = self.tracker.previous()?;
        wdebug!(
            debug,
            "current position {current}, previous position {previous:?}"
        );

        for t in transitions {
            let args = CallbackArgs {
                current_position: t.current,
                previous_position: t.previous,
                event,
                waypoint_top: bounds.waypoint_top,
                waypoint_bottom: bounds.waypoint_bottom,
                viewport_top: bounds.viewport_top,
                viewport_bottom: bounds.viewport_bottom,
            };
            match t.kind {
                CallbackKind::PositionChange => (self.on_position_change)(&args),
                CallbackKind::Enter => (self.on_enter)(&args),
                CallbackKind::Leave => (self.on_leave)(&args),
            }
        }
        Some(current)
    }

    /// Tear down: cancel a pending tick, release subscriptions, cancel the
    /// throttle, and forget the recorded position.
    ///
    /// Safe to call in any state, any number of times.
    pub fn detach(&mut self, host: &mut H) {
        match core::mem::replace(&mut self.state, Lifecycle::Idle) {
            Lifecycle::Idle => {}
            Lifecycle::Scheduled(tick) => host.cancel_tick(tick),
            Lifecycle::Active { attachment, .. } => {
                if let Some(s) = attachment.scroll {
                    host.unsubscribe(s);
                }
                if let Some(s) = attachment.resize {
                    host.unsubscribe(s);
                }
            }
        }
        if let Some(throttle) = &mut self.throttle {
            throttle.cancel();
        }
        self.tracker.reset();
    }

    /// Resolve the container once a node is known, subscribing to its scroll events.
    fn resolve_container(&mut self, host: &mut H) -> Option<ScrollContainer<N>> {
        let Lifecycle::Active {
            container,
            attachment,
        } = &mut self.state
        else {
            return None;
        };
        if let Some(c) = container {
            return Some(c.clone());
        }
        let node = self.node.as_ref()?;
        let found = find_scrollable_ancestor(
            &*host,
            node,
            &self.options.scrollable_ancestor,
            self.options.axis,
        );
        wdebug!(self.options.debug, "scrollable ancestor resolved: {found:?}");
        attachment.scroll = Some(host.subscribe(found.clone(), EventKind::Scroll));
        *container = Some(found.clone());
        Some(found)
    }
}
