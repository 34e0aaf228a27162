// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Waypoint configuration.
//!
//! Options are built either in code with the `with_*` setters, or loaded from a
//! framework-style list of named props with [`WaypointOptions::from_props`].
//!
//! ```
//! use understory_waypoint::options::{PropValue, WaypointOptions};
//! use understory_waypoint::types::Axis;
//!
//! let opts = WaypointOptions::<u32>::from_props([
//!     ("horizontal", PropValue::Bool(true)),
//!     ("topOffset", PropValue::Text("20%".into())),
//!     ("onEnter", PropValue::Bool(true)), // not an option; ignored
//! ])
//! .unwrap();
//! assert_eq!(opts.axis, Axis::Horizontal);
//!
//! let err = WaypointOptions::<u32>::from_props([("scrollableParent", PropValue::Node(1))]);
//! assert!(err.is_err());
//! ```

use alloc::string::{String, ToString};

use crate::ancestor::ScrollableAncestor;
use crate::error::WaypointError;
use crate::offset::Offset;
use crate::types::Axis;

/// Configuration for one waypoint.
#[derive(Clone, Debug, PartialEq)]
pub struct WaypointOptions<N> {
    /// Tracked axis.
    pub axis: Axis,
    /// Shrinks the visible window from its leading edge.
    pub top_offset: Offset,
    /// Shrinks the visible window from its trailing edge.
    pub bottom_offset: Offset,
    /// Container to judge against.
    pub scrollable_ancestor: ScrollableAncestor<N>,
    /// Synthesize an enter/leave pair when a single scroll jumps over the window.
    pub fire_on_rapid_scroll: bool,
    /// Emit diagnostic log lines for every measurement.
    pub debug: bool,
}

impl<N> Default for WaypointOptions<N> {
    fn default() -> Self {
        Self {
            axis: Axis::Vertical,
            top_offset: Offset::default(),
            bottom_offset: Offset::default(),
            scrollable_ancestor: ScrollableAncestor::Auto,
            fire_on_rapid_scroll: true,
            debug: false,
        }
    }
}

impl<N> WaypointOptions<N> {
    /// Set the tracked axis.
    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    /// Set the leading-edge offset.
    pub fn with_top_offset(mut self, offset: impl Into<Offset>) -> Self {
        self.top_offset = offset.into();
        self
    }

    /// Set the trailing-edge offset.
    pub fn with_bottom_offset(mut self, offset: impl Into<Offset>) -> Self {
        self.bottom_offset = offset.into();
        self
    }

    /// Set the scroll container.
    pub fn with_scrollable_ancestor(mut self, ancestor: ScrollableAncestor<N>) -> Self {
        self.scrollable_ancestor = ancestor;
        self
    }

    /// Toggle rapid-scroll compensation.
    pub fn with_fire_on_rapid_scroll(mut self, enabled: bool) -> Self {
        self.fire_on_rapid_scroll = enabled;
        self
    }

    /// Toggle diagnostic logging.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Load options from named props, starting from the defaults.
    ///
    /// Recognized names: `horizontal`, `topOffset`, `bottomOffset`,
    /// `scrollableAncestor`, `fireOnRapidScroll`, `debug`. Other names are
    /// ignored so adapters can forward every prop they receive.
    ///
    /// # Errors
    ///
    /// - [`WaypointError::LegacyOption`] for `scrollableParent`.
    /// - [`WaypointError::InvalidOption`] for a value of the wrong type, or a
    ///   `scrollableAncestor` string other than `"window"`.
    pub fn from_props<'a, I>(props: I) -> Result<Self, WaypointError>
    where
        I: IntoIterator<Item = (&'a str, PropValue<N>)>,
    {
        let mut opts = Self::default();
        for (name, value) in props {
            match name {
                "scrollableParent" => {
                    return Err(WaypointError::LegacyOption {
                        name: "scrollableParent",
                        replacement: "scrollableAncestor",
                    });
                }
                "horizontal" => {
                    let horizontal = value.into_bool().ok_or_else(|| invalid(name, BOOL))?;
                    opts.axis = if horizontal {
                        Axis::Horizontal
                    } else {
                        Axis::Vertical
                    };
                }
                "topOffset" => {
                    opts.top_offset = value.into_offset().ok_or_else(|| invalid(name, OFFSET))?;
                }
                "bottomOffset" => {
                    opts.bottom_offset =
                        value.into_offset().ok_or_else(|| invalid(name, OFFSET))?;
                }
                "scrollableAncestor" => {
                    opts.scrollable_ancestor =
                        value.into_ancestor().ok_or_else(|| invalid(name, ANCESTOR))?;
                }
                "fireOnRapidScroll" => {
                    opts.fire_on_rapid_scroll =
                        value.into_bool().ok_or_else(|| invalid(name, BOOL))?;
                }
                "debug" => {
                    opts.debug = value.into_bool().ok_or_else(|| invalid(name, BOOL))?;
                }
                _ => {}
            }
        }
        Ok(opts)
    }
}

const BOOL: &str = "a boolean";
const OFFSET: &str = "a number or a string such as \"20px\" or \"20%\"";
const ANCESTOR: &str = "the string \"window\" or a node";

fn invalid(name: &str, expected: &'static str) -> WaypointError {
    WaypointError::InvalidOption {
        name: name.to_string(),
        expected,
    }
}

/// A dynamically typed prop value.
#[derive(Clone, Debug, PartialEq)]
pub enum PropValue<N> {
    /// A boolean.
    Bool(bool),
    /// A number.
    Number(f64),
    /// A string.
    Text(String),
    /// A host node.
    Node(N),
}

impl<N> PropValue<N> {
    fn into_bool(self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(b),
            _ => None,
        }
    }

    fn into_offset(self) -> Option<Offset> {
        match self {
            Self::Number(px) => Some(Offset::Pixels(px)),
            Self::Text(text) => Some(Offset::Text(text)),
            _ => None,
        }
    }

    fn into_ancestor(self) -> Option<ScrollableAncestor<N>> {
        match self {
            Self::Text(text) => ScrollableAncestor::from_sentinel(&text),
            Self::Node(n) => Some(ScrollableAncestor::Node(n)),
            _ => None,
        }
    }
}
