// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Offset parsing: pixel numbers, pixel strings, and percentages.
//!
//! Offsets shrink (or, when negative, extend) the visible window of the scroll
//! container. They are normalized to pixels at evaluation time against the
//! container's current extent, so percentages follow a container that resizes.
//!
//! ```
//! use understory_waypoint::offset::{Offset, compute_offset_pixels};
//!
//! assert_eq!(compute_offset_pixels(&Offset::from("20%"), 100.0), Some(20.0));
//! assert_eq!(compute_offset_pixels(&Offset::from("-10px"), 640.0), Some(-10.0));
//! assert_eq!(compute_offset_pixels(&Offset::from(25.0), 640.0), Some(25.0));
//! assert_eq!(compute_offset_pixels(&Offset::from("not-a-number"), 100.0), None);
//! ```

use alloc::string::String;

/// A user-supplied offset.
#[derive(Clone, Debug, PartialEq)]
pub enum Offset {
    /// A pixel quantity given as a number.
    Pixels(f64),
    /// A textual quantity: `"20"`, `"20px"`, or `"20%"`. Parsed on every evaluation.
    Text(String),
}

impl Default for Offset {
    fn default() -> Self {
        Self::Pixels(0.0)
    }
}

impl From<f64> for Offset {
    fn from(px: f64) -> Self {
        Self::Pixels(px)
    }
}

impl From<i32> for Offset {
    fn from(px: i32) -> Self {
        Self::Pixels(f64::from(px))
    }
}

impl From<&str> for Offset {
    fn from(text: &str) -> Self {
        Self::Text(text.into())
    }
}

impl From<String> for Offset {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl Offset {
    /// Shorthand for [`compute_offset_pixels`].
    #[inline]
    pub fn to_pixels(&self, context_height: f64) -> Option<f64> {
        compute_offset_pixels(self, context_height)
    }
}

/// Convert `offset` into pixels relative to `context_height`.
///
/// Returns `None` when the offset cannot be parsed (including non-finite numbers).
/// Callers decide how to treat a failure; the waypoint treats it as zero pixels.
pub fn compute_offset_pixels(offset: &Offset, context_height: f64) -> Option<f64> {
    match offset {
        Offset::Pixels(px) => px.is_finite().then_some(*px),
        Offset::Text(text) => parse_offset_as_pixels(text)
            .or_else(|| parse_offset_as_percentage(text).map(|f| f * context_height)),
    }
}

/// Parse a plain number or a number suffixed with `px`.
pub fn parse_offset_as_pixels(text: &str) -> Option<f64> {
    let text = text.trim();
    parse_finite(text).or_else(|| text.strip_suffix("px").and_then(parse_finite))
}

/// Parse a number suffixed with `%`, returning it as a fraction (`"20%"` is `0.2`).
pub fn parse_offset_as_percentage(text: &str) -> Option<f64> {
    text.trim()
        .strip_suffix('%')
        .and_then(parse_finite)
        .map(|pct| pct / 100.0)
}

fn parse_finite(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}
