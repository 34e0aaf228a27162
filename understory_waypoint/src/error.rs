// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Setup errors.

use alloc::string::String;
use core::fmt;

/// A contract violation detected while configuring or attaching a waypoint.
///
/// Measurement failures are never errors: a cycle that cannot measure is skipped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WaypointError {
    /// An option that was renamed.
    LegacyOption {
        /// The name that was supplied.
        name: &'static str,
        /// The name to use instead.
        replacement: &'static str,
    },
    /// An option whose value has the wrong type or an unsupported value.
    InvalidOption {
        /// Option name as supplied.
        name: String,
        /// Description of what is accepted.
        expected: &'static str,
    },
    /// Content is neither a render callback nor exactly one element.
    InvalidChildren,
    /// Content exposes neither a host node nor a way to obtain one.
    MissingNodeRef,
}

impl fmt::Display for WaypointError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LegacyOption { name, replacement } => {
                write!(f, "The `{name}` option has been renamed to `{replacement}`.")
            }
            Self::InvalidOption { name, expected } => {
                write!(f, "Invalid value for the `{name}` option: expected {expected}.")
            }
            Self::InvalidChildren => f.write_str(
                "A waypoint expects either a render callback or a single element as its content.",
            ),
            Self::MissingNodeRef => f.write_str(
                "A waypoint needs a host node to compute boundaries. The content is neither a \
                 host element nor does it forward a node reference.",
            ),
        }
    }
}

impl core::error::Error for WaypointError {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn messages_name_the_contract() {
        let legacy = WaypointError::LegacyOption {
            name: "scrollableParent",
            replacement: "scrollableAncestor",
        };
        assert_eq!(
            legacy.to_string(),
            "The `scrollableParent` option has been renamed to `scrollableAncestor`."
        );

        let invalid = WaypointError::InvalidOption {
            name: "topOffset".into(),
            expected: "a number or a string",
        };
        assert!(invalid.to_string().contains("`topOffset`"));
        assert!(WaypointError::InvalidChildren.to_string().contains("single element"));
        assert!(WaypointError::MissingNodeRef.to_string().contains("host node"));
    }
}
