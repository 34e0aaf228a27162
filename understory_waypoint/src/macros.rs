// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// Diagnostic lines go through `log` under one target so hosts can filter them.

/// Debug-mode diagnostics. Only emitted when the waypoint's `debug` option is set.
macro_rules! wdebug {
    ($enabled:expr, $($tt:tt)*) => {
        if $enabled {
            log::debug!(target: "understory_waypoint", $($tt)*);
        }
    };
}

/// Lifecycle detail, always routed to `trace`.
macro_rules! wtrace {
    ($($tt:tt)*) => {
        log::trace!(target: "understory_waypoint", $($tt)*)
    };
}
