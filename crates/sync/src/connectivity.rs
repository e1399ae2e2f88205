// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Pluggable connectivity signal sources.

use tokio::sync::watch;

/// A source of "network reachable" signals supplied by the host.
///
/// The orchestrator holds one subscription for its lifetime; dropping the
/// receiver detaches it.
pub trait ConnectivityWatcher: Send + Sync {
    /// Best current guess whether the network is reachable.
    fn currently_reachable(&self) -> bool;

    /// Subscribe to reachability transitions.
    fn on_change(&self) -> watch::Receiver<bool>;
}

/// Connectivity driven explicitly by the host (platform callbacks, tests).
#[derive(Debug)]
pub struct ManualConnectivity {
    tx: watch::Sender<bool>,
}

impl ManualConnectivity {
    pub fn new(reachable: bool) -> Self {
        let (tx, _) = watch::channel(reachable);
        ManualConnectivity { tx }
    }

    /// Record a reachability transition. Repeating the current value is a no-op.
    pub fn set_reachable(&self, reachable: bool) {
        self.tx.send_if_modified(|current| {
            if *current == reachable {
                return false;
            }
            *current = reachable;
            true
        });
    }
}

impl Default for ManualConnectivity {
    fn default() -> Self {
        ManualConnectivity::new(true)
    }
}

impl ConnectivityWatcher for ManualConnectivity {
    fn currently_reachable(&self) -> bool {
        *self.tx.borrow()
    }

    fn on_change(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
#[path = "connectivity_tests.rs"]
mod tests;
