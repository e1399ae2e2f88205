// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Observable connection status for UI collaborators.
//!
//! The status cycles `online → offline → syncing → online`. A sync always
//! ends in `online` (success) or `offline` (failure).

use std::fmt;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// Connectivity belief as shown to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    /// Writes reach the remote store directly.
    Online,
    /// Writes are queued locally.
    Offline,
    /// A reconnect cycle is in progress.
    Syncing,
}

impl ConnectionStatus {
    /// Returns the lowercase name of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionStatus::Online => "online",
            ConnectionStatus::Offline => "offline",
            ConnectionStatus::Syncing => "syncing",
        }
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Point-in-time view of the connection state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncStatus {
    pub status: ConnectionStatus,
    pub pending_changes: usize,
    pub last_error: Option<String>,
}

impl Default for SyncStatus {
    fn default() -> Self {
        SyncStatus {
            status: ConnectionStatus::Online,
            pending_changes: 0,
            last_error: None,
        }
    }
}

/// Shared, observable connection state.
///
/// Each setter notifies subscribers only when the value actually changes.
#[derive(Debug)]
pub struct ConnectionState {
    tx: watch::Sender<SyncStatus>,
}

impl ConnectionState {
    /// Create a state that starts with the given status.
    pub fn new(status: ConnectionStatus) -> Self {
        let (tx, _) = watch::channel(SyncStatus {
            status,
            ..SyncStatus::default()
        });
        ConnectionState { tx }
    }

    pub fn status(&self) -> ConnectionStatus {
        self.tx.borrow().status
    }

    pub fn pending_changes(&self) -> usize {
        self.tx.borrow().pending_changes
    }

    pub fn last_error(&self) -> Option<String> {
        self.tx.borrow().last_error.clone()
    }

    /// Current value of every field.
    pub fn snapshot(&self) -> SyncStatus {
        self.tx.borrow().clone()
    }

    /// Subscribe to changes. The receiver sees the current value as seen.
    pub fn subscribe(&self) -> watch::Receiver<SyncStatus> {
        self.tx.subscribe()
    }

    pub fn set_status(&self, status: ConnectionStatus) {
        let changed = self.tx.send_if_modified(|current| {
            if current.status == status {
                return false;
            }
            current.status = status;
            true
        });
        if changed {
            tracing::info!(%status, "connection status changed");
        }
    }

    pub fn set_pending_changes(&self, count: usize) {
        self.tx.send_if_modified(|current| {
            if current.pending_changes == count {
                return false;
            }
            current.pending_changes = count;
            true
        });
    }

    pub fn set_last_error(&self, message: Option<String>) {
        self.tx.send_if_modified(|current| {
            if current.last_error == message {
                return false;
            }
            current.last_error = message;
            true
        });
    }
}

impl Default for ConnectionState {
    fn default() -> Self {
        ConnectionState::new(ConnectionStatus::Online)
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
