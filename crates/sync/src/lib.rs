// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! tock-sync: Offline-first delivery of local writes to a remote store.
//!
//! # Architecture
//!
//! ```text
//!   domain code
//!        │  Storage (create / update / delete / get_all)
//!        ▼
//! ┌──────────────────┐     ┌──────────────┐     ┌─────────────┐
//! │ SyncOrchestrator │────►│ RemoteStore  │────►│   REST API  │
//! │                  │◄────│   (trait)    │◄────│             │
//! └──────────────────┘     └──────────────┘     └─────────────┘
//!    │          │
//!    ▼          ▼
//! ┌────────┐ ┌─────────────┐
//! │ Local  │ │ ChangeQueue │  (offline writes)
//! │ Store  │ │             │
//! └────────┘ └─────────────┘
//! ```
//!
//! # Features
//!
//! - Local writes always succeed without the network
//! - Failed remote writes are queued durably and the status flips to offline
//! - Liveness polling and connectivity signals trigger reconnect
//! - Reconnect compacts and replays the queue, then resyncs from the remote
//! - Injectable remote and connectivity traits for testing

mod config;
mod connectivity;
mod error;
mod orchestrator;
mod remote;
mod state;

pub use config::{
    SyncConfig, DEFAULT_HEALTH_TIMEOUT_SECS, DEFAULT_POLL_INTERVAL_SECS,
    DEFAULT_REQUEST_TIMEOUT_SECS,
};
pub use connectivity::{ConnectivityWatcher, ManualConnectivity};
pub use error::{RemoteError, RemoteResult, SyncError, SyncResult};
pub use orchestrator::{SyncCallback, SyncDeps, SyncOrchestrator, SyncOutcome, SyncReport};
pub use remote::{HttpRemote, RemoteStore};
pub use state::{ConnectionState, ConnectionStatus, SyncStatus};

#[cfg(test)]
mod test_helpers;
