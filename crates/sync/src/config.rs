// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::time::Duration;

/// Default interval between liveness probes while offline (seconds).
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 30;
/// Default bound on a single liveness probe (seconds).
pub const DEFAULT_HEALTH_TIMEOUT_SECS: u64 = 3;
/// Default bound on ordinary remote requests (seconds).
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Configuration for the remote store and the sync orchestrator.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Base URL of the remote REST API.
    pub base_url: String,
    /// Interval between liveness probes while offline.
    pub poll_interval: Duration,
    /// Bound on a single `GET /health` probe.
    pub health_timeout: Duration,
    /// Bound on every other remote request.
    pub request_timeout: Duration,
}

impl SyncConfig {
    /// Default configuration pointed at the given server.
    pub fn new(base_url: impl Into<String>) -> Self {
        SyncConfig {
            base_url: base_url.into(),
            ..SyncConfig::default()
        }
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        SyncConfig {
            base_url: "http://localhost:8080".to_string(),
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            health_timeout: Duration::from_secs(DEFAULT_HEALTH_TIMEOUT_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}
