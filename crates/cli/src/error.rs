// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

/// All errors the `tock` command can report.
///
/// Remote failures during ordinary writes never appear here: those are
/// queued by the orchestrator.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid config: {0}")]
    Config(String),

    #[error("invalid field '{0}'\n  hint: fields are written as key=value")]
    InvalidField(String),

    #[error("no remote configured\n  hint: set remote_url in the config file")]
    NoRemote,

    #[error("sync failed: {0}")]
    SyncFailed(String),

    #[error(transparent)]
    Core(#[from] tock_core::Error),

    #[error(transparent)]
    Remote(#[from] tock_sync::RemoteError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for CLI operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
