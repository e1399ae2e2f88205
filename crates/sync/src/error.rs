// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for remote access and sync cycles.

/// Error type for remote store operations.
///
/// These never reach the callers of ordinary writes: the orchestrator turns
/// them into a queued change and an `offline` status.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    /// The server answered with a non-success status.
    #[error("remote returned {status}: {body}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body text.
        body: String,
    },

    /// Network failure or timeout.
    #[error("transport error: {0}")]
    Transport(String),

    /// Response body could not be decoded.
    #[error("invalid response: {0}")]
    Decode(String),

    /// The server returned a record without a usable id.
    #[error("invalid entity from remote: {0}")]
    InvalidEntity(String),

    /// The configured base URL cannot be used.
    #[error("invalid remote url: {0}")]
    InvalidUrl(String),
}

/// Result type for remote store operations.
pub type RemoteResult<T> = Result<T, RemoteError>;

/// Error type for a failed sync cycle.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// Local store or queue error.
    #[error("local storage error: {0}")]
    Local(#[from] tock_core::Error),

    /// Remote error fatal to the cycle (the full resync fetch).
    #[error(transparent)]
    Remote(#[from] RemoteError),
}

/// Result type for sync cycles.
pub type SyncResult<T> = Result<T, SyncError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
