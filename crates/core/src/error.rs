// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for tock-core operations.

use thiserror::Error;

use crate::entity::EntityKind;

/// All possible errors raised by the local store, the change queue and the
/// entity model.
///
/// Every variant is a local failure: callers see it immediately and nothing is
/// queued on its behalf.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },

    #[error("entity is missing a string 'id' field")]
    MissingId,

    #[error("invalid entity kind: '{0}'\n  hint: valid kinds are: tag, todo")]
    InvalidKind(String),

    #[error("invalid operation: '{0}'\n  hint: valid operations are: create, update, delete")]
    InvalidOperation(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("corrupted data: {0}")]
    CorruptedData(String),

    #[error("storage lock poisoned")]
    LockPoisoned,
}

/// A specialized Result type for tock-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
