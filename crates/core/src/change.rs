// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Pending mutations that could not be delivered to the remote store.
//!
//! A [`ChangeEntry`] is appended to the change queue whenever a remote write
//! fails or is skipped because the engine believes it is offline. Entries are
//! never edited in place: repeated mutations of the same entity append new
//! entries, and the compactor folds them together before replay.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::entity::{Entity, EntityKind, Fields};
use crate::error::{Error, Result};

/// The kind of mutation a change entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Create,
    Update,
    Delete,
}

impl Operation {
    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Operation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "create" => Ok(Operation::Create),
            "update" => Ok(Operation::Update),
            "delete" => Ok(Operation::Delete),
            _ => Err(Error::InvalidOperation(s.to_string())),
        }
    }
}

/// A durable record of an attempted mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeEntry {
    /// Queue-assigned ordering key, strictly increasing per queue.
    pub sequence: i64,
    pub entity_kind: EntityKind,
    pub operation: Operation,
    /// Assigned when the entity was created locally, before queueing.
    pub entity_id: String,
    /// Full snapshot for creates, partial field set for updates, `None` for deletes.
    pub payload: Option<Fields>,
    /// Wall-clock time of the attempt.
    pub timestamp: DateTime<Utc>,
}

impl ChangeEntry {
    /// Returns the `(kind, id)` pair the entry is grouped by during compaction.
    pub fn key(&self) -> (EntityKind, &str) {
        (self.entity_kind, &self.entity_id)
    }
}

/// A change waiting to be enqueued; the queue assigns sequence and timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct NewChange {
    pub entity_kind: EntityKind,
    pub operation: Operation,
    pub entity_id: String,
    pub payload: Option<Fields>,
}

impl NewChange {
    /// A create carrying the full locally-produced snapshot.
    pub fn create(kind: EntityKind, entity: &Entity) -> Self {
        NewChange {
            entity_kind: kind,
            operation: Operation::Create,
            entity_id: entity.id().to_string(),
            payload: Some(entity.fields().clone()),
        }
    }

    /// An update carrying only the changed fields.
    pub fn update(kind: EntityKind, id: impl Into<String>, changes: Fields) -> Self {
        NewChange {
            entity_kind: kind,
            operation: Operation::Update,
            entity_id: id.into(),
            payload: Some(changes),
        }
    }

    pub fn delete(kind: EntityKind, id: impl Into<String>) -> Self {
        NewChange {
            entity_kind: kind,
            operation: Operation::Delete,
            entity_id: id.into(),
            payload: None,
        }
    }
}

#[cfg(test)]
#[path = "change_tests.rs"]
mod tests;
