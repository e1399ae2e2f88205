// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Durable change queue for mutations made while disconnected.
//!
//! Each enqueue is a single committed row in the `changes` table, so pending
//! mutations survive a restart. The queue assigns sequence numbers with
//! `AUTOINCREMENT`, which keeps them strictly increasing even across
//! [`ChangeQueue::clear`].

use chrono::Utc;
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use crate::change::{ChangeEntry, NewChange};
use crate::db;
use crate::entity::Fields;
use crate::error::{Error, Result};

/// Ordered log of pending mutations.
pub struct ChangeQueue {
    conn: Mutex<Connection>,
}

impl ChangeQueue {
    /// Create or open a change queue in the database at the given path.
    pub fn open(path: &Path) -> Result<Self> {
        Ok(ChangeQueue {
            conn: Mutex::new(db::open(path)?),
        })
    }

    /// Open an in-memory queue (for testing).
    pub fn open_in_memory() -> Result<Self> {
        Ok(ChangeQueue {
            conn: Mutex::new(db::open_in_memory()?),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| Error::LockPoisoned)
    }

    /// Append a change, stamping it with the next sequence and the current time.
    ///
    /// The entry is committed before this returns.
    pub fn enqueue(&self, change: NewChange) -> Result<ChangeEntry> {
        let timestamp = Utc::now();
        let payload = change
            .payload
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO changes (entity_kind, operation, entity_id, payload, timestamp)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                change.entity_kind.as_str(),
                change.operation.as_str(),
                change.entity_id,
                payload,
                timestamp.to_rfc3339(),
            ],
        )?;
        let sequence = conn.last_insert_rowid();

        tracing::debug!(
            sequence,
            kind = %change.entity_kind,
            operation = %change.operation,
            id = %change.entity_id,
            "queued change"
        );

        Ok(ChangeEntry {
            sequence,
            entity_kind: change.entity_kind,
            operation: change.operation,
            entity_id: change.entity_id,
            payload: change.payload,
            timestamp,
        })
    }

    /// Read all queued changes in sequence order without removing them.
    pub fn get_all(&self) -> Result<Vec<ChangeEntry>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT sequence, entity_kind, operation, entity_id, payload, timestamp
             FROM changes ORDER BY sequence ASC",
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok(RawChange {
                    sequence: row.get(0)?,
                    entity_kind: row.get(1)?,
                    operation: row.get(2)?,
                    entity_id: row.get(3)?,
                    payload: row.get(4)?,
                    timestamp: row.get(5)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        rows.into_iter().map(RawChange::into_entry).collect()
    }

    /// Remove every queued change.
    pub fn clear(&self) -> Result<()> {
        let conn = self.conn()?;
        conn.execute("DELETE FROM changes", [])?;
        Ok(())
    }

    /// Get the number of queued changes.
    pub fn count(&self) -> Result<usize> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM changes", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Check if the queue is empty.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.count()? == 0)
    }
}

/// A `changes` row before its text columns are parsed.
struct RawChange {
    sequence: i64,
    entity_kind: String,
    operation: String,
    entity_id: String,
    payload: Option<String>,
    timestamp: String,
}

impl RawChange {
    fn into_entry(self) -> Result<ChangeEntry> {
        let payload = match self.payload {
            Some(text) => Some(serde_json::from_str::<Fields>(&text).map_err(|e| {
                Error::CorruptedData(format!("invalid payload for change {}: {e}", self.sequence))
            })?),
            None => None,
        };

        Ok(ChangeEntry {
            sequence: self.sequence,
            entity_kind: self.entity_kind.parse()?,
            operation: self.operation.parse()?,
            entity_id: self.entity_id,
            payload,
            timestamp: db::parse_timestamp(&self.timestamp, "timestamp")?,
        })
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
