// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! SQLite schema and connection setup shared by the local store and the
//! change queue.
//!
//! Both live in the same database file but hold their own connection, so
//! each can be locked independently.

use chrono::{DateTime, Utc};
use rusqlite::Connection;
use std::path::Path;

use crate::error::{Error, Result};

/// SQL schema for the local-first store.
pub const SCHEMA: &str = r#"
-- Tags, stored as opaque JSON documents
CREATE TABLE IF NOT EXISTS tags (
    id TEXT PRIMARY KEY,
    data TEXT NOT NULL,
    created_at TEXT NOT NULL
);

-- Todos, with a strictly increasing sort position
CREATE TABLE IF NOT EXISTS todos (
    id TEXT PRIMARY KEY,
    data TEXT NOT NULL,
    sort_order INTEGER NOT NULL,
    created_at TEXT NOT NULL
);

-- Mutations waiting for delivery to the remote store
CREATE TABLE IF NOT EXISTS changes (
    sequence INTEGER PRIMARY KEY AUTOINCREMENT,
    entity_kind TEXT NOT NULL,
    operation TEXT NOT NULL,
    entity_id TEXT NOT NULL,
    payload TEXT,
    timestamp TEXT NOT NULL
);

-- Monotonic counters that never hand out a value twice
CREATE TABLE IF NOT EXISTS counters (
    name TEXT PRIMARY KEY,
    value INTEGER NOT NULL
);

-- Indexes
CREATE INDEX IF NOT EXISTS idx_todos_sort_order ON todos(sort_order);
CREATE INDEX IF NOT EXISTS idx_changes_entity ON changes(entity_kind, entity_id);
"#;

/// Run schema creation on a database connection.
///
/// This is the single migration path for the local store and the queue.
/// Every statement is idempotent, so it runs on every open.
pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

/// Open a connection to the database at `path`, creating and migrating it if needed.
pub fn open(path: &Path) -> Result<Connection> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let conn = Connection::open(path)?;

    // WAL lets the store and the queue connections work side by side
    conn.execute_batch(
        "PRAGMA journal_mode = WAL;
         PRAGMA busy_timeout = 5000;",
    )?;

    run_migrations(&conn)?;
    Ok(conn)
}

/// Open an in-memory database (for testing).
pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    run_migrations(&conn)?;
    Ok(conn)
}

/// Parse an RFC3339 timestamp from the database.
pub(crate) fn parse_timestamp(value: &str, column: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            Error::CorruptedData(format!("invalid timestamp '{value}' in column '{column}'"))
        })
}

#[cfg(test)]
#[path = "db_tests.rs"]
mod tests;
