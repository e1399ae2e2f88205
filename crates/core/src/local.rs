// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Durable local entity store.
//!
//! The [`LocalStore`] is the optimistic side of every write: it never talks to
//! the network, assigns ids and timestamps on create, and gives todos a
//! strictly increasing `sortOrder`. It is also the target of the full resync,
//! which replaces both tables in a single transaction.

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use crate::db;
use crate::entity::{Entity, EntityKind, Fields};
use crate::error::{Error, Result};
use crate::id::generate_unique_id;

/// Field stamped with the creation instant.
pub const CREATED_AT_FIELD: &str = "createdAt";
/// Field stamped with the last local modification instant.
pub const UPDATED_AT_FIELD: &str = "updatedAt";
/// Todo field holding the insertion order.
pub const SORT_ORDER_FIELD: &str = "sortOrder";

const SORT_ORDER_COUNTER: &str = "todo_sort_order";

// Fresh rows must not clobber an existing id; resync rows replace.
const INSERT: &str = "INSERT";
const UPSERT: &str = "INSERT OR REPLACE";

/// SQLite-backed store for tags and todos.
pub struct LocalStore {
    conn: Mutex<Connection>,
}

impl LocalStore {
    /// Open the store at the given path, creating and migrating if needed.
    pub fn open(path: &Path) -> Result<Self> {
        Ok(LocalStore {
            conn: Mutex::new(db::open(path)?),
        })
    }

    /// Open an in-memory store (for testing).
    pub fn open_in_memory() -> Result<Self> {
        Ok(LocalStore {
            conn: Mutex::new(db::open_in_memory()?),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| Error::LockPoisoned)
    }

    /// Create an entity, assigning its id, timestamps and kind-specific defaults.
    ///
    /// Any `id` present in `input` is replaced. A todo's `sortOrder` is higher
    /// than every todo created before it, deleted ones included.
    pub fn create(&self, kind: EntityKind, input: Fields) -> Result<Entity> {
        let now = Utc::now();
        let stamp = now.to_rfc3339();
        let seed = serde_json::to_string(&input)?;

        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        let id = generate_unique_id(kind, &seed, &now, |candidate| {
            row_exists(&tx, kind, candidate)
        })?;

        let mut entity = Entity::with_id(id, input);
        entity.set(CREATED_AT_FIELD, Value::String(stamp.clone()));
        entity.set(UPDATED_AT_FIELD, Value::String(stamp.clone()));

        let sort_order = match kind {
            EntityKind::Tag => None,
            EntityKind::Todo => {
                let next = next_sort_order(&tx)?;
                entity.set(SORT_ORDER_FIELD, Value::from(next));
                Some(next)
            }
        };

        insert_row(&tx, INSERT, kind, &entity, sort_order, &stamp)?;
        tx.commit()?;

        tracing::debug!(kind = %kind, id = entity.id(), "created local entity");
        Ok(entity)
    }

    /// Merge a partial change set into an existing entity.
    pub fn update(&self, kind: EntityKind, id: &str, changes: &Fields) -> Result<()> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        let mut entity = load_row(&tx, kind, id)?.ok_or_else(|| Error::NotFound {
            kind,
            id: id.to_string(),
        })?;
        entity.apply(changes);
        entity.set(UPDATED_AT_FIELD, Value::String(Utc::now().to_rfc3339()));

        let data = serde_json::to_string(&entity)?;
        match (kind, changes.get(SORT_ORDER_FIELD).and_then(Value::as_i64)) {
            (EntityKind::Todo, Some(sort_order)) => tx.execute(
                "UPDATE todos SET data = ?1, sort_order = ?2 WHERE id = ?3",
                params![data, sort_order, id],
            )?,
            _ => tx.execute(
                &format!("UPDATE {} SET data = ?1 WHERE id = ?2", kind.collection()),
                params![data, id],
            )?,
        };

        tx.commit()?;
        Ok(())
    }

    /// Delete an entity. Deleting a missing entity is a no-op.
    pub fn delete(&self, kind: EntityKind, id: &str) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(
            &format!("DELETE FROM {} WHERE id = ?1", kind.collection()),
            params![id],
        )?;
        Ok(())
    }

    /// Get a single entity by id.
    pub fn get(&self, kind: EntityKind, id: &str) -> Result<Option<Entity>> {
        let conn = self.conn()?;
        load_row(&conn, kind, id)
    }

    /// Get every entity of a kind. Todos come back in sort order, tags in
    /// insertion order.
    pub fn get_all(&self, kind: EntityKind) -> Result<Vec<Entity>> {
        let conn = self.conn()?;
        let sql = match kind {
            EntityKind::Tag => "SELECT data FROM tags ORDER BY rowid",
            EntityKind::Todo => "SELECT data FROM todos ORDER BY sort_order, rowid",
        };

        let mut stmt = conn.prepare(sql)?;
        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        rows.iter().map(|data| decode(kind, data)).collect()
    }

    /// Count the entities of a kind.
    pub fn count(&self, kind: EntityKind) -> Result<usize> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", kind.collection()),
            [],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    /// Atomically replace the contents of both tables.
    ///
    /// Used by the full resync: either both tables reflect the new sets or
    /// neither changes. Todos without a numeric `sortOrder` are placed after
    /// the highest one present.
    pub fn replace_all(&self, tags: &[Entity], todos: &[Entity]) -> Result<()> {
        let now = Utc::now().to_rfc3339();
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        tx.execute("DELETE FROM tags", [])?;
        tx.execute("DELETE FROM todos", [])?;

        for tag in tags {
            insert_row(&tx, UPSERT, EntityKind::Tag, tag, None, created_at(tag, &now))?;
        }

        let mut next = todos
            .iter()
            .filter_map(|todo| todo.get(SORT_ORDER_FIELD).and_then(Value::as_i64))
            .max()
            .unwrap_or(0);
        for todo in todos {
            let sort_order = match todo.get(SORT_ORDER_FIELD).and_then(Value::as_i64) {
                Some(sort_order) => sort_order,
                None => {
                    next += 1;
                    next
                }
            };
            insert_row(
                &tx,
                UPSERT,
                EntityKind::Todo,
                todo,
                Some(sort_order),
                created_at(todo, &now),
            )?;
        }

        tx.commit()?;
        tracing::debug!(
            tags = tags.len(),
            todos = todos.len(),
            "replaced local store contents"
        );
        Ok(())
    }
}

fn created_at<'a>(entity: &'a Entity, fallback: &'a str) -> &'a str {
    entity
        .get(CREATED_AT_FIELD)
        .and_then(Value::as_str)
        .unwrap_or(fallback)
}

fn row_exists(conn: &Connection, kind: EntityKind, id: &str) -> Result<bool> {
    let count: i64 = conn.query_row(
        &format!("SELECT COUNT(*) FROM {} WHERE id = ?1", kind.collection()),
        params![id],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

fn load_row(conn: &Connection, kind: EntityKind, id: &str) -> Result<Option<Entity>> {
    let data: Option<String> = conn
        .query_row(
            &format!("SELECT data FROM {} WHERE id = ?1", kind.collection()),
            params![id],
            |row| row.get(0),
        )
        .optional()?;

    data.map(|data| decode(kind, &data)).transpose()
}

/// Reserve the next todo position from the persisted counter.
fn next_sort_order(conn: &Connection) -> Result<i64> {
    let next: i64 = conn.query_row(
        "SELECT MAX(
             COALESCE((SELECT MAX(sort_order) FROM todos), 0),
             COALESCE((SELECT value FROM counters WHERE name = ?1), 0)
         ) + 1",
        params![SORT_ORDER_COUNTER],
        |row| row.get(0),
    )?;
    conn.execute(
        "INSERT INTO counters (name, value) VALUES (?1, ?2)
         ON CONFLICT(name) DO UPDATE SET value = excluded.value",
        params![SORT_ORDER_COUNTER, next],
    )?;
    Ok(next)
}

fn insert_row(
    conn: &Connection,
    verb: &str,
    kind: EntityKind,
    entity: &Entity,
    sort_order: Option<i64>,
    created_at: &str,
) -> Result<()> {
    let data = serde_json::to_string(entity)?;
    match kind {
        EntityKind::Tag => conn.execute(
            &format!("{verb} INTO tags (id, data, created_at) VALUES (?1, ?2, ?3)"),
            params![entity.id(), data, created_at],
        )?,
        EntityKind::Todo => conn.execute(
            &format!(
                "{verb} INTO todos (id, data, sort_order, created_at) VALUES (?1, ?2, ?3, ?4)"
            ),
            params![entity.id(), data, sort_order.unwrap_or(0), created_at],
        )?,
    };
    Ok(())
}

fn decode(kind: EntityKind, data: &str) -> Result<Entity> {
    serde_json::from_str(data)
        .map_err(|e| Error::CorruptedData(format!("invalid {kind} record: {e}")))
}

#[cfg(test)]
#[path = "local_tests.rs"]
mod tests;
