// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Change-log compaction.
//!
//! Reduces a raw queue to the minimal list of remote calls that reaches the
//! same end state. Rules, applied per `(entity_kind, entity_id)` group:
//!
//! - create + delete: the entity never reached the remote; emit nothing
//! - create (no delete): fold later updates into the create payload
//! - delete (no create): drop the updates and emit the delete
//! - updates only: merge payloads into one update
//!
//! Field merges are last write wins in sequence order. The output is ordered
//! tag creates, todo creates, updates, deletes, with sequence as tiebreaker.
//! Compaction is deterministic and idempotent.

use std::collections::HashMap;

use crate::change::{ChangeEntry, Operation};
use crate::entity::{EntityKind, Fields};

/// Compacts a list of change entries.
pub fn compact(entries: &[ChangeEntry]) -> Vec<ChangeEntry> {
    let mut ordered: Vec<&ChangeEntry> = entries.iter().collect();
    ordered.sort_by_key(|entry| entry.sequence);

    let mut index: HashMap<(EntityKind, &str), usize> = HashMap::new();
    let mut groups: Vec<Vec<&ChangeEntry>> = Vec::new();
    for entry in ordered {
        let slot = *index.entry(entry.key()).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[slot].push(entry);
    }

    let mut compacted: Vec<ChangeEntry> = groups
        .iter()
        .filter_map(|group| compact_group(group))
        .collect();

    compacted.sort_by_key(|entry| (replay_rank(entry), entry.sequence));
    compacted
}

/// Reduces one entity's history (sorted by sequence) to at most one entry.
fn compact_group(group: &[&ChangeEntry]) -> Option<ChangeEntry> {
    let first = group.first()?;
    let has = |op: Operation| group.iter().any(|entry| entry.operation == op);
    let latest = group.iter().map(|entry| entry.timestamp).max()?;

    match (has(Operation::Create), has(Operation::Delete)) {
        (true, true) => None,
        (true, false) => {
            let position = group
                .iter()
                .position(|entry| entry.operation == Operation::Create)?;
            let create = group[position];
            let mut payload = create.payload.clone().unwrap_or_default();
            for entry in &group[position + 1..] {
                merge_into(&mut payload, entry.payload.as_ref());
            }
            Some(ChangeEntry {
                payload: Some(payload),
                timestamp: latest,
                ..create.clone()
            })
        }
        (false, true) => group
            .iter()
            .rev()
            .find(|entry| entry.operation == Operation::Delete)
            .map(|entry| (*entry).clone()),
        (false, false) => {
            let mut payload = Fields::new();
            for entry in group {
                merge_into(&mut payload, entry.payload.as_ref());
            }
            Some(ChangeEntry {
                operation: Operation::Update,
                payload: Some(payload),
                timestamp: latest,
                ..(*first).clone()
            })
        }
    }
}

fn merge_into(target: &mut Fields, changes: Option<&Fields>) {
    if let Some(changes) = changes {
        for (key, value) in changes {
            target.insert(key.clone(), value.clone());
        }
    }
}

/// Replay order: tag creates, todo creates, updates, deletes.
fn replay_rank(entry: &ChangeEntry) -> u8 {
    match (entry.operation, entry.entity_kind) {
        (Operation::Create, EntityKind::Tag) => 0,
        (Operation::Create, EntityKind::Todo) => 1,
        (Operation::Update, _) => 2,
        (Operation::Delete, _) => 3,
    }
}

#[cfg(test)]
#[path = "compact_tests.rs"]
mod tests;
