// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `add`, `edit`, `rm` and `list`.

use std::io::Write;

use tock_core::EntityKind;

use super::Orchestrator;
use crate::error::Result;
use crate::fields::parse_assignments;

/// Create an entity and print it as JSON.
pub async fn add(
    orchestrator: &Orchestrator,
    kind: EntityKind,
    args: &[String],
    out: &mut impl Write,
) -> Result<()> {
    let input = parse_assignments(args)?;
    let entity = orchestrator.create(kind, input).await?;
    writeln!(out, "{}", serde_json::to_string(&entity)?)?;
    Ok(())
}

/// Apply a partial update and print the resulting entity.
pub async fn edit(
    orchestrator: &Orchestrator,
    kind: EntityKind,
    id: &str,
    args: &[String],
    out: &mut impl Write,
) -> Result<()> {
    let changes = parse_assignments(args)?;
    orchestrator.update(kind, id, changes).await?;
    if let Some(entity) = orchestrator.local().get(kind, id)? {
        writeln!(out, "{}", serde_json::to_string(&entity)?)?;
    }
    Ok(())
}

pub async fn rm(orchestrator: &Orchestrator, kind: EntityKind, id: &str) -> Result<()> {
    orchestrator.delete(kind, id).await?;
    Ok(())
}

/// Print local entities, one JSON object per line.
pub fn list(orchestrator: &Orchestrator, kind: EntityKind, out: &mut impl Write) -> Result<()> {
    for entity in orchestrator.local().get_all(kind)? {
        writeln!(out, "{}", serde_json::to_string(&entity)?)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "entity_tests.rs"]
mod tests;
