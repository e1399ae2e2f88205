// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use chrono::{DateTime, SecondsFormat, Utc};
use sha2::{Digest, Sha256};

use crate::entity::EntityKind;

/// Generate an entity ID from its kind, a content seed, and the creation instant.
/// Format: {kind}-{hash} where hash is first 8 hex chars of SHA256(kind + seed + timestamp)
pub fn generate_id(kind: EntityKind, seed: &str, created_at: &DateTime<Utc>) -> String {
    let input = format!(
        "{}{}{}",
        kind,
        seed,
        created_at.to_rfc3339_opts(SecondsFormat::Nanos, true)
    );
    let hash = Sha256::digest(input.as_bytes());
    let short_hash = hex::encode(&hash[..4]);
    format!("{}-{}", kind, short_hash)
}

/// Generate a unique ID, handling collisions by appending incrementing suffix.
///
/// A failing `exists` check aborts generation with its error.
pub fn generate_unique_id<F, E>(
    kind: EntityKind,
    seed: &str,
    created_at: &DateTime<Utc>,
    mut exists: F,
) -> Result<String, E>
where
    F: FnMut(&str) -> Result<bool, E>,
{
    let base_id = generate_id(kind, seed, created_at);

    if !exists(&base_id)? {
        return Ok(base_id);
    }

    let mut suffix = 2;
    loop {
        let id = format!("{}-{}", base_id, suffix);
        if !exists(&id)? {
            return Ok(id);
        }
        suffix += 1;
    }
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
