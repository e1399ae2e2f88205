// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Write;

use tock_sync::{RemoteStore, SyncStatus};

use super::Orchestrator;
use crate::error::Result;

/// One-line summary used by `status` and `run`.
pub fn summary(status: &SyncStatus) -> String {
    let mut line = format!("{} ({} pending)", status.status, status.pending_changes);
    if let Some(error) = &status.last_error {
        line.push_str(&format!(", last error: {error}"));
    }
    line
}

/// Print connectivity belief, pending changes and remote health.
pub async fn run(orchestrator: &Orchestrator, out: &mut impl Write) -> Result<()> {
    let status = orchestrator.connection().snapshot();
    let remote = orchestrator.remote();

    writeln!(out, "status: {}", status.status)?;
    writeln!(out, "pending: {}", status.pending_changes)?;
    if remote.is_configured() {
        let health = if remote.health_check().await {
            "reachable"
        } else {
            "unreachable"
        };
        writeln!(out, "remote: {} ({health})", remote.describe())?;
    } else {
        writeln!(out, "remote: {}", remote.describe())?;
    }
    if let Some(error) = &status.last_error {
        writeln!(out, "last error: {error}")?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
