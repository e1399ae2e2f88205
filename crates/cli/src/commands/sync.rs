// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Write;

use tock_sync::SyncOutcome;

use super::Orchestrator;
use crate::error::{Error, Result};

/// Run one reconnect cycle now.
pub async fn run(orchestrator: &Orchestrator, out: &mut impl Write) -> Result<()> {
    if !orchestrator.remote().is_configured() {
        return Err(Error::NoRemote);
    }

    match orchestrator.try_sync().await {
        SyncOutcome::Synced(report) => {
            writeln!(
                out,
                "synced: {} replayed, {} rejected, {} tags, {} todos",
                report.replayed, report.rejected, report.tags, report.todos
            )?;
            Ok(())
        }
        SyncOutcome::AlreadySyncing => {
            writeln!(out, "sync already in progress")?;
            Ok(())
        }
        SyncOutcome::Failed(message) => Err(Error::SyncFailed(message)),
    }
}
