// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Long-lived mode: keep the poller alive and report status changes.

use std::future::Future;
use std::io::Write;

use super::status::summary;
use super::Orchestrator;
use crate::error::Result;

/// Print every status change until `shutdown` resolves.
///
/// Pending changes left by earlier invocations are replayed right away
/// instead of waiting for the first poll tick.
pub async fn run(
    orchestrator: &Orchestrator,
    shutdown: impl Future<Output = ()>,
    out: &mut impl Write,
) -> Result<()> {
    let mut status = orchestrator.connection().subscribe();
    writeln!(out, "{}", summary(&status.borrow_and_update()))?;

    if orchestrator.remote().is_configured() && orchestrator.pending_changes() > 0 {
        orchestrator.try_sync().await;
    }

    tokio::pin!(shutdown);
    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            changed = status.changed() => {
                if changed.is_err() {
                    break;
                }
                let current = status.borrow_and_update().clone();
                writeln!(out, "{}", summary(&current))?;
                out.flush()?;
            }
        }
    }

    tracing::info!("shutting down");
    Ok(())
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
