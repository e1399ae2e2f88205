// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod entity;
pub mod run;
pub mod status;
pub mod sync;

use std::sync::Arc;

use tock_sync::{
    HttpRemote, ManualConnectivity, SyncCallback, SyncConfig, SyncDeps, SyncOrchestrator,
};

use crate::config::Config;
use crate::error::Result;
use crate::remote::Remote;

/// The orchestrator type every command works through.
pub type Orchestrator = SyncOrchestrator<Remote>;

/// Open the database and start an orchestrator for this host.
///
/// The remote is presumed reachable when one is configured; a failed write
/// or probe corrects that belief.
pub fn open_orchestrator(
    config: &Config,
    on_sync_complete: Option<SyncCallback>,
) -> Result<Arc<Orchestrator>> {
    let db_path = config.db_path()?;
    let (remote, sync_config) = match config.sync_config() {
        Some(sync_config) => (Remote::Http(HttpRemote::new(&sync_config)?), sync_config),
        None => (
            Remote::Detached,
            SyncConfig {
                poll_interval: config.poll_interval(),
                ..SyncConfig::default()
            },
        ),
    };
    tracing::debug!(db = %db_path.display(), remote = %remote.describe(), "opening orchestrator");

    let connectivity = Arc::new(ManualConnectivity::new(remote.is_configured()));
    let mut deps = SyncDeps::open(&db_path, remote, connectivity)?;
    deps.on_sync_complete = on_sync_complete;

    Ok(SyncOrchestrator::init(deps, sync_config)?)
}

#[cfg(test)]
#[path = "mod_tests.rs"]
pub mod testing;
