// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Sync orchestrator: the single writer in front of the local and remote stores.
//!
//! Every mutation lands in the local store first. While online the same
//! mutation is sent to the remote store; if that fails (or the orchestrator
//! already believes it is offline) the mutation is appended to the change
//! queue instead and the status flips to `offline`.
//!
//! Reconnect cycle ([`SyncOrchestrator::try_sync`]):
//!
//! ```text
//! queue ──► compact ──► replay (best effort) ──► clear queue
//!                                                   │
//!          local ◄── replace_all ◄── fetch tags + todos
//! ```

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use futures_util::future::BoxFuture;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use tock_core::{
    compact, ChangeEntry, ChangeQueue, Entity, EntityKind, Fields, LocalStore, NewChange,
    Operation, Storage,
};

use crate::config::SyncConfig;
use crate::connectivity::ConnectivityWatcher;
use crate::error::{RemoteError, RemoteResult, SyncResult};
use crate::remote::{HttpRemote, RemoteStore};
use crate::state::{ConnectionState, ConnectionStatus};

/// Callback fired after every successful reconnect cycle.
pub type SyncCallback = Box<dyn Fn() + Send + Sync>;

/// Everything the orchestrator coordinates.
pub struct SyncDeps<R> {
    pub local: LocalStore,
    pub remote: R,
    pub queue: ChangeQueue,
    pub connectivity: Arc<dyn ConnectivityWatcher>,
    pub on_sync_complete: Option<SyncCallback>,
}

impl<R> SyncDeps<R> {
    /// Open the local store and change queue on one database file.
    pub fn open(
        db_path: &Path,
        remote: R,
        connectivity: Arc<dyn ConnectivityWatcher>,
    ) -> tock_core::Result<Self> {
        Ok(SyncDeps {
            local: LocalStore::open(db_path)?,
            remote,
            queue: ChangeQueue::open(db_path)?,
            connectivity,
            on_sync_complete: None,
        })
    }

    /// Register the reload callback for domain collaborators.
    pub fn on_sync_complete(mut self, callback: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_sync_complete = Some(Box::new(callback));
        self
    }
}

/// Counts from one successful reconnect cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Queue entries before compaction.
    pub queued: usize,
    /// Compacted entries the remote accepted.
    pub replayed: usize,
    /// Compacted entries the remote refused (dropped).
    pub rejected: usize,
    /// Tags fetched from the remote.
    pub tags: usize,
    /// Todos fetched from the remote.
    pub todos: usize,
}

/// Result of a reconnect attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Another cycle was running; nothing was done.
    AlreadySyncing,
    Synced(SyncReport),
    /// The cycle failed; the message is also recorded as the last error.
    Failed(String),
}

/// Clears the single-flight flag when the cycle ends, however it ends.
struct SyncGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> SyncGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SyncGuard { flag })
    }
}

impl Drop for SyncGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Local-first storage with queued delivery to a remote store.
pub struct SyncOrchestrator<R: RemoteStore = HttpRemote> {
    local: LocalStore,
    remote: R,
    queue: ChangeQueue,
    connectivity: Arc<dyn ConnectivityWatcher>,
    state: ConnectionState,
    config: SyncConfig,
    is_online: AtomicBool,
    is_syncing: AtomicBool,
    on_sync_complete: Option<SyncCallback>,
    cancel: CancellationToken,
    poller: Mutex<Option<JoinHandle<()>>>,
}

impl<R: RemoteStore + 'static> SyncOrchestrator<R> {
    /// Build the orchestrator and start its poll task on the current runtime.
    ///
    /// Starts offline when the network is unreachable or when the queue still
    /// holds changes from a previous session, so the poller replays them.
    pub fn init(deps: SyncDeps<R>, config: SyncConfig) -> tock_core::Result<Arc<Self>> {
        let pending = deps.queue.count()?;
        let online = deps.connectivity.currently_reachable() && pending == 0;
        let status = if online {
            ConnectionStatus::Online
        } else {
            ConnectionStatus::Offline
        };

        let state = ConnectionState::new(status);
        state.set_pending_changes(pending);

        let orchestrator = Arc::new(SyncOrchestrator {
            local: deps.local,
            remote: deps.remote,
            queue: deps.queue,
            connectivity: deps.connectivity,
            state,
            config,
            is_online: AtomicBool::new(online),
            is_syncing: AtomicBool::new(false),
            on_sync_complete: deps.on_sync_complete,
            cancel: CancellationToken::new(),
            poller: Mutex::new(None),
        });

        tracing::debug!(online, pending, "sync orchestrator initialized");
        orchestrator.spawn_poller();
        Ok(orchestrator)
    }

    /// Local belief that the remote is reachable.
    pub fn is_online(&self) -> bool {
        self.is_online.load(Ordering::Acquire)
    }

    pub fn is_syncing(&self) -> bool {
        self.is_syncing.load(Ordering::Acquire)
    }

    /// Observable status for UI collaborators.
    pub fn connection(&self) -> &ConnectionState {
        &self.state
    }

    pub fn pending_changes(&self) -> usize {
        self.state.pending_changes()
    }

    pub fn local(&self) -> &LocalStore {
        &self.local
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    /// Stop the poll task and detach from connectivity signals. Idempotent.
    pub fn destroy(&self) {
        self.cancel.cancel();
        let handle = match self.poller.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        if let Some(handle) = handle {
            handle.abort();
            tracing::debug!("sync poller stopped");
        }
    }

    /// Create an entity locally, then deliver it or queue it.
    pub async fn create(&self, kind: EntityKind, input: Fields) -> tock_core::Result<Entity> {
        let entity = self.local.create(kind, input)?;

        if self.is_online() {
            match self.remote.create_full(kind, &entity).await {
                Ok(_) => {
                    tracing::debug!(%kind, id = entity.id(), "create delivered");
                    return Ok(entity);
                }
                Err(e) => self.mark_offline(kind, Operation::Create, &e),
            }
        }

        self.enqueue(NewChange::create(kind, &entity))?;
        Ok(entity)
    }

    /// Apply a partial update locally, then deliver it or queue it.
    pub async fn update(&self, kind: EntityKind, id: &str, changes: Fields) -> tock_core::Result<()> {
        self.local.update(kind, id, &changes)?;

        if self.is_online() {
            match self.remote.update(kind, id, changes.clone()).await {
                Ok(()) => {
                    tracing::debug!(%kind, id, "update delivered");
                    return Ok(());
                }
                Err(e) => self.mark_offline(kind, Operation::Update, &e),
            }
        }

        self.enqueue(NewChange::update(kind, id, changes))?;
        Ok(())
    }

    /// Delete locally, then deliver it or queue it.
    pub async fn delete(&self, kind: EntityKind, id: &str) -> tock_core::Result<()> {
        self.local.delete(kind, id)?;

        if self.is_online() {
            match self.remote.delete(kind, id).await {
                Ok(()) => {
                    tracing::debug!(%kind, id, "delete delivered");
                    return Ok(());
                }
                Err(e) => self.mark_offline(kind, Operation::Delete, &e),
            }
        }

        self.enqueue(NewChange::delete(kind, id))?;
        Ok(())
    }

    /// Run one reconnect cycle unless one is already running.
    ///
    /// Writes issued while a cycle runs are not blocked. A write queued
    /// before the queue is cleared but after the replay pass is lost. A
    /// write queued after the clear survives in the queue, but its local
    /// row is overwritten by the full resync; the cycle then ends `offline`
    /// so the next poll replays it and the following resync restores it.
    pub async fn try_sync(&self) -> SyncOutcome {
        let Some(_guard) = SyncGuard::acquire(&self.is_syncing) else {
            tracing::debug!("sync already in progress");
            return SyncOutcome::AlreadySyncing;
        };

        self.state.set_status(ConnectionStatus::Syncing);
        tracing::info!("sync started");

        match self.run_sync().await {
            Ok(report) => {
                let pending = self.refresh_pending().unwrap_or(0);
                self.state.set_last_error(None);
                if pending == 0 {
                    self.is_online.store(true, Ordering::Release);
                    self.state.set_status(ConnectionStatus::Online);
                } else {
                    tracing::warn!(pending, "changes queued during sync, staying offline");
                    self.is_online.store(false, Ordering::Release);
                    self.state.set_status(ConnectionStatus::Offline);
                }
                tracing::info!(
                    queued = report.queued,
                    replayed = report.replayed,
                    rejected = report.rejected,
                    tags = report.tags,
                    todos = report.todos,
                    "sync complete"
                );
                if let Some(callback) = &self.on_sync_complete {
                    callback();
                }
                SyncOutcome::Synced(report)
            }
            Err(e) => {
                let message = e.to_string();
                tracing::error!(error = %message, "sync failed");
                self.is_online.store(false, Ordering::Release);
                self.refresh_pending();
                self.state.set_last_error(Some(message.clone()));
                self.state.set_status(ConnectionStatus::Offline);
                SyncOutcome::Failed(message)
            }
        }
    }

    async fn run_sync(&self) -> SyncResult<SyncReport> {
        let entries = self.queue.get_all()?;
        let compacted = compact(&entries);
        let mut report = SyncReport {
            queued: entries.len(),
            ..SyncReport::default()
        };

        for entry in &compacted {
            match self.replay(entry).await {
                Ok(()) => report.replayed += 1,
                Err(e) => {
                    tracing::warn!(
                        kind = %entry.entity_kind,
                        op = %entry.operation,
                        id = %entry.entity_id,
                        error = %e,
                        "remote rejected queued change, dropping it"
                    );
                    report.rejected += 1;
                }
            }
        }
        self.queue.clear()?;

        let tags = self.remote.get_all(EntityKind::Tag).await?;
        let todos = self.remote.get_all(EntityKind::Todo).await?;
        self.local.replace_all(&tags, &todos)?;
        report.tags = tags.len();
        report.todos = todos.len();

        Ok(report)
    }

    async fn replay(&self, entry: &ChangeEntry) -> RemoteResult<()> {
        let kind = entry.entity_kind;
        let payload = entry.payload.clone().unwrap_or_default();
        match entry.operation {
            Operation::Create => {
                let entity = Entity::with_id(entry.entity_id.clone(), payload);
                self.remote.create_full(kind, &entity).await.map(|_| ())
            }
            Operation::Update => self.remote.update(kind, &entry.entity_id, payload).await,
            Operation::Delete => self.remote.delete(kind, &entry.entity_id).await,
        }
    }

    fn enqueue(&self, change: NewChange) -> tock_core::Result<()> {
        self.queue.enqueue(change)?;
        self.refresh_pending();
        Ok(())
    }

    fn refresh_pending(&self) -> Option<usize> {
        match self.queue.count() {
            Ok(count) => {
                self.state.set_pending_changes(count);
                Some(count)
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to count pending changes");
                None
            }
        }
    }

    fn mark_offline(&self, kind: EntityKind, op: Operation, err: &RemoteError) {
        tracing::warn!(%kind, %op, error = %err, "remote write failed, queueing change");
        self.go_offline();
    }

    fn go_offline(&self) {
        self.is_online.store(false, Ordering::Release);
        if !self.is_syncing() {
            self.state.set_status(ConnectionStatus::Offline);
        }
    }

    /// Probe the remote while offline and reconnect once it answers.
    async fn poll_once(&self) {
        if self.is_online() || self.is_syncing() {
            return;
        }
        if self.remote.health_check().await {
            tracing::info!("remote reachable again");
            self.try_sync().await;
        } else {
            tracing::debug!("remote still unreachable");
        }
    }

    async fn handle_connectivity(&self, reachable: bool) {
        if reachable {
            tracing::info!("connectivity restored");
            self.try_sync().await;
        } else {
            tracing::info!("connectivity lost");
            self.go_offline();
        }
    }

    fn spawn_poller(self: &Arc<Self>) {
        let Ok(runtime) = Handle::try_current() else {
            tracing::warn!("no tokio runtime, sync poller not started");
            return;
        };

        let weak = Arc::downgrade(self);
        let cancel = self.cancel.clone();
        let changes = self.connectivity.on_change();
        let period = self.config.poll_interval;

        let task = runtime.spawn(poll_loop(weak, cancel, changes, period));
        match self.poller.lock() {
            Ok(mut guard) => *guard = Some(task),
            Err(poisoned) => *poisoned.into_inner() = Some(task),
        }
    }
}

async fn poll_loop<R: RemoteStore + 'static>(
    orchestrator: Weak<SyncOrchestrator<R>>,
    cancel: CancellationToken,
    mut changes: watch::Receiver<bool>,
    period: Duration,
) {
    // A zero interval disables probing; connectivity signals still apply
    let probing = !period.is_zero();
    let period = period.max(Duration::from_millis(1));
    let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut watching = true;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = ticker.tick(), if probing => {
                let Some(this) = orchestrator.upgrade() else { break };
                this.poll_once().await;
            }
            changed = changes.changed(), if watching => {
                if changed.is_err() {
                    watching = false;
                    continue;
                }
                let reachable = *changes.borrow_and_update();
                let Some(this) = orchestrator.upgrade() else { break };
                this.handle_connectivity(reachable).await;
            }
        }
    }
}

impl<R: RemoteStore> Drop for SyncOrchestrator<R> {
    fn drop(&mut self) {
        self.cancel.cancel();
        let handle = match self.poller.get_mut() {
            Ok(slot) => slot.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        if let Some(handle) = handle {
            handle.abort();
        }
    }
}

impl<R: RemoteStore + 'static> Storage for SyncOrchestrator<R> {
    type Error = tock_core::Error;

    fn create(&self, kind: EntityKind, input: Fields) -> BoxFuture<'_, tock_core::Result<Entity>> {
        Box::pin(SyncOrchestrator::create(self, kind, input))
    }

    fn update<'a>(
        &'a self,
        kind: EntityKind,
        id: &'a str,
        changes: Fields,
    ) -> BoxFuture<'a, tock_core::Result<()>> {
        Box::pin(SyncOrchestrator::update(self, kind, id, changes))
    }

    fn delete<'a>(&'a self, kind: EntityKind, id: &'a str) -> BoxFuture<'a, tock_core::Result<()>> {
        Box::pin(SyncOrchestrator::delete(self, kind, id))
    }

    fn get_all(&self, kind: EntityKind) -> BoxFuture<'_, tock_core::Result<Vec<Entity>>> {
        Box::pin(async move { self.local.get_all(kind) })
    }
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
