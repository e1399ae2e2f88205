// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for sync module tests.

#![allow(clippy::panic)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use futures_util::future::BoxFuture;
use serde_json::Value;
use tokio::sync::Notify;
use tock_core::{Entity, EntityKind, Fields, Storage};

use crate::error::{RemoteError, RemoteResult};
use crate::remote::RemoteStore;

/// A call observed by [`MockRemote`].
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteCall {
    Create(EntityKind, String),
    Update(EntityKind, String, Fields),
    Delete(EntityKind, String),
    GetAll(EntityKind),
    Health,
}

#[derive(Default)]
struct MockState {
    tags: Vec<Entity>,
    todos: Vec<Entity>,
    calls: Vec<RemoteCall>,
    next_id: u32,
    unreachable: bool,
    fail_fetch: bool,
    rejected: HashSet<String>,
    fetch_gate: Option<FetchGate>,
}

impl MockState {
    fn table(&mut self, kind: EntityKind) -> &mut Vec<Entity> {
        match kind {
            EntityKind::Tag => &mut self.tags,
            EntityKind::Todo => &mut self.todos,
        }
    }

    fn check_write(&self, id: &str) -> RemoteResult<()> {
        if self.unreachable {
            return Err(RemoteError::Transport("connection refused".into()));
        }
        if self.rejected.contains(id) {
            return Err(RemoteError::Http {
                status: 409,
                body: format!("{id} rejected"),
            });
        }
        Ok(())
    }
}

/// Holds the next list request until the test releases it.
#[derive(Clone, Default)]
pub struct FetchGate {
    /// Notified once the list request has started.
    pub entered: Arc<Notify>,
    /// Notify to let the list request continue.
    pub release: Arc<Notify>,
}

/// In-memory remote store with failure injection and call recording.
///
/// Clones share state, so a test can keep a handle after moving one into
/// the orchestrator.
#[derive(Clone, Default)]
pub struct MockRemote {
    state: Arc<Mutex<MockState>>,
}

impl MockRemote {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Make every call fail as if the network were down.
    pub fn set_unreachable(&self, unreachable: bool) {
        self.lock().unreachable = unreachable;
    }

    /// Make list requests fail while writes still succeed.
    pub fn set_fail_fetch(&self, fail: bool) {
        self.lock().fail_fetch = fail;
    }

    /// Reject every write addressed to `id` with a 409.
    pub fn reject(&self, id: &str) {
        self.lock().rejected.insert(id.to_string());
    }

    /// Insert an entity directly, bypassing call recording.
    pub fn seed(&self, kind: EntityKind, entity: Entity) {
        self.lock().table(kind).push(entity);
    }

    pub fn entities(&self, kind: EntityKind) -> Vec<Entity> {
        self.lock().table(kind).clone()
    }

    pub fn calls(&self) -> Vec<RemoteCall> {
        self.lock().calls.clone()
    }

    /// Calls other than health probes and list requests.
    pub fn write_calls(&self) -> Vec<RemoteCall> {
        self.calls()
            .into_iter()
            .filter(|call| {
                !matches!(call, RemoteCall::Health | RemoteCall::GetAll(_))
            })
            .collect()
    }

    /// Pause the next list request until the returned gate is released.
    pub fn gate_next_fetch(&self) -> FetchGate {
        let gate = FetchGate::default();
        self.lock().fetch_gate = Some(gate.clone());
        gate
    }

    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }
}

impl Storage for MockRemote {
    type Error = RemoteError;

    fn create(&self, kind: EntityKind, input: Fields) -> BoxFuture<'_, RemoteResult<Entity>> {
        Box::pin(async move {
            tokio::task::yield_now().await;
            let mut state = self.lock();
            state.next_id += 1;
            let id = format!("{kind}-srv{}", state.next_id);
            state.calls.push(RemoteCall::Create(kind, id.clone()));
            state.check_write(&id)?;
            let entity = Entity::with_id(id, input);
            state.table(kind).push(entity.clone());
            Ok(entity)
        })
    }

    fn update<'a>(
        &'a self,
        kind: EntityKind,
        id: &'a str,
        changes: Fields,
    ) -> BoxFuture<'a, RemoteResult<()>> {
        Box::pin(async move {
            tokio::task::yield_now().await;
            let mut state = self.lock();
            state
                .calls
                .push(RemoteCall::Update(kind, id.to_string(), changes.clone()));
            state.check_write(id)?;
            let entity = state
                .table(kind)
                .iter_mut()
                .find(|e| e.id() == id)
                .ok_or_else(|| RemoteError::Http {
                    status: 404,
                    body: format!("{id} not found"),
                })?;
            entity.apply(&changes);
            Ok(())
        })
    }

    fn delete<'a>(&'a self, kind: EntityKind, id: &'a str) -> BoxFuture<'a, RemoteResult<()>> {
        Box::pin(async move {
            tokio::task::yield_now().await;
            let mut state = self.lock();
            state.calls.push(RemoteCall::Delete(kind, id.to_string()));
            state.check_write(id)?;
            let table = state.table(kind);
            let before = table.len();
            table.retain(|e| e.id() != id);
            if table.len() == before {
                return Err(RemoteError::Http {
                    status: 404,
                    body: format!("{id} not found"),
                });
            }
            Ok(())
        })
    }

    fn get_all(&self, kind: EntityKind) -> BoxFuture<'_, RemoteResult<Vec<Entity>>> {
        Box::pin(async move {
            tokio::task::yield_now().await;
            let gate = self.lock().fetch_gate.take();
            if let Some(gate) = gate {
                gate.entered.notify_one();
                gate.release.notified().await;
            }
            let mut state = self.lock();
            state.calls.push(RemoteCall::GetAll(kind));
            if state.unreachable || state.fail_fetch {
                return Err(RemoteError::Transport("connection reset".into()));
            }
            Ok(state.table(kind).clone())
        })
    }
}

impl RemoteStore for MockRemote {
    fn create_full<'a>(
        &'a self,
        kind: EntityKind,
        entity: &'a Entity,
    ) -> BoxFuture<'a, RemoteResult<Entity>> {
        Box::pin(async move {
            tokio::task::yield_now().await;
            let mut state = self.lock();
            state
                .calls
                .push(RemoteCall::Create(kind, entity.id().to_string()));
            state.check_write(entity.id())?;
            let table = state.table(kind);
            if table.iter().any(|e| e.id() == entity.id()) {
                return Err(RemoteError::Http {
                    status: 409,
                    body: format!("{} exists", entity.id()),
                });
            }
            table.push(entity.clone());
            Ok(entity.clone())
        })
    }

    fn health_check(&self) -> BoxFuture<'_, bool> {
        Box::pin(async move {
            tokio::task::yield_now().await;
            let mut state = self.lock();
            state.calls.push(RemoteCall::Health);
            !state.unreachable
        })
    }
}

/// Build a field map from a JSON object literal.
pub fn fields(value: Value) -> Fields {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}
