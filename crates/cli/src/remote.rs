// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The remote store as configured for this host.

use futures_util::future::BoxFuture;
use tock_core::{Entity, EntityKind, Fields, Storage};
use tock_sync::{HttpRemote, RemoteError, RemoteResult, RemoteStore};

const DETACHED: &str = "no remote configured";

/// The HTTP remote, or a detached one that is never reachable.
///
/// Detached mode keeps every write in the local store and the queue until a
/// `remote_url` is configured.
pub enum Remote {
    Http(HttpRemote),
    Detached,
}

impl Remote {
    pub fn is_configured(&self) -> bool {
        matches!(self, Remote::Http(_))
    }

    /// Base URL for display.
    pub fn describe(&self) -> String {
        match self {
            Remote::Http(http) => http.base_url().to_string(),
            Remote::Detached => DETACHED.to_string(),
        }
    }
}

fn detached<T: Send + 'static>() -> BoxFuture<'static, RemoteResult<T>> {
    Box::pin(async { Err(RemoteError::Transport(DETACHED.to_string())) })
}

impl Storage for Remote {
    type Error = RemoteError;

    fn create(&self, kind: EntityKind, input: Fields) -> BoxFuture<'_, RemoteResult<Entity>> {
        match self {
            Remote::Http(http) => http.create(kind, input),
            Remote::Detached => detached(),
        }
    }

    fn update<'a>(
        &'a self,
        kind: EntityKind,
        id: &'a str,
        changes: Fields,
    ) -> BoxFuture<'a, RemoteResult<()>> {
        match self {
            Remote::Http(http) => http.update(kind, id, changes),
            Remote::Detached => detached(),
        }
    }

    fn delete<'a>(&'a self, kind: EntityKind, id: &'a str) -> BoxFuture<'a, RemoteResult<()>> {
        match self {
            Remote::Http(http) => http.delete(kind, id),
            Remote::Detached => detached(),
        }
    }

    fn get_all(&self, kind: EntityKind) -> BoxFuture<'_, RemoteResult<Vec<Entity>>> {
        match self {
            Remote::Http(http) => http.get_all(kind),
            Remote::Detached => detached(),
        }
    }
}

impl RemoteStore for Remote {
    fn create_full<'a>(
        &'a self,
        kind: EntityKind,
        entity: &'a Entity,
    ) -> BoxFuture<'a, RemoteResult<Entity>> {
        match self {
            Remote::Http(http) => http.create_full(kind, entity),
            Remote::Detached => detached(),
        }
    }

    fn health_check(&self) -> BoxFuture<'_, bool> {
        match self {
            Remote::Http(http) => http.health_check(),
            Remote::Detached => Box::pin(async { false }),
        }
    }
}

#[cfg(test)]
#[path = "remote_tests.rs"]
mod tests;
