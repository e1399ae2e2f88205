// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The storage contract consumed by domain collaborators.
//!
//! The local store, the remote store and the sync orchestrator all implement
//! [`Storage`], so a collaborator can be handed any of them. Only the four
//! kind-generic operations are required; the named per-kind operations are
//! provided on top of them.

use futures_util::future::BoxFuture;

use crate::entity::{Entity, EntityKind, Fields};
use crate::local::LocalStore;

/// Async CRUD over tags and todos.
pub trait Storage: Send + Sync {
    /// Error produced by this backend.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Create an entity and return it with its assigned id.
    fn create(&self, kind: EntityKind, input: Fields) -> BoxFuture<'_, Result<Entity, Self::Error>>;

    /// Apply a partial change set to an entity.
    fn update<'a>(
        &'a self,
        kind: EntityKind,
        id: &'a str,
        changes: Fields,
    ) -> BoxFuture<'a, Result<(), Self::Error>>;

    /// Delete an entity.
    fn delete<'a>(&'a self, kind: EntityKind, id: &'a str)
        -> BoxFuture<'a, Result<(), Self::Error>>;

    /// List every entity of a kind.
    fn get_all(&self, kind: EntityKind) -> BoxFuture<'_, Result<Vec<Entity>, Self::Error>>;

    fn create_tag(&self, input: Fields) -> BoxFuture<'_, Result<Entity, Self::Error>> {
        self.create(EntityKind::Tag, input)
    }

    fn update_tag<'a>(
        &'a self,
        id: &'a str,
        changes: Fields,
    ) -> BoxFuture<'a, Result<(), Self::Error>> {
        self.update(EntityKind::Tag, id, changes)
    }

    fn delete_tag<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<(), Self::Error>> {
        self.delete(EntityKind::Tag, id)
    }

    fn get_all_tags(&self) -> BoxFuture<'_, Result<Vec<Entity>, Self::Error>> {
        self.get_all(EntityKind::Tag)
    }

    fn create_todo(&self, input: Fields) -> BoxFuture<'_, Result<Entity, Self::Error>> {
        self.create(EntityKind::Todo, input)
    }

    fn update_todo<'a>(
        &'a self,
        id: &'a str,
        changes: Fields,
    ) -> BoxFuture<'a, Result<(), Self::Error>> {
        self.update(EntityKind::Todo, id, changes)
    }

    fn delete_todo<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<(), Self::Error>> {
        self.delete(EntityKind::Todo, id)
    }

    fn get_all_todos(&self) -> BoxFuture<'_, Result<Vec<Entity>, Self::Error>> {
        self.get_all(EntityKind::Todo)
    }
}

impl Storage for LocalStore {
    type Error = crate::error::Error;

    fn create(&self, kind: EntityKind, input: Fields) -> BoxFuture<'_, Result<Entity, Self::Error>> {
        Box::pin(async move { LocalStore::create(self, kind, input) })
    }

    fn update<'a>(
        &'a self,
        kind: EntityKind,
        id: &'a str,
        changes: Fields,
    ) -> BoxFuture<'a, Result<(), Self::Error>> {
        Box::pin(async move { LocalStore::update(self, kind, id, &changes) })
    }

    fn delete<'a>(
        &'a self,
        kind: EntityKind,
        id: &'a str,
    ) -> BoxFuture<'a, Result<(), Self::Error>> {
        Box::pin(async move { LocalStore::delete(self, kind, id) })
    }

    fn get_all(&self, kind: EntityKind) -> BoxFuture<'_, Result<Vec<Entity>, Self::Error>> {
        Box::pin(async move { LocalStore::get_all(self, kind) })
    }
}

#[cfg(test)]
#[path = "storage_tests.rs"]
mod tests;
