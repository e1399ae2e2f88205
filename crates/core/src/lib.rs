// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! tock-core: Local-first storage primitives for the tock sync engine
//!
//! This crate provides the entity model, the durable local store, the durable
//! change queue and the compactor used by the sync orchestrator in `tock-sync`.
//! Nothing here touches the network.

pub mod change;
pub mod compact;
pub mod db;
pub mod entity;
pub mod error;
pub mod id;
pub mod local;
pub mod queue;
pub mod storage;

pub use change::{ChangeEntry, NewChange, Operation};
pub use compact::compact;
pub use entity::{Entity, EntityKind, Fields};
pub use error::{Error, Result};
pub use local::LocalStore;
pub use queue::ChangeQueue;
pub use storage::Storage;
