// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Opaque domain records.
//!
//! Tags and todos are JSON-shaped records whose only guaranteed field is a
//! string `id`. The sync core routes them by [`EntityKind`] and never looks
//! at the rest of their shape.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// A JSON object: an entity's full field set or a partial set of changes.
pub type Fields = Map<String, Value>;

/// Field holding an entity's stable identifier.
pub const ID_FIELD: &str = "id";

/// The two entity tables the engine knows how to sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Tag,
    Todo,
}

impl EntityKind {
    /// All kinds, in dependency order (todos may reference tags).
    pub const ALL: [EntityKind; 2] = [EntityKind::Tag, EntityKind::Todo];

    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Tag => "tag",
            EntityKind::Todo => "todo",
        }
    }

    /// Returns the plural collection name used by tables and REST paths.
    pub fn collection(&self) -> &'static str {
        match self {
            EntityKind::Tag => "tags",
            EntityKind::Todo => "todos",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "tag" | "tags" => Ok(EntityKind::Tag),
            "todo" | "todos" => Ok(EntityKind::Todo),
            _ => Err(Error::InvalidKind(s.to_string())),
        }
    }
}

/// A domain record with a stable string `id`.
///
/// The id is also present inside [`Entity::fields`], so serializing an entity
/// yields exactly the JSON object it was built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Fields", into = "Fields")]
pub struct Entity {
    id: String,
    fields: Fields,
}

impl Entity {
    /// Builds an entity from a field set that must already carry an id.
    pub fn from_fields(fields: Fields) -> Result<Self> {
        let id = match fields.get(ID_FIELD) {
            Some(Value::String(id)) if !id.is_empty() => id.clone(),
            _ => return Err(Error::MissingId),
        };
        Ok(Entity { id, fields })
    }

    /// Builds an entity from an arbitrary JSON value.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(fields) => Self::from_fields(fields),
            other => Err(Error::InvalidInput(format!(
                "expected a JSON object, got {other}"
            ))),
        }
    }

    /// Builds an entity from a field set, overwriting any id it carries.
    pub fn with_id(id: impl Into<String>, mut fields: Fields) -> Self {
        let id = id.into();
        fields.insert(ID_FIELD.to_string(), Value::String(id.clone()));
        Entity { id, fields }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn into_fields(self) -> Fields {
        self.fields
    }

    /// Sets a single field. The id cannot be changed this way.
    pub fn set(&mut self, field: &str, value: Value) {
        if field != ID_FIELD {
            self.fields.insert(field.to_string(), value);
        }
    }

    /// Applies a partial change set, last write wins per field.
    ///
    /// The id is immutable; an `id` key in `changes` is ignored.
    pub fn apply(&mut self, changes: &Fields) {
        for (key, value) in changes {
            if key == ID_FIELD {
                continue;
            }
            self.fields.insert(key.clone(), value.clone());
        }
    }
}

impl TryFrom<Fields> for Entity {
    type Error = Error;

    fn try_from(fields: Fields) -> Result<Self> {
        Entity::from_fields(fields)
    }
}

impl From<Entity> for Fields {
    fn from(entity: Entity) -> Self {
        entity.fields
    }
}

#[cfg(test)]
#[path = "entity_tests.rs"]
mod tests;
