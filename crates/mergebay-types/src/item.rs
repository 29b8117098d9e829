use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::TypeError;

/// Stable unique identifier of a candidate record.
///
/// The engine compares and forwards ids but never interprets them; any
/// non-empty string issued by the surrounding application is valid.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Create an id, rejecting the empty string.
    pub fn new(id: impl Into<String>) -> Result<Self, TypeError> {
        let id = id.into();
        if id.is_empty() {
            return Err(TypeError::EmptyId);
        }
        Ok(Self(id))
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ItemId({})", self.0)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ItemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A candidate record staged for merging.
///
/// Only [`Item::id`] carries meaning for the engine. The payload is whatever
/// the item source attached for display (name, email, balance, ...) and is
/// carried through every transfer untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Stable unique identifier.
    pub id: ItemId,
    /// Opaque display payload.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub payload: Value,
}

impl Item {
    /// Create an item with an empty payload.
    pub fn new(id: ItemId) -> Self {
        Self {
            id,
            payload: Value::Null,
        }
    }

    /// Create an item carrying a display payload.
    pub fn with_payload(id: ItemId, payload: Value) -> Self {
        Self { id, payload }
    }

    /// Convenience constructor for tests.
    ///
    /// Panics on an empty id; use [`ItemId::new`] for untrusted input.
    #[cfg(any(test, feature = "test-util"))]
    pub fn named(id: &str) -> Self {
        match ItemId::new(id) {
            Ok(id) => Self::new(id),
            Err(e) => panic!("Item::named: {e}"),
        }
    }

    /// A display label: the payload's `name` field when present, else the id.
    pub fn label(&self) -> &str {
        self.payload
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_else(|| self.id.as_str())
    }
}

/// Parse a JSON array of items, rejecting duplicate ids.
///
/// Item sources must hand the engine a set: conservation of the session is
/// only meaningful if every id is unique going in.
pub fn parse_items(json: &str) -> Result<Vec<Item>, TypeError> {
    let items: Vec<Item> =
        serde_json::from_str(json).map_err(|e| TypeError::Serialization(e.to_string()))?;
    ensure_unique(&items)?;
    Ok(items)
}

/// Returns an error naming the first id that occurs more than once.
pub fn ensure_unique(items: &[Item]) -> Result<(), TypeError> {
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        if item.id.as_str().is_empty() {
            return Err(TypeError::EmptyId);
        }
        if !seen.insert(&item.id) {
            return Err(TypeError::DuplicateId(item.id.to_string()));
        }
    }
    Ok(())
}
