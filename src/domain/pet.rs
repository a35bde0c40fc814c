//! Adoptable pet record.
//!
//! The session never interprets pet records; it forwards them exactly as the
//! server sent them, including fields this crate has never heard of. [`Pet`] is
//! therefore a thin wrapper around the JSON object with read-only accessors for
//! the fields presentation code cares about.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An opaque adoptable-pet record as returned by the search endpoint.
///
/// Serializes back to the identical JSON object, which is what the
/// favorites endpoint expects when a pet is saved.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pet(Map<String, Value>);

impl Pet {
    /// Wraps a JSON object. Returns `None` for any other JSON value.
    #[must_use]
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    /// Server identifier. Numeric ids are rendered in decimal.
    #[must_use]
    pub fn id(&self) -> Option<String> {
        match self.0.get("id")? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.text("name")
    }

    /// Animal type, e.g. `"Dog"` or `"cat"`. Casing is whatever the server used.
    #[must_use]
    pub fn kind(&self) -> Option<&str> {
        self.text("type")
    }

    #[must_use]
    pub fn breed(&self) -> Option<&str> {
        self.text("breed")
    }

    #[must_use]
    pub fn age(&self) -> Option<&str> {
        self.text("age")
    }

    #[must_use]
    pub fn size(&self) -> Option<&str> {
        self.text("size")
    }

    #[must_use]
    pub fn gender(&self) -> Option<&str> {
        self.text("gender")
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.text("description")
    }

    /// Contact e-mail of the shelter.
    #[must_use]
    pub fn contact(&self) -> Option<&str> {
        self.text("contact")
    }

    #[must_use]
    pub fn phone(&self) -> Option<&str> {
        self.text("phone")
    }

    #[must_use]
    pub fn photo_url(&self) -> Option<&str> {
        self.text("photo_url")
    }

    /// Raw field access for anything the typed accessors do not cover.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    #[must_use]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Non-empty string field, `None` for missing, null, empty, or non-string values.
    fn text(&self, field: &str) -> Option<&str> {
        self.0
            .get(field)
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
    }
}

impl From<Map<String, Value>> for Pet {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
