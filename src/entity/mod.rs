//! Record model types
//!
//! `Entity` is the base persistable record: a unique id, creation and
//! update timestamps, and arbitrary schema-less fields. Concrete record
//! kinds embed an `Entity` and implement [`Record`] to inherit the
//! whole contract. The only boundary form is a plain JSON-style mapping
//! consumed by external persistence layers.

mod amenity;
pub mod timestamp;

pub use amenity::Amenity;

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::{HearthError, Result};

/// Key carrying the record-kind discriminator in serialized mappings.
pub const TYPE_TAG_KEY: &str = "__type__";

/// Contract shared by every record kind.
///
/// A concrete kind embeds an [`Entity`] and points the two accessors at
/// it; identity, timestamps, touch, and serialization then come from
/// the provided methods.
pub trait Record {
    /// Discriminator written under [`TYPE_TAG_KEY`] in serialized form.
    const TYPE_TAG: &'static str;

    fn entity(&self) -> &Entity;
    fn entity_mut(&mut self) -> &mut Entity;

    fn id(&self) -> &str {
        self.entity().id()
    }

    fn created_at(&self) -> NaiveDateTime {
        self.entity().created_at()
    }

    fn updated_at(&self) -> NaiveDateTime {
        self.entity().updated_at()
    }

    fn get(&self, name: &str) -> Option<&Value> {
        self.entity().get(name)
    }

    fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.entity_mut().set(name, value);
    }

    fn touch(&mut self) {
        self.entity_mut().touch();
    }

    fn to_map(&self) -> Map<String, Value> {
        self.entity().to_map()
    }

    fn to_json(&self) -> Result<String> {
        self.entity().to_json()
    }
}

/// Base fields shared by all record kinds
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    type_tag: &'static str,
    id: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
    fields: Map<String, Value>,
}

impl Entity {
    pub fn new() -> Self {
        Self::with_tag(Self::TYPE_TAG)
    }

    /// Creates a fresh record under the given type tag.
    ///
    /// Concrete record kinds call this with their own tag. Both
    /// timestamps come from a single clock read and start out equal.
    pub fn with_tag(type_tag: &'static str) -> Self {
        let now = timestamp::now();
        Self {
            type_tag,
            id: Uuid::new_v4().to_string(),
            created_at: now,
            updated_at: now,
            fields: Map::new(),
        }
    }

    /// Rebuilds a record from its serialized mapping.
    pub fn from_map(map: Map<String, Value>) -> Result<Self> {
        Self::from_map_tagged(Self::TYPE_TAG, map)
    }

    /// Rebuilds a record under the given type tag.
    ///
    /// Missing id/timestamps fall back to freshly generated ones, and
    /// the [`TYPE_TAG_KEY`] entry is dropped rather than stored. Fails
    /// only when a supplied timestamp is not a valid ISO-8601 string.
    pub fn from_map_tagged(type_tag: &'static str, map: Map<String, Value>) -> Result<Self> {
        let mut entity = Self::with_tag(type_tag);
        for (key, value) in map {
            match key.as_str() {
                TYPE_TAG_KEY => {}
                "id" => {
                    entity.id = match value {
                        Value::String(s) => s,
                        other => other.to_string(),
                    };
                }
                "created_at" => entity.created_at = parse_timestamp_value("created_at", &value)?,
                "updated_at" => entity.updated_at = parse_timestamp_value("updated_at", &value)?,
                _ => {
                    entity.fields.insert(key, value);
                }
            }
        }
        Ok(entity)
    }

    /// Rebuilds a record from a JSON object string.
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_map(object_from_json(json)?)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn type_tag(&self) -> &'static str {
        self.type_tag
    }

    pub fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    pub fn updated_at(&self) -> NaiveDateTime {
        self.updated_at
    }

    /// Looks up a custom field.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Sets a custom field. Does not refresh `updated_at`; callers mark
    /// the record dirty with [`Entity::touch`].
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(name.into(), value.into());
    }

    /// The custom fields as stored.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Marks the record dirty: refreshes `updated_at`, strictly past
    /// the previous value even within one microsecond tick of the
    /// clock.
    pub fn touch(&mut self) {
        let now = timestamp::now();
        self.updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at + chrono::Duration::microseconds(1)
        };
    }

    /// Serializes to the external mapping form.
    ///
    /// Identity, timestamps, and the type tag are written last so they
    /// stay authoritative over any same-named custom field. The
    /// returned mapping owns its values; mutating it leaves the record
    /// untouched.
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = self.fields.clone();
        map.insert("id".to_string(), Value::String(self.id.clone()));
        map.insert(
            "created_at".to_string(),
            Value::String(timestamp::format(self.created_at)),
        );
        map.insert(
            "updated_at".to_string(),
            Value::String(timestamp::format(self.updated_at)),
        );
        map.insert(
            TYPE_TAG_KEY.to_string(),
            Value::String(self.type_tag.to_string()),
        );
        map
    }

    /// Serializes to a JSON object string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_map())?)
    }
}

impl Default for Entity {
    fn default() -> Self {
        Self::new()
    }
}

impl Record for Entity {
    const TYPE_TAG: &'static str = "Entity";

    fn entity(&self) -> &Entity {
        self
    }

    fn entity_mut(&mut self) -> &mut Entity {
        self
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut attrs = self.to_map();
        attrs.remove(TYPE_TAG_KEY);
        write!(f, "[{}] ({}) {}", self.type_tag, self.id, Value::Object(attrs))
    }
}

impl Serialize for Entity {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_map().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Entity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let map = Map::deserialize(deserializer)?;
        Self::from_map(map).map_err(serde::de::Error::custom)
    }
}

fn object_from_json(json: &str) -> Result<Map<String, Value>> {
    match serde_json::from_str(json)? {
        Value::Object(map) => Ok(map),
        other => Err(HearthError::NotAnObject(other.to_string())),
    }
}

fn parse_timestamp_value(field: &'static str, value: &Value) -> Result<NaiveDateTime> {
    value
        .as_str()
        .and_then(|text| timestamp::parse(text).ok())
        .ok_or_else(|| HearthError::InvalidTimestamp {
            field,
            value: value.to_string(),
        })
}
