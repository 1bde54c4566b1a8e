// src/entity/amenity.rs
//! The amenity record kind

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::Result;

use super::{Entity, Record};

/// A named amenity offered by a listing.
///
/// Adds a single `name` field on top of the base record contract. The
/// empty-string default lives in the accessor, not the stored fields,
/// so a fresh amenity serializes without a `name` key.
#[derive(Debug, Clone, PartialEq)]
pub struct Amenity {
    base: Entity,
}

impl Amenity {
    pub fn new() -> Self {
        Self {
            base: Entity::with_tag(Self::TYPE_TAG),
        }
    }

    pub fn from_map(map: Map<String, Value>) -> Result<Self> {
        Ok(Self {
            base: Entity::from_map_tagged(Self::TYPE_TAG, map)?,
        })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_map(super::object_from_json(json)?)
    }

    /// The amenity's name, or the empty string when unset.
    pub fn name(&self) -> &str {
        self.base.get("name").and_then(Value::as_str).unwrap_or("")
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.base.set("name", Value::String(name.into()));
    }
}

impl Default for Amenity {
    fn default() -> Self {
        Self::new()
    }
}

impl Record for Amenity {
    const TYPE_TAG: &'static str = "Amenity";

    fn entity(&self) -> &Entity {
        &self.base
    }

    fn entity_mut(&mut self) -> &mut Entity {
        &mut self.base
    }
}

impl fmt::Display for Amenity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.base.fmt(f)
    }
}

impl Serialize for Amenity {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_map().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Amenity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let map = Map::deserialize(deserializer)?;
        Self::from_map(map).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::TYPE_TAG_KEY;
    use serde_json::json;

    #[test]
    fn test_type_tag_in_map() {
        assert_eq!(Amenity::new().to_map()[TYPE_TAG_KEY], json!("Amenity"));
    }

    #[test]
    fn test_name_defaults_to_empty() {
        assert_eq!(Amenity::new().name(), "");
    }

    #[test]
    fn test_fresh_record_serializes_without_name() {
        assert!(!Amenity::new().to_map().contains_key("name"));
    }

    #[test]
    fn test_set_name_then_serialize() {
        let mut amenity = Amenity::new();
        amenity.set_name("Wifi");
        assert_eq!(amenity.name(), "Wifi");
        assert_eq!(amenity.to_map()["name"], json!("Wifi"));
    }

    #[test]
    fn test_timestamps_equal_on_new() {
        let amenity = Amenity::new();
        assert_eq!(amenity.created_at(), amenity.updated_at());
    }

    #[test]
    fn test_inherits_touch() {
        let mut amenity = Amenity::new();
        let before = amenity.updated_at();
        amenity.touch();
        assert!(amenity.updated_at() > before);
    }

    #[test]
    fn test_from_map_round_trip() {
        let mut amenity = Amenity::new();
        amenity.set_name("Pool");
        let rebuilt = Amenity::from_map(amenity.to_map()).unwrap();
        assert_eq!(rebuilt, amenity);
    }

    #[test]
    fn test_non_string_name_reads_as_empty() {
        let mut map = Map::new();
        map.insert("name".to_string(), json!(42));
        let amenity = Amenity::from_map(map).unwrap();
        assert_eq!(amenity.name(), "");
        assert_eq!(amenity.to_map()["name"], json!(42));
    }

    #[test]
    fn test_display_uses_amenity_tag() {
        let amenity = Amenity::new();
        assert!(amenity
            .to_string()
            .starts_with(&format!("[Amenity] ({})", amenity.id())));
    }

    #[test]
    fn test_serde_round_trip() {
        let mut amenity = Amenity::new();
        amenity.set_name("Sauna");
        let text = serde_json::to_string(&amenity).unwrap();
        let rebuilt: Amenity = serde_json::from_str(&text).unwrap();
        assert_eq!(rebuilt, amenity);
    }
}
