//! Resolved entities.
//!
//! A referenced FQN is always resolved to a [`ModeledEntity`]. Which table
//! it came from is carried by its [`Classification`], a closed set that the
//! resolver and the endpoint validator match on exhaustively.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier assigned to an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub u64);

impl EntityId {
    /// Creates an id from its raw value.
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where a referenced name was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// Defined by the project under analysis.
    Internal,

    /// Found in the known-library index.
    Library,

    /// Not found anywhere; the id was synthesized on demand.
    Unknown,
}

impl Classification {
    /// Returns the lowercase label used in logs and exports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Internal => "internal",
            Classification::Library => "library",
            Classification::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A referenced FQN resolved to a concrete, classified entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModeledEntity {
    pub fqn: String,
    pub id: EntityId,
    pub classification: Classification,
}

impl ModeledEntity {
    pub fn new(fqn: impl Into<String>, id: EntityId, classification: Classification) -> Self {
        Self {
            fqn: fqn.into(),
            id,
            classification,
        }
    }

    pub fn internal(fqn: impl Into<String>, id: EntityId) -> Self {
        Self::new(fqn, id, Classification::Internal)
    }

    pub fn library(fqn: impl Into<String>, id: EntityId) -> Self {
        Self::new(fqn, id, Classification::Library)
    }

    pub fn unknown(fqn: impl Into<String>, id: EntityId) -> Self {
        Self::new(fqn, id, Classification::Unknown)
    }

    /// True if the entity belongs to the project under analysis.
    pub fn is_internal(&self) -> bool {
        self.classification == Classification::Internal
    }
}

impl fmt::Display for ModeledEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.classification, self.fqn, self.id)
    }
}

/// An entity extracted upstream, before classification is attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRecord {
    pub fqn: String,
    pub id: EntityId,
}

impl EntityRecord {
    pub fn new(fqn: impl Into<String>, id: u64) -> Self {
        Self {
            fqn: fqn.into(),
            id: EntityId(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let entity = ModeledEntity::library("java.lang.String", EntityId(7));
        assert_eq!(entity.to_string(), "library java.lang.String (#7)");
        assert!(!entity.is_internal());
    }

    #[test]
    fn test_classification_serde() {
        let json = serde_json::to_string(&Classification::Unknown).unwrap();
        assert_eq!(json, "\"unknown\"");

        let parsed: Classification = serde_json::from_str("\"internal\"").unwrap();
        assert_eq!(parsed, Classification::Internal);
    }

    #[test]
    fn test_entity_record_from_json() {
        let record: EntityRecord =
            serde_json::from_str(r#"{"fqn": "com.foo.Bar", "id": 12}"#).unwrap();
        assert_eq!(record, EntityRecord::new("com.foo.Bar", 12));
    }
}
