//! Finished records handed to the persistence layer.
//!
//! Jarlink does not store anything itself. Libraries, resolved relations
//! and synthesized entities are passed to a [`RecordSink`], which owns
//! tables, transactions and locking.

use crate::entity::{Classification, EntityId, ModeledEntity};
use crate::error::Result;
use crate::relation::RelationKind;
use serde::{Deserialize, Serialize};

/// A library with its members and claimed names resolved to strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryRecord {
    pub id: usize,
    pub artifacts: Vec<String>,
    pub seeds: Vec<String>,
}

/// A relation whose endpoints both resolved to entity ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedRelation {
    pub kind: RelationKind,
    pub source: EntityId,
    pub target: EntityId,
    /// Classification of the target; the source is always internal.
    pub target_class: Classification,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

/// Destination for finished records.
pub trait RecordSink {
    fn accept_library(&mut self, library: LibraryRecord) -> Result<()>;

    fn accept_entity(&mut self, entity: ModeledEntity) -> Result<()>;

    fn accept_relation(&mut self, relation: ResolvedRelation) -> Result<()>;
}

/// Collects records in memory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemorySink {
    pub libraries: Vec<LibraryRecord>,
    pub entities: Vec<ModeledEntity>,
    pub relations: Vec<ResolvedRelation>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordSink for MemorySink {
    fn accept_library(&mut self, library: LibraryRecord) -> Result<()> {
        self.libraries.push(library);
        Ok(())
    }

    fn accept_entity(&mut self, entity: ModeledEntity) -> Result<()> {
        self.entities.push(entity);
        Ok(())
    }

    fn accept_relation(&mut self, relation: ResolvedRelation) -> Result<()> {
        self.relations.push(relation);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_collects() {
        let mut sink = MemorySink::new();
        sink.accept_entity(ModeledEntity::unknown("com.foo.Generated$1", EntityId(9)))
            .unwrap();
        sink.accept_relation(ResolvedRelation {
            kind: RelationKind::Calls,
            source: EntityId(1),
            target: EntityId(9),
            target_class: Classification::Unknown,
            file: None,
            line: None,
        })
        .unwrap();

        assert_eq!(sink.entities.len(), 1);
        assert_eq!(sink.relations[0].target, EntityId(9));
        assert!(sink.libraries.is_empty());
    }

    #[test]
    fn test_relation_json_omits_missing_location() {
        let relation = ResolvedRelation {
            kind: RelationKind::Extends,
            source: EntityId(1),
            target: EntityId(2),
            target_class: Classification::Library,
            file: None,
            line: None,
        };
        let json = serde_json::to_string(&relation).unwrap();
        assert_eq!(
            json,
            r#"{"kind":"extends","source":1,"target":2,"target_class":"library"}"#
        );
    }
}
