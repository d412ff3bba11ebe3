//! Symbol tables for the two known tiers.
//!
//! [`ProjectTable`] and [`LibraryIndex`] are separate types so one can
//! never stand in for the other: entries of a project table are always
//! internal, entries of a library index are always library entities.

use crate::unknown::IdAllocator;
use jarlink_core::{Classification, EntityId, EntityRecord, ModeledEntity};
use std::collections::HashMap;
use std::ops::Deref;
use tracing::warn;

/// A table resolving Fully Qualified Names to modeled entities.
///
/// Every entry carries the same classification, fixed by the tier that
/// owns the table.
/// Example FQN: "com.foo.Bar.run()" -> internal #42
#[derive(Debug, Clone)]
pub struct SymbolTable {
    classification: Classification,

    /// Map of FQN to entity
    by_fqn: HashMap<String, ModeledEntity>,

    /// Largest id in the table, used to place synthesized ids after it.
    max_id: Option<EntityId>,
}

impl SymbolTable {
    fn new(classification: Classification) -> Self {
        Self {
            classification,
            by_fqn: HashMap::new(),
            max_id: None,
        }
    }

    fn from_records(
        classification: Classification,
        records: impl IntoIterator<Item = EntityRecord>,
    ) -> Self {
        let mut table = Self::new(classification);
        for record in records {
            table.insert(record.fqn, record.id);
        }
        table
    }

    /// Registers an entity in the table.
    ///
    /// A second registration of the same FQN keeps the first id.
    fn insert(&mut self, fqn: String, id: EntityId) {
        if let Some(existing) = self.by_fqn.get(&fqn) {
            warn!(
                "Duplicate {} entity {}: keeping {}, ignoring {}",
                self.classification, fqn, existing.id, id
            );
            return;
        }
        self.max_id = self.max_id.max(Some(id));
        let entity = ModeledEntity::new(fqn.clone(), id, self.classification);
        self.by_fqn.insert(fqn, entity);
    }

    /// Resolves a Fully Qualified Name to its entity.
    pub fn resolve(&self, fqn: &str) -> Option<&ModeledEntity> {
        self.by_fqn.get(fqn)
    }

    pub fn contains(&self, fqn: &str) -> bool {
        self.by_fqn.contains_key(fqn)
    }

    pub fn classification(&self) -> Classification {
        self.classification
    }

    /// Largest id in the table.
    pub fn max_id(&self) -> Option<EntityId> {
        self.max_id
    }

    pub fn len(&self) -> usize {
        self.by_fqn.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_fqn.is_empty()
    }

    /// Iterates over all entities in no particular order.
    pub fn entities(&self) -> impl Iterator<Item = &ModeledEntity> {
        self.by_fqn.values()
    }
}

/// The project-local table: entities defined by the project under analysis.
#[derive(Debug, Clone)]
pub struct ProjectTable(SymbolTable);

impl ProjectTable {
    /// Builds a project table from extracted entities.
    pub fn new(records: impl IntoIterator<Item = EntityRecord>) -> Self {
        Self(SymbolTable::from_records(Classification::Internal, records))
    }

    /// Registers one more project entity.
    pub fn insert(&mut self, fqn: impl Into<String>, id: EntityId) {
        self.0.insert(fqn.into(), id);
    }
}

impl Default for ProjectTable {
    fn default() -> Self {
        Self(SymbolTable::new(Classification::Internal))
    }
}

impl Deref for ProjectTable {
    type Target = SymbolTable;

    fn deref(&self) -> &SymbolTable {
        &self.0
    }
}

/// The process-wide index of names defined by known libraries.
///
/// The index also owns the id allocator for unknown entities. Every
/// project resolved against it draws from the same counter, which starts
/// above the largest library id.
#[derive(Debug)]
pub struct LibraryIndex {
    table: SymbolTable,
    unknown_ids: IdAllocator,
}

impl LibraryIndex {
    /// Builds a library index from indexed library entities.
    pub fn new(records: impl IntoIterator<Item = EntityRecord>) -> Self {
        let table = SymbolTable::from_records(Classification::Library, records);
        let unknown_ids = IdAllocator::default();
        if let Some(max) = table.max_id() {
            unknown_ids.reserve_through(max);
        }
        Self { table, unknown_ids }
    }

    /// The allocator shared by every project resolved against this index.
    pub fn unknown_ids(&self) -> &IdAllocator {
        &self.unknown_ids
    }
}

impl Default for LibraryIndex {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Deref for LibraryIndex {
    type Target = SymbolTable;

    fn deref(&self) -> &SymbolTable {
        &self.table
    }
}
