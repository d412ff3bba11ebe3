//! Per-project resolution scope.
//!
//! A ResolutionContext is created for one project's import run. It owns
//! the project table (built before any relation is processed), shares the
//! library index with every other project, and keeps its own cache of
//! unknown entities, which is never shared across projects. The ids of
//! those unknowns come from the library index's allocator, so they stay
//! distinct across projects.

use crate::symbol_table::{LibraryIndex, ProjectTable};
use crate::unknown::{IdSpaceExhausted, UnknownEntityCache};
use jarlink_core::{ModeledEntity, RecordSink, ResolveConfig, Result};
use std::sync::Arc;
use tracing::debug;

/// Everything needed to resolve FQNs referenced by one project.
#[derive(Debug)]
pub struct ResolutionContext {
    project: ProjectTable,
    library: Arc<LibraryIndex>,
    unknowns: UnknownEntityCache,
}

impl ResolutionContext {
    /// Creates a context.
    ///
    /// Unknown entities are numbered by the library index's shared
    /// allocator, above every id in `project` and `library` and no lower
    /// than `first_unknown_id` when given.
    ///
    /// The project tier and the library tier are different types, so they
    /// cannot be passed the wrong way round:
    ///
    /// ```compile_fail
    /// use jarlink_resolve::{LibraryIndex, ProjectTable, ResolutionContext};
    /// use std::sync::Arc;
    ///
    /// let project = ProjectTable::default();
    /// let library = LibraryIndex::default();
    /// let ctx = ResolutionContext::new(library, Arc::new(project), None);
    /// ```
    pub fn new(
        project: ProjectTable,
        library: Arc<LibraryIndex>,
        first_unknown_id: Option<u64>,
    ) -> Self {
        let ids = library.unknown_ids().clone();
        if let Some(max) = project.max_id() {
            ids.reserve_through(max);
        }
        if let Some(first) = first_unknown_id {
            ids.raise_floor(first);
        }
        debug!(
            "Resolution context: {} project entities, {} library entities, unknown ids from {}",
            project.len(),
            library.len(),
            ids.peek()
        );

        Self {
            project,
            library,
            unknowns: UnknownEntityCache::new(ids),
        }
    }

    /// Creates a context using the resolve settings.
    pub fn from_config(
        project: ProjectTable,
        library: Arc<LibraryIndex>,
        config: &ResolveConfig,
    ) -> Self {
        Self::new(project, library, config.first_unknown_id)
    }

    /// Resolves an FQN to a classified entity.
    ///
    /// The project table wins over the library index; anything in neither
    /// becomes an unknown entity, created once and reused afterwards.
    /// Fails only when no id is left for a new unknown entity.
    pub fn resolve(&self, fqn: &str) -> std::result::Result<ModeledEntity, IdSpaceExhausted> {
        if let Some(entity) = self.project.resolve(fqn) {
            return Ok(entity.clone());
        }
        if let Some(entity) = self.library.resolve(fqn) {
            return Ok(entity.clone());
        }
        self.unknowns.get_or_create(fqn)
    }

    pub fn project(&self) -> &ProjectTable {
        &self.project
    }

    pub fn library(&self) -> &LibraryIndex {
        &self.library
    }

    pub fn unknowns(&self) -> &UnknownEntityCache {
        &self.unknowns
    }

    /// Hands every unknown entity synthesized so far to the persistence layer.
    pub fn write_unknowns(&self, sink: &mut dyn RecordSink) -> Result<usize> {
        let entities = self.unknowns.entities();
        let count = entities.len();
        for entity in entities {
            sink.accept_entity(entity)?;
        }
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jarlink_core::{Classification, EntityId, EntityRecord, MemorySink};

    fn context() -> ResolutionContext {
        let project = ProjectTable::new(vec![
            EntityRecord::new("com.foo.Bar", 1),
            EntityRecord::new("com.foo.Bar.run()", 2),
            // Shadows the library entry below
            EntityRecord::new("org.shared.Util", 3),
        ]);
        let library = LibraryIndex::new(vec![
            EntityRecord::new("java.lang.String", 50),
            EntityRecord::new("org.shared.Util", 51),
        ]);
        ResolutionContext::new(project, Arc::new(library), None)
    }

    #[test]
    fn test_internal_lookup() {
        let ctx = context();
        let entity = ctx.resolve("com.foo.Bar").unwrap();
        assert_eq!(entity.classification, Classification::Internal);
        assert_eq!(entity.id, EntityId(1));
    }

    #[test]
    fn test_library_lookup() {
        let ctx = context();
        let entity = ctx.resolve("java.lang.String").unwrap();
        assert_eq!(entity.classification, Classification::Library);
        assert_eq!(entity.id, EntityId(50));
    }

    #[test]
    fn test_project_table_wins() {
        let ctx = context();
        let entity = ctx.resolve("org.shared.Util").unwrap();
        assert_eq!(entity.classification, Classification::Internal);
        assert_eq!(entity.id, EntityId(3));
    }

    #[test]
    fn test_unknown_is_memoized() {
        let ctx = context();
        let first = ctx.resolve("com.foo.Generated$1").unwrap();
        let second = ctx.resolve("com.foo.Generated$1").unwrap();

        assert_eq!(first.classification, Classification::Unknown);
        assert_eq!(first.id, second.id);
        // Placed after the largest known id
        assert_eq!(first.id, EntityId(52));
        assert_eq!(ctx.unknowns().len(), 1);
    }

    #[test]
    fn test_explicit_first_unknown_id() {
        let ctx = ResolutionContext::new(
            ProjectTable::default(),
            Arc::new(LibraryIndex::default()),
            Some(1000),
        );
        assert_eq!(ctx.resolve("a.B").unwrap().id, EntityId(1000));
    }

    #[test]
    fn test_explicit_first_unknown_id_stays_above_known_ids() {
        let ctx = ResolutionContext::new(
            ProjectTable::new(vec![EntityRecord::new("com.foo.Bar", 40)]),
            Arc::new(LibraryIndex::default()),
            Some(10),
        );
        assert_eq!(ctx.resolve("a.B").unwrap().id, EntityId(41));
    }

    #[test]
    fn test_empty_tables_start_at_zero() {
        let ctx = ResolutionContext::from_config(
            ProjectTable::default(),
            Arc::new(LibraryIndex::default()),
            &ResolveConfig::default(),
        );
        assert_eq!(ctx.resolve("a.B").unwrap().id, EntityId(0));
    }

    #[test]
    fn test_contexts_do_not_share_unknowns() {
        let library = Arc::new(LibraryIndex::new(vec![EntityRecord::new("java.lang.Object", 7)]));
        let first = ResolutionContext::new(ProjectTable::default(), Arc::clone(&library), None);
        let second = ResolutionContext::new(ProjectTable::default(), library, None);

        first.resolve("x.Only").unwrap();
        assert_eq!(first.unknowns().len(), 1);
        assert!(second.unknowns().is_empty());
    }

    #[test]
    fn test_projects_sharing_library_get_distinct_unknown_ids() {
        let library = Arc::new(LibraryIndex::new(vec![EntityRecord::new("java.lang.String", 100)]));
        let first = ResolutionContext::new(
            ProjectTable::new(vec![EntityRecord::new("a.A", 1)]),
            Arc::clone(&library),
            None,
        );
        let second = ResolutionContext::new(
            ProjectTable::new(vec![EntityRecord::new("b.B", 2)]),
            Arc::clone(&library),
            None,
        );

        let x = first.resolve("x.Gen$1").unwrap();
        let y = second.resolve("y.Other").unwrap();

        assert_eq!(x.id, EntityId(101));
        assert_eq!(y.id, EntityId(102));
        // Each project still sees only its own unknowns
        assert!(second.unknowns().get("x.Gen$1").is_none());
        assert_eq!(library.unknown_ids().peek(), 103);
    }

    #[test]
    fn test_known_id_at_end_of_range() {
        let ctx = ResolutionContext::new(
            ProjectTable::new(vec![EntityRecord::new("com.foo.Last", u64::MAX)]),
            Arc::new(LibraryIndex::default()),
            None,
        );

        assert_eq!(ctx.resolve("com.foo.Last").unwrap().id, EntityId(u64::MAX));
        let err = ctx.resolve("com.foo.Generated$1").unwrap_err();
        assert_eq!(err.fqn, "com.foo.Generated$1");
        assert!(ctx.unknowns().is_empty());
    }

    #[test]
    fn test_write_unknowns() {
        let ctx = context();
        ctx.resolve("b.Second").unwrap();
        ctx.resolve("a.First").unwrap();
        ctx.resolve("com.foo.Bar").unwrap();

        let mut sink = MemorySink::new();
        assert_eq!(ctx.write_unknowns(&mut sink).unwrap(), 2);
        assert_eq!(sink.entities[0].fqn, "b.Second");
        assert_eq!(sink.entities[1].fqn, "a.First");
    }
}
