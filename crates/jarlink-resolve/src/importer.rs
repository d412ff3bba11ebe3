//! Relation import for one project.
//!
//! Each raw relation has its endpoints resolved against the project's
//! ResolutionContext. Relations whose source is not internal are dropped
//! individually; the rest go to the record sink in input order.

use crate::context::ResolutionContext;
use crate::endpoint::{resolve_source_endpoint, resolve_target_endpoint, EndpointRejection};
use jarlink_core::{CoreError, RawRelation, RecordSink, ResolveConfig, ResolvedRelation, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Counts from one import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub accepted: usize,
    pub rejected: usize,
}

impl ImportSummary {
    pub fn total(&self) -> usize {
        self.accepted + self.rejected
    }
}

/// Resolves and forwards the relations of one project.
pub struct RelationImporter<'a> {
    ctx: &'a ResolutionContext,
    parallel: bool,
}

impl<'a> RelationImporter<'a> {
    pub fn new(ctx: &'a ResolutionContext) -> Self {
        Self {
            ctx,
            parallel: false,
        }
    }

    pub fn from_config(ctx: &'a ResolutionContext, config: &ResolveConfig) -> Self {
        Self::new(ctx).with_parallel(config.parallel)
    }

    /// Resolve relations on the rayon pool.
    ///
    /// Each unknown FQN still gets exactly one id, but which unknown gets
    /// which id depends on thread scheduling.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Resolves both endpoints of one relation.
    ///
    /// The target is only resolved once the source is accepted, so a
    /// rejected relation never creates unknown entities for its target.
    pub fn resolve(
        &self,
        relation: &RawRelation,
    ) -> std::result::Result<ResolvedRelation, EndpointRejection> {
        let source = resolve_source_endpoint(self.ctx, &relation.source)?;
        let target = resolve_target_endpoint(self.ctx, &relation.target)?;

        Ok(ResolvedRelation {
            kind: relation.kind,
            source,
            target: target.id,
            target_class: target.classification,
            file: relation.file.clone(),
            line: relation.line,
        })
    }

    /// Resolves every relation and hands the accepted ones to `sink`.
    ///
    /// Relations with an invalid source are counted and skipped. Running
    /// out of entity ids aborts the import.
    pub fn import(
        &self,
        relations: &[RawRelation],
        sink: &mut dyn RecordSink,
    ) -> Result<ImportSummary> {
        info!("Importing {} relations", relations.len());

        let resolved: Vec<_> = if self.parallel {
            relations.par_iter().map(|r| self.resolve(r)).collect()
        } else {
            relations.iter().map(|r| self.resolve(r)).collect()
        };

        let mut summary = ImportSummary::default();
        for outcome in resolved {
            match outcome {
                Ok(relation) => {
                    sink.accept_relation(relation)?;
                    summary.accepted += 1;
                }
                Err(EndpointRejection::InvalidSource { .. }) => summary.rejected += 1,
                Err(EndpointRejection::Exhausted(err)) => {
                    return Err(CoreError::IdSpaceExhausted(err.fqn));
                }
            }
        }

        info!(
            "Imported {} relations, rejected {}",
            summary.accepted, summary.rejected
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol_table::{LibraryIndex, ProjectTable};
    use jarlink_core::{Classification, EntityId, EntityRecord, MemorySink, RelationKind};
    use std::sync::Arc;

    fn context() -> ResolutionContext {
        ResolutionContext::new(
            ProjectTable::new(vec![
                EntityRecord::new("com.foo.Bar", 1),
                EntityRecord::new("com.foo.Bar.run()", 2),
            ]),
            Arc::new(LibraryIndex::new(vec![EntityRecord::new(
                "java.lang.String",
                10,
            )])),
            None,
        )
    }

    fn relations() -> Vec<RawRelation> {
        vec![
            RawRelation::with_location(
                RelationKind::Calls,
                "com.foo.Bar.run()",
                "java.lang.String",
                "Bar.java",
                12,
            ),
            // Library source: rejected
            RawRelation::new(RelationKind::Uses, "java.lang.String", "com.foo.Bar"),
            RawRelation::new(RelationKind::Instantiates, "com.foo.Bar.run()", "com.foo.Generated$1"),
            // Unknown source: rejected
            RawRelation::new(RelationKind::Calls, "com.foo.Generated$1", "com.foo.Bar"),
            RawRelation::new(RelationKind::Inside, "com.foo.Bar.run()", "com.foo.Bar"),
        ]
    }

    #[test]
    fn test_import_skips_rejected_relations() {
        let ctx = context();
        let mut sink = MemorySink::new();
        let summary = RelationImporter::new(&ctx)
            .import(&relations(), &mut sink)
            .unwrap();

        assert_eq!(summary, ImportSummary { accepted: 3, rejected: 2 });
        assert_eq!(summary.total(), 5);
        assert_eq!(sink.relations.len(), 3);

        let first = &sink.relations[0];
        assert_eq!(first.source, EntityId(2));
        assert_eq!(first.target, EntityId(10));
        assert_eq!(first.target_class, Classification::Library);
        assert_eq!(first.file.as_deref(), Some("Bar.java"));
        assert_eq!(first.line, Some(12));

        // The unknown target of the third relation is reused by the rejected fourth
        let unknown = &sink.relations[1];
        assert_eq!(unknown.target_class, Classification::Unknown);
        assert_eq!(ctx.unknowns().len(), 1);
        assert_eq!(
            ctx.unknowns().get("com.foo.Generated$1").map(|e| e.id),
            Some(unknown.target)
        );

        assert_eq!(sink.relations[2].kind, RelationKind::Inside);
    }

    #[test]
    fn test_rejected_source_does_not_resolve_target() {
        let ctx = context();
        let relation = RawRelation::new(RelationKind::Calls, "java.lang.String", "never.Seen");

        assert!(RelationImporter::new(&ctx).resolve(&relation).is_err());
        assert!(ctx.unknowns().get("never.Seen").is_none());
    }

    #[test]
    fn test_parallel_import_keeps_order() {
        let ctx = context();
        let mut batch = Vec::new();
        for i in 0..200 {
            batch.push(RawRelation::new(
                RelationKind::Calls,
                "com.foo.Bar.run()",
                format!("gen.Type{}", i % 20),
            ));
        }

        let mut sink = MemorySink::new();
        let summary = RelationImporter::new(&ctx)
            .with_parallel(true)
            .import(&batch, &mut sink)
            .unwrap();

        assert_eq!(summary.accepted, 200);
        assert_eq!(ctx.unknowns().len(), 20);
        for (i, relation) in sink.relations.iter().enumerate() {
            let expected = ctx.unknowns().get(&format!("gen.Type{}", i % 20)).unwrap();
            assert_eq!(relation.target, expected.id);
        }
    }

    #[test]
    fn test_import_aborts_when_ids_run_out() {
        let ctx = ResolutionContext::new(
            ProjectTable::new(vec![EntityRecord::new("com.foo.Bar", u64::MAX)]),
            Arc::new(LibraryIndex::default()),
            None,
        );
        let batch = vec![
            RawRelation::new(RelationKind::Inside, "com.foo.Bar", "com.foo.Bar"),
            RawRelation::new(RelationKind::Calls, "com.foo.Bar", "gen.Fresh"),
        ];

        let mut sink = MemorySink::new();
        let result = RelationImporter::new(&ctx).import(&batch, &mut sink);

        assert!(matches!(result, Err(CoreError::IdSpaceExhausted(fqn)) if fqn == "gen.Fresh"));
        assert_eq!(sink.relations.len(), 1);
    }
}
