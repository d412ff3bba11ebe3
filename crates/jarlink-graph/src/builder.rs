//! Graph builder for constructing the name graph from scanned artifacts.
//!
//! The builder takes ArtifactRecords and links their FQNs into shared
//! name nodes.

use crate::graph::{ArtifactId, NameGraph, NameId};
use jarlink_core::{ArtifactRecord, CoreError, Result};
use std::collections::HashSet;
use tracing::debug;

/// Builds a NameGraph from artifact records.
///
/// The builder handles the two-pass process:
/// 1. Add every artifact node, rejecting duplicate ids
/// 2. Link each artifact to the names it defines
///
/// Keeping all artifacts ahead of all names makes artifact handles dense.
pub struct GraphBuilder {
    graph: NameGraph,
    /// FQNs waiting to be linked, per artifact.
    pending: Vec<(ArtifactId, Vec<String>)>,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self {
            graph: NameGraph::new(),
            pending: Vec::new(),
        }
    }

    /// Adds one artifact.
    ///
    /// Fails if an artifact with the same id was already added.
    pub fn add_artifact(&mut self, record: ArtifactRecord) -> Result<ArtifactId> {
        if self.graph.find_artifact(&record.id).is_some() {
            return Err(CoreError::DuplicateArtifact(record.id));
        }
        let handle = self.graph.add_artifact(record.id);
        self.pending.push((handle, record.fqns));
        Ok(handle)
    }

    /// Adds a batch of artifacts.
    pub fn add_artifacts(&mut self, records: impl IntoIterator<Item = ArtifactRecord>) -> Result<()> {
        for record in records {
            self.add_artifact(record)?;
        }
        Ok(())
    }

    /// Links pending FQNs into name nodes.
    ///
    /// Repeated FQNs within one artifact produce a single edge.
    fn link_names(&mut self) {
        let mut linked: HashSet<NameId> = HashSet::new();
        for (artifact, fqns) in std::mem::take(&mut self.pending) {
            linked.clear();
            for fqn in fqns {
                let name = self.graph.intern_name(&fqn);
                if linked.insert(name) {
                    self.graph.link(artifact, name);
                }
            }
        }
    }

    /// Finishes building and returns the graph.
    pub fn build(mut self) -> NameGraph {
        self.link_names();
        let stats = self.graph.stats();
        debug!(
            "Built name graph: {} artifacts, {} names, {} definitions",
            stats.artifact_count, stats.name_count, stats.edge_count
        );
        self.graph
    }
}

impl NameGraph {
    /// Builds a graph straight from a corpus of artifact records.
    pub fn from_records(records: impl IntoIterator<Item = ArtifactRecord>) -> Result<Self> {
        let mut builder = GraphBuilder::new();
        builder.add_artifacts(records)?;
        Ok(builder.build())
    }
}
