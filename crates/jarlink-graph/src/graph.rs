//! Core graph data structure.
//!
//! The NameGraph wraps a petgraph undirected graph holding two kinds of
//! nodes: artifacts and the FQNs they define. An edge means "artifact
//! defines name". Because one undirected edge serves both directions,
//! an artifact is among a name's definers exactly when the name is among
//! the artifact's defined names.

use petgraph::graph::{NodeIndex, UnGraph};
use std::collections::HashMap;

/// Handle to an artifact node.
///
/// Artifacts are inserted before any name, so handles are dense and
/// follow input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ArtifactId(pub(crate) NodeIndex);

impl ArtifactId {
    /// Position of the artifact in the input corpus.
    pub fn index(self) -> usize {
        self.0.index()
    }
}

/// Handle to a name node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NameId(pub(crate) NodeIndex);

/// Node weight: either an artifact or a defined name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphNode {
    Artifact { id: String },
    Name { fqn: String },
}

/// Bipartite graph of artifacts and the names they define.
#[derive(Debug, Default)]
pub struct NameGraph {
    /// The underlying petgraph graph.
    pub(crate) graph: UnGraph<GraphNode, ()>,

    /// Artifacts in insertion order.
    artifacts: Vec<ArtifactId>,

    /// Maps artifact ids to handles.
    artifact_index: HashMap<String, ArtifactId>,

    /// Maps FQNs to handles.
    name_index: HashMap<String, NameId>,
}

impl NameGraph {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Adds an artifact node. The caller checks for duplicates.
    pub(crate) fn add_artifact(&mut self, id: String) -> ArtifactId {
        let handle = ArtifactId(self.graph.add_node(GraphNode::Artifact { id: id.clone() }));
        self.artifacts.push(handle);
        self.artifact_index.insert(id, handle);
        handle
    }

    /// Returns the handle for `fqn`, adding a name node on first sight.
    pub(crate) fn intern_name(&mut self, fqn: &str) -> NameId {
        if let Some(&name) = self.name_index.get(fqn) {
            return name;
        }
        let name = NameId(self.graph.add_node(GraphNode::Name {
            fqn: fqn.to_string(),
        }));
        self.name_index.insert(fqn.to_string(), name);
        name
    }

    /// Records that `artifact` defines `name`.
    ///
    /// Adds a fresh edge without looking for an existing one; the builder
    /// links each (artifact, name) pair at most once.
    pub(crate) fn link(&mut self, artifact: ArtifactId, name: NameId) {
        self.graph.add_edge(artifact.0, name.0, ());
    }

    /// Returns the number of artifacts.
    pub fn artifact_count(&self) -> usize {
        self.artifacts.len()
    }

    /// Returns the number of distinct names.
    pub fn name_count(&self) -> usize {
        self.name_index.len()
    }

    /// Iterates over all artifacts in input order.
    pub fn artifacts(&self) -> impl Iterator<Item = ArtifactId> + '_ {
        self.artifacts.iter().copied()
    }

    /// Iterates over all names.
    pub fn names(&self) -> impl Iterator<Item = NameId> + '_ {
        self.name_index.values().copied()
    }

    /// Names defined by an artifact.
    pub fn names_of(&self, artifact: ArtifactId) -> impl Iterator<Item = NameId> + '_ {
        self.graph.neighbors(artifact.0).map(NameId)
    }

    /// Artifacts that define a name.
    pub fn artifacts_defining(&self, name: NameId) -> impl Iterator<Item = ArtifactId> + '_ {
        self.graph.neighbors(name.0).map(ArtifactId)
    }

    /// Number of artifacts that define a name.
    pub fn definer_count(&self, name: NameId) -> usize {
        self.graph.neighbors(name.0).count()
    }

    /// True if `artifact` defines `name`.
    pub fn defines(&self, artifact: ArtifactId, name: NameId) -> bool {
        self.graph.find_edge(artifact.0, name.0).is_some()
    }

    /// Gets the upstream id of an artifact.
    pub fn artifact_label(&self, artifact: ArtifactId) -> &str {
        match self.graph.node_weight(artifact.0) {
            Some(GraphNode::Artifact { id }) => id,
            _ => "",
        }
    }

    /// Gets the FQN of a name.
    pub fn fqn(&self, name: NameId) -> &str {
        match self.graph.node_weight(name.0) {
            Some(GraphNode::Name { fqn }) => fqn,
            _ => "",
        }
    }

    /// Finds an artifact by its upstream id.
    pub fn find_artifact(&self, id: &str) -> Option<ArtifactId> {
        self.artifact_index.get(id).copied()
    }

    /// Finds a name by its FQN.
    pub fn find_name(&self, fqn: &str) -> Option<NameId> {
        self.name_index.get(fqn).copied()
    }

    /// Returns graph statistics.
    pub fn stats(&self) -> GraphStats {
        GraphStats {
            artifact_count: self.artifact_count(),
            name_count: self.name_count(),
            edge_count: self.graph.edge_count(),
        }
    }
}

/// Graph statistics for progress reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphStats {
    pub artifact_count: usize,
    pub name_count: usize,
    pub edge_count: usize,
}
