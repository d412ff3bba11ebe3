//! Connected components of the name graph.
//!
//! Two artifacts are related when they define a common name; a component
//! is the transitive closure of that relation. Components partition the
//! artifact set, and clustering treats each one independently.

use crate::graph::{ArtifactId, NameGraph, NameId};
use std::collections::{BTreeSet, HashSet};

/// A maximal set of artifacts linked through shared names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Component {
    pub artifacts: BTreeSet<ArtifactId>,
    pub names: BTreeSet<NameId>,
}

impl Component {
    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}

impl NameGraph {
    /// Collects the component containing `seed`.
    ///
    /// Depth-first over artifacts: every artifact is marked in `processed`
    /// as soon as it is pushed, so nothing is visited twice and later
    /// seeds skip artifacts already claimed by an earlier component.
    pub fn related_component(
        &self,
        seed: ArtifactId,
        processed: &mut HashSet<ArtifactId>,
    ) -> Component {
        let mut component = Component::default();
        let mut stack = vec![seed];
        processed.insert(seed);

        while let Some(next) = stack.pop() {
            component.artifacts.insert(next);
            for name in self.names_of(next) {
                component.names.insert(name);
                for artifact in self.artifacts_defining(name) {
                    if processed.insert(artifact) {
                        stack.push(artifact);
                    }
                }
            }
        }

        component
    }

    /// Partitions every artifact into components.
    ///
    /// Seeds are taken in input order, so the result is deterministic.
    pub fn components(&self) -> Vec<Component> {
        let mut processed = HashSet::with_capacity(self.artifact_count());
        let mut components = Vec::new();

        for artifact in self.artifacts() {
            if !processed.contains(&artifact) {
                components.push(self.related_component(artifact, &mut processed));
            }
        }

        components
    }
}
