//! Library identification.
//!
//! Within each component, artifacts are taken from most to least
//! distinctive and assigned greedily:
//!
//! - no library claims any of its names: it seeds a new library
//! - exactly one library claims some of its names: it joins that library,
//!   whose claimed names grow by everything the artifact defines
//! - several libraries claim its names: it joins all of them and claims
//!   nothing, so the libraries stay separate
//!
//! There is no backtracking. Components never share artifacts or names,
//! so they are clustered independently and the results concatenated.

use crate::component::Component;
use crate::graph::{ArtifactId, NameGraph, NameId};
use crate::scorer::ScoreTable;
use jarlink_core::{ClusterConfig, LibraryRecord, RecordSink, Result, TieBreak};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, info};

/// Identifier of a library within one collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LibraryId(pub usize);

/// A cluster of artifacts judged to be one logical library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Library {
    id: LibraryId,
    artifacts: BTreeSet<ArtifactId>,
    seeds: BTreeSet<NameId>,
}

impl Library {
    fn new(id: LibraryId) -> Self {
        Self {
            id,
            artifacts: BTreeSet::new(),
            seeds: BTreeSet::new(),
        }
    }

    pub fn id(&self) -> LibraryId {
        self.id
    }

    /// Member artifacts.
    pub fn artifacts(&self) -> &BTreeSet<ArtifactId> {
        &self.artifacts
    }

    /// Names this library has claimed.
    pub fn seeds(&self) -> &BTreeSet<NameId> {
        &self.seeds
    }

    pub fn contains(&self, artifact: ArtifactId) -> bool {
        self.artifacts.contains(&artifact)
    }

    fn add_artifact(&mut self, artifact: ArtifactId) {
        self.artifacts.insert(artifact);
    }

    fn add_seed(&mut self, name: NameId) {
        self.seeds.insert(name);
    }
}

/// Every library produced by one clustering run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LibraryCollection {
    libraries: Vec<Library>,
    components: usize,
}

impl LibraryCollection {
    pub fn libraries(&self) -> &[Library] {
        &self.libraries
    }

    pub fn get(&self, id: LibraryId) -> Option<&Library> {
        self.libraries.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.libraries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.libraries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Library> {
        self.libraries.iter()
    }

    /// Libraries that have `artifact` as a member.
    pub fn libraries_containing(&self, artifact: ArtifactId) -> Vec<&Library> {
        self.libraries
            .iter()
            .filter(|library| library.contains(artifact))
            .collect()
    }

    /// Resolves handles back to artifact ids and FQNs, sorted for stable output.
    pub fn export(&self, graph: &NameGraph) -> Vec<LibraryRecord> {
        self.libraries
            .iter()
            .map(|library| {
                let mut artifacts: Vec<String> = library
                    .artifacts
                    .iter()
                    .map(|&a| graph.artifact_label(a).to_string())
                    .collect();
                let mut seeds: Vec<String> = library
                    .seeds
                    .iter()
                    .map(|&n| graph.fqn(n).to_string())
                    .collect();
                artifacts.sort();
                seeds.sort();
                LibraryRecord {
                    id: library.id.0,
                    artifacts,
                    seeds,
                }
            })
            .collect()
    }

    /// Hands every library to the persistence layer.
    pub fn write_to(&self, graph: &NameGraph, sink: &mut dyn RecordSink) -> Result<()> {
        for record in self.export(graph) {
            sink.accept_library(record)?;
        }
        Ok(())
    }

    /// Returns clustering statistics.
    pub fn stats(&self) -> ClusterStats {
        let mut memberships: HashMap<ArtifactId, usize> = HashMap::new();
        for library in &self.libraries {
            for &artifact in &library.artifacts {
                *memberships.entry(artifact).or_default() += 1;
            }
        }

        ClusterStats {
            components: self.components,
            libraries: self.libraries.len(),
            artifacts: memberships.len(),
            shared_artifacts: memberships.values().filter(|&&count| count > 1).count(),
        }
    }
}

/// Clustering statistics for progress reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterStats {
    pub components: usize,
    pub libraries: usize,
    pub artifacts: usize,
    /// Artifacts that ended up in more than one library.
    pub shared_artifacts: usize,
}

/// Greedy library clusterer over a scored name graph.
pub struct Clusterer<'a> {
    graph: &'a NameGraph,
    scores: &'a ScoreTable,
    tie_break: TieBreak,
    parallel: bool,
}

impl<'a> Clusterer<'a> {
    pub fn new(graph: &'a NameGraph, scores: &'a ScoreTable) -> Self {
        Self {
            graph,
            scores,
            tie_break: TieBreak::default(),
            parallel: false,
        }
    }

    pub fn from_config(graph: &'a NameGraph, scores: &'a ScoreTable, config: &ClusterConfig) -> Self {
        Self::new(graph, scores)
            .with_tie_break(config.tie_break)
            .with_parallel(config.parallel)
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Clusters every component of the graph.
    ///
    /// Output does not depend on `parallel`: per-component results are
    /// concatenated in component order and renumbered.
    pub fn cluster(&self) -> LibraryCollection {
        let components = self.graph.components();
        info!(
            "Identifying libraries across {} components",
            components.len()
        );

        let clustered: Vec<Vec<Library>> = if self.parallel {
            components
                .par_iter()
                .map(|component| self.cluster_component(component))
                .collect()
        } else {
            components
                .iter()
                .map(|component| self.cluster_component(component))
                .collect()
        };

        let libraries = clustered
            .into_iter()
            .flatten()
            .enumerate()
            .map(|(index, mut library)| {
                library.id = LibraryId(index);
                library
            })
            .collect();

        LibraryCollection {
            libraries,
            components: components.len(),
        }
    }

    /// Orders a component's artifacts, most distinctive first.
    fn ordered(&self, component: &Component) -> Vec<ArtifactId> {
        let mut artifacts: Vec<ArtifactId> = component.artifacts.iter().copied().collect();
        artifacts.sort_by(|&a, &b| {
            self.scores
                .get(a)
                .total_cmp(&self.scores.get(b))
                .then_with(|| self.break_tie(a, b))
        });
        artifacts
    }

    fn break_tie(&self, a: ArtifactId, b: ArtifactId) -> Ordering {
        match self.tie_break {
            TieBreak::InputOrder => a.cmp(&b),
            TieBreak::ArtifactId => self
                .graph
                .artifact_label(a)
                .cmp(self.graph.artifact_label(b))
                .then_with(|| a.cmp(&b)),
        }
    }

    /// Clusters one component. Library ids are local to the component.
    fn cluster_component(&self, component: &Component) -> Vec<Library> {
        let mut libraries: Vec<Library> = Vec::new();
        // Name -> index of the library that claimed it
        let mut claims: HashMap<NameId, usize> = HashMap::new();

        for artifact in self.ordered(component) {
            let names: Vec<NameId> = self.graph.names_of(artifact).collect();
            let candidates: BTreeSet<usize> = names
                .iter()
                .filter_map(|name| claims.get(name).copied())
                .collect();

            let shared = candidates.len();
            let mut candidates = candidates.into_iter();
            match (candidates.next(), candidates.next()) {
                (None, _) => {
                    let index = libraries.len();
                    libraries.push(Library::new(LibraryId(index)));
                    claim(&mut libraries[index], index, artifact, &names, &mut claims);
                }
                (Some(index), None) => {
                    claim(&mut libraries[index], index, artifact, &names, &mut claims);
                }
                (Some(first), Some(second)) => {
                    debug!(
                        "{} is shared by {} libraries",
                        self.graph.artifact_label(artifact),
                        shared
                    );
                    for index in [first, second].into_iter().chain(candidates) {
                        libraries[index].add_artifact(artifact);
                    }
                }
            }
        }

        libraries
    }
}

/// Adds `artifact` to `library` and registers all its names as claimed by it.
fn claim(
    library: &mut Library,
    index: usize,
    artifact: ArtifactId,
    names: &[NameId],
    claims: &mut HashMap<NameId, usize>,
) {
    library.add_artifact(artifact);
    for &name in names {
        library.add_seed(name);
        claims.insert(name, index);
    }
}

/// Identifies libraries in a scored graph using `config`.
pub fn identify_libraries(
    graph: &NameGraph,
    scores: &ScoreTable,
    config: &ClusterConfig,
) -> LibraryCollection {
    let libraries = Clusterer::from_config(graph, scores, config).cluster();
    let stats = libraries.stats();
    info!(
        "Identified {} libraries in {} artifacts ({} shared)",
        stats.libraries, stats.artifacts, stats.shared_artifacts
    );
    libraries
}
