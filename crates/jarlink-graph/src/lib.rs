//! Jarlink Graph - Library identification
//!
//! This crate clusters a corpus of artifacts (jars) into logical libraries
//! by the fully qualified names they define.
//!
//! # Architecture
//!
//! ```text
//! ArtifactRecords → NameGraph → ScoreTable → components → Clusterer → LibraryCollection
//!                   petgraph     pluggable     DFS over     greedy, one pass
//!                   bipartite    scorer        shared names per component
//! ```
//!
//! Artifacts and names live in one arena-backed graph and refer to each
//! other through handles ([`ArtifactId`], [`NameId`]).
//!
//! # Example
//!
//! ```no_run
//! use jarlink_core::{ArtifactRecord, ClusterConfig};
//! use jarlink_graph::{identify_libraries, NameGraph, NameSpreadScorer, ScoreTable};
//!
//! let graph = NameGraph::from_records(vec![
//!     ArtifactRecord::new("commons-io.jar", ["org.apache.commons.io.IOUtils"]),
//! ])?;
//! let scores = ScoreTable::compute(&graph, &NameSpreadScorer, true);
//! let libraries = identify_libraries(&graph, &scores, &ClusterConfig::default());
//! # Ok::<(), jarlink_core::CoreError>(())
//! ```

mod builder;
mod cluster;
mod component;
mod graph;
mod scorer;

pub use builder::GraphBuilder;
pub use cluster::{
    identify_libraries, ClusterStats, Clusterer, Library, LibraryCollection, LibraryId,
};
pub use component::Component;
pub use graph::{ArtifactId, GraphNode, GraphStats, NameGraph, NameId};
pub use scorer::{DistinctivenessScorer, FixedScores, NameSpreadScorer, ScoreTable};
