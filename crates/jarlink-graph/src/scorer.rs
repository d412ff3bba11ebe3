//! Distinctiveness scoring.
//!
//! Each artifact gets a non-negative score describing how generic its
//! defined names are across the corpus. Lower means more distinctive, and
//! the most distinctive artifact of a component seeds its first library.
//!
//! Scorers are pluggable. The table is computed once, before clustering,
//! and read-only afterwards.

use crate::graph::{ArtifactId, NameGraph};
use rayon::prelude::*;
use std::collections::HashMap;
use tracing::{info, warn};

/// Scores one artifact against the corpus held in `graph`.
///
/// Implementations must be pure: the same artifact always gets the same score.
pub trait DistinctivenessScorer: Sync {
    fn score(&self, graph: &NameGraph, artifact: ArtifactId) -> f64;
}

/// Mean spread of an artifact's names.
///
/// For every defined name, `log2` of the number of artifacts defining it;
/// the score is the mean over the artifact's names. An artifact whose
/// names are all unique scores 0.0.
#[derive(Debug, Clone, Copy, Default)]
pub struct NameSpreadScorer;

impl DistinctivenessScorer for NameSpreadScorer {
    fn score(&self, graph: &NameGraph, artifact: ArtifactId) -> f64 {
        let (total, count) = graph
            .names_of(artifact)
            .map(|name| (graph.definer_count(name) as f64).log2())
            .fold((0.0, 0usize), |(sum, n), spread| (sum + spread, n + 1));

        if count == 0 {
            0.0
        } else {
            total / count as f64
        }
    }
}

/// Scores supplied from outside, keyed by artifact id.
///
/// Artifacts missing from the map score as least distinctive
/// (`f64::INFINITY`) unless another default is set, so a partial score
/// file never lets an unscored artifact seed a library ahead of scored ones.
#[derive(Debug, Clone)]
pub struct FixedScores {
    scores: HashMap<String, f64>,
    default: f64,
}

impl Default for FixedScores {
    fn default() -> Self {
        Self::new(HashMap::new())
    }
}

impl FixedScores {
    pub fn new(scores: HashMap<String, f64>) -> Self {
        Self {
            scores,
            default: f64::INFINITY,
        }
    }

    /// Score used for artifacts missing from the map.
    pub fn with_default(mut self, default: f64) -> Self {
        self.default = default;
        self
    }
}

impl FromIterator<(String, f64)> for FixedScores {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl DistinctivenessScorer for FixedScores {
    fn score(&self, graph: &NameGraph, artifact: ArtifactId) -> f64 {
        let label = graph.artifact_label(artifact);
        match self.scores.get(label) {
            Some(&score) => score,
            None => {
                warn!("No score given for {}, using {}", label, self.default);
                self.default
            }
        }
    }
}

/// Scores for every artifact of one graph, indexed by artifact handle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreTable {
    scores: Vec<f64>,
}

impl ScoreTable {
    /// Scores every artifact in `graph`.
    ///
    /// With `parallel`, each artifact is scored on the rayon pool into its
    /// own slot; the table is complete once this returns.
    pub fn compute<S>(graph: &NameGraph, scorer: &S, parallel: bool) -> Self
    where
        S: DistinctivenessScorer + ?Sized,
    {
        info!("Computing scores for {} artifacts", graph.artifact_count());

        let artifacts: Vec<ArtifactId> = graph.artifacts().collect();
        let raw: Vec<f64> = if parallel {
            artifacts
                .par_iter()
                .map(|&artifact| scorer.score(graph, artifact))
                .collect()
        } else {
            artifacts
                .iter()
                .map(|&artifact| scorer.score(graph, artifact))
                .collect()
        };

        let scores = artifacts
            .iter()
            .zip(raw)
            .map(|(&artifact, score)| sanitize(graph, artifact, score))
            .collect();

        Self { scores }
    }

    /// Gets the score of an artifact. Unknown handles score as least distinctive.
    pub fn get(&self, artifact: ArtifactId) -> f64 {
        self.scores
            .get(artifact.index())
            .copied()
            .unwrap_or(f64::INFINITY)
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Converts to a map keyed by artifact id.
    pub fn to_map(&self, graph: &NameGraph) -> HashMap<String, f64> {
        graph
            .artifacts()
            .map(|artifact| (graph.artifact_label(artifact).to_string(), self.get(artifact)))
            .collect()
    }
}

/// Keeps scores comparable: NaN sorts last, negatives clamp to zero.
fn sanitize(graph: &NameGraph, artifact: ArtifactId, score: f64) -> f64 {
    if score.is_nan() {
        warn!(
            "Scorer returned NaN for {}, treating as least distinctive",
            graph.artifact_label(artifact)
        );
        f64::INFINITY
    } else if score < 0.0 {
        warn!(
            "Scorer returned negative score {} for {}, clamping to 0",
            score,
            graph.artifact_label(artifact)
        );
        0.0
    } else {
        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jarlink_core::ArtifactRecord;

    fn corpus() -> NameGraph {
        NameGraph::from_records(vec![
            ArtifactRecord::new("unique.jar", ["a.One", "a.Two"]),
            ArtifactRecord::new("shared.jar", ["b.Common", "a.One"]),
            ArtifactRecord::new("copy.jar", ["b.Common"]),
            ArtifactRecord::new("empty.jar", Vec::<String>::new()),
        ])
        .unwrap()
    }

    #[test]
    fn test_name_spread_scores() {
        let graph = corpus();
        let table = ScoreTable::compute(&graph, &NameSpreadScorer, false);
        let scores = table.to_map(&graph);

        // a.One defined twice (1.0), a.Two once (0.0)
        assert!((scores["unique.jar"] - 0.5).abs() < 1e-9);
        assert!((scores["shared.jar"] - 1.0).abs() < 1e-9);
        assert!((scores["copy.jar"] - 1.0).abs() < 1e-9);
        assert_eq!(scores["empty.jar"], 0.0);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let graph = corpus();
        let sequential = ScoreTable::compute(&graph, &NameSpreadScorer, false);
        let parallel = ScoreTable::compute(&graph, &NameSpreadScorer, true);

        assert_eq!(sequential, parallel);
        assert_eq!(parallel.len(), graph.artifact_count());
    }

    #[test]
    fn test_fixed_scores_and_default() {
        let graph = corpus();
        let scorer: FixedScores = [("unique.jar".to_string(), 0.25)].into_iter().collect();
        let table = ScoreTable::compute(&graph, &scorer.with_default(3.0), true);

        let unique = graph.find_artifact("unique.jar").unwrap();
        let copy = graph.find_artifact("copy.jar").unwrap();
        assert_eq!(table.get(unique), 0.25);
        assert_eq!(table.get(copy), 3.0);
    }

    #[test]
    fn test_missing_fixed_score_is_least_distinctive() {
        let graph = corpus();
        let scorer: FixedScores = [("unique.jar".to_string(), 0.25)].into_iter().collect();
        let table = ScoreTable::compute(&graph, &scorer, false);

        assert_eq!(table.get(graph.find_artifact("unique.jar").unwrap()), 0.25);
        assert_eq!(table.get(graph.find_artifact("shared.jar").unwrap()), f64::INFINITY);
        assert_eq!(table.get(graph.find_artifact("empty.jar").unwrap()), f64::INFINITY);
    }

    #[test]
    fn test_invalid_scores_sanitized() {
        let graph = corpus();
        let scorer = FixedScores::new(HashMap::from([
            ("unique.jar".to_string(), f64::NAN),
            ("shared.jar".to_string(), -2.0),
        ]));
        let table = ScoreTable::compute(&graph, &scorer, false);

        assert_eq!(table.get(graph.find_artifact("unique.jar").unwrap()), f64::INFINITY);
        assert_eq!(table.get(graph.find_artifact("shared.jar").unwrap()), 0.0);
    }
}
