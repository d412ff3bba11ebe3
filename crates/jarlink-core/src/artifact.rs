use serde::{Deserialize, Serialize};

/// A scanned artifact (usually a jar) as handed over by the upstream scanner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactRecord {
    /// Stable identity of the artifact, e.g. a path or a content hash.
    pub id: String,

    /// Fully qualified names defined by the artifact.
    #[serde(default)]
    pub fqns: Vec<String>,
}

impl ArtifactRecord {
    /// Creates a record from an id and the names it defines.
    pub fn new<I, S>(id: impl Into<String>, fqns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            fqns: fqns.into_iter().map(Into::into).collect(),
        }
    }
}
