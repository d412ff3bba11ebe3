//! Relation types extracted from source.
//!
//! A relation links a referencing entity (the source) to a referenced one
//! (the target). Both endpoints arrive as FQN strings and are resolved later.

use serde::{Deserialize, Serialize};

/// The kind of relationship between two code entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    /// Method A calls method B.
    Calls,

    /// Class A extends class B.
    Extends,

    /// Class implements interface.
    Implements,

    /// General use of a type.
    Uses,

    /// Field holds a value of the type.
    Holds,

    /// Method returns the type.
    Returns,

    /// Code reads a field.
    Reads,

    /// Code writes a field.
    Writes,

    /// Method declares it throws the type.
    Throws,

    /// Code constructs an instance of the type.
    Instantiates,

    /// Method overrides another method.
    Overrides,

    /// Method takes a parameter of the type.
    Parameter,

    /// Containment (member inside type, type inside package).
    Inside,

    /// Entity is annotated by the annotation type.
    AnnotatedBy,

    /// Expression casts to the type.
    Casts,

    /// Expression checks `instanceof` against the type.
    Checks,
}

impl std::fmt::Display for RelationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Calls => "calls",
            Self::Extends => "extends",
            Self::Implements => "implements",
            Self::Uses => "uses",
            Self::Holds => "holds",
            Self::Returns => "returns",
            Self::Reads => "reads",
            Self::Writes => "writes",
            Self::Throws => "throws",
            Self::Instantiates => "instantiates",
            Self::Overrides => "overrides",
            Self::Parameter => "parameter",
            Self::Inside => "inside",
            Self::AnnotatedBy => "annotated_by",
            Self::Casts => "casts",
            Self::Checks => "checks",
        };
        write!(f, "{}", s)
    }
}

/// A relation with textual endpoints, as produced by upstream analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRelation {
    /// The kind of relationship.
    pub kind: RelationKind,

    /// FQN of the referencing entity.
    pub source: String,

    /// FQN of the referenced entity.
    pub target: String,

    /// File where this relation originates.
    #[serde(default)]
    pub file: Option<String>,

    /// Line number where this relation originates.
    #[serde(default)]
    pub line: Option<u32>,
}

impl RawRelation {
    /// Creates a relation without location info.
    pub fn new(kind: RelationKind, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            kind,
            source: source.into(),
            target: target.into(),
            file: None,
            line: None,
        }
    }

    /// Creates a relation with location info.
    pub fn with_location(
        kind: RelationKind,
        source: impl Into<String>,
        target: impl Into<String>,
        file: impl Into<String>,
        line: u32,
    ) -> Self {
        Self {
            kind,
            source: source.into(),
            target: target.into(),
            file: Some(file.into()),
            line: Some(line),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_display_matches_serde() {
        for kind in [RelationKind::AnnotatedBy, RelationKind::Calls, RelationKind::Instantiates] {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind));
        }
    }

    #[test]
    fn test_raw_relation_defaults() {
        let relation: RawRelation = serde_json::from_str(
            r#"{"kind": "calls", "source": "com.foo.Bar.run()", "target": "java.lang.String.trim()"}"#,
        )
        .unwrap();
        assert_eq!(relation.kind, RelationKind::Calls);
        assert!(relation.file.is_none());
        assert!(relation.line.is_none());
    }
}
