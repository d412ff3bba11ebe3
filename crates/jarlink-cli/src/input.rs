//! Input file loading.

use jarlink_core::{ArtifactRecord, EntityRecord, RawRelation, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Everything the resolve command needs for one project.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ResolveInput {
    /// Entities defined by the project.
    pub project: Vec<EntityRecord>,
    /// Entities of known libraries.
    pub library: Vec<EntityRecord>,
    pub relations: Vec<RawRelation>,
}

pub fn load_artifacts(path: &Path) -> Result<Vec<ArtifactRecord>> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

pub fn load_scores(path: &Path) -> Result<HashMap<String, f64>> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

pub fn load_resolve_input(path: &Path) -> Result<ResolveInput> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jarlink_core::{CoreError, RelationKind};
    use tempfile::tempdir;

    #[test]
    fn test_load_artifacts() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("jars.json");
        fs::write(
            &path,
            r#"[{"id": "a.jar", "fqns": ["x.A", "x.B"]}, {"id": "empty.jar"}]"#,
        )
        .unwrap();

        let artifacts = load_artifacts(&path).unwrap();
        assert_eq!(artifacts.len(), 2);
        assert_eq!(artifacts[0].fqns, vec!["x.A", "x.B"]);
        assert!(artifacts[1].fqns.is_empty());
    }

    #[test]
    fn test_load_resolve_input_with_missing_sections() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("project.json");
        fs::write(
            &path,
            r#"{"project": [{"fqn": "com.foo.Bar", "id": 1}],
                "relations": [{"kind": "extends", "source": "com.foo.Bar", "target": "java.lang.Object"}]}"#,
        )
        .unwrap();

        let input = load_resolve_input(&path).unwrap();
        assert_eq!(input.project.len(), 1);
        assert!(input.library.is_empty());
        assert_eq!(input.relations[0].kind, RelationKind::Extends);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let err = load_scores(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, CoreError::Io(_)));
    }
}
