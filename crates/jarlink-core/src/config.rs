//! Jarlink configuration.
//!
//! Stored as JSON (conventionally `.jarlink/config.json`). Every field has a
//! default, so a missing file or a partial document is fine.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// How artifacts with equal distinctiveness scores are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Earlier artifacts in the input corpus come first.
    #[default]
    InputOrder,

    /// Lexicographic order of artifact ids.
    ArtifactId,
}

/// Settings for library clustering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    /// Score artifacts and cluster components on the rayon pool.
    pub parallel: bool,

    pub tie_break: TieBreak,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            tie_break: TieBreak::InputOrder,
        }
    }
}

/// Settings for entity resolution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveConfig {
    /// First id handed to synthesized unknown entities. When unset, ids
    /// start right after the largest known id.
    pub first_unknown_id: Option<u64>,

    /// Resolve relations on the rayon pool.
    pub parallel: bool,
}

/// Top-level configuration document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JarlinkConfig {
    pub cluster: ClusterConfig,
    pub resolve: ResolveConfig,
}

impl JarlinkConfig {
    /// Loads the config at `path`, falling back to defaults if it does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        serde_json::from_str(&contents).map_err(|e| CoreError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Writes the config as pretty-printed JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}
