//! Error types for Jarlink.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading inputs or configuration.
///
/// Clustering is total and resolution only fails once entity ids run
/// out; everything else here covers malformed upstream data.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config {path}: {message}")]
    Config { path: PathBuf, message: String },

    #[error("Artifact '{0}' appears more than once in the corpus")]
    DuplicateArtifact(String),

    #[error("No entity id left for unknown entity {0}")]
    IdSpaceExhausted(String),
}

/// Convenience alias for results carrying a [`CoreError`].
pub type Result<T> = std::result::Result<T, CoreError>;
