//! Jarlink Core - shared data model
//!
//! This crate holds the records that flow between the clustering and the
//! resolution halves of Jarlink:
//!
//! - [`ArtifactRecord`]: a scanned jar and the FQNs it defines
//! - [`ModeledEntity`]: a referenced FQN resolved to an id and a [`Classification`]
//! - [`RawRelation`]: a textual relation extracted from source, keyed by [`RelationKind`]
//!
//! Finished records leave through a [`RecordSink`]. Configuration and
//! error types live here too so every crate shares them.

mod artifact;
mod config;
mod entity;
mod error;
mod record;
mod relation;

pub use artifact::ArtifactRecord;
pub use config::{ClusterConfig, JarlinkConfig, ResolveConfig, TieBreak};
pub use entity::{Classification, EntityId, EntityRecord, ModeledEntity};
pub use error::{CoreError, Result};
pub use record::{LibraryRecord, MemorySink, RecordSink, ResolvedRelation};
pub use relation::{RawRelation, RelationKind};
