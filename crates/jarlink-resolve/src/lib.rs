//! Jarlink Resolve - Entity resolution for extracted relations
//!
//! Every FQN referenced by a relation resolves to a [`ModeledEntity`]:
//!
//! 1. the project table (internal entities)
//! 2. the library index (library entities, shared across projects)
//! 3. the unknown cache (placeholders synthesized once per FQN, numbered
//!    by an allocator the library index shares with every project)
//!
//! The source endpoint of a relation must be internal; anything else is
//! rejected and the relation skipped.
//!
//! # Example
//!
//! ```no_run
//! use jarlink_core::{EntityRecord, MemorySink, RawRelation, RelationKind};
//! use jarlink_resolve::{LibraryIndex, ProjectTable, RelationImporter, ResolutionContext};
//! use std::sync::Arc;
//!
//! let library = Arc::new(LibraryIndex::new(vec![EntityRecord::new("java.lang.String", 1)]));
//! let project = ProjectTable::new(vec![EntityRecord::new("com.foo.Bar", 2)]);
//! let ctx = ResolutionContext::new(project, library, None);
//!
//! let relations = vec![RawRelation::new(RelationKind::Uses, "com.foo.Bar", "java.lang.String")];
//! let mut sink = MemorySink::new();
//! let summary = RelationImporter::new(&ctx).import(&relations, &mut sink)?;
//! # Ok::<(), jarlink_core::CoreError>(())
//! ```
//!
//! [`ModeledEntity`]: jarlink_core::ModeledEntity

mod context;
mod endpoint;
mod importer;
mod symbol_table;
mod unknown;

pub use context::ResolutionContext;
pub use endpoint::{resolve_source_endpoint, resolve_target_endpoint, EndpointRejection};
pub use importer::{ImportSummary, RelationImporter};
pub use symbol_table::{LibraryIndex, ProjectTable, SymbolTable};
pub use unknown::{IdAllocator, IdSpaceExhausted, UnknownEntityCache};
