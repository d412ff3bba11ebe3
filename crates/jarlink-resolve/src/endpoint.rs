//! Relation endpoint validation.
//!
//! The source of a relation is the entity doing the referencing, so it must
//! be defined by the project under analysis. The target may point anywhere:
//! into the project, into a known library, or at something unknown.

use crate::context::ResolutionContext;
use crate::unknown::IdSpaceExhausted;
use jarlink_core::{EntityId, ModeledEntity};
use thiserror::Error;
use tracing::error;

/// Why a relation endpoint was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EndpointRejection {
    #[error("Invalid source entity {entity}: relation sources must be internal")]
    InvalidSource { entity: ModeledEntity },

    /// No id was left to synthesize an unknown entity. Unlike an invalid
    /// source, this ends the whole import.
    #[error(transparent)]
    Exhausted(#[from] IdSpaceExhausted),
}

impl EndpointRejection {
    /// The entity the endpoint resolved to, if it resolved at all.
    pub fn entity(&self) -> Option<&ModeledEntity> {
        match self {
            EndpointRejection::InvalidSource { entity } => Some(entity),
            EndpointRejection::Exhausted(_) => None,
        }
    }
}

/// Resolves the source (left-hand) endpoint of a relation.
///
/// Returns the entity id if the FQN is internal to the project. Otherwise
/// logs an error and rejects; the caller skips this one relation and
/// carries on with the rest.
pub fn resolve_source_endpoint(
    ctx: &ResolutionContext,
    fqn: &str,
) -> Result<EntityId, EndpointRejection> {
    let entity = ctx.resolve(fqn)?;
    if entity.is_internal() {
        Ok(entity.id)
    } else {
        error!("Invalid source entity: {} (fqn {})", entity, fqn);
        Err(EndpointRejection::InvalidSource { entity })
    }
}

/// Resolves the target (right-hand) endpoint of a relation.
///
/// Every classification is accepted.
pub fn resolve_target_endpoint(
    ctx: &ResolutionContext,
    fqn: &str,
) -> Result<ModeledEntity, IdSpaceExhausted> {
    ctx.resolve(fqn)
}
