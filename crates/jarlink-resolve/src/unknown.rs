//! Placeholder entities for names nothing else defines.
//!
//! The cache belongs to one project's import run. It hands out one id per
//! FQN for the whole run, including when relations are resolved from
//! several threads at once. Ids come from an [`IdAllocator`] shared by
//! every project resolved against the same library index, so unknowns of
//! different projects never get the same id.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use jarlink_core::{EntityId, ModeledEntity};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, trace};

/// No entity id is left for a new unknown entity.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Entity id space exhausted while synthesizing {fqn}")]
pub struct IdSpaceExhausted {
    pub fqn: String,
}

/// Source of ids for synthesized entities.
///
/// Clones share one counter. `u64::MAX` is never handed out; a counter
/// sitting there is exhausted.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    next: Arc<AtomicU64>,
}

impl IdAllocator {
    /// Creates an allocator whose first id is `first`.
    pub fn starting_at(first: u64) -> Self {
        Self {
            next: Arc::new(AtomicU64::new(first)),
        }
    }

    /// Makes sure no id below `floor` is handed out from now on.
    pub fn raise_floor(&self, floor: u64) {
        self.next.fetch_max(floor, Ordering::SeqCst);
    }

    /// Makes sure every id handed out from now on is above `id`.
    pub fn reserve_through(&self, id: EntityId) {
        self.raise_floor(id.get().saturating_add(1));
    }

    /// Takes the next id, or `None` once the id space is used up.
    pub fn next_id(&self) -> Option<EntityId> {
        self.next
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_add(1))
            .ok()
            .map(EntityId)
    }

    /// The id the next allocation would return.
    pub fn peek(&self) -> u64 {
        self.next.load(Ordering::SeqCst)
    }
}

/// Memoized unknown entities, keyed by FQN.
#[derive(Debug)]
pub struct UnknownEntityCache {
    entities: DashMap<String, ModeledEntity>,
    ids: IdAllocator,
}

impl UnknownEntityCache {
    /// Creates an empty cache drawing ids from `ids`.
    pub fn new(ids: IdAllocator) -> Self {
        Self {
            entities: DashMap::new(),
            ids,
        }
    }

    /// Returns the entity for `fqn`, synthesizing it on first request.
    ///
    /// Lookup and insertion happen under the shard lock of the entry, so
    /// concurrent callers asking for the same FQN get the same id.
    pub fn get_or_create(&self, fqn: &str) -> Result<ModeledEntity, IdSpaceExhausted> {
        if let Some(entity) = self.entities.get(fqn) {
            return Ok(entity.clone());
        }

        match self.entities.entry(fqn.to_string()) {
            Entry::Occupied(entry) => Ok(entry.get().clone()),
            Entry::Vacant(entry) => {
                let Some(id) = self.ids.next_id() else {
                    error!("No entity id left for unknown entity {}", fqn);
                    return Err(IdSpaceExhausted {
                        fqn: fqn.to_string(),
                    });
                };
                trace!("Synthesized unknown entity {} for {}", id, fqn);
                Ok(entry.insert(ModeledEntity::unknown(fqn, id)).clone())
            }
        }
    }

    /// Looks up a previously synthesized entity without creating one.
    pub fn get(&self, fqn: &str) -> Option<ModeledEntity> {
        self.entities.get(fqn).map(|entity| entity.clone())
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// All synthesized entities, ordered by id.
    pub fn entities(&self) -> Vec<ModeledEntity> {
        let mut entities: Vec<ModeledEntity> = self
            .entities
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        entities.sort_by_key(|entity| entity.id);
        entities
    }
}
