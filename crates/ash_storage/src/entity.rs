//! Entity lifecycle with generational indices.
//!
//! A destroyed entity's index goes back on a free list and comes out again
//! with a bumped generation, so families never confuse a respawned index with
//! the entity that used to own it.

// Allow u64 to usize casts - we target 64-bit systems
#![allow(clippy::cast_possible_truncation)]

use ash_foundation::{EntityId, Error, Result};

/// Allocates entity ids and tracks which are alive.
///
/// Odd generations are alive, even generations are free.
#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    /// Generation counter for each entity index.
    generations: Vec<u32>,
    /// Indices available for reuse.
    free_list: Vec<u64>,
    /// Number of live entities.
    live: usize,
}

impl EntityStore {
    /// Creates an empty entity store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a live entity, reusing a freed index when one is available.
    pub fn spawn(&mut self) -> EntityId {
        self.live += 1;

        match self.free_list.pop() {
            Some(index) => {
                let generation = &mut self.generations[index as usize];
                *generation += 1;
                EntityId::new(index, *generation)
            }
            None => {
                let index = self.generations.len() as u64;
                self.generations.push(1);
                EntityId::new(index, 1)
            }
        }
    }

    /// Frees a live entity.
    ///
    /// # Errors
    ///
    /// Returns `StaleEntity` or `EntityNotFound` if `id` is not alive.
    pub fn destroy(&mut self, id: EntityId) -> Result<()> {
        self.validate(id)?;

        self.generations[id.index as usize] += 1;
        self.free_list.push(id.index);
        self.live -= 1;
        Ok(())
    }

    /// Returns true if `id` names a live entity.
    #[must_use]
    pub fn exists(&self, id: EntityId) -> bool {
        self.validate(id).is_ok()
    }

    /// Checks that `id` names a live entity.
    ///
    /// # Errors
    ///
    /// Returns `StaleEntity` when the index was reused since `id` was issued,
    /// and `EntityNotFound` when the index was never allocated or is free.
    pub fn validate(&self, id: EntityId) -> Result<()> {
        let Some(&current) = self.generations.get(id.index as usize) else {
            return Err(Error::entity_not_found(id));
        };

        if current != id.generation {
            return Err(Error::stale_entity(id));
        }
        if current % 2 == 0 {
            return Err(Error::entity_not_found(id));
        }
        Ok(())
    }

    /// Returns the number of live entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live
    }

    /// Returns true if no entity is alive.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Iterates over live entities in index order.
    pub fn iter(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.generations
            .iter()
            .enumerate()
            .filter(|(_, generation)| *generation % 2 == 1)
            .map(|(index, generation)| EntityId::new(index as u64, *generation))
    }

    /// Returns the current generation stored for an index.
    #[must_use]
    pub fn generation(&self, index: u64) -> Option<u32> {
        self.generations.get(index as usize).copied()
    }
}
