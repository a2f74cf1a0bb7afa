// allocator.rs - Generational entity allocation
//
// Owns the authoritative liveness and generation state for every slot.
// Freed slots are recycled LIFO with their generation already advanced.

use crate::ecs::entity::{Entity, GENERATION_MASK, MAX_SLOTS};
use tracing::{debug, trace};

/// Anything that can answer "is this handle still alive?".
///
/// Component storage and the transform resolver take this instead of the
/// concrete allocator so they never own liveness state themselves.
pub trait LivenessOracle {
    fn is_alive(&self, entity: Entity) -> bool;
}

/// Hands out and retires generational entity handles.
///
/// Three parallel sequences indexed by slot: current generation, alive flag,
/// and a free list of retired slots.
#[derive(Debug, Default, Clone)]
pub struct EntityAllocator {
    generations: Vec<u32>,
    alive: Vec<bool>,
    free: Vec<u32>,
}

impl EntityAllocator {
    /// Create an empty allocator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an allocator with room for `capacity` slots before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            generations: Vec::with_capacity(capacity),
            alive: Vec::with_capacity(capacity),
            free: Vec::new(),
        }
    }

    /// Allocate a new entity, reusing a retired slot when one is available.
    ///
    /// # Panics
    ///
    /// If all [`MAX_SLOTS`] slots are live. Handing out another handle would
    /// alias slot 0.
    pub fn create(&mut self) -> Entity {
        let index = match self.free.pop() {
            Some(index) => {
                self.alive[index as usize] = true;
                index
            }
            None => {
                let index = self.generations.len();
                assert!(index < MAX_SLOTS, "entity slot space exhausted ({MAX_SLOTS} slots)");
                self.generations.push(1);
                self.alive.push(true);
                index as u32
            }
        };

        let entity = Entity::new(index, self.generations[index as usize]);
        trace!(%entity, "entity created");
        entity
    }

    /// Destroy an entity.
    ///
    /// Returns false for stale, out-of-range, or already-destroyed handles.
    /// On success the slot's generation advances so every copy of the handle
    /// stops comparing alive.
    pub fn destroy(&mut self, entity: Entity) -> bool {
        if !self.is_alive(entity) {
            return false;
        }

        let slot = entity.slot();
        self.alive[slot] = false;
        self.generations[slot] = next_generation(self.generations[slot]);
        self.free.push(entity.index());
        trace!(%entity, "entity destroyed");
        true
    }

    /// Check whether a handle refers to a live entity. Never panics.
    #[inline]
    pub fn is_alive(&self, entity: Entity) -> bool {
        let slot = entity.slot();
        slot < self.generations.len()
            && self.alive[slot]
            && self.generations[slot] == entity.generation()
    }

    /// Retire every live entity at once.
    ///
    /// Slots are kept with their generation advanced, so no previously issued
    /// handle compares alive again. All slots go back on the free list, lowest
    /// index first out.
    pub fn clear(&mut self) {
        debug!(slots = self.generations.len(), live = self.len(), "entity allocator cleared");
        for (generation, alive) in self.generations.iter_mut().zip(self.alive.iter_mut()) {
            if *alive {
                *generation = next_generation(*generation);
                *alive = false;
            }
        }
        self.free.clear();
        self.free.extend((0..self.generations.len() as u32).rev());
    }

    /// Number of live entities.
    pub fn len(&self) -> usize {
        self.generations.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of slots ever allocated (live + free).
    pub fn slot_count(&self) -> usize {
        self.generations.len()
    }

    /// Iterate over live entities in slot order.
    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.generations
            .iter()
            .zip(self.alive.iter())
            .enumerate()
            .filter(|(_, (_, alive))| **alive)
            .map(|(index, (generation, _))| Entity::new(index as u32, *generation))
    }
}

impl LivenessOracle for EntityAllocator {
    #[inline]
    fn is_alive(&self, entity: Entity) -> bool {
        EntityAllocator::is_alive(self, entity)
    }
}

/// Advance a generation within its bit field, skipping zero.
#[inline]
fn next_generation(generation: u32) -> u32 {
    match generation.wrapping_add(1) & GENERATION_MASK {
        0 => 1,
        next => next,
    }
}
