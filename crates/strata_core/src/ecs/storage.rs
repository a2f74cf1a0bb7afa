// storage.rs - Sparse-set component storage
//
// One store per component type. The sparse array is indexed by entity slot
// and holds dense index + 1 (0 = absent). The dense entity and value arrays
// are always index-aligned; removal swaps the last element into the hole.

use crate::ecs::{Component, Entity};
use std::any::{type_name, Any};

/// Dense, cache-friendly table mapping entities to their `T` value.
///
/// All operations are O(1) amortized. Lookups also compare the stored handle
/// against the queried one, so a stale handle whose slot was recycled never
/// observes the new occupant's data.
#[derive(Debug, Clone)]
pub struct ComponentStore<T> {
    sparse: Vec<u32>,
    entities: Vec<Entity>,
    values: Vec<T>,
}

impl<T> ComponentStore<T> {
    pub fn new() -> Self {
        Self {
            sparse: Vec::new(),
            entities: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Create a store whose dense arrays hold `capacity` values before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            sparse: Vec::new(),
            entities: Vec::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
        }
    }

    /// Insert or overwrite the value for `entity`.
    ///
    /// An existing value is replaced in its current dense slot; otherwise the
    /// value is appended. Liveness is the caller's concern (see
    /// [`ComponentRegistry::add`](crate::ComponentRegistry::add)).
    pub fn insert(&mut self, entity: Entity, value: T) -> &mut T {
        let slot = entity.slot();
        if slot >= self.sparse.len() {
            self.sparse.resize(slot + 1, 0);
        }

        let dense = self.sparse[slot];
        if dense != 0 {
            let at = (dense - 1) as usize;
            // A leftover from a purged-late slot is taken over by the live handle.
            self.entities[at] = entity;
            self.values[at] = value;
            return &mut self.values[at];
        }

        self.entities.push(entity);
        self.values.push(value);
        self.sparse[slot] = self.values.len() as u32;
        self.debug_check_alignment();
        let last = self.values.len() - 1;
        &mut self.values[last]
    }

    /// Position of `entity` in the dense arrays, if present.
    #[inline]
    pub fn dense_index(&self, entity: Entity) -> Option<usize> {
        let dense = *self.sparse.get(entity.slot())?;
        if dense == 0 {
            return None;
        }
        let at = (dense - 1) as usize;
        (self.entities[at] == entity).then_some(at)
    }

    #[inline]
    pub fn has(&self, entity: Entity) -> bool {
        self.dense_index(entity).is_some()
    }

    #[inline]
    pub fn get(&self, entity: Entity) -> Option<&T> {
        self.dense_index(entity).map(|at| &self.values[at])
    }

    #[inline]
    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        let at = self.dense_index(entity)?;
        Some(&mut self.values[at])
    }

    /// Remove the value for `entity` with a swap-remove. No-op if absent.
    pub fn remove(&mut self, entity: Entity) -> Option<T> {
        let at = self.dense_index(entity)?;
        let last = self.values.len() - 1;

        let value = self.values.swap_remove(at);
        self.entities.swap_remove(at);
        if at != last {
            let moved = self.entities[at];
            self.sparse[moved.slot()] = at as u32 + 1;
        }
        self.sparse[entity.slot()] = 0;

        self.debug_check_alignment();
        Some(value)
    }

    /// Drop every value of this type.
    pub fn clear(&mut self) {
        self.sparse.clear();
        self.entities.clear();
        self.values.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Entities in dense order.
    #[inline]
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Values in dense order, aligned with [`entities`](Self::entities).
    #[inline]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    #[inline]
    pub fn values_mut(&mut self) -> &mut [T] {
        &mut self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.entities.iter().copied().zip(self.values.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Entity, &mut T)> {
        self.entities.iter().copied().zip(self.values.iter_mut())
    }

    #[inline]
    fn debug_check_alignment(&self) {
        debug_assert_eq!(
            self.entities.len(),
            self.values.len(),
            "dense entity/value arrays diverged"
        );
    }
}

impl<T> Default for ComponentStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Type-erased view of a store, used by the registry for whole-entity
/// operations that do not know the concrete component type.
pub(crate) trait ErasedStore {
    fn remove_entity(&mut self, entity: Entity) -> bool;
    fn clear(&mut self);
    fn len(&self) -> usize;
    fn type_name(&self) -> &'static str;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Component> ErasedStore for ComponentStore<T> {
    fn remove_entity(&mut self, entity: Entity) -> bool {
        self.remove(entity).is_some()
    }

    fn clear(&mut self) {
        ComponentStore::clear(self);
    }

    fn len(&self) -> usize {
        ComponentStore::len(self)
    }

    fn type_name(&self) -> &'static str {
        type_name::<T>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
