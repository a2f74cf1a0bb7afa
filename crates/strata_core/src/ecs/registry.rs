// registry.rs - Type-indexed collection of component stores
//
// Stores are created lazily on first add and keyed by the component's
// TypeId. The registry owns every store; external code only ever borrows.

use crate::ecs::storage::ErasedStore;
use crate::ecs::{Component, ComponentStore, Entity, LivenessOracle};
use std::any::{type_name, TypeId};
use std::collections::HashMap;
use tracing::{debug, trace};

/// Routes typed component operations to the right [`ComponentStore`].
#[derive(Default)]
pub struct ComponentRegistry {
    stores: HashMap<TypeId, Box<dyn ErasedStore>>,
    store_capacity: usize,
}

impl ComponentRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry whose stores pre-reserve `store_capacity` values.
    pub fn with_store_capacity(store_capacity: usize) -> Self {
        Self {
            stores: HashMap::new(),
            store_capacity,
        }
    }

    /// Attach `value` to `entity`, overwriting any existing `T`.
    ///
    /// Returns `None` without touching storage if the oracle reports the
    /// entity as not alive.
    pub fn add<T, O>(&mut self, oracle: &O, entity: Entity, value: T) -> Option<&mut T>
    where
        T: Component,
        O: LivenessOracle + ?Sized,
    {
        if !oracle.is_alive(entity) {
            trace!(%entity, component = type_name::<T>(), "add rejected: entity not alive");
            return None;
        }
        Some(self.store_or_insert::<T>().insert(entity, value))
    }

    pub fn has<T: Component>(&self, entity: Entity) -> bool {
        self.store::<T>().is_some_and(|store| store.has(entity))
    }

    pub fn get<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.store::<T>()?.get(entity)
    }

    pub fn get_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        self.store_mut::<T>()?.get_mut(entity)
    }

    /// Detach and return the `T` on `entity`, if any.
    pub fn remove<T: Component>(&mut self, entity: Entity) -> Option<T> {
        self.store_mut::<T>()?.remove(entity)
    }

    /// Purge `entity` from every store. Returns how many components were removed.
    ///
    /// Cost is proportional to the number of component types in use.
    pub fn on_entity_destroyed(&mut self, entity: Entity) -> usize {
        let removed = self
            .stores
            .values_mut()
            .map(|store| store.remove_entity(entity))
            .filter(|removed| *removed)
            .count();
        trace!(%entity, removed, "entity purged from component stores");
        removed
    }

    /// Empty every store. The stores themselves stay registered.
    pub fn clear(&mut self) {
        for store in self.stores.values_mut() {
            store.clear();
        }
        debug!(stores = self.stores.len(), "component registry cleared");
    }

    /// Typed store for `T`, if any component of that type was ever added.
    pub fn store<T: Component>(&self) -> Option<&ComponentStore<T>> {
        self.stores
            .get(&TypeId::of::<T>())?
            .as_any()
            .downcast_ref::<ComponentStore<T>>()
    }

    pub fn store_mut<T: Component>(&mut self) -> Option<&mut ComponentStore<T>> {
        self.stores
            .get_mut(&TypeId::of::<T>())?
            .as_any_mut()
            .downcast_mut::<ComponentStore<T>>()
    }

    /// Number of component types with a store.
    pub fn store_count(&self) -> usize {
        self.stores.len()
    }

    /// Registered component type names with their current value counts.
    /// Sorted by name.
    pub fn type_names(&self) -> Vec<(&'static str, usize)> {
        let mut names: Vec<_> = self
            .stores
            .values()
            .map(|store| (store.type_name(), store.len()))
            .collect();
        names.sort_unstable_by_key(|(name, _)| *name);
        names
    }

    fn store_or_insert<T: Component>(&mut self) -> &mut ComponentStore<T> {
        let capacity = self.store_capacity;
        self.stores
            .entry(TypeId::of::<T>())
            .or_insert_with(|| {
                debug!(component = type_name::<T>(), "component store created");
                Box::new(ComponentStore::<T>::with_capacity(capacity))
            })
            .as_any_mut()
            .downcast_mut::<ComponentStore<T>>()
            .expect("component store keyed by a different type")
    }
}

impl std::fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentRegistry")
            .field("stores", &self.type_names())
            .finish()
    }
}
