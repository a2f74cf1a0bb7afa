//! Transform hierarchy resolution
//!
//! Recomputes `world` for every [`TransformComponent`] so that
//! `world(e) = world(parent) * local(e)` whenever the parent is alive and has
//! its own transform, and `world(e) = local(e)` otherwise.
//!
//! Entities are visited in the store's dense order with a depth-first walk
//! over an explicit stack, memoizing a per-entity status so each chain is
//! resolved once per pass. The result does not depend on insertion order.
//!
//! # Cycles
//!
//! Parent links are mutated freely by editor code, so cycles can appear.
//! When the walk reaches a parent that is still in progress, that parent is
//! resolved from its local transform alone and marked done for this pass.
//! The graph is never modified; the same entity breaks the cycle next frame
//! if nothing changes.

use crate::ecs::{ComponentRegistry, ComponentStore, LivenessOracle};
use crate::scene::TransformComponent;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    Unvisited,
    InProgress,
    Done,
}

/// Summary of one resolver pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TransformStats {
    /// World matrices written this pass.
    pub resolved: usize,
    /// Cycle members resolved as roots.
    pub cycles_broken: usize,
}

/// Resolver state. The visit and stack buffers are reused across frames.
#[derive(Debug, Default)]
pub struct TransformSystem {
    visit: Vec<Visit>,
    stack: Vec<usize>,
}

impl TransformSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve every transform in the registry. No-op without a transform store.
    pub fn update<O>(&mut self, components: &mut ComponentRegistry, entities: &O) -> TransformStats
    where
        O: LivenessOracle + ?Sized,
    {
        match components.store_mut::<TransformComponent>() {
            Some(store) => self.resolve(store, entities),
            None => TransformStats::default(),
        }
    }

    /// Resolve every transform in `store`.
    pub fn resolve<O>(
        &mut self,
        store: &mut ComponentStore<TransformComponent>,
        entities: &O,
    ) -> TransformStats
    where
        O: LivenessOracle + ?Sized,
    {
        let count = store.len();
        self.visit.clear();
        self.visit.resize(count, Visit::Unvisited);
        self.stack.clear();

        let mut stats = TransformStats::default();

        for start in 0..count {
            if self.visit[start] == Visit::Done {
                continue;
            }
            self.stack.push(start);

            while let Some(&index) = self.stack.last() {
                match self.visit[index] {
                    Visit::Unvisited => {
                        self.visit[index] = Visit::InProgress;
                        let Some(parent) = parent_index(store, entities, index) else {
                            continue;
                        };
                        match self.visit[parent] {
                            Visit::Unvisited => self.stack.push(parent),
                            Visit::InProgress => {
                                // Back edge: the parent is further down the stack (or is us).
                                let transform = &mut store.values_mut()[parent];
                                transform.world = transform.local.to_matrix();
                                self.visit[parent] = Visit::Done;
                                stats.resolved += 1;
                                stats.cycles_broken += 1;
                            }
                            Visit::Done => {}
                        }
                    }
                    Visit::InProgress => {
                        // Parent (if any) is done; compose and finish.
                        self.stack.pop();
                        let parent_world = parent_index(store, entities, index)
                            .map(|parent| store.values()[parent].world);
                        let transform = &mut store.values_mut()[index];
                        let local = transform.local.to_matrix();
                        transform.world = match parent_world {
                            Some(parent_world) => parent_world * local,
                            None => local,
                        };
                        self.visit[index] = Visit::Done;
                        stats.resolved += 1;
                    }
                    Visit::Done => {
                        // Cycle member already resolved as a root.
                        self.stack.pop();
                    }
                }
            }
        }

        debug!(
            resolved = stats.resolved,
            cycles_broken = stats.cycles_broken,
            "transform hierarchy resolved"
        );
        stats
    }
}

/// Dense index of the entity's parent, if it is alive and has a transform.
#[inline]
fn parent_index<O>(
    store: &ComponentStore<TransformComponent>,
    entities: &O,
    index: usize,
) -> Option<usize>
where
    O: LivenessOracle + ?Sized,
{
    let parent = store.values()[index].parent;
    if !parent.is_valid() || !entities.is_alive(parent) {
        return None;
    }
    store.dense_index(parent)
}
