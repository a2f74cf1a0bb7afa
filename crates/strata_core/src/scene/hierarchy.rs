//! Parent/child view over transform entities, for tree-style panels.

use crate::ecs::{ComponentRegistry, ComponentStore, Entity, LivenessOracle};
use crate::scene::TransformComponent;
use std::collections::{HashMap, HashSet};

/// Snapshot of the transform forest.
///
/// An entity is a root when its parent is invalid, not alive, or has no
/// transform of its own, matching how the resolver treats it. Siblings keep
/// the transform store's dense order.
///
/// Parent cycles are broken at the same member the resolver resolves from its
/// local transform: the first entity revisited when following parent links
/// from the lowest dense index of the cycle's unreached entities. That member
/// is listed after the ordinary roots and in [`cycle_roots`](Self::cycle_roots),
/// so every transform entity appears in the tree exactly once.
#[derive(Debug, Default, Clone)]
pub struct Hierarchy {
    roots: Vec<Entity>,
    cycle_roots: Vec<Entity>,
    children: HashMap<Entity, Vec<Entity>>,
}

impl Hierarchy {
    pub fn build<O>(components: &ComponentRegistry, entities: &O) -> Self
    where
        O: LivenessOracle + ?Sized,
    {
        let mut hierarchy = Self::default();
        let Some(store) = components.store::<TransformComponent>() else {
            return hierarchy;
        };

        for (entity, transform) in store.iter() {
            match linked_parent(store, entities, transform.parent) {
                Some(parent) => hierarchy.children.entry(parent).or_default().push(entity),
                None => hierarchy.roots.push(entity),
            }
        }

        let mut reached = HashSet::with_capacity(store.len());
        for &root in &hierarchy.roots {
            hierarchy.mark_reachable(root, &mut reached);
        }
        if reached.len() < store.len() {
            hierarchy.break_cycles(store, entities, &mut reached);
        }
        hierarchy
    }

    /// Ordinary roots first, then cycle members promoted to roots.
    pub fn roots(&self) -> &[Entity] {
        &self.roots
    }

    /// Entities shown as roots only because their parent links form a cycle.
    pub fn cycle_roots(&self) -> &[Entity] {
        &self.cycle_roots
    }

    pub fn children_of(&self, entity: Entity) -> &[Entity] {
        self.children.get(&entity).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty() && self.children.is_empty()
    }

    /// Visit every transform entity once, parents before children, passing
    /// its depth (roots are 0).
    pub fn walk_depth_first<F>(&self, mut visit: F)
    where
        F: FnMut(Entity, usize),
    {
        let mut stack: Vec<(Entity, usize)> =
            self.roots.iter().rev().map(|&root| (root, 0)).collect();

        while let Some((entity, depth)) = stack.pop() {
            visit(entity, depth);
            stack.extend(
                self.children_of(entity)
                    .iter()
                    .rev()
                    .map(|&child| (child, depth + 1)),
            );
        }
    }

    fn mark_reachable(&self, from: Entity, reached: &mut HashSet<Entity>) {
        let mut stack = vec![from];
        while let Some(entity) = stack.pop() {
            if reached.insert(entity) {
                stack.extend_from_slice(self.children_of(entity));
            }
        }
    }

    /// Every entity not reached from a root sits on or below a cycle.
    fn break_cycles<O>(
        &mut self,
        store: &ComponentStore<TransformComponent>,
        entities: &O,
        reached: &mut HashSet<Entity>,
    ) where
        O: LivenessOracle + ?Sized,
    {
        let mut chain = HashSet::new();
        for &start in store.entities() {
            if reached.contains(&start) {
                continue;
            }

            chain.clear();
            let mut current = start;
            let member = loop {
                if reached.contains(&current) {
                    break None;
                }
                if !chain.insert(current) {
                    break Some(current);
                }
                match store
                    .get(current)
                    .and_then(|t| linked_parent(store, entities, t.parent))
                {
                    Some(parent) => current = parent,
                    None => break None,
                }
            };

            let Some(member) = member else { continue };
            if let Some(parent) = store
                .get(member)
                .and_then(|t| linked_parent(store, entities, t.parent))
            {
                if let Some(siblings) = self.children.get_mut(&parent) {
                    siblings.retain(|&child| child != member);
                }
            }
            self.roots.push(member);
            self.cycle_roots.push(member);
            self.mark_reachable(member, reached);
        }
    }
}

/// The parent the resolver composes with, if any.
fn linked_parent<O>(
    store: &ComponentStore<TransformComponent>,
    entities: &O,
    parent: Entity,
) -> Option<Entity>
where
    O: LivenessOracle + ?Sized,
{
    (parent.is_valid() && entities.is_alive(parent) && store.has(parent)).then_some(parent)
}
