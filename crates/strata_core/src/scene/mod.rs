//! Scene façade
//!
//! [`Scene`] owns the entity allocator and component registry and keeps the
//! two consistent: destroying an entity always purges its components.
//! Once per frame callers run [`Scene::update`] and then
//! [`Scene::build_render_list`].

mod components;
mod hierarchy;
mod render;
mod transform_system;

pub use components::{MaterialComponent, MeshRendererComponent, NameComponent, TransformComponent};
pub use hierarchy::Hierarchy;
pub use render::{collect_render_list, RenderEntity};
pub use transform_system::{TransformStats, TransformSystem};

use crate::ecs::{Component, ComponentRegistry, ComponentStore, Entity, EntityAllocator};
use crate::{SceneConfig, SceneError};
use tracing::debug;

/// Name shown for entities without a usable [`NameComponent`].
pub const DEFAULT_ENTITY_NAME: &str = "Entity";

/// The scene: entities, their components, and the transform resolver.
#[derive(Debug, Default)]
pub struct Scene {
    entities: EntityAllocator,
    components: ComponentRegistry,
    transforms: TransformSystem,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scene with pre-reserved capacity.
    pub fn with_config(config: &SceneConfig) -> Result<Self, SceneError> {
        config.validate()?;
        debug!(
            entity_capacity = config.entity_capacity,
            component_capacity = config.component_capacity,
            "scene created"
        );
        Ok(Self {
            entities: EntityAllocator::with_capacity(config.entity_capacity),
            components: ComponentRegistry::with_store_capacity(config.component_capacity),
            transforms: TransformSystem::new(),
        })
    }

    pub fn create_entity(&mut self) -> Entity {
        self.entities.create()
    }

    /// Destroy an entity and purge all of its components.
    ///
    /// Returns false (and purges nothing) for stale or unknown handles.
    pub fn destroy_entity(&mut self, entity: Entity) -> bool {
        if !self.entities.destroy(entity) {
            return false;
        }
        self.components.on_entity_destroyed(entity);
        true
    }

    /// Drop every component, then every entity.
    pub fn clear(&mut self) {
        self.components.clear();
        self.entities.clear();
    }

    /// Recompute world matrices. Running it twice without edits changes nothing.
    pub fn update(&mut self) -> TransformStats {
        self.transforms.update(&mut self.components, &self.entities)
    }

    /// Snapshot of everything the renderer should draw this frame.
    pub fn build_render_list(&self) -> Vec<RenderEntity> {
        collect_render_list(&self.components)
    }

    /// Parent/child view of transform entities.
    pub fn hierarchy(&self) -> Hierarchy {
        Hierarchy::build(&self.components, &self.entities)
    }

    /// Display name for panels, falling back to [`DEFAULT_ENTITY_NAME`].
    pub fn display_name(&self, entity: Entity) -> &str {
        self.components
            .get::<NameComponent>(entity)
            .map(|name| name.value.as_str())
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_ENTITY_NAME)
    }

    /// Liveness queries.
    pub fn entities(&self) -> &EntityAllocator {
        &self.entities
    }

    /// Read-only component access.
    pub fn components(&self) -> &ComponentRegistry {
        &self.components
    }

    /// Mutable component access, checked against this scene's entities.
    pub fn components_mut(&mut self) -> Components<'_> {
        Components {
            entities: &self.entities,
            registry: &mut self.components,
        }
    }
}

/// Mutable component view that validates adds against the owning scene.
pub struct Components<'a> {
    entities: &'a EntityAllocator,
    registry: &'a mut ComponentRegistry,
}

impl Components<'_> {
    /// Attach or overwrite a component. `None` if the entity is not alive.
    pub fn add<T: Component>(&mut self, entity: Entity, value: T) -> Option<&mut T> {
        self.registry.add(self.entities, entity, value)
    }

    pub fn has<T: Component>(&self, entity: Entity) -> bool {
        self.registry.has::<T>(entity)
    }

    pub fn get<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.registry.get::<T>(entity)
    }

    pub fn get_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        self.registry.get_mut::<T>(entity)
    }

    pub fn remove<T: Component>(&mut self, entity: Entity) -> Option<T> {
        self.registry.remove::<T>(entity)
    }

    pub fn store<T: Component>(&self) -> Option<&ComponentStore<T>> {
        self.registry.store::<T>()
    }

    pub fn store_mut<T: Component>(&mut self) -> Option<&mut ComponentStore<T>> {
        self.registry.store_mut::<T>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{Mat4, Vec3};

    #[test]
    fn destroy_purges_components() {
        let mut scene = Scene::new();
        let e = scene.create_entity();
        scene.components_mut().add(e, TransformComponent::default());
        scene.components_mut().add(e, NameComponent::new("crate"));

        assert!(scene.destroy_entity(e));
        assert!(!scene.entities().is_alive(e));
        assert!(!scene.components().has::<TransformComponent>(e));
        assert!(!scene.components().has::<NameComponent>(e));
    }

    #[test]
    fn destroy_of_stale_handle_leaves_new_occupant_alone() {
        let mut scene = Scene::new();
        let old = scene.create_entity();
        assert!(scene.destroy_entity(old));

        let new = scene.create_entity();
        assert_eq!(new.index(), old.index());
        scene.components_mut().add(new, NameComponent::new("new"));

        assert!(!scene.destroy_entity(old));
        assert!(scene.entities().is_alive(new));
        assert_eq!(scene.display_name(new), "new");
    }

    #[test]
    fn add_to_dead_entity_is_rejected() {
        let mut scene = Scene::new();
        let e = scene.create_entity();
        scene.destroy_entity(e);
        assert!(scene.components_mut().add(e, MaterialComponent::default()).is_none());
    }

    #[test]
    fn clear_resets_entities_and_components() {
        let mut scene = Scene::new();
        let e = scene.create_entity();
        scene
            .components_mut()
            .add(e, MeshRendererComponent::new("models/box.gltf"));

        scene.clear();

        assert!(!scene.entities().is_alive(e));
        assert!(scene.entities().is_empty());
        assert!(scene.build_render_list().is_empty());
    }

    #[test]
    fn handle_from_before_clear_never_sees_new_entity() {
        let mut scene = Scene::new();
        let old = scene.create_entity();
        scene.components_mut().add(old, NameComponent::new("before"));

        scene.clear();
        let new = scene.create_entity();
        scene.components_mut().add(new, NameComponent::new("after"));

        assert_eq!(new.index(), old.index());
        assert_ne!(new, old);
        assert!(!scene.entities().is_alive(old));
        assert!(scene.components().get::<NameComponent>(old).is_none());
        assert!(!scene.destroy_entity(old));
        assert_eq!(scene.display_name(new), "after");
    }

    #[test]
    fn render_list_follows_parented_transform() {
        let mut scene = Scene::new();
        let e1 = scene.create_entity();
        let e2 = scene.create_entity();
        scene.components_mut().add(e1, TransformComponent::at(Vec3::ZERO));
        scene
            .components_mut()
            .add(e2, TransformComponent::at(Vec3::new(1.0, 0.0, 0.0)).with_parent(e1));

        scene.update();

        let world_e2 = scene.components().get::<TransformComponent>(e2).unwrap().world;
        assert!(world_e2.abs_diff_eq(Mat4::from_translation(Vec3::new(1.0, 0.0, 0.0)), 1e-6));
        assert!(scene.build_render_list().is_empty());

        scene.components_mut().add(e2, MeshRendererComponent::new("x"));
        let list = scene.build_render_list();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].entity, e2);
        assert_eq!(list[0].asset_path, "x");
        assert_eq!(list[0].mesh_index, -1);
        assert_eq!(list[0].primitive_index, -1);
        assert_eq!(list[0].world, world_e2.to_cols_array());
    }

    #[test]
    fn render_list_skips_hidden_and_pathless_meshes() {
        let mut scene = Scene::new();
        let hidden = scene.create_entity();
        let pathless = scene.create_entity();
        let shown = scene.create_entity();

        let mut mesh = MeshRendererComponent::new("models/a.gltf");
        mesh.visible = false;
        scene.components_mut().add(hidden, mesh);
        scene.components_mut().add(pathless, MeshRendererComponent::default());
        scene
            .components_mut()
            .add(shown, MeshRendererComponent::new("models/b.gltf").with_mesh(2, 0));

        let list = scene.build_render_list();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].entity, shown);
        assert_eq!((list[0].mesh_index, list[0].primitive_index), (2, 0));
        // No transform: identity.
        assert_eq!(list[0].world, Mat4::IDENTITY.to_cols_array());
    }

    #[test]
    fn render_list_is_a_detached_copy() {
        let mut scene = Scene::new();
        let e = scene.create_entity();
        scene.components_mut().add(e, MeshRendererComponent::new("models/c.gltf"));

        let mut list = scene.build_render_list();
        list[0].asset_path.clear();
        list[0].world[12] = 99.0;

        let fresh = scene.build_render_list();
        assert_eq!(fresh[0].asset_path, "models/c.gltf");
        assert_eq!(fresh[0].world[12], 0.0);
    }

    #[test]
    fn destroyed_parent_falls_back_to_local() {
        let mut scene = Scene::new();
        let parent = scene.create_entity();
        let child = scene.create_entity();
        scene
            .components_mut()
            .add(parent, TransformComponent::at(Vec3::new(5.0, 0.0, 0.0)));
        scene
            .components_mut()
            .add(child, TransformComponent::at(Vec3::new(0.0, 2.0, 0.0)).with_parent(parent));

        scene.update();
        scene.destroy_entity(parent);
        scene.update();

        let child_world = scene.components().get::<TransformComponent>(child).unwrap();
        assert!(child_world.world_position().abs_diff_eq(Vec3::new(0.0, 2.0, 0.0), 1e-6));
    }

    #[test]
    fn update_is_idempotent() {
        let mut scene = Scene::new();
        let root = scene.create_entity();
        let child = scene.create_entity();
        scene
            .components_mut()
            .add(root, TransformComponent::at(Vec3::new(1.0, 1.0, 0.0)));
        scene
            .components_mut()
            .add(child, TransformComponent::at(Vec3::X).with_parent(root));

        let first = scene.update();
        let before = scene.build_render_list();
        let second = scene.update();
        assert_eq!(first, second);
        assert_eq!(before, scene.build_render_list());
    }

    #[test]
    fn display_name_falls_back() {
        let mut scene = Scene::new();
        let named = scene.create_entity();
        let unnamed = scene.create_entity();
        let blank = scene.create_entity();
        scene.components_mut().add(named, NameComponent::new("lamp"));
        scene.components_mut().add(blank, NameComponent::default());

        assert_eq!(scene.display_name(named), "lamp");
        assert_eq!(scene.display_name(unnamed), DEFAULT_ENTITY_NAME);
        assert_eq!(scene.display_name(blank), DEFAULT_ENTITY_NAME);
    }

    #[test]
    fn with_config_rejects_oversized_capacity() {
        let config = SceneConfig {
            entity_capacity: usize::MAX,
            ..SceneConfig::default()
        };
        assert!(Scene::with_config(&config).is_err());
        assert!(Scene::with_config(&SceneConfig::default()).is_ok());
    }

    #[test]
    fn custom_component_types_are_supported() {
        #[derive(Debug, PartialEq)]
        struct Spin(f32);

        let mut scene = Scene::new();
        let e = scene.create_entity();
        scene.components_mut().add(e, Spin(0.5));
        if let Some(spin) = scene.components_mut().get_mut::<Spin>(e) {
            spin.0 *= 2.0;
        }
        assert_eq!(scene.components().get::<Spin>(e), Some(&Spin(1.0)));
    }
}
