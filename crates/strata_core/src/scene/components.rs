//! Scene payload components.
//!
//! Plain data records attached through the registry. Only
//! [`TransformComponent`] is interpreted by the core (see the transform
//! system); the others are carried for the renderer and editor panels.

use crate::ecs::Entity;
use crate::math::{Mat4, Transform, Vec3};

/// Local transform, parent link, and cached world matrix.
///
/// `parent` is a plain handle, not ownership: it may point at a destroyed or
/// never-existing entity, in which case this entity resolves as a root.
/// `world` is only meaningful right after [`Scene::update`](crate::Scene::update).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformComponent {
    pub local: Transform,
    pub parent: Entity,
    pub world: Mat4,
}

impl TransformComponent {
    pub fn new(local: Transform) -> Self {
        Self {
            local,
            parent: Entity::INVALID,
            world: Mat4::IDENTITY,
        }
    }

    pub fn at(position: Vec3) -> Self {
        Self::new(Transform::from_position(position))
    }

    pub fn with_parent(mut self, parent: Entity) -> Self {
        self.parent = parent;
        self
    }

    /// World-space translation from the cached matrix.
    pub fn world_position(&self) -> Vec3 {
        self.world.w_axis.truncate()
    }
}

impl Default for TransformComponent {
    fn default() -> Self {
        Self::new(Transform::IDENTITY)
    }
}

/// Reference to renderable geometry inside an imported asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeshRendererComponent {
    pub asset_path: String,
    /// -1 draws every mesh in the asset.
    pub mesh_index: i32,
    /// -1 draws every primitive of the selected mesh.
    pub primitive_index: i32,
    pub visible: bool,
}

impl MeshRendererComponent {
    pub fn new(asset_path: impl Into<String>) -> Self {
        Self {
            asset_path: asset_path.into(),
            ..Self::default()
        }
    }

    pub fn with_mesh(mut self, mesh_index: i32, primitive_index: i32) -> Self {
        self.mesh_index = mesh_index;
        self.primitive_index = primitive_index;
        self
    }
}

impl Default for MeshRendererComponent {
    fn default() -> Self {
        Self {
            asset_path: String::new(),
            mesh_index: -1,
            primitive_index: -1,
            visible: true,
        }
    }
}

/// Display name shown in hierarchy and inspector panels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameComponent {
    pub value: String,
}

impl NameComponent {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

/// Logical material id, resolved by the material library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterialComponent {
    pub material_id: String,
}

impl Default for MaterialComponent {
    fn default() -> Self {
        Self {
            material_id: "default_color".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_defaults_to_unparented_identity() {
        let t = TransformComponent::default();
        assert_eq!(t.parent, Entity::INVALID);
        assert_eq!(t.world, Mat4::IDENTITY);
        assert_eq!(t.local, Transform::IDENTITY);
    }

    #[test]
    fn mesh_renderer_defaults_to_all_meshes_visible() {
        let m = MeshRendererComponent::new("models/crate.gltf");
        assert_eq!(m.mesh_index, -1);
        assert_eq!(m.primitive_index, -1);
        assert!(m.visible);
    }

    #[test]
    fn material_defaults_to_default_color() {
        assert_eq!(MaterialComponent::default().material_id, "default_color");
    }
}
