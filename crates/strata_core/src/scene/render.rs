//! Render list extraction
//!
//! Flattens mesh components into per-frame records for the renderer.

use crate::ecs::{ComponentRegistry, Entity};
use crate::math::{to_render_array, Mat4};
use crate::scene::{MeshRendererComponent, TransformComponent};

/// One draw request for the current frame.
///
/// Built fresh every frame; editing it never affects scene state.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderEntity {
    pub entity: Entity,
    pub asset_path: String,
    /// -1 = all meshes
    pub mesh_index: i32,
    /// -1 = all primitives
    pub primitive_index: i32,
    /// Resolved world matrix, translation at elements 12..15.
    pub world: [f32; 16],
}

/// Collect visible meshes with a non-empty asset path, in mesh-store order.
///
/// Entities without a transform render at the identity matrix.
pub fn collect_render_list(components: &ComponentRegistry) -> Vec<RenderEntity> {
    let Some(meshes) = components.store::<MeshRendererComponent>() else {
        return Vec::new();
    };
    let transforms = components.store::<TransformComponent>();

    let mut out = Vec::with_capacity(meshes.len());
    for (entity, mesh) in meshes.iter() {
        if !mesh.visible || mesh.asset_path.is_empty() {
            continue;
        }

        let world = transforms
            .and_then(|store| store.get(entity))
            .map_or(Mat4::IDENTITY, |transform| transform.world);

        out.push(RenderEntity {
            entity,
            asset_path: mesh.asset_path.clone(),
            mesh_index: mesh.mesh_index,
            primitive_index: mesh.primitive_index,
            world: to_render_array(&world),
        });
    }
    out
}
