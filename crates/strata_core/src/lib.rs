//! Strata Core
//!
//! The scene object model shared by the editor and renderer:
//! - Generational entity allocation
//! - Sparse-set component storage
//! - Hierarchical transform resolution
//! - Render list extraction

pub mod config;
pub mod ecs;
pub mod error;
pub mod math;
pub mod scene;

pub use glam;

pub use config::SceneConfig;
pub use ecs::{
    Component, ComponentRegistry, ComponentStore, Entity, EntityAllocator, LivenessOracle,
};
pub use error::SceneError;
pub use scene::{
    Components, Hierarchy, MaterialComponent, MeshRendererComponent, NameComponent,
    RenderEntity, Scene, TransformComponent, TransformStats, TransformSystem,
};

/// Engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
