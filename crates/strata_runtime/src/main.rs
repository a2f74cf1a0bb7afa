//! Strata Runtime
//!
//! Headless host: loads settings, builds a demo scene, and drives a few
//! frames of transform resolution and render-list extraction.

use anyhow::{Context, Result};
use std::path::PathBuf;
use strata_core::glam::Vec3;
use strata_core::math::Transform;
use strata_core::{
    Entity, MaterialComponent, MeshRendererComponent, NameComponent, Scene, TransformComponent,
};
use strata_metrics::{time_scope, FrameTimer, SystemProfiler};
use strata_services::Settings;
use tracing::Level;

fn main() -> Result<()> {
    let settings_path = std::env::args_os().nth(1).map(PathBuf::from);
    let settings = Settings::load_or_default(settings_path.as_deref()).with_context(|| {
        format!(
            "loading settings from {}",
            settings_path
                .as_deref()
                .map_or_else(|| "<defaults>".into(), |p| p.display().to_string())
        )
    })?;

    let level = settings.runtime.log_level.parse::<Level>().unwrap_or(Level::INFO);
    tracing_subscriber::fmt().with_max_level(level).init();

    tracing::info!("Strata v{}", strata_core::VERSION);
    strata_services::init_services(&settings);

    let mut scene = Scene::with_config(&settings.scene).context("creating scene")?;
    let root = build_demo_scene(&mut scene);
    log_hierarchy(&scene);

    let mut timer = FrameTimer::new(settings.runtime.metrics_window);
    let mut profiler = SystemProfiler::new();

    for frame in 0..settings.runtime.frames {
        timer.begin();

        if let Some(transform) = scene.components_mut().get_mut::<TransformComponent>(root) {
            transform.local.rotation.y += 0.1;
        }

        let stats = time_scope!(profiler, "transform_resolve", { scene.update() });
        if stats.cycles_broken > 0 {
            tracing::warn!(
                frame,
                cycles_broken = stats.cycles_broken,
                "parent cycle detected; cycle members resolved as roots"
            );
        }

        let render_list = time_scope!(profiler, "render_list", { scene.build_render_list() });
        timer.end();

        tracing::info!(
            frame,
            resolved = stats.resolved,
            render_entities = render_list.len(),
            "frame complete"
        );
        for item in &render_list {
            tracing::debug!(
                entity = %item.entity,
                asset = %item.asset_path,
                x = item.world[12],
                y = item.world[13],
                z = item.world[14],
                "draw"
            );
        }
    }

    strata_metrics::metrics! {
        let (min_ms, max_ms) = timer.frame_time_range_ms();
        tracing::info!(
            frames = timer.frames(),
            avg_ms = timer.frame_time_ms(),
            min_ms,
            max_ms,
            "frame timing"
        );
        for (name, total) in profiler.timings() {
            tracing::info!(pass = name, total_us = total.as_micros() as u64, "pass timing");
        }
    }

    tracing::info!("Runtime shut down cleanly");
    Ok(())
}

/// A small world: a rotating platform with two crates and a lamp on top.
fn build_demo_scene(scene: &mut Scene) -> Entity {
    let platform = spawn(scene, "Platform", Transform::IDENTITY, Entity::INVALID);
    scene
        .components_mut()
        .add(platform, MeshRendererComponent::new("models/platform.gltf"));

    for (name, x) in [("Crate A", -1.5), ("Crate B", 1.5)] {
        let local = Transform::from_position(Vec3::new(x, 0.5, 0.0));
        let crate_entity = spawn(scene, name, local, platform);
        let mut components = scene.components_mut();
        components.add(crate_entity, MeshRendererComponent::new("models/crate.gltf").with_mesh(0, -1));
        components.add(crate_entity, MaterialComponent { material_id: "wood".to_string() });
    }

    let lamp_local = Transform::from_position(Vec3::new(0.0, 2.0, 0.0)).with_scale(Vec3::splat(0.25));
    let lamp = spawn(scene, "Lamp", lamp_local, platform);
    let mut lamp_mesh = MeshRendererComponent::new("models/lamp.gltf");
    lamp_mesh.visible = false;
    scene.components_mut().add(lamp, lamp_mesh);

    platform
}

fn spawn(scene: &mut Scene, name: &str, local: Transform, parent: Entity) -> Entity {
    let entity = scene.create_entity();
    let mut components = scene.components_mut();
    components.add(entity, NameComponent::new(name));
    components.add(entity, TransformComponent::new(local).with_parent(parent));
    entity
}

fn log_hierarchy(scene: &Scene) {
    scene.hierarchy().walk_depth_first(|entity, depth| {
        let indent = "  ".repeat(depth);
        tracing::debug!(entity = %entity, "{indent}{}", scene.display_name(entity));
    });
}
