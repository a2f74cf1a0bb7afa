//! Strata Services Layer
//!
//! Host-facing services around the scene core: settings loading for now.

pub mod settings;

pub use settings::{RuntimeSettings, Settings, SettingsError};

/// Log the service configuration the host is starting with.
pub fn init_services(settings: &Settings) {
    tracing::debug!(
        entity_capacity = settings.scene.entity_capacity,
        component_capacity = settings.scene.component_capacity,
        frames = settings.runtime.frames,
        "services initialized"
    );
}
