//! Settings management
//!
//! Settings are JSON. Every field is optional; missing ones take defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;
use strata_core::{SceneConfig, SceneError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid settings: {0}")]
    Invalid(#[from] SceneError),
}

/// Host settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub scene: SceneConfig,
    pub runtime: RuntimeSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeSettings {
    /// Frames the runtime drives before exiting.
    pub frames: u32,
    /// Max tracing level: trace, debug, info, warn, or error.
    pub log_level: String,
    /// Frames averaged by the frame timer.
    pub metrics_window: usize,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            frames: 3,
            log_level: "info".to_string(),
            metrics_window: 60,
        }
    }
}

impl Settings {
    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.scene.validate()?;
        Ok(settings)
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json_str(&json)?;
        tracing::debug!(path = %path.display(), "settings loaded");
        Ok(settings)
    }

    /// Load from `path` if given, otherwise use defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, SettingsError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_uses_defaults() {
        let settings = Settings::from_json_str("{}").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.runtime.frames, 3);
        assert_eq!(settings.runtime.log_level, "info");
    }

    #[test]
    fn partial_sections_merge_with_defaults() {
        let settings =
            Settings::from_json_str(r#"{ "scene": { "entity_capacity": 32 }, "runtime": { "frames": 10 } }"#)
                .unwrap();
        assert_eq!(settings.scene.entity_capacity, 32);
        assert_eq!(settings.scene.component_capacity, SceneConfig::default().component_capacity);
        assert_eq!(settings.runtime.frames, 10);
        assert_eq!(settings.runtime.metrics_window, 60);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = Settings::from_json_str("{ scene: ").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn oversized_capacity_is_rejected() {
        let err = Settings::from_json_str(r#"{ "scene": { "entity_capacity": 4294967295 } }"#)
            .unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = Settings::load(Path::new("/nonexistent/strata/settings.json")).unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
    }

    #[test]
    fn no_path_means_defaults() {
        assert_eq!(Settings::load_or_default(None).unwrap(), Settings::default());
    }

    #[test]
    fn roundtrips_through_json() {
        let mut settings = Settings::default();
        settings.runtime.log_level = "debug".to_string();
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(Settings::from_json_str(&json).unwrap(), settings);
    }
}
