//! Scene configuration

use crate::ecs::MAX_SLOTS;
use crate::SceneError;
use serde::{Deserialize, Serialize};

/// Up-front capacity hints for a [`Scene`](crate::Scene).
///
/// Capacities only pre-reserve memory; the scene still grows on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Entity slots reserved in the allocator.
    pub entity_capacity: usize,
    /// Values reserved in each component store when it is first created.
    pub component_capacity: usize,
}

impl SceneConfig {
    /// Reject capacities that could never be addressed by an entity handle.
    pub fn validate(&self) -> Result<(), SceneError> {
        if self.entity_capacity > MAX_SLOTS {
            return Err(SceneError::CapacityOutOfRange {
                what: "entity",
                requested: self.entity_capacity,
                max: MAX_SLOTS,
            });
        }
        if self.component_capacity > MAX_SLOTS {
            return Err(SceneError::CapacityOutOfRange {
                what: "component",
                requested: self.component_capacity,
                max: MAX_SLOTS,
            });
        }
        Ok(())
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            entity_capacity: 256,
            component_capacity: 256,
        }
    }
}
