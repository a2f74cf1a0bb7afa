use thiserror::Error;

/// Errors raised while configuring a scene.
///
/// Runtime operations on entities and components never fail with an error:
/// stale handles and missing components surface as `false` / `None`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SceneError {
    #[error("{what} capacity {requested} exceeds the addressable maximum of {max}")]
    CapacityOutOfRange {
        what: &'static str,
        requested: usize,
        max: usize,
    },
}
