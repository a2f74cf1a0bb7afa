// component.rs - Component type identity
//
// Components are identified by their Rust TypeId. Any 'static value type
// can be stored; payload schemas belong to the callers, not the core.

use std::any::type_name;

/// Marker for values that can be attached to entities.
///
/// Implemented for every `'static` type, so editor, importer, or game code
/// can store component types this crate has never heard of.
pub trait Component: 'static {
    /// Human-readable name for diagnostics.
    fn component_name() -> &'static str
    where
        Self: Sized,
    {
        type_name::<Self>()
    }
}

impl<T: 'static> Component for T {}
