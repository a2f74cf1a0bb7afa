//! Entity Component System core types.
//!
//! Entities are generational handles handed out by the [`EntityAllocator`].
//! Component data lives in one sparse-set [`ComponentStore`] per type, owned
//! by the [`ComponentRegistry`]. The allocator knows nothing about
//! components; whoever destroys an entity must also purge it from the
//! registry (the scene façade does both).

mod allocator;
mod component;
mod entity;
mod registry;
mod storage;

pub use allocator::{EntityAllocator, LivenessOracle};
pub use component::Component;
pub use entity::{Entity, GENERATION_BITS, INDEX_BITS, MAX_SLOTS};
pub use registry::ComponentRegistry;
pub use storage::ComponentStore;
