//! Entity handle with generational index
//!
//! Entities are lightweight handles (4 bytes) that identify a slot in the
//! allocator. The generation counter prevents use-after-free bugs.

use std::fmt;

/// Number of low bits holding the slot index.
pub const INDEX_BITS: u32 = 20;
/// Number of high bits holding the generation.
pub const GENERATION_BITS: u32 = 12;
/// Maximum number of slots an allocator can address.
pub const MAX_SLOTS: usize = 1 << INDEX_BITS;

const INDEX_MASK: u32 = (1 << INDEX_BITS) - 1;
pub(crate) const GENERATION_MASK: u32 = (1 << GENERATION_BITS) - 1;

/// Entity handle (generation-indexed for safety)
///
/// Format: [12-bit generation | 20-bit index]
/// - Index: Slot in the allocator's metadata arrays
/// - Generation: Advanced on destruction, never zero for an issued handle
///
/// The all-zero value is [`Entity::INVALID`] and is never allocated.
///
/// Example:
/// ```ignore
/// let entity = scene.create_entity();
/// scene.destroy_entity(entity);
/// // entity handle is now stale (generation mismatch)
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Entity(u32);

impl Entity {
    /// The reserved "no entity" value.
    pub const INVALID: Entity = Entity(0);

    pub(crate) const fn new(index: u32, generation: u32) -> Self {
        Self((index & INDEX_MASK) | ((generation & GENERATION_MASK) << INDEX_BITS))
    }

    #[inline]
    pub const fn index(self) -> u32 {
        self.0 & INDEX_MASK
    }

    #[inline]
    pub const fn generation(self) -> u32 {
        (self.0 >> INDEX_BITS) & GENERATION_MASK
    }

    /// Slot index widened for indexing into per-slot arrays.
    #[inline]
    pub const fn slot(self) -> usize {
        self.index() as usize
    }

    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }

    /// Raw 32-bit value (for tooling and editor selection state)
    pub const fn to_bits(self) -> u32 {
        self.0
    }

    /// Rebuild a handle from its raw value. Liveness is not implied.
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }
}

impl Default for Entity {
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "Entity({}v{})", self.index(), self.generation())
        } else {
            f.write_str("Entity(INVALID)")
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index(), self.generation())
    }
}
