//! Minion instance identity.
//!
//! Every physical minion copy (in the pool, a recruit slot, a hand or a
//! board) carries a unique `EntityId`. Moving a minion with identity
//! preserved keeps its id; a clone is a fresh copy with a freshly allocated
//! id. The pool owns the allocator, so ids are unique per game.

use serde::{Deserialize, Serialize};

/// Unique identifier for one minion copy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// Monotonic allocator for `EntityId`s.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityAllocator {
    next: u32,
}

impl EntityAllocator {
    /// Create an allocator starting at id 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next unused id.
    pub fn alloc(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next += 1;
        id
    }

    /// Number of ids handed out so far.
    #[must_use]
    pub fn allocated(&self) -> u32 {
        self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_is_monotonic() {
        let mut alloc = EntityAllocator::new();
        let a = alloc.alloc();
        let b = alloc.alloc();

        assert_eq!(a, EntityId(0));
        assert_eq!(b, EntityId(1));
        assert!(a < b);
        assert_eq!(alloc.allocated(), 2);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", EntityId(42)), "Entity(42)");
        assert_eq!(EntityId::from(7).raw(), 7);
    }
}
