//! Type-safe identifier for creatures.
//!
//! Identifiers are issued by the entity registry from a monotonic counter,
//! so ordering by [`CreatureId`] is ordering by creation. The tick engine
//! relies on this for its deterministic iteration order.

use serde::{Deserialize, Serialize};

/// Unique identifier for a creature in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CreatureId(pub u64);

impl CreatureId {
    /// Return the inner counter value.
    pub const fn into_inner(self) -> u64 {
        self.0
    }

    /// Return the identifier issued after this one.
    ///
    /// Saturates at `u64::MAX`; a run never gets close.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl core::fmt::Display for CreatureId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for CreatureId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<CreatureId> for u64 {
    fn from(id: CreatureId) -> Self {
        id.0
    }
}
