//! Card instance identification.
//!
//! Every physical copy of a card in a game gets a unique `InstanceId` when it
//! is created (at setup, or when an evolution produces a tier-2 card). Ids are
//! indices into the game's card arena, so they are stable across clones:
//! a cloned `GameState` refers to exactly the same copies by the same ids.
//!
//! ## Usage
//!
//! ```
//! use arena_sim::core::InstanceId;
//!
//! let first = InstanceId::new(0);
//! let second = first.next();
//!
//! assert_eq!(second.index(), 1);
//! assert_ne!(first, second);
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for one card instance within a game.
///
/// Value-equal copies of the same card always have distinct ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct InstanceId(pub u32);

impl InstanceId {
    /// Create an instance id from a raw arena index.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Arena index of this instance.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// The id allocated right after this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl From<u32> for InstanceId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
