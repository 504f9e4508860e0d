//! Card instances - one physical copy of a card in a game.
//!
//! Instances live in the game state's arena, addressed by `InstanceId`.
//! Location is not stored here: a copy is wherever its id appears (a deck,
//! the market, a hand, a board, the discard pile, or attached to a creature).

use serde::{Deserialize, Serialize};

use super::definition::CardId;
use crate::core::entity::InstanceId;

/// A card instance in a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardInstance {
    /// Unique id for this copy.
    pub id: InstanceId,

    /// Reference to the card definition.
    pub card_id: CardId,

    /// Weapon attached to this creature, if any.
    pub equipped: Option<InstanceId>,
}

impl CardInstance {
    #[must_use]
    pub fn new(id: InstanceId, card_id: CardId) -> Self {
        Self {
            id,
            card_id,
            equipped: None,
        }
    }

    #[must_use]
    pub fn is_equipped(&self) -> bool {
        self.equipped.is_some()
    }
}
