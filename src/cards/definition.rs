//! Card definitions - static card data.
//!
//! `CardDefinition` holds the immutable properties of a card: stats, tags,
//! cost and its structured abilities. Many value-equal copies of a definition
//! coexist in a game as distinct `CardInstance`s.

use serde::{Deserialize, Serialize};

use super::tags::{CardClass, CardKind, Cost, Family};
use crate::effects::AbilitySet;

/// Unique identifier for a card definition.
///
/// This identifies the "type" of card (e.g., tier-1 "Loup"), not a specific
/// copy in a game. Ids are assigned by the `CardRegistry`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use arena_sim::cards::{CardClass, CardDefinition, Family};
///
/// let wolf = CardDefinition::creature("Loup", 1, Family::Beast, CardClass::Warrior, 3, 2);
///
/// assert!(wolf.is_creature());
/// assert_eq!(wolf.tier, 1);
/// assert_eq!(wolf.price(4), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardDefinition {
    /// Registry-assigned identifier.
    pub id: CardId,

    /// Display name. Evolution matches on it.
    pub name: String,

    pub kind: CardKind,
    pub cost: Cost,

    /// 1, or 2 for evolved cards.
    pub tier: u8,

    pub family: Family,

    /// `None` for weapons, which never sit on a board by themselves.
    pub class: Option<CardClass>,

    pub attack: i32,
    pub health: i32,

    /// Damage that ignores the defender's health total.
    pub imblocable: i32,

    /// Structured abilities, parsed once at catalog load.
    pub abilities: AbilitySet,

    /// Free-text bonus as printed on the card.
    pub bonus_text: Option<String>,

    /// Health lost by the owner at every END phase while on the board.
    pub per_turn_self_damage: i32,
}

impl CardDefinition {
    fn base(name: impl Into<String>, kind: CardKind, cost: Cost, family: Family) -> Self {
        Self {
            id: CardId::default(),
            name: name.into(),
            kind,
            cost,
            tier: 1,
            family,
            class: None,
            attack: 0,
            health: 0,
            imblocable: 0,
            abilities: AbilitySet::default(),
            bonus_text: None,
            per_turn_self_damage: 0,
        }
    }

    /// A fixed-cost creature.
    #[must_use]
    pub fn creature(
        name: impl Into<String>,
        cost: u8,
        family: Family,
        class: CardClass,
        attack: i32,
        health: i32,
    ) -> Self {
        Self {
            class: Some(class),
            attack,
            health,
            ..Self::base(name, CardKind::Creature, Cost::Fixed(cost), family)
        }
    }

    /// An uncosted summon-by-count creature.
    #[must_use]
    pub fn invocation(name: impl Into<String>, family: Family, attack: i32, health: i32) -> Self {
        Self {
            class: Some(CardClass::Invocation),
            attack,
            health,
            ..Self::base(name, CardKind::Creature, Cost::Variable, family)
        }
    }

    /// A weapon, attached to a creature to add its stats.
    #[must_use]
    pub fn weapon(name: impl Into<String>, attack: i32, health: i32) -> Self {
        Self {
            attack,
            health,
            ..Self::base(name, CardKind::Weapon, Cost::Variable, Family::Weapon)
        }
    }

    /// A demon. Demons ignore the board cap and class counting.
    #[must_use]
    pub fn demon(name: impl Into<String>, class: CardClass, attack: i32, health: i32) -> Self {
        Self {
            class: Some(class),
            attack,
            health,
            ..Self::base(name, CardKind::Demon, Cost::Variable, Family::Demon)
        }
    }

    #[must_use]
    pub fn with_tier(mut self, tier: u8) -> Self {
        self.tier = tier;
        self
    }

    #[must_use]
    pub fn with_imblocable(mut self, amount: i32) -> Self {
        self.imblocable = amount;
        self
    }

    #[must_use]
    pub fn with_abilities(mut self, abilities: AbilitySet) -> Self {
        self.abilities = abilities;
        self
    }

    #[must_use]
    pub fn with_per_turn_self_damage(mut self, amount: i32) -> Self {
        self.per_turn_self_damage = amount;
        self
    }

    #[must_use]
    pub fn is_creature(&self) -> bool {
        self.kind == CardKind::Creature
    }

    #[must_use]
    pub fn is_weapon(&self) -> bool {
        self.kind == CardKind::Weapon
    }

    #[must_use]
    pub fn is_demon(&self) -> bool {
        self.kind == CardKind::Demon
    }

    /// Price in PO when the market is at `cost_tier`.
    #[must_use]
    pub fn price(&self, cost_tier: u8) -> u32 {
        self.cost.resolve(cost_tier)
    }

    /// Class used for class counting (demons are never counted).
    #[must_use]
    pub fn counted_class(&self) -> Option<CardClass> {
        if self.is_demon() {
            None
        } else {
            self.class
        }
    }
}
