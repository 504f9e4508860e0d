//! Card registry for definition lookup.
//!
//! The `CardRegistry` stores all card definitions for a game. It assigns
//! `CardId`s in registration order, enforces catalog invariants, and indexes
//! cards by `(name, tier)` for evolution lookup. It is shared read-only by
//! every game (behind an `Arc`), never through global state.

use rustc_hash::FxHashMap;

use super::blueprint::CardBlueprint;
use super::definition::{CardDefinition, CardId};
use super::tags::{CardClass, CardKind, Cost, Family};
use crate::core::error::CatalogError;

/// Registry of card definitions.
///
/// ## Example
///
/// ```
/// use arena_sim::cards::{CardClass, CardDefinition, CardRegistry, Family};
///
/// let mut registry = CardRegistry::new();
/// registry.register(CardDefinition::creature("Loup", 1, Family::Beast, CardClass::Warrior, 3, 2)).unwrap();
/// registry
///     .register(CardDefinition::creature("Loup", 1, Family::Beast, CardClass::Warrior, 7, 5).with_tier(2))
///     .unwrap();
///
/// assert_eq!(registry.evolution_of("Loup").unwrap().attack, 7);
/// assert!(registry.evolution_of("Ours").is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: Vec<CardDefinition>,
    by_name: FxHashMap<String, [Option<CardId>; 2]>,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from raw blueprints, parsing their ability text.
    pub fn load(blueprints: impl IntoIterator<Item = CardBlueprint>) -> Result<Self, CatalogError> {
        let mut registry = Self::new();
        for blueprint in blueprints {
            registry.register(blueprint.into_definition()?)?;
        }
        Ok(registry)
    }

    /// Validate and register a card definition, returning its assigned id.
    pub fn register(&mut self, mut card: CardDefinition) -> Result<CardId, CatalogError> {
        validate(&card)?;

        let slots = self.by_name.entry(card.name.clone()).or_default();
        let slot = &mut slots[usize::from(card.tier - 1)];
        if slot.is_some() {
            return Err(CatalogError::Duplicate {
                name: card.name,
                tier: card.tier,
            });
        }

        let id = CardId::new(self.cards.len() as u32);
        *slot = Some(id);
        card.id = id;
        self.cards.push(card);
        Ok(id)
    }

    /// Get a card definition by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&CardDefinition> {
        self.cards.get(id.raw() as usize)
    }

    /// Find the definition with this name at this tier.
    #[must_use]
    pub fn lookup(&self, name: &str, tier: u8) -> Option<&CardDefinition> {
        let index = usize::from(tier.checked_sub(1)?);
        let id = (*self.by_name.get(name)?.get(index)?)?;
        self.get(id)
    }

    /// The tier-2 version of a card, if the catalog has one.
    #[must_use]
    pub fn evolution_of(&self, name: &str) -> Option<&CardDefinition> {
        self.lookup(name, 2)
    }

    /// Check if a card ID is registered.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.get(id).is_some()
    }

    /// Get the number of registered cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all card definitions in id order.
    pub fn iter(&self) -> impl Iterator<Item = &CardDefinition> {
        self.cards.iter()
    }

    /// Cards that are dealt into decks at setup (everything at tier 1).
    pub fn purchasable(&self) -> impl Iterator<Item = &CardDefinition> {
        self.cards.iter().filter(|card| card.tier == 1)
    }

    /// Find cards matching a predicate.
    pub fn find<F>(&self, predicate: F) -> impl Iterator<Item = &CardDefinition>
    where
        F: Fn(&CardDefinition) -> bool,
    {
        self.cards.iter().filter(move |c| predicate(c))
    }
}

fn validate(card: &CardDefinition) -> Result<(), CatalogError> {
    if !(1..=2).contains(&card.tier) {
        return Err(CatalogError::InvalidTier {
            name: card.name.clone(),
            tier: card.tier,
        });
    }

    let wrong_family = |expected: Family| CatalogError::WrongFamily {
        name: card.name.clone(),
        expected: expected.name(),
    };

    match card.kind {
        CardKind::Creature => {
            let class = card.class.ok_or_else(|| CatalogError::MissingClass {
                name: card.name.clone(),
            })?;
            let cost_ok = match card.cost {
                Cost::Fixed(n) => (1..=5).contains(&n),
                Cost::Variable => class == CardClass::Invocation,
            };
            if !cost_ok {
                return Err(CatalogError::InvalidCost {
                    name: card.name.clone(),
                });
            }
            if matches!(card.family, Family::Weapon | Family::Demon) {
                return Err(CatalogError::WrongFamily {
                    name: card.name.clone(),
                    expected: "creature",
                });
            }
        }
        CardKind::Weapon if card.family != Family::Weapon => return Err(wrong_family(Family::Weapon)),
        CardKind::Demon if card.family != Family::Demon => return Err(wrong_family(Family::Demon)),
        CardKind::Demon if card.class.is_none() => {
            return Err(CatalogError::MissingClass {
                name: card.name.clone(),
            })
        }
        CardKind::Weapon | CardKind::Demon => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wolf() -> CardDefinition {
        CardDefinition::creature("Loup", 1, Family::Beast, CardClass::Warrior, 3, 2)
    }

    #[test]
    fn test_register_assigns_sequential_ids() {
        let mut registry = CardRegistry::new();

        let a = registry.register(wolf()).unwrap();
        let b = registry
            .register(CardDefinition::creature("Ours", 2, Family::Beast, CardClass::Guardian, 2, 5))
            .unwrap();

        assert_eq!(a, CardId::new(0));
        assert_eq!(b, CardId::new(1));
        assert_eq!(registry.get(b).unwrap().name, "Ours");
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_duplicate_name_and_tier_rejected() {
        let mut registry = CardRegistry::new();
        registry.register(wolf()).unwrap();

        let err = registry.register(wolf()).unwrap_err();
        assert_eq!(err, CatalogError::Duplicate { name: "Loup".into(), tier: 1 });

        assert!(registry.register(wolf().with_tier(2)).is_ok());
    }

    #[test]
    fn test_creature_cost_invariant() {
        let mut registry = CardRegistry::new();

        let err = registry
            .register(CardDefinition::creature("Géant", 6, Family::Beast, CardClass::Warrior, 9, 9))
            .unwrap_err();
        assert!(matches!(err, CatalogError::InvalidCost { .. }));

        let mut variable = wolf();
        variable.cost = Cost::Variable;
        assert!(matches!(
            registry.register(variable).unwrap_err(),
            CatalogError::InvalidCost { .. }
        ));

        assert!(registry
            .register(CardDefinition::invocation("Nuée", Family::Swarm, 2, 2))
            .is_ok());
    }

    #[test]
    fn test_weapon_and_demon_families() {
        let mut registry = CardRegistry::new();

        let mut weapon = CardDefinition::weapon("Épée", 4, 0);
        weapon.family = Family::Beast;
        assert_eq!(
            registry.register(weapon).unwrap_err(),
            CatalogError::WrongFamily { name: "Épée".into(), expected: "Weapon" }
        );

        let mut demon = CardDefinition::demon("Diablotin", CardClass::Berserker, 8, 4);
        demon.family = Family::Undead;
        assert!(matches!(
            registry.register(demon).unwrap_err(),
            CatalogError::WrongFamily { expected: "Demon", .. }
        ));
    }

    #[test]
    fn test_lookup_by_name_and_tier() {
        let mut registry = CardRegistry::new();
        registry.register(wolf()).unwrap();

        assert!(registry.lookup("Loup", 1).is_some());
        assert!(registry.lookup("Loup", 2).is_none());
        assert!(registry.lookup("Loup", 0).is_none());
        assert!(registry.lookup("Ours", 1).is_none());
    }

    #[test]
    fn test_purchasable_excludes_tier_two() {
        let mut registry = CardRegistry::new();
        registry.register(wolf()).unwrap();
        registry.register(wolf().with_tier(2)).unwrap();

        let names: Vec<_> = registry.purchasable().map(|c| (c.name.as_str(), c.tier)).collect();
        assert_eq!(names, vec![("Loup", 1)]);
    }
}
