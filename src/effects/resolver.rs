//! Ability resolution: board composition to stat bonuses.
//!
//! For one player the resolver counts board cards by class (demons excluded)
//! and by family, then for every board card:
//!
//! - picks the single highest family tier and class tier the counts meet,
//! - applies conditional abilities whose trigger holds,
//! - applies passives once per copy,
//! - sums per-turn self-damage.
//!
//! A given `(tag, threshold, source text)` key contributes once per
//! resolution, so five copies of the same card do not stack the same tier
//! five times. The result depends only on the board, the player's health and
//! the catalog.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use super::effect::{highest_met, Ability, AbilityBonus, EffectTarget, TriggerContext};
use crate::cards::{CardClass, CardDefinition, CardRegistry, Family};
use crate::core::{GameState, PlayerId};

/// Which ability list a dedupe key came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum AbilityTag {
    Family(Family),
    Class(CardClass),
    Conditional,
}

/// Board cards counted by tag.
#[derive(Clone, Debug, Default)]
pub struct BoardCounts {
    by_class: FxHashMap<CardClass, u32>,
    by_family: FxHashMap<Family, u32>,
    total: u32,
}

impl BoardCounts {
    /// Count a set of board definitions.
    pub fn from_definitions<'a>(defs: impl IntoIterator<Item = &'a CardDefinition>) -> Self {
        let mut counts = Self::default();
        for def in defs {
            counts.total += 1;
            *counts.by_family.entry(def.family).or_insert(0) += 1;
            if let Some(class) = def.counted_class() {
                *counts.by_class.entry(class).or_insert(0) += 1;
            }
        }
        counts
    }

    #[must_use]
    pub fn class(&self, class: CardClass) -> u32 {
        self.by_class.get(&class).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn family(&self, family: Family) -> u32 {
        self.by_family.get(&family).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    fn multiplier(&self, target: EffectTarget) -> i32 {
        let count = match target {
            EffectTarget::SelfOnly => 1,
            EffectTarget::Class(class) => self.class(class),
            EffectTarget::AllMonsters => self.total,
        };
        count as i32
    }
}

struct Accumulator<'a> {
    counts: BoardCounts,
    ctx: TriggerContext,
    applied: FxHashSet<(AbilityTag, u32, &'a str)>,
    bonus: AbilityBonus,
}

impl<'a> Accumulator<'a> {
    fn apply(&mut self, ability: &Ability) {
        let multiplier = self.counts.multiplier(ability.target);
        ability.apply(multiplier, &self.ctx, &mut self.bonus);
    }

    fn apply_once(&mut self, tag: AbilityTag, threshold: u32, ability: &'a Ability) {
        if self.applied.insert((tag, threshold, ability.source.as_str())) {
            self.apply(ability);
        }
    }
}

/// Base stats of a board, equipped weapons included.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardTotals {
    pub attack: i32,
    pub health: i32,
    pub imblocable: i32,
}

/// Resolves ability bonuses for a player's board.
pub struct AbilityResolver;

impl AbilityResolver {
    /// Definitions of the cards on a player's board, in board order.
    pub fn board_definitions<'r>(
        registry: &'r CardRegistry,
        state: &GameState,
        player: PlayerId,
    ) -> Vec<&'r CardDefinition> {
        state.players[player]
            .board
            .iter()
            .filter_map(|&id| state.card(id))
            .filter_map(|card| registry.get(card.card_id))
            .collect()
    }

    /// Compute the ability bonuses of `player`'s board.
    #[must_use]
    pub fn resolve(registry: &CardRegistry, state: &GameState, player: PlayerId) -> AbilityBonus {
        let defs = Self::board_definitions(registry, state, player);
        let counts = BoardCounts::from_definitions(defs.iter().copied());
        let ctx = TriggerContext {
            board_size: counts.total(),
            health: state.players[player].health,
        };
        let mut acc = Accumulator {
            counts,
            ctx,
            applied: FxHashSet::default(),
            bonus: AbilityBonus::default(),
        };

        for &def in &defs {
            let abilities = &def.abilities;

            if let Some(tier) = highest_met(&abilities.family, acc.counts.family(def.family)) {
                acc.apply_once(AbilityTag::Family(def.family), tier.threshold, &tier.ability);
            }

            if let Some(class) = def.class {
                if let Some(tier) = highest_met(&abilities.class, acc.counts.class(class)) {
                    acc.apply_once(AbilityTag::Class(class), tier.threshold, &tier.ability);
                }
            }

            for ability in &abilities.conditional {
                acc.apply_once(AbilityTag::Conditional, 0, ability);
            }

            for ability in &abilities.passive {
                acc.apply(ability);
            }

            acc.bonus.per_turn_self_damage += def.per_turn_self_damage;
        }

        acc.bonus
    }

    /// Sum of base attack, health and imblocable over a player's board,
    /// adding the stats of equipped weapons.
    #[must_use]
    pub fn board_totals(registry: &CardRegistry, state: &GameState, player: PlayerId) -> BoardTotals {
        let mut totals = BoardTotals::default();

        for &id in &state.players[player].board {
            let Some(card) = state.card(id) else { continue };
            if let Some(def) = registry.get(card.card_id) {
                totals.attack += def.attack;
                totals.health += def.health;
                totals.imblocable += def.imblocable;
            }
            let weapon = card
                .equipped
                .and_then(|weapon| state.card(weapon))
                .and_then(|weapon| registry.get(weapon.card_id));
            if let Some(weapon) = weapon {
                totals.attack += weapon.attack;
                totals.health += weapon.health;
                totals.imblocable += weapon.imblocable;
            }
        }

        totals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardDefinition;
    use crate::effects::parser::{parse_ability, parse_tier};
    use crate::effects::AbilitySet;

    struct Fixture {
        registry: CardRegistry,
        state: GameState,
    }

    impl Fixture {
        fn new(cards: Vec<CardDefinition>) -> Self {
            let mut registry = CardRegistry::new();
            for card in cards {
                registry.register(card).unwrap();
            }
            Self {
                registry,
                state: GameState::new(2, 7),
            }
        }

        fn put_on_board(&mut self, name: &str, player: PlayerId) -> crate::core::InstanceId {
            let card_id = self.registry.lookup(name, 1).unwrap().id;
            let id = self.state.alloc_card(card_id);
            self.state.players[player].board.push_back(id);
            id
        }

        fn resolve(&self, player: PlayerId) -> AbilityBonus {
            AbilityResolver::resolve(&self.registry, &self.state, player)
        }
    }

    fn wolf() -> CardDefinition {
        CardDefinition::creature("Loup", 1, Family::Beast, CardClass::Warrior, 3, 2).with_abilities(
            AbilitySet {
                family: vec![
                    parse_tier(2, "+1 ATQ pour les Guerriers").unwrap(),
                    parse_tier(4, "+3 ATQ pour les Guerriers").unwrap(),
                ],
                ..AbilitySet::default()
            },
        )
    }

    const P0: PlayerId = PlayerId(0);

    #[test]
    fn test_below_threshold_no_bonus() {
        let mut fx = Fixture::new(vec![wolf()]);
        fx.put_on_board("Loup", P0);

        assert_eq!(fx.resolve(P0), AbilityBonus::default());
    }

    #[test]
    fn test_tier_dedupes_and_multiplies_by_class() {
        let mut fx = Fixture::new(vec![wolf()]);
        fx.put_on_board("Loup", P0);
        fx.put_on_board("Loup", P0);
        fx.put_on_board("Loup", P0);

        // Threshold 2 met by 3 beasts; applied once, times 3 warriors.
        assert_eq!(fx.resolve(P0).attack, 3);
    }

    #[test]
    fn test_only_highest_threshold_applies() {
        let mut fx = Fixture::new(vec![wolf()]);
        for _ in 0..4 {
            fx.put_on_board("Loup", P0);
        }

        assert_eq!(fx.resolve(P0).attack, 12);
    }

    #[test]
    fn test_all_monsters_target_uses_board_size() {
        let guard = CardDefinition::creature("Squelette", 1, Family::Undead, CardClass::Guardian, 1, 4)
            .with_abilities(AbilitySet {
                class: vec![parse_tier(1, "+2 PV pour tous les monstres").unwrap()],
                ..AbilitySet::default()
            });
        let mut fx = Fixture::new(vec![guard, wolf()]);
        fx.put_on_board("Squelette", P0);
        fx.put_on_board("Loup", P0);
        fx.put_on_board("Loup", P0);

        assert_eq!(fx.resolve(P0).health, 6);
    }

    #[test]
    fn test_demons_not_counted_by_class() {
        let mage = CardDefinition::creature("Étincelle", 2, Family::Elemental, CardClass::Mage, 2, 2)
            .with_abilities(AbilitySet {
                class: vec![parse_tier(2, "2 dgt imblocables").unwrap()],
                ..AbilitySet::default()
            });
        let imp = CardDefinition::demon("Diablotin", CardClass::Mage, 6, 3);
        let mut fx = Fixture::new(vec![mage, imp]);
        fx.put_on_board("Étincelle", P0);
        fx.put_on_board("Diablotin", P0);

        assert_eq!(fx.resolve(P0).imblocable, 0);

        fx.put_on_board("Étincelle", P0);
        assert_eq!(fx.resolve(P0).imblocable, 2);
    }

    #[test]
    fn test_conditional_and_passive() {
        let dragon = CardDefinition::creature("Dragonnet", 4, Family::Dragon, CardClass::Mage, 5, 5)
            .with_abilities(AbilitySet {
                conditional: vec![parse_ability("si PV <= 200 : +5 ATQ").unwrap()],
                passive: vec![parse_ability("+1 PV").unwrap()],
                ..AbilitySet::default()
            });
        let mut fx = Fixture::new(vec![dragon]);
        fx.put_on_board("Dragonnet", P0);
        fx.put_on_board("Dragonnet", P0);

        let bonus = fx.resolve(P0);
        assert_eq!(bonus.attack, 0);
        assert_eq!(bonus.health, 2);

        fx.state.players[P0].health = 150;
        let bonus = fx.resolve(P0);
        assert_eq!(bonus.attack, 5);
    }

    #[test]
    fn test_per_turn_self_damage_sums() {
        let swarm = CardDefinition::creature("Essaim Vorace", 4, Family::Swarm, CardClass::Berserker, 6, 3)
            .with_per_turn_self_damage(5);
        let mut fx = Fixture::new(vec![swarm]);
        fx.put_on_board("Essaim Vorace", P0);
        fx.put_on_board("Essaim Vorace", P0);

        let bonus = fx.resolve(P0);
        assert_eq!(bonus.per_turn_self_damage, 10);
        assert_eq!(bonus.self_damage, 0);
    }

    #[test]
    fn test_board_totals_include_weapon() {
        let sword = CardDefinition::weapon("Épée Runique", 4, 1);
        let mut fx = Fixture::new(vec![wolf(), sword]);
        let wolf_id = fx.put_on_board("Loup", P0);
        let sword_id = fx.state.alloc_card(fx.registry.lookup("Épée Runique", 1).unwrap().id);
        if let Some(card) = fx.state.card_mut(wolf_id) {
            card.equipped = Some(sword_id);
        }

        let totals = AbilityResolver::board_totals(&fx.registry, &fx.state, P0);
        assert_eq!(totals, BoardTotals { attack: 7, health: 3, imblocable: 0 });
    }
}
