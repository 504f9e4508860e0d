//! Market reveals and deck mixing.
//!
//! The market shows up to `market_size` creatures from the deck of the
//! current cost tier. Unbought cards stay on display across turns. On a
//! schedule, one weapon and one demon are revealed as extra slots.
//!
//! Deck mixing runs at the end of even turns before the mixing turn limit,
//! while the cost tier is below 5. The current tier's cards (deck plus unsold
//! market creatures) are shuffled and split: the larger half moves up to the
//! next tier's deck, the rest goes to the discard pile.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cards::{CardKind, CardRegistry};
use crate::core::config::GameConfig;
use crate::core::phase::{cost_tier, MAX_COST_TIER};
use crate::core::state::GameState;

/// What a deck mix moved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MixReport {
    /// Tier that was emptied.
    pub from_tier: u8,
    /// Cards pushed into the next tier's deck.
    pub promoted: usize,
    /// Cards sent to the discard pile.
    pub discarded: usize,
}

fn kind_of(registry: &CardRegistry, state: &GameState, card: crate::core::InstanceId) -> Option<CardKind> {
    let instance = state.card(card)?;
    registry.get(instance.card_id).map(|def| def.kind)
}

fn market_has(registry: &CardRegistry, state: &GameState, kind: CardKind) -> usize {
    state
        .zones
        .market
        .iter()
        .filter(|&&card| kind_of(registry, state, card) == Some(kind))
        .count()
}

fn reveal_due(every: u32, turn: u32) -> bool {
    every > 0 && turn % every == 0
}

/// Top the market up to `config.market_size` creatures from the current
/// cost-tier deck, then reveal scheduled specials.
///
/// Returns the number of cards revealed.
pub fn refresh_market(registry: &CardRegistry, state: &mut GameState, config: &GameConfig) -> usize {
    let tier = state.cost_tier();
    let mut creatures = market_has(registry, state, CardKind::Creature);
    let mut revealed = 0;

    while creatures < config.market_size {
        let Some(card) = state.zones.draw(tier) else { break };
        state.zones.market.push_back(card);
        creatures += 1;
        revealed += 1;
    }

    if reveal_due(config.weapon_reveal_every, state.turn)
        && market_has(registry, state, CardKind::Weapon) == 0
    {
        if let Some(weapon) = state.zones.weapon_deck.pop_back() {
            state.zones.market.push_back(weapon);
            revealed += 1;
        }
    }

    if reveal_due(config.demon_reveal_every, state.turn)
        && market_has(registry, state, CardKind::Demon) == 0
    {
        if let Some(demon) = state.zones.demon_deck.pop_back() {
            state.zones.market.push_back(demon);
            revealed += 1;
        }
    }

    revealed
}

/// Whether decks are mixed at the end of `turn`.
#[must_use]
pub fn should_mix(turn: u32, mixing_turn_limit: u32) -> bool {
    turn % 2 == 0 && turn < mixing_turn_limit && cost_tier(turn) < MAX_COST_TIER
}

/// Mix the current tier's cards into the next tier and the discard pile.
///
/// Returns `None` when the current tier is already the highest.
pub fn mix_decks(registry: &CardRegistry, state: &mut GameState) -> Option<MixReport> {
    let tier = state.cost_tier();
    if tier >= MAX_COST_TIER {
        return None;
    }

    let market = std::mem::take(&mut state.zones.market);
    for card in market {
        match kind_of(registry, state, card) {
            Some(CardKind::Weapon) => state.zones.weapon_deck.push_front(card),
            Some(CardKind::Demon) => state.zones.demon_deck.push_front(card),
            _ => state.zones.deck_mut(tier).push_back(card),
        }
    }

    let mut pool = std::mem::take(state.zones.deck_mut(tier));
    state.rng.shuffle_vector(&mut pool);

    let promoted = pool.len() - pool.len() / 2;
    let to_discard = pool.split_off(promoted);
    let discarded = to_discard.len();

    let next = state.zones.deck_mut(tier + 1);
    next.append(pool);
    let mut next = std::mem::take(next);
    state.rng.shuffle_vector(&mut next);
    *state.zones.deck_mut(tier + 1) = next;

    state.zones.discard.append(to_discard);

    debug!(turn = state.turn, tier, promoted, discarded, "mixed decks");

    Some(MixReport {
        from_tier: tier,
        promoted,
        discarded,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardClass, CardDefinition, Family};
    use crate::core::InstanceId;

    fn registry() -> CardRegistry {
        let mut registry = CardRegistry::new();
        registry
            .register(CardDefinition::creature("Loup", 1, Family::Beast, CardClass::Warrior, 3, 2))
            .unwrap();
        registry.register(CardDefinition::weapon("Épée", 4, 0)).unwrap();
        registry
            .register(CardDefinition::demon("Diablotin", CardClass::Berserker, 8, 4))
            .unwrap();
        registry
    }

    fn fill_deck(state: &mut GameState, registry: &CardRegistry, tier: u8, count: usize) {
        let wolf = registry.lookup("Loup", 1).unwrap().id;
        for _ in 0..count {
            let card = state.alloc_card(wolf);
            state.zones.deck_mut(tier).push_back(card);
        }
    }

    #[test]
    fn test_refresh_tops_up_to_target() {
        let registry = registry();
        let mut state = GameState::new(2, 42);
        fill_deck(&mut state, &registry, 1, 8);
        let config = GameConfig::default().with_reveals(0, 0);

        assert_eq!(refresh_market(&registry, &mut state, &config), 5);
        assert_eq!(state.market().len(), 5);
        assert_eq!(state.zones.deck(1).len(), 3);

        // Unbought cards stay; one purchase means one reveal.
        let bought = state.market()[0];
        state.zones.take_from_market(bought);
        assert_eq!(refresh_market(&registry, &mut state, &config), 1);
        assert_eq!(state.market().len(), 5);
        assert!(!state.zones.in_market(bought));
    }

    #[test]
    fn test_refresh_stops_when_deck_empty() {
        let registry = registry();
        let mut state = GameState::new(2, 42);
        fill_deck(&mut state, &registry, 1, 2);

        refresh_market(&registry, &mut state, &GameConfig::default());
        assert_eq!(state.market().len(), 2);
    }

    #[test]
    fn test_special_reveals_follow_schedule() {
        let registry = registry();
        let mut state = GameState::new(2, 42);
        let sword = state.alloc_card(registry.lookup("Épée", 1).unwrap().id);
        let imp = state.alloc_card(registry.lookup("Diablotin", 1).unwrap().id);
        state.zones.weapon_deck.push_back(sword);
        state.zones.demon_deck.push_back(imp);
        let config = GameConfig::default();

        state.turn = 2;
        refresh_market(&registry, &mut state, &config);
        assert!(state.market().is_empty());

        state.turn = 3;
        refresh_market(&registry, &mut state, &config);
        assert!(state.zones.in_market(sword));
        assert!(!state.zones.in_market(imp));

        state.turn = 4;
        refresh_market(&registry, &mut state, &config);
        assert!(state.zones.in_market(imp));
    }

    #[test]
    fn test_should_mix_gating() {
        assert!(should_mix(2, 10));
        assert!(should_mix(8, 10));
        assert!(!should_mix(3, 10));
        assert!(!should_mix(10, 10));
        assert!(!should_mix(12, 20));
    }

    #[test]
    fn test_mix_splits_larger_half_up() {
        let registry = registry();
        let mut state = GameState::new(2, 42);
        state.turn = 2;
        fill_deck(&mut state, &registry, 1, 4);
        // Three unsold creatures on display.
        for _ in 0..3 {
            let card = state.zones.draw(1).unwrap();
            state.zones.market.push_back(card);
        }
        fill_deck(&mut state, &registry, 1, 3);
        fill_deck(&mut state, &registry, 2, 2);

        let report = mix_decks(&registry, &mut state).unwrap();

        // 7 tier-1 cards: 4 promoted, 3 discarded.
        assert_eq!(report, MixReport { from_tier: 1, promoted: 4, discarded: 3 });
        assert!(state.zones.deck(1).is_empty());
        assert!(state.market().is_empty());
        assert_eq!(state.zones.deck(2).len(), 6);
        assert_eq!(state.zones.discard.len(), 3);
    }

    #[test]
    fn test_mix_returns_specials_to_their_decks() {
        let registry = registry();
        let mut state = GameState::new(2, 42);
        state.turn = 2;
        let sword = state.alloc_card(registry.lookup("Épée", 1).unwrap().id);
        state.zones.market.push_back(sword);

        mix_decks(&registry, &mut state).unwrap();

        assert_eq!(state.zones.weapon_deck, im::vector![sword]);
        assert!(state.zones.discard.is_empty());
    }

    #[test]
    fn test_no_mix_at_top_tier() {
        let registry = registry();
        let mut state = GameState::new(2, 42);
        state.turn = 9;
        fill_deck(&mut state, &registry, 5, 4);

        assert!(mix_decks(&registry, &mut state).is_none());
        assert_eq!(state.zones.deck(5).len(), 4);
    }

    #[test]
    fn test_mix_conserves_cards() {
        let registry = registry();
        let mut state = GameState::new(2, 9);
        state.turn = 4;
        fill_deck(&mut state, &registry, 2, 11);
        let before = state.zones.total_cards();

        let report = mix_decks(&registry, &mut state).unwrap();

        assert_eq!(report.promoted, 6);
        assert_eq!(report.discarded, 5);
        assert_eq!(state.zones.total_cards(), before);
        assert!(state.zones.locate(InstanceId(0)).is_some());
    }
}
