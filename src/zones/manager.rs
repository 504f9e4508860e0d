//! Shared card zones.
//!
//! `Zones` holds every card location that does not belong to a player: the
//! market, the five cost-tier decks, the weapon and demon decks, and the
//! discard pile. All zones are persistent vectors of `InstanceId`s; decks
//! draw from the back (top = last element).

use im::Vector;

use crate::core::entity::InstanceId;
use crate::core::phase::MAX_COST_TIER;
use crate::core::player::remove_instance;

/// Where a card currently sits among the shared zones.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoneKind {
    Market,
    TierDeck(u8),
    WeaponDeck,
    DemonDeck,
    Discard,
}

/// Shared card locations.
///
/// ## Usage
///
/// ```
/// use arena_sim::zones::Zones;
/// use arena_sim::core::InstanceId;
///
/// let mut zones = Zones::default();
/// zones.deck_mut(1).push_back(InstanceId(10));
/// zones.deck_mut(1).push_back(InstanceId(11));
///
/// assert_eq!(zones.draw(1), Some(InstanceId(11)));
/// assert_eq!(zones.deck(1).len(), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Zones {
    /// Cards currently purchasable, in reveal order.
    pub market: Vector<InstanceId>,

    /// Decks for cost tiers 1..=5 (index 0 = tier 1).
    pub tier_decks: [Vector<InstanceId>; MAX_COST_TIER as usize],

    pub weapon_deck: Vector<InstanceId>,
    pub demon_deck: Vector<InstanceId>,
    pub discard: Vector<InstanceId>,
}

impl Zones {
    fn deck_index(cost_tier: u8) -> usize {
        usize::from(cost_tier.clamp(1, MAX_COST_TIER) - 1)
    }

    /// Deck for a cost tier (clamped to 1..=5).
    #[must_use]
    pub fn deck(&self, cost_tier: u8) -> &Vector<InstanceId> {
        &self.tier_decks[Self::deck_index(cost_tier)]
    }

    /// Mutable deck for a cost tier (clamped to 1..=5).
    pub fn deck_mut(&mut self, cost_tier: u8) -> &mut Vector<InstanceId> {
        &mut self.tier_decks[Self::deck_index(cost_tier)]
    }

    /// Pop the top card of a cost-tier deck.
    pub fn draw(&mut self, cost_tier: u8) -> Option<InstanceId> {
        self.deck_mut(cost_tier).pop_back()
    }

    /// Whether a card is on display.
    #[must_use]
    pub fn in_market(&self, card: InstanceId) -> bool {
        self.market.index_of(&card).is_some()
    }

    /// Remove an exact instance from the market.
    pub fn take_from_market(&mut self, card: InstanceId) -> bool {
        remove_instance(&mut self.market, card)
    }

    /// Append cards to the discard pile.
    pub fn discard(&mut self, cards: impl IntoIterator<Item = InstanceId>) {
        self.discard.extend(cards);
    }

    /// Locate a card among the shared zones.
    #[must_use]
    pub fn locate(&self, card: InstanceId) -> Option<ZoneKind> {
        if self.in_market(card) {
            return Some(ZoneKind::Market);
        }
        for tier in 1..=MAX_COST_TIER {
            if self.deck(tier).index_of(&card).is_some() {
                return Some(ZoneKind::TierDeck(tier));
            }
        }
        if self.weapon_deck.index_of(&card).is_some() {
            Some(ZoneKind::WeaponDeck)
        } else if self.demon_deck.index_of(&card).is_some() {
            Some(ZoneKind::DemonDeck)
        } else if self.discard.index_of(&card).is_some() {
            Some(ZoneKind::Discard)
        } else {
            None
        }
    }

    /// Total number of cards held in shared zones.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.market.len()
            + self.tier_decks.iter().map(Vector::len).sum::<usize>()
            + self.weapon_deck.len()
            + self.demon_deck.len()
            + self.discard.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deck_tiers_clamped() {
        let mut zones = Zones::default();
        zones.deck_mut(0).push_back(InstanceId(1));
        zones.deck_mut(9).push_back(InstanceId(2));

        assert_eq!(zones.deck(1).len(), 1);
        assert_eq!(zones.deck(5).len(), 1);
    }

    #[test]
    fn test_draw_from_top() {
        let mut zones = Zones::default();
        zones.deck_mut(2).extend([InstanceId(1), InstanceId(2), InstanceId(3)]);

        assert_eq!(zones.draw(2), Some(InstanceId(3)));
        assert_eq!(zones.draw(2), Some(InstanceId(2)));
        assert_eq!(zones.draw(2), Some(InstanceId(1)));
        assert_eq!(zones.draw(2), None);
    }

    #[test]
    fn test_take_from_market_exact() {
        let mut zones = Zones::default();
        zones.market.extend([InstanceId(4), InstanceId(5)]);

        assert!(zones.take_from_market(InstanceId(5)));
        assert!(!zones.take_from_market(InstanceId(5)));
        assert!(zones.in_market(InstanceId(4)));
    }

    #[test]
    fn test_locate_and_total() {
        let mut zones = Zones::default();
        zones.market.push_back(InstanceId(1));
        zones.deck_mut(3).push_back(InstanceId(2));
        zones.weapon_deck.push_back(InstanceId(3));
        zones.discard([InstanceId(4)]);

        assert_eq!(zones.locate(InstanceId(1)), Some(ZoneKind::Market));
        assert_eq!(zones.locate(InstanceId(2)), Some(ZoneKind::TierDeck(3)));
        assert_eq!(zones.locate(InstanceId(3)), Some(ZoneKind::WeaponDeck));
        assert_eq!(zones.locate(InstanceId(4)), Some(ZoneKind::Discard));
        assert_eq!(zones.locate(InstanceId(5)), None);
        assert_eq!(zones.total_cards(), 4);
    }
}
