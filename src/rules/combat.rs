//! Simultaneous combat.
//!
//! Every alive player attacks every other alive player. Each player's combat
//! profile (board stats plus ability bonuses) is computed once from an
//! unmutated snapshot, so the order in which pairs are evaluated cannot change
//! the result. Damage is then applied in a single tick.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

use crate::cards::CardRegistry;
use crate::core::player::{PlayerId, PlayerMap};
use crate::core::state::GameState;
use crate::effects::AbilityResolver;

/// Combat stats of one player, taken before any damage lands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatProfile {
    pub attack: i32,
    pub defense: i32,
    pub imblocable: i32,
    pub self_damage: i32,
}

impl CombatProfile {
    /// Profile of `player`'s board in the current state.
    #[must_use]
    pub fn of(registry: &CardRegistry, state: &GameState, player: PlayerId) -> Self {
        let totals = AbilityResolver::board_totals(registry, state, player);
        let bonus = AbilityResolver::resolve(registry, state, player);
        Self {
            attack: totals.attack + bonus.attack,
            defense: totals.health + bonus.health,
            imblocable: totals.imblocable + bonus.imblocable,
            self_damage: bonus.self_damage,
        }
    }
}

/// Damage dealt by one attacker to one defender.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairDamage {
    pub attacker: PlayerId,
    pub defender: PlayerId,
    pub attack: i32,
    pub defense: i32,
    /// `max(0, attack - defense)`.
    pub base: i32,
    pub imblocable: i32,
    pub total: i32,
}

impl PairDamage {
    fn between(attacker: PlayerId, defender: PlayerId, atk: &CombatProfile, def: &CombatProfile) -> Self {
        let base = (atk.attack - def.defense).max(0);
        let imblocable = atk.imblocable.max(0);
        Self {
            attacker,
            defender,
            attack: atk.attack,
            defense: def.defense,
            base,
            imblocable,
            total: base + imblocable,
        }
    }
}

/// Everything one combat step did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatReport {
    pub pairs: Vec<PairDamage>,
    /// Damage received per defender.
    pub damage_taken: PlayerMap<i32>,
    /// Combat self-damage per attacker.
    pub self_damage: PlayerMap<i32>,
    /// Net health change per player (negative = lost health).
    pub health_deltas: PlayerMap<i32>,
    /// Players eliminated by this combat, in seat order.
    pub eliminations: SmallVec<[PlayerId; 4]>,
}

impl CombatReport {
    /// Total damage dealt across all pairs.
    #[must_use]
    pub fn total_damage(&self) -> i32 {
        self.pairs.iter().map(|p| p.total).sum()
    }
}

/// Combat profiles of every seat, computed from the same snapshot.
#[must_use]
pub fn combat_profiles(registry: &CardRegistry, state: &GameState) -> PlayerMap<CombatProfile> {
    PlayerMap::new(state.player_count(), |player| {
        CombatProfile::of(registry, state, player)
    })
}

/// Damage for the given (attacker, defender) pairs, without mutating state.
#[must_use]
pub fn compute_pairs(
    registry: &CardRegistry,
    state: &GameState,
    pairs: &[(PlayerId, PlayerId)],
) -> Vec<PairDamage> {
    let profiles = combat_profiles(registry, state);
    pairs
        .iter()
        .map(|&(attacker, defender)| {
            PairDamage::between(attacker, defender, &profiles[attacker], &profiles[defender])
        })
        .collect()
}

/// All ordered pairs of distinct alive players.
#[must_use]
pub fn combat_pairs(state: &GameState) -> Vec<(PlayerId, PlayerId)> {
    let alive: SmallVec<[PlayerId; 5]> = state.alive_players().collect();
    let mut pairs = Vec::with_capacity(alive.len() * alive.len().saturating_sub(1));
    for &attacker in &alive {
        for &defender in &alive {
            if attacker != defender {
                pairs.push((attacker, defender));
            }
        }
    }
    pairs
}

/// Resolve one combat step and apply its damage.
pub fn resolve_combat(registry: &CardRegistry, state: &mut GameState) -> CombatReport {
    let count = state.player_count();
    let profiles = combat_profiles(registry, state);
    let pairs: Vec<PairDamage> = combat_pairs(state)
        .into_iter()
        .map(|(attacker, defender)| {
            PairDamage::between(attacker, defender, &profiles[attacker], &profiles[defender])
        })
        .collect();

    let mut damage_taken = PlayerMap::with_value(count, 0);
    let mut self_damage = PlayerMap::with_value(count, 0);

    for pair in &pairs {
        trace!(
            attacker = %pair.attacker,
            defender = %pair.defender,
            base = pair.base,
            imblocable = pair.imblocable,
            total = pair.total,
            "combat pair"
        );
        damage_taken[pair.defender] += pair.total;
        self_damage[pair.attacker] = profiles[pair.attacker].self_damage.max(0);
    }

    let health_deltas = PlayerMap::new(count, |p| -(damage_taken[p] + self_damage[p]));

    let mut eliminations = SmallVec::new();
    let alive: SmallVec<[PlayerId; 5]> = state.alive_players().collect();
    for player in alive {
        let lost = damage_taken[player] + self_damage[player];
        if lost != 0 && state.players[player].apply_damage(lost) {
            eliminations.push(player);
        }
    }

    CombatReport {
        pairs,
        damage_taken,
        self_damage,
        health_deltas,
        eliminations,
    }
}
