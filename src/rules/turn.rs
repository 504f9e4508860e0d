//! Turn and phase progression.
//!
//! ```text
//! MARKET -> PLAY -> COMBAT -> END -> MARKET (next turn)
//! ```
//!
//! Leaving COMBAT resolves combat. Leaving END applies per-turn self-damage,
//! checks for the end of the game, mixes decks on schedule, starts the next
//! turn (PO reset, buy-order rotation) and refreshes the market.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

use super::combat::{resolve_combat, CombatReport};
use super::engine::GameResult;
use crate::cards::CardRegistry;
use crate::core::config::GameConfig;
use crate::core::phase::{po_for_turn, Phase};
use crate::core::player::{PlayerId, PlayerMap};
use crate::core::state::GameState;
use crate::effects::AbilityResolver;
use crate::zones::{mix_decks, refresh_market, should_mix, MixReport};

/// What happened while leaving the END phase.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndOfTurn {
    /// The turn that just ended.
    pub turn: u32,
    /// Per-turn self-damage applied to each player.
    pub self_damage: PlayerMap<i32>,
    /// Players eliminated by per-turn self-damage.
    pub eliminated: SmallVec<[PlayerId; 4]>,
    /// Deck mix performed before the next turn, if any.
    pub mixed: Option<MixReport>,
}

/// Result of one `advance_phase` call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PhaseTransition {
    /// Plain move into a new phase.
    Entered(Phase),
    /// Combat was resolved; the state is now in END.
    Combat(CombatReport),
    /// A new turn started in MARKET.
    NewTurn(EndOfTurn),
    /// The game is decided. `end` is `None` when the game was already over.
    GameOver {
        result: GameResult,
        end: Option<EndOfTurn>,
    },
}

impl PhaseTransition {
    /// Whether this transition finished the game.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        matches!(self, PhaseTransition::GameOver { .. })
    }
}

/// Advance the whole table by one phase.
pub fn advance_phase(registry: &CardRegistry, config: &GameConfig, state: &mut GameState) -> PhaseTransition {
    if let Some(result) = state.outcome {
        return PhaseTransition::GameOver { result, end: None };
    }

    let from = state.phase;
    let transition = match from {
        Phase::Market | Phase::Play => {
            state.phase = from.next();
            PhaseTransition::Entered(state.phase)
        }
        Phase::Combat => {
            let report = resolve_combat(registry, state);
            state.phase = Phase::End;
            PhaseTransition::Combat(report)
        }
        Phase::End => end_turn(registry, config, state),
    };

    trace!(turn = state.turn, %from, to = %state.phase, "phase transition");
    transition
}

/// Decide the game if at most one player is alive or the turn ceiling is hit.
#[must_use]
pub fn decide(state: &GameState, max_turns: u32) -> Option<GameResult> {
    let alive: SmallVec<[PlayerId; 5]> = state.alive_players().collect();
    match alive.as_slice() {
        [] => Some(GameResult::Draw),
        [winner] => Some(GameResult::Winner(*winner)),
        _ if state.turn >= max_turns => Some(GameResult::Draw),
        _ => None,
    }
}

fn apply_per_turn_damage(registry: &CardRegistry, state: &mut GameState) -> (PlayerMap<i32>, SmallVec<[PlayerId; 4]>) {
    let snapshot: &GameState = state;
    let damage = PlayerMap::new(snapshot.player_count(), |player| {
        if snapshot.players[player].is_alive() {
            AbilityResolver::resolve(registry, snapshot, player).per_turn_self_damage.max(0)
        } else {
            0
        }
    });

    let mut eliminated = SmallVec::new();
    for (player, &amount) in damage.iter() {
        if amount > 0 && state.players[player].apply_damage(amount) {
            eliminated.push(player);
        }
    }
    (damage, eliminated)
}

fn end_turn(registry: &CardRegistry, config: &GameConfig, state: &mut GameState) -> PhaseTransition {
    let turn = state.turn;
    let (self_damage, eliminated) = apply_per_turn_damage(registry, state);

    let mut end = EndOfTurn {
        turn,
        self_damage,
        eliminated,
        mixed: None,
    };

    if let Some(result) = decide(state, config.max_turns) {
        state.outcome = Some(result);
        return PhaseTransition::GameOver {
            result,
            end: Some(end),
        };
    }

    if should_mix(turn, config.mixing_turn_limit) {
        end.mixed = mix_decks(registry, state);
    }

    state.advance_turn();
    let po = po_for_turn(state.turn);
    for (_, seat) in state.players.iter_mut() {
        seat.po = po;
    }
    if state.turn % 2 == 0 && !state.buy_order.is_empty() {
        state.buy_order.rotate_left(1);
    }

    state.phase = Phase::Market;
    refresh_market(registry, state, config);

    PhaseTransition::NewTurn(end)
}
