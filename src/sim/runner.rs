//! Whole-game loop over a table of agents.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, info};

use crate::agents::Agent;
use crate::core::{Action, ActionError, GameState, Phase, PlayerId, PlayerMap};
use crate::rules::{ArenaGame, CombatReport, EndOfTurn, GameResult, PhaseTransition, RulesEngine};

/// What happened during one full turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnResult {
    /// The turn that was played.
    pub turn: u32,

    /// Non-EndPhase actions executed during MARKET and PLAY.
    pub actions: usize,

    pub combat: Option<CombatReport>,

    /// Per-turn self-damage, mixing and end-phase eliminations.
    pub end: Option<EndOfTurn>,

    /// Set when this turn decided the game.
    pub result: Option<GameResult>,
}

impl TurnResult {
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.result.is_some()
    }

    /// Everyone eliminated this turn, combat first.
    #[must_use]
    pub fn eliminations(&self) -> SmallVec<[PlayerId; 4]> {
        let mut out = SmallVec::new();
        if let Some(combat) = &self.combat {
            out.extend(combat.eliminations.iter().copied());
        }
        if let Some(end) = &self.end {
            out.extend(end.eliminated.iter().copied());
        }
        out
    }

    /// Per-turn self-damage taken by `player` in the END phase.
    #[must_use]
    pub fn per_turn_damage(&self, player: PlayerId) -> i32 {
        self.end.as_ref().map_or(0, |end| end.self_damage[player])
    }
}

/// Final outcome of a finished game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSummary {
    pub seed: u64,
    pub result: GameResult,
    /// Turn on which the game was decided.
    pub turns: u32,
    /// Agent name per seat.
    pub agents: Vec<String>,
    pub final_health: PlayerMap<i32>,
    /// Successful actions over the whole game, EndPhase included.
    pub actions: usize,
    /// Combat damage dealt over the whole game.
    pub combat_damage: i64,
}

impl GameSummary {
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        match self.result {
            GameResult::Winner(player) => Some(player),
            GameResult::Draw => None,
        }
    }
}

/// Drives one game: asks agents for actions, applies them and advances phases.
pub struct GameRunner {
    game: ArenaGame,
    state: GameState,
    agents: Vec<Box<dyn Agent>>,
    seed: u64,
    combat_damage: i64,
}

impl GameRunner {
    /// Create a runner with one agent per seat.
    pub fn new(game: ArenaGame, state: GameState, agents: Vec<Box<dyn Agent>>) -> Self {
        assert_eq!(
            agents.len(),
            state.player_count(),
            "Need exactly one agent per player"
        );
        let seed = state.rng.seed();

        Self {
            game,
            state,
            agents,
            seed,
            combat_damage: 0,
        }
    }

    #[must_use]
    pub fn game(&self) -> &ArenaGame {
        &self.game
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn into_state(self) -> GameState {
        self.state
    }

    /// Play MARKET, PLAY, COMBAT and END for the current turn.
    ///
    /// Players buy in buy order, then every alive player plays. Each player
    /// gets at most `max_actions_per_phase` actions before being made to end
    /// the phase. An action the engine rejects aborts the turn.
    pub fn play_turn(&mut self) -> Result<TurnResult, ActionError> {
        if self.state.is_over() {
            return Err(ActionError::GameOver);
        }
        debug_assert_eq!(self.state.phase, Phase::Market);

        let mut turn = TurnResult {
            turn: self.state.turn,
            actions: 0,
            combat: None,
            end: None,
            result: None,
        };

        // MARKET and PLAY.
        for phase in [Phase::Market, Phase::Play] {
            let seats: Vec<PlayerId> = match phase {
                Phase::Market => self.state.buy_order.clone(),
                _ => self.state.alive_players().collect(),
            };
            for player in seats {
                if self.state.players[player].is_alive() {
                    turn.actions += self.act(player)?;
                }
            }
            self.advance(&mut turn);
        }

        // COMBAT and END have no choices; everyone still in just passes.
        while turn.result.is_none() {
            let seats: Vec<PlayerId> = self.state.alive_players().collect();
            for player in seats {
                self.game.execute(&mut self.state, player, &Action::EndPhase)?;
            }
            if self.advance(&mut turn) {
                break;
            }
        }

        if let Some(result) = turn.result {
            info!(seed = self.seed, turn = turn.turn, ?result, "game finished");
        }
        Ok(turn)
    }

    /// Play turns until the game is decided.
    pub fn run_game(&mut self) -> Result<GameSummary, ActionError> {
        let result = loop {
            if let Some(result) = self.state.outcome {
                break result;
            }
            if let Some(result) = self.play_turn()?.result {
                break result;
            }
        };

        Ok(GameSummary {
            seed: self.seed,
            result,
            turns: self.state.turn,
            agents: self.agents.iter().map(|a| a.name().to_string()).collect(),
            final_health: PlayerMap::new(self.state.player_count(), |p| self.state.players[p].health),
            actions: self.state.history.len(),
            combat_damage: self.combat_damage,
        })
    }

    /// One player's turn in the current phase; returns actions taken.
    fn act(&mut self, player: PlayerId) -> Result<usize, ActionError> {
        let limit = self.game.config().max_actions_per_phase;
        let mut taken = 0;

        while taken < limit {
            let legal = self.game.legal_actions(&self.state, player);
            if legal.iter().all(|a| *a == Action::EndPhase) {
                break;
            }

            let action = self.agents[player.index()].choose_action(&self.game, &self.state, player, &legal);
            if action == Action::EndPhase {
                break;
            }

            debug!(%player, %action, phase = %self.state.phase, "agent action");
            self.game.execute(&mut self.state, player, &action)?;
            taken += 1;
        }

        self.game.execute(&mut self.state, player, &Action::EndPhase)?;
        Ok(taken)
    }

    /// Advance one phase and fold the transition into `turn`.
    ///
    /// Returns true once the turn is finished (new turn started or game over).
    fn advance(&mut self, turn: &mut TurnResult) -> bool {
        match self.game.advance_phase(&mut self.state) {
            PhaseTransition::Entered(_) => false,
            PhaseTransition::Combat(report) => {
                self.combat_damage += i64::from(report.total_damage());
                turn.combat = Some(report);
                false
            }
            PhaseTransition::NewTurn(end) => {
                turn.end = Some(end);
                true
            }
            PhaseTransition::GameOver { result, end } => {
                turn.end = end;
                turn.result = Some(result);
                true
            }
        }
    }
}

/// Play one game per seed in parallel.
///
/// `factory` builds the runner for a seed; results come back in seed order.
pub fn run_games_parallel<F>(seeds: &[u64], factory: F) -> Vec<Result<GameSummary, ActionError>>
where
    F: Fn(u64) -> GameRunner + Sync,
{
    seeds
        .par_iter()
        .map(|&seed| factory(seed).run_game())
        .collect()
}
