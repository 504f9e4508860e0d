//! Rules engine trait.
//!
//! `RulesEngine` is the seam between the game and its drivers (the turn
//! runner and MCTS):
//! - What actions are legal
//! - How actions modify state
//! - How phases advance
//! - Win/draw conditions and position evaluation

use serde::{Deserialize, Serialize};

use super::turn::PhaseTransition;
use crate::core::action::{Action, ActionOutcome};
use crate::core::config::GameConfig;
use crate::core::error::ActionError;
use crate::core::player::PlayerId;
use crate::core::state::GameState;

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// Last player standing.
    Winner(PlayerId),
    /// Nobody left, or the turn ceiling was reached.
    Draw,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }

    /// Terminal value for `player`: 1.0 win, 0.0 loss, 0.5 draw.
    #[must_use]
    pub fn value_for(&self, player: PlayerId) -> f64 {
        match self {
            GameResult::Winner(p) if *p == player => 1.0,
            GameResult::Winner(_) => 0.0,
            GameResult::Draw => 0.5,
        }
    }
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `legal_actions`: Return empty vec if the player can't act
/// - `execute`: Must be deterministic given the state's RNG
/// - `advance_phase`: Moves the whole table forward one phase
/// - `is_terminal`: Return None if the game continues
pub trait RulesEngine {
    /// Get the game configuration.
    fn config(&self) -> &GameConfig;

    /// Enumerate all legal actions for a player.
    fn legal_actions(&self, state: &GameState, player: PlayerId) -> Vec<Action>;

    /// Validate and apply one action.
    fn execute(
        &self,
        state: &mut GameState,
        player: PlayerId,
        action: &Action,
    ) -> Result<ActionOutcome, ActionError>;

    /// Move the state to the next phase.
    fn advance_phase(&self, state: &mut GameState) -> PhaseTransition;

    /// Check if the game is over.
    fn is_terminal(&self, state: &GameState) -> Option<GameResult>;

    /// Heuristic value of the position for `player`, in [0, 1].
    fn evaluate(&self, state: &GameState, player: PlayerId) -> f64;

    // === Convenience Methods ===

    /// Execute an action as the only actor at the table: ending the phase
    /// also advances it. Used by rollouts.
    fn step(
        &self,
        state: &mut GameState,
        player: PlayerId,
        action: &Action,
    ) -> Result<ActionOutcome, ActionError> {
        let outcome = self.execute(state, player, action)?;
        if matches!(outcome, ActionOutcome::PhaseEnded { .. }) {
            self.advance_phase(state);
        }
        Ok(outcome)
    }
}
