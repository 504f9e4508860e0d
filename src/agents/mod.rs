//! Decision makers for seats at the table.
//!
//! An `Agent` picks one action from the legal list the runner hands it. It
//! sees the whole state read-only; the runner applies the choice.
//!
//! - `RandomAgent`: uniform baseline
//! - `ScriptedAgent`: fixed greedy priorities
//! - `MctsAgent`: tree search over `ArenaGame`

mod mcts;
mod random;
mod scripted;

pub use mcts::MctsAgent;
pub use random::RandomAgent;
pub use scripted::ScriptedAgent;

use crate::core::{Action, GameState, PlayerId};
use crate::rules::ArenaGame;

/// A seat's decision maker.
pub trait Agent {
    /// Short label for logs and summaries.
    fn name(&self) -> &str;

    /// Pick one of `legal` for `player`.
    ///
    /// `legal` is never empty when called by the runner. Returning an action
    /// outside it is a bug in the agent; the runner reports it as an error.
    fn choose_action(
        &mut self,
        game: &ArenaGame,
        state: &GameState,
        player: PlayerId,
        legal: &[Action],
    ) -> Action;
}

impl<A: Agent + ?Sized> Agent for Box<A> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn choose_action(
        &mut self,
        game: &ArenaGame,
        state: &GameState,
        player: PlayerId,
        legal: &[Action],
    ) -> Action {
        (**self).choose_action(game, state, player, legal)
    }
}
