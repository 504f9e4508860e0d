//! Random baseline agent.

use super::Agent;
use crate::core::{Action, GameRng, GameState, PlayerId};
use crate::rules::ArenaGame;

/// Picks uniformly among legal actions, ending the phase early with a fixed
/// probability so phases do not drag on until the action cap.
#[derive(Clone, Debug)]
pub struct RandomAgent {
    rng: GameRng,
    end_phase_probability: f64,
}

impl RandomAgent {
    /// Create a seeded random agent.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
            end_phase_probability: 0.2,
        }
    }

    /// Chance of ending the phase before drawing a uniform action.
    #[must_use]
    pub fn with_end_phase_probability(mut self, probability: f64) -> Self {
        self.end_phase_probability = probability.clamp(0.0, 1.0);
        self
    }
}

impl Agent for RandomAgent {
    fn name(&self) -> &str {
        "random"
    }

    fn choose_action(
        &mut self,
        _game: &ArenaGame,
        _state: &GameState,
        _player: PlayerId,
        legal: &[Action],
    ) -> Action {
        if legal.contains(&Action::EndPhase) && self.rng.gen_bool(self.end_phase_probability) {
            return Action::EndPhase;
        }
        self.rng.choose(legal).cloned().unwrap_or(Action::EndPhase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::starter_registry;
    use crate::rules::{ArenaGameBuilder, RulesEngine};

    #[test]
    fn test_random_agent_picks_legal_actions() {
        let (game, state) = ArenaGameBuilder::new(starter_registry().unwrap()).build(5);
        let legal = game.legal_actions(&state, PlayerId(0));
        let mut agent = RandomAgent::new(1);

        for _ in 0..50 {
            let action = agent.choose_action(&game, &state, PlayerId(0), &legal);
            assert!(legal.contains(&action));
        }
    }

    #[test]
    fn test_random_agent_is_seeded() {
        let (game, state) = ArenaGameBuilder::new(starter_registry().unwrap()).build(5);
        let legal = game.legal_actions(&state, PlayerId(0));

        let picks = |seed| {
            let mut agent = RandomAgent::new(seed);
            (0..20)
                .map(|_| agent.choose_action(&game, &state, PlayerId(0), &legal))
                .collect::<Vec<_>>()
        };

        assert_eq!(picks(9), picks(9));
    }

    #[test]
    fn test_always_end_phase() {
        let (game, state) = ArenaGameBuilder::new(starter_registry().unwrap()).build(5);
        let legal = game.legal_actions(&state, PlayerId(0));
        let mut agent = RandomAgent::new(1).with_end_phase_probability(1.0);

        assert_eq!(agent.choose_action(&game, &state, PlayerId(0), &legal), Action::EndPhase);
    }
}
