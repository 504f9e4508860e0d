//! Search-backed agent.

use tracing::debug;

use super::Agent;
use crate::core::{Action, GameState, PlayerId};
use crate::mcts::{MCTSConfig, MCTSSearch, SearchStats};
use crate::rules::ArenaGame;

/// Runs an MCTS search per decision.
///
/// Each decision uses seed `config.seed + decisions` so that a whole game is
/// reproducible from the agent's config. With `workers > 1` the search is
/// root-parallel on rayon.
#[derive(Clone, Debug)]
pub struct MctsAgent {
    config: MCTSConfig,
    workers: usize,
    decisions: u64,
    last_stats: Option<SearchStats>,
}

impl MctsAgent {
    #[must_use]
    pub fn new(config: MCTSConfig) -> Self {
        Self {
            config,
            workers: 1,
            decisions: 0,
            last_stats: None,
        }
    }

    /// Number of root-parallel workers (1 = sequential search).
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    #[must_use]
    pub fn config(&self) -> &MCTSConfig {
        &self.config
    }

    /// Number of decisions taken so far.
    #[must_use]
    pub fn decisions(&self) -> u64 {
        self.decisions
    }

    /// Statistics of the most recent search, if any ran.
    #[must_use]
    pub fn last_stats(&self) -> Option<&SearchStats> {
        self.last_stats.as_ref()
    }

    fn decision_config(&self) -> MCTSConfig {
        self.config
            .clone()
            .with_seed(self.config.seed.wrapping_add(self.decisions))
    }
}

impl Agent for MctsAgent {
    fn name(&self) -> &str {
        "mcts"
    }

    fn choose_action(
        &mut self,
        game: &ArenaGame,
        state: &GameState,
        player: PlayerId,
        legal: &[Action],
    ) -> Action {
        let config = self.decision_config();
        self.decisions += 1;

        let choice = if self.workers > 1 {
            let (visits, stats) =
                MCTSSearch::root_parallel_visits(game, &config, state, player, legal, self.workers);
            self.last_stats = Some(stats);
            visits
                .into_iter()
                .fold(None, |best: Option<(Action, u32)>, (action, count)| match best {
                    Some((_, top)) if top >= count => best,
                    _ => Some((action, count)),
                })
                .map(|(action, _)| action)
        } else {
            let mut root = state.clone();
            let mut search = MCTSSearch::new(game.clone(), config);
            let action = search.search(&mut root, player, legal);
            self.last_stats = Some(search.stats().clone());
            action
        };

        if let Some(stats) = &self.last_stats {
            debug!(
                %player,
                iterations = stats.iterations,
                nodes = stats.nodes_expanded,
                stale = stats.stale_actions,
                rate = stats.iterations_per_second(),
                "mcts decision"
            );
        }

        choice.unwrap_or(Action::EndPhase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::starter_registry;
    use crate::rules::{ArenaGameBuilder, RulesEngine};

    fn agent() -> MctsAgent {
        MctsAgent::new(MCTSConfig::default().with_simulations(30).with_rollout_depth(4))
    }

    #[test]
    fn test_mcts_agent_picks_legal_action() {
        let (game, state) = ArenaGameBuilder::new(starter_registry().unwrap()).build(11);
        let legal = game.legal_actions(&state, PlayerId(0));
        let mut agent = agent();

        let action = agent.choose_action(&game, &state, PlayerId(0), &legal);

        assert!(legal.contains(&action));
        assert_eq!(agent.decisions(), 1);
        assert!(agent.last_stats().is_some());
    }

    #[test]
    fn test_mcts_agent_reproducible() {
        let (game, state) = ArenaGameBuilder::new(starter_registry().unwrap()).build(11);
        let legal = game.legal_actions(&state, PlayerId(0));

        let first = agent().choose_action(&game, &state, PlayerId(0), &legal);
        let second = agent().choose_action(&game, &state, PlayerId(0), &legal);

        assert_eq!(first, second);
    }

    #[test]
    fn test_mcts_agent_root_parallel() {
        let (game, state) = ArenaGameBuilder::new(starter_registry().unwrap()).build(11);
        let legal = game.legal_actions(&state, PlayerId(0));
        let mut agent = agent().with_workers(3);

        let action = agent.choose_action(&game, &state, PlayerId(0), &legal);

        assert!(legal.contains(&action));
        if legal.len() > 1 {
            assert_eq!(agent.last_stats().unwrap().iterations, 90);
        }
    }
}
