//! Search knobs.

use serde::{Deserialize, Serialize};

/// Budget and tuning for one search.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MCTSConfig {
    /// UCB1 `c`. Zero means pure exploitation.
    pub exploration_constant: f64,
    /// Iterations per decision.
    pub simulations: u32,
    /// Random actions played by a rollout before the position is scored.
    pub rollout_depth: u32,
    /// Deepest node the tree may grow (0 means no limit).
    pub max_depth: u32,
    /// Search stops early once the arena holds this many nodes.
    pub max_nodes: usize,
    /// Seeds the search RNG; equal seeds give equal searches.
    pub seed: u64,
}

impl Default for MCTSConfig {
    fn default() -> Self {
        Self {
            exploration_constant: std::f64::consts::SQRT_2,
            simulations: 100,
            rollout_depth: 10,
            max_depth: 0,
            max_nodes: 100_000,
            seed: 42,
        }
    }
}

impl MCTSConfig {
    pub fn with_exploration(self, exploration_constant: f64) -> Self {
        Self { exploration_constant, ..self }
    }

    pub fn with_seed(self, seed: u64) -> Self {
        Self { seed, ..self }
    }

    pub fn with_simulations(self, simulations: u32) -> Self {
        Self { simulations, ..self }
    }

    pub fn with_rollout_depth(self, rollout_depth: u32) -> Self {
        Self { rollout_depth, ..self }
    }

    pub fn with_max_depth(self, max_depth: u32) -> Self {
        Self { max_depth, ..self }
    }

    pub fn with_max_nodes(self, max_nodes: usize) -> Self {
        Self { max_nodes, ..self }
    }
}
