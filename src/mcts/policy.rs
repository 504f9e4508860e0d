//! MCTS policies for selection and simulation.
//!
//! Policies are trait-based to allow customization:
//! - `SelectionPolicy`: How to choose which child to explore (UCB1)
//! - `SimulationPolicy`: How to run rollouts (random)

use tracing::debug;

use crate::core::{Action, GameRng, GameState, PlayerId};
use crate::rules::RulesEngine;

use super::config::MCTSConfig;
use super::node::MCTSNode;

// =============================================================================
// Selection Policy
// =============================================================================

/// Policy for selecting which child node to explore.
pub trait SelectionPolicy: Send + Sync {
    /// Select the best edge index from a node.
    ///
    /// Returns the index of the edge to follow.
    fn select(&self, node: &MCTSNode, config: &MCTSConfig) -> usize;
}

/// UCB1 (Upper Confidence Bound) selection policy.
///
/// Balances exploitation (high value) with exploration (low visits).
/// Formula: Q(a) + c * sqrt(ln(N) / n(a)), unvisited edges score infinity.
#[derive(Clone, Debug, Default)]
pub struct UCB1;

impl SelectionPolicy for UCB1 {
    fn select(&self, node: &MCTSNode, config: &MCTSConfig) -> usize {
        let ln_parent = f64::from(node.visits.max(1)).ln();

        node.edges
            .iter()
            .enumerate()
            .map(|(i, edge)| {
                let score = if edge.visits == 0 {
                    f64::INFINITY
                } else {
                    edge.mean_value()
                        + config.exploration_constant * (ln_parent / f64::from(edge.visits)).sqrt()
                };
                (i, score)
            })
            .fold(None, |best: Option<(usize, f64)>, (i, score)| match best {
                Some((_, top)) if top >= score => best,
                _ => Some((i, score)),
            })
            .map_or(0, |(i, _)| i)
    }
}

// =============================================================================
// Simulation Policy
// =============================================================================

/// Policy for running simulations (rollouts) from a leaf node.
pub trait SimulationPolicy<E: RulesEngine>: Send + Sync {
    /// Run a simulation from the given state, returning the value for
    /// `player` in [0, 1].
    ///
    /// The state is modified during simulation.
    fn simulate(
        &self,
        engine: &E,
        state: &mut GameState,
        player: PlayerId,
        rng: &mut GameRng,
        rollout_depth: u32,
    ) -> f64;
}

/// Random simulation policy.
///
/// Plays random legal actions of the deciding player until the game ends or
/// the depth budget runs out, then scores the position with
/// `RulesEngine::evaluate`.
#[derive(Clone, Debug, Default)]
pub struct RandomSimulation;

impl<E: RulesEngine> SimulationPolicy<E> for RandomSimulation {
    fn simulate(
        &self,
        engine: &E,
        state: &mut GameState,
        player: PlayerId,
        rng: &mut GameRng,
        rollout_depth: u32,
    ) -> f64 {
        for _ in 0..rollout_depth {
            if engine.is_terminal(state).is_some() {
                break;
            }

            let actions = engine.legal_actions(state, player);
            let Some(action) = rng.choose(&actions) else {
                break;
            };
            apply_action(engine, state, player, action);
        }

        terminal_or_heuristic(engine, state, player)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Apply an action as the only actor at the table.
///
/// Returns false if the engine rejected the action; the rejection is logged
/// and the state is left as it was.
pub fn apply_action<E: RulesEngine>(
    engine: &E,
    state: &mut GameState,
    player: PlayerId,
    action: &Action,
) -> bool {
    match engine.step(state, player, action) {
        Ok(_) => true,
        Err(err) => {
            debug!(%player, %action, %err, "skipping rejected action during search");
            false
        }
    }
}

/// Exact value for terminal states, heuristic otherwise.
pub fn terminal_or_heuristic<E: RulesEngine>(engine: &E, state: &GameState, player: PlayerId) -> f64 {
    match engine.is_terminal(state) {
        Some(result) => result.value_for(player),
        None => engine.evaluate(state, player).clamp(0.0, 1.0),
    }
}
