//! Core MCTS search algorithm.
//!
//! The tree only branches on the deciding player's own actions. Every
//! iteration works on a fresh clone of the root state (O(1) thanks to the
//! persistent collections in `GameState`).

use std::time::Instant;

use rayon::prelude::*;

use crate::core::{Action, GameRng, GameState, PlayerId};
use crate::rules::RulesEngine;

use super::config::MCTSConfig;
use super::node::{Edge, MCTSNode, NodeId};
use super::policy::{apply_action, terminal_or_heuristic, RandomSimulation, SelectionPolicy, SimulationPolicy, UCB1};
use super::stats::SearchStats;
use super::tree::MCTSTree;

/// Main MCTS search context.
///
/// Generic over the rules engine type. Owns the search tree and
/// configuration, and provides methods to run searches.
pub struct MCTSSearch<E: RulesEngine> {
    /// The game rules engine.
    engine: E,

    /// Search configuration.
    config: MCTSConfig,

    /// The search tree.
    tree: MCTSTree,

    /// RNG for expansion order and rollouts.
    rng: GameRng,

    /// Selection policy.
    selection: Box<dyn SelectionPolicy>,

    /// Simulation policy.
    simulation: Box<dyn SimulationPolicy<E>>,

    /// Search statistics.
    stats: SearchStats,
}

impl<E: RulesEngine> MCTSSearch<E> {
    /// Create a new MCTS search context.
    pub fn new(engine: E, config: MCTSConfig) -> Self {
        let rng = GameRng::new(config.seed);
        let capacity = config.max_nodes.min(4096);

        Self {
            engine,
            config,
            tree: MCTSTree::with_capacity(capacity),
            rng,
            selection: Box::new(UCB1),
            simulation: Box::new(RandomSimulation),
            stats: SearchStats::default(),
        }
    }

    /// Set a custom selection policy.
    pub fn with_selection<S: SelectionPolicy + 'static>(mut self, selection: S) -> Self {
        self.selection = Box::new(selection);
        self
    }

    /// Set a custom simulation policy.
    pub fn with_simulation<S: SimulationPolicy<E> + 'static>(mut self, simulation: S) -> Self {
        self.simulation = Box::new(simulation);
        self
    }

    /// Run `config.simulations` iterations and return the most visited root
    /// action for `player`.
    ///
    /// `legal` seeds the root; when empty, the engine is asked. Takes
    /// `&mut GameState` because cloning state forks its RNG.
    pub fn search(&mut self, state: &mut GameState, player: PlayerId, legal: &[Action]) -> Option<Action> {
        let start = Instant::now();
        self.stats.reset();
        self.tree.reset();

        let root = self.tree.root();
        if legal.is_empty() {
            self.expand_node(root, state, player);
        } else {
            self.tree
                .root_node_mut()
                .edges
                .extend(legal.iter().cloned().map(Edge::new));
            self.stats.nodes_expanded += 1;
        }

        let root_node = self.tree.get(root);
        if root_node.is_terminal || root_node.edges.is_empty() {
            return None;
        }
        if root_node.edges.len() == 1 {
            return Some(root_node.edges[0].action.clone());
        }

        for _ in 0..self.config.simulations {
            let mut sim_state = state.clone_state();
            self.iteration(&mut sim_state, player);
            self.stats.iterations += 1;

            if self.tree.len() >= self.config.max_nodes {
                break;
            }
        }

        self.stats.time_us = start.elapsed().as_micros() as u64;

        self.best_action()
    }

    /// Single MCTS iteration: select, expand, simulate, backpropagate.
    fn iteration(&mut self, state: &mut GameState, player: PlayerId) {
        let mut path: Vec<(NodeId, usize)> = Vec::new();
        let mut current = self.tree.root();

        loop {
            let node = self.tree.get(current);

            if node.is_terminal {
                let value = node.terminal_value.unwrap_or(0.5);
                self.backpropagate(&path, value);
                return;
            }

            let depth_capped = self.config.max_depth > 0 && u32::from(node.depth) >= self.config.max_depth;
            if depth_capped || node.edges.is_empty() {
                let value = terminal_or_heuristic(&self.engine, state, player);
                self.backpropagate(&path, value);
                return;
            }

            // === EXPANSION ===
            if node.has_unexpanded() {
                let edge_idx = self.select_unexpanded(current);
                path.push((current, edge_idx));

                let action = self.tree.get(current).edges[edge_idx].action.clone();
                self.apply(state, player, &action);
                self.expand_child(current, edge_idx, state, player);

                // === SIMULATION ===
                let value = self.simulate(state, player);
                self.stats.simulations += 1;
                self.backpropagate(&path, value);
                return;
            }

            // === SELECTION ===
            let edge_idx = self.selection.select(node, &self.config);
            path.push((current, edge_idx));

            let edge = &self.tree.get(current).edges[edge_idx];
            let (action, child) = (edge.action.clone(), edge.child);
            self.apply(state, player, &action);
            current = child;
        }
    }

    fn apply(&mut self, state: &mut GameState, player: PlayerId, action: &Action) {
        if !apply_action(&self.engine, state, player, action) {
            self.stats.stale_actions += 1;
        }
    }

    /// Mark a node terminal or give it one edge per legal action.
    fn expand_node(&mut self, node_id: NodeId, state: &GameState, player: PlayerId) {
        if let Some(result) = self.engine.is_terminal(state) {
            let node = self.tree.get_mut(node_id);
            node.is_terminal = true;
            node.terminal_value = Some(result.value_for(player));
            return;
        }

        let actions = self.engine.legal_actions(state, player);
        self.tree
            .get_mut(node_id)
            .edges
            .extend(actions.into_iter().map(Edge::new));

        self.stats.nodes_expanded += 1;
    }

    /// Pick an untried edge uniformly at random.
    fn select_unexpanded(&mut self, node_id: NodeId) -> usize {
        let unexpanded: Vec<usize> = self.tree.get(node_id).unexpanded_edges().collect();
        self.rng.choose(&unexpanded).copied().unwrap_or(0)
    }

    /// Expand a child node for the given edge.
    fn expand_child(&mut self, parent_id: NodeId, edge_idx: usize, state: &GameState, player: PlayerId) -> NodeId {
        let depth = self.tree.get(parent_id).depth + 1;
        self.stats.max_depth = self.stats.max_depth.max(depth);

        let child_id = self.tree.alloc(MCTSNode::new(parent_id, edge_idx as u16, depth));
        self.tree.get_mut(parent_id).edges[edge_idx].child = child_id;

        self.expand_node(child_id, state, player);

        child_id
    }

    /// Run a simulation from the current state.
    fn simulate(&mut self, state: &mut GameState, player: PlayerId) -> f64 {
        let mut sim_rng = self.rng.fork();
        self.simulation
            .simulate(&self.engine, state, player, &mut sim_rng, self.config.rollout_depth)
    }

    /// Add the value and one visit to every node and edge on the path.
    fn backpropagate(&mut self, path: &[(NodeId, usize)], value: f64) {
        for &(node_id, edge_idx) in path.iter().rev() {
            let node = self.tree.get_mut(node_id);
            node.visits += 1;

            let edge = &mut node.edges[edge_idx];
            edge.visits += 1;
            edge.total_value += value;
        }
    }

    /// Most visited root action.
    fn best_action(&self) -> Option<Action> {
        self.tree
            .root_node()
            .best_edge_by_visits()
            .map(|e| e.action.clone())
    }

    /// Get search statistics.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Get the search tree.
    #[must_use]
    pub fn tree(&self) -> &MCTSTree {
        &self.tree
    }

    /// Root actions with their visit counts.
    pub fn action_visits(&self) -> Vec<(Action, u32)> {
        self.tree
            .root_node()
            .edges
            .iter()
            .map(|e| (e.action.clone(), e.visits))
            .collect()
    }

    /// Root actions with visit shares summing to ~1.0.
    pub fn action_probabilities(&self) -> Vec<(Action, f64)> {
        let root = self.tree.root_node();
        let total: u32 = root.edges.iter().map(|e| e.visits).sum();

        if total == 0 {
            let uniform = 1.0 / root.edges.len().max(1) as f64;
            return root
                .edges
                .iter()
                .map(|e| (e.action.clone(), uniform))
                .collect();
        }

        root.edges
            .iter()
            .map(|e| (e.action.clone(), f64::from(e.visits) / f64::from(total)))
            .collect()
    }

    /// Get the engine reference.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Get the configuration.
    pub fn config(&self) -> &MCTSConfig {
        &self.config
    }
}

impl<E: RulesEngine + Clone + Send + Sync> MCTSSearch<E> {
    /// Root-parallel search: `workers` independent searches with seeds
    /// `config.seed + i`, root visit counts summed per action.
    ///
    /// Returns the merged `(action, visits)` list in root order and the
    /// combined statistics.
    pub fn root_parallel_visits(
        engine: &E,
        config: &MCTSConfig,
        state: &GameState,
        player: PlayerId,
        legal: &[Action],
        workers: usize,
    ) -> (Vec<(Action, u32)>, SearchStats) {
        let results: Vec<(Vec<(Action, u32)>, SearchStats)> = (0..workers.max(1) as u64)
            .into_par_iter()
            .map(|worker| {
                let seed = config.seed.wrapping_add(worker);
                let mut search = MCTSSearch::new(engine.clone(), config.clone().with_seed(seed));
                let mut root = state.clone();
                root.rng = GameRng::new(seed);
                search.search(&mut root, player, legal);
                (search.action_visits(), search.stats.clone())
            })
            .collect();

        let mut merged: Vec<(Action, u32)> = Vec::new();
        let mut stats = SearchStats::default();
        for (visits, worker_stats) in results {
            stats.merge(&worker_stats);
            for (action, count) in visits {
                match merged.iter_mut().find(|(a, _)| *a == action) {
                    Some((_, total)) => *total += count,
                    None => merged.push((action, count)),
                }
            }
        }
        (merged, stats)
    }

    /// Root-parallel search returning the action with the most merged visits.
    pub fn search_root_parallel(
        engine: &E,
        config: &MCTSConfig,
        state: &GameState,
        player: PlayerId,
        legal: &[Action],
        workers: usize,
    ) -> Option<Action> {
        if legal.len() == 1 {
            return legal.first().cloned();
        }
        let (merged, _) = Self::root_parallel_visits(engine, config, state, player, legal, workers);
        merged
            .into_iter()
            .fold(None, |best: Option<(Action, u32)>, (action, visits)| match best {
                Some((_, top)) if top >= visits => best,
                _ => Some((action, visits)),
            })
            .map(|(action, _)| action)
    }
}
