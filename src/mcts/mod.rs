//! Monte Carlo Tree Search over `RulesEngine`.
//!
//! ## Overview
//!
//! - **Single-seat search**: the tree branches on the deciding player's
//!   actions only; other seats do not act inside the search
//! - **UCB1 selection**, uniformly random expansion, random rollouts scored
//!   by `RulesEngine::evaluate`
//! - **Root parallelism**: independent seeded workers on rayon, visit
//!   counts merged at the root
//! - **Serializable**: tree and config can be saved/loaded
//!
//! ## Usage
//!
//! ```rust
//! use arena_sim::cards::starter_registry;
//! use arena_sim::core::PlayerId;
//! use arena_sim::mcts::{MCTSConfig, MCTSSearch};
//! use arena_sim::rules::{ArenaGameBuilder, RulesEngine};
//!
//! let (game, mut state) = ArenaGameBuilder::new(starter_registry().unwrap()).build(7);
//! let legal = game.legal_actions(&state, PlayerId::new(0));
//!
//! let config = MCTSConfig::default().with_simulations(50);
//! let mut search = MCTSSearch::new(game, config);
//! let action = search.search(&mut state, PlayerId::new(0), &legal);
//!
//! assert!(action.map_or(false, |a| legal.contains(&a)));
//! ```

pub mod config;
pub mod node;
pub mod policy;
pub mod search;
pub mod stats;
pub mod tree;

// Re-export main types
pub use config::MCTSConfig;
pub use node::{Edge, MCTSNode, NodeId};
pub use policy::{RandomSimulation, SelectionPolicy, SimulationPolicy, UCB1};
pub use search::MCTSSearch;
pub use stats::SearchStats;
pub use tree::{MCTSTree, TreeStats};
