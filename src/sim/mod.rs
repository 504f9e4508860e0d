//! Game simulation: full turns over a table of agents.
//!
//! ```rust
//! use arena_sim::agents::{Agent, ScriptedAgent};
//! use arena_sim::cards::starter_registry;
//! use arena_sim::rules::ArenaGameBuilder;
//! use arena_sim::sim::GameRunner;
//!
//! let (game, state) = ArenaGameBuilder::new(starter_registry().unwrap()).build(3);
//! let agents: Vec<Box<dyn Agent>> = vec![Box::new(ScriptedAgent::new()), Box::new(ScriptedAgent::new())];
//!
//! let mut runner = GameRunner::new(game, state, agents);
//! let summary = runner.run_game().unwrap();
//! assert!(summary.turns >= 1);
//! ```

pub mod runner;

pub use runner::{run_games_parallel, GameRunner, GameSummary, TurnResult};
