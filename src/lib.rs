//! # arena-sim
//!
//! Engine for a multiplayer deck-economy arena card game, with scripted and
//! Monte Carlo Tree Search agents for balance analysis.
//!
//! ## Design Principles
//!
//! 1. **One State, One Mutator**: `GameState` is the only thing actions
//!    touch. Every card copy lives in an arena and is addressed by
//!    `InstanceId`, never by value.
//!
//! 2. **N-Player First**: 2 to 5 seats. Every per-player value is a
//!    `PlayerMap`; combat resolves pairwise and simultaneously.
//!
//! 3. **Parse Once**: ability text is parsed into structured effects when
//!    the catalog loads and never looked at again.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: O(1) cloning via `im-rs`, so the MCTS
//!   can copy the whole game per simulation.
//!
//! - **Explicit Catalog**: `ArenaGame` holds an `Arc<CardRegistry>`; there is
//!   no global card table.
//!
//! ## Modules
//!
//! - `core`: Instance IDs, players, phases, state, actions, errors, RNG, configuration
//! - `cards`: Card tags, definitions, instances, blueprints and registry
//! - `effects`: Parsed abilities and their resolution against a board
//! - `zones`: Market, cost-tier decks, special decks and discard
//! - `rules`: `RulesEngine` trait, actions, combat, turn flow and `ArenaGame`
//! - `mcts`: Monte Carlo Tree Search
//! - `agents`: Random, scripted and search-backed decision makers
//! - `sim`: Whole-game runner and parallel batches

pub mod core;
pub mod cards;
pub mod effects;
pub mod zones;
pub mod rules;
pub mod mcts;
pub mod agents;
pub mod sim;

// Re-export commonly used types
pub use crate::core::{
    InstanceId, PlayerId, PlayerMap, PlayerState,
    GameRng, GameConfig, Phase,
    Action, ActionOutcome, ActionRecord, GameState,
    ActionError, EvolutionFailure, CatalogError, ParseError,
};

pub use crate::cards::{
    CardId, CardDefinition, CardInstance, CardBlueprint,
    CardRegistry, CardKind, Family, CardClass, Cost,
    starter_registry,
};

pub use crate::effects::{Ability, AbilityBonus, AbilityResolver, Effect};

pub use crate::zones::{Zones, MixReport};

pub use crate::rules::{
    RulesEngine, GameResult, ArenaGame, ArenaGameBuilder,
    CombatReport, PhaseTransition, BoardSummary,
};

pub use crate::mcts::{
    MCTSConfig, MCTSSearch, MCTSTree, MCTSNode, NodeId, Edge,
    SearchStats, TreeStats,
    SelectionPolicy, SimulationPolicy, UCB1, RandomSimulation,
};

pub use crate::agents::{Agent, RandomAgent, ScriptedAgent, MctsAgent};

pub use crate::sim::{GameRunner, GameSummary, TurnResult};
