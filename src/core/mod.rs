//! Core engine types: instances, players, phases, state, actions, errors,
//! RNG and configuration.

pub mod action;
pub mod config;
pub mod entity;
pub mod error;
pub mod phase;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{Action, ActionOutcome, ActionRecord, EvolveSet};
pub use config::GameConfig;
pub use entity::InstanceId;
pub use error::{ActionError, ActionResult, CatalogError, EvolutionFailure, ParseError};
pub use phase::{cost_tier, po_for_turn, Phase, FIRST_TURN_PO, MAX_COST_TIER, MAX_PO};
pub use player::{PlayerId, PlayerMap, PlayerState};
pub use rng::GameRng;
pub use state::{GameState, DEFAULT_STARTING_HEALTH};
