//! Arena rules.
//!
//! `RulesEngine` is the seam drivers (the turn runner, MCTS) call through:
//! - Legal actions for each game state (`legal`)
//! - How actions modify state (`executor`)
//! - Simultaneous combat (`combat`)
//! - Phase and turn progression, win/draw conditions (`turn`)
//!
//! `ArenaGame` implements it over a shared `CardRegistry`.

pub mod combat;
pub mod engine;
pub mod executor;
pub mod game;
pub mod legal;
pub mod turn;

pub use combat::{compute_pairs, resolve_combat, CombatProfile, CombatReport, PairDamage};
pub use engine::{GameResult, RulesEngine};
pub use game::{ArenaGame, ArenaGameBuilder, BoardSummary, MarketEntry};
pub use turn::{EndOfTurn, PhaseTransition};
