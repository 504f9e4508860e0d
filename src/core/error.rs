//! Error types for the arena engine.
//!
//! All errors are local and recoverable by the caller. Action functions fail
//! fast with a specific variant instead of silently doing nothing, so an
//! agent can tell "illegal" apart from "succeeded".

use thiserror::Error;

use super::entity::InstanceId;
use super::phase::Phase;
use super::player::PlayerId;

/// Why an action was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("{action} is not allowed during {phase}")]
    WrongPhase { action: &'static str, phase: Phase },

    #[error("insufficient funds: cost {cost}, available {available}")]
    InsufficientFunds { cost: u32, available: u32 },

    #[error("invalid card: {0}")]
    InvalidCard(InstanceId),

    #[error("board is full ({cap} cards)")]
    BoardFull { cap: usize },

    #[error("evolution failed: {0}")]
    EvolutionError(#[from] EvolutionFailure),

    #[error("{0} already carries a weapon")]
    AlreadyEquipped(InstanceId),

    #[error("{0} has been eliminated")]
    PlayerEliminated(PlayerId),

    #[error("game is over")]
    GameOver,
}

/// Specific reason an evolution was refused.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvolutionFailure {
    #[error("exactly 3 cards required, got {0}")]
    WrongCount(usize),

    #[error("the same instance was given twice: {0}")]
    DuplicateInstance(InstanceId),

    #[error("cards do not share a name")]
    MismatchedNames,

    #[error("{0} is not a tier-1 card")]
    WrongTier(InstanceId),

    #[error("{0} is neither in hand nor on board")]
    NotOwned(InstanceId),

    #[error("no tier-2 version of {0}")]
    NoTier2(String),
}

/// Ability descriptor text that could not be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot parse ability {text:?}: {reason}")]
pub struct ParseError {
    pub text: String,
    pub reason: String,
}

impl ParseError {
    pub(crate) fn new(text: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            reason: reason.into(),
        }
    }
}

/// A card pool that violates catalog invariants.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("creature {name:?} must cost 1-5")]
    InvalidCost { name: String },

    #[error("{name:?} must belong to the {expected} family")]
    WrongFamily { name: String, expected: &'static str },

    #[error("{name:?} needs a class")]
    MissingClass { name: String },

    #[error("{name:?} has tier {tier}, expected 1 or 2")]
    InvalidTier { name: String, tier: u8 },

    #[error("duplicate card {name:?} at tier {tier}")]
    Duplicate { name: String, tier: u8 },

    #[error("unknown {field} {value:?} on {name:?}")]
    UnknownTag {
        name: String,
        field: &'static str,
        value: String,
    },

    #[error("ability on {name:?}: {source}")]
    Ability {
        name: String,
        #[source]
        source: ParseError,
    },
}

pub type ActionResult<T> = std::result::Result<T, ActionError>;
