//! Player intents and their outcomes.
//!
//! An `Action` names a verb and the exact card instances it touches. Because
//! every copy has its own `InstanceId`, an action against a cloned state
//! refers to the same physical copies as against the original.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::entity::InstanceId;
use super::phase::Phase;
use super::player::PlayerId;

/// The three instances consumed by an evolution.
pub type EvolveSet = SmallVec<[InstanceId; 3]>;

/// A single player intent.
///
/// ```
/// use arena_sim::core::{Action, InstanceId, Phase};
///
/// let buy = Action::Buy(InstanceId(5));
/// assert_eq!(buy.phase(), Some(Phase::Market));
///
/// let evolve = Action::evolve(&[InstanceId(1), InstanceId(2), InstanceId(3)]);
/// assert_eq!(evolve.phase(), Some(Phase::Play));
/// assert_eq!(Action::EndPhase.phase(), None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Buy a card from the market.
    Buy(InstanceId),
    /// Move a card from hand to board.
    Play(InstanceId),
    /// Put a hand card on the board in place of a board card.
    Replace { new: InstanceId, old: InstanceId },
    /// Combine three tier-1 copies of the same card into its tier-2 version.
    Evolve(EvolveSet),
    /// Attach a weapon from hand to a board creature.
    Equip { weapon: InstanceId, target: InstanceId },
    /// Send a board card (and its weapon) to the discard pile.
    Sacrifice(InstanceId),
    /// Done acting in the current phase.
    EndPhase,
}

impl Action {
    /// Build an evolve action from a slice of instances.
    #[must_use]
    pub fn evolve(cards: &[InstanceId]) -> Self {
        Action::Evolve(SmallVec::from_slice(cards))
    }

    /// The only phase in which this action is legal (`None` = any phase).
    #[must_use]
    pub fn phase(&self) -> Option<Phase> {
        match self {
            Action::Buy(_) => Some(Phase::Market),
            Action::Play(_)
            | Action::Replace { .. }
            | Action::Evolve(_)
            | Action::Equip { .. }
            | Action::Sacrifice(_) => Some(Phase::Play),
            Action::EndPhase => None,
        }
    }

    /// Short verb for logging.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Action::Buy(_) => "buy",
            Action::Play(_) => "play",
            Action::Replace { .. } => "replace",
            Action::Evolve(_) => "evolve",
            Action::Equip { .. } => "equip",
            Action::Sacrifice(_) => "sacrifice",
            Action::EndPhase => "end_phase",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Buy(card) => write!(f, "buy {card}"),
            Action::Play(card) => write!(f, "play {card}"),
            Action::Replace { new, old } => write!(f, "replace {old} with {new}"),
            Action::Evolve(cards) => {
                write!(f, "evolve")?;
                for card in cards {
                    write!(f, " {card}")?;
                }
                Ok(())
            }
            Action::Equip { weapon, target } => write!(f, "equip {weapon} on {target}"),
            Action::Sacrifice(card) => write!(f, "sacrifice {card}"),
            Action::EndPhase => write!(f, "end phase"),
        }
    }
}

/// What a successful action did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionOutcome {
    Bought { card: InstanceId, cost: u32 },
    Played { card: InstanceId },
    Replaced { new: InstanceId, old: InstanceId },
    Evolved { into: InstanceId, consumed: EvolveSet },
    Equipped { weapon: InstanceId, target: InstanceId },
    Sacrificed { card: InstanceId, weapon: Option<InstanceId> },
    PhaseEnded { phase: Phase },
}

/// A recorded action with metadata for history tracking.
///
/// Used for:
/// - Replay/debugging
/// - Per-game statistics consumers
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who took this action.
    pub player: PlayerId,

    /// The action taken.
    pub action: Action,

    /// Turn number when action was taken.
    pub turn: u32,

    /// Sequence number within the turn (for ordering).
    pub sequence: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(player: PlayerId, action: Action, turn: u32, sequence: u32) -> Self {
        Self {
            player,
            action,
            turn,
            sequence,
        }
    }
}
