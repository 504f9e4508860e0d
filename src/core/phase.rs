//! Turn phases and the per-turn economy.
//!
//! A turn always cycles MARKET → PLAY → COMBAT → END, then the next turn
//! starts in MARKET. The market's price bracket (cost tier) and each player's
//! currency (PO) depend only on the turn number.

use serde::{Deserialize, Serialize};

/// Highest cost tier.
pub const MAX_COST_TIER: u8 = 5;

/// PO granted on the first turn.
pub const FIRST_TURN_PO: u32 = 4;

/// PO never exceeds this.
pub const MAX_PO: u32 = 11;

/// Phase of a turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Players buy from the shared market.
    #[default]
    Market,
    /// Players play, evolve, equip and sacrifice cards.
    Play,
    /// Simultaneous combat between all living players.
    Combat,
    /// Upkeep: per-turn self-damage, termination, deck mixing.
    End,
}

impl Phase {
    /// The phase that follows this one. END wraps to MARKET of the next turn.
    #[must_use]
    pub const fn next(self) -> Phase {
        match self {
            Phase::Market => Phase::Play,
            Phase::Play => Phase::Combat,
            Phase::Combat => Phase::End,
            Phase::End => Phase::Market,
        }
    }

    /// Whether players choose actions other than ending the phase.
    #[must_use]
    pub const fn is_interactive(self) -> bool {
        matches!(self, Phase::Market | Phase::Play)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Market => "MARKET",
            Phase::Play => "PLAY",
            Phase::Combat => "COMBAT",
            Phase::End => "END",
        };
        f.write_str(name)
    }
}

/// Market cost tier for a turn: `min((turn + 1) / 2, 5)`.
///
/// ```
/// use arena_sim::core::cost_tier;
///
/// assert_eq!(cost_tier(1), 1);
/// assert_eq!(cost_tier(2), 1);
/// assert_eq!(cost_tier(3), 2);
/// assert_eq!(cost_tier(12), 5);
/// ```
#[must_use]
pub fn cost_tier(turn: u32) -> u8 {
    ((turn + 1) / 2).min(MAX_COST_TIER as u32) as u8
}

/// PO available to every player on a turn.
///
/// 4 on turn 1, then `min(cost_tier * 2 + 1, 11)`.
///
/// ```
/// use arena_sim::core::po_for_turn;
///
/// assert_eq!(po_for_turn(1), 4);
/// assert_eq!(po_for_turn(3), 5);
/// assert_eq!(po_for_turn(9), 11);
/// ```
#[must_use]
pub fn po_for_turn(turn: u32) -> u32 {
    if turn <= 1 {
        FIRST_TURN_PO
    } else {
        (cost_tier(turn) as u32 * 2 + 1).min(MAX_PO)
    }
}
