//! Game configuration.
//!
//! Rules constants that a balance study may want to vary live here rather
//! than in the engine. Defaults reproduce the standard game.

use serde::{Deserialize, Serialize};

use crate::cards::Family;

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of seats (2-5).
    pub player_count: usize,

    /// Health every player starts with.
    pub starting_health: i32,

    /// Maximum non-demon cards on a board.
    pub board_cap: usize,

    /// Family whose cards may exceed the board cap.
    pub cap_exempt_family: Option<Family>,

    /// Cards of the exempt family may still be played over the cap while
    /// fewer than this many of them are on the board.
    pub exempt_family_capacity: usize,

    /// Copies of each tier-1 card shuffled into the decks.
    pub copies_per_card: usize,

    /// Creature slots the market is topped up to.
    pub market_size: usize,

    /// Reveal a weapon every N turns (0 disables).
    pub weapon_reveal_every: u32,

    /// Reveal a demon every N turns (0 disables).
    pub demon_reveal_every: u32,

    /// Deck mixing only happens before this turn.
    pub mixing_turn_limit: u32,

    /// Last turn played before the game is declared a draw.
    pub max_turns: u32,

    /// Safety bound on actions one player may take in a single phase.
    pub max_actions_per_phase: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_count: 2,
            starting_health: 400,
            board_cap: 8,
            cap_exempt_family: Some(Family::Swarm),
            exempt_family_capacity: 4,
            copies_per_card: 5,
            market_size: 5,
            weapon_reveal_every: 3,
            demon_reveal_every: 4,
            mixing_turn_limit: 10,
            max_turns: 40,
            max_actions_per_phase: 20,
        }
    }
}

impl GameConfig {
    /// Create a configuration for the given number of players.
    pub fn new(player_count: usize) -> Self {
        assert!(
            (2..=5).contains(&player_count),
            "Player count must be 2-5"
        );

        Self {
            player_count,
            ..Self::default()
        }
    }

    /// Set the starting health.
    #[must_use]
    pub fn with_starting_health(mut self, health: i32) -> Self {
        self.starting_health = health;
        self
    }

    /// Set the board cap.
    #[must_use]
    pub fn with_board_cap(mut self, cap: usize) -> Self {
        self.board_cap = cap;
        self
    }

    /// Set copies per card.
    #[must_use]
    pub fn with_copies_per_card(mut self, copies: usize) -> Self {
        self.copies_per_card = copies;
        self
    }

    /// Set the turn ceiling.
    #[must_use]
    pub fn with_max_turns(mut self, turns: u32) -> Self {
        self.max_turns = turns;
        self
    }

    /// Set the special reveal intervals (0 disables).
    #[must_use]
    pub fn with_reveals(mut self, weapon_every: u32, demon_every: u32) -> Self {
        self.weapon_reveal_every = weapon_every;
        self.demon_reveal_every = demon_every;
        self
    }
}
