//! Game state: the single unit of mutation for one game.
//!
//! ## GameState
//!
//! Complete game state:
//! - Players (health, PO, hand, board, elimination)
//! - Turn, phase and buy-order rotation
//! - Shared zones (market, cost-tier decks, special decks, discard)
//! - The card instance arena
//! - RNG, action history and final outcome
//!
//! Every collection is an `im` persistent structure, so `clone()` is O(1)
//! and a search can deep-copy the whole game per simulation.

use im::Vector;

use super::action::{Action, ActionRecord};
use super::entity::InstanceId;
use super::phase::{cost_tier, Phase, FIRST_TURN_PO};
use super::player::{PlayerId, PlayerMap, PlayerState};
use super::rng::GameRng;
use crate::cards::{CardId, CardInstance};
use crate::rules::GameResult;
use crate::zones::Zones;

/// Health every player starts with unless configured otherwise.
pub const DEFAULT_STARTING_HEALTH: i32 = 400;

/// Full game state.
#[derive(Clone, Debug)]
pub struct GameState {
    /// Per-seat state.
    pub players: PlayerMap<PlayerState>,

    /// Turn number (starts at 1).
    pub turn: u32,

    /// Current phase.
    pub phase: Phase,

    /// Order in which players buy during MARKET.
    pub buy_order: Vec<PlayerId>,

    /// Market, decks and discard pile.
    pub zones: Zones,

    /// Card instances, indexed by `InstanceId`.
    cards: Vector<CardInstance>,

    /// Deterministic RNG.
    pub rng: GameRng,

    /// Every successful action, in order.
    pub history: Vector<ActionRecord>,

    /// Set once the game is decided.
    pub outcome: Option<GameResult>,

    /// Action sequence within turn.
    action_sequence: u32,
}

impl GameState {
    /// Create a new game state with default health and first-turn PO.
    ///
    /// Zones start empty; `ArenaGameBuilder` deals the decks.
    #[must_use]
    pub fn new(player_count: usize, seed: u64) -> Self {
        Self {
            players: PlayerMap::new(player_count, |id| {
                PlayerState::new(id, id.to_string(), DEFAULT_STARTING_HEALTH, FIRST_TURN_PO)
            }),
            turn: 1,
            phase: Phase::Market,
            buy_order: PlayerId::all(player_count).collect(),
            zones: Zones::default(),
            cards: Vector::new(),
            rng: GameRng::new(seed),
            history: Vector::new(),
            outcome: None,
            action_sequence: 0,
        }
    }

    /// Get player count.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    /// Iterate over all player IDs.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        PlayerId::all(self.player_count())
    }

    /// Players still in the game, in seat order.
    pub fn alive_players(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.players
            .iter()
            .filter(|(_, p)| p.is_alive())
            .map(|(id, _)| id)
    }

    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.alive_players().count()
    }

    /// Market cost tier for the current turn.
    #[must_use]
    pub fn cost_tier(&self) -> u8 {
        cost_tier(self.turn)
    }

    /// Cards currently purchasable.
    #[must_use]
    pub fn market(&self) -> &Vector<InstanceId> {
        &self.zones.market
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    // === Card Arena ===

    /// Create a new instance of a card definition.
    pub fn alloc_card(&mut self, card_id: CardId) -> InstanceId {
        let id = InstanceId::new(self.cards.len() as u32);
        self.cards.push_back(CardInstance::new(id, card_id));
        id
    }

    /// Get a card instance.
    #[must_use]
    pub fn card(&self, id: InstanceId) -> Option<&CardInstance> {
        self.cards.get(id.index())
    }

    /// Get a mutable card instance.
    pub fn card_mut(&mut self, id: InstanceId) -> Option<&mut CardInstance> {
        self.cards.get_mut(id.index())
    }

    /// Number of instances ever created in this game.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    // === Action History ===

    /// Record an action in history.
    pub fn record_action(&mut self, player: PlayerId, action: Action) {
        let record = ActionRecord::new(player, action, self.turn, self.action_sequence);
        self.action_sequence += 1;
        self.history.push_back(record);
    }

    /// Start a new turn: bump the counter and restart action numbering.
    pub(crate) fn advance_turn(&mut self) {
        self.turn += 1;
        self.action_sequence = 0;
    }

    // === Cloning ===

    /// Clone the game state for a simulation.
    ///
    /// The clone gets its own RNG branch. Takes `&mut self` because forking
    /// the RNG advances the fork counter.
    #[must_use]
    pub fn clone_state(&mut self) -> Self {
        let mut clone = self.clone();
        clone.rng = self.rng.fork();
        clone
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_state_new() {
        let state = GameState::new(3, 42);

        assert_eq!(state.player_count(), 3);
        assert_eq!(state.turn, 1);
        assert_eq!(state.phase, Phase::Market);
        assert_eq!(state.buy_order, vec![PlayerId(0), PlayerId(1), PlayerId(2)]);
        assert_eq!(state.players[PlayerId(1)].health, 400);
        assert_eq!(state.players[PlayerId(1)].po, 4);
        assert!(!state.is_over());
    }

    #[test]
    fn test_alloc_card_sequential() {
        let mut state = GameState::new(2, 42);

        let a = state.alloc_card(CardId::new(3));
        let b = state.alloc_card(CardId::new(3));

        assert_eq!(a, InstanceId(0));
        assert_eq!(b, InstanceId(1));
        assert_eq!(state.card(b).unwrap().card_id, CardId::new(3));
        assert!(state.card(InstanceId(9)).is_none());
    }

    #[test]
    fn test_alive_players() {
        let mut state = GameState::new(4, 42);
        state.players[PlayerId(2)].eliminated = true;

        let alive: Vec<_> = state.alive_players().collect();
        assert_eq!(alive, vec![PlayerId(0), PlayerId(1), PlayerId(3)]);
        assert_eq!(state.alive_count(), 3);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut state = GameState::new(2, 42);
        let card = state.alloc_card(CardId::new(0));
        state.players[PlayerId(0)].hand.push_back(card);

        let mut cloned = state.clone_state();
        cloned.players[PlayerId(0)].take_from_hand(card);
        cloned.players[PlayerId(0)].board.push_back(card);

        assert!(state.players[PlayerId(0)].in_hand(card));
        assert!(cloned.players[PlayerId(0)].on_board(card));
        assert_ne!(state.rng.seed(), cloned.rng.seed());
    }

    #[test]
    fn test_record_action_sequences() {
        let mut state = GameState::new(2, 42);
        state.record_action(PlayerId(0), Action::EndPhase);
        state.record_action(PlayerId(1), Action::EndPhase);
        state.advance_turn();
        state.record_action(PlayerId(0), Action::EndPhase);

        let seqs: Vec<_> = state.history.iter().map(|r| (r.turn, r.sequence)).collect();
        assert_eq!(seqs, vec![(1, 0), (1, 1), (2, 0)]);
    }
}
