//! Players: identifiers, per-player storage and per-player game state.
//!
//! ## PlayerId
//!
//! Type-safe seat index. Games support 2-5 seats; the id type itself only
//! requires fewer than 256.
//!
//! ## PlayerMap
//!
//! Per-player data backed by a `Vec` for O(1) access, indexable by `PlayerId`.
//!
//! ## PlayerState
//!
//! Health, currency, hand and board of one seat. Hand and board hold
//! `InstanceId`s into the game's card arena and are persistent vectors, so
//! cloning a player is O(1).

use im::Vector;
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::entity::InstanceId;

/// Player identifier (0-based seat index).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all player IDs for a game with `player_count` players.
    ///
    /// ```
    /// use arena_sim::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(3).collect();
    /// assert_eq!(players, vec![PlayerId::new(0), PlayerId::new(1), PlayerId::new(2)]);
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-player data storage with O(1) access.
///
/// ```
/// use arena_sim::core::{PlayerId, PlayerMap};
///
/// let mut damage: PlayerMap<i32> = PlayerMap::with_value(3, 0);
/// damage[PlayerId::new(1)] += 6;
///
/// assert_eq!(damage[PlayerId::new(1)], 6);
/// assert_eq!(damage.values().sum::<i32>(), 6);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        let data = (0..player_count as u8).map(|i| factory(PlayerId(i))).collect();

        Self { data }
    }

    /// Create a new PlayerMap with all entries set to the same value.
    pub fn with_value(player_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(player_count, |_| value.clone())
    }

    /// Create a new PlayerMap with default values.
    pub fn with_default(player_count: usize) -> Self
    where
        T: Default,
    {
        Self::new(player_count, |_| T::default())
    }

    /// Get the number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Get a reference to a player's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a player's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over (PlayerId, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over values in seat order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    /// Iterate over all player IDs.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        (0..self.data.len() as u8).map(PlayerId)
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

/// Mutable state of one seat.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerState {
    /// Seat identifier.
    pub id: PlayerId,

    /// Display name.
    pub name: String,

    /// Remaining health. Only decreases, except through explicit heals.
    pub health: i32,

    /// Cards held (unordered multiset of instances).
    pub hand: Vector<InstanceId>,

    /// Cards in play, in play order.
    pub board: Vector<InstanceId>,

    /// Currency available for the current turn.
    pub po: u32,

    /// Set once health drops to zero or below.
    pub eliminated: bool,
}

impl PlayerState {
    /// Create a seat with the given health and currency and empty zones.
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>, health: i32, po: u32) -> Self {
        Self {
            id,
            name: name.into(),
            health,
            hand: Vector::new(),
            board: Vector::new(),
            po,
            eliminated: false,
        }
    }

    /// Still in the game.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        !self.eliminated
    }

    /// Whether the instance is in this player's hand.
    #[must_use]
    pub fn in_hand(&self, card: InstanceId) -> bool {
        self.hand.index_of(&card).is_some()
    }

    /// Whether the instance is on this player's board.
    #[must_use]
    pub fn on_board(&self, card: InstanceId) -> bool {
        self.board.index_of(&card).is_some()
    }

    /// Remove an exact instance from the hand. Returns false if absent.
    pub fn take_from_hand(&mut self, card: InstanceId) -> bool {
        remove_instance(&mut self.hand, card)
    }

    /// Remove an exact instance from the board. Returns false if absent.
    pub fn take_from_board(&mut self, card: InstanceId) -> bool {
        remove_instance(&mut self.board, card)
    }

    /// Apply damage (negative values heal) and update the elimination flag.
    ///
    /// Returns true if this call eliminated the player.
    pub fn apply_damage(&mut self, amount: i32) -> bool {
        self.health -= amount;
        if !self.eliminated && self.health <= 0 {
            self.eliminated = true;
            return true;
        }
        false
    }
}

/// Remove one exact instance id from a zone vector.
pub(crate) fn remove_instance(zone: &mut Vector<InstanceId>, card: InstanceId) -> bool {
    match zone.index_of(&card) {
        Some(pos) => {
            zone.remove(pos);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_basics() {
        let p0 = PlayerId::new(0);
        let p1 = PlayerId::new(1);

        assert_eq!(p0.index(), 0);
        assert_eq!(p1.index(), 1);
        assert_eq!(format!("{}", p1), "Player 1");
    }

    #[test]
    fn test_player_map_new_and_iter() {
        let map: PlayerMap<i32> = PlayerMap::new(3, |p| p.index() as i32 * 10);

        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs[0], (PlayerId::new(0), &0));
        assert_eq!(pairs[2], (PlayerId::new(2), &20));
        assert_eq!(map.player_count(), 3);
    }

    #[test]
    fn test_player_map_mutation() {
        let mut map: PlayerMap<i32> = PlayerMap::with_default(2);

        map[PlayerId::new(0)] = 10;
        for (_, v) in map.iter_mut() {
            *v += 1;
        }

        assert_eq!(map[PlayerId::new(0)], 11);
        assert_eq!(map[PlayerId::new(1)], 1);
    }

    #[test]
    fn test_player_map_serialization() {
        let map: PlayerMap<i32> = PlayerMap::new(2, |p| p.index() as i32 + 1);
        let json = serde_json::to_string(&map).unwrap();
        let deserialized: PlayerMap<i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, deserialized);
    }

    #[test]
    #[should_panic(expected = "Must have at least 1 player")]
    fn test_player_map_zero_players() {
        let _: PlayerMap<i32> = PlayerMap::with_value(0, 0);
    }

    #[test]
    fn test_take_exact_instance() {
        let mut player = PlayerState::new(PlayerId::new(0), "A", 400, 4);
        player.hand.push_back(InstanceId(3));
        player.hand.push_back(InstanceId(4));

        assert!(player.take_from_hand(InstanceId(4)));
        assert!(!player.take_from_hand(InstanceId(4)));
        assert!(player.in_hand(InstanceId(3)));
        assert_eq!(player.hand.len(), 1);
    }

    #[test]
    fn test_apply_damage_eliminates_once() {
        let mut player = PlayerState::new(PlayerId::new(1), "B", 10, 4);

        assert!(!player.apply_damage(4));
        assert_eq!(player.health, 6);
        assert!(player.apply_damage(6));
        assert!(player.eliminated);
        assert!(!player.apply_damage(1));
        assert_eq!(player.health, -1);
    }
}
