//! The arena game: catalog + configuration behind `RulesEngine`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::combat::{resolve_combat, CombatProfile, CombatReport};
use super::engine::{GameResult, RulesEngine};
use super::executor::{self, definition_of};
use super::legal;
use super::turn::{self, PhaseTransition};
use crate::cards::{CardDefinition, CardKind, CardRegistry, Cost};
use crate::core::{
    po_for_turn, Action, ActionError, ActionOutcome, GameConfig, GameState, InstanceId, PlayerId,
};
use crate::effects::{AbilityBonus, AbilityResolver, BoardTotals};
use crate::zones::refresh_market;

/// Read-only view of one player's board for display and logging.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSummary {
    pub player: PlayerId,
    pub name: String,
    pub health: i32,
    pub po: u32,
    pub board_size: usize,
    pub hand_size: usize,
    /// Base stats of board cards and their weapons.
    pub totals: BoardTotals,
    /// Bonuses from abilities.
    pub bonus: AbilityBonus,
    pub eliminated: bool,
}

impl BoardSummary {
    #[must_use]
    pub fn attack(&self) -> i32 {
        self.totals.attack + self.bonus.attack
    }

    #[must_use]
    pub fn defense(&self) -> i32 {
        self.totals.health + self.bonus.health
    }

    #[must_use]
    pub fn imblocable(&self) -> i32 {
        self.totals.imblocable + self.bonus.imblocable
    }
}

/// One purchasable market slot.
#[derive(Clone, Debug, PartialEq)]
pub struct MarketEntry<'r> {
    pub card: InstanceId,
    pub definition: &'r CardDefinition,
    pub price: u32,
}

/// Arena rules over a shared catalog.
#[derive(Clone, Debug)]
pub struct ArenaGame {
    registry: Arc<CardRegistry>,
    config: GameConfig,
}

impl ArenaGame {
    #[must_use]
    pub fn new(registry: Arc<CardRegistry>, config: GameConfig) -> Self {
        Self { registry, config }
    }

    /// The card catalog.
    #[must_use]
    pub fn registry(&self) -> &CardRegistry {
        &self.registry
    }

    /// Shared handle to the catalog.
    #[must_use]
    pub fn shared_registry(&self) -> Arc<CardRegistry> {
        Arc::clone(&self.registry)
    }

    /// Definition behind a card instance.
    #[must_use]
    pub fn definition(&self, state: &GameState, card: InstanceId) -> Option<&CardDefinition> {
        definition_of(&self.registry, state, card)
    }

    /// Ability bonuses of a player's current board.
    #[must_use]
    pub fn resolve_abilities(&self, state: &GameState, player: PlayerId) -> AbilityBonus {
        AbilityResolver::resolve(&self.registry, state, player)
    }

    /// Resolve combat directly, outside the phase machine.
    pub fn resolve_combat(&self, state: &mut GameState) -> CombatReport {
        resolve_combat(&self.registry, state)
    }

    #[must_use]
    pub fn board_summary(&self, state: &GameState, player: PlayerId) -> BoardSummary {
        let seat = &state.players[player];
        BoardSummary {
            player,
            name: seat.name.clone(),
            health: seat.health,
            po: seat.po,
            board_size: seat.board.len(),
            hand_size: seat.hand.len(),
            totals: AbilityResolver::board_totals(&self.registry, state, player),
            bonus: self.resolve_abilities(state, player),
            eliminated: seat.eliminated,
        }
    }

    /// Market contents with current prices, in display order.
    #[must_use]
    pub fn market_summary<'a>(&'a self, state: &GameState) -> Vec<MarketEntry<'a>> {
        let tier = state.cost_tier();
        state
            .market()
            .iter()
            .filter_map(|&card| {
                let definition = self.definition(state, card)?;
                Some(MarketEntry {
                    card,
                    definition,
                    price: definition.price(tier),
                })
            })
            .collect()
    }

    /// Heuristic strength of a seat: attack + defense + remaining health.
    fn strength(&self, state: &GameState, player: PlayerId) -> f64 {
        let seat = &state.players[player];
        if !seat.is_alive() {
            return 0.0;
        }
        let profile = CombatProfile::of(&self.registry, state, player);
        f64::from(profile.attack.max(0) + profile.defense.max(0) + seat.health.max(0))
    }
}

impl RulesEngine for ArenaGame {
    fn config(&self) -> &GameConfig {
        &self.config
    }

    fn legal_actions(&self, state: &GameState, player: PlayerId) -> Vec<Action> {
        legal::legal_actions(&self.registry, &self.config, state, player)
    }

    fn execute(
        &self,
        state: &mut GameState,
        player: PlayerId,
        action: &Action,
    ) -> Result<ActionOutcome, ActionError> {
        executor::execute(&self.registry, &self.config, state, player, action)
    }

    fn advance_phase(&self, state: &mut GameState) -> PhaseTransition {
        turn::advance_phase(&self.registry, &self.config, state)
    }

    fn is_terminal(&self, state: &GameState) -> Option<GameResult> {
        state.outcome
    }

    fn evaluate(&self, state: &GameState, player: PlayerId) -> f64 {
        if let Some(result) = state.outcome {
            return result.value_for(player);
        }
        let total: f64 = state.player_ids().map(|p| self.strength(state, p)).sum();
        if total <= 0.0 {
            return 0.0;
        }
        (self.strength(state, player) / total).clamp(0.0, 1.0)
    }
}

/// Builder for an `ArenaGame` and its opening state.
///
/// ```
/// use arena_sim::cards::starter_registry;
/// use arena_sim::rules::ArenaGameBuilder;
///
/// let registry = starter_registry().unwrap();
/// let (_game, state) = ArenaGameBuilder::new(registry).player_count(3).build(42);
///
/// assert_eq!(state.player_count(), 3);
/// assert_eq!(state.market().len(), 5);
/// ```
pub struct ArenaGameBuilder {
    registry: Arc<CardRegistry>,
    config: GameConfig,
    names: Vec<String>,
}

impl ArenaGameBuilder {
    pub fn new(registry: impl Into<Arc<CardRegistry>>) -> Self {
        Self {
            registry: registry.into(),
            config: GameConfig::default(),
            names: Vec::new(),
        }
    }

    pub fn player_count(mut self, count: usize) -> Self {
        assert!((2..=5).contains(&count), "Player count must be 2-5");
        self.config.player_count = count;
        self
    }

    pub fn copies_per_card(mut self, copies: usize) -> Self {
        self.config.copies_per_card = copies;
        self
    }

    /// Display names by seat; missing seats keep "Player N".
    pub fn names<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the game and initial state.
    pub fn build(self, seed: u64) -> (ArenaGame, GameState) {
        let Self {
            registry,
            config,
            names,
        } = self;
        let mut state = GameState::new(config.player_count, seed);

        for (player, seat) in state.players.iter_mut() {
            seat.health = config.starting_health;
            seat.po = po_for_turn(1);
            if let Some(name) = names.get(player.index()) {
                seat.name.clone_from(name);
            }
        }

        for def in registry.purchasable() {
            for _ in 0..config.copies_per_card {
                let card = state.alloc_card(def.id);
                let deck = match (def.kind, def.cost) {
                    (CardKind::Weapon, _) => &mut state.zones.weapon_deck,
                    (CardKind::Demon, _) => &mut state.zones.demon_deck,
                    (CardKind::Creature, Cost::Fixed(cost)) => state.zones.deck_mut(cost),
                    (CardKind::Creature, Cost::Variable) => state.zones.deck_mut(1),
                };
                deck.push_back(card);
            }
        }

        for deck in &mut state.zones.tier_decks {
            state.rng.shuffle_vector(deck);
        }
        state.rng.shuffle_vector(&mut state.zones.weapon_deck);
        state.rng.shuffle_vector(&mut state.zones.demon_deck);

        refresh_market(&registry, &mut state, &config);

        (ArenaGame::new(registry, config), state)
    }
}
