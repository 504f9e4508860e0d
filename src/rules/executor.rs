//! Action validation and application.
//!
//! Every action is checked against the phase, the acting player's zones and
//! the catalog before anything is mutated, so a failed action leaves the
//! state untouched.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::cards::{CardDefinition, CardRegistry};
use crate::core::action::{Action, ActionOutcome, EvolveSet};
use crate::core::config::GameConfig;
use crate::core::entity::InstanceId;
use crate::core::error::{ActionError, ActionResult, EvolutionFailure};
use crate::core::player::PlayerId;
use crate::core::state::GameState;

/// Definition behind an instance id.
pub(crate) fn definition_of<'r>(
    registry: &'r CardRegistry,
    state: &GameState,
    card: InstanceId,
) -> Option<&'r CardDefinition> {
    state.card(card).and_then(|c| registry.get(c.card_id))
}

fn require_definition<'r>(
    registry: &'r CardRegistry,
    state: &GameState,
    card: InstanceId,
) -> ActionResult<&'r CardDefinition> {
    definition_of(registry, state, card).ok_or(ActionError::InvalidCard(card))
}

/// Whether `def` can be played onto `player`'s board right now.
pub(crate) fn has_board_space(
    registry: &CardRegistry,
    config: &GameConfig,
    state: &GameState,
    player: PlayerId,
    def: &CardDefinition,
) -> bool {
    if def.is_demon() {
        return true;
    }

    let board: SmallVec<[&CardDefinition; 12]> = state.players[player]
        .board
        .iter()
        .filter_map(|&id| definition_of(registry, state, id))
        .collect();

    let occupied = board.iter().filter(|d| !d.is_demon()).count();
    if occupied < config.board_cap {
        return true;
    }

    match config.cap_exempt_family {
        Some(family) if def.family == family => {
            let exempt = board.iter().filter(|d| d.family == family).count();
            exempt < config.exempt_family_capacity
        }
        _ => false,
    }
}

/// Validate and apply `action` for `player`.
pub fn execute(
    registry: &CardRegistry,
    config: &GameConfig,
    state: &mut GameState,
    player: PlayerId,
    action: &Action,
) -> ActionResult<ActionOutcome> {
    if state.is_over() {
        return Err(ActionError::GameOver);
    }
    if !state.players[player].is_alive() {
        return Err(ActionError::PlayerEliminated(player));
    }
    if let Some(phase) = action.phase() {
        if phase != state.phase {
            return Err(ActionError::WrongPhase {
                action: action.kind(),
                phase: state.phase,
            });
        }
    }

    let outcome = match action {
        Action::Buy(card) => buy(registry, state, player, *card)?,
        Action::Play(card) => play(registry, config, state, player, *card)?,
        Action::Replace { new, old } => replace(registry, state, player, *new, *old)?,
        Action::Evolve(cards) => evolve(registry, state, player, cards)?,
        Action::Equip { weapon, target } => equip(registry, state, player, *weapon, *target)?,
        Action::Sacrifice(card) => sacrifice(state, player, *card)?,
        Action::EndPhase => ActionOutcome::PhaseEnded { phase: state.phase },
    };

    state.record_action(player, action.clone());
    Ok(outcome)
}

fn buy(
    registry: &CardRegistry,
    state: &mut GameState,
    player: PlayerId,
    card: InstanceId,
) -> ActionResult<ActionOutcome> {
    if !state.zones.in_market(card) {
        return Err(ActionError::InvalidCard(card));
    }
    let cost = require_definition(registry, state, card)?.price(state.cost_tier());
    let available = state.players[player].po;
    if cost > available {
        return Err(ActionError::InsufficientFunds { cost, available });
    }

    state.zones.take_from_market(card);
    let seat = &mut state.players[player];
    seat.po -= cost;
    seat.hand.push_back(card);

    Ok(ActionOutcome::Bought { card, cost })
}

fn play(
    registry: &CardRegistry,
    config: &GameConfig,
    state: &mut GameState,
    player: PlayerId,
    card: InstanceId,
) -> ActionResult<ActionOutcome> {
    if !state.players[player].in_hand(card) {
        return Err(ActionError::InvalidCard(card));
    }
    let def = require_definition(registry, state, card)?;
    if def.is_weapon() {
        return Err(ActionError::InvalidCard(card));
    }
    if !has_board_space(registry, config, state, player, def) {
        return Err(ActionError::BoardFull {
            cap: config.board_cap,
        });
    }

    let seat = &mut state.players[player];
    seat.take_from_hand(card);
    seat.board.push_back(card);

    Ok(ActionOutcome::Played { card })
}

/// Detach the weapon carried by `card` (if any) back to the owner's hand.
fn detach_weapon(state: &mut GameState, player: PlayerId, card: InstanceId) -> Option<InstanceId> {
    let weapon = state.card_mut(card).and_then(|c| c.equipped.take())?;
    state.players[player].hand.push_back(weapon);
    Some(weapon)
}

fn replace(
    registry: &CardRegistry,
    state: &mut GameState,
    player: PlayerId,
    new: InstanceId,
    old: InstanceId,
) -> ActionResult<ActionOutcome> {
    if !state.players[player].in_hand(new) || require_definition(registry, state, new)?.is_weapon() {
        return Err(ActionError::InvalidCard(new));
    }
    let Some(slot) = state.players[player].board.index_of(&old) else {
        return Err(ActionError::InvalidCard(old));
    };

    let seat = &mut state.players[player];
    seat.take_from_hand(new);
    seat.board.set(slot, new);
    seat.hand.push_back(old);
    detach_weapon(state, player, old);

    Ok(ActionOutcome::Replaced { new, old })
}

fn evolve(
    registry: &CardRegistry,
    state: &mut GameState,
    player: PlayerId,
    cards: &EvolveSet,
) -> ActionResult<ActionOutcome> {
    if cards.len() != 3 {
        return Err(EvolutionFailure::WrongCount(cards.len()).into());
    }

    let mut seen = FxHashSet::default();
    for &card in cards {
        if !seen.insert(card) {
            return Err(EvolutionFailure::DuplicateInstance(card).into());
        }
    }

    let seat = &state.players[player];
    let mut name: Option<&str> = None;
    for &card in cards {
        if !seat.in_hand(card) && !seat.on_board(card) {
            return Err(EvolutionFailure::NotOwned(card).into());
        }
        let def = require_definition(registry, state, card)?;
        match name {
            Some(n) if n != def.name => return Err(EvolutionFailure::MismatchedNames.into()),
            _ => name = Some(def.name.as_str()),
        }
        if def.tier != 1 {
            return Err(EvolutionFailure::WrongTier(card).into());
        }
    }

    let name = name.unwrap_or_default();
    let evolved = registry
        .evolution_of(name)
        .ok_or_else(|| EvolutionFailure::NoTier2(name.to_string()))?
        .id;

    for &card in cards {
        let seat = &mut state.players[player];
        if !seat.take_from_hand(card) {
            seat.take_from_board(card);
        }
        detach_weapon(state, player, card);
    }

    let into = state.alloc_card(evolved);
    state.players[player].board.push_back(into);
    state.zones.discard(cards.iter().copied());

    Ok(ActionOutcome::Evolved {
        into,
        consumed: cards.clone(),
    })
}

fn equip(
    registry: &CardRegistry,
    state: &mut GameState,
    player: PlayerId,
    weapon: InstanceId,
    target: InstanceId,
) -> ActionResult<ActionOutcome> {
    let seat = &state.players[player];
    if !seat.in_hand(weapon) || !require_definition(registry, state, weapon)?.is_weapon() {
        return Err(ActionError::InvalidCard(weapon));
    }
    if !seat.on_board(target) || !require_definition(registry, state, target)?.is_creature() {
        return Err(ActionError::InvalidCard(target));
    }

    let Some(carrier) = state.card_mut(target) else {
        return Err(ActionError::InvalidCard(target));
    };
    if carrier.is_equipped() {
        return Err(ActionError::AlreadyEquipped(target));
    }
    carrier.equipped = Some(weapon);
    state.players[player].take_from_hand(weapon);

    Ok(ActionOutcome::Equipped { weapon, target })
}

fn sacrifice(state: &mut GameState, player: PlayerId, card: InstanceId) -> ActionResult<ActionOutcome> {
    if !state.players[player].take_from_board(card) {
        return Err(ActionError::InvalidCard(card));
    }
    let weapon = state.card_mut(card).and_then(|c| c.equipped.take());
    state.zones.discard(std::iter::once(card).chain(weapon));

    Ok(ActionOutcome::Sacrificed { card, weapon })
}
