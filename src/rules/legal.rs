//! Legal action enumeration.
//!
//! Lists only actions the executor would accept. Identical copies (same
//! definition) in hand or market yield one action, which keeps the branching
//! factor small for search.

use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use super::executor::{definition_of, has_board_space};
use crate::cards::CardRegistry;
use crate::core::action::Action;
use crate::core::config::GameConfig;
use crate::core::entity::InstanceId;
use crate::core::phase::Phase;
use crate::core::player::PlayerId;
use crate::core::state::GameState;

/// All legal actions for `player`. Always ends with `EndPhase` unless the
/// player cannot act at all.
pub fn legal_actions(
    registry: &CardRegistry,
    config: &GameConfig,
    state: &GameState,
    player: PlayerId,
) -> Vec<Action> {
    if state.is_over() || !state.players[player].is_alive() {
        return Vec::new();
    }

    let mut actions = Vec::new();
    match state.phase {
        Phase::Market => buy_actions(registry, state, player, &mut actions),
        Phase::Play => {
            play_actions(registry, config, state, player, &mut actions);
            replace_actions(registry, config, state, player, &mut actions);
            evolve_actions(registry, state, player, &mut actions);
            equip_actions(registry, state, player, &mut actions);
            actions.extend(state.players[player].board.iter().map(|&c| Action::Sacrifice(c)));
        }
        Phase::Combat | Phase::End => {}
    }
    actions.push(Action::EndPhase);
    actions
}

fn buy_actions(registry: &CardRegistry, state: &GameState, player: PlayerId, out: &mut Vec<Action>) {
    let po = state.players[player].po;
    let tier = state.cost_tier();
    let mut seen = FxHashSet::default();

    for &card in state.market() {
        let Some(def) = definition_of(registry, state, card) else { continue };
        if def.price(tier) <= po && seen.insert(def.id) {
            out.push(Action::Buy(card));
        }
    }
}

fn play_actions(
    registry: &CardRegistry,
    config: &GameConfig,
    state: &GameState,
    player: PlayerId,
    out: &mut Vec<Action>,
) {
    let mut seen = FxHashSet::default();
    for &card in &state.players[player].hand {
        let Some(def) = definition_of(registry, state, card) else { continue };
        if def.is_weapon() || !seen.insert(def.id) {
            continue;
        }
        if has_board_space(registry, config, state, player, def) {
            out.push(Action::Play(card));
        }
    }
}

fn replace_actions(
    registry: &CardRegistry,
    config: &GameConfig,
    state: &GameState,
    player: PlayerId,
    out: &mut Vec<Action>,
) {
    let seat = &state.players[player];
    let occupied = seat
        .board
        .iter()
        .filter_map(|&c| definition_of(registry, state, c))
        .filter(|d| !d.is_demon())
        .count();
    if occupied < config.board_cap {
        return;
    }

    let mut seen = FxHashSet::default();
    for &new in &seat.hand {
        let Some(def) = definition_of(registry, state, new) else { continue };
        if def.is_weapon() || !seen.insert(def.id) {
            continue;
        }
        out.extend(seat.board.iter().map(|&old| Action::Replace { new, old }));
    }
}

fn evolve_actions(registry: &CardRegistry, state: &GameState, player: PlayerId, out: &mut Vec<Action>) {
    let seat = &state.players[player];
    let mut groups: Vec<(&str, SmallVec<[InstanceId; 3]>)> = Vec::new();
    let mut index: FxHashMap<&str, usize> = FxHashMap::default();

    for &card in seat.hand.iter().chain(seat.board.iter()) {
        let Some(def) = definition_of(registry, state, card) else { continue };
        if def.tier != 1 {
            continue;
        }
        let slot = *index.entry(def.name.as_str()).or_insert_with(|| {
            groups.push((def.name.as_str(), SmallVec::new()));
            groups.len() - 1
        });
        let copies = &mut groups[slot].1;
        if copies.len() < 3 {
            copies.push(card);
        }
    }

    for (name, copies) in groups {
        if copies.len() == 3 && registry.evolution_of(name).is_some() {
            out.push(Action::Evolve(copies));
        }
    }
}

fn equip_actions(registry: &CardRegistry, state: &GameState, player: PlayerId, out: &mut Vec<Action>) {
    let seat = &state.players[player];
    let targets: SmallVec<[InstanceId; 8]> = seat
        .board
        .iter()
        .copied()
        .filter(|&c| {
            let free = state.card(c).is_some_and(|card| !card.is_equipped());
            free && definition_of(registry, state, c).is_some_and(|d| d.is_creature())
        })
        .collect();
    if targets.is_empty() {
        return;
    }

    let mut seen = FxHashSet::default();
    for &weapon in &seat.hand {
        let Some(def) = definition_of(registry, state, weapon) else { continue };
        if def.is_weapon() && seen.insert(def.id) {
            out.extend(targets.iter().map(|&target| Action::Equip { weapon, target }));
        }
    }
}
