//! Greedy rule-based agent.

use super::Agent;
use crate::core::{Action, GameState, InstanceId, Phase, PlayerId};
use crate::rules::ArenaGame;

/// Fixed-priority agent used as a sparring partner for search.
///
/// Market: buy the most expensive affordable card (cheapest id on ties).
/// Play: evolve, then play the strongest hand card, then equip, then
/// replace the weakest board card with a stronger hand card, then end.
#[derive(Clone, Debug, Default)]
pub struct ScriptedAgent;

impl ScriptedAgent {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn strength(game: &ArenaGame, state: &GameState, card: InstanceId) -> i32 {
        game.definition(state, card)
            .map_or(0, |def| def.attack + def.health + def.imblocable)
    }

    fn price(game: &ArenaGame, state: &GameState, card: InstanceId) -> u32 {
        game.definition(state, card)
            .map_or(0, |def| def.price(state.cost_tier()))
    }

    fn choose_buy(game: &ArenaGame, state: &GameState, legal: &[Action]) -> Option<Action> {
        legal
            .iter()
            .filter_map(|action| match action {
                Action::Buy(card) => Some((*card, Self::price(game, state, *card))),
                _ => None,
            })
            .max_by(|(a, pa), (b, pb)| pa.cmp(pb).then(b.cmp(a)))
            .map(|(card, _)| Action::Buy(card))
    }

    fn choose_play(game: &ArenaGame, state: &GameState, legal: &[Action]) -> Option<Action> {
        if let Some(evolve) = legal.iter().find(|a| matches!(a, Action::Evolve(_))) {
            return Some(evolve.clone());
        }

        let strongest_play = legal
            .iter()
            .filter_map(|action| match action {
                Action::Play(card) => Some((*card, Self::strength(game, state, *card))),
                _ => None,
            })
            .max_by(|(a, sa), (b, sb)| sa.cmp(sb).then(b.cmp(a)));
        if let Some((card, _)) = strongest_play {
            return Some(Action::Play(card));
        }

        if let Some(equip) = legal.iter().find(|a| matches!(a, Action::Equip { .. })) {
            return Some(equip.clone());
        }

        legal
            .iter()
            .filter_map(|action| match action {
                Action::Replace { new, old } => {
                    let gain = Self::strength(game, state, *new) - Self::strength(game, state, *old);
                    (gain > 0).then_some((action, gain))
                }
                _ => None,
            })
            .max_by_key(|(_, gain)| *gain)
            .map(|(action, _)| action.clone())
    }
}

impl Agent for ScriptedAgent {
    fn name(&self) -> &str {
        "scripted"
    }

    fn choose_action(
        &mut self,
        game: &ArenaGame,
        state: &GameState,
        _player: PlayerId,
        legal: &[Action],
    ) -> Action {
        let choice = match state.phase {
            Phase::Market => Self::choose_buy(game, state, legal),
            Phase::Play => Self::choose_play(game, state, legal),
            Phase::Combat | Phase::End => None,
        };
        choice.unwrap_or(Action::EndPhase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::starter_registry;
    use crate::rules::{ArenaGameBuilder, RulesEngine};

    #[test]
    fn test_buys_most_expensive_affordable() {
        let (game, state) = ArenaGameBuilder::new(starter_registry().unwrap()).build(3);
        let legal = game.legal_actions(&state, PlayerId(0));
        let mut agent = ScriptedAgent::new();

        let action = agent.choose_action(&game, &state, PlayerId(0), &legal);

        let Action::Buy(card) = action else {
            panic!("expected a buy, got {action:?}");
        };
        let bought = ScriptedAgent::price(&game, &state, card);
        let best = game
            .market_summary(&state)
            .iter()
            .map(|entry| entry.price)
            .filter(|&price| price <= state.players[PlayerId(0)].po)
            .max()
            .unwrap();
        assert_eq!(bought, best);
    }

    #[test]
    fn test_ends_phase_when_broke() {
        let (game, mut state) = ArenaGameBuilder::new(starter_registry().unwrap()).build(3);
        state.players[PlayerId(0)].po = 0;
        let legal = game.legal_actions(&state, PlayerId(0));
        let mut agent = ScriptedAgent::new();

        assert_eq!(agent.choose_action(&game, &state, PlayerId(0), &legal), Action::EndPhase);
    }

    #[test]
    fn test_plays_strongest_card() {
        let (game, mut state) = ArenaGameBuilder::new(starter_registry().unwrap()).build(3);
        let market: Vec<_> = state.market().iter().copied().collect();
        for &card in &market {
            state.zones.take_from_market(card);
            state.players[PlayerId(0)].hand.push_back(card);
        }
        state.phase = Phase::Play;

        let legal = game.legal_actions(&state, PlayerId(0));
        let mut agent = ScriptedAgent::new();
        let action = agent.choose_action(&game, &state, PlayerId(0), &legal);

        if let Action::Play(card) = action {
            let best = market
                .iter()
                .filter(|&&c| legal.contains(&Action::Play(c)))
                .map(|&c| ScriptedAgent::strength(&game, &state, c))
                .max()
                .unwrap();
            assert_eq!(ScriptedAgent::strength(&game, &state, card), best);
        } else {
            assert!(matches!(action, Action::Evolve(_) | Action::Equip { .. }));
        }
    }
}
