//! End-to-end rules tests through `ArenaGame`.
//!
//! Cards are dealt by the builder and moved with real actions wherever the
//! scenario allows; only setup shortcuts (putting a known card in hand)
//! touch the state directly.

use arena_sim::cards::{CardClass, CardDefinition, CardRegistry, Family};
use arena_sim::core::{
    Action, ActionError, ActionOutcome, EvolutionFailure, GameConfig, GameState, InstanceId, Phase, PlayerId,
};
use arena_sim::rules::{ArenaGame, ArenaGameBuilder, GameResult, PhaseTransition, RulesEngine};

fn registry() -> CardRegistry {
    let mut registry = CardRegistry::new();
    registry
        .register(CardDefinition::creature("Brute", 1, Family::Beast, CardClass::Warrior, 10, 0))
        .unwrap();
    registry
        .register(CardDefinition::creature("Mur", 1, Family::Undead, CardClass::Guardian, 0, 4))
        .unwrap();
    registry
        .register(CardDefinition::creature("Loup", 1, Family::Beast, CardClass::Warrior, 3, 2))
        .unwrap();
    registry
        .register(CardDefinition::creature("Loup", 1, Family::Beast, CardClass::Warrior, 7, 5).with_tier(2))
        .unwrap();
    registry
        .register(CardDefinition::creature("Fourmi", 1, Family::Swarm, CardClass::Archer, 1, 1))
        .unwrap();
    registry
}

fn build(players: usize, seed: u64) -> (ArenaGame, GameState) {
    ArenaGameBuilder::new(registry())
        .player_count(players)
        .copies_per_card(6)
        .build(seed)
}

/// Pull a fresh copy of `name` out of whatever zone holds it into `player`'s hand.
fn give(game: &ArenaGame, state: &mut GameState, player: PlayerId, name: &str) -> InstanceId {
    let card_id = game.registry().lookup(name, 1).unwrap().id;
    let instance = (0..state.card_count() as u32)
        .map(InstanceId)
        .find(|&id| {
            state.card(id).map(|c| c.card_id) == Some(card_id)
                && (state.zones.take_from_market(id) || take_from_deck(state, id))
        })
        .expect("a dealt copy is still in the supply");
    state.players[player].hand.push_back(instance);
    instance
}

fn take_from_deck(state: &mut GameState, card: InstanceId) -> bool {
    for deck in &mut state.zones.tier_decks {
        if let Some(pos) = deck.index_of(&card) {
            deck.remove(pos);
            return true;
        }
    }
    false
}

fn to_phase(game: &ArenaGame, state: &mut GameState, phase: Phase) -> Vec<PhaseTransition> {
    let mut transitions = Vec::new();
    while state.phase != phase && !state.is_over() {
        transitions.push(game.advance_phase(state));
    }
    transitions
}

// =============================================================================
// Combat
// =============================================================================

#[test]
fn test_ten_attack_against_four_health() {
    let (game, mut state) = build(2, 42);
    to_phase(&game, &mut state, Phase::Play);

    let brute = give(&game, &mut state, PlayerId(0), "Brute");
    let mur = give(&game, &mut state, PlayerId(1), "Mur");
    game.execute(&mut state, PlayerId(0), &Action::Play(brute)).unwrap();
    game.execute(&mut state, PlayerId(1), &Action::Play(mur)).unwrap();

    to_phase(&game, &mut state, Phase::Combat);
    let transition = game.advance_phase(&mut state);

    let PhaseTransition::Combat(report) = transition else {
        panic!("expected combat, got {transition:?}");
    };
    assert_eq!(state.phase, Phase::End);
    assert_eq!(state.players[PlayerId(1)].health, 394);
    assert_eq!(state.players[PlayerId(0)].health, 400);
    assert_eq!(report.total_damage(), 6);
}

#[test]
fn test_combat_elimination_ends_game() {
    let (game, mut state) = build(2, 42);
    to_phase(&game, &mut state, Phase::Play);
    state.players[PlayerId(1)].health = 6;

    let brute = give(&game, &mut state, PlayerId(0), "Brute");
    let mur = give(&game, &mut state, PlayerId(1), "Mur");
    game.execute(&mut state, PlayerId(0), &Action::Play(brute)).unwrap();
    game.execute(&mut state, PlayerId(1), &Action::Play(mur)).unwrap();

    to_phase(&game, &mut state, Phase::End);
    assert!(state.players[PlayerId(1)].eliminated);

    let transition = game.advance_phase(&mut state);

    assert!(transition.is_game_over());
    assert_eq!(game.is_terminal(&state), Some(GameResult::Winner(PlayerId(0))));
    assert_eq!(game.evaluate(&state, PlayerId(0)), 1.0);
    assert_eq!(
        game.execute(&mut state, PlayerId(0), &Action::EndPhase),
        Err(ActionError::GameOver)
    );
    assert!(game.legal_actions(&state, PlayerId(0)).is_empty());
}

// =============================================================================
// Turn flow
// =============================================================================

#[test]
fn test_full_phase_cycle() {
    let (game, mut state) = build(3, 9);
    assert_eq!(state.turn, 1);
    assert_eq!(state.players[PlayerId(0)].po, 4);

    let transitions = to_phase(&game, &mut state, Phase::End);
    assert!(matches!(transitions[0], PhaseTransition::Entered(Phase::Play)));
    assert!(matches!(transitions[1], PhaseTransition::Entered(Phase::Combat)));
    assert!(matches!(transitions[2], PhaseTransition::Combat(_)));

    let PhaseTransition::NewTurn(end) = game.advance_phase(&mut state) else {
        panic!("expected a new turn");
    };
    assert_eq!(end.turn, 1);
    assert_eq!(state.turn, 2);
    assert_eq!(state.phase, Phase::Market);
    assert!(state.players.values().all(|p| p.po == 3));
    assert_eq!(state.buy_order, vec![PlayerId(1), PlayerId(2), PlayerId(0)]);

    // Turn 2 -> 3 keeps the order; 3 -> 4 rotates again.
    to_phase(&game, &mut state, Phase::End);
    game.advance_phase(&mut state);
    assert_eq!(state.turn, 3);
    assert_eq!(state.buy_order, vec![PlayerId(1), PlayerId(2), PlayerId(0)]);
    assert!(state.players.values().all(|p| p.po == 5));

    to_phase(&game, &mut state, Phase::End);
    game.advance_phase(&mut state);
    assert_eq!(state.buy_order, vec![PlayerId(2), PlayerId(0), PlayerId(1)]);
}

#[test]
fn test_unspent_po_does_not_carry_over() {
    let (game, mut state) = build(2, 9);
    state.players[PlayerId(0)].po = 99;

    to_phase(&game, &mut state, Phase::End);
    game.advance_phase(&mut state);

    assert_eq!(state.players[PlayerId(0)].po, 3);
}

#[test]
fn test_turn_cap_is_a_draw() {
    let config = GameConfig::new(2).with_max_turns(2);
    let (game, mut state) = ArenaGameBuilder::new(registry()).config(config).build(1);

    for _ in 0..8 {
        if state.is_over() {
            break;
        }
        game.advance_phase(&mut state);
    }

    assert_eq!(state.turn, 2);
    assert_eq!(state.outcome, Some(GameResult::Draw));
    assert_eq!(game.evaluate(&state, PlayerId(1)), 0.5);
}

#[test]
fn test_actions_rejected_outside_their_phase() {
    let (game, mut state) = build(2, 5);
    let card = give(&game, &mut state, PlayerId(0), "Loup");

    let err = game.execute(&mut state, PlayerId(0), &Action::Play(card)).unwrap_err();
    assert!(matches!(err, ActionError::WrongPhase { phase: Phase::Market, .. }));

    to_phase(&game, &mut state, Phase::Play);
    let market_card = state.market().front().copied().unwrap();
    let err = game.execute(&mut state, PlayerId(0), &Action::Buy(market_card)).unwrap_err();
    assert!(matches!(err, ActionError::WrongPhase { phase: Phase::Play, .. }));
}

#[test]
fn test_buy_spends_po() {
    let (game, mut state) = build(2, 5);
    let entry = game
        .market_summary(&state)
        .into_iter()
        .find(|e| e.price <= 4)
        .unwrap();

    let outcome = game.execute(&mut state, PlayerId(0), &Action::Buy(entry.card)).unwrap();

    assert_eq!(outcome, ActionOutcome::Bought { card: entry.card, cost: entry.price });
    assert_eq!(state.players[PlayerId(0)].po, 4 - entry.price);
    assert!(state.players[PlayerId(0)].in_hand(entry.card));
    assert!(!state.zones.in_market(entry.card));
    assert_eq!(
        game.execute(&mut state, PlayerId(1), &Action::Buy(entry.card)),
        Err(ActionError::InvalidCard(entry.card))
    );
}

// =============================================================================
// Evolution
// =============================================================================

#[test]
fn test_evolution_from_hand_and_board() {
    let (game, mut state) = build(2, 3);
    to_phase(&game, &mut state, Phase::Play);
    let p = PlayerId(0);

    let a = give(&game, &mut state, p, "Loup");
    let b = give(&game, &mut state, p, "Loup");
    let c = give(&game, &mut state, p, "Loup");
    game.execute(&mut state, p, &Action::Play(a)).unwrap();

    assert!(game
        .legal_actions(&state, p)
        .iter()
        .any(|act| matches!(act, Action::Evolve(_))));

    let outcome = game.execute(&mut state, p, &Action::evolve(&[a, b, c])).unwrap();
    let ActionOutcome::Evolved { into, consumed } = outcome else {
        panic!("expected an evolution");
    };

    assert_eq!(consumed.as_slice(), &[a, b, c]);
    assert_eq!(game.definition(&state, into).unwrap().tier, 2);
    assert_eq!(state.players[p].board.len(), 1);
    assert!(state.players[p].hand.is_empty());
    for card in [a, b, c] {
        assert!(state.zones.discard.contains(&card));
    }
}

#[test]
fn test_evolution_needs_exactly_three() {
    let (game, mut state) = build(2, 3);
    to_phase(&game, &mut state, Phase::Play);
    let p = PlayerId(0);
    let cards: Vec<_> = (0..4).map(|_| give(&game, &mut state, p, "Loup")).collect();

    assert_eq!(
        game.execute(&mut state, p, &Action::evolve(&cards[..2])),
        Err(ActionError::EvolutionError(EvolutionFailure::WrongCount(2)))
    );
    assert_eq!(
        game.execute(&mut state, p, &Action::evolve(&cards)),
        Err(ActionError::EvolutionError(EvolutionFailure::WrongCount(4)))
    );
    assert_eq!(state.players[p].hand.len(), 4);
}

#[test]
fn test_evolution_without_tier_two() {
    let (game, mut state) = build(2, 3);
    to_phase(&game, &mut state, Phase::Play);
    let p = PlayerId(0);
    let cards: Vec<_> = (0..3).map(|_| give(&game, &mut state, p, "Mur")).collect();

    assert_eq!(
        game.execute(&mut state, p, &Action::evolve(&cards)),
        Err(ActionError::EvolutionError(EvolutionFailure::NoTier2("Mur".to_string())))
    );
}

// =============================================================================
// Board cap
// =============================================================================

#[test]
fn test_board_cap_and_exempt_family() {
    let config = GameConfig::new(2).with_board_cap(2).with_copies_per_card(8);
    let (game, mut state) = ArenaGameBuilder::new(registry()).config(config).build(4);
    to_phase(&game, &mut state, Phase::Play);
    let p = PlayerId(0);

    for _ in 0..2 {
        let card = give(&game, &mut state, p, "Loup");
        game.execute(&mut state, p, &Action::Play(card)).unwrap();
    }

    let extra = give(&game, &mut state, p, "Mur");
    assert_eq!(
        game.execute(&mut state, p, &Action::Play(extra)),
        Err(ActionError::BoardFull { cap: 2 })
    );

    // Swarm creatures fit past the cap up to their own capacity.
    for _ in 0..4 {
        let ant = give(&game, &mut state, p, "Fourmi");
        game.execute(&mut state, p, &Action::Play(ant)).unwrap();
    }
    let ant = give(&game, &mut state, p, "Fourmi");
    assert!(game.execute(&mut state, p, &Action::Play(ant)).is_err());

    // At the cap a replacement is offered instead.
    let legal = game.legal_actions(&state, p);
    assert!(legal.contains(&Action::Replace {
        new: extra,
        old: state.players[p].board[0],
    }));
    assert!(!legal.contains(&Action::Play(extra)));
}
