//! N-Player capability verification tests.
//!
//! These tests verify that the engine has no hidden 2-player assumptions
//! and works for every supported table size (2 to 5 seats).

use arena_sim::agents::{Agent, RandomAgent, ScriptedAgent};
use arena_sim::cards::starter_registry;
use arena_sim::core::{Action, GameState, Phase, PlayerId, PlayerMap};
use arena_sim::rules::{ArenaGameBuilder, GameResult, PhaseTransition, RulesEngine};
use arena_sim::sim::GameRunner;

/// Test that GameState correctly handles every table size.
#[test]
fn test_game_state_player_counts() {
    for player_count in 2..=5 {
        let (_, state) = ArenaGameBuilder::new(starter_registry().unwrap())
            .player_count(player_count)
            .build(42);

        assert_eq!(state.player_count(), player_count);
        assert_eq!(state.buy_order.len(), player_count);
        assert_eq!(state.alive_count(), player_count);
        for player in PlayerId::all(player_count) {
            assert_eq!(state.players[player].health, 400);
            assert_eq!(state.players[player].po, 4);
        }
    }
}

#[test]
#[should_panic(expected = "Player count must be 2-5")]
fn test_six_players_rejected() {
    let _ = ArenaGameBuilder::new(starter_registry().unwrap()).player_count(6);
}

/// Test that PlayerMap stays indexed by seat for any count.
#[test]
fn test_player_map_n_players() {
    let mut map: PlayerMap<i32> = PlayerMap::with_value(5, 0);
    for player in PlayerId::all(5) {
        map[player] = (player.0 as i32 + 1) * 10;
    }

    assert_eq!(map.values().copied().collect::<Vec<_>>(), vec![10, 20, 30, 40, 50]);
}

/// Test that combat pairs every alive player with every other one.
#[test]
fn test_combat_pairs_scale_with_table() {
    for player_count in 2..=5 {
        let (game, mut state) = ArenaGameBuilder::new(starter_registry().unwrap())
            .player_count(player_count)
            .build(3);

        while state.phase != Phase::Combat {
            game.advance_phase(&mut state);
        }
        let PhaseTransition::Combat(report) = game.advance_phase(&mut state) else {
            panic!("expected combat");
        };

        assert_eq!(report.pairs.len(), player_count * (player_count - 1));
    }
}

/// Test that the buy order rotates through every seat over a full cycle.
#[test]
fn test_buy_order_rotation_n_players() {
    let (game, mut state) = ArenaGameBuilder::new(starter_registry().unwrap())
        .player_count(4)
        .build(8);

    let mut first_buyers = Vec::new();
    while first_buyers.len() < 4 {
        if state.turn % 2 == 0 || state.turn == 1 {
            first_buyers.push(state.buy_order[0]);
        }
        let turn = state.turn;
        while state.turn == turn {
            game.advance_phase(&mut state);
        }
    }

    assert_eq!(first_buyers, vec![PlayerId(0), PlayerId(1), PlayerId(2), PlayerId(3)]);
}

/// Test that eliminated players neither act nor get attacked.
#[test]
fn test_eliminated_player_is_skipped() {
    let (game, mut state) = ArenaGameBuilder::new(starter_registry().unwrap())
        .player_count(4)
        .build(5);
    state.players[PlayerId(2)].eliminated = true;

    assert!(game.legal_actions(&state, PlayerId(2)).is_empty());
    assert!(game.execute(&mut state, PlayerId(2), &Action::EndPhase).is_err());

    while state.phase != Phase::Combat {
        game.advance_phase(&mut state);
    }
    let PhaseTransition::Combat(report) = game.advance_phase(&mut state) else {
        panic!("expected combat");
    };
    assert_eq!(report.pairs.len(), 6);
    assert!(report
        .pairs
        .iter()
        .all(|p| p.attacker != PlayerId(2) && p.defender != PlayerId(2)));
}

/// Test that last-player-standing works at every table size.
#[test]
fn test_last_standing_wins() {
    for player_count in 2..=5 {
        let (game, mut state) = ArenaGameBuilder::new(starter_registry().unwrap())
            .player_count(player_count)
            .build(1);
        let winner = PlayerId((player_count - 1) as u8);
        for player in PlayerId::all(player_count).filter(|&p| p != winner) {
            state.players[player].eliminated = true;
        }

        assert_eq!(game.is_terminal(&state), None);
        while !state.is_over() {
            game.advance_phase(&mut state);
        }

        assert_eq!(state.outcome, Some(GameResult::Winner(winner)));
    }
}

/// Test full games with mixed agents at every table size.
#[test]
fn test_full_games_all_sizes() {
    for player_count in 2..=5 {
        let (game, state) = ArenaGameBuilder::new(starter_registry().unwrap())
            .player_count(player_count)
            .build(player_count as u64);
        let agents: Vec<Box<dyn Agent>> = (0..player_count)
            .map(|seat| -> Box<dyn Agent> {
                if seat % 2 == 0 {
                    Box::new(ScriptedAgent::new())
                } else {
                    Box::new(RandomAgent::new(seat as u64))
                }
            })
            .collect();

        let mut runner = GameRunner::new(game, state, agents);
        let summary = runner.run_game().unwrap();

        assert!(summary.turns <= runner.game().config().max_turns);
        assert_eq!(summary.final_health.player_count(), player_count);
        let final_state: &GameState = runner.state();
        match summary.result {
            GameResult::Winner(winner) => assert!(final_state.players[winner].is_alive()),
            GameResult::Draw => {}
        }
    }
}
