//! Integration tests playing whole games through the game loop
use std::str::FromStr;

use bittoe::{
    core::{run_game, Board, GameEndStatus, GamePhase, GameStatus, Player, PlayerMark},
    error::{Error, Result},
    game::tictactoe::{TTTAddr, TTTBoard},
    player::{best_move, MinMaxAi, RandomAi},
};

/// Always answers the top left cell, whether it is free or not.
struct TopLeftOnly;

impl Player<TTTBoard> for TopLeftOnly {
    fn play(&mut self, _b: &TTTBoard) -> Result<TTTAddr> {
        TTTAddr::try_from(0)
    }
}

#[test]
fn illegal_move_ends_game_with_error() {
    let res = run_game::<TTTBoard>(
        Box::new(TopLeftOnly),
        Box::new(MinMaxAi::new(PlayerMark::Naught)),
        PlayerMark::Cross,
    );
    assert!(matches!(res, Err(Error::CellOccupied { position: 0 })));
}

#[test]
fn engine_moves_into_empty_cell_when_every_move_loses() {
    let b = TTTBoard::from_str("xx x o o ").unwrap();
    let action = best_move(&b, PlayerMark::Naught, PlayerMark::Cross).unwrap();
    assert!(b.is_cell_empty(action));
}

#[test]
fn perfect_play_from_start_is_draw() {
    for first in [PlayerMark::Cross, PlayerMark::Naught] {
        let (result, board) = run_game::<TTTBoard>(
            Box::new(MinMaxAi::new(PlayerMark::Cross)),
            Box::new(MinMaxAi::new(PlayerMark::Naught)),
            first,
        )
        .unwrap();
        assert_eq!(result, GameEndStatus::Draw);
        assert!(board.is_full());
    }
}

#[test]
fn parallel_self_play_is_draw() {
    let (result, _) = run_game::<TTTBoard>(
        Box::new(MinMaxAi::new(PlayerMark::Cross).parallel(true)),
        Box::new(MinMaxAi::new(PlayerMark::Naught).parallel(true)),
        PlayerMark::Cross,
    )
    .unwrap();
    assert_eq!(result, GameEndStatus::Draw);
}

#[test]
fn never_loses_to_random_player() {
    for seed in 0..8 {
        for engine in [PlayerMark::Cross, PlayerMark::Naught] {
            let ai = Box::new(MinMaxAi::new(engine));
            let random = Box::new(RandomAi::new(Some(seed)));
            let (result, board) = match engine {
                PlayerMark::Cross => run_game::<TTTBoard>(ai, random, PlayerMark::Naught),
                PlayerMark::Naught => run_game::<TTTBoard>(random, ai, PlayerMark::Cross),
            }
            .unwrap();
            assert_ne!(
                result,
                GameEndStatus::Won(engine.other()),
                "engine {engine} lost with seed {seed}:\n{board}"
            );
        }
    }
}

#[test]
fn blocks_immediate_threat() {
    let b = TTTBoard::from_str("xx  o    ").unwrap();
    let action = best_move(&b, PlayerMark::Naught, PlayerMark::Cross).unwrap();
    assert_eq!(action, TTTAddr::try_from(2).unwrap());
}

#[test]
fn phase_transitions() {
    let b = TTTBoard::from_str("xx oo    ").unwrap();
    assert_eq!(
        GamePhase::after_move(&b, PlayerMark::Naught),
        GamePhase::AwaitingMove(PlayerMark::Cross)
    );
    let won = b.place_mark(TTTAddr::try_from(2).unwrap(), PlayerMark::Cross).unwrap();
    assert_eq!(won.game_status(), GameStatus::Won(PlayerMark::Cross));
    assert_eq!(
        GamePhase::after_move(&won, PlayerMark::Cross),
        GamePhase::GameOver(GameEndStatus::Won(PlayerMark::Cross))
    );
    let draw = TTTBoard::from_str("xoxxoooxx").unwrap();
    assert_eq!(
        GamePhase::after_move(&draw, PlayerMark::Cross),
        GamePhase::GameOver(GameEndStatus::Draw)
    );
}
