use std::collections::BTreeSet;

use alder_chess::game_state::game_state::GameState;
use alder_chess::move_generation::legal_move_apply::unmake_move;
use alder_chess::move_generation::legal_move_generator::{game_status, legal_moves, GameStatus};
use alder_chess::search::iterative_deepening::find_best_move;
use alder_chess::search::zobrist::compute_zobrist_key;
use alder_chess::utils::pgn::movetext;

#[test]
fn open_game_reaches_expected_position() {
    let mut game = GameState::new_game();
    let played: Vec<_> = ["e2e4", "e7e5", "g1f3"]
        .iter()
        .map(|lan| game.play_long_algebraic(lan).expect("move should be legal"))
        .collect();

    assert_eq!(game.get_fen(), "rnbqkbnr/pppp1ppp/8/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 1 2");
    assert_eq!(game.zobrist_key, compute_zobrist_key(&game));
    assert_eq!(game_status(&game), GameStatus::Ongoing);

    let names: BTreeSet<String> = legal_moves(&game).iter().map(|mv| mv.to_string()).collect();
    let expected: BTreeSet<String> = [
        "a7a6", "a7a5", "b7b6", "b7b5", "c7c6", "c7c5", "d7d6", "d7d5", "f7f6", "f7f5", "g7g6", "g7g5", "h7h6",
        "h7h5", "b8a6", "b8c6", "g8e7", "g8f6", "g8h6", "f8e7", "f8d6", "f8c5", "f8b4", "f8a3", "d8e7", "d8f6",
        "d8g5", "d8h4", "e8e7",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    assert_eq!(names, expected);

    assert_eq!(
        movetext(&GameState::new_game(), &played).expect("moves are legal"),
        "1. e4 e5 2. Nf3"
    );

    for _ in 0..3 {
        unmake_move(&mut game);
    }
    assert_eq!(game.get_fen(), GameState::new_game().get_fen());
}

#[test]
fn engine_reply_is_legal_and_position_is_unchanged() {
    let mut game = GameState::new_game();
    for lan in ["e2e4", "e7e5", "g1f3"] {
        game.play_long_algebraic(lan).expect("move should be legal");
    }
    let fen = game.get_fen();
    let moves = legal_moves(&game);
    let reply = find_best_move(&mut game, &moves, 3).expect("Black has moves");
    assert!(moves.contains(&reply));
    assert_eq!(game.get_fen(), fen);
}

#[test]
fn knight_shuffle_repeats_into_a_draw() {
    let mut game = GameState::new_game();
    for lan in ["g1f3", "g8f6", "f3g1", "f6g8", "g1f3", "g8f6", "f3g1", "f6g8"] {
        assert_eq!(game_status(&game), GameStatus::Ongoing);
        game.play_long_algebraic(lan).expect("move should be legal");
    }
    assert!(matches!(game_status(&game), GameStatus::Draw(_)));
    assert!(!legal_moves(&game).is_empty());
}
