use alder_chess::game_state::game_state::GameState;
use alder_chess::move_generation::perft::{perft, perft_divide, perft_multi_threaded, perft_with_breakdown};

const KIWIPETE_FEN: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
const POSITION_3_FEN: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";

fn assert_perft(fen: &str, expected: &[u64]) {
    let mut game = GameState::from_fen(fen).expect("FEN should parse");
    let before = game.get_fen();
    for (idx, nodes) in expected.iter().enumerate() {
        let depth = (idx + 1) as u8;
        assert_eq!(perft(&mut game, depth), *nodes, "{fen} depth {depth}");
    }
    assert_eq!(game.get_fen(), before, "perft must leave the position untouched");
}

#[test]
fn start_position_counts() {
    assert_perft(alder_chess::game_state::chess_rules::STARTING_POSITION_FEN, &[20, 400, 8902]);
}

#[test]
fn kiwipete_counts() {
    assert_perft(KIWIPETE_FEN, &[48, 2039]);
}

#[test]
fn position_3_counts() {
    assert_perft(POSITION_3_FEN, &[14, 191, 2812]);
}

#[test]
fn position_3_breakdown_depth_three() {
    let mut game = GameState::from_fen(POSITION_3_FEN).expect("FEN should parse");
    let counts = perft_with_breakdown(&mut game, 3);
    assert_eq!(counts.nodes, 2812);
    assert_eq!(counts.captures, 209);
    assert_eq!(counts.en_passant, 2);
    assert_eq!(counts.checks, 267);
    assert_eq!(counts.castles, 0);
    assert_eq!(counts.promotions, 0);
}

#[test]
fn threaded_and_divide_agree_with_serial() {
    let game = GameState::from_fen(KIWIPETE_FEN).expect("FEN should parse");
    let serial = perft_with_breakdown(&mut game.clone(), 2);
    assert_eq!(perft_multi_threaded(&game, 2), serial);

    let divided: u64 = perft_divide(&mut game.clone(), 2).iter().map(|(_, nodes)| nodes).sum();
    assert_eq!(divided, serial.nodes);
}
