//! Long algebraic move I/O (`e2e4`, `e1g1`, `e7e8q`).
//!
//! Parsing resolves the text against the legal move list, so the returned
//! move carries the full context (moved/captured piece, flags) that
//! `make_move` needs.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_generator::legal_moves;
use crate::moves::chess_move::ChessMove;
use crate::utils::algebraic::algebraic_to_square;

#[inline]
pub fn move_to_long_algebraic(mv: ChessMove) -> String {
    mv.to_string()
}

pub fn long_algebraic_to_move(text: &str, game_state: &GameState) -> ChessResult<ChessMove> {
    let text = text.trim();
    if !text.is_ascii() || (text.len() != 4 && text.len() != 5) {
        return Err(ChessError::InvalidMoveText(text.to_owned()));
    }

    let from = algebraic_to_square(&text[0..2]).map_err(|_| ChessError::InvalidMoveText(text.to_owned()))?;
    let to = algebraic_to_square(&text[2..4]).map_err(|_| ChessError::InvalidMoveText(text.to_owned()))?;
    let promotion = match text.as_bytes().get(4) {
        Some(&ch) => Some(char_to_promotion(ch as char).ok_or_else(|| ChessError::InvalidMoveText(text.to_owned()))?),
        None => None,
    };

    legal_moves(game_state)
        .into_iter()
        .find(|mv| mv.from == from && mv.to == to && mv.promotion == promotion)
        .ok_or_else(|| ChessError::IllegalMove(text.to_owned()))
}

fn char_to_promotion(ch: char) -> Option<PieceKind> {
    match PieceKind::from_fen_char(ch)? {
        PieceKind::Pawn | PieceKind::King => None,
        kind => Some(kind),
    }
}

#[cfg(test)]
mod tests {
    use super::{long_algebraic_to_move, move_to_long_algebraic};
    use crate::chess_errors::ChessError;
    use crate::game_state::chess_types::PieceKind;
    use crate::utils::fen_parser::parse_fen;

    #[test]
    fn long_algebraic_round_trip_simple_move() {
        let game_state = parse_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1").expect("FEN should parse");
        let mv = long_algebraic_to_move("e2e4", &game_state).expect("move should parse");

        assert_eq!(move_to_long_algebraic(mv), "e2e4");
        assert!(mv.is_double_pawn_push());
    }

    #[test]
    fn long_algebraic_round_trip_promotion() {
        let game_state = parse_fen("8/P7/8/8/8/8/8/k6K w - - 0 1").expect("FEN should parse");
        let mv = long_algebraic_to_move("a7a8n", &game_state).expect("move should parse");

        assert_eq!(mv.promotion, Some(PieceKind::Knight));
        assert_eq!(move_to_long_algebraic(mv), "a7a8n");
        assert!(matches!(
            long_algebraic_to_move("a7a8", &game_state),
            Err(ChessError::IllegalMove(_))
        ));
        assert!(matches!(
            long_algebraic_to_move("a7a8k", &game_state),
            Err(ChessError::InvalidMoveText(_))
        ));
    }

    #[test]
    fn long_algebraic_detects_castling_and_en_passant() {
        let castle_state =
            parse_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("FEN should parse");
        let castle_move = long_algebraic_to_move("e1g1", &castle_state).expect("castle should parse");
        assert!(castle_move.is_castling());

        let en_passant_state =
            parse_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").expect("FEN should parse");
        let ep_move = long_algebraic_to_move("e5d6", &en_passant_state).expect("en-passant should parse");
        assert!(ep_move.is_en_passant());
        assert_eq!(ep_move.captured_piece, Some(PieceKind::Pawn));
    }
}
