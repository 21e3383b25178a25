//! Standard algebraic notation (`Nbd2`, `exd6 e.p.`, `O-O-O`, `e8=Q#`).

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_apply::make_move;
use crate::move_generation::legal_move_generator::legal_moves;
use crate::moves::chess_move::ChessMove;
use crate::utils::algebraic::{file_char, rank_char, square_name};

/// SAN for `mv`, which must be legal in `game_state`. En passant captures
/// carry a trailing ` e.p.`.
pub fn move_to_san(game_state: &GameState, mv: ChessMove) -> String {
    san_text(game_state, mv, true)
}

/// SAN without the en passant marker, as written in PGN movetext.
pub fn move_to_pgn_san(game_state: &GameState, mv: ChessMove) -> String {
    san_text(game_state, mv, false)
}

/// Resolve a SAN token against the legal moves of `game_state`. Check marks
/// and `!`/`?` annotations are ignored.
pub fn san_to_move(text: &str, game_state: &GameState) -> ChessResult<ChessMove> {
    let wanted = strip_suffixes(text.trim());
    if wanted.is_empty() {
        return Err(ChessError::InvalidMoveText(text.to_owned()));
    }
    let wanted = wanted.replace('0', "O");

    legal_moves(game_state)
        .into_iter()
        .find(|mv| strip_suffixes(&san_text(game_state, *mv, false)) == wanted)
        .ok_or_else(|| ChessError::IllegalMove(text.to_owned()))
}

fn strip_suffixes(text: &str) -> &str {
    text.trim_end_matches(" e.p.")
        .trim_end_matches(|c: char| matches!(c, '+' | '#' | '!' | '?'))
}

fn san_text(game_state: &GameState, mv: ChessMove, en_passant_suffix: bool) -> String {
    let mut out = String::with_capacity(8);

    if mv.is_castling() {
        out.push_str(if file_of(mv.to) > file_of(mv.from) { "O-O" } else { "O-O-O" });
    } else if mv.moved_piece == PieceKind::Pawn {
        if mv.is_capture() {
            out.push(file_char(mv.from));
            out.push('x');
        }
        out.push_str(&square_name(mv.to));
        if let Some(promo) = mv.promotion {
            out.push('=');
            out.push(promo.fen_char().to_ascii_uppercase());
        }
    } else {
        out.push(mv.moved_piece.fen_char().to_ascii_uppercase());
        push_disambiguation(&mut out, game_state, mv);
        if mv.is_capture() {
            out.push('x');
        }
        out.push_str(&square_name(mv.to));
    }

    out.push_str(check_suffix(game_state, mv));

    if en_passant_suffix && mv.is_en_passant() {
        out.push_str(" e.p.");
    }
    out
}

/// File first, then rank, then both when neither alone is unique.
fn push_disambiguation(out: &mut String, game_state: &GameState, mv: ChessMove) {
    let rivals: Vec<Square> = legal_moves(game_state)
        .into_iter()
        .filter(|other| other.moved_piece == mv.moved_piece && other.to == mv.to && other.from != mv.from)
        .map(|other| other.from)
        .collect();

    if rivals.is_empty() {
        return;
    }

    let shares_file = rivals.iter().any(|sq| file_of(*sq) == file_of(mv.from));
    let shares_rank = rivals.iter().any(|sq| rank_of(*sq) == rank_of(mv.from));

    if !shares_file {
        out.push(file_char(mv.from));
    } else if !shares_rank {
        out.push(rank_char(mv.from));
    } else {
        out.push(file_char(mv.from));
        out.push(rank_char(mv.from));
    }
}

fn check_suffix(game_state: &GameState, mv: ChessMove) -> &'static str {
    let mut after = game_state.clone();
    make_move(&mut after, mv);
    if !after.is_in_check() {
        ""
    } else if legal_moves(&after).is_empty() {
        "#"
    } else {
        "+"
    }
}
