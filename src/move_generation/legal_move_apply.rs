//! In-place make/unmake.
//!
//! `make_move` updates the board, rights, clocks, king cache, Zobrist key and
//! repetition table incrementally and pushes one `UndoState`. `unmake_move`
//! pops it and restores the position bit-for-bit.

use crate::game_state::undo_state::NullMoveUndo;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::chess_move::ChessMove;
use crate::search::zobrist::{castling_rights_key, en_passant_file_key, side_to_move_key};
use crate::utils::algebraic::square_name;

/// Rook `(from, to)` for a castling king landing on `king_to`.
#[inline]
fn castling_rook_squares(king_to: Square) -> (Square, Square) {
    let home = rank_of(king_to);
    if file_of(king_to) == 6 {
        (square_at(7, home), square_at(5, home))
    } else {
        (square_at(0, home), square_at(3, home))
    }
}

#[inline]
fn clear_en_passant(game_state: &mut GameState) {
    if let Some(ep_square) = game_state.en_passant_square.take() {
        game_state.zobrist_key ^= en_passant_file_key(file_of(ep_square));
    }
}

#[inline]
fn flip_side_to_move(game_state: &mut GameState) {
    game_state.side_to_move = game_state.side_to_move.opposite();
    game_state.zobrist_key ^= side_to_move_key();
}

fn move_piece(game_state: &mut GameState, from: Square, to: Square) {
    let Some(piece) = game_state.take_piece(from) else {
        panic!("no piece to move on {}", square_name(from));
    };
    game_state.put_piece(to, piece);
}

fn update_castling_rights(game_state: &mut GameState, mv: ChessMove, mover: Color) {
    let before = game_state.castling_rights;
    if before.is_empty() {
        return;
    }

    let mut after = before;
    if mv.moved_piece == PieceKind::King {
        after.clear_color(mover);
    }
    for side in ALL_CASTLING_SIDES {
        if mv.from == side.rook_home() || mv.to == side.rook_home() {
            after.set(side, false);
        }
    }

    if after != before {
        game_state.zobrist_key ^= castling_rights_key(before) ^ castling_rights_key(after);
        game_state.castling_rights = after;
    }
}

pub fn make_move(game_state: &mut GameState, mv: ChessMove) {
    let mover = game_state.side_to_move;

    game_state.undo_stack.push(UndoState {
        mv,
        prev_castling_rights: game_state.castling_rights,
        prev_en_passant_square: game_state.en_passant_square,
        prev_halfmove_clock: game_state.halfmove_clock,
        prev_fullmove_number: game_state.fullmove_number,
        prev_zobrist_key: game_state.zobrist_key,
    });

    clear_en_passant(game_state);

    if mv.is_capture() {
        game_state.take_piece(mv.capture_square());
    }

    match mv.promotion {
        Some(kind) => {
            game_state.take_piece(mv.from);
            game_state.put_piece(mv.to, Piece::new(mover, kind));
        }
        None => move_piece(game_state, mv.from, mv.to),
    }

    if mv.is_castling() {
        let (rook_from, rook_to) = castling_rook_squares(mv.to);
        move_piece(game_state, rook_from, rook_to);
    }

    update_castling_rights(game_state, mv, mover);

    if mv.is_double_pawn_push() {
        let ep_square = (mv.from + mv.to) / 2;
        game_state.en_passant_square = Some(ep_square);
        game_state.zobrist_key ^= en_passant_file_key(file_of(ep_square));
    }

    if mv.moved_piece == PieceKind::Pawn || mv.is_capture() {
        game_state.halfmove_clock = 0;
    } else {
        game_state.halfmove_clock = game_state.halfmove_clock.saturating_add(1);
    }
    if mover == Color::Dark {
        game_state.fullmove_number = game_state.fullmove_number.saturating_add(1);
    }

    flip_side_to_move(game_state);

    *game_state.repetition_counts.entry(game_state.zobrist_key).or_insert(0) += 1;
}

/// Revert the most recent `make_move`.
///
/// # Panics
///
/// Panics when the history is empty.
pub fn unmake_move(game_state: &mut GameState) -> ChessMove {
    let Some(undo) = game_state.undo_stack.pop() else {
        panic!("unmake_move called with an empty move history");
    };
    let mv = undo.mv;

    if let Some(count) = game_state.repetition_counts.get_mut(&game_state.zobrist_key) {
        *count -= 1;
        if *count == 0 {
            game_state.repetition_counts.remove(&game_state.zobrist_key);
        }
    }

    let mover = game_state.side_to_move.opposite();
    game_state.side_to_move = mover;

    game_state.take_piece(mv.to);
    game_state.put_piece(mv.from, Piece::new(mover, mv.moved_piece));

    if mv.is_castling() {
        let (rook_from, rook_to) = castling_rook_squares(mv.to);
        move_piece(game_state, rook_to, rook_from);
    }

    if let Some(captured) = mv.captured_piece {
        game_state.put_piece(mv.capture_square(), Piece::new(mover.opposite(), captured));
    }

    game_state.castling_rights = undo.prev_castling_rights;
    game_state.en_passant_square = undo.prev_en_passant_square;
    game_state.halfmove_clock = undo.prev_halfmove_clock;
    game_state.fullmove_number = undo.prev_fullmove_number;
    game_state.zobrist_key = undo.prev_zobrist_key;

    mv
}

/// Pass the turn: flip the side to move and drop any en-passant target.
/// The repetition table is left untouched.
pub fn make_null_move(game_state: &mut GameState) -> NullMoveUndo {
    let undo = NullMoveUndo {
        prev_en_passant_square: game_state.en_passant_square,
        prev_zobrist_key: game_state.zobrist_key,
    };
    clear_en_passant(game_state);
    flip_side_to_move(game_state);
    undo
}

pub fn unmake_null_move(game_state: &mut GameState, undo: NullMoveUndo) {
    game_state.side_to_move = game_state.side_to_move.opposite();
    game_state.en_passant_square = undo.prev_en_passant_square;
    game_state.zobrist_key = undo.prev_zobrist_key;
}
