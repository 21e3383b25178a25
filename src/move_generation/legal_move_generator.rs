//! Full legal move generation pipeline.
//!
//! One check/pin scan from the side-to-move king feeds every piece
//! generator, so each emitted move is legal without a make/test/unmake pass.
//! Game-ending conditions are reported separately by [`game_status`].

use crate::game_state::game_state::GameState;
use crate::move_generation::draw_rules::{draw_reason, DrawReason};
use crate::move_generation::legal_move_checks::find_checks_and_pins;
use crate::move_generation::legal_moves_bishop::generate_bishop_moves;
use crate::move_generation::legal_moves_king::generate_king_moves;
use crate::move_generation::legal_moves_knight::generate_knight_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_queen::generate_queen_moves;
use crate::move_generation::legal_moves_rook::generate_rook_moves;
use crate::moves::chess_move::ChessMove;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Checkmate,
    Stalemate,
    Draw(DrawReason),
}

impl GameStatus {
    #[inline]
    pub fn is_terminal(self) -> bool {
        self != GameStatus::Ongoing
    }
}

/// Every legal move for the side to move, in a deterministic order
/// (king, pawns, knights, bishops, rooks, queens; ascending origin square).
pub fn legal_moves(game_state: &GameState) -> Vec<ChessMove> {
    let info = find_checks_and_pins(game_state);
    let mut out = Vec::with_capacity(64);

    generate_king_moves(game_state, &info, &mut out);
    if info.is_double_check() {
        return out;
    }

    generate_pawn_moves(game_state, &info, &mut out);
    generate_knight_moves(game_state, &info, &mut out);
    generate_bishop_moves(game_state, &info, &mut out);
    generate_rook_moves(game_state, &info, &mut out);
    generate_queen_moves(game_state, &info, &mut out);

    out
}

/// Classify the position. Checkmate and stalemate take precedence over rule
/// draws, so a mating move on the hundredth half-move still wins.
pub fn game_status(game_state: &GameState) -> GameStatus {
    if legal_moves(game_state).is_empty() {
        return if game_state.is_in_check() {
            GameStatus::Checkmate
        } else {
            GameStatus::Stalemate
        };
    }

    match draw_reason(game_state) {
        Some(reason) => GameStatus::Draw(reason),
        None => GameStatus::Ongoing,
    }
}
