//! Rule-based draws: fifty-move rule, threefold repetition, and the
//! insufficient-material cases the engine recognises.

use crate::game_state::chess_rules::{FIFTY_MOVE_HALFMOVES, REPETITION_DRAW_COUNT};
use crate::game_state::{chess_types::*, game_state::GameState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawReason {
    FiftyMoveRule,
    ThreefoldRepetition,
    InsufficientMaterial,
}

#[inline]
pub fn is_fifty_move_draw(game_state: &GameState) -> bool {
    game_state.halfmove_clock >= FIFTY_MOVE_HALFMOVES
}

#[inline]
pub fn is_threefold_repetition(game_state: &GameState) -> bool {
    game_state.repetition_count() >= REPETITION_DRAW_COUNT
}

/// K v K, K + one minor v K, and two knights (either side) with nothing else.
/// K+B v K+B on same-colored bishops is not recognised.
pub fn is_insufficient_material(game_state: &GameState) -> bool {
    let mut non_king = game_state
        .board
        .iter()
        .flatten()
        .filter(|piece| piece.kind != PieceKind::King)
        .map(|piece| piece.kind);

    match (non_king.next(), non_king.next(), non_king.next()) {
        (None, _, _) => true,
        (Some(PieceKind::Knight | PieceKind::Bishop), None, _) => true,
        (Some(PieceKind::Knight), Some(PieceKind::Knight), None) => true,
        _ => false,
    }
}

pub fn draw_reason(game_state: &GameState) -> Option<DrawReason> {
    if is_fifty_move_draw(game_state) {
        Some(DrawReason::FiftyMoveRule)
    } else if is_threefold_repetition(game_state) {
        Some(DrawReason::ThreefoldRepetition)
    } else if is_insufficient_material(game_state) {
        Some(DrawReason::InsufficientMaterial)
    } else {
        None
    }
}
