//! Legal rook move generation.
//!
//! Castling rook relocation is handled by `legal_move_apply`; this module only
//! emits ordinary rook slides and captures.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::CheckPinInfo;
use crate::move_generation::legal_move_shared::generate_slider_moves;
use crate::moves::chess_move::ChessMove;
use crate::moves::directions::ROOK_DIRECTIONS;

pub fn generate_rook_moves(game_state: &GameState, info: &CheckPinInfo, out: &mut Vec<ChessMove>) {
    generate_slider_moves(game_state, info, PieceKind::Rook, &ROOK_DIRECTIONS, out);
}
