use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::CheckPinInfo;
use crate::move_generation::legal_move_shared::generate_slider_moves;
use crate::moves::chess_move::ChessMove;
use crate::moves::directions::BISHOP_DIRECTIONS;

pub fn generate_bishop_moves(game_state: &GameState, info: &CheckPinInfo, out: &mut Vec<ChessMove>) {
    generate_slider_moves(game_state, info, PieceKind::Bishop, &BISHOP_DIRECTIONS, out);
}
