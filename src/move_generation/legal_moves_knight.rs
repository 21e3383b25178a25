use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::CheckPinInfo;
use crate::move_generation::legal_move_shared::{enemy_piece_on, own_piece_on, own_squares_of};
use crate::moves::chess_move::ChessMove;
use crate::moves::directions::KNIGHT_OFFSETS;

pub fn generate_knight_moves(game_state: &GameState, info: &CheckPinInfo, out: &mut Vec<ChessMove>) {
    for from in own_squares_of(game_state, PieceKind::Knight) {
        // A pinned knight can never stay on its pin ray.
        if info.pin_direction(from).is_some() {
            continue;
        }

        for (d_file, d_rank) in KNIGHT_OFFSETS {
            let Some(to) = offset_square(from, d_file, d_rank) else {
                continue;
            };
            if own_piece_on(game_state, to) || info.evasion_mask & (1u64 << to) == 0 {
                continue;
            }
            out.push(ChessMove::new(
                from,
                to,
                PieceKind::Knight,
                enemy_piece_on(game_state, to),
                None,
                0,
            ));
        }
    }
}
