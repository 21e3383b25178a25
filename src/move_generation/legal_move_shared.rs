use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::CheckPinInfo;
use crate::moves::chess_move::ChessMove;

#[inline]
pub fn enemy_piece_on(game_state: &GameState, square: Square) -> Option<PieceKind> {
    game_state
        .piece_at(square)
        .filter(|piece| piece.color != game_state.side_to_move)
        .map(|piece| piece.kind)
}

#[inline]
pub fn own_piece_on(game_state: &GameState, square: Square) -> bool {
    game_state
        .piece_at(square)
        .is_some_and(|piece| piece.color == game_state.side_to_move)
}

/// Squares of the side to move holding `kind`, in ascending order.
pub fn own_squares_of(game_state: &GameState, kind: PieceKind) -> impl Iterator<Item = Square> + '_ {
    let wanted = Piece::new(game_state.side_to_move, kind);
    game_state
        .board
        .iter()
        .enumerate()
        .filter(move |(_, slot)| **slot == Some(wanted))
        .map(|(sq, _)| sq as Square)
}

/// True when `to` lies on the ray leaving `king` in `direction`.
#[inline]
pub fn is_on_ray(king: Square, to: Square, direction: (i8, i8)) -> bool {
    let d_file = file_of(to) as i8 - file_of(king) as i8;
    let d_rank = rank_of(to) as i8 - rank_of(king) as i8;
    let steps = if direction.0 != 0 {
        d_file / direction.0
    } else {
        d_rank / direction.1
    };
    steps > 0 && d_file == steps * direction.0 && d_rank == steps * direction.1
}

/// Pin and single-check filter for every non-king move.
#[inline]
pub fn non_king_move_allowed(game_state: &GameState, info: &CheckPinInfo, from: Square, to: Square) -> bool {
    if info.evasion_mask & (1u64 << to) == 0 {
        return false;
    }
    match info.pin_direction(from) {
        Some(direction) => is_on_ray(game_state.king_square(game_state.side_to_move), to, direction),
        None => true,
    }
}

/// Walk each direction from every `kind` piece of the side to move, stopping
/// at the first occupied square.
pub fn generate_slider_moves(
    game_state: &GameState,
    info: &CheckPinInfo,
    kind: PieceKind,
    directions: &[(i8, i8)],
    out: &mut Vec<ChessMove>,
) {
    for from in own_squares_of(game_state, kind) {
        for &(d_file, d_rank) in directions {
            let mut current = from;
            while let Some(to) = offset_square(current, d_file, d_rank) {
                current = to;
                if own_piece_on(game_state, to) {
                    break;
                }
                let captured = enemy_piece_on(game_state, to);
                if non_king_move_allowed(game_state, info, from, to) {
                    out.push(ChessMove::new(from, to, kind, captured, None, 0));
                }
                if captured.is_some() {
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::is_on_ray;

    #[test]
    fn ray_membership_requires_forward_alignment() {
        // King e1 (4), diagonal towards b4.
        assert!(is_on_ray(4, 11, (-1, 1)));
        assert!(is_on_ray(4, 25, (-1, 1)));
        assert!(!is_on_ray(4, 13, (-1, 1)));
        assert!(!is_on_ray(4, 3, (-1, 1)));
        // Vertical ray from e1.
        assert!(is_on_ray(4, 60, (0, 1)));
        assert!(!is_on_ray(4, 61, (0, 1)));
    }
}
