use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::{is_square_attacked, is_square_attacked_on_board, CheckPinInfo};
use crate::move_generation::legal_move_shared::{enemy_piece_on, own_piece_on};
use crate::moves::chess_move::{ChessMove, FLAG_CASTLING};
use crate::moves::directions::KING_RAYS;

pub fn generate_king_moves(game_state: &GameState, info: &CheckPinInfo, out: &mut Vec<ChessMove>) {
    let side = game_state.side_to_move;
    let enemy = side.opposite();
    let from = game_state.king_square(side);

    // The king must not shelter behind its own square on a checking ray.
    let mut board = game_state.board;
    board[from as usize] = None;

    for (d_file, d_rank) in KING_RAYS {
        let Some(to) = offset_square(from, d_file, d_rank) else {
            continue;
        };
        if own_piece_on(game_state, to) || is_square_attacked_on_board(&board, to, enemy) {
            continue;
        }
        out.push(ChessMove::new(
            from,
            to,
            PieceKind::King,
            enemy_piece_on(game_state, to),
            None,
            0,
        ));
    }

    if !info.in_check {
        generate_castling_moves(game_state, from, out);
    }
}

fn generate_castling_moves(game_state: &GameState, king_from: Square, out: &mut Vec<ChessMove>) {
    let side = game_state.side_to_move;
    let enemy = side.opposite();
    let home = side.home_rank();

    if king_from != square_at(4, home) {
        return;
    }

    for kingside in [true, false] {
        let castling_side = CastlingSide::for_color(side, kingside);
        if !game_state.castling_rights.has(castling_side) {
            continue;
        }
        if game_state.piece_at(castling_side.rook_home()) != Some(Piece::new(side, PieceKind::Rook)) {
            continue;
        }

        let (empty_files, transit_files): (&[u8], [u8; 2]) = if kingside {
            (&[5, 6], [5, 6])
        } else {
            (&[1, 2, 3], [3, 2])
        };

        let path_clear = empty_files
            .iter()
            .all(|file| game_state.piece_at(square_at(*file, home)).is_none());
        if !path_clear {
            continue;
        }

        let path_safe = transit_files
            .iter()
            .all(|file| !is_square_attacked(game_state, square_at(*file, home), enemy));
        if path_safe {
            out.push(ChessMove::new(
                king_from,
                square_at(transit_files[1], home),
                PieceKind::King,
                None,
                None,
                FLAG_CASTLING,
            ));
        }
    }
}
