use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::{is_square_attacked_on_board, CheckPinInfo};
use crate::move_generation::legal_move_shared::{enemy_piece_on, non_king_move_allowed, own_squares_of};
use crate::moves::chess_move::{ChessMove, FLAG_DOUBLE_PAWN_PUSH, FLAG_EN_PASSANT};

pub fn generate_pawn_moves(game_state: &GameState, info: &CheckPinInfo, out: &mut Vec<ChessMove>) {
    let side = game_state.side_to_move;
    let dir = side.pawn_direction();

    for from in own_squares_of(game_state, PieceKind::Pawn) {
        // pushes
        if let Some(one_step) = offset_square(from, 0, dir) {
            if game_state.piece_at(one_step).is_none() {
                if non_king_move_allowed(game_state, info, from, one_step) {
                    push_pawn_move(side, from, one_step, None, 0, out);
                }

                if rank_of(from) == side.pawn_start_rank() {
                    if let Some(two_step) = offset_square(one_step, 0, dir) {
                        if game_state.piece_at(two_step).is_none()
                            && non_king_move_allowed(game_state, info, from, two_step)
                        {
                            out.push(ChessMove::new(
                                from,
                                two_step,
                                PieceKind::Pawn,
                                None,
                                None,
                                FLAG_DOUBLE_PAWN_PUSH,
                            ));
                        }
                    }
                }
            }
        }

        // captures and en passant
        for d_file in [-1i8, 1] {
            let Some(to) = offset_square(from, d_file, dir) else {
                continue;
            };

            if let Some(captured) = enemy_piece_on(game_state, to) {
                if non_king_move_allowed(game_state, info, from, to) {
                    push_pawn_move(side, from, to, Some(captured), 0, out);
                }
            } else if game_state.en_passant_square == Some(to)
                && en_passant_is_safe(game_state, from, to)
            {
                out.push(ChessMove::new(
                    from,
                    to,
                    PieceKind::Pawn,
                    Some(PieceKind::Pawn),
                    None,
                    FLAG_EN_PASSANT,
                ));
            }
        }
    }
}

fn push_pawn_move(
    side: Color,
    from: Square,
    to: Square,
    captured: Option<PieceKind>,
    flags: u8,
    out: &mut Vec<ChessMove>,
) {
    if rank_of(to) == side.promotion_rank() {
        for promo in PROMOTION_PIECE_KINDS {
            out.push(ChessMove::new(from, to, PieceKind::Pawn, captured, Some(promo), flags));
        }
    } else {
        out.push(ChessMove::new(from, to, PieceKind::Pawn, captured, None, flags));
    }
}

/// Play the capture on a scratch board and look at the king. Catches pins of
/// the capturing pawn, horizontal pins through both pawns, and checks the
/// capture fails to resolve.
fn en_passant_is_safe(game_state: &GameState, from: Square, to: Square) -> bool {
    let side = game_state.side_to_move;
    let captured_square = square_at(file_of(to), rank_of(from));
    if game_state.piece_at(captured_square) != Some(Piece::new(side.opposite(), PieceKind::Pawn)) {
        return false;
    }

    let mut board = game_state.board;
    board[from as usize] = None;
    board[captured_square as usize] = None;
    board[to as usize] = Some(Piece::new(side, PieceKind::Pawn));

    !is_square_attacked_on_board(&board, game_state.king_square(side), side.opposite())
}
