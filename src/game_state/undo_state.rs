use crate::game_state::chess_types::*;
use crate::moves::chess_move::ChessMove;

/// Single undo record for `make_move` / `unmake_move`.
#[derive(Debug, Clone, Copy)]
pub struct UndoState {
    pub mv: ChessMove,

    pub prev_castling_rights: CastlingRights,
    pub prev_en_passant_square: Option<Square>,
    pub prev_halfmove_clock: u16,
    pub prev_fullmove_number: u16,

    pub prev_zobrist_key: u64,
}

/// Undo record for a null move (side flip without a piece moving).
#[derive(Debug, Clone, Copy)]
pub struct NullMoveUndo {
    pub prev_en_passant_square: Option<Square>,
    pub prev_zobrist_key: u64,
}
