//! Core incremental board state representation.
//!
//! `GameState` is the central model for the engine. It stores a 64-square
//! mailbox, turn and rights flags, clocks, cached king squares, the cached
//! Zobrist key, and the history stacks used by make/unmake.

use std::collections::HashMap;

use crate::chess_errors::ChessResult;
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply::make_move;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::moves::chess_move::ChessMove;
use crate::search::zobrist::{compute_zobrist_key, piece_square_key};
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;
use crate::utils::long_algebraic::long_algebraic_to_move;

/// Incremental game state mutated in place by `make_move` / `unmake_move`.
#[derive(Debug, Clone)]
pub struct GameState {
    // --- Mailbox, a1 = 0 ---
    pub board: [Option<Piece>; 64],

    // --- Side and state flags ---
    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_square: Option<Square>,

    // --- Clocks / move counters ---
    pub halfmove_clock: u16,
    pub fullmove_number: u16,

    // --- Caches ---
    pub king_squares: [Square; 2],
    pub zobrist_key: u64,

    // --- Make/unmake and repetition support ---
    pub undo_stack: Vec<UndoState>,
    pub repetition_counts: HashMap<u64, u32>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            board: [None; 64],

            side_to_move: Color::Light,
            castling_rights: CastlingRights::NONE,
            en_passant_square: None,

            halfmove_clock: 0,
            fullmove_number: 1,

            king_squares: [0; 2],
            zobrist_key: 0,

            undo_stack: Vec::new(),
            repetition_counts: HashMap::new(),
        }
    }
}

impl GameState {
    /// Empty board with no kings. Only useful as a scratch target for parsers.
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn new_game() -> Self {
        parse_fen(STARTING_POSITION_FEN).expect("starting FEN should always parse")
    }

    #[inline]
    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        parse_fen(fen)
    }

    #[inline]
    pub fn get_fen(&self) -> String {
        generate_fen(self)
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board[square as usize]
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Square {
        self.king_squares[color.index()]
    }

    #[inline]
    pub fn is_in_check(&self) -> bool {
        is_king_in_check(self, self.side_to_move)
    }

    /// Place `piece` on an empty square, keeping the key and king cache current.
    #[inline]
    pub fn put_piece(&mut self, square: Square, piece: Piece) {
        debug_assert!(self.board[square as usize].is_none(), "square {square} is occupied");
        self.board[square as usize] = Some(piece);
        self.zobrist_key ^= piece_square_key(piece, square);
        if piece.kind == PieceKind::King {
            self.king_squares[piece.color.index()] = square;
        }
    }

    /// Remove and return the piece on `square`, keeping the key current.
    #[inline]
    pub fn take_piece(&mut self, square: Square) -> Option<Piece> {
        let piece = self.board[square as usize].take()?;
        self.zobrist_key ^= piece_square_key(piece, square);
        Some(piece)
    }

    pub fn non_king_piece_count(&self) -> u32 {
        self.board
            .iter()
            .flatten()
            .filter(|piece| piece.kind != PieceKind::King)
            .count() as u32
    }

    #[inline]
    pub fn total_piece_count(&self) -> u32 {
        self.board.iter().flatten().count() as u32
    }

    /// How many times the current position has occurred in this game.
    #[inline]
    pub fn repetition_count(&self) -> u32 {
        self.repetition_counts.get(&self.zobrist_key).copied().unwrap_or(0)
    }

    /// Moves applied since the position was constructed.
    #[inline]
    pub fn ply_count(&self) -> usize {
        self.undo_stack.len()
    }

    /// Recompute the cached key from scratch and seed the repetition table
    /// with the current position. Called once after a position is built.
    pub fn reset_derived_state(&mut self) {
        self.zobrist_key = compute_zobrist_key(self);
        self.undo_stack.clear();
        self.repetition_counts.clear();
        self.repetition_counts.insert(self.zobrist_key, 1);
    }

    /// Validate a long-algebraic move (`e2e4`, `e7e8q`) against the legal set
    /// and play it.
    pub fn play_long_algebraic(&mut self, text: &str) -> ChessResult<ChessMove> {
        let mv = long_algebraic_to_move(text, self)?;
        make_move(self, mv);
        Ok(mv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess_errors::ChessError;

    #[test]
    fn new_game_caches_kings_and_seeds_repetition() {
        let game = GameState::new_game();
        assert_eq!(game.king_square(Color::Light), 4);
        assert_eq!(game.king_square(Color::Dark), 60);
        assert_eq!(game.repetition_count(), 1);
        assert_eq!(game.non_king_piece_count(), 30);
        assert_eq!(game.total_piece_count(), 32);
        assert!(!game.is_in_check());
    }

    #[test]
    fn put_and_take_keep_key_consistent() {
        let mut game = GameState::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let before = game.zobrist_key;
        game.put_piece(27, Piece::new(Color::Light, PieceKind::Queen));
        assert_eq!(game.zobrist_key, compute_zobrist_key(&game));
        let taken = game.take_piece(27).expect("queen should be on d4");
        assert_eq!(taken.kind, PieceKind::Queen);
        assert_eq!(game.zobrist_key, before);
        assert!(game.take_piece(27).is_none());
    }

    #[test]
    fn play_long_algebraic_rejects_illegal_input() {
        let mut game = GameState::new_game();
        let mv = game.play_long_algebraic("e2e4").expect("e2e4 should be legal");
        assert_eq!(mv.to_string(), "e2e4");
        assert_eq!(game.side_to_move, Color::Dark);

        assert!(matches!(game.play_long_algebraic("e2e4"), Err(ChessError::IllegalMove(_))));
        assert!(matches!(game.play_long_algebraic("zz"), Err(ChessError::InvalidMoveText(_))));
        assert_eq!(game.ply_count(), 1);
    }
}
