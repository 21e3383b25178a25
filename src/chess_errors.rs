//! Errors used throughout the chess engine.
//!
//! `ChessError` is the single recoverable error type of the crate. It covers
//! malformed input at the boundaries (FEN text, coordinates, move strings,
//! PGN).
//! Broken internal invariants, such as undoing with an empty history or a
//! position without a king, are programming errors and panic instead.

use thiserror::Error;

use crate::game_state::chess_types::Color;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessError {
    #[error("FEN is empty")]
    EmptyFen,

    #[error("FEN has extra trailing fields: {0}")]
    TooManyFenFields(String),

    #[error("board layout must contain 8 ranks, found {0}")]
    WrongRankCount(usize),

    #[error("rank {rank} of the board layout covers {files} files instead of 8")]
    WrongFileCount { rank: usize, files: usize },

    #[error("invalid piece character '{0}' in board layout")]
    InvalidPieceChar(char),

    #[error("invalid side-to-move field: {0}")]
    InvalidSideToMove(String),

    #[error("invalid castling rights character: {0}")]
    InvalidCastlingChar(char),

    #[error("invalid en-passant square: {0}")]
    InvalidEnPassantSquare(String),

    #[error("invalid {field}: {value}")]
    InvalidCounter { field: &'static str, value: String },

    #[error("{0:?} has no king")]
    MissingKing(Color),

    #[error("{0:?} has more than one king")]
    DuplicateKing(Color),

    #[error("invalid algebraic square: {0}")]
    InvalidSquare(String),

    #[error("malformed move text: {0}")]
    InvalidMoveText(String),

    #[error("illegal move in this position: {0}")]
    IllegalMove(String),

    #[error("malformed PGN: {0}")]
    InvalidPgn(String),
}

pub type ChessResult<T> = Result<T, ChessError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_the_offending_token() {
        assert_eq!(
            ChessError::InvalidPieceChar('x').to_string(),
            "invalid piece character 'x' in board layout"
        );
        assert_eq!(
            ChessError::InvalidCounter {
                field: "halfmove clock",
                value: "-3".to_owned()
            }
            .to_string(),
            "invalid halfmove clock: -3"
        );
        assert_eq!(ChessError::MissingKing(Color::Dark).to_string(), "Dark has no king");
    }
}
