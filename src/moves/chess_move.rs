//! Value type describing a single ply.
//!
//! A `ChessMove` carries enough context (moved piece, captured piece, flag
//! bits) for `unmake_move` to restore the board; everything else it needs is
//! popped from the `UndoState` log.

use std::fmt;

use crate::game_state::chess_types::{PieceKind, Square};
use crate::utils::algebraic::square_name;

pub const FLAG_CAPTURE: u8 = 1 << 0;
pub const FLAG_EN_PASSANT: u8 = 1 << 1;
pub const FLAG_CASTLING: u8 = 1 << 2;
pub const FLAG_PROMOTION: u8 = 1 << 3;
pub const FLAG_DOUBLE_PAWN_PUSH: u8 = 1 << 4;

#[derive(Debug, Clone, Copy, Eq)]
pub struct ChessMove {
    pub from: Square,
    pub to: Square,
    pub moved_piece: PieceKind,
    pub captured_piece: Option<PieceKind>,
    pub promotion: Option<PieceKind>,
    pub flags: u8,
}

impl ChessMove {
    #[inline]
    pub fn new(
        from: Square,
        to: Square,
        moved_piece: PieceKind,
        captured_piece: Option<PieceKind>,
        promotion: Option<PieceKind>,
        flags: u8,
    ) -> Self {
        let mut flags = flags;
        if captured_piece.is_some() {
            flags |= FLAG_CAPTURE;
        }
        if promotion.is_some() {
            flags |= FLAG_PROMOTION;
        }
        Self {
            from,
            to,
            moved_piece,
            captured_piece,
            promotion,
            flags,
        }
    }

    #[inline]
    pub const fn is_capture(&self) -> bool {
        self.flags & FLAG_CAPTURE != 0
    }

    #[inline]
    pub const fn is_en_passant(&self) -> bool {
        self.flags & FLAG_EN_PASSANT != 0
    }

    #[inline]
    pub const fn is_castling(&self) -> bool {
        self.flags & FLAG_CASTLING != 0
    }

    #[inline]
    pub const fn is_promotion(&self) -> bool {
        self.flags & FLAG_PROMOTION != 0
    }

    #[inline]
    pub const fn is_double_pawn_push(&self) -> bool {
        self.flags & FLAG_DOUBLE_PAWN_PUSH != 0
    }

    #[inline]
    pub const fn is_quiet(&self) -> bool {
        !self.is_capture()
    }

    /// Square of the piece removed by this move, which differs from `to` for en passant.
    #[inline]
    pub const fn capture_square(&self) -> Square {
        if self.is_en_passant() {
            (self.from / 8) * 8 + self.to % 8
        } else {
            self.to
        }
    }
}

impl PartialEq for ChessMove {
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from && self.to == other.to && self.promotion == other.promotion
    }
}

impl std::hash::Hash for ChessMove {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.from.hash(state);
        self.to.hash(state);
        self.promotion.hash(state);
    }
}

/// Long algebraic form (`e2e4`, `e7e8q`).
impl fmt::Display for ChessMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", square_name(self.from), square_name(self.to))?;
        if let Some(promo) = self.promotion {
            write!(f, "{}", promo.fen_char())?;
        }
        Ok(())
    }
}
