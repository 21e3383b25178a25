//! Core value types shared by the board model, rules engine and search.
//!
//! Squares are indexed `0..=63` with `a1 = 0`, `h1 = 7`, `a8 = 56`, so that
//! `square = rank * 8 + file`.

pub use crate::game_state::game_state::GameState;
pub use crate::game_state::undo_state::UndoState;

/// Board square index (`0..=63`).
pub type Square = u8;

/// Side to move. `Light` always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::Light => 0,
            Color::Dark => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::Light => Color::Dark,
            Color::Dark => Color::Light,
        }
    }

    /// Rank delta of a single pawn push.
    #[inline]
    pub const fn pawn_direction(self) -> i8 {
        match self {
            Color::Light => 1,
            Color::Dark => -1,
        }
    }

    #[inline]
    pub const fn home_rank(self) -> u8 {
        match self {
            Color::Light => 0,
            Color::Dark => 7,
        }
    }

    #[inline]
    pub const fn pawn_start_rank(self) -> u8 {
        match self {
            Color::Light => 1,
            Color::Dark => 6,
        }
    }

    #[inline]
    pub const fn promotion_rank(self) -> u8 {
        match self {
            Color::Light => 7,
            Color::Dark => 0,
        }
    }
}

/// Piece kind (color is carried separately by [`Piece`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

pub const PROMOTION_PIECE_KINDS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

impl PieceKind {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    /// Lowercase FEN letter.
    #[inline]
    pub const fn fen_char(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    #[inline]
    pub fn from_fen_char(ch: char) -> Option<Self> {
        match ch.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }
}

/// A colored piece occupying a square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    #[inline]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    /// FEN letter: uppercase for `Light`, lowercase for `Dark`.
    #[inline]
    pub fn fen_char(self) -> char {
        let ch = self.kind.fen_char();
        match self.color {
            Color::Light => ch.to_ascii_uppercase(),
            Color::Dark => ch,
        }
    }

    #[inline]
    pub fn from_fen_char(ch: char) -> Option<Self> {
        let color = if ch.is_ascii_uppercase() {
            Color::Light
        } else if ch.is_ascii_lowercase() {
            Color::Dark
        } else {
            return None;
        };
        PieceKind::from_fen_char(ch).map(|kind| Piece::new(color, kind))
    }
}

/// The four independent castling permissions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CastlingRights {
    pub light_kingside: bool,
    pub light_queenside: bool,
    pub dark_kingside: bool,
    pub dark_queenside: bool,
}

/// One of the four castling permissions, used for hashing and rook bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastlingSide {
    LightKingside,
    LightQueenside,
    DarkKingside,
    DarkQueenside,
}

pub const ALL_CASTLING_SIDES: [CastlingSide; 4] = [
    CastlingSide::LightKingside,
    CastlingSide::LightQueenside,
    CastlingSide::DarkKingside,
    CastlingSide::DarkQueenside,
];

impl CastlingSide {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            CastlingSide::LightKingside => 0,
            CastlingSide::LightQueenside => 1,
            CastlingSide::DarkKingside => 2,
            CastlingSide::DarkQueenside => 3,
        }
    }

    /// Home corner of the rook tied to this right.
    #[inline]
    pub const fn rook_home(self) -> Square {
        match self {
            CastlingSide::LightKingside => 7,
            CastlingSide::LightQueenside => 0,
            CastlingSide::DarkKingside => 63,
            CastlingSide::DarkQueenside => 56,
        }
    }

    #[inline]
    pub const fn for_color(color: Color, kingside: bool) -> Self {
        match (color, kingside) {
            (Color::Light, true) => CastlingSide::LightKingside,
            (Color::Light, false) => CastlingSide::LightQueenside,
            (Color::Dark, true) => CastlingSide::DarkKingside,
            (Color::Dark, false) => CastlingSide::DarkQueenside,
        }
    }
}

impl CastlingRights {
    pub const ALL: CastlingRights = CastlingRights {
        light_kingside: true,
        light_queenside: true,
        dark_kingside: true,
        dark_queenside: true,
    };

    pub const NONE: CastlingRights = CastlingRights {
        light_kingside: false,
        light_queenside: false,
        dark_kingside: false,
        dark_queenside: false,
    };

    #[inline]
    pub const fn has(&self, side: CastlingSide) -> bool {
        match side {
            CastlingSide::LightKingside => self.light_kingside,
            CastlingSide::LightQueenside => self.light_queenside,
            CastlingSide::DarkKingside => self.dark_kingside,
            CastlingSide::DarkQueenside => self.dark_queenside,
        }
    }

    #[inline]
    pub fn set(&mut self, side: CastlingSide, value: bool) {
        match side {
            CastlingSide::LightKingside => self.light_kingside = value,
            CastlingSide::LightQueenside => self.light_queenside = value,
            CastlingSide::DarkKingside => self.dark_kingside = value,
            CastlingSide::DarkQueenside => self.dark_queenside = value,
        }
    }

    #[inline]
    pub fn clear_color(&mut self, color: Color) {
        self.set(CastlingSide::for_color(color, true), false);
        self.set(CastlingSide::for_color(color, false), false);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        *self == CastlingRights::NONE
    }
}

#[inline]
pub const fn square_at(file: u8, rank: u8) -> Square {
    rank * 8 + file
}

#[inline]
pub const fn file_of(square: Square) -> u8 {
    square % 8
}

#[inline]
pub const fn rank_of(square: Square) -> u8 {
    square / 8
}

/// Step `square` by `(d_file, d_rank)`, returning `None` when leaving the board.
#[inline]
pub fn offset_square(square: Square, d_file: i8, d_rank: i8) -> Option<Square> {
    let file = file_of(square) as i8 + d_file;
    let rank = rank_of(square) as i8 + d_rank;
    if (0..8).contains(&file) && (0..8).contains(&rank) {
        Some(square_at(file as u8, rank as u8))
    } else {
        None
    }
}
