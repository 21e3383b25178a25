//! Positional bonus tables.
//!
//! Each table is laid out as printed on a diagram from Light's side: row 0 is
//! rank 8, row 7 is rank 1, column 0 is the a-file. Dark pieces read the
//! vertically mirrored row.

use crate::game_state::chess_types::*;

pub type PieceSquareTable = [[i32; 8]; 8];

pub const PAWN_TABLE: PieceSquareTable = [
    [0, 0, 0, 0, 0, 0, 0, 0],
    [50, 50, 50, 50, 50, 50, 50, 50],
    [10, 10, 20, 30, 30, 20, 10, 10],
    [5, 5, 10, 25, 25, 10, 5, 5],
    [0, 0, 0, 20, 20, 0, 0, 0],
    [5, -5, -10, 0, 0, -10, -5, 5],
    [5, 10, 10, -20, -20, 10, 10, 5],
    [0, 0, 0, 0, 0, 0, 0, 0],
];

pub const KNIGHT_TABLE: PieceSquareTable = [
    [-50, -40, -30, -30, -30, -30, -40, -50],
    [-40, -20, 0, 0, 0, 0, -20, -40],
    [-30, 0, 10, 15, 15, 10, 0, -30],
    [-30, 5, 15, 20, 20, 15, 5, -30],
    [-30, 0, 15, 20, 20, 15, 0, -30],
    [-30, 5, 10, 15, 15, 10, 5, -30],
    [-40, -20, 0, 5, 5, 0, -20, -40],
    [-50, -40, -30, -30, -30, -30, -40, -50],
];

pub const BISHOP_TABLE: PieceSquareTable = [
    [-20, -10, -10, -10, -10, -10, -10, -20],
    [-10, 0, 0, 0, 0, 0, 0, -10],
    [-10, 0, 5, 5, 5, 5, 0, -10],
    [-10, 0, 5, 10, 10, 5, 0, -10],
    [-10, 0, 5, 10, 10, 5, 0, -10],
    [-10, 0, 5, 5, 5, 5, 0, -10],
    [-10, 0, 0, 0, 0, 0, 0, -10],
    [-20, -10, -10, -10, -10, -10, -10, -20],
];

pub const ROOK_TABLE: PieceSquareTable = [
    [0, 0, 0, 0, 0, 0, 0, 0],
    [20, 20, 20, 20, 20, 20, 20, 10],
    [-10, -5, -5, -5, -5, -5, -5, -10],
    [-10, -5, -5, 0, 0, -5, -5, -10],
    [-10, -5, -5, 0, 0, -5, -5, -10],
    [-10, -5, -5, -5, -5, -5, -5, -10],
    [-10, -5, -5, -5, -5, -5, -5, -10],
    [0, 0, 10, 10, 10, 10, 10, 0],
];

pub const QUEEN_TABLE: PieceSquareTable = [
    [-20, -10, -5, 0, 0, 0, -10, -20],
    [-10, 0, 5, 10, 10, 5, 0, -10],
    [-5, 5, 15, 20, 20, 15, 5, -5],
    [0, 10, 20, 20, 20, 20, 10, 0],
    [0, 10, 20, 20, 20, 20, 10, 0],
    [-5, 5, 15, 20, 20, 15, 5, -5],
    [-10, 0, 5, 10, 10, 5, 0, -10],
    [-20, -10, -5, 0, 0, 0, -10, -20],
];

pub const KING_MIDGAME_TABLE: PieceSquareTable = [
    [-80, -70, -70, -70, -70, -70, -70, -80],
    [-60, -60, -60, -60, -60, -60, -60, -60],
    [-40, -50, -50, -60, -60, -50, -50, -40],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-20, -30, -30, -40, -40, -30, -30, -20],
    [-10, -20, -20, -20, -20, -20, -20, -10],
    [20, 20, -5, -5, -5, -5, 20, 20],
    [20, 30, 10, 0, 0, 10, 30, 20],
];

pub const KING_ENDGAME_TABLE: PieceSquareTable = [
    [-20, -10, -10, -10, -10, -10, -10, -20],
    [-5, 0, 5, 5, 5, 5, 0, -5],
    [-10, -5, 20, 30, 30, 20, -5, -10],
    [-15, -10, 35, 45, 45, 35, -10, -15],
    [-20, -15, 30, 40, 40, 30, -15, -20],
    [-25, -20, 20, 25, 25, 20, -20, -25],
    [-30, -25, 0, 0, 0, 0, -25, -30],
    [-50, -30, -30, -30, -30, -30, -30, -50],
];

/// Table lookup for `color` standing on `square`.
#[inline]
pub fn table_value(table: &PieceSquareTable, color: Color, square: Square) -> i32 {
    let row = match color {
        Color::Light => 7 - rank_of(square),
        Color::Dark => rank_of(square),
    };
    table[row as usize][file_of(square) as usize]
}

/// Table for every piece except the king, which blends two tables.
#[inline]
pub fn table_for(kind: PieceKind) -> &'static PieceSquareTable {
    match kind {
        PieceKind::Pawn => &PAWN_TABLE,
        PieceKind::Knight => &KNIGHT_TABLE,
        PieceKind::Bishop => &BISHOP_TABLE,
        PieceKind::Rook => &ROOK_TABLE,
        PieceKind::Queen => &QUEEN_TABLE,
        PieceKind::King => &KING_MIDGAME_TABLE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dark_reads_the_mirrored_row() {
        // e2 for Light and e7 for Dark are the same relative square.
        assert_eq!(table_value(&PAWN_TABLE, Color::Light, 12), -20);
        assert_eq!(table_value(&PAWN_TABLE, Color::Dark, 52), -20);
        // Seventh-rank pawns.
        assert_eq!(table_value(&PAWN_TABLE, Color::Light, 52), 50);
        assert_eq!(table_value(&PAWN_TABLE, Color::Dark, 12), 50);
        // Castled king on g1 / g8.
        assert_eq!(table_value(&KING_MIDGAME_TABLE, Color::Light, 6), 30);
        assert_eq!(table_value(&KING_MIDGAME_TABLE, Color::Dark, 62), 30);
    }
}
