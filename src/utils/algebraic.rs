//! Square conversions for algebraic coordinates (`e4` <-> 28).

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::{file_of, rank_of, square_at, Square};

/// Convert a coordinate such as `"e4"` to a square index.
#[inline]
pub fn algebraic_to_square(square: &str) -> ChessResult<Square> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(ChessError::InvalidSquare(square.to_owned()));
    }

    let file = bytes[0];
    let rank = bytes[1];

    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(ChessError::InvalidSquare(square.to_owned()));
    }

    Ok(square_at(file - b'a', rank - b'1'))
}

#[inline]
pub fn file_char(square: Square) -> char {
    char::from(b'a' + file_of(square))
}

#[inline]
pub fn rank_char(square: Square) -> char {
    char::from(b'1' + rank_of(square))
}

/// Convert a square index (`0..=63`) to its coordinate, for example `"e4"`.
#[inline]
pub fn square_name(square: Square) -> String {
    debug_assert!(square < 64, "square index out of bounds: {square}");
    let mut out = String::with_capacity(2);
    out.push(file_char(square));
    out.push(rank_char(square));
    out
}

#[cfg(test)]
mod tests {
    use super::{algebraic_to_square, square_name};
    use crate::chess_errors::ChessError;

    #[test]
    fn round_trip_square_conversions() {
        assert_eq!(algebraic_to_square("a1").expect("a1 should parse"), 0);
        assert_eq!(algebraic_to_square("h8").expect("h8 should parse"), 63);
        assert_eq!(algebraic_to_square("e4").expect("e4 should parse"), 28);
        assert_eq!(square_name(0), "a1");
        assert_eq!(square_name(63), "h8");
        assert_eq!(square_name(43), "d6");
    }

    #[test]
    fn rejects_off_board_coordinates() {
        for text in ["i1", "a9", "a0", "e", "e44"] {
            assert_eq!(
                algebraic_to_square(text),
                Err(ChessError::InvalidSquare(text.to_owned()))
            );
        }
    }
}
