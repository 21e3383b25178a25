//! Attack queries and the check/pin scan that backs legality filtering.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::directions::{is_orthogonal, KING_RAYS, KNIGHT_OFFSETS};

pub type Board = [Option<Piece>; 64];

/// An own piece that may only move along `direction` (a ray from the king).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pin {
    pub square: Square,
    pub direction: (i8, i8),
}

/// Result of one scan outward from the side-to-move king.
#[derive(Debug, Clone, Default)]
pub struct CheckPinInfo {
    pub in_check: bool,
    pub pins: Vec<Pin>,
    pub checkers: Vec<Square>,
    /// Squares a non-king move must land on to resolve a single check
    /// (the checker plus the squares between it and the king). All ones when
    /// not in check.
    pub evasion_mask: u64,
}

impl CheckPinInfo {
    #[inline]
    pub fn is_double_check(&self) -> bool {
        self.checkers.len() >= 2
    }

    #[inline]
    pub fn pin_direction(&self, square: Square) -> Option<(i8, i8)> {
        self.pins
            .iter()
            .find(|pin| pin.square == square)
            .map(|pin| pin.direction)
    }
}

#[inline]
fn slider_hits_along(piece: Piece, direction: (i8, i8)) -> bool {
    match piece.kind {
        PieceKind::Queen => true,
        PieceKind::Rook => is_orthogonal(direction),
        PieceKind::Bishop => !is_orthogonal(direction),
        _ => false,
    }
}

/// Attack test against an explicit board, used directly by en-passant
/// simulation and king-move checks.
pub fn is_square_attacked_on_board(board: &Board, square: Square, attacker_color: Color) -> bool {
    // Pawns attack diagonally forward, so look one rank behind the target.
    for d_file in [-1i8, 1] {
        if let Some(from) = offset_square(square, d_file, -attacker_color.pawn_direction()) {
            if board[from as usize] == Some(Piece::new(attacker_color, PieceKind::Pawn)) {
                return true;
            }
        }
    }

    for (d_file, d_rank) in KNIGHT_OFFSETS {
        if let Some(from) = offset_square(square, d_file, d_rank) {
            if board[from as usize] == Some(Piece::new(attacker_color, PieceKind::Knight)) {
                return true;
            }
        }
    }

    for (d_file, d_rank) in KING_RAYS {
        if let Some(from) = offset_square(square, d_file, d_rank) {
            if board[from as usize] == Some(Piece::new(attacker_color, PieceKind::King)) {
                return true;
            }
        }
    }

    for direction in KING_RAYS {
        let mut current = square;
        while let Some(next) = offset_square(current, direction.0, direction.1) {
            if let Some(piece) = board[next as usize] {
                if piece.color == attacker_color && slider_hits_along(piece, direction) {
                    return true;
                }
                break;
            }
            current = next;
        }
    }

    false
}

#[inline]
pub fn is_square_attacked(game_state: &GameState, square: Square, attacker_color: Color) -> bool {
    is_square_attacked_on_board(&game_state.board, square, attacker_color)
}

#[inline]
pub fn is_king_in_check(game_state: &GameState, color: Color) -> bool {
    is_square_attacked(game_state, game_state.king_square(color), color.opposite())
}

/// Single pass from the side-to-move king: eight rays for slider checks and
/// pins, then knight and pawn contact checks.
pub fn find_checks_and_pins(game_state: &GameState) -> CheckPinInfo {
    let side = game_state.side_to_move;
    let enemy = side.opposite();
    let king = game_state.king_square(side);

    let mut info = CheckPinInfo::default();
    let mut evasion_mask = 0u64;

    for direction in KING_RAYS {
        let mut ray_mask = 0u64;
        let mut shield: Option<Square> = None;
        let mut current = king;

        while let Some(next) = offset_square(current, direction.0, direction.1) {
            current = next;
            ray_mask |= 1u64 << next;

            let Some(piece) = game_state.board[next as usize] else {
                continue;
            };

            if piece.color == side {
                if shield.is_some() {
                    break;
                }
                shield = Some(next);
                continue;
            }

            if slider_hits_along(piece, direction) {
                match shield {
                    Some(square) => info.pins.push(Pin { square, direction }),
                    None => {
                        info.checkers.push(next);
                        evasion_mask |= ray_mask;
                    }
                }
            }
            break;
        }
    }

    for (d_file, d_rank) in KNIGHT_OFFSETS {
        if let Some(from) = offset_square(king, d_file, d_rank) {
            if game_state.board[from as usize] == Some(Piece::new(enemy, PieceKind::Knight)) {
                info.checkers.push(from);
                evasion_mask |= 1u64 << from;
            }
        }
    }

    for d_file in [-1i8, 1] {
        if let Some(from) = offset_square(king, d_file, side.pawn_direction()) {
            if game_state.board[from as usize] == Some(Piece::new(enemy, PieceKind::Pawn)) {
                info.checkers.push(from);
                evasion_mask |= 1u64 << from;
            }
        }
    }

    info.in_check = !info.checkers.is_empty();
    info.evasion_mask = if info.in_check { evasion_mask } else { u64::MAX };
    info
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::algebraic::algebraic_to_square;

    fn sq(name: &str) -> Square {
        algebraic_to_square(name).expect("valid square")
    }

    #[test]
    fn starting_position_has_no_checks_or_pins() {
        let game = GameState::new_game();
        let info = find_checks_and_pins(&game);
        assert!(!info.in_check);
        assert!(info.pins.is_empty());
        assert_eq!(info.evasion_mask, u64::MAX);
    }

    #[test]
    fn detects_rook_check_with_blocking_squares() {
        let game = GameState::from_fen("4r1k1/8/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let info = find_checks_and_pins(&game);
        assert!(info.in_check);
        assert_eq!(info.checkers, vec![sq("e8")]);
        for name in ["e2", "e5", "e7", "e8"] {
            assert_ne!(info.evasion_mask & (1u64 << sq(name)), 0, "{name}");
        }
        assert_eq!(info.evasion_mask & (1u64 << sq("d2")), 0);
    }

    #[test]
    fn detects_bishop_pin_and_knight_check() {
        // Knight on d2 pinned by the b4 bishop; f3 knight checks.
        let game = GameState::from_fen("4k3/8/8/8/1b6/5n2/3N4/4K3 w - - 0 1").expect("FEN should parse");
        let info = find_checks_and_pins(&game);
        assert_eq!(info.pins, vec![Pin { square: sq("d2"), direction: (-1, 1) }]);
        assert_eq!(info.checkers, vec![sq("f3")]);
        assert!(!info.is_double_check());
    }

    #[test]
    fn detects_double_check() {
        let game = GameState::from_fen("4k3/8/8/8/8/3n4/8/r3K3 w - - 0 1").expect("FEN should parse");
        let info = find_checks_and_pins(&game);
        assert!(info.is_double_check());
    }

    #[test]
    fn pawn_and_king_attacks() {
        let game = GameState::from_fen("4k3/8/8/3p4/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        assert!(is_square_attacked(&game, sq("e4"), Color::Dark));
        assert!(is_square_attacked(&game, sq("c4"), Color::Dark));
        assert!(!is_square_attacked(&game, sq("d4"), Color::Dark));
        assert!(is_square_attacked(&game, sq("d2"), Color::Light));
        assert!(is_square_attacked(&game, sq("f7"), Color::Dark));
        assert!(!is_king_in_check(&game, Color::Light));
    }

    #[test]
    fn pawn_check_is_reported() {
        let game = GameState::from_fen("4k3/3P4/8/8/8/8/8/4K3 b - - 0 1").expect("FEN should parse");
        let info = find_checks_and_pins(&game);
        assert_eq!(info.checkers, vec![sq("d7")]);
        assert!(game.is_in_check());
    }
}
