//! Pluggable board evaluation interfaces and the tapered baseline scorer.
//!
//! Search delegates static scoring to [`BoardScorer`], so alternate heuristics
//! can be swapped without touching the search code. Scores are always from
//! Light's point of view: positive means Light is better.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_generator::legal_moves;
use crate::search::piece_square_tables::{table_for, table_value, KING_ENDGAME_TABLE, KING_MIDGAME_TABLE};

pub const CHECKMATE_SCORE: i32 = 100_000;
pub const STALEMATE_SCORE: i32 = 0;

/// Non-king piece count at or above which the position counts as pure middlegame.
pub const MAX_NON_KING_PIECES: u32 = 29;
pub const CENTER_WEIGHT: f64 = 15.0;
pub const PROX_WEIGHT: f64 = 7.0;
pub const MAX_KING_MANHATTAN: i32 = 14;

pub trait BoardScorer: Send + Sync {
    /// Static score from Light's perspective. Terminal states are the
    /// caller's responsibility.
    fn score(&self, game_state: &GameState) -> i32;
}

#[inline]
pub const fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => 100,
        PieceKind::Knight => 300,
        PieceKind::Bishop => 320,
        PieceKind::Rook => 500,
        PieceKind::Queen => 900,
        PieceKind::King => 0,
    }
}

/// `0.0` in the opening, `1.0` once most material is gone.
#[inline]
pub fn game_stage(non_king_pieces: u32) -> f64 {
    let max = MAX_NON_KING_PIECES as f64;
    ((max - non_king_pieces as f64) / max).clamp(0.0, 1.0)
}

#[inline]
fn center_distance(square: Square) -> f64 {
    let d_file = file_of(square) as f64 - 3.5;
    let d_rank = rank_of(square) as f64 - 3.5;
    d_file.hypot(d_rank)
}

/// Material and piece-square tables, with the king table tapered between
/// middlegame and endgame. Once material is unbalanced the stronger side is
/// rewarded for centralising its own king, pushing the weaker king to the
/// edge, and closing the distance between kings.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaperedScorer;

impl TaperedScorer {
    fn king_endgame_term(game_state: &GameState, stage: f64, material_diff: i32) -> i32 {
        let sign = material_diff.signum();
        if sign == 0 {
            return 0;
        }

        let light_king = game_state.king_square(Color::Light);
        let dark_king = game_state.king_square(Color::Dark);

        let center_term = stage * CENTER_WEIGHT * (center_distance(dark_king) - center_distance(light_king));
        let manhattan = (file_of(light_king) as i32 - file_of(dark_king) as i32).abs()
            + (rank_of(light_king) as i32 - rank_of(dark_king) as i32).abs();
        let proximity_term = stage * PROX_WEIGHT * (MAX_KING_MANHATTAN - manhattan) as f64 * sign as f64;

        (center_term + proximity_term).round() as i32
    }
}

impl BoardScorer for TaperedScorer {
    fn score(&self, game_state: &GameState) -> i32 {
        let stage = game_stage(game_state.non_king_piece_count());

        let mut score = 0i32;
        let mut material_diff = 0i32;

        for (sq, slot) in game_state.board.iter().enumerate() {
            let Some(piece) = slot else {
                continue;
            };
            let square = sq as Square;
            let base = piece_value(piece.kind);

            let bonus = if piece.kind == PieceKind::King {
                let mid = table_value(&KING_MIDGAME_TABLE, piece.color, square) as f64;
                let end = table_value(&KING_ENDGAME_TABLE, piece.color, square) as f64;
                ((1.0 - stage) * mid + stage * end).round() as i32
            } else {
                table_value(table_for(piece.kind), piece.color, square)
            };

            match piece.color {
                Color::Light => {
                    score += base + bonus;
                    material_diff += base;
                }
                Color::Dark => {
                    score -= base + bonus;
                    material_diff -= base;
                }
            }
        }

        score + Self::king_endgame_term(game_state, stage, material_diff)
    }
}

/// Score a position with the default scorer, resolving checkmate
/// (`-CHECKMATE_SCORE` when Light is mated, `+CHECKMATE_SCORE` when Dark is)
/// and stalemate first.
pub fn evaluate(game_state: &GameState) -> i32 {
    if legal_moves(game_state).is_empty() {
        if !game_state.is_in_check() {
            return STALEMATE_SCORE;
        }
        return match game_state.side_to_move {
            Color::Light => -CHECKMATE_SCORE,
            Color::Dark => CHECKMATE_SCORE,
        };
    }
    TaperedScorer.score(game_state)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(fen: &str) -> i32 {
        TaperedScorer.score(&GameState::from_fen(fen).expect("FEN should parse"))
    }

    #[test]
    fn starting_position_is_balanced() {
        assert_eq!(evaluate(&GameState::new_game()), 0);
    }

    #[test]
    fn stage_is_clamped() {
        assert_eq!(game_stage(30), 0.0);
        assert_eq!(game_stage(29), 0.0);
        assert_eq!(game_stage(0), 1.0);
        assert!((game_stage(1) - 28.0 / 29.0).abs() < 1e-12);
    }

    #[test]
    fn mirrored_positions_negate() {
        let light = score("4k3/8/8/8/3N4/8/4P3/4K3 w - - 0 1");
        let dark = score("4k3/4p3/8/3n4/8/8/8/4K3 b - - 0 1");
        assert_eq!(light, -dark);
        assert!(light > 0);
    }

    #[test]
    fn stronger_side_wants_the_weak_king_cornered() {
        // Same material; the Dark king on the edge versus in the centre.
        let cornered = score("k7/8/8/8/8/8/8/3QK3 w - - 0 1");
        let central = score("8/8/8/3k4/8/8/8/3QK3 w - - 0 1");
        assert!(cornered > central, "cornered {cornered} central {central}");

        // And the same holds with colours reversed.
        let cornered = score("3qk3/8/8/8/8/8/8/K7 b - - 0 1");
        let central = score("3qk3/8/8/8/3K4/8/8/8 b - - 0 1");
        assert!(cornered < central, "cornered {cornered} central {central}");
    }

    #[test]
    fn kings_close_together_help_the_stronger_side() {
        let far = score("7k/8/8/8/8/8/8/K6Q w - - 0 1");
        let near = score("7k/8/5K2/8/8/8/8/7Q w - - 0 1");
        assert!(near > far, "near {near} far {far}");
    }

    #[test]
    fn evaluate_resolves_terminal_positions() {
        let light_mated = GameState::from_fen("6k1/8/8/8/8/8/5PPP/r5K1 w - - 0 1").expect("FEN should parse");
        assert_eq!(evaluate(&light_mated), -CHECKMATE_SCORE);
        let dark_mated = GameState::from_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").expect("FEN should parse");
        assert_eq!(evaluate(&dark_mated), CHECKMATE_SCORE);
        let stalemate = GameState::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").expect("FEN should parse");
        assert_eq!(evaluate(&stalemate), STALEMATE_SCORE);
    }
}
