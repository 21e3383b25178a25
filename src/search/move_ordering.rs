//! Killer and history heuristics plus the move ordering built on them.
//!
//! Both tables belong to one search session and are indexed by remaining
//! depth, not ply.

use std::cmp::Reverse;

use crate::moves::chess_move::ChessMove;
use crate::search::board_scoring::piece_value;

/// Deepest remaining depth the heuristic tables can index.
pub const MAX_SEARCH_DEPTH: usize = 32;

const HISTORY_LEN: usize = (MAX_SEARCH_DEPTH + 1) * 64 * 64;

#[inline]
fn history_index(depth: u8, mv: ChessMove) -> usize {
    let depth = (depth as usize).min(MAX_SEARCH_DEPTH);
    (depth * 64 + mv.from as usize) * 64 + mv.to as usize
}

#[derive(Debug, Clone)]
pub struct SearchHeuristics {
    killers: [[Option<ChessMove>; 2]; MAX_SEARCH_DEPTH + 1],
    history: Box<[u64]>,
}

impl Default for SearchHeuristics {
    fn default() -> Self {
        Self {
            killers: [[None; 2]; MAX_SEARCH_DEPTH + 1],
            history: vec![0u64; HISTORY_LEN].into_boxed_slice(),
        }
    }
}

impl SearchHeuristics {
    pub fn reset(&mut self) {
        self.killers = [[None; 2]; MAX_SEARCH_DEPTH + 1];
        self.history.fill(0);
    }

    #[inline]
    pub fn killers_at(&self, depth: u8) -> [Option<ChessMove>; 2] {
        self.killers[(depth as usize).min(MAX_SEARCH_DEPTH)]
    }

    /// Two-slot rotation: a new killer pushes the previous first slot down.
    pub fn record_killer(&mut self, depth: u8, mv: ChessMove) {
        let slot = &mut self.killers[(depth as usize).min(MAX_SEARCH_DEPTH)];
        if slot[0] == Some(mv) {
            return;
        }
        slot[1] = slot[0];
        slot[0] = Some(mv);
    }

    #[inline]
    pub fn record_history(&mut self, depth: u8, mv: ChessMove) {
        let bonus = 1u64 << depth.min(63);
        let entry = &mut self.history[history_index(depth, mv)];
        *entry = entry.saturating_add(bonus);
    }

    #[inline]
    pub fn history_score(&self, depth: u8, mv: ChessMove) -> u64 {
        self.history[history_index(depth, mv)]
    }
}

/// Sort key: higher tiers first, then the value inside the tier.
/// Tiers: preferred move, captures (MVV-LVA), killers, remaining quiets by history.
fn ordering_key(mv: ChessMove, preferred: Option<ChessMove>, heuristics: &SearchHeuristics, depth: u8) -> (u8, i64) {
    if preferred == Some(mv) {
        return (4, 0);
    }
    if let Some(victim) = mv.captured_piece {
        return (3, i64::from(piece_value(victim) - piece_value(mv.moved_piece)));
    }
    let killers = heuristics.killers_at(depth);
    if killers[0] == Some(mv) {
        return (2, 1);
    }
    if killers[1] == Some(mv) {
        return (2, 0);
    }
    (1, heuristics.history_score(depth, mv).min(i64::MAX as u64) as i64)
}

/// Stable ordering, so ties keep generation order.
pub fn order_moves(
    moves: &mut [ChessMove],
    preferred: Option<ChessMove>,
    heuristics: &SearchHeuristics,
    depth: u8,
) {
    moves.sort_by_cached_key(|mv| Reverse(ordering_key(*mv, preferred, heuristics, depth)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::PieceKind;

    fn quiet(from: u8, to: u8) -> ChessMove {
        ChessMove::new(from, to, PieceKind::Knight, None, None, 0)
    }

    #[test]
    fn killers_rotate_and_ignore_duplicates() {
        let mut heuristics = SearchHeuristics::default();
        let a = quiet(1, 18);
        let b = quiet(6, 21);
        heuristics.record_killer(3, a);
        heuristics.record_killer(3, a);
        assert_eq!(heuristics.killers_at(3), [Some(a), None]);
        heuristics.record_killer(3, b);
        assert_eq!(heuristics.killers_at(3), [Some(b), Some(a)]);
        assert_eq!(heuristics.killers_at(2), [None, None]);
    }

    #[test]
    fn history_grows_by_power_of_depth() {
        let mut heuristics = SearchHeuristics::default();
        let mv = quiet(1, 18);
        heuristics.record_history(3, mv);
        heuristics.record_history(3, mv);
        assert_eq!(heuristics.history_score(3, mv), 16);
        assert_eq!(heuristics.history_score(2, mv), 0);
        heuristics.reset();
        assert_eq!(heuristics.history_score(3, mv), 0);
    }

    #[test]
    fn ordering_tiers() {
        let mut heuristics = SearchHeuristics::default();
        let pv = quiet(10, 20);
        let pawn_takes_queen = ChessMove::new(12, 21, PieceKind::Pawn, Some(PieceKind::Queen), None, 0);
        let queen_takes_pawn = ChessMove::new(3, 51, PieceKind::Queen, Some(PieceKind::Pawn), None, 0);
        let killer = quiet(1, 18);
        let hist = quiet(6, 21);
        let plain = quiet(6, 23);
        heuristics.record_killer(2, killer);
        heuristics.record_history(2, hist);

        let mut moves = vec![plain, hist, killer, queen_takes_pawn, pv, pawn_takes_queen];
        order_moves(&mut moves, Some(pv), &heuristics, 2);
        assert_eq!(moves, vec![pv, pawn_takes_queen, queen_takes_pawn, killer, hist, plain]);
    }
}
