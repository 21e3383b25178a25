//! Fixed-size transposition table keyed by Zobrist hash.
//!
//! Direct-mapped on the raw 64-bit key. A slot holding the same key is only
//! replaced by an equal or deeper search; a slot holding a different key is
//! always overwritten.

use crate::moves::chess_move::ChessMove;
use crate::search::board_scoring::CHECKMATE_SCORE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Exact,
    Lower,
    Upper,
}

#[derive(Debug, Clone, Copy)]
pub struct TTEntry {
    pub key: u64,
    pub depth: u8,
    pub score: i32,
    pub bound: Bound,
    pub best_move: Option<ChessMove>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TTStats {
    pub probes: u64,
    pub hits: u64,
    pub stores: u64,
}

#[derive(Debug, Clone)]
pub struct TranspositionTable {
    entries: Vec<Option<TTEntry>>,
    stats: TTStats,
}

/// Scores beyond this magnitude encode a forced mate.
const MATE_THRESHOLD: i32 = CHECKMATE_SCORE - 1_000;

/// Convert a root-relative mate score into a node-relative one for storage.
#[inline]
pub fn score_to_tt(score: i32, ply: u8) -> i32 {
    if score > MATE_THRESHOLD {
        score + ply as i32
    } else if score < -MATE_THRESHOLD {
        score - ply as i32
    } else {
        score
    }
}

/// Inverse of [`score_to_tt`] for the probing node's ply.
#[inline]
pub fn score_from_tt(score: i32, ply: u8) -> i32 {
    if score > MATE_THRESHOLD {
        score - ply as i32
    } else if score < -MATE_THRESHOLD {
        score + ply as i32
    } else {
        score
    }
}

impl TranspositionTable {
    pub fn new_with_mb(size_mb: usize) -> Self {
        let bytes = size_mb.max(1) * 1024 * 1024;
        let entry_size = std::mem::size_of::<Option<TTEntry>>().max(1);
        let count = (bytes / entry_size).max(1);
        Self {
            entries: vec![None; count],
            stats: TTStats::default(),
        }
    }

    #[inline]
    pub fn clear(&mut self) {
        self.entries.fill(None);
        self.stats = TTStats::default();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn stats(&self) -> TTStats {
        self.stats
    }

    #[inline]
    fn idx(&self, key: u64) -> usize {
        (key % self.entries.len() as u64) as usize
    }

    pub fn probe(&mut self, key: u64) -> Option<TTEntry> {
        self.stats.probes += 1;
        let idx = self.idx(key);
        let hit = self.entries[idx].filter(|e| e.key == key);
        if hit.is_some() {
            self.stats.hits += 1;
        }
        hit
    }

    pub fn store(&mut self, entry: TTEntry) {
        let idx = self.idx(entry.key);
        let replace = match self.entries[idx] {
            Some(existing) if existing.key == entry.key => entry.depth >= existing.depth,
            _ => true,
        };
        if replace {
            self.stats.stores += 1;
            self.entries[idx] = Some(entry);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::PieceKind;

    fn entry(key: u64, depth: u8, score: i32, bound: Bound) -> TTEntry {
        TTEntry {
            key,
            depth,
            score,
            bound,
            best_move: Some(ChessMove::new(12, 28, PieceKind::Pawn, None, None, 0)),
        }
    }

    #[test]
    fn store_and_probe_round_trip() {
        let mut tt = TranspositionTable::new_with_mb(1);
        tt.store(entry(123, 5, 42, Bound::Exact));
        let got = tt.probe(123).expect("entry should exist");
        assert_eq!(got.depth, 5);
        assert_eq!(got.score, 42);
        assert_eq!(got.bound, Bound::Exact);
        assert!(tt.probe(124).is_none());
        assert_eq!(tt.stats().hits, 1);
        assert_eq!(tt.stats().probes, 2);
    }

    #[test]
    fn same_key_prefers_deeper_entries() {
        let mut tt = TranspositionTable::new_with_mb(1);
        let key = 555;
        tt.store(entry(key, 2, 1, Bound::Upper));
        tt.store(entry(key, 1, 9, Bound::Exact));
        assert_eq!(tt.probe(key).expect("exists").score, 1);
        tt.store(entry(key, 2, 4, Bound::Lower));
        assert_eq!(tt.probe(key).expect("exists").score, 4);
        tt.store(entry(key, 6, 3, Bound::Lower));
        let got = tt.probe(key).expect("exists");
        assert_eq!(got.depth, 6);
        assert_eq!(got.score, 3);
    }

    #[test]
    fn colliding_key_overwrites_slot() {
        let mut tt = TranspositionTable::new_with_mb(1);
        let len = tt.len() as u64;
        tt.store(entry(7, 9, 1, Bound::Exact));
        tt.store(entry(7 + len, 1, 2, Bound::Exact));
        assert!(tt.probe(7).is_none());
        assert_eq!(tt.probe(7 + len).expect("exists").score, 2);
    }

    #[test]
    fn mate_scores_are_stored_node_relative() {
        let mate_in_three_from_root = CHECKMATE_SCORE - 5;
        let stored = score_to_tt(mate_in_three_from_root, 2);
        assert_eq!(stored, CHECKMATE_SCORE - 3);
        assert_eq!(score_from_tt(stored, 4), CHECKMATE_SCORE - 7);
        assert_eq!(score_from_tt(score_to_tt(-mate_in_three_from_root, 2), 2), -mate_in_three_from_root);
        assert_eq!(score_to_tt(250, 9), 250);
    }
}
