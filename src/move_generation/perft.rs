//! Perft node counting with a per-leaf breakdown.
//!
//! Walks the legal move tree with in-place make/unmake; the position is
//! returned to its starting state after every call.

use std::thread;

use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::{make_move, unmake_move};
use crate::move_generation::legal_move_generator::legal_moves;
use crate::moves::chess_move::ChessMove;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
    pub checkmates: u64,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

/// Leaf count only; skips the breakdown bookkeeping.
pub fn perft(game_state: &mut GameState, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = legal_moves(game_state);
    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0u64;
    for mv in moves {
        make_move(game_state, mv);
        nodes += perft(game_state, depth - 1);
        unmake_move(game_state);
    }
    nodes
}

pub fn perft_with_breakdown(game_state: &mut GameState, depth: u8) -> PerftCounts {
    let mut counts = PerftCounts::default();
    if depth == 0 {
        counts.nodes = 1;
        return counts;
    }
    breakdown_recurse(game_state, depth, &mut counts);
    counts
}

fn breakdown_recurse(game_state: &mut GameState, depth: u8, counts: &mut PerftCounts) {
    for mv in legal_moves(game_state) {
        make_move(game_state, mv);
        if depth == 1 {
            record_leaf(game_state, mv, counts);
        } else {
            breakdown_recurse(game_state, depth - 1, counts);
        }
        unmake_move(game_state);
    }
}

fn record_leaf(game_state: &GameState, mv: ChessMove, counts: &mut PerftCounts) {
    counts.nodes += 1;
    if mv.is_capture() {
        counts.captures += 1;
    }
    if mv.is_en_passant() {
        counts.en_passant += 1;
    }
    if mv.is_castling() {
        counts.castles += 1;
    }
    if mv.is_promotion() {
        counts.promotions += 1;
    }
    if game_state.is_in_check() {
        counts.checks += 1;
        if legal_moves(game_state).is_empty() {
            counts.checkmates += 1;
        }
    }
}

/// Per-root-move node counts, in generation order.
pub fn perft_divide(game_state: &mut GameState, depth: u8) -> Vec<(ChessMove, u64)> {
    if depth == 0 {
        return Vec::new();
    }
    legal_moves(game_state)
        .into_iter()
        .map(|mv| {
            make_move(game_state, mv);
            let nodes = perft(game_state, depth - 1);
            unmake_move(game_state);
            (mv, nodes)
        })
        .collect()
}

/// Breakdown perft with one scoped thread per root move, each on its own copy
/// of the position.
pub fn perft_multi_threaded(game_state: &GameState, depth: u8) -> PerftCounts {
    if depth <= 1 {
        return perft_with_breakdown(&mut game_state.clone(), depth);
    }

    let root_moves = legal_moves(game_state);
    let mut total = PerftCounts::default();

    thread::scope(|scope| {
        let handles: Vec<_> = root_moves
            .into_iter()
            .map(|mv| {
                let mut local_state = game_state.clone();
                scope.spawn(move || {
                    let mut local = PerftCounts::default();
                    make_move(&mut local_state, mv);
                    breakdown_recurse(&mut local_state, depth - 1, &mut local);
                    local
                })
            })
            .collect();

        for handle in handles {
            match handle.join() {
                Ok(local) => total.merge(local),
                Err(payload) => std::panic::resume_unwind(payload),
            }
        }
    });

    total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perft_depth_zero_counts_single_node() {
        let mut game = GameState::new_game();
        assert_eq!(perft(&mut game, 0), 1);
        assert_eq!(
            perft_with_breakdown(&mut game, 0),
            PerftCounts {
                nodes: 1,
                ..PerftCounts::default()
            }
        );
    }

    #[test]
    fn start_position_breakdown_depth_three() {
        let mut game = GameState::new_game();
        let key = game.zobrist_key;
        let counts = perft_with_breakdown(&mut game, 3);
        assert_eq!(
            counts,
            PerftCounts {
                nodes: 8_902,
                captures: 34,
                en_passant: 0,
                castles: 0,
                promotions: 0,
                checks: 12,
                checkmates: 0,
            }
        );
        assert_eq!(game.zobrist_key, key);
        assert!(game.undo_stack.is_empty());
    }

    #[test]
    fn divide_sums_to_perft() {
        let mut game = GameState::new_game();
        let divided = perft_divide(&mut game, 2);
        assert_eq!(divided.len(), 20);
        assert!(divided.iter().all(|(_, nodes)| *nodes == 20));
        assert_eq!(divided.iter().map(|(_, nodes)| nodes).sum::<u64>(), 400);
    }

    #[test]
    fn multi_threaded_matches_single_threaded() {
        let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
        let mut game = GameState::from_fen(fen).expect("FEN should parse");
        let single = perft_with_breakdown(&mut game, 2);
        let multi = perft_multi_threaded(&game, 2);
        assert_eq!(single, multi);
        assert_eq!(multi.nodes, 2_039);
        assert_eq!(multi.captures, 351);
        assert_eq!(multi.en_passant, 1);
        assert_eq!(multi.castles, 91);
        assert_eq!(multi.checks, 3);
    }
}
