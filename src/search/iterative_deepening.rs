//! Iterative deepening minimax search with alpha-beta pruning.
//!
//! Light maximizes and Dark minimizes over scores from Light's point of view.
//! Each node mutates one shared `GameState` through make/unmake and leaves it
//! exactly as found. On top of plain alpha-beta the search layers:
//! - principal variation search (null-window probe, full re-search inside the window),
//! - a transposition table with Exact/Lower/Upper bounds,
//! - null-move pruning,
//! - killer and history move ordering,
//! - endgame deepening and a mate-in-one check at the root.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::draw_rules::draw_reason;
use crate::move_generation::legal_move_apply::{make_move, make_null_move, unmake_move, unmake_null_move};
use crate::move_generation::legal_move_generator::legal_moves;
use crate::moves::chess_move::ChessMove;
use crate::search::board_scoring::{BoardScorer, TaperedScorer, CHECKMATE_SCORE, STALEMATE_SCORE};
use crate::search::move_ordering::{order_moves, SearchHeuristics, MAX_SEARCH_DEPTH};
use crate::search::transposition_table::{score_from_tt, score_to_tt, Bound, TTEntry, TTStats, TranspositionTable};

/// Depth used when the caller does not ask for one; endgame deepening only
/// kicks in at this depth.
pub const DEFAULT_SEARCH_DEPTH: u8 = 4;

const INFINITY: i32 = CHECKMATE_SCORE + 1_000;

#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub max_depth: u8,
    pub tt_size_mb: usize,
    pub use_transposition_table: bool,
    pub use_null_move: bool,
    pub null_move_reduction: u8,
    /// Null move is only tried with more non-king pieces than this.
    pub null_move_min_pieces: u32,
    pub endgame_deepening: bool,
    pub mate_in_one_shortcut: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_SEARCH_DEPTH,
            tt_size_mb: 16,
            use_transposition_table: true,
            use_null_move: true,
            null_move_reduction: 3,
            null_move_min_pieces: 6,
            endgame_deepening: true,
            mate_in_one_shortcut: true,
        }
    }
}

impl SearchConfig {
    pub fn with_depth(max_depth: u8) -> Self {
        Self {
            max_depth,
            ..Self::default()
        }
    }

    /// Defaults overridden by `ALDER_DEPTH` and `ALDER_TT_MB` when set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(depth) = read_env_override::<u8>("ALDER_DEPTH") {
            config.max_depth = depth;
        }
        if let Some(size_mb) = read_env_override::<usize>("ALDER_TT_MB") {
            config.tt_size_mb = size_mb;
        }
        config
    }
}

fn read_env_override<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(variable = name, value = %raw, "ignoring unparsable search override");
            None
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SearchResult {
    pub best_move: Option<ChessMove>,
    pub best_score: i32,
    pub reached_depth: u8,
    pub nodes: u64,
    pub null_move_cutoffs: u64,
    pub tt_stats: TTStats,
    pub cancelled: bool,
}

/// Owns the per-search tables. Nothing survives between sessions.
pub struct SearchSession<'s, S: BoardScorer> {
    config: SearchConfig,
    scorer: &'s S,
    tt: Option<TranspositionTable>,
    heuristics: SearchHeuristics,
    stop_flag: Option<Arc<AtomicBool>>,
    nodes: u64,
    null_move_cutoffs: u64,
    aborted: bool,
}

impl<'s, S: BoardScorer> SearchSession<'s, S> {
    pub fn new(config: SearchConfig, scorer: &'s S) -> Self {
        let tt = config
            .use_transposition_table
            .then(|| TranspositionTable::new_with_mb(config.tt_size_mb));
        Self {
            config,
            scorer,
            tt,
            heuristics: SearchHeuristics::default(),
            stop_flag: None,
            nodes: 0,
            null_move_cutoffs: 0,
            aborted: false,
        }
    }

    /// Abort the search as soon as `flag` is raised.
    pub fn with_stop_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.stop_flag = Some(flag);
        self
    }

    /// Pick a move from `root_moves` for the side to move.
    pub fn search(&mut self, game_state: &mut GameState, root_moves: &[ChessMove]) -> SearchResult {
        self.heuristics.reset();
        if let Some(tt) = self.tt.as_mut() {
            tt.clear();
        }
        self.nodes = 0;
        self.null_move_cutoffs = 0;
        self.aborted = false;

        let mut result = SearchResult::default();
        if root_moves.is_empty() {
            return result;
        }

        let depth = self.effective_depth(game_state);

        if self.config.mate_in_one_shortcut {
            if let Some(mv) = find_mate_in_one(game_state, root_moves) {
                debug!(mv = %mv, "mate in one at the root");
                result.best_move = Some(mv);
                result.best_score = match game_state.side_to_move {
                    Color::Light => CHECKMATE_SCORE - 1,
                    Color::Dark => -(CHECKMATE_SCORE - 1),
                };
                result.reached_depth = 1;
                return result;
            }
        }

        let mut ordered = root_moves.to_vec();
        for current_depth in 1..=depth {
            let pv = (current_depth > 1).then(|| ordered[0]);
            order_moves(&mut ordered, pv, &self.heuristics, current_depth);

            let Some((best_move, best_score)) = self.search_root(game_state, &ordered, current_depth) else {
                break;
            };

            if let Some(pos) = ordered.iter().position(|mv| *mv == best_move) {
                let mv = ordered.remove(pos);
                ordered.insert(0, mv);
            }

            result.best_move = Some(best_move);
            result.best_score = best_score;
            result.reached_depth = current_depth;
            debug!(
                depth = current_depth,
                score = best_score,
                nodes = self.nodes,
                best = %best_move,
                "completed iteration"
            );
        }

        result.nodes = self.nodes;
        result.null_move_cutoffs = self.null_move_cutoffs;
        result.cancelled = self.aborted;
        if let Some(tt) = self.tt.as_ref() {
            result.tt_stats = tt.stats();
        }
        trace!(
            nodes = result.nodes,
            null_move_cutoffs = result.null_move_cutoffs,
            tt_probes = result.tt_stats.probes,
            tt_hits = result.tt_stats.hits,
            tt_stores = result.tt_stats.stores,
            "search finished"
        );

        result
    }

    fn effective_depth(&self, game_state: &GameState) -> u8 {
        let mut depth = self.config.max_depth.clamp(1, MAX_SEARCH_DEPTH as u8);
        if self.config.endgame_deepening && depth == DEFAULT_SEARCH_DEPTH {
            let pieces = game_state.total_piece_count();
            if pieces <= 4 {
                depth = 8;
            } else if pieces <= 7 {
                depth = 6;
            }
        }
        depth
    }

    #[inline]
    fn should_stop(&mut self) -> bool {
        if !self.aborted {
            if let Some(flag) = self.stop_flag.as_ref() {
                if flag.load(Ordering::Relaxed) {
                    self.aborted = true;
                }
            }
        }
        self.aborted
    }

    /// One full-width pass over the root moves. `None` when cancelled midway.
    fn search_root(&mut self, game_state: &mut GameState, moves: &[ChessMove], depth: u8) -> Option<(ChessMove, i32)> {
        let maximizing = game_state.side_to_move == Color::Light;
        let mut alpha = -INFINITY;
        let mut beta = INFINITY;
        let mut best_move = moves[0];
        let mut best_score = if maximizing { -INFINITY } else { INFINITY };

        for (idx, mv) in moves.iter().copied().enumerate() {
            make_move(game_state, mv);
            let score = self.search_child(game_state, depth - 1, 1, alpha, beta, maximizing, idx == 0);
            unmake_move(game_state);

            if self.aborted {
                return None;
            }

            if maximizing {
                if score > best_score {
                    best_score = score;
                    best_move = mv;
                }
                alpha = alpha.max(best_score);
            } else {
                if score < best_score {
                    best_score = score;
                    best_move = mv;
                }
                beta = beta.min(best_score);
            }
        }

        Some((best_move, best_score))
    }

    /// PVS wrapper: the first child gets the full window, later children a
    /// null-window probe on the parent's side, re-searched when it lands
    /// strictly inside `(alpha, beta)`.
    #[allow(clippy::too_many_arguments)]
    fn search_child(
        &mut self,
        game_state: &mut GameState,
        depth: u8,
        ply: u8,
        alpha: i32,
        beta: i32,
        parent_maximizing: bool,
        first: bool,
    ) -> i32 {
        if first {
            return self.minimax(game_state, depth, ply, alpha, beta);
        }

        let probe = if parent_maximizing {
            self.minimax(game_state, depth, ply, alpha, alpha + 1)
        } else {
            self.minimax(game_state, depth, ply, beta - 1, beta)
        };

        if alpha < probe && probe < beta {
            self.minimax(game_state, depth, ply, alpha, beta)
        } else {
            probe
        }
    }

    fn minimax(&mut self, game_state: &mut GameState, depth: u8, ply: u8, mut alpha: i32, mut beta: i32) -> i32 {
        self.nodes += 1;
        if self.should_stop() {
            return 0;
        }

        let maximizing = game_state.side_to_move == Color::Light;

        let mut moves = legal_moves(game_state);
        if moves.is_empty() {
            if !game_state.is_in_check() {
                return STALEMATE_SCORE;
            }
            let mate = CHECKMATE_SCORE - ply as i32;
            return if maximizing { -mate } else { mate };
        }
        if draw_reason(game_state).is_some() {
            return STALEMATE_SCORE;
        }

        if depth == 0 {
            return self.scorer.score(game_state);
        }

        let key = game_state.zobrist_key;
        let mut tt_move = None;
        if let Some(entry) = self.tt.as_mut().and_then(|tt| tt.probe(key)) {
            tt_move = entry.best_move;
            if entry.depth >= depth {
                let score = score_from_tt(entry.score, ply);
                match entry.bound {
                    Bound::Exact => return score,
                    Bound::Lower => alpha = alpha.max(score),
                    Bound::Upper => beta = beta.min(score),
                }
                if alpha >= beta {
                    return score;
                }
            }
        }

        let in_check = game_state.is_in_check();
        if let Some(score) = self.try_null_move(game_state, depth, ply, alpha, beta, in_check) {
            return score;
        }

        let alpha_orig = alpha;
        let beta_orig = beta;

        order_moves(&mut moves, tt_move, &self.heuristics, depth);

        let mut best_score = if maximizing { -INFINITY } else { INFINITY };
        let mut best_move = None;

        for (idx, mv) in moves.iter().copied().enumerate() {
            make_move(game_state, mv);
            let score = self.search_child(game_state, depth - 1, ply + 1, alpha, beta, maximizing, idx == 0);
            unmake_move(game_state);

            if self.aborted {
                return 0;
            }

            if maximizing {
                if score > best_score {
                    best_score = score;
                    best_move = Some(mv);
                }
                alpha = alpha.max(best_score);
            } else {
                if score < best_score {
                    best_score = score;
                    best_move = Some(mv);
                }
                beta = beta.min(best_score);
            }

            if alpha >= beta {
                if mv.is_quiet() {
                    self.heuristics.record_killer(depth, mv);
                }
                self.heuristics.record_history(depth, mv);
                break;
            }
        }

        if let Some(tt) = self.tt.as_mut() {
            let bound = if best_score <= alpha_orig {
                Bound::Upper
            } else if best_score >= beta_orig {
                Bound::Lower
            } else {
                Bound::Exact
            };
            tt.store(TTEntry {
                key,
                depth,
                score: score_to_tt(best_score, ply),
                bound,
                best_move,
            });
        }

        best_score
    }

    /// Give the opponent a free move; if a reduced search still fails on our
    /// side of the window the node is pruned.
    fn try_null_move(
        &mut self,
        game_state: &mut GameState,
        depth: u8,
        ply: u8,
        alpha: i32,
        beta: i32,
        in_check: bool,
    ) -> Option<i32> {
        if !self.config.use_null_move
            || in_check
            || depth <= 2
            || game_state.non_king_piece_count() <= self.config.null_move_min_pieces
        {
            return None;
        }

        let maximizing = game_state.side_to_move == Color::Light;
        let reduced = depth.saturating_sub(self.config.null_move_reduction);

        let undo = make_null_move(game_state);
        let score = if maximizing {
            self.minimax(game_state, reduced, ply + 1, beta - 1, beta)
        } else {
            self.minimax(game_state, reduced, ply + 1, alpha, alpha + 1)
        };
        unmake_null_move(game_state, undo);

        if self.aborted {
            return Some(0);
        }

        let prunes = if maximizing { score >= beta } else { score <= alpha };
        if prunes {
            self.null_move_cutoffs += 1;
            Some(score)
        } else {
            None
        }
    }
}

/// A root move that leaves the opponent checkmated, if any.
pub fn find_mate_in_one(game_state: &mut GameState, root_moves: &[ChessMove]) -> Option<ChessMove> {
    root_moves.iter().copied().find(|mv| {
        make_move(game_state, *mv);
        let mates = game_state.is_in_check() && legal_moves(game_state).is_empty();
        unmake_move(game_state);
        mates
    })
}

/// Full search with the default scorer.
pub fn iterative_deepening_search(
    game_state: &mut GameState,
    root_moves: &[ChessMove],
    config: &SearchConfig,
) -> SearchResult {
    let scorer = TaperedScorer;
    SearchSession::new(config.clone(), &scorer).search(game_state, root_moves)
}

/// Best move among `root_moves` at `depth`, or `None` when the set is empty.
pub fn find_best_move(game_state: &mut GameState, root_moves: &[ChessMove], depth: u8) -> Option<ChessMove> {
    iterative_deepening_search(game_state, root_moves, &SearchConfig::with_depth(depth)).best_move
}
