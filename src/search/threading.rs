//! Background search worker.
//!
//! A submitted search runs on its own OS thread with a private `GameState`
//! snapshot and a private search session, so nothing is shared with the
//! caller except the cancel flag and a one-slot result channel.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, Receiver, TryRecvError};
use tracing::{debug, info, warn};

use crate::game_state::game_state::GameState;
use crate::moves::chess_move::ChessMove;
use crate::search::board_scoring::TaperedScorer;
use crate::search::iterative_deepening::{SearchConfig, SearchResult, SearchSession};

static NEXT_SEARCH_ID: AtomicU64 = AtomicU64::new(1);

/// Outcome of polling a [`SearchHandle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerStatus {
    Running,
    /// `None` when the root set was empty or the search was cancelled.
    Finished(Option<ChessMove>),
}

/// Spawns searches; the config is the template each submission starts from.
#[derive(Debug, Clone, Default)]
pub struct SearchWorker {
    config: SearchConfig,
}

impl SearchWorker {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    pub fn submit(&self, game_state: GameState, root_moves: Vec<ChessMove>, depth: u8) -> SearchHandle {
        let id = NEXT_SEARCH_ID.fetch_add(1, Ordering::Relaxed);
        let stop = Arc::new(AtomicBool::new(false));
        let (tx, rx) = bounded::<SearchResult>(1);

        let config = SearchConfig {
            max_depth: depth,
            ..self.config.clone()
        };
        info!(search_id = id, depth, root_moves = root_moves.len(), "search submitted");

        let worker_stop = Arc::clone(&stop);
        let join = thread::spawn(move || {
            let mut game_state = game_state;
            let scorer = TaperedScorer;
            let mut session = SearchSession::new(config, &scorer).with_stop_flag(Arc::clone(&worker_stop));
            let mut result = session.search(&mut game_state, &root_moves);
            if worker_stop.load(Ordering::Relaxed) {
                result.cancelled = true;
                result.best_move = None;
            }
            debug!(
                search_id = id,
                nodes = result.nodes,
                depth = result.reached_depth,
                cancelled = result.cancelled,
                "search finished"
            );
            // The handle may already be gone; nobody is left to read the result.
            let _ = tx.send(result);
        });

        SearchHandle {
            id,
            stop,
            receiver: rx,
            join: Some(join),
            result: None,
        }
    }
}

/// Caller side of a running search.
#[derive(Debug)]
pub struct SearchHandle {
    id: u64,
    stop: Arc<AtomicBool>,
    receiver: Receiver<SearchResult>,
    join: Option<JoinHandle<()>>,
    result: Option<SearchResult>,
}

impl SearchHandle {
    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Ask the worker to stop. Its eventual result carries no move.
    pub fn cancel(&self) {
        if !self.stop.swap(true, Ordering::Relaxed) {
            info!(search_id = self.id, "search cancelled");
        }
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }

    /// Non-blocking poll.
    pub fn try_result(&mut self) -> WorkerStatus {
        if self.result.is_none() {
            match self.receiver.try_recv() {
                Ok(result) => self.finish(result),
                Err(TryRecvError::Empty) => return WorkerStatus::Running,
                Err(TryRecvError::Disconnected) => {
                    warn!(search_id = self.id, "search worker exited without a result");
                    self.finish(SearchResult {
                        cancelled: true,
                        ..SearchResult::default()
                    });
                }
            }
        }
        WorkerStatus::Finished(self.best_move())
    }

    /// Block until the worker reports.
    pub fn wait(mut self) -> Option<ChessMove> {
        if self.result.is_none() {
            match self.receiver.recv() {
                Ok(result) => self.finish(result),
                Err(_) => {
                    warn!(search_id = self.id, "search worker exited without a result");
                    return None;
                }
            }
        }
        self.best_move()
    }

    /// Full statistics of the finished search, once available.
    #[inline]
    pub fn details(&self) -> Option<&SearchResult> {
        self.result.as_ref()
    }

    fn best_move(&self) -> Option<ChessMove> {
        match self.result {
            Some(result) if !result.cancelled && !self.is_cancelled() => result.best_move,
            _ => None,
        }
    }

    fn finish(&mut self, result: SearchResult) {
        self.result = Some(result);
        if let Some(join) = self.join.take() {
            if join.join().is_err() {
                warn!(search_id = self.id, "search worker panicked");
            }
        }
    }
}

impl Drop for SearchHandle {
    fn drop(&mut self) {
        if let Some(join) = self.join.take() {
            self.stop.store(true, Ordering::Relaxed);
            let _ = join.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_generation::legal_move_generator::legal_moves;
    use std::time::Duration;

    #[test]
    fn submitted_search_returns_a_legal_move() {
        let game = GameState::new_game();
        let moves = legal_moves(&game);
        let handle = SearchWorker::default().submit(game, moves.clone(), 2);
        let best = handle.wait().expect("startpos has moves");
        assert!(moves.contains(&best));
    }

    #[test]
    fn polling_eventually_finishes() {
        let game = GameState::from_fen("6k1/5ppp/8/8/8/8/5PPP/3R2K1 w - - 0 1").expect("FEN should parse");
        let moves = legal_moves(&game);
        let mut handle = SearchWorker::default().submit(game, moves, 3);
        let status = loop {
            match handle.try_result() {
                WorkerStatus::Running => thread::sleep(Duration::from_millis(5)),
                finished => break finished,
            }
        };
        let WorkerStatus::Finished(Some(mv)) = status else {
            panic!("expected a move, got {status:?}");
        };
        assert_eq!(mv.to_string(), "d1d8");
        assert!(handle.details().is_some());
        // Polling again keeps reporting the same answer.
        assert_eq!(handle.try_result(), status);
    }

    #[test]
    fn cancelled_search_reports_no_move() {
        let game = GameState::new_game();
        let moves = legal_moves(&game);
        let config = SearchConfig {
            mate_in_one_shortcut: false,
            ..SearchConfig::default()
        };
        let handle = SearchWorker::new(config).submit(game, moves, 12);
        handle.cancel();
        assert!(handle.is_cancelled());
        assert_eq!(handle.wait(), None);
    }

    #[test]
    fn empty_root_set_reports_no_move() {
        let handle = SearchWorker::default().submit(GameState::new_game(), Vec::new(), 3);
        assert_eq!(handle.wait(), None);
    }

    #[test]
    fn each_submission_gets_its_own_id() {
        let worker = SearchWorker::default();
        let a = worker.submit(GameState::new_game(), Vec::new(), 1);
        let b = worker.submit(GameState::new_game(), Vec::new(), 1);
        assert_ne!(a.id(), b.id());
    }
}
