//! Engine-vs-engine self play for local testing.
//!
//! Both sides use the same search depth. An optional seeded random opening
//! prefix varies the games; each engine move goes through a
//! [`SearchWorker`].

use std::time::Instant;

use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, info};

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::{chess_types::Color, game_state::GameState};
use crate::move_generation::legal_move_apply::make_move;
use crate::move_generation::legal_move_generator::{game_status, legal_moves, GameStatus};
use crate::moves::chess_move::ChessMove;
use crate::search::iterative_deepening::SearchConfig;
use crate::search::threading::SearchWorker;
use crate::utils::pgn::{default_headers, result_token, write_pgn_with_headers};

#[derive(Debug, Clone)]
pub struct SelfPlayConfig {
    pub depth: u8,
    pub max_plies: u16,
    pub opening_min_plies: u8,
    pub opening_max_plies: u8,
    pub seed: u64,
    pub search: SearchConfig,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        Self {
            depth: 3,
            max_plies: 200,
            opening_min_plies: 2,
            opening_max_plies: 6,
            seed: 0,
            search: SearchConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelfPlayOutcome {
    Finished(GameStatus),
    MaxPlies,
}

#[derive(Debug, Clone)]
pub struct SelfPlayResult {
    pub outcome: SelfPlayOutcome,
    pub initial_state: GameState,
    pub final_state: GameState,
    /// Random opening plies followed by engine moves.
    pub moves: Vec<ChessMove>,
    pub opening_plies: usize,
    pub white_total_time_ns: u128,
    pub black_total_time_ns: u128,
}

impl SelfPlayResult {
    pub fn result_token(&self) -> &'static str {
        match self.outcome {
            SelfPlayOutcome::Finished(status) => result_token(status, self.final_state.side_to_move),
            SelfPlayOutcome::MaxPlies => "*",
        }
    }

    pub fn to_pgn(&self) -> ChessResult<String> {
        let mut headers = default_headers(&self.initial_state, self.result_token());
        headers.insert("Event".to_owned(), "Alder Chess Self Play".to_owned());
        write_pgn_with_headers(&self.initial_state, &self.moves, &headers)
    }
}

/// Play one game from `start_state`.
pub fn play_self_play(start_state: GameState, config: &SelfPlayConfig) -> ChessResult<SelfPlayResult> {
    let initial_state = start_state.clone();
    let mut state = start_state;
    let mut moves = apply_seeded_random_opening(&mut state, config)?;
    let opening_plies = moves.len();

    let worker = SearchWorker::new(config.search.clone());
    let mut white_total_time_ns = 0u128;
    let mut black_total_time_ns = 0u128;

    info!(seed = config.seed, depth = config.depth, opening_plies, "self play started");

    let mut outcome = SelfPlayOutcome::MaxPlies;
    for _ in 0..config.max_plies {
        let status = game_status(&state);
        if status.is_terminal() {
            outcome = SelfPlayOutcome::Finished(status);
            break;
        }

        let mover = state.side_to_move;
        let root_moves = legal_moves(&state);
        let started = Instant::now();
        let chosen = worker
            .submit(state.clone(), root_moves, config.depth)
            .wait()
            .ok_or_else(|| ChessError::IllegalMove(format!("no engine move in {}", state.get_fen())))?;
        let elapsed_ns = started.elapsed().as_nanos();

        match mover {
            Color::Light => white_total_time_ns = white_total_time_ns.saturating_add(elapsed_ns),
            Color::Dark => black_total_time_ns = black_total_time_ns.saturating_add(elapsed_ns),
        }

        debug!(ply = moves.len(), mv = %chosen, "engine move");
        make_move(&mut state, chosen);
        moves.push(chosen);
    }

    if outcome == SelfPlayOutcome::MaxPlies {
        let status = game_status(&state);
        if status.is_terminal() {
            outcome = SelfPlayOutcome::Finished(status);
        }
    }

    info!(plies = moves.len(), outcome = ?outcome, "self play finished");

    Ok(SelfPlayResult {
        outcome,
        initial_state,
        final_state: state,
        moves,
        opening_plies,
        white_total_time_ns,
        black_total_time_ns,
    })
}

/// Random legal plies drawn from a generator seeded with `config.seed`.
/// Stops early if a random ply ends the game.
fn apply_seeded_random_opening(state: &mut GameState, config: &SelfPlayConfig) -> ChessResult<Vec<ChessMove>> {
    if config.opening_min_plies > config.opening_max_plies {
        return Err(ChessError::InvalidCounter {
            field: "opening ply range",
            value: format!("{}..={}", config.opening_min_plies, config.opening_max_plies),
        });
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let plies = rng.random_range(config.opening_min_plies..=config.opening_max_plies);
    let mut played = Vec::with_capacity(plies as usize);

    for _ in 0..plies {
        let moves = legal_moves(state);
        if moves.is_empty() || game_status(state).is_terminal() {
            break;
        }
        let mv = moves[rng.random_range(0..moves.len())];
        make_move(state, mv);
        played.push(mv);
    }

    Ok(played)
}
