//! Command-line front end.
//!
//! Run with:
//! `cargo run --release -- best --fen "<FEN>" --depth 5`
//! `cargo run --release -- perft --depth 5 --breakdown`
//! `cargo run --release -- selfplay --depth 3 --seed 42`

use std::time::Instant;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use alder_chess::chess_errors::ChessResult;
use alder_chess::game_state::chess_rules::STARTING_POSITION_FEN;
use alder_chess::game_state::game_state::GameState;
use alder_chess::move_generation::legal_move_generator::{game_status, legal_moves};
use alder_chess::move_generation::perft::{perft_divide, perft_multi_threaded, perft_with_breakdown};
use alder_chess::search::iterative_deepening::{iterative_deepening_search, SearchConfig};
use alder_chess::utils::render_game_state::render_game_state;
use alder_chess::utils::san::move_to_san;
use alder_chess::utils::self_play::{play_self_play, SelfPlayConfig};

#[derive(Parser, Debug)]
#[command(name = "alder_chess", version, about = "Chess rules core and minimax search", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search a position and print the chosen move
    Best {
        #[arg(long, default_value = STARTING_POSITION_FEN)]
        fen: String,

        /// Overrides ALDER_DEPTH
        #[arg(short, long)]
        depth: Option<u8>,

        /// Disable the transposition table
        #[arg(long)]
        no_tt: bool,

        /// Disable null-move pruning
        #[arg(long)]
        no_null_move: bool,
    },
    /// Count leaf nodes of the legal move tree
    Perft {
        #[arg(long, default_value = STARTING_POSITION_FEN)]
        fen: String,

        #[arg(short, long, default_value_t = 4)]
        depth: u8,

        /// Print per-root-move counts
        #[arg(long)]
        divide: bool,

        /// Print captures, castles, checks and the rest
        #[arg(long)]
        breakdown: bool,

        /// One thread per root move
        #[arg(long)]
        threaded: bool,
    },
    /// Engine plays itself and prints the game as PGN
    Selfplay {
        #[arg(long, default_value = STARTING_POSITION_FEN)]
        fen: String,

        #[arg(short, long, default_value_t = 3)]
        depth: u8,

        #[arg(long, default_value_t = 200)]
        max_plies: u16,

        /// Random opening plies before the engine takes over
        #[arg(long, default_value_t = 2)]
        opening_min: u8,

        #[arg(long, default_value_t = 6)]
        opening_max: u8,

        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
}

fn main() -> ChessResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Best {
            fen,
            depth,
            no_tt,
            no_null_move,
        } => run_best(&fen, depth, no_tt, no_null_move),
        Command::Perft {
            fen,
            depth,
            divide,
            breakdown,
            threaded,
        } => run_perft(&fen, depth, divide, breakdown, threaded),
        Command::Selfplay {
            fen,
            depth,
            max_plies,
            opening_min,
            opening_max,
            seed,
        } => run_selfplay(&fen, depth, max_plies, opening_min, opening_max, seed),
    }
}

fn run_best(fen: &str, depth: Option<u8>, no_tt: bool, no_null_move: bool) -> ChessResult<()> {
    let mut game = GameState::from_fen(fen)?;
    print!("{}", render_game_state(&game));

    let mut config = SearchConfig::from_env();
    if let Some(depth) = depth {
        config.max_depth = depth;
    }
    config.use_transposition_table &= !no_tt;
    config.use_null_move &= !no_null_move;

    let moves = legal_moves(&game);
    let started = Instant::now();
    let result = iterative_deepening_search(&mut game, &moves, &config);
    let elapsed = started.elapsed();

    match result.best_move {
        Some(mv) => println!(
            "bestmove {} ({}) score {} depth {} nodes {} time {:.3}s",
            mv,
            move_to_san(&game, mv),
            result.best_score,
            result.reached_depth,
            result.nodes,
            elapsed.as_secs_f64()
        ),
        None => println!("no legal move: {:?}", game_status(&game)),
    }
    Ok(())
}

fn run_perft(fen: &str, depth: u8, divide: bool, breakdown: bool, threaded: bool) -> ChessResult<()> {
    let mut game = GameState::from_fen(fen)?;
    let started = Instant::now();

    if divide {
        let mut total = 0u64;
        for (mv, nodes) in perft_divide(&mut game, depth) {
            println!("{mv}: {nodes}");
            total += nodes;
        }
        println!("\nnodes {total}");
    } else {
        let counts = if threaded {
            perft_multi_threaded(&game, depth)
        } else {
            perft_with_breakdown(&mut game, depth)
        };
        println!("nodes {}", counts.nodes);
        if breakdown {
            println!(
                "captures {} en_passant {} castles {} promotions {} checks {} checkmates {}",
                counts.captures, counts.en_passant, counts.castles, counts.promotions, counts.checks, counts.checkmates
            );
        }
    }

    println!("time {:.3}s", started.elapsed().as_secs_f64());
    Ok(())
}

fn run_selfplay(
    fen: &str,
    depth: u8,
    max_plies: u16,
    opening_min_plies: u8,
    opening_max_plies: u8,
    seed: u64,
) -> ChessResult<()> {
    let start = GameState::from_fen(fen)?;
    let config = SelfPlayConfig {
        depth,
        max_plies,
        opening_min_plies,
        opening_max_plies,
        seed,
        search: SearchConfig::from_env(),
    };

    let game = play_self_play(start, &config)?;
    print!("{}", game.to_pgn()?);
    eprint!("{}", render_game_state(&game.final_state));
    eprintln!("outcome {:?}", game.outcome);
    Ok(())
}
