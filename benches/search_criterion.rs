use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use alder_chess::game_state::game_state::GameState;
use alder_chess::move_generation::legal_move_generator::legal_moves;
use alder_chess::search::iterative_deepening::{iterative_deepening_search, SearchConfig};

const POSITIONS: &[(&str, &str)] = &[
    ("startpos", "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
    ("italian", "r1bqk1nr/pppp1ppp/2n5/2b1p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4"),
    ("kiwipete", "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1"),
    ("rook_ending", "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1"),
];

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(5));
    group.sample_size(10);

    for (name, fen) in POSITIONS {
        let game = GameState::from_fen(fen).expect("benchmark FEN should parse");
        let moves = legal_moves(&game);

        for (label, use_tt) in [("tt", true), ("no_tt", false)] {
            let config = SearchConfig {
                use_transposition_table: use_tt,
                tt_size_mb: 8,
                ..SearchConfig::with_depth(4)
            };

            // A search must produce a move from the supplied set.
            let mut probe = game.clone();
            let result = iterative_deepening_search(&mut probe, &moves, &config);
            let best = result.best_move.expect("benchmark positions have moves");
            assert!(moves.contains(&best), "{name}: {best} not in root set");

            let mut bench_game = game.clone();
            group.bench_with_input(BenchmarkId::new(*name, label), &config, |b, config| {
                b.iter(|| black_box(iterative_deepening_search(&mut bench_game, black_box(&moves), config).best_move));
            });
        }
    }

    group.finish();
}

criterion_group!(search_benches, bench_search);
criterion_main!(search_benches);
