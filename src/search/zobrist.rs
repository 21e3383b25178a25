//! Zobrist hashing support for position identity and repetition tracking.
//!
//! The keys come from a fixed-seed generator so hashes are deterministic across
//! runs, which keeps transposition behaviour reproducible in tests.

use std::sync::OnceLock;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::game_state::{chess_types::*, game_state::GameState};

const ZOBRIST_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Debug)]
struct ZobristTables {
    piece_square: [[[u64; 64]; 6]; 2],
    side_to_move: u64,
    castling: [u64; 4],
    en_passant_file: [u64; 8],
}

static TABLES: OnceLock<ZobristTables> = OnceLock::new();

#[inline]
fn tables() -> &'static ZobristTables {
    TABLES.get_or_init(build_tables)
}

fn build_tables() -> ZobristTables {
    let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);

    let mut piece_square = [[[0u64; 64]; 6]; 2];
    for color in &mut piece_square {
        for piece in color {
            for sq in piece {
                *sq = rng.random();
            }
        }
    }

    let side_to_move = rng.random();
    let castling = std::array::from_fn(|_| rng.random());
    let en_passant_file = std::array::from_fn(|_| rng.random());

    ZobristTables {
        piece_square,
        side_to_move,
        castling,
        en_passant_file,
    }
}

#[inline]
pub fn piece_square_key(piece: Piece, square: Square) -> u64 {
    tables().piece_square[piece.color.index()][piece.kind.index()][square as usize]
}

/// Key for one held castling right.
#[inline]
pub fn castling_key(side: CastlingSide) -> u64 {
    tables().castling[side.index()]
}

/// XOR of the keys of every right held in `rights`.
#[inline]
pub fn castling_rights_key(rights: CastlingRights) -> u64 {
    ALL_CASTLING_SIDES
        .iter()
        .filter(|side| rights.has(**side))
        .fold(0u64, |acc, side| acc ^ castling_key(*side))
}

#[inline]
pub fn en_passant_file_key(file: u8) -> u64 {
    tables().en_passant_file[file as usize]
}

/// Toggle key, xored in while `Dark` is to move.
#[inline]
pub fn side_to_move_key() -> u64 {
    tables().side_to_move
}

/// Compute the full position key from scratch.
pub fn compute_zobrist_key(game_state: &GameState) -> u64 {
    let mut key = 0u64;

    for (sq, slot) in game_state.board.iter().enumerate() {
        if let Some(piece) = slot {
            key ^= piece_square_key(*piece, sq as Square);
        }
    }

    if game_state.side_to_move == Color::Dark {
        key ^= side_to_move_key();
    }

    key ^= castling_rights_key(game_state.castling_rights);

    if let Some(ep_square) = game_state.en_passant_square {
        key ^= en_passant_file_key(file_of(ep_square));
    }

    key
}
