//! FEN-to-GameState parser.
//!
//! Builds a fully-populated position from Forsyth-Edwards Notation, including
//! king caches, the Zobrist key, and the seeded repetition table. Trailing
//! fields may be omitted and default to `w - - 0 1` (castling, en passant and
//! counters; the side defaults to `w` only when the board alone is given).

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::utils::algebraic::algebraic_to_square;

const DEFAULT_FIELDS: [&str; 5] = ["w", "-", "-", "0", "1"];

pub fn parse_fen(fen: &str) -> ChessResult<GameState> {
    let mut fields: Vec<&str> = fen.split_whitespace().collect();
    if fields.is_empty() {
        return Err(ChessError::EmptyFen);
    }
    if fields.len() > 6 {
        return Err(ChessError::TooManyFenFields(fields[6..].join(" ")));
    }
    let present = fields.len();
    fields.extend_from_slice(&DEFAULT_FIELDS[present - 1..]);

    let mut game_state = GameState::new_empty();

    parse_board(fields[0], &mut game_state)?;
    game_state.side_to_move = parse_side_to_move(fields[1])?;
    game_state.castling_rights = parse_castling_rights(fields[2])?;
    game_state.en_passant_square = parse_en_passant_square(fields[3], game_state.side_to_move)?;
    game_state.halfmove_clock = parse_counter(fields[4], "halfmove clock")?;
    game_state.fullmove_number = parse_counter(fields[5], "fullmove number")?;

    locate_kings(&mut game_state)?;
    game_state.reset_derived_state();

    Ok(game_state)
}

fn parse_board(board_part: &str, game_state: &mut GameState) -> ChessResult<()> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(ChessError::WrongRankCount(ranks.len()));
    }

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let board_rank = 7 - fen_rank_idx;
        let mut file = 0usize;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(ChessError::InvalidPieceChar(ch));
                }
                file += empty_count as usize;
                continue;
            }

            let piece = Piece::from_fen_char(ch).ok_or(ChessError::InvalidPieceChar(ch))?;
            if file < 8 {
                game_state.board[board_rank * 8 + file] = Some(piece);
            }
            file += 1;
        }

        if file != 8 {
            return Err(ChessError::WrongFileCount {
                rank: board_rank + 1,
                files: file,
            });
        }
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> ChessResult<Color> {
    match side_part {
        "w" => Ok(Color::Light),
        "b" => Ok(Color::Dark),
        _ => Err(ChessError::InvalidSideToMove(side_part.to_owned())),
    }
}

fn parse_castling_rights(castling_part: &str) -> ChessResult<CastlingRights> {
    let mut rights = CastlingRights::NONE;
    if castling_part == "-" {
        return Ok(rights);
    }

    for ch in castling_part.chars() {
        let side = match ch {
            'K' => CastlingSide::LightKingside,
            'Q' => CastlingSide::LightQueenside,
            'k' => CastlingSide::DarkKingside,
            'q' => CastlingSide::DarkQueenside,
            _ => return Err(ChessError::InvalidCastlingChar(ch)),
        };
        rights.set(side, true);
    }

    Ok(rights)
}

/// The target must sit on the rank a just-pushed pawn skipped over.
fn parse_en_passant_square(en_passant_part: &str, side_to_move: Color) -> ChessResult<Option<Square>> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    let square = algebraic_to_square(en_passant_part)
        .map_err(|_| ChessError::InvalidEnPassantSquare(en_passant_part.to_owned()))?;
    let expected_rank = match side_to_move {
        Color::Light => 5,
        Color::Dark => 2,
    };
    if rank_of(square) != expected_rank {
        return Err(ChessError::InvalidEnPassantSquare(en_passant_part.to_owned()));
    }

    Ok(Some(square))
}

fn parse_counter(text: &str, field: &'static str) -> ChessResult<u16> {
    text.parse::<u16>().map_err(|_| ChessError::InvalidCounter {
        field,
        value: text.to_owned(),
    })
}

fn locate_kings(game_state: &mut GameState) -> ChessResult<()> {
    for color in [Color::Light, Color::Dark] {
        let mut kings = game_state
            .board
            .iter()
            .enumerate()
            .filter(|(_, slot)| **slot == Some(Piece::new(color, PieceKind::King)))
            .map(|(sq, _)| sq as Square);

        let square = kings.next().ok_or(ChessError::MissingKing(color))?;
        if kings.next().is_some() {
            return Err(ChessError::DuplicateKing(color));
        }
        game_state.king_squares[color.index()] = square;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::parse_fen;
    use crate::chess_errors::ChessError;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::*;
    use crate::utils::render_game_state::render_game_state;

    #[test]
    fn parse_starting_fen_and_render_board() {
        let game_state = parse_fen(STARTING_POSITION_FEN).expect("starting FEN should parse");

        println!("\n{}", render_game_state(&game_state));

        assert_eq!(game_state.side_to_move, Color::Light);
        assert_eq!(game_state.castling_rights, CastlingRights::ALL);
        assert_eq!(game_state.fullmove_number, 1);
        assert_eq!(game_state.halfmove_clock, 0);
        assert_eq!(game_state.piece_at(3), Some(Piece::new(Color::Light, PieceKind::Queen)));
        assert_eq!(game_state.piece_at(59), Some(Piece::new(Color::Dark, PieceKind::Queen)));
    }

    #[test]
    fn missing_trailing_fields_take_defaults() {
        let full = parse_fen("4k3/8/8/8/8/8/8/4K3 b - - 0 1").expect("full FEN should parse");
        let short = parse_fen("4k3/8/8/8/8/8/8/4K3 b").expect("short FEN should parse");
        assert_eq!(short.get_fen(), full.get_fen());
        assert_eq!(short.zobrist_key, full.zobrist_key);

        let board_only = parse_fen("4k3/8/8/8/8/8/8/4K3").expect("board-only FEN should parse");
        assert_eq!(board_only.side_to_move, Color::Light);
    }

    #[test]
    fn structural_errors_are_reported() {
        assert_eq!(parse_fen("   ").unwrap_err(), ChessError::EmptyFen);
        assert_eq!(
            parse_fen("4k3/8/8/8/8/8/4K3 w - - 0 1").unwrap_err(),
            ChessError::WrongRankCount(7)
        );
        assert!(matches!(
            parse_fen("4k3/8/8/8/8/8/8/4K4 w - - 0 1").unwrap_err(),
            ChessError::WrongFileCount { rank: 1, files: 9 }
        ));
        assert_eq!(
            parse_fen("4k3/8/8/8/8/8/8/4X3 w - - 0 1").unwrap_err(),
            ChessError::InvalidPieceChar('X')
        );
        assert!(matches!(
            parse_fen("4k3/8/8/8/8/8/8/4K3 x - - 0 1").unwrap_err(),
            ChessError::InvalidSideToMove(_)
        ));
        assert_eq!(
            parse_fen("4k3/8/8/8/8/8/8/4K3 w KX - 0 1").unwrap_err(),
            ChessError::InvalidCastlingChar('X')
        );
        assert!(matches!(
            parse_fen("4k3/8/8/8/8/8/8/4K3 w - e4 0 1").unwrap_err(),
            ChessError::InvalidEnPassantSquare(_)
        ));
        assert!(matches!(
            parse_fen("4k3/8/8/8/8/8/8/4K3 w - - x 1").unwrap_err(),
            ChessError::InvalidCounter { field: "halfmove clock", .. }
        ));
        assert!(matches!(
            parse_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1 extra").unwrap_err(),
            ChessError::TooManyFenFields(_)
        ));
    }

    #[test]
    fn king_count_is_validated() {
        assert_eq!(
            parse_fen("8/8/8/8/8/8/8/4K3 w - - 0 1").unwrap_err(),
            ChessError::MissingKing(Color::Dark)
        );
        assert_eq!(
            parse_fen("4k3/8/8/8/8/8/8/K3K3 w - - 0 1").unwrap_err(),
            ChessError::DuplicateKing(Color::Light)
        );
    }
}
