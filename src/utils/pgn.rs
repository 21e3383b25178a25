//! PGN read/write utilities for game history interchange.
//!
//! Movetext is written in SAN with move numbers (`1. e4 e5 2. Nf3`) and read
//! back by resolving each token against the legal moves of the replayed
//! position.

use std::collections::BTreeMap;

use chrono::Local;

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::{chess_types::Color, game_state::GameState};
use crate::move_generation::legal_move_apply::make_move;
use crate::move_generation::legal_move_generator::{legal_moves, GameStatus};
use crate::moves::chess_move::ChessMove;
use crate::utils::san::{move_to_pgn_san, san_to_move};

#[derive(Debug, Clone)]
pub struct PgnGame {
    pub headers: BTreeMap<String, String>,
    pub initial_state: GameState,
    pub moves: Vec<ChessMove>,
    pub final_state: GameState,
    pub result: String,
}

/// PGN result token for a finished (or unfinished) game.
pub fn result_token(status: GameStatus, side_to_move: Color) -> &'static str {
    match status {
        GameStatus::Checkmate => match side_to_move {
            Color::Light => "0-1",
            Color::Dark => "1-0",
        },
        GameStatus::Stalemate | GameStatus::Draw(_) => "1/2-1/2",
        GameStatus::Ongoing => "*",
    }
}

/// Seven-tag roster with today's date, plus `SetUp`/`FEN` for a
/// non-standard start.
pub fn default_headers(initial_state: &GameState, result: &str) -> BTreeMap<String, String> {
    let mut headers = BTreeMap::<String, String>::new();
    headers.insert("Event".to_owned(), "Alder Chess Game".to_owned());
    headers.insert("Site".to_owned(), "Local".to_owned());
    headers.insert("Date".to_owned(), Local::now().format("%Y.%m.%d").to_string());
    headers.insert("Round".to_owned(), "-".to_owned());
    headers.insert("White".to_owned(), "White".to_owned());
    headers.insert("Black".to_owned(), "Black".to_owned());
    headers.insert("Result".to_owned(), normalize_result(result).to_owned());

    let initial_fen = initial_state.get_fen();
    if initial_fen != STARTING_POSITION_FEN {
        headers.insert("SetUp".to_owned(), "1".to_owned());
        headers.insert("FEN".to_owned(), initial_fen);
    }
    headers
}

/// Numbered SAN movetext. A game starting with Black to move opens with `N...`.
pub fn movetext(initial_state: &GameState, moves: &[ChessMove]) -> ChessResult<String> {
    let mut state = initial_state.clone();
    let mut parts = Vec::<String>::with_capacity(moves.len() + moves.len() / 2);

    for (idx, mv) in moves.iter().enumerate() {
        if !legal_moves(&state).contains(mv) {
            return Err(ChessError::IllegalMove(mv.to_string()));
        }
        let san = move_to_pgn_san(&state, *mv);
        match state.side_to_move {
            Color::Light => parts.push(format!("{}. {}", state.fullmove_number, san)),
            Color::Dark if idx == 0 => parts.push(format!("{}... {}", state.fullmove_number, san)),
            Color::Dark => parts.push(san),
        }
        make_move(&mut state, *mv);
    }

    Ok(parts.join(" "))
}

pub fn write_pgn(initial_state: &GameState, moves: &[ChessMove], result: &str) -> ChessResult<String> {
    write_pgn_with_headers(initial_state, moves, &default_headers(initial_state, result))
}

pub fn write_pgn_with_headers(
    initial_state: &GameState,
    moves: &[ChessMove],
    headers: &BTreeMap<String, String>,
) -> ChessResult<String> {
    let mut out = String::new();

    for (key, value) in headers {
        out.push_str(&format!("[{} \"{}\"]\n", key, escape_pgn_value(value)));
    }
    out.push('\n');

    let body = movetext(initial_state, moves)?;
    let result = headers.get("Result").map(|x| normalize_result(x)).unwrap_or("*");
    if !body.is_empty() {
        out.push_str(&body);
        out.push(' ');
    }
    out.push_str(result);
    out.push('\n');

    Ok(out)
}

pub fn read_pgn(pgn: &str) -> ChessResult<PgnGame> {
    let mut headers = BTreeMap::<String, String>::new();
    let mut movetext_lines = Vec::<String>::new();

    for line in pgn.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.starts_with('[') {
            let (k, v) = parse_header_line(trimmed)?;
            headers.insert(k, v);
        } else {
            movetext_lines.push(trimmed.to_owned());
        }
    }

    let initial_state = if headers.get("SetUp").map(|x| x.as_str()) == Some("1") {
        let fen = headers
            .get("FEN")
            .ok_or_else(|| ChessError::InvalidPgn("SetUp is 1 but the FEN tag is missing".to_owned()))?;
        GameState::from_fen(fen)?
    } else {
        GameState::new_game()
    };

    let mut state = initial_state.clone();
    let mut moves = Vec::<ChessMove>::new();
    let mut result = "*".to_owned();

    let text = strip_pgn_comments_and_variations(&movetext_lines.join(" "));
    for token in text.split_whitespace() {
        let token = strip_move_number(token);
        // Display SAN writes en passant as a separate `e.p.` word.
        if token.is_empty() || token == "e.p." {
            continue;
        }
        if is_result_token(token) {
            result = token.to_owned();
            break;
        }

        let mv = san_to_move(token, &state)?;
        make_move(&mut state, mv);
        moves.push(mv);
    }

    if let Some(header_result) = headers.get("Result") {
        result = normalize_result(header_result).to_owned();
    }

    Ok(PgnGame {
        headers,
        initial_state,
        moves,
        final_state: state,
        result,
    })
}

fn parse_header_line(line: &str) -> ChessResult<(String, String)> {
    let invalid = || ChessError::InvalidPgn(line.to_owned());
    let inner = line
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(invalid)?;
    let (key, value_raw) = inner.split_once(' ').ok_or_else(invalid)?;
    let value = value_raw
        .trim()
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .ok_or_else(invalid)?;
    Ok((key.trim().to_owned(), value.replace("\\\"", "\"")))
}

fn strip_pgn_comments_and_variations(text: &str) -> String {
    let mut out = String::new();
    let mut brace_depth = 0usize;
    let mut paren_depth = 0usize;

    for ch in text.chars() {
        match ch {
            '{' => brace_depth = brace_depth.saturating_add(1),
            '}' => brace_depth = brace_depth.saturating_sub(1),
            '(' => paren_depth = paren_depth.saturating_add(1),
            ')' => paren_depth = paren_depth.saturating_sub(1),
            _ if brace_depth == 0 && paren_depth == 0 => out.push(ch),
            _ => {}
        }
    }

    out
}

/// `12.`, `12...` and `12.e4` all lose their number prefix.
fn strip_move_number(token: &str) -> &str {
    let digits = token.len() - token.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    let rest = &token[digits..];
    if digits > 0 && rest.starts_with('.') {
        rest.trim_start_matches('.')
    } else {
        token
    }
}

fn is_result_token(token: &str) -> bool {
    matches!(token, "1-0" | "0-1" | "1/2-1/2" | "*")
}

fn normalize_result(result: &str) -> &str {
    if is_result_token(result) {
        result
    } else {
        "*"
    }
}

fn escape_pgn_value(value: &str) -> String {
    value.replace('"', "\\\"")
}
