//! PGN export of a game's move history.
//!
//! Headers are kept in a `BTreeMap`, so they are written in key order. The
//! movetext uses long algebraic moves, which every PGN reader that accepts UCI
//! move text can replay without a SAN disambiguation pass.

use std::collections::BTreeMap;

use chrono::Local;

use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::Color;

/// Standard header set for a game between `white` and `black`.
///
/// `SetUp`/`FEN` are added when the game did not start from the standard position.
pub fn default_headers(
    white: &str,
    black: &str,
    result: &str,
    initial_fen: &str,
) -> BTreeMap<String, String> {
    let mut headers = BTreeMap::<String, String>::new();
    headers.insert("Event".to_owned(), "Plum Rules Game".to_owned());
    headers.insert("Site".to_owned(), "Local".to_owned());
    headers.insert("Date".to_owned(), Local::now().format("%Y.%m.%d").to_string());
    headers.insert("Round".to_owned(), "-".to_owned());
    headers.insert("White".to_owned(), white.to_owned());
    headers.insert("Black".to_owned(), black.to_owned());
    headers.insert("Result".to_owned(), normalize_result(result).to_owned());

    if initial_fen.trim() != STARTING_POSITION_FEN {
        headers.insert("SetUp".to_owned(), "1".to_owned());
        headers.insert("FEN".to_owned(), initial_fen.trim().to_owned());
    }

    headers
}

/// Writes headers and movetext. Numbering starts from `first_full_move`, with `N...`
/// when Dark moves first.
pub fn write_pgn_with_headers(
    headers: &BTreeMap<String, String>,
    first_side: Color,
    first_full_move: u32,
    moves: &[String],
) -> String {
    let mut out = String::new();

    for (key, value) in headers {
        out.push_str(&format!("[{} \"{}\"]\n", key, escape_pgn_value(value)));
    }
    out.push('\n');

    let mut movetext_parts = Vec::<String>::with_capacity(moves.len() + 1);
    let mut side = first_side;
    let mut full_move = first_full_move.max(1);
    for (ply, mv) in moves.iter().enumerate() {
        match side {
            Color::Light => movetext_parts.push(format!("{full_move}. {mv}")),
            Color::Dark if ply == 0 => movetext_parts.push(format!("{full_move}... {mv}")),
            Color::Dark => movetext_parts.push(mv.clone()),
        }
        if side == Color::Dark {
            full_move += 1;
        }
        side = side.opposite();
    }

    let result = headers
        .get("Result")
        .map(|x| normalize_result(x))
        .unwrap_or("*");
    movetext_parts.push(result.to_owned());
    out.push_str(&movetext_parts.join(" "));
    out.push('\n');

    out
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

#[cfg(test)]
mod tests {
    use super::{default_headers, write_pgn_with_headers};
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::Color;

    fn moves(list: &[&str]) -> Vec<String> {
        list.iter().map(|mv| (*mv).to_owned()).collect()
    }

    #[test]
    fn start_position_game() {
        let headers = default_headers("Ann", "Bo \"the rook\"", "*", STARTING_POSITION_FEN);
        let pgn = write_pgn_with_headers(
            &headers,
            Color::Light,
            1,
            &moves(&["e2e4", "e7e5", "g1f3"]),
        );

        assert!(pgn.contains("[White \"Ann\"]"));
        assert!(pgn.contains("[Black \"Bo \\\"the rook\\\"\"]"));
        assert!(!pgn.contains("SetUp"));
        assert!(pgn.ends_with("1. e2e4 e7e5 2. g1f3 *\n"));
    }

    #[test]
    fn custom_setup_with_dark_to_move() {
        let fen = "4k3/8/8/8/8/8/4P3/4K3 b - - 0 12";
        let headers = default_headers("w", "b", "garbage", fen);
        let pgn = write_pgn_with_headers(&headers, Color::Dark, 12, &moves(&["e8d8", "e2e4"]));

        assert!(pgn.contains("[SetUp \"1\"]"));
        assert!(pgn.contains(&format!("[FEN \"{fen}\"]")));
        assert!(pgn.contains("[Result \"*\"]"));
        assert!(pgn.ends_with("12... e8d8 13. e2e4 *\n"));
    }
}
