//! Long algebraic move text (`e2e4`, `e7e8q`) as used by UCI engines.
//!
//! Parsing resolves the text against the legal moves of the position, so the
//! returned `Move` carries the right variant (castle, en passant, promotion)
//! without the text having to say which one it is.

use crate::board::board::Board;
use crate::board::square::Square;
use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::{Color, PieceKind};
use crate::move_generation::legal_move_generator::legal_moves;
use crate::moves::chess_move::Move;
use crate::moves::move_history::MoveHistory;
use crate::utils::algebraic::algebraic_to_square;

pub fn move_to_long_algebraic(mv: &Move) -> String {
    let mut out = String::with_capacity(5);
    out.push_str(&mv.from().to_algebraic());
    out.push_str(&mv.to().to_algebraic());
    if let Some(kind) = mv.promotion_choice() {
        out.push(kind.fen_char());
    }
    out
}

/// Splits `e7e8q` into its squares and optional promotion kind.
pub fn parse_long_algebraic(text: &str) -> ChessResult<(Square, Square, Option<PieceKind>)> {
    let invalid = || ChessError::InvalidLongAlgebraic(text.to_owned());
    if !text.is_ascii() || (text.len() != 4 && text.len() != 5) {
        return Err(invalid());
    }

    let from = algebraic_to_square(&text[0..2]).map_err(|_| invalid())?;
    let to = algebraic_to_square(&text[2..4]).map_err(|_| invalid())?;
    let promotion = match text[4..].chars().next() {
        Some(ch) => Some(char_to_promotion(ch).ok_or_else(invalid)?),
        None => None,
    };

    Ok((from, to, promotion))
}

/// Resolves long algebraic text to one of `color`'s legal moves.
pub fn long_algebraic_to_move(
    text: &str,
    board: &Board,
    history: &MoveHistory,
    color: Color,
) -> ChessResult<Move> {
    let (from, to, promotion) = parse_long_algebraic(text)?;

    let piece = board
        .piece_at(from)
        .filter(|id| board.piece(*id).color == color)
        .ok_or_else(|| ChessError::IllegalMove(format!("{text}: no {color:?} piece on {from}")))?;

    let candidates: Vec<Move> = legal_moves(board, history, piece)
        .into_iter()
        .filter(|mv| mv.to() == to)
        .collect();

    if candidates.is_empty() {
        return Err(ChessError::IllegalMove(text.to_owned()));
    }

    match promotion {
        Some(kind) => candidates
            .into_iter()
            .find(|mv| mv.promotion_choice() == Some(kind))
            .ok_or_else(|| ChessError::IllegalMove(format!("{text}: not a promotion"))),
        None if candidates[0].is_promotion() => Err(ChessError::IllegalMove(format!(
            "{text}: promotion piece missing"
        ))),
        None => candidates
            .into_iter()
            .next()
            .ok_or_else(|| ChessError::IllegalMove(text.to_owned())),
    }
}

/// Reads a promotion piece from a letter (`q`) or a name (`queen`), case-insensitively.
pub fn parse_promotion_token(token: &str) -> ChessResult<PieceKind> {
    let trimmed = token.trim();
    let mut chars = trimmed.chars();
    let kind = match (chars.next(), chars.next()) {
        (Some(ch), None) => char_to_promotion(ch),
        _ => match trimmed.to_ascii_lowercase().as_str() {
            "queen" => Some(PieceKind::Queen),
            "rook" => Some(PieceKind::Rook),
            "bishop" => Some(PieceKind::Bishop),
            "knight" => Some(PieceKind::Knight),
            _ => None,
        },
    };
    kind.ok_or_else(|| ChessError::InvalidPromotionChoice(token.to_owned()))
}

fn char_to_promotion(ch: char) -> Option<PieceKind> {
    match ch.to_ascii_lowercase() {
        'n' => Some(PieceKind::Knight),
        'b' => Some(PieceKind::Bishop),
        'r' => Some(PieceKind::Rook),
        'q' => Some(PieceKind::Queen),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{long_algebraic_to_move, move_to_long_algebraic, parse_promotion_token};
    use crate::game_state::chess_types::{Color, PieceKind, Player};
    use crate::utils::fen_parser::{from_fen, FenImport};

    fn import(fen: &str) -> FenImport {
        from_fen(fen, Player::human(Color::Light, "w"), Player::engine(Color::Dark, "b"))
            .expect("FEN should parse")
    }

    #[test]
    fn long_algebraic_round_trip_simple_move() {
        let game = import("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1");
        let mv = long_algebraic_to_move("e2e4", &game.board, &game.history, Color::Light)
            .expect("move should parse");
        assert_eq!(move_to_long_algebraic(&mv), "e2e4");
    }

    #[test]
    fn long_algebraic_round_trip_promotion() {
        let game = import("8/P7/8/8/8/8/8/k6K w - - 0 1");
        let mv = long_algebraic_to_move("a7a8n", &game.board, &game.history, Color::Light)
            .expect("move should parse");
        assert_eq!(mv.promotion_choice(), Some(PieceKind::Knight));
        assert_eq!(move_to_long_algebraic(&mv), "a7a8n");

        assert!(long_algebraic_to_move("a7a8", &game.board, &game.history, Color::Light).is_err());
    }

    #[test]
    fn long_algebraic_detects_castling_and_en_passant() {
        let castle = import("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let mv = long_algebraic_to_move("e1g1", &castle.board, &castle.history, Color::Light)
            .expect("castle should parse");
        assert!(mv.is_castle());

        let en_passant = import("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1");
        let mv = long_algebraic_to_move(
            "e5d6",
            &en_passant.board,
            &en_passant.history,
            Color::Light,
        )
        .expect("en passant should parse");
        assert!(mv.is_en_passant());
    }

    #[test]
    fn rejects_garbage_and_illegal_moves() {
        let game = import("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1");
        assert!(long_algebraic_to_move("e2e5", &game.board, &game.history, Color::Light).is_err());
        assert!(long_algebraic_to_move("e8d8", &game.board, &game.history, Color::Light).is_err());
        assert!(long_algebraic_to_move("zz", &game.board, &game.history, Color::Light).is_err());
        assert!(long_algebraic_to_move("e2e4x", &game.board, &game.history, Color::Light).is_err());
    }

    #[test]
    fn promotion_tokens() {
        assert_eq!(parse_promotion_token("Q").expect("letter"), PieceKind::Queen);
        assert_eq!(parse_promotion_token("knight").expect("name"), PieceKind::Knight);
        assert!(parse_promotion_token("king").is_err());
        assert!(parse_promotion_token("").is_err());
    }
}
