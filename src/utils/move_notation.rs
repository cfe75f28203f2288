//! Short SAN-like move tokens for the move log (`e4`, `Nxe5`, `exd6`, `O-O`, `e8=Q`).
//!
//! Tokens name the moving piece, capture and destination only. There is no
//! disambiguation between two pieces of the same kind and no check suffix.

use crate::board::board::Board;
use crate::moves::chess_move::Move;
use crate::utils::algebraic::file_char;

/// Token for `mv`. Only piece kinds are read from `board`, so any board of the same game works.
pub fn move_token(board: &Board, mv: &Move) -> String {
    if let Move::Castle { king_to, rook_to, .. } = mv {
        return if rook_to.col() < king_to.col() {
            "O-O".to_owned()
        } else {
            "O-O-O".to_owned()
        };
    }

    let kind = board.piece(mv.piece()).kind;
    let mut out = String::with_capacity(7);

    match kind.notation_letter() {
        Some(letter) => out.push(letter),
        None if mv.is_capture() => out.push(file_char(mv.from())),
        None => {}
    }
    if mv.is_capture() {
        out.push('x');
    }
    out.push_str(&mv.to().to_algebraic());

    if let Some(choice) = mv.promotion_choice() {
        out.push('=');
        out.push(choice.notation_letter().unwrap_or('Q'));
    }

    out
}
