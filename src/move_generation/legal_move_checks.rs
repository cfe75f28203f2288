//! Attack queries used by check detection and castling.
//!
//! Attacks are derived from raw piece moves, never from legal moves, so asking
//! whether a king is attacked cannot recurse back into the self-check filter.

use crate::board::board::Board;
use crate::board::square::Square;
use crate::game_state::chess_types::{Color, PieceKind};
use crate::move_generation::legal_move_generator::MOVEMENT_STRATEGIES;
use crate::move_generation::legal_moves_pawn::pawn_attack_squares;

#[inline]
pub fn is_king_in_check(board: &Board, color: Color) -> bool {
    is_square_attacked_by_opponent(board, board.king_square(color), color)
}

/// True when any alive piece of `color`'s opponent could capture on `square`.
///
/// Pawns attack their two forward diagonals even when those squares are empty.
pub fn is_square_attacked_by_opponent(board: &Board, square: Square, color: Color) -> bool {
    let mut scratch = Vec::with_capacity(32);
    board.alive_pieces(color.opposite()).into_iter().any(|id| {
        let attacker = board.piece(id);
        if attacker.kind == PieceKind::Pawn {
            return pawn_attack_squares(attacker.color, attacker.square).any(|sq| sq == square);
        }
        scratch.clear();
        MOVEMENT_STRATEGIES[attacker.kind.index()](board, None, id, &mut scratch);
        scratch.iter().any(|mv| mv.to() == square)
    })
}

#[cfg(test)]
mod tests {
    use super::{is_king_in_check, is_square_attacked_by_opponent};
    use crate::board::board::Board;
    use crate::board::square::Square;
    use crate::game_state::chess_types::{Color, PieceKind};

    fn sq(name: &str) -> Square {
        name.parse().expect("test square should parse")
    }

    #[test]
    fn pawns_attack_empty_diagonals_but_not_straight_ahead() {
        let mut board = Board::empty();
        board.spawn(PieceKind::King, Color::Light, sq("a1"));
        board.spawn(PieceKind::King, Color::Dark, sq("h8"));
        board.spawn(PieceKind::Pawn, Color::Dark, sq("d5"));

        assert!(is_square_attacked_by_opponent(&board, sq("c4"), Color::Light));
        assert!(is_square_attacked_by_opponent(&board, sq("e4"), Color::Light));
        assert!(!is_square_attacked_by_opponent(&board, sq("d4"), Color::Light));
    }

    #[test]
    fn blocked_ray_gives_no_check() {
        let mut board = Board::empty();
        board.spawn(PieceKind::King, Color::Light, sq("e1"));
        board.spawn(PieceKind::King, Color::Dark, sq("h8"));
        board.spawn(PieceKind::Rook, Color::Dark, sq("e8"));
        assert!(is_king_in_check(&board, Color::Light));

        board.spawn(PieceKind::Bishop, Color::Light, sq("e4"));
        assert!(!is_king_in_check(&board, Color::Light));
    }
}
