//! Position status for the side to move: check, mate, stalemate, draws.

use crate::board::board::Board;
use crate::game_state::chess_types::{Color, PieceKind};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::side_has_legal_move;
use crate::moves::move_history::MoveHistory;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    /// The side to move is in check but has a legal reply.
    Check,
    Checkmate {
        winner: Color,
    },
    Stalemate,
    /// Only the two kings are left.
    InsufficientMaterial,
    FiftyMoveRule,
}

impl GameStatus {
    #[inline]
    pub fn is_game_over(self) -> bool {
        !matches!(self, GameStatus::Ongoing | GameStatus::Check)
    }

    #[inline]
    pub fn is_draw(self) -> bool {
        matches!(
            self,
            GameStatus::Stalemate | GameStatus::InsufficientMaterial | GameStatus::FiftyMoveRule
        )
    }

    /// PGN result token.
    pub fn result_token(self) -> &'static str {
        match self {
            GameStatus::Checkmate {
                winner: Color::Light,
            } => "1-0",
            GameStatus::Checkmate {
                winner: Color::Dark,
            } => "0-1",
            status if status.is_draw() => "1/2-1/2",
            _ => "*",
        }
    }
}

/// Classifies the position for `side_to_move`.
///
/// Mate and stalemate take precedence over the draw rules, so a mating move
/// that also reaches the fifty-move limit is still a win.
pub fn evaluate_status(
    board: &Board,
    history: &MoveHistory,
    side_to_move: Color,
    fifty_move_limit: u32,
) -> GameStatus {
    let in_check = is_king_in_check(board, side_to_move);

    if !side_has_legal_move(board, history, side_to_move) {
        return if in_check {
            GameStatus::Checkmate {
                winner: side_to_move.opposite(),
            }
        } else {
            GameStatus::Stalemate
        };
    }

    if only_kings_left(board) {
        return GameStatus::InsufficientMaterial;
    }

    if history.half_move_clock() >= fifty_move_limit {
        return GameStatus::FiftyMoveRule;
    }

    if in_check {
        GameStatus::Check
    } else {
        GameStatus::Ongoing
    }
}

fn only_kings_left(board: &Board) -> bool {
    [Color::Light, Color::Dark].into_iter().all(|color| {
        let alive = board.alive_pieces(color);
        alive.len() == 1 && board.piece(alive[0]).kind == PieceKind::King
    })
}

#[cfg(test)]
mod tests {
    use super::{evaluate_status, GameStatus};
    use crate::game_state::chess_types::{Color, Player};
    use crate::utils::fen_parser::from_fen;

    fn status_of(fen: &str) -> GameStatus {
        let game = from_fen(fen, Player::human(Color::Light, "w"), Player::human(Color::Dark, "b"))
            .expect("FEN should parse");
        evaluate_status(&game.board, &game.history, game.context.active_color, 100)
    }

    #[test]
    fn fools_mate_is_checkmate() {
        let status = status_of("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
        assert_eq!(status, GameStatus::Checkmate { winner: Color::Dark });
        assert_eq!(status.result_token(), "0-1");
    }

    #[test]
    fn cornered_king_is_stalemated() {
        let status = status_of("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
        assert_eq!(status, GameStatus::Stalemate);
        assert!(status.is_draw());
    }

    #[test]
    fn bare_kings_and_fifty_moves_are_draws() {
        assert_eq!(status_of("8/8/4k3/8/8/4K3/8/8 w - - 0 40"), GameStatus::InsufficientMaterial);
        assert_eq!(status_of("8/8/4k3/8/8/4K3/8/R7 w - - 100 80"), GameStatus::FiftyMoveRule);
        assert_eq!(status_of("8/8/4k3/8/8/4K3/8/R7 w - - 99 80"), GameStatus::Ongoing);
    }

    #[test]
    fn check_is_reported() {
        assert_eq!(status_of("4k3/8/8/8/8/8/8/4RK2 b - - 0 1"), GameStatus::Check);
    }
}
