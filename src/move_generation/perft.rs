//! Perft node counting over the legal move generator.
//!
//! Walks the move tree with make/undo on a single board, so every count also
//! exercises exact reversal of each move kind.

use crate::board::board::Board;
use crate::game_state::chess_types::Color;
use crate::move_generation::legal_move_generator::all_legal_moves;
use crate::moves::move_history::MoveHistory;
use crate::utils::long_algebraic::move_to_long_algebraic;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
    }
}

/// Number of leaf positions `depth` plies below the current one.
pub fn perft(board: &mut Board, history: &mut MoveHistory, side_to_move: Color, depth: u32) -> u64 {
    perft_counts(board, history, side_to_move, depth).nodes
}

/// Leaf count plus a breakdown of the moves that produced the leaves.
pub fn perft_counts(
    board: &mut Board,
    history: &mut MoveHistory,
    side_to_move: Color,
    depth: u32,
) -> PerftCounts {
    if depth == 0 {
        return PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };
    }

    let moves = all_legal_moves(board, history, side_to_move);
    let mut total = PerftCounts::default();

    for mv in moves {
        if depth == 1 {
            total.nodes += 1;
            total.captures += u64::from(mv.is_capture());
            total.en_passant += u64::from(mv.is_en_passant());
            total.castles += u64::from(mv.is_castle());
            total.promotions += u64::from(mv.is_promotion());
            continue;
        }

        history.make_move(board, mv);
        total.merge(perft_counts(board, history, side_to_move.opposite(), depth - 1));
        history.undo_move(board);
    }

    total
}

/// Per-root-move node counts, for diffing against a reference engine.
pub fn perft_divide(
    board: &mut Board,
    history: &mut MoveHistory,
    side_to_move: Color,
    depth: u32,
) -> Vec<(String, u64)> {
    if depth == 0 {
        return Vec::new();
    }

    let moves = all_legal_moves(board, history, side_to_move);
    let mut out = Vec::with_capacity(moves.len());
    for mv in moves {
        let label = move_to_long_algebraic(&mv);
        history.make_move(board, mv);
        let nodes = perft(board, history, side_to_move.opposite(), depth - 1);
        history.undo_move(board);
        out.push((label, nodes));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{perft, perft_counts, perft_divide};
    use crate::board::board::Board;
    use crate::game_state::chess_types::{Color, Player};
    use crate::moves::move_history::MoveHistory;
    use crate::utils::fen_generator::placement_field;
    use crate::utils::fen_parser::from_fen;

    fn run_fen(fen: &str, depth: u32) -> u64 {
        let import = from_fen(
            fen,
            Player::human(Color::Light, "a"),
            Player::human(Color::Dark, "b"),
        )
        .expect("test FEN should parse");
        let mut board = import.board;
        let mut history = import.history;
        let side = import.context.active_color;
        let before = placement_field(&board);

        let nodes = perft(&mut board, &mut history, side, depth);
        assert!(board.is_consistent());
        assert_eq!(placement_field(&board), before);
        nodes
    }

    #[test]
    fn startpos_perft_shallow() {
        let mut board = Board::starting_position();
        let mut history = MoveHistory::new();
        assert_eq!(perft(&mut board, &mut history, Color::Light, 1), 20);
        assert_eq!(perft(&mut board, &mut history, Color::Light, 2), 400);
        assert_eq!(perft(&mut board, &mut history, Color::Light, 3), 8_902);
    }

    #[test]
    fn startpos_depth_three_breakdown() {
        let mut board = Board::starting_position();
        let mut history = MoveHistory::new();
        let counts = perft_counts(&mut board, &mut history, Color::Light, 3);
        assert_eq!(counts.nodes, 8_902);
        assert_eq!(counts.captures, 34);
        assert_eq!(counts.castles, 0);
    }

    #[test]
    fn rook_endgame_position() {
        let fen = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
        assert_eq!(run_fen(fen, 1), 14);
        assert_eq!(run_fen(fen, 2), 191);
        assert_eq!(run_fen(fen, 3), 2_812);
    }

    #[test]
    fn kiwipete_position() {
        let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
        assert_eq!(run_fen(fen, 1), 48);
        assert_eq!(run_fen(fen, 2), 2_039);
    }

    #[test]
    fn promotion_heavy_position() {
        let fen = "n1n5/PPPk4/8/8/8/8/4Kppp/5N1N b - - 0 1";
        assert_eq!(run_fen(fen, 1), 24);
        assert_eq!(run_fen(fen, 2), 496);
    }

    #[test]
    fn divide_sums_to_perft() {
        let mut board = Board::starting_position();
        let mut history = MoveHistory::new();
        let divided = perft_divide(&mut board, &mut history, Color::Light, 2);
        assert_eq!(divided.len(), 20);
        assert_eq!(divided.iter().map(|(_, n)| n).sum::<u64>(), 400);
        assert!(divided.iter().any(|(mv, n)| mv == "e2e4" && *n == 20));
    }
}
