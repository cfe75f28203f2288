//! Applied-move list, redo buffer and the two FEN move counters.
//!
//! Counters are recomputed exactly when stepping backward: the half-move clock
//! is rebuilt by scanning the history for the last pawn move or capture, and the
//! full-move number drops by one when the undone move was Dark's.

use crate::board::board::Board;
use crate::board::square::Square;
use crate::game_state::chess_types::{Color, PieceKind};
use crate::moves::chess_move::Move;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveHistory {
    history: Vec<Move>,
    undone: Vec<Move>,
    half_move_clock: u32,
    full_move_number: u32,
    /// Half-move clock of the position the history starts from.
    base_half_move_clock: u32,
    /// Pawn double step implied by an imported en-passant target. Never undoable.
    seed_move: Option<Move>,
}

impl Default for MoveHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveHistory {
    pub fn new() -> Self {
        Self::with_counters(0, 1)
    }

    /// History for a game starting from imported counters.
    pub fn with_counters(half_move_clock: u32, full_move_number: u32) -> Self {
        Self {
            history: Vec::new(),
            undone: Vec::new(),
            half_move_clock,
            full_move_number: full_move_number.max(1),
            base_half_move_clock: half_move_clock,
            seed_move: None,
        }
    }

    /// Records the pawn double step an imported position implies, so en passant stays available.
    pub fn set_seed_move(&mut self, mv: Move) {
        self.seed_move = Some(mv);
    }

    #[inline]
    pub fn half_move_clock(&self) -> u32 {
        self.half_move_clock
    }

    #[inline]
    pub fn full_move_number(&self) -> u32 {
        self.full_move_number
    }

    #[inline]
    pub fn moves(&self) -> &[Move] {
        &self.history
    }

    /// Undone moves, most recently undone last.
    #[inline]
    pub fn undone_moves(&self) -> &[Move] {
        &self.undone
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.history.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    #[inline]
    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    #[inline]
    pub fn can_redo(&self) -> bool {
        !self.undone.is_empty()
    }

    /// The move that produced the current position, falling back to the imported seed move.
    pub fn last_move(&self) -> Option<&Move> {
        self.history.last().or(self.seed_move.as_ref())
    }

    /// Square passed over by a pawn double step made on the previous ply.
    pub fn en_passant_target(&self, board: &Board) -> Option<Square> {
        let Some(Move::Plain { piece, from, to, .. }) = self.last_move() else {
            return None;
        };
        if board.piece(*piece).kind != PieceKind::Pawn || from.row().abs_diff(to.row()) != 2 {
            return None;
        }
        Some(Square::new((from.row() + to.row()) / 2, from.col()))
    }

    /// Executes a new move on `board` and records it. Clears the redo buffer.
    pub fn make_move(&mut self, board: &mut Board, mv: Move) {
        self.push_forward(board, mv);
        self.undone.clear();
    }

    /// Takes back the last applied move, returning it.
    pub fn undo_move(&mut self, board: &mut Board) -> Option<Move> {
        let mv = self.history.pop()?;
        mv.undo(board);

        if board.piece(mv.piece()).color == Color::Dark {
            self.full_move_number = self.full_move_number.saturating_sub(1).max(1);
        }
        self.half_move_clock = self.rescan_half_move_clock(board);

        self.undone.push(mv.clone());
        Some(mv)
    }

    /// Re-applies the most recently undone move, returning it.
    pub fn redo_move(&mut self, board: &mut Board) -> Option<Move> {
        let mv = self.undone.pop()?;
        self.push_forward(board, mv);
        self.history.last().cloned()
    }

    fn push_forward(&mut self, board: &mut Board, mut mv: Move) {
        let mover = board.piece(mv.piece()).color;
        let resets_clock = mv.resets_half_move_clock(board);

        mv.execute(board);

        if resets_clock {
            self.half_move_clock = 0;
        } else {
            self.half_move_clock += 1;
        }
        if mover == Color::Dark {
            self.full_move_number += 1;
        }
        self.history.push(mv);
    }

    fn rescan_half_move_clock(&self, board: &Board) -> u32 {
        let mut quiet = 0;
        for mv in self.history.iter().rev() {
            if mv.resets_half_move_clock(board) {
                return quiet;
            }
            quiet += 1;
        }
        self.base_half_move_clock + quiet
    }
}

#[cfg(test)]
mod tests {
    use super::MoveHistory;
    use crate::board::board::Board;
    use crate::board::square::Square;
    use crate::moves::chess_move::Move;

    fn sq(name: &str) -> Square {
        name.parse().expect("test square should parse")
    }

    fn play(board: &mut Board, history: &mut MoveHistory, from: &str, to: &str) {
        let piece = board.piece_at(sq(from)).expect("a piece on the source square");
        let captured = board.piece_at(sq(to));
        history.make_move(board, Move::plain(piece, sq(from), sq(to), captured));
    }

    #[test]
    fn counters_follow_moves_and_undo() {
        let mut board = Board::starting_position();
        let mut history = MoveHistory::new();

        play(&mut board, &mut history, "g1", "f3");
        assert_eq!((history.half_move_clock(), history.full_move_number()), (1, 1));
        play(&mut board, &mut history, "g8", "f6");
        assert_eq!((history.half_move_clock(), history.full_move_number()), (2, 2));
        play(&mut board, &mut history, "e2", "e4");
        assert_eq!((history.half_move_clock(), history.full_move_number()), (0, 2));
        play(&mut board, &mut history, "b8", "c6");
        assert_eq!((history.half_move_clock(), history.full_move_number()), (1, 3));

        history.undo_move(&mut board);
        assert_eq!((history.half_move_clock(), history.full_move_number()), (0, 2));
        history.undo_move(&mut board);
        assert_eq!((history.half_move_clock(), history.full_move_number()), (2, 2));
        history.undo_move(&mut board);
        assert_eq!((history.half_move_clock(), history.full_move_number()), (1, 1));

        history.redo_move(&mut board);
        assert_eq!((history.half_move_clock(), history.full_move_number()), (2, 2));
        assert_eq!(history.undone_moves().len(), 2);
    }

    #[test]
    fn new_move_clears_redo_buffer() {
        let mut board = Board::starting_position();
        let mut history = MoveHistory::new();

        play(&mut board, &mut history, "e2", "e4");
        history.undo_move(&mut board);
        assert!(history.can_redo());

        play(&mut board, &mut history, "d2", "d4");
        assert!(!history.can_redo());
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn undo_past_start_uses_imported_clock() {
        let mut board = Board::starting_position();
        let mut history = MoveHistory::with_counters(7, 12);

        play(&mut board, &mut history, "g1", "f3");
        assert_eq!(history.half_move_clock(), 8);
        history.undo_move(&mut board);
        assert_eq!((history.half_move_clock(), history.full_move_number()), (7, 12));
        assert!(history.undo_move(&mut board).is_none());
    }

    #[test]
    fn double_step_exposes_en_passant_target() {
        let mut board = Board::starting_position();
        let mut history = MoveHistory::new();

        play(&mut board, &mut history, "e2", "e4");
        assert_eq!(history.en_passant_target(&board), Some(sq("e3")));
        play(&mut board, &mut history, "g8", "f6");
        assert_eq!(history.en_passant_target(&board), None);
    }
}
