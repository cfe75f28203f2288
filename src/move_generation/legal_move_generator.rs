//! Full legal move generation pipeline.
//!
//! Dispatches each piece to its movement strategy for raw candidates, probes every
//! candidate on a copy of the board to drop moves that leave the mover's king
//! attacked, and appends castling for kings.

use log::trace;

use crate::board::board::Board;
use crate::board::piece::PieceId;
use crate::game_state::chess_types::{Color, PieceKind};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_moves_bishop::generate_bishop_moves;
use crate::move_generation::legal_moves_king::{generate_castling_moves, generate_king_moves};
use crate::move_generation::legal_moves_knight::generate_knight_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_queen::generate_queen_moves;
use crate::move_generation::legal_moves_rook::generate_rook_moves;
use crate::moves::chess_move::Move;
use crate::moves::move_history::MoveHistory;

/// Raw move generator for one piece. The last move is only consulted for en passant.
pub type MovementStrategy = fn(&Board, Option<&Move>, PieceId, &mut Vec<Move>);

/// Movement strategies indexed by `PieceKind::index()`.
pub const MOVEMENT_STRATEGIES: [MovementStrategy; 6] = [
    generate_pawn_moves,
    generate_knight_moves,
    generate_bishop_moves,
    generate_rook_moves,
    generate_queen_moves,
    generate_king_moves,
];

/// Candidate moves of a piece, ignoring whether they expose its own king.
pub fn raw_moves(board: &Board, history: &MoveHistory, piece: PieceId) -> Vec<Move> {
    let mut out = Vec::with_capacity(28);
    let kind = board.piece(piece).kind;
    MOVEMENT_STRATEGIES[kind.index()](board, history.last_move(), piece, &mut out);
    out
}

/// Plays `mv` on copies of the board and history and reports whether the mover's king survives.
pub fn leaves_king_safe(board: &Board, history: &MoveHistory, mv: &Move) -> bool {
    let mover = board.piece(mv.piece()).color;
    let mut probe_board = board.clone();
    let mut probe_history = history.clone();
    probe_history.make_move(&mut probe_board, mv.clone());
    probe_board.rebuild_register();
    !is_king_in_check(&probe_board, mover)
}

/// Legal moves of one piece. Dead pieces have none.
pub fn legal_moves(board: &Board, history: &MoveHistory, piece: PieceId) -> Vec<Move> {
    let record = board.piece(piece);
    if !record.alive {
        return Vec::new();
    }

    let mut legal: Vec<Move> = raw_moves(board, history, piece)
        .into_iter()
        .filter(|mv| {
            let safe = leaves_king_safe(board, history, mv);
            if !safe {
                trace!("discarding {}{}: leaves own king in check", mv.from(), mv.to());
            }
            safe
        })
        .collect();

    if record.kind == PieceKind::King {
        generate_castling_moves(board, piece, &mut legal);
    }
    legal
}

/// Every legal move of a side, grouped by piece in register order.
pub fn all_legal_moves(board: &Board, history: &MoveHistory, color: Color) -> Vec<Move> {
    board
        .alive_pieces(color)
        .into_iter()
        .flat_map(|piece| legal_moves(board, history, piece))
        .collect()
}

/// Stops at the first piece with a legal move.
pub fn side_has_legal_move(board: &Board, history: &MoveHistory, color: Color) -> bool {
    board
        .alive_pieces(color)
        .into_iter()
        .any(|piece| !legal_moves(board, history, piece).is_empty())
}
