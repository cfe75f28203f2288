use crate::board::board::Board;
use crate::board::piece::PieceId;
use crate::move_generation::legal_move_shared::{push_step_moves, KNIGHT_OFFSETS};
use crate::moves::chess_move::Move;

pub fn generate_knight_moves(
    board: &Board,
    _last_move: Option<&Move>,
    knight: PieceId,
    out: &mut Vec<Move>,
) {
    push_step_moves(board, knight, &KNIGHT_OFFSETS, out);
}
