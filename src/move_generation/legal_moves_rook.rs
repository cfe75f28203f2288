use crate::board::board::Board;
use crate::board::piece::PieceId;
use crate::move_generation::legal_move_shared::{push_ray_moves, ORTHOGONAL_DIRECTIONS};
use crate::moves::chess_move::Move;

pub fn generate_rook_moves(
    board: &Board,
    _last_move: Option<&Move>,
    rook: PieceId,
    out: &mut Vec<Move>,
) {
    push_ray_moves(board, rook, &ORTHOGONAL_DIRECTIONS, out);
}
