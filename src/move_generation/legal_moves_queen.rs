use crate::board::board::Board;
use crate::board::piece::PieceId;
use crate::move_generation::legal_move_shared::{
    push_ray_moves, DIAGONAL_DIRECTIONS, ORTHOGONAL_DIRECTIONS,
};
use crate::moves::chess_move::Move;

pub fn generate_queen_moves(
    board: &Board,
    _last_move: Option<&Move>,
    queen: PieceId,
    out: &mut Vec<Move>,
) {
    push_ray_moves(board, queen, &DIAGONAL_DIRECTIONS, out);
    push_ray_moves(board, queen, &ORTHOGONAL_DIRECTIONS, out);
}
