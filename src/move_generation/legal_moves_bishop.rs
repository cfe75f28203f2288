use crate::board::board::Board;
use crate::board::piece::PieceId;
use crate::move_generation::legal_move_shared::{push_ray_moves, DIAGONAL_DIRECTIONS};
use crate::moves::chess_move::Move;

pub fn generate_bishop_moves(
    board: &Board,
    _last_move: Option<&Move>,
    bishop: PieceId,
    out: &mut Vec<Move>,
) {
    push_ray_moves(board, bishop, &DIAGONAL_DIRECTIONS, out);
}
