//! Offset tables and stepping helpers shared by the per-piece generators.

use crate::board::board::Board;
use crate::board::piece::PieceId;
use crate::moves::chess_move::Move;

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

pub const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

pub const DIAGONAL_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
pub const ORTHOGONAL_DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// One move per offset landing on an empty or opponent-held square.
pub fn push_step_moves(board: &Board, piece: PieceId, offsets: &[(i8, i8)], out: &mut Vec<Move>) {
    let record = board.piece(piece);
    let from = record.square;
    for &(d_row, d_col) in offsets {
        let Some(to) = from.offset(d_row, d_col) else {
            continue;
        };
        match board.piece_at(to) {
            None => out.push(Move::plain(piece, from, to, None)),
            Some(other) if board.piece(other).color != record.color => {
                out.push(Move::plain(piece, from, to, Some(other)));
            }
            Some(_) => {}
        }
    }
}

/// Slides along each direction until the edge or a blocker. An opponent blocker is captured.
pub fn push_ray_moves(board: &Board, piece: PieceId, directions: &[(i8, i8)], out: &mut Vec<Move>) {
    let record = board.piece(piece);
    let from = record.square;
    for &(d_row, d_col) in directions {
        let mut cursor = from;
        while let Some(to) = cursor.offset(d_row, d_col) {
            match board.piece_at(to) {
                None => out.push(Move::plain(piece, from, to, None)),
                Some(other) => {
                    if board.piece(other).color != record.color {
                        out.push(Move::plain(piece, from, to, Some(other)));
                    }
                    break;
                }
            }
            cursor = to;
        }
    }
}
