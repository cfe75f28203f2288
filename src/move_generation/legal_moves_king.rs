use crate::board::board::Board;
use crate::board::piece::PieceId;
use crate::board::square::Square;
use crate::game_state::chess_rules::{KING_COLUMN, KINGSIDE_ROOK_COLUMN, QUEENSIDE_ROOK_COLUMN};
use crate::game_state::chess_types::PieceKind;
use crate::move_generation::legal_move_checks::{is_king_in_check, is_square_attacked_by_opponent};
use crate::move_generation::legal_move_shared::{push_step_moves, KING_OFFSETS};
use crate::moves::chess_move::Move;

/// Single steps only. Castling depends on check state and is added by [`generate_castling_moves`].
pub fn generate_king_moves(
    board: &Board,
    _last_move: Option<&Move>,
    king: PieceId,
    out: &mut Vec<Move>,
) {
    push_step_moves(board, king, &KING_OFFSETS, out);
}

struct CastleLane {
    rook_col: u8,
    king_to_col: u8,
    rook_to_col: u8,
    must_be_empty: &'static [u8],
    must_be_safe: &'static [u8],
}

const KINGSIDE: CastleLane = CastleLane {
    rook_col: KINGSIDE_ROOK_COLUMN,
    king_to_col: 6,
    rook_to_col: 5,
    must_be_empty: &[5, 6],
    must_be_safe: &[5, 6],
};

const QUEENSIDE: CastleLane = CastleLane {
    rook_col: QUEENSIDE_ROOK_COLUMN,
    king_to_col: 2,
    rook_to_col: 3,
    must_be_empty: &[1, 2, 3],
    must_be_safe: &[3, 2],
};

/// Castling moves available to an unmoved king standing out of check on its home square.
pub fn generate_castling_moves(board: &Board, king: PieceId, out: &mut Vec<Move>) {
    let record = board.piece(king);
    let color = record.color;
    let home = Square::new(color.back_row(), KING_COLUMN);
    if !record.is_unmoved() || record.square != home || is_king_in_check(board, color) {
        return;
    }

    for lane in [&KINGSIDE, &QUEENSIDE] {
        let row = color.back_row();
        let rook_from = Square::new(row, lane.rook_col);
        let Some(rook) = board.piece_at(rook_from) else {
            continue;
        };
        let rook_record = board.piece(rook);
        if rook_record.kind != PieceKind::Rook
            || rook_record.color != color
            || !rook_record.is_unmoved()
        {
            continue;
        }

        let path_clear = lane
            .must_be_empty
            .iter()
            .all(|&col| board.is_empty(Square::new(row, col)));
        let path_safe = path_clear
            && lane
                .must_be_safe
                .iter()
                .all(|&col| !is_square_attacked_by_opponent(board, Square::new(row, col), color));
        if !path_safe {
            continue;
        }

        out.push(Move::Castle {
            king,
            rook,
            king_from: home,
            king_to: Square::new(row, lane.king_to_col),
            rook_from,
            rook_to: Square::new(row, lane.rook_to_col),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::generate_castling_moves;
    use crate::board::board::Board;
    use crate::board::square::Square;
    use crate::game_state::chess_types::{Color, PieceKind};

    fn sq(name: &str) -> Square {
        name.parse().expect("test square should parse")
    }

    fn castling_board() -> (Board, crate::board::piece::PieceId) {
        let mut board = Board::empty();
        let king = board.spawn(PieceKind::King, Color::Light, sq("e1"));
        board.spawn(PieceKind::Rook, Color::Light, sq("a1"));
        board.spawn(PieceKind::Rook, Color::Light, sq("h1"));
        board.spawn(PieceKind::King, Color::Dark, sq("e8"));
        (board, king)
    }

    #[test]
    fn both_sides_available_on_open_back_rank() {
        let (board, king) = castling_board();
        let mut out = Vec::new();
        generate_castling_moves(&board, king, &mut out);

        let targets: Vec<Square> = out.iter().map(|mv| mv.to()).collect();
        assert_eq!(targets, vec![sq("g1"), sq("c1")]);
    }

    #[test]
    fn queenside_blocked_by_piece_on_b_file() {
        let (mut board, king) = castling_board();
        board.spawn(PieceKind::Knight, Color::Light, sq("b1"));
        let mut out = Vec::new();
        generate_castling_moves(&board, king, &mut out);

        let targets: Vec<Square> = out.iter().map(|mv| mv.to()).collect();
        assert_eq!(targets, vec![sq("g1")]);
    }

    #[test]
    fn no_castling_through_attacked_square() {
        let (mut board, king) = castling_board();
        board.spawn(PieceKind::Rook, Color::Dark, sq("f8"));
        let mut out = Vec::new();
        generate_castling_moves(&board, king, &mut out);

        let targets: Vec<Square> = out.iter().map(|mv| mv.to()).collect();
        assert_eq!(targets, vec![sq("c1")]);
    }

    #[test]
    fn no_castling_out_of_check() {
        let (mut board, king) = castling_board();
        board.spawn(PieceKind::Rook, Color::Dark, sq("e5"));
        let mut out = Vec::new();
        generate_castling_moves(&board, king, &mut out);
        assert!(out.is_empty());
    }
}
