use crate::board::board::Board;
use crate::board::piece::PieceId;
use crate::board::square::Square;
use crate::game_state::chess_types::{Color, PieceKind, PROMOTION_CHOICES};
use crate::moves::chess_move::Move;

pub fn generate_pawn_moves(
    board: &Board,
    last_move: Option<&Move>,
    pawn: PieceId,
    out: &mut Vec<Move>,
) {
    let record = board.piece(pawn);
    let color = record.color;
    let from = record.square;
    let direction = color.pawn_direction();

    if let Some(one_step) = from.offset(direction, 0) {
        if board.is_empty(one_step) {
            push_pawn_move(pawn, color, from, one_step, None, out);

            if from.row() == color.pawn_start_row() {
                if let Some(two_step) = from.offset(2 * direction, 0) {
                    if board.is_empty(two_step) {
                        out.push(Move::plain(pawn, from, two_step, None));
                    }
                }
            }
        }
    }

    for d_col in [-1, 1] {
        let Some(to) = from.offset(direction, d_col) else {
            continue;
        };
        if let Some(victim) = board.opponent_at(to, color) {
            push_pawn_move(pawn, color, from, to, Some(victim), out);
        }
    }

    if let Some(mv) = en_passant_capture(board, last_move, pawn) {
        out.push(mv);
    }
}

/// The two squares a pawn attacks, whether or not anything stands there.
pub fn pawn_attack_squares(color: Color, from: Square) -> impl Iterator<Item = Square> {
    let direction = color.pawn_direction();
    [-1, 1]
        .into_iter()
        .filter_map(move |d_col| from.offset(direction, d_col))
}

/// Moves onto the far rank fan out into one candidate per promotion choice.
fn push_pawn_move(
    pawn: PieceId,
    color: Color,
    from: Square,
    to: Square,
    captured: Option<PieceId>,
    out: &mut Vec<Move>,
) {
    if to.row() == color.promotion_row() {
        for kind in PROMOTION_CHOICES {
            out.push(Move::promotion(pawn, from, to, captured, kind));
        }
    } else {
        out.push(Move::plain(pawn, from, to, captured));
    }
}

fn en_passant_capture(board: &Board, last_move: Option<&Move>, pawn: PieceId) -> Option<Move> {
    let Some(Move::Plain {
        piece: victim,
        from: victim_from,
        to: victim_to,
        ..
    }) = last_move
    else {
        return None;
    };

    let record = board.piece(pawn);
    let victim_record = board.piece(*victim);
    let double_step = victim_record.kind == PieceKind::Pawn
        && victim_record.color != record.color
        && victim_record.alive
        && victim_from.row().abs_diff(victim_to.row()) == 2;
    let beside = victim_to.row() == record.square.row()
        && victim_to.col().abs_diff(record.square.col()) == 1;
    if !double_step || !beside || board.piece_at(*victim_to) != Some(*victim) {
        return None;
    }

    let to = record
        .square
        .offset(record.color.pawn_direction(), victim_to.col() as i8 - record.square.col() as i8)?;
    board.is_empty(to).then(|| Move::EnPassant {
        piece: pawn,
        from: record.square,
        to,
        captured_pawn: *victim,
        captured_pawn_square: *victim_to,
    })
}

#[cfg(test)]
mod tests {
    use super::generate_pawn_moves;
    use crate::board::board::Board;
    use crate::board::square::Square;
    use crate::game_state::chess_types::{Color, PieceKind};
    use crate::moves::chess_move::Move;

    fn sq(name: &str) -> Square {
        name.parse().expect("test square should parse")
    }

    #[test]
    fn start_rank_pawn_has_single_and_double_step() {
        let board = Board::starting_position();
        let pawn = board.piece_at(sq("e2")).expect("pawn on e2");
        let mut out = Vec::new();
        generate_pawn_moves(&board, None, pawn, &mut out);

        let targets: Vec<Square> = out.iter().map(Move::to).collect();
        assert_eq!(targets, vec![sq("e3"), sq("e4")]);
    }

    #[test]
    fn far_rank_capture_emits_every_promotion_choice() {
        let mut board = Board::empty();
        board.spawn(PieceKind::King, Color::Light, sq("e1"));
        board.spawn(PieceKind::King, Color::Dark, sq("h8"));
        let pawn = board.spawn(PieceKind::Pawn, Color::Dark, sq("b2"));
        board.spawn(PieceKind::Knight, Color::Light, sq("b1"));
        board.spawn(PieceKind::Rook, Color::Light, sq("a1"));

        let mut out = Vec::new();
        generate_pawn_moves(&board, None, pawn, &mut out);

        assert_eq!(out.len(), 4);
        assert!(out.iter().all(|mv| mv.is_promotion() && mv.to() == sq("a1")));
        let kinds: Vec<_> = out.iter().filter_map(Move::promotion_choice).collect();
        assert_eq!(
            kinds,
            vec![PieceKind::Queen, PieceKind::Rook, PieceKind::Bishop, PieceKind::Knight]
        );
    }

    #[test]
    fn en_passant_requires_an_adjacent_double_step() {
        let mut board = Board::empty();
        board.spawn(PieceKind::King, Color::Light, sq("e1"));
        board.spawn(PieceKind::King, Color::Dark, sq("e8"));
        let capturer = board.spawn(PieceKind::Pawn, Color::Light, sq("e5"));
        let victim = board.spawn(PieceKind::Pawn, Color::Dark, sq("d5"));

        let double_step = Move::plain(victim, sq("d7"), sq("d5"), None);
        let mut out = Vec::new();
        generate_pawn_moves(&board, Some(&double_step), capturer, &mut out);
        assert!(out.iter().any(|mv| mv.is_en_passant() && mv.to() == sq("d6")));

        let single_step = Move::plain(victim, sq("d6"), sq("d5"), None);
        out.clear();
        generate_pawn_moves(&board, Some(&single_step), capturer, &mut out);
        assert!(!out.iter().any(Move::is_en_passant));
    }
}
