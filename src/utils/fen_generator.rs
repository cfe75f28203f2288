//! Game-to-FEN serializer.
//!
//! Castling availability is derived from the moved flags of kings and rooks on
//! their home squares, and the en-passant field from the last move in history.

use crate::board::board::Board;
use crate::board::square::Square;
use crate::game_state::chess_rules::{
    BOARD_SIZE, KINGSIDE_ROOK_COLUMN, KING_COLUMN, QUEENSIDE_ROOK_COLUMN,
};
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::moves::move_history::MoveHistory;

pub fn to_fen(board: &Board, history: &MoveHistory, game_state: &GameState) -> String {
    let en_passant = history
        .en_passant_target(board)
        .map_or_else(|| "-".to_owned(), |square| square.to_algebraic());

    format!(
        "{} {} {} {} {} {}",
        placement_field(board),
        game_state.side_to_move().fen_char(),
        castling_field(castling_rights(board)),
        en_passant,
        history.half_move_clock(),
        history.full_move_number()
    )
}

/// Piece placement field, rank 8 first.
pub fn placement_field(board: &Board) -> String {
    let mut out = String::with_capacity(72);

    for row in 0..BOARD_SIZE {
        let mut empty_count = 0u8;

        for col in 0..BOARD_SIZE {
            match board.piece_on(Square::new(row, col)) {
                Some(piece) => {
                    if empty_count > 0 {
                        out.push(char::from(b'0' + empty_count));
                        empty_count = 0;
                    }
                    out.push(piece.fen_char());
                }
                None => empty_count += 1,
            }
        }

        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }
        if row + 1 < BOARD_SIZE {
            out.push('/');
        }
    }

    out
}

/// Castling rights still available, judged from unmoved kings and rooks on their home squares.
pub fn castling_rights(board: &Board) -> CastlingRights {
    let mut rights: CastlingRights = 0;

    for (color, kingside, queenside) in [
        (Color::Light, CASTLE_LIGHT_KINGSIDE, CASTLE_LIGHT_QUEENSIDE),
        (Color::Dark, CASTLE_DARK_KINGSIDE, CASTLE_DARK_QUEENSIDE),
    ] {
        let row = color.back_row();
        if !unmoved_at(board, Square::new(row, KING_COLUMN), PieceKind::King, color) {
            continue;
        }
        if unmoved_at(board, Square::new(row, KINGSIDE_ROOK_COLUMN), PieceKind::Rook, color) {
            rights |= kingside;
        }
        if unmoved_at(board, Square::new(row, QUEENSIDE_ROOK_COLUMN), PieceKind::Rook, color) {
            rights |= queenside;
        }
    }

    rights
}

fn unmoved_at(board: &Board, square: Square, kind: PieceKind, color: Color) -> bool {
    board
        .piece_on(square)
        .is_some_and(|piece| piece.kind == kind && piece.color == color && piece.is_unmoved())
}

fn castling_field(rights: CastlingRights) -> String {
    if rights == 0 {
        return "-".to_owned();
    }

    let mut out = String::with_capacity(4);
    if (rights & CASTLE_LIGHT_KINGSIDE) != 0 {
        out.push('K');
    }
    if (rights & CASTLE_LIGHT_QUEENSIDE) != 0 {
        out.push('Q');
    }
    if (rights & CASTLE_DARK_KINGSIDE) != 0 {
        out.push('k');
    }
    if (rights & CASTLE_DARK_QUEENSIDE) != 0 {
        out.push('q');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::to_fen;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::{Color, Player};
    use crate::utils::fen_parser::from_fen;

    fn round_trip(fen: &str) -> String {
        let imported = from_fen(
            fen,
            Player::human(Color::Light, "white"),
            Player::human(Color::Dark, "black"),
        )
        .expect("FEN should parse");
        to_fen(&imported.board, &imported.history, &imported.game_state)
    }

    #[test]
    fn fen_round_trips() {
        for fen in [
            STARTING_POSITION_FEN,
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "r3k2r/8/8/8/8/8/8/R3K2R b Kq - 7 31",
            "rnbqkbnr/pppp1ppp/8/8/3Pp3/8/PPP1PPPP/RNBQKBNR b KQkq d3 0 2",
            "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2",
            "7k/5Q2/6K1/8/8/8/8/8 b - - 0 1",
        ] {
            assert_eq!(round_trip(fen), fen);
        }
    }
}
