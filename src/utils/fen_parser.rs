//! FEN-to-game parser.
//!
//! Builds a board, a move history seeded with the FEN counters, and a game state
//! with the right side to move. Castling letters become unmoved king/rook pairs;
//! every other king and rook is marked as moved. An en-passant target becomes a
//! synthetic pawn double step recorded as the history's seed move.

use log::debug;

use crate::board::board::Board;
use crate::board::piece::PieceId;
use crate::board::square::Square;
use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::{
    BOARD_SIZE, KINGSIDE_ROOK_COLUMN, KING_COLUMN, QUEENSIDE_ROOK_COLUMN,
};
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::moves::chess_move::Move;
use crate::moves::move_history::MoveHistory;
use crate::utils::algebraic::algebraic_to_square;

/// The non-placement FEN fields, as read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FenContext {
    pub active_color: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_target: Option<Square>,
    pub half_move_clock: u32,
    pub full_move_number: u32,
}

/// Everything needed to start a game from a FEN.
#[derive(Debug, Clone)]
pub struct FenImport {
    pub board: Board,
    pub history: MoveHistory,
    pub game_state: GameState,
    pub context: FenContext,
}

pub fn from_fen(fen: &str, player1: Player, player2: Player) -> ChessResult<FenImport> {
    let fields: Vec<&str> = fen.split_whitespace().collect();
    let [placement, side, castling, en_passant, half_move, full_move] = fields.as_slice() else {
        return Err(ChessError::InvalidFen(format!(
            "expected 6 fields, found {}",
            fields.len()
        )));
    };

    let mut board = parse_placement(placement)?;
    let active_color = parse_side_to_move(side)?;
    if is_king_in_check(&board, active_color.opposite()) {
        return Err(ChessError::InvalidFen("side not to move is in check".to_owned()));
    }
    let castling_rights = parse_castling_rights(castling)?;
    apply_castling_rights(&mut board, castling_rights)?;
    let en_passant_target = parse_en_passant_square(en_passant)?;
    let half_move_clock = half_move
        .parse::<u32>()
        .map_err(|_| ChessError::InvalidFen(format!("invalid half-move clock: {half_move}")))?;
    let full_move_number = full_move
        .parse::<u32>()
        .ok()
        .filter(|number| *number > 0)
        .ok_or_else(|| ChessError::InvalidFen(format!("invalid full-move number: {full_move}")))?;

    let mut history = MoveHistory::with_counters(half_move_clock, full_move_number);
    if let Some(target) = en_passant_target {
        history.set_seed_move(seed_double_step(&board, target, active_color)?);
    }

    let mut game_state = GameState::new(player1, player2)?;
    game_state.set_current_from_color(active_color);

    debug!("imported FEN {fen}");
    Ok(FenImport {
        board,
        history,
        game_state,
        context: FenContext {
            active_color,
            castling_rights,
            en_passant_target,
            half_move_clock,
            full_move_number,
        },
    })
}

fn parse_placement(placement: &str) -> ChessResult<Board> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != BOARD_SIZE as usize {
        return Err(ChessError::InvalidFen(
            "board layout must contain 8 ranks".to_owned(),
        ));
    }

    let mut board = Board::empty();
    for (row, rank) in ranks.iter().enumerate() {
        let mut col = 0u8;
        for ch in rank.chars() {
            if let Some(empty) = ch.to_digit(10) {
                if !(1..=8).contains(&empty) {
                    return Err(ChessError::InvalidFenToken(ch));
                }
                col += empty as u8;
                if col > BOARD_SIZE {
                    return Err(ChessError::InvalidFen(format!("rank {rank} overflows the board")));
                }
                continue;
            }

            let kind = PieceKind::from_fen_char(ch).ok_or(ChessError::InvalidFenToken(ch))?;
            let color = if ch.is_ascii_uppercase() {
                Color::Light
            } else {
                Color::Dark
            };
            if col >= BOARD_SIZE {
                return Err(ChessError::InvalidFen(format!("rank {rank} overflows the board")));
            }
            if kind == PieceKind::Pawn && (row == 0 || row == BOARD_SIZE as usize - 1) {
                return Err(ChessError::InvalidFen("pawn on a back rank".to_owned()));
            }

            board.spawn(kind, color, Square::new(row as u8, col));
            col += 1;
        }

        if col != BOARD_SIZE {
            return Err(ChessError::InvalidFen(format!("rank {rank} does not cover 8 files")));
        }
    }

    for color in [Color::Light, Color::Dark] {
        let kings = board
            .alive_pieces(color)
            .into_iter()
            .filter(|id| board.piece(*id).kind == PieceKind::King)
            .count();
        if kings != 1 {
            return Err(ChessError::InvalidFen(format!(
                "{color:?} must have exactly one king, found {kings}"
            )));
        }
    }

    Ok(board)
}

fn parse_side_to_move(side: &str) -> ChessResult<Color> {
    match side {
        "w" => Ok(Color::Light),
        "b" => Ok(Color::Dark),
        _ => Err(ChessError::InvalidFen(format!("invalid side-to-move field: {side}"))),
    }
}

fn parse_castling_rights(castling: &str) -> ChessResult<CastlingRights> {
    if castling == "-" {
        return Ok(0);
    }

    let mut rights: CastlingRights = 0;
    for ch in castling.chars() {
        let flag = match ch {
            'K' => CASTLE_LIGHT_KINGSIDE,
            'Q' => CASTLE_LIGHT_QUEENSIDE,
            'k' => CASTLE_DARK_KINGSIDE,
            'q' => CASTLE_DARK_QUEENSIDE,
            _ => {
                return Err(ChessError::InvalidFen(format!(
                    "invalid castling rights character: {ch}"
                )))
            }
        };
        if rights & flag != 0 {
            return Err(ChessError::InvalidFen(format!("repeated castling right: {ch}")));
        }
        rights |= flag;
    }

    Ok(rights)
}

/// Marks every king and rook as moved, then clears the flag on the pairs the rights name.
fn apply_castling_rights(board: &mut Board, rights: CastlingRights) -> ChessResult<()> {
    for color in [Color::Light, Color::Dark] {
        for id in board.alive_pieces(color) {
            board.piece_mut(id).set_has_moved(true);
        }
    }

    let lanes = [
        (CASTLE_LIGHT_KINGSIDE, Color::Light, KINGSIDE_ROOK_COLUMN),
        (CASTLE_LIGHT_QUEENSIDE, Color::Light, QUEENSIDE_ROOK_COLUMN),
        (CASTLE_DARK_KINGSIDE, Color::Dark, KINGSIDE_ROOK_COLUMN),
        (CASTLE_DARK_QUEENSIDE, Color::Dark, QUEENSIDE_ROOK_COLUMN),
    ];

    for (flag, color, rook_col) in lanes {
        if rights & flag == 0 {
            continue;
        }
        let row = color.back_row();
        let king = home_piece(board, Square::new(row, KING_COLUMN), PieceKind::King, color);
        let rook = home_piece(board, Square::new(row, rook_col), PieceKind::Rook, color);
        let (Some(king), Some(rook)) = (king, rook) else {
            return Err(ChessError::InvalidFen(format!(
                "castling right for {color:?} without king and rook on their home squares"
            )));
        };
        board.piece_mut(king).set_has_moved(false);
        board.piece_mut(rook).set_has_moved(false);
    }

    Ok(())
}

fn home_piece(
    board: &Board,
    square: Square,
    kind: PieceKind,
    color: Color,
) -> Option<PieceId> {
    board
        .piece_at(square)
        .filter(|id| board.piece(*id).kind == kind && board.piece(*id).color == color)
}

fn parse_en_passant_square(en_passant: &str) -> ChessResult<Option<Square>> {
    if en_passant == "-" {
        return Ok(None);
    }
    algebraic_to_square(en_passant)
        .map(Some)
        .map_err(|_| ChessError::InvalidFen(format!("invalid en-passant square: {en_passant}")))
}

/// The double step that must have just been played for `target` to be an en-passant square.
fn seed_double_step(board: &Board, target: Square, active_color: Color) -> ChessResult<Move> {
    let mover = active_color.opposite();
    let direction = mover.pawn_direction();
    let landing = target.offset(direction, 0);
    let origin = target.offset(-direction, 0);

    let (Some(landing), Some(origin)) = (landing, origin) else {
        return Err(ChessError::InvalidFen(format!("impossible en-passant square {target}")));
    };
    if origin.row() != mover.pawn_start_row() {
        return Err(ChessError::InvalidFen(format!(
            "en-passant square {target} does not follow a {mover:?} double step"
        )));
    }

    let pawn = board
        .piece_at(landing)
        .filter(|id| board.piece(*id).kind == PieceKind::Pawn && board.piece(*id).color == mover)
        .ok_or_else(|| {
            ChessError::InvalidFen(format!("no {mover:?} pawn beside en-passant square {target}"))
        })?;

    Ok(Move::plain(pawn, origin, landing, None))
}

#[cfg(test)]
mod tests {
    use super::from_fen;
    use crate::board::square::Square;
    use crate::chess_errors::ChessError;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::*;

    fn players() -> (Player, Player) {
        (Player::human(Color::Light, "white"), Player::human(Color::Dark, "black"))
    }

    fn import(fen: &str) -> Result<super::FenImport, ChessError> {
        let (p1, p2) = players();
        from_fen(fen, p1, p2)
    }

    #[test]
    fn parse_starting_fen() {
        let imported = import(STARTING_POSITION_FEN).expect("starting FEN should parse");

        assert_eq!(imported.context.active_color, Color::Light);
        assert_eq!(imported.context.castling_rights, 0b1111);
        assert_eq!(imported.context.full_move_number, 1);
        assert_eq!(imported.history.half_move_clock(), 0);
        assert_eq!(imported.board.alive_pieces(Color::Light).len(), 16);
        assert!(imported.board.is_consistent());
        assert!(imported.board.piece_on(Square::new(7, 4)).expect("e1 king").is_unmoved());
    }

    #[test]
    fn castling_letters_control_moved_flags() {
        let imported = import("r3k2r/8/8/8/8/8/8/R3K2R w Kq - 3 20").expect("FEN should parse");
        let board = &imported.board;

        assert!(!board.piece_on(Square::new(7, 7)).expect("h1 rook").has_moved());
        assert!(board.piece_on(Square::new(7, 0)).expect("a1 rook").has_moved());
        assert!(!board.piece_on(Square::new(0, 0)).expect("a8 rook").has_moved());
        assert!(board.piece_on(Square::new(0, 7)).expect("h8 rook").has_moved());
        assert_eq!(imported.history.half_move_clock(), 3);
        assert_eq!(imported.history.full_move_number(), 20);
    }

    #[test]
    fn en_passant_target_seeds_a_double_step() {
        let imported = import("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2").expect("FEN should parse");
        let seed = imported.history.last_move().expect("seed move");

        assert_eq!(seed.from(), Square::new(1, 3));
        assert_eq!(seed.to(), Square::new(3, 3));
        assert!(imported.history.is_empty());
        assert_eq!(imported.history.en_passant_target(&imported.board), Some(Square::new(2, 3)));
    }

    #[test]
    fn capturable_king_and_zero_move_number_are_rejected() {
        assert_eq!(
            import("4k3/4R3/8/8/8/8/8/4K3 w - - 0 1").err(),
            Some(ChessError::InvalidFen("side not to move is in check".to_owned()))
        );
        assert!(import("4k3/4R3/8/8/8/8/8/4K3 b - - 0 1").is_ok());

        assert!(matches!(
            import("4k3/8/8/8/8/8/8/R3K3 w - - 3 0"),
            Err(ChessError::InvalidFen(_))
        ));
        let imported = import("4k3/8/8/8/8/8/8/R3K3 w - - 3 1").expect("FEN should parse");
        assert_eq!(imported.context.full_move_number, imported.history.full_move_number());
    }

    #[test]
    fn malformed_fens_are_rejected() {
        for fen in [
            "",
            "8/8/8/8/8/8/8/8 w - - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0",
            "rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkz - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e3 0 1",
            "4k3/8/8/8/8/8/8/4K3 w K - 0 1",
            "4k3/4R3/8/8/8/8/8/4K3 w - - 0 1",
            "4k3/8/8/8/8/8/8/R3K3 w - - 3 0",
        ] {
            assert!(import(fen).is_err(), "{fen:?} should be rejected");
        }
        assert_eq!(
            import("rnbqkbnr/ppppxppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").err(),
            Some(ChessError::InvalidFenToken('x'))
        );
    }
}
