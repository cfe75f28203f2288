//! Canonical chess-rule constants.
//!
//! Static rule literals: the standard starting position, board geometry of the
//! castling pieces, and the fifty-move threshold.

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

pub const BOARD_SIZE: u8 = 8;

pub const KING_COLUMN: u8 = 4;
pub const QUEENSIDE_ROOK_COLUMN: u8 = 0;
pub const KINGSIDE_ROOK_COLUMN: u8 = 7;

/// Half-moves without a pawn move or capture after which the game is drawn.
pub const FIFTY_MOVE_RULE_HALF_MOVES: u32 = 100;
