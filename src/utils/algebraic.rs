//! Square conversions for algebraic coordinates.
//!
//! Converts between human-readable coordinates (e.g., `e4`) and board squares.
//! Files map to columns a-h; ranks 8-1 map to rows 0-7.

use crate::board::square::Square;
use crate::chess_errors::{ChessError, ChessResult};

/// Convert algebraic notation (for example: "e4") to a square.
#[inline]
pub fn algebraic_to_square(square: &str) -> ChessResult<Square> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(ChessError::InvalidAlgebraic(square.to_owned()));
    }

    let file = bytes[0];
    let rank = bytes[1];

    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(ChessError::InvalidAlgebraic(square.to_owned()));
    }

    let col = file - b'a';
    let row = b'8' - rank;
    Ok(Square::new(row, col))
}

/// Convert a square to algebraic notation (for example: "e4").
#[inline]
pub fn square_to_algebraic(square: Square) -> String {
    let file_char = char::from(b'a' + square.col());
    let rank_char = char::from(b'8' - square.row());
    format!("{file_char}{rank_char}")
}

/// File letter of a square, used by pawn capture notation.
#[inline]
pub fn file_char(square: Square) -> char {
    char::from(b'a' + square.col())
}

#[cfg(test)]
mod tests {
    use super::{algebraic_to_square, square_to_algebraic};
    use crate::board::square::Square;

    #[test]
    fn corner_square_conversions() {
        assert_eq!(algebraic_to_square("a8").expect("a8 should parse"), Square::new(0, 0));
        assert_eq!(algebraic_to_square("h1").expect("h1 should parse"), Square::new(7, 7));
        assert_eq!(square_to_algebraic(Square::new(0, 0)), "a8");
        assert_eq!(square_to_algebraic(Square::new(7, 7)), "h1");
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        assert!(algebraic_to_square("i1").is_err());
        assert!(algebraic_to_square("a9").is_err());
        assert!(algebraic_to_square("e").is_err());
    }
}
