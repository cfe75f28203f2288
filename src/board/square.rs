use std::fmt;
use std::str::FromStr;

use crate::chess_errors::ChessError;
use crate::game_state::chess_rules::BOARD_SIZE;
use crate::utils::algebraic::{algebraic_to_square, square_to_algebraic};

/// A board coordinate. Row 0 is rank 8, column 0 is the a-file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    /// Builds a square from in-range indices.
    ///
    /// # Panics
    ///
    /// Panics when `row` or `col` is outside `0..8`.
    #[inline]
    pub const fn new(row: u8, col: u8) -> Self {
        assert!(row < BOARD_SIZE && col < BOARD_SIZE, "square index out of bounds");
        Self { row, col }
    }

    /// Builds a square from signed indices, or `None` when off the board.
    #[inline]
    pub fn try_new(row: i8, col: i8) -> Option<Self> {
        let size = BOARD_SIZE as i8;
        if (0..size).contains(&row) && (0..size).contains(&col) {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    #[inline]
    pub const fn row(self) -> u8 {
        self.row
    }

    #[inline]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// Moves the square by a row and column offset, `None` when the result leaves the board.
    #[inline]
    pub fn offset(self, d_row: i8, d_col: i8) -> Option<Self> {
        Self::try_new(self.row as i8 + d_row, self.col as i8 + d_col)
    }

    pub fn to_algebraic(self) -> String {
        square_to_algebraic(self)
    }

    /// Iterates every square, rank 8 first, a-file to h-file within a rank.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Square::new(row, col)))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&square_to_algebraic(*self))
    }
}

impl FromStr for Square {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        algebraic_to_square(s)
    }
}

#[cfg(test)]
mod tests {
    use super::Square;

    #[test]
    fn offsets_stay_on_the_board() {
        let a8 = Square::new(0, 0);
        assert_eq!(a8.offset(-1, 0), None);
        assert_eq!(a8.offset(1, 1), Some(Square::new(1, 1)));
        assert_eq!(Square::new(7, 7).offset(0, 1), None);
    }

    #[test]
    fn squares_compare_by_value() {
        let e4: Square = "e4".parse().expect("e4 should parse");
        assert_eq!(e4, Square::new(4, 4));
        assert_eq!(e4.to_string(), "e4");
        assert_eq!(Square::all().count(), 64);
    }
}
