use crate::board::square::Square;
use crate::game_state::chess_types::{Color, PieceKind};

/// Stable handle of a piece inside a board's piece arena.
///
/// Handles survive captures and board copies, so a move recorded against the
/// live board can be replayed against a copy of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub(crate) usize);

impl PieceId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A chess piece with its kind, owner, and location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    /// The kind of the piece (pawn, knight, ...).
    pub kind: PieceKind,
    /// Owner side.
    pub color: Color,
    /// Current square, or the square it was captured on.
    pub square: Square,
    /// Captured pieces stay in the arena with `alive == false` so undo can revive them.
    pub alive: bool,
    /// `Some` only for kings and rooks.
    pub has_moved: Option<bool>,
}

impl Piece {
    pub fn new(kind: PieceKind, color: Color, square: Square) -> Self {
        Self {
            kind,
            color,
            square,
            alive: true,
            has_moved: kind.tracks_moved_status().then_some(false),
        }
    }

    #[inline]
    pub fn has_moved(&self) -> bool {
        self.has_moved.unwrap_or(false)
    }

    /// Sets the moved flag on kings and rooks; other kinds ignore it.
    #[inline]
    pub fn set_has_moved(&mut self, moved: bool) {
        if let Some(flag) = self.has_moved.as_mut() {
            *flag = moved;
        }
    }

    /// True when the piece is a king or rook that has never moved.
    #[inline]
    pub fn is_unmoved(&self) -> bool {
        self.has_moved == Some(false)
    }

    /// FEN letter, uppercase for light pieces.
    pub fn fen_char(&self) -> char {
        let base = self.kind.fen_char();
        match self.color {
            Color::Light => base.to_ascii_uppercase(),
            Color::Dark => base,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Piece;
    use crate::board::square::Square;
    use crate::game_state::chess_types::{Color, PieceKind};

    #[test]
    fn only_kings_and_rooks_track_moves() {
        let mut rook = Piece::new(PieceKind::Rook, Color::Light, Square::new(7, 0));
        let mut knight = Piece::new(PieceKind::Knight, Color::Dark, Square::new(0, 1));

        rook.set_has_moved(true);
        knight.set_has_moved(true);

        assert_eq!(rook.has_moved, Some(true));
        assert_eq!(knight.has_moved, None);
        assert_eq!(rook.fen_char(), 'R');
        assert_eq!(knight.fen_char(), 'n');
    }
}
