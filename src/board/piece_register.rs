//! Per-side index of a board's pieces.
//!
//! The register lists every piece a side owns, captured ones included, so the
//! "does this side have a move" and "where is this side's king" queries never
//! scan the grid. Captures only flip the piece's `alive` flag; promotions swap
//! the pawn's entry for the promoted piece and back on undo.

use crate::board::piece::{Piece, PieceId};
use crate::game_state::chess_types::{Color, PieceKind};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PieceRegister {
    pieces_by_color: [Vec<PieceId>; 2],
}

impl PieceRegister {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a register holding the given pieces.
    pub fn from_pieces<'a>(pieces: impl IntoIterator<Item = (PieceId, &'a Piece)>) -> Self {
        let mut register = Self::new();
        for (id, piece) in pieces {
            register.add_piece(piece.color, id);
        }
        register
    }

    pub fn add_piece(&mut self, color: Color, id: PieceId) {
        let entries = &mut self.pieces_by_color[color.index()];
        if !entries.contains(&id) {
            entries.push(id);
        }
    }

    /// Swaps one entry for another in place, keeping the side's ordering.
    pub fn replace_piece(&mut self, color: Color, old: PieceId, new: PieceId) {
        let entries = &mut self.pieces_by_color[color.index()];
        match entries.iter().position(|x| *x == old) {
            Some(index) => entries[index] = new,
            None => entries.push(new),
        }
    }

    /// Every piece registered to a side, captured ones included.
    pub fn pieces(&self, color: Color) -> &[PieceId] {
        &self.pieces_by_color[color.index()]
    }

    pub fn alive_pieces(&self, arena: &[Piece], color: Color) -> Vec<PieceId> {
        self.pieces(color)
            .iter()
            .copied()
            .filter(|id| arena[id.index()].alive)
            .collect()
    }

    pub fn find_king(&self, arena: &[Piece], color: Color) -> Option<PieceId> {
        self.pieces(color)
            .iter()
            .copied()
            .find(|id| arena[id.index()].kind == PieceKind::King && arena[id.index()].alive)
    }
}

#[cfg(test)]
mod tests {
    use super::PieceRegister;
    use crate::board::piece::{Piece, PieceId};
    use crate::board::square::Square;
    use crate::game_state::chess_types::{Color, PieceKind};

    #[test]
    fn add_and_replace_pieces() {
        let arena = vec![
            Piece::new(PieceKind::King, Color::Light, Square::new(7, 4)),
            Piece::new(PieceKind::Pawn, Color::Light, Square::new(1, 0)),
            Piece::new(PieceKind::Queen, Color::Light, Square::new(0, 0)),
        ];
        let mut register = PieceRegister::from_pieces(
            arena.iter().take(2).enumerate().map(|(i, p)| (PieceId(i), p)),
        );

        register.replace_piece(Color::Light, PieceId(1), PieceId(2));
        assert_eq!(register.pieces(Color::Light), &[PieceId(0), PieceId(2)]);
        assert_eq!(register.find_king(&arena, Color::Light), Some(PieceId(0)));
        assert_eq!(register.find_king(&arena, Color::Dark), None);
        assert_eq!(register.alive_pieces(&arena, Color::Light), vec![PieceId(0), PieceId(2)]);
    }
}
