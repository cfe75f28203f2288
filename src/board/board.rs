//! Mutable 8x8 board over a piece arena.
//!
//! The grid stores `PieceId` handles into `pieces`; the arena never shrinks, so
//! captured pieces keep their handle and can be revived by undo. A `Clone` of the
//! board is a full deep copy and is what legality simulation probes.

use crate::board::piece::{Piece, PieceId};
use crate::board::piece_register::PieceRegister;
use crate::board::square::Square;
use crate::game_state::chess_rules::BOARD_SIZE;
use crate::game_state::chess_types::{Color, PieceKind};

const BACK_RANK_LAYOUT: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    grid: [[Option<PieceId>; BOARD_SIZE as usize]; BOARD_SIZE as usize],
    pieces: Vec<Piece>,
    register: PieceRegister,
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    pub fn empty() -> Self {
        Self {
            grid: [[None; BOARD_SIZE as usize]; BOARD_SIZE as usize],
            pieces: Vec::with_capacity(40),
            register: PieceRegister::new(),
        }
    }

    /// Board set up in the standard starting position.
    pub fn starting_position() -> Self {
        let mut board = Self::empty();
        for color in [Color::Light, Color::Dark] {
            for (col, kind) in BACK_RANK_LAYOUT.iter().enumerate() {
                board.spawn(*kind, color, Square::new(color.back_row(), col as u8));
            }
            for col in 0..BOARD_SIZE {
                board.spawn(PieceKind::Pawn, color, Square::new(color.pawn_start_row(), col));
            }
        }
        board
    }

    /// Creates a piece, places it on its square and registers it.
    ///
    /// # Panics
    ///
    /// Panics when the square is already occupied.
    pub fn spawn(&mut self, kind: PieceKind, color: Color, square: Square) -> PieceId {
        assert!(self.is_empty(square), "cannot spawn onto occupied square {square}");
        let id = PieceId(self.pieces.len());
        self.pieces.push(Piece::new(kind, color, square));
        self.put(id);
        self.register.add_piece(color, id);
        id
    }

    #[inline]
    pub fn piece(&self, id: PieceId) -> &Piece {
        &self.pieces[id.index()]
    }

    #[inline]
    pub(crate) fn piece_mut(&mut self, id: PieceId) -> &mut Piece {
        &mut self.pieces[id.index()]
    }

    /// Every piece ever created on this board, indexed by `PieceId`.
    #[inline]
    pub fn arena(&self) -> &[Piece] {
        &self.pieces
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<PieceId> {
        self.grid[square.row() as usize][square.col() as usize]
    }

    #[inline]
    pub fn piece_on(&self, square: Square) -> Option<&Piece> {
        self.piece_at(square).map(|id| self.piece(id))
    }

    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.piece_at(square).is_none()
    }

    /// The piece on `square` when it belongs to the opponent of `color`.
    #[inline]
    pub fn opponent_at(&self, square: Square, color: Color) -> Option<PieceId> {
        self.piece_at(square).filter(|id| self.piece(*id).color != color)
    }

    #[inline]
    pub fn register(&self) -> &PieceRegister {
        &self.register
    }

    /// Discards the register and rebuilds it from the pieces on the grid.
    pub fn rebuild_register(&mut self) {
        let on_board = Square::all()
            .filter_map(|sq| self.piece_at(sq))
            .map(|id| (id, &self.pieces[id.index()]));
        self.register = PieceRegister::from_pieces(on_board);
    }

    pub fn alive_pieces(&self, color: Color) -> Vec<PieceId> {
        self.register.alive_pieces(&self.pieces, color)
    }

    /// Square of a side's king.
    ///
    /// # Panics
    ///
    /// Panics when the side has no king; a constructed board always has one.
    pub fn king_square(&self, color: Color) -> Square {
        let king = self
            .register
            .find_king(&self.pieces, color)
            .expect("every side keeps exactly one king on the board");
        self.piece(king).square
    }

    /// Takes a piece off the grid without touching its record.
    pub(crate) fn lift(&mut self, id: PieceId) {
        let square = self.piece(id).square;
        let cell = &mut self.grid[square.row() as usize][square.col() as usize];
        if *cell == Some(id) {
            *cell = None;
        }
    }

    /// Puts a piece onto the grid at the square its record names.
    pub(crate) fn put(&mut self, id: PieceId) {
        let square = self.piece(id).square;
        self.grid[square.row() as usize][square.col() as usize] = Some(id);
    }

    pub(crate) fn relocate(&mut self, id: PieceId, to: Square) {
        self.lift(id);
        self.piece_mut(id).square = to;
        self.put(id);
    }

    /// Marks a piece captured and removes it from the grid.
    pub(crate) fn kill(&mut self, id: PieceId) {
        self.lift(id);
        self.piece_mut(id).alive = false;
    }

    /// Brings a captured piece back onto `square`.
    pub(crate) fn revive_at(&mut self, id: PieceId, square: Square) {
        let piece = self.piece_mut(id);
        piece.alive = true;
        piece.square = square;
        self.put(id);
    }

    /// Replaces a pawn on the grid and in the register with a new piece of `kind` on `to`.
    pub(crate) fn promote(&mut self, pawn: PieceId, kind: PieceKind, to: Square) -> PieceId {
        self.kill(pawn);
        let color = self.piece(pawn).color;
        let id = PieceId(self.pieces.len());
        let mut promoted = Piece::new(kind, color, to);
        promoted.set_has_moved(true);
        self.pieces.push(promoted);
        self.put(id);
        self.register.replace_piece(color, pawn, id);
        id
    }

    /// Re-applies an earlier promotion, reusing the piece it created.
    pub(crate) fn repromote(&mut self, pawn: PieceId, promoted: PieceId, to: Square) {
        self.kill(pawn);
        let color = self.piece(pawn).color;
        self.revive_at(promoted, to);
        self.register.replace_piece(color, pawn, promoted);
    }

    /// Takes the promoted piece away and restores the pawn on `from`.
    pub(crate) fn unpromote(&mut self, pawn: PieceId, promoted: PieceId, from: Square) {
        self.kill(promoted);
        let color = self.piece(pawn).color;
        self.revive_at(pawn, from);
        self.register.replace_piece(color, promoted, pawn);
    }

    /// True when the register's alive entries and the grid describe the same pieces.
    pub fn is_consistent(&self) -> bool {
        let mut on_grid: Vec<PieceId> = Square::all().filter_map(|sq| self.piece_at(sq)).collect();
        let mut registered: Vec<PieceId> = [Color::Light, Color::Dark]
            .into_iter()
            .flat_map(|color| self.alive_pieces(color))
            .collect();
        on_grid.sort();
        registered.sort();

        let squares_match = on_grid.iter().all(|id| {
            let piece = self.piece(*id);
            piece.alive && self.piece_at(piece.square) == Some(*id)
        });
        let owners_match = [Color::Light, Color::Dark].into_iter().all(|color| {
            self.register
                .pieces(color)
                .iter()
                .all(|id| self.piece(*id).color == color)
        });

        on_grid == registered && squares_match && owners_match
    }
}
