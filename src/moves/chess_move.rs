//! Reversible move commands.
//!
//! Each variant carries the piece handles and squares it needs to apply itself
//! to a board and to take itself back. Handles stay valid in board copies, so
//! the same value can be executed on the live board or on a simulation copy.

use crate::board::board::Board;
use crate::board::piece::PieceId;
use crate::board::square::Square;
use crate::game_state::chess_types::PieceKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Move {
    /// Quiet move or ordinary capture.
    Plain {
        piece: PieceId,
        from: Square,
        to: Square,
        captured: Option<PieceId>,
        /// Set on execute when a king or rook leaves its square for the first time.
        first_move: bool,
    },
    /// Pawn capture where the captured pawn stands beside the destination square.
    EnPassant {
        piece: PieceId,
        from: Square,
        to: Square,
        captured_pawn: PieceId,
        captured_pawn_square: Square,
    },
    /// King and rook moving together.
    Castle {
        king: PieceId,
        rook: PieceId,
        king_from: Square,
        king_to: Square,
        rook_from: Square,
        rook_to: Square,
    },
    /// Pawn reaching the last rank. `choice` is `None` while the kind is still undecided.
    Promotion {
        pawn: PieceId,
        from: Square,
        to: Square,
        captured: Option<PieceId>,
        choice: Option<PieceKind>,
        promoted: Option<PieceId>,
    },
}

impl Move {
    pub fn plain(piece: PieceId, from: Square, to: Square, captured: Option<PieceId>) -> Self {
        Move::Plain {
            piece,
            from,
            to,
            captured,
            first_move: false,
        }
    }

    pub fn promotion(
        pawn: PieceId,
        from: Square,
        to: Square,
        captured: Option<PieceId>,
        choice: PieceKind,
    ) -> Self {
        Move::Promotion {
            pawn,
            from,
            to,
            captured,
            choice: Some(choice),
            promoted: None,
        }
    }

    /// The piece that moves: the king of a castle, the pawn of a promotion.
    #[inline]
    pub fn piece(&self) -> PieceId {
        match self {
            Move::Plain { piece, .. } | Move::EnPassant { piece, .. } => *piece,
            Move::Castle { king, .. } => *king,
            Move::Promotion { pawn, .. } => *pawn,
        }
    }

    #[inline]
    pub fn from(&self) -> Square {
        match self {
            Move::Plain { from, .. }
            | Move::EnPassant { from, .. }
            | Move::Promotion { from, .. } => *from,
            Move::Castle { king_from, .. } => *king_from,
        }
    }

    #[inline]
    pub fn to(&self) -> Square {
        match self {
            Move::Plain { to, .. } | Move::EnPassant { to, .. } | Move::Promotion { to, .. } => *to,
            Move::Castle { king_to, .. } => *king_to,
        }
    }

    #[inline]
    pub fn captured(&self) -> Option<PieceId> {
        match self {
            Move::Plain { captured, .. } | Move::Promotion { captured, .. } => *captured,
            Move::EnPassant { captured_pawn, .. } => Some(*captured_pawn),
            Move::Castle { .. } => None,
        }
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        self.captured().is_some()
    }

    #[inline]
    pub fn is_promotion(&self) -> bool {
        matches!(self, Move::Promotion { .. })
    }

    #[inline]
    pub fn is_castle(&self) -> bool {
        matches!(self, Move::Castle { .. })
    }

    #[inline]
    pub fn is_en_passant(&self) -> bool {
        matches!(self, Move::EnPassant { .. })
    }

    #[inline]
    pub fn promotion_choice(&self) -> Option<PieceKind> {
        match self {
            Move::Promotion { choice, .. } => *choice,
            _ => None,
        }
    }

    /// Copy of a promotion with its kind undecided; other variants are returned unchanged.
    pub fn without_promotion_choice(&self) -> Self {
        let mut out = self.clone();
        if let Move::Promotion { choice, .. } = &mut out {
            *choice = None;
        }
        out
    }

    /// Copy of a promotion resolved to `kind`; other variants are returned unchanged.
    pub fn with_promotion_choice(&self, kind: PieceKind) -> Self {
        let mut out = self.clone();
        if let Move::Promotion { choice, .. } = &mut out {
            *choice = Some(kind);
        }
        out
    }

    /// True when the move resets the half-move clock (pawn move or capture).
    pub fn resets_half_move_clock(&self, board: &Board) -> bool {
        self.is_capture() || board.piece(self.piece()).kind == PieceKind::Pawn
    }

    /// Applies the move to `board`.
    ///
    /// # Panics
    ///
    /// Panics on a promotion whose piece kind has not been chosen.
    pub fn execute(&mut self, board: &mut Board) {
        match self {
            Move::Plain {
                piece,
                to,
                captured,
                first_move,
                ..
            } => {
                if let Some(captured) = captured {
                    board.kill(*captured);
                }
                *first_move = board.piece(*piece).is_unmoved();
                board.relocate(*piece, *to);
                board.piece_mut(*piece).set_has_moved(true);
            }
            Move::EnPassant {
                piece,
                to,
                captured_pawn,
                ..
            } => {
                board.kill(*captured_pawn);
                board.relocate(*piece, *to);
            }
            Move::Castle {
                king,
                rook,
                king_to,
                rook_to,
                ..
            } => {
                board.relocate(*king, *king_to);
                board.piece_mut(*king).set_has_moved(true);
                board.relocate(*rook, *rook_to);
                board.piece_mut(*rook).set_has_moved(true);
            }
            Move::Promotion {
                pawn,
                to,
                captured,
                choice,
                promoted,
                ..
            } => {
                let kind = choice.expect("promotion executed before a piece kind was chosen");
                if let Some(captured) = captured {
                    board.kill(*captured);
                }
                match promoted {
                    Some(existing) if board.piece(*existing).kind == kind => {
                        board.repromote(*pawn, *existing, *to);
                    }
                    _ => *promoted = Some(board.promote(*pawn, kind, *to)),
                }
            }
        }
    }

    /// Takes the move back, restoring every piece it touched.
    pub fn undo(&self, board: &mut Board) {
        match self {
            Move::Plain {
                piece,
                from,
                to,
                captured,
                first_move,
            } => {
                board.relocate(*piece, *from);
                if *first_move {
                    board.piece_mut(*piece).set_has_moved(false);
                }
                if let Some(captured) = captured {
                    board.revive_at(*captured, *to);
                }
            }
            Move::EnPassant {
                piece,
                from,
                captured_pawn,
                captured_pawn_square,
                ..
            } => {
                board.revive_at(*captured_pawn, *captured_pawn_square);
                board.relocate(*piece, *from);
            }
            Move::Castle {
                king,
                rook,
                king_from,
                rook_from,
                ..
            } => {
                board.relocate(*king, *king_from);
                board.piece_mut(*king).set_has_moved(false);
                board.relocate(*rook, *rook_from);
                board.piece_mut(*rook).set_has_moved(false);
            }
            Move::Promotion {
                pawn,
                from,
                to,
                captured,
                promoted,
                ..
            } => {
                let promoted = promoted.expect("undoing a promotion that never executed");
                board.unpromote(*pawn, promoted, *from);
                if let Some(captured) = captured {
                    board.revive_at(*captured, *to);
                }
            }
        }
    }

    /// Re-applies an undone move.
    pub fn redo(&mut self, board: &mut Board) {
        self.execute(board);
    }
}
