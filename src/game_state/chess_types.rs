//! Core value types shared by the board, move, and game-state layers.
//!
//! Rows run from the top of the board: row 0 is rank 8 and row 7 is rank 1, so
//! light pawns advance toward row 0.

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// White.
    Light,
    /// Black.
    Dark,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::Light => 0,
            Color::Dark => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::Light => Color::Dark,
            Color::Dark => Color::Light,
        }
    }

    /// Row delta of a single pawn step.
    #[inline]
    pub const fn pawn_direction(self) -> i8 {
        match self {
            Color::Light => -1,
            Color::Dark => 1,
        }
    }

    #[inline]
    pub const fn pawn_start_row(self) -> u8 {
        match self {
            Color::Light => 6,
            Color::Dark => 1,
        }
    }

    /// Row holding this side's king and rooks at the start.
    #[inline]
    pub const fn back_row(self) -> u8 {
        match self {
            Color::Light => 7,
            Color::Dark => 0,
        }
    }

    /// Row on which this side's pawns promote.
    #[inline]
    pub const fn promotion_row(self) -> u8 {
        match self {
            Color::Light => 0,
            Color::Dark => 7,
        }
    }

    #[inline]
    pub const fn fen_char(self) -> char {
        match self {
            Color::Light => 'w',
            Color::Dark => 'b',
        }
    }
}

/// Piece kind (color is carried separately by the piece record).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    /// Only kings and rooks track whether they have moved (castling eligibility).
    #[inline]
    pub const fn tracks_moved_status(self) -> bool {
        matches!(self, PieceKind::King | PieceKind::Rook)
    }

    /// Lowercase FEN letter.
    #[inline]
    pub const fn fen_char(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    /// Letter used in SAN-like move tokens; pawns have none.
    #[inline]
    pub const fn notation_letter(self) -> Option<char> {
        match self {
            PieceKind::Pawn => None,
            PieceKind::Knight => Some('N'),
            PieceKind::Bishop => Some('B'),
            PieceKind::Rook => Some('R'),
            PieceKind::Queen => Some('Q'),
            PieceKind::King => Some('K'),
        }
    }

    pub fn from_fen_char(ch: char) -> Option<Self> {
        match ch.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }
}

/// Pieces a pawn may promote to, in the order candidates are generated.
pub const PROMOTION_CHOICES: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

/// Who drives a side's moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerKind {
    Human,
    Engine,
}

/// One of the two participants of a game.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Player {
    pub color: Color,
    pub kind: PlayerKind,
    pub name: String,
}

impl Player {
    pub fn new(color: Color, kind: PlayerKind, name: impl Into<String>) -> Self {
        Self {
            color,
            kind,
            name: name.into(),
        }
    }

    pub fn human(color: Color, name: impl Into<String>) -> Self {
        Self::new(color, PlayerKind::Human, name)
    }

    pub fn engine(color: Color, name: impl Into<String>) -> Self {
        Self::new(color, PlayerKind::Engine, name)
    }

    #[inline]
    pub fn is_engine(&self) -> bool {
        self.kind == PlayerKind::Engine
    }
}

/// Castling availability bitmask, as it appears in the FEN castling field.
pub type CastlingRights = u8;
pub const CASTLE_LIGHT_KINGSIDE: CastlingRights = 1 << 0;
pub const CASTLE_LIGHT_QUEENSIDE: CastlingRights = 1 << 1;
pub const CASTLE_DARK_KINGSIDE: CastlingRights = 1 << 2;
pub const CASTLE_DARK_QUEENSIDE: CastlingRights = 1 << 3;
