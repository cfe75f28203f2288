//! Errors used throughout the rules core.
//!
//! `ChessError` is the single recoverable error type of the crate. It covers
//! malformed input (FEN, algebraic squares, long algebraic moves, promotion
//! tokens) and commands that arrive in the wrong orchestrator state.
//!
//! Usage guidelines:
//! - Functions return `ChessResult<T>` for failures a caller can act on, such as
//!   a bad FEN pasted by a user or an engine reply that is not legal here.
//! - Clicking an empty square, an opponent piece, or an unreachable square is not
//!   an error. The move handler reports those as ignored input.
//! - A board without a king or a dangling piece handle is a broken invariant and
//!   panics instead of surfacing here.

use thiserror::Error;

/// Unified error type for the rules core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    /// The FEN string had a malformed structure or an impossible position.
    ///
    /// Payload: a description of what was wrong.
    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    /// A character in the FEN piece-placement field is not a piece letter or digit.
    #[error("invalid FEN piece character {0:?}")]
    InvalidFenToken(char),

    /// A square in algebraic notation (for example `e4`) could not be parsed.
    #[error("invalid algebraic square: {0}")]
    InvalidAlgebraic(String),

    /// A long algebraic move (for example `e2e4` or `e7e8q`) could not be parsed.
    #[error("invalid long algebraic move: {0}")]
    InvalidLongAlgebraic(String),

    /// A well-formed move that is not legal in the current position.
    #[error("illegal move: {0}")]
    IllegalMove(String),

    /// A promotion was resolved with a token that does not name a promotable piece.
    #[error("invalid promotion choice: {0}")]
    InvalidPromotionChoice(String),

    /// A promotion choice arrived while no promotion was pending.
    #[error("no promotion is pending")]
    NoPendingPromotion,

    /// A command was rejected because a promotion choice is still outstanding.
    #[error("a promotion choice is pending")]
    PromotionPending,

    /// A move was submitted after the game ended.
    #[error("the game is over")]
    GameOver,

    /// The game configuration cannot describe a playable game.
    #[error("invalid game configuration: {0}")]
    InvalidConfig(String),
}

/// Result alias for rules-core operations.
pub type ChessResult<T> = Result<T, ChessError>;
