//! Game setup options for the move handler.
//!
//! `GameConfig::default()` is a human-vs-human game from the standard start.
//! `GameConfig::from_env()` layers these environment switches on top:
//! - `PLUM_RULES_PLAYER2_ENGINE`: `1`/`true` makes player 2 an engine.
//! - `PLUM_RULES_START_FEN`: position to start from instead of the standard one.
//! - `PLUM_RULES_FIFTY_MOVE_LIMIT`: half-move count that draws the game.

use log::warn;

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::FIFTY_MOVE_RULE_HALF_MOVES;
use crate::game_state::chess_types::{Color, Player, PlayerKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub player1: Player,
    pub player2: Player,
    /// When a human faces an engine, undo/redo step over the engine's reply too.
    pub undo_full_turn_against_engine: bool,
    /// Half-moves without a pawn move or capture that end the game in a draw.
    pub fifty_move_limit: u32,
    /// FEN to start from; `None` means the standard starting position.
    pub starting_fen: Option<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player1: Player::human(Color::Light, "Player 1"),
            player2: Player::human(Color::Dark, "Player 2"),
            undo_full_turn_against_engine: true,
            fifty_move_limit: FIFTY_MOVE_RULE_HALF_MOVES,
            starting_fen: None,
        }
    }
}

impl GameConfig {
    /// Human playing light against an engine playing dark.
    pub fn against_engine(engine_name: impl Into<String>) -> Self {
        Self {
            player2: Player::engine(Color::Dark, engine_name),
            ..Self::default()
        }
    }

    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(value) = std::env::var("PLUM_RULES_PLAYER2_ENGINE") {
            if value == "1" || value.eq_ignore_ascii_case("true") {
                config.player2.kind = PlayerKind::Engine;
            }
        }

        if let Ok(fen) = std::env::var("PLUM_RULES_START_FEN") {
            let fen = fen.trim();
            if !fen.is_empty() {
                config.starting_fen = Some(fen.to_owned());
            }
        }

        if let Ok(value) = std::env::var("PLUM_RULES_FIFTY_MOVE_LIMIT") {
            match value.parse::<u32>() {
                Ok(limit) if limit > 0 => config.fifty_move_limit = limit,
                _ => warn!("ignoring PLUM_RULES_FIFTY_MOVE_LIMIT={value:?}"),
            }
        }

        config
    }

    /// Rejects setups no game can be played with.
    pub fn validate(&self) -> ChessResult<()> {
        if self.player1.color == self.player2.color {
            return Err(ChessError::InvalidConfig(
                "players must have different colors".to_owned(),
            ));
        }
        if self.fifty_move_limit == 0 {
            return Err(ChessError::InvalidConfig(
                "fifty-move limit must be positive".to_owned(),
            ));
        }
        Ok(())
    }

    /// True when exactly one side is an engine.
    pub fn is_human_vs_engine(&self) -> bool {
        self.player1.is_engine() != self.player2.is_engine()
    }
}
