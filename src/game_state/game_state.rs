//! Turn and bookkeeping state that sits beside the board.
//!
//! `GameState` tracks the two players, whose turn it is, whether the game has
//! ended and which pieces each player has captured. It is snapshotted into a
//! [`GameStateMemento`] before every move so undo can restore it wholesale.

use crate::board::piece::PieceId;
use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::{Color, Player};
use crate::game_state::memento::GameStateMemento;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub current_player: Player,
    pub opposing_player: Player,
    pub player1: Player,
    pub player2: Player,
    pub is_game_over: bool,
    /// Every captured piece, in capture order.
    pub captured_pieces: Vec<PieceId>,
    /// Pieces player 1 has taken from player 2.
    pub captured_by_player1: Vec<PieceId>,
    /// Pieces player 2 has taken from player 1.
    pub captured_by_player2: Vec<PieceId>,
}

impl GameState {
    /// New game with the light player to move.
    pub fn new(player1: Player, player2: Player) -> ChessResult<Self> {
        if player1.color == player2.color {
            return Err(ChessError::InvalidConfig(format!(
                "both players are {:?}",
                player1.color
            )));
        }

        let (current_player, opposing_player) = if player1.color == Color::Light {
            (player1.clone(), player2.clone())
        } else {
            (player2.clone(), player1.clone())
        };

        Ok(Self {
            current_player,
            opposing_player,
            player1,
            player2,
            is_game_over: false,
            captured_pieces: Vec::new(),
            captured_by_player1: Vec::new(),
            captured_by_player2: Vec::new(),
        })
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.current_player.color
    }

    pub fn player(&self, color: Color) -> &Player {
        if self.player1.color == color {
            &self.player1
        } else {
            &self.player2
        }
    }

    pub fn swap_players(&mut self) {
        std::mem::swap(&mut self.current_player, &mut self.opposing_player);
    }

    /// Makes the player of `color` the one to move.
    pub fn set_current_from_color(&mut self, color: Color) {
        if self.current_player.color != color {
            self.swap_players();
        }
    }

    /// Books a capture made by the player of `capturer`.
    pub fn record_capture(&mut self, capturer: Color, piece: PieceId) {
        self.captured_pieces.push(piece);
        if self.player1.color == capturer {
            self.captured_by_player1.push(piece);
        } else {
            self.captured_by_player2.push(piece);
        }
    }

    pub fn create_memento(&self) -> GameStateMemento {
        GameStateMemento::capture(self)
    }

    pub fn restore_from_memento(&mut self, memento: &GameStateMemento) {
        memento.restore_into(self);
    }
}

#[cfg(test)]
mod tests {
    use super::GameState;
    use crate::board::piece::PieceId;
    use crate::game_state::chess_types::{Color, Player};

    fn players() -> (Player, Player) {
        (Player::human(Color::Dark, "first"), Player::engine(Color::Light, "second"))
    }

    #[test]
    fn light_player_moves_first_regardless_of_order() {
        let (p1, p2) = players();
        let state = GameState::new(p1, p2).expect("distinct colors");
        assert_eq!(state.side_to_move(), Color::Light);
        assert_eq!(state.current_player.name, "second");
        assert_eq!(state.player(Color::Dark).name, "first");
    }

    #[test]
    fn same_color_players_are_rejected() {
        let result = GameState::new(
            Player::human(Color::Light, "a"),
            Player::human(Color::Light, "b"),
        );
        assert!(result.is_err());
    }

    #[test]
    fn memento_restores_turn_and_captures() {
        let (p1, p2) = players();
        let mut state = GameState::new(p1, p2).expect("distinct colors");
        let memento = state.create_memento();

        state.record_capture(Color::Dark, PieceId(3));
        state.swap_players();
        state.is_game_over = true;
        assert_eq!(state.captured_by_player1, vec![PieceId(3)]);

        state.restore_from_memento(&memento);
        assert_eq!(state.side_to_move(), Color::Light);
        assert!(state.captured_pieces.is_empty());
        assert!(state.captured_by_player1.is_empty());
        assert!(!state.is_game_over);
    }
}
