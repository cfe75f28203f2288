use crate::board::piece::PieceId;
use crate::game_state::chess_types::Color;
use crate::game_state::game_state::GameState;

/// Snapshot of the mutable parts of a [`GameState`], taken before a move.
///
/// Players never change within a game, so only the side to move, the game-over
/// flag and copies of the capture lists are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameStateMemento {
    side_to_move: Color,
    is_game_over: bool,
    captured_pieces: Vec<PieceId>,
    captured_by_player1: Vec<PieceId>,
    captured_by_player2: Vec<PieceId>,
}

impl GameStateMemento {
    pub(crate) fn capture(state: &GameState) -> Self {
        Self {
            side_to_move: state.side_to_move(),
            is_game_over: state.is_game_over,
            captured_pieces: state.captured_pieces.clone(),
            captured_by_player1: state.captured_by_player1.clone(),
            captured_by_player2: state.captured_by_player2.clone(),
        }
    }

    pub(crate) fn restore_into(&self, state: &mut GameState) {
        state.set_current_from_color(self.side_to_move);
        state.is_game_over = self.is_game_over;
        state.captured_pieces.clone_from(&self.captured_pieces);
        state.captured_by_player1.clone_from(&self.captured_by_player1);
        state.captured_by_player2.clone_from(&self.captured_by_player2);
    }
}
