//! Seeded random playouts through the move handler.
//!
//! A [`MoveChooser`] stands in for whoever drives a side (an engine process, a
//! test script). [`RandomChooser`] picks uniformly among legal moves and is used
//! by tests and benches to drive long games and then walk them back and forth.

use rand::prelude::IndexedRandom;
use rand::{rngs::StdRng, SeedableRng};

use crate::chess_errors::ChessResult;
use crate::handler::game_status::GameStatus;
use crate::handler::move_handler::MoveHandler;
use crate::moves::chess_move::Move;
use crate::utils::long_algebraic::move_to_long_algebraic;

pub trait MoveChooser {
    /// Picks one of the handler's current legal moves, or `None` to stop.
    fn choose_move(&mut self, handler: &MoveHandler) -> Option<Move>;
}

pub struct RandomChooser {
    rng: StdRng,
}

impl RandomChooser {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl MoveChooser for RandomChooser {
    fn choose_move(&mut self, handler: &MoveHandler) -> Option<Move> {
        let legal_moves = handler.all_legal_moves();
        legal_moves.as_slice().choose(&mut self.rng).cloned()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayoutResult {
    pub plies: usize,
    pub status: GameStatus,
    pub moves_lan: Vec<String>,
}

/// Plays chooser moves until the game ends, the chooser stops, or `max_plies` moves were made.
pub fn play_out(
    handler: &mut MoveHandler,
    chooser: &mut dyn MoveChooser,
    max_plies: usize,
) -> ChessResult<PlayoutResult> {
    let mut moves_lan = Vec::new();

    while moves_lan.len() < max_plies && !handler.is_game_over() {
        let Some(mv) = chooser.choose_move(handler) else {
            break;
        };
        moves_lan.push(move_to_long_algebraic(&mv));
        handler.apply_move(mv)?;
    }

    Ok(PlayoutResult {
        plies: moves_lan.len(),
        status: handler.status(),
        moves_lan,
    })
}
