//! Crate root module declarations for the Plum Rules chess core.
//!
//! This file exposes the rules subsystems (board and pieces, reversible moves,
//! legal move generation, game state, the move handler, and notation helpers) so
//! front ends, engine bridges, and tests can import stable module paths.

pub mod chess_errors;

pub mod board {
    pub mod board;
    pub mod piece;
    pub mod piece_register;
    pub mod square;
}

pub mod game_state {
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_config;
    pub mod game_state;
    pub mod memento;
}

pub mod moves {
    pub mod chess_move;
    pub mod move_history;
}

pub mod move_generation {
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_move_shared;
    pub mod legal_moves_bishop;
    pub mod legal_moves_king;
    pub mod legal_moves_knight;
    pub mod legal_moves_pawn;
    pub mod legal_moves_queen;
    pub mod legal_moves_rook;
    pub mod perft;
}

pub mod handler {
    pub mod game_status;
    pub mod move_handler;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod long_algebraic;
    pub mod move_notation;
    pub mod pgn;
    pub mod random_playout;
    pub mod render_board;
}
