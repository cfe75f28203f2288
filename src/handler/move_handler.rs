//! Move orchestrator: selection, commit, promotion choice, undo/redo.
//!
//! `MoveHandler` owns the live board, the move history, the game state and the
//! memento stack. Between calls the four agree: the memento stack holds one entry
//! per applied move, plus one while a promotion choice is pending.
//!
//! States run `Idle -> PieceSelected -> (AwaitingPromotionChoice) -> Idle`.
//! Clicks on empty squares, opponent pieces or unreachable squares are ignored
//! and reported as [`SelectionOutcome::Ignored`], never as errors.

use log::{debug, info, warn};

use crate::board::board::Board;
use crate::board::piece::PieceId;
use crate::board::square::Square;
use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::{Color, PieceKind, PROMOTION_CHOICES};
use crate::game_state::game_config::GameConfig;
use crate::game_state::game_state::GameState;
use crate::game_state::memento::GameStateMemento;
use crate::handler::game_status::{evaluate_status, GameStatus};
use crate::move_generation::legal_move_generator::{all_legal_moves, legal_moves};
use crate::moves::chess_move::Move;
use crate::moves::move_history::MoveHistory;
use crate::utils::fen_generator::to_fen;
use crate::utils::fen_parser::{from_fen, FenImport};
use crate::utils::long_algebraic::{
    long_algebraic_to_move, move_to_long_algebraic, parse_promotion_token,
};
use crate::utils::move_notation::move_token;
use crate::utils::pgn::{default_headers, write_pgn_with_headers};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerState {
    Idle,
    PieceSelected {
        piece: PieceId,
        legal_moves: Vec<Move>,
    },
    /// A pawn move to the last rank waits for its piece kind. Nothing is committed yet.
    AwaitingPromotionChoice {
        piece: PieceId,
        pending: Move,
        legal_moves: Vec<Move>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome {
    Ignored,
    Selected {
        piece: PieceId,
        destinations: Vec<Square>,
    },
    AwaitingPromotion,
    Moved(GameStatus),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromotionChoice {
    Promote(PieceKind),
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryStep {
    Applied(GameStatus),
    NothingToUndo,
    NothingToRedo,
}

/// One row of the move log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveLogEntry {
    /// 1-based ply index.
    pub ply: usize,
    pub token: String,
    /// Undone moves stay in the log until a new move replaces them.
    pub undone: bool,
}

#[derive(Debug, Clone)]
pub struct MoveHandler {
    config: GameConfig,
    board: Board,
    history: MoveHistory,
    game_state: GameState,
    mementos: Vec<GameStateMemento>,
    state: HandlerState,
    status: GameStatus,
    initial_fen: String,
    initial_side: Color,
    initial_full_move: u32,
}

impl MoveHandler {
    pub fn new(config: GameConfig) -> ChessResult<Self> {
        config.validate()?;
        let fen = config
            .starting_fen
            .clone()
            .unwrap_or_else(|| STARTING_POSITION_FEN.to_owned());
        let import = from_fen(&fen, config.player1.clone(), config.player2.clone())?;
        Ok(Self::from_import(config, import, fen))
    }

    fn from_import(config: GameConfig, import: FenImport, fen: String) -> Self {
        let FenImport {
            board,
            history,
            game_state,
            context,
        } = import;

        let mut handler = Self {
            config,
            board,
            history,
            game_state,
            mementos: Vec::new(),
            state: HandlerState::Idle,
            status: GameStatus::Ongoing,
            initial_fen: fen,
            initial_side: context.active_color,
            initial_full_move: context.full_move_number.max(1),
        };
        handler.refresh_status();
        handler
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    #[inline]
    pub fn game_state(&self) -> &GameState {
        &self.game_state
    }

    #[inline]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[inline]
    pub fn state(&self) -> &HandlerState {
        &self.state
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.game_state.side_to_move()
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.game_state.is_game_over
    }

    #[inline]
    pub fn memento_count(&self) -> usize {
        self.mementos.len()
    }

    /// True when the side to move is driven by an engine.
    #[inline]
    pub fn engine_to_move(&self) -> bool {
        self.game_state.current_player.is_engine()
    }

    pub fn pending_promotion(&self) -> Option<&Move> {
        match &self.state {
            HandlerState::AwaitingPromotionChoice { pending, .. } => Some(pending),
            _ => None,
        }
    }

    pub fn selected_piece(&self) -> Option<PieceId> {
        match &self.state {
            HandlerState::PieceSelected { piece, .. }
            | HandlerState::AwaitingPromotionChoice { piece, .. } => Some(*piece),
            HandlerState::Idle => None,
        }
    }

    /// Destination squares of the selected piece, without duplicates from promotion choices.
    pub fn legal_destinations(&self) -> Vec<Square> {
        match &self.state {
            HandlerState::PieceSelected { legal_moves, .. }
            | HandlerState::AwaitingPromotionChoice { legal_moves, .. } => {
                destinations(legal_moves)
            }
            HandlerState::Idle => Vec::new(),
        }
    }

    /// Legal moves of the piece on `square`, for whichever side owns it.
    pub fn legal_moves_at(&self, square: Square) -> Vec<Move> {
        self.board
            .piece_at(square)
            .map(|piece| legal_moves(&self.board, &self.history, piece))
            .unwrap_or_default()
    }

    pub fn all_legal_moves(&self) -> Vec<Move> {
        if self.is_game_over() {
            return Vec::new();
        }
        all_legal_moves(&self.board, &self.history, self.side_to_move())
    }

    pub fn current_fen(&self) -> String {
        to_fen(&self.board, &self.history, &self.game_state)
    }

    /// Selection when idle, destination choice when a piece is selected.
    pub fn click(&mut self, square: Square) -> SelectionOutcome {
        match self.state {
            HandlerState::PieceSelected { .. } => self.choose_destination(square),
            _ => self.select_square(square),
        }
    }

    /// Selects the piece on `square` when it belongs to the side to move and can move.
    pub fn select_square(&mut self, square: Square) -> SelectionOutcome {
        if self.is_game_over() || self.pending_promotion().is_some() {
            return SelectionOutcome::Ignored;
        }

        let Some(piece) = self
            .board
            .piece_at(square)
            .filter(|id| self.board.piece(*id).color == self.side_to_move())
        else {
            return SelectionOutcome::Ignored;
        };

        let moves = legal_moves(&self.board, &self.history, piece);
        if moves.is_empty() {
            self.state = HandlerState::Idle;
            return SelectionOutcome::Ignored;
        }

        let destinations = destinations(&moves);
        self.state = HandlerState::PieceSelected {
            piece,
            legal_moves: moves,
        };
        SelectionOutcome::Selected {
            piece,
            destinations,
        }
    }

    /// Moves the selected piece to `square` if that is legal.
    pub fn choose_destination(&mut self, square: Square) -> SelectionOutcome {
        let HandlerState::PieceSelected { piece, legal_moves } = &self.state else {
            return SelectionOutcome::Ignored;
        };
        let piece = *piece;

        let own_piece_there = self
            .board
            .piece_on(square)
            .is_some_and(|target| target.color == self.side_to_move());
        if own_piece_there {
            return self.select_square(square);
        }

        let Some(chosen) = legal_moves.iter().find(|mv| mv.to() == square).cloned() else {
            return SelectionOutcome::Ignored;
        };

        if chosen.is_promotion() {
            let legal_moves = legal_moves.clone();
            self.mementos.push(self.game_state.create_memento());
            self.state = HandlerState::AwaitingPromotionChoice {
                piece,
                pending: chosen.without_promotion_choice(),
                legal_moves,
            };
            debug!("promotion on {square} awaiting a piece choice");
            return SelectionOutcome::AwaitingPromotion;
        }

        self.mementos.push(self.game_state.create_memento());
        SelectionOutcome::Moved(self.commit_move(chosen))
    }

    /// Completes or cancels the pending promotion.
    ///
    /// Cancelling rolls the pushed memento back and leaves the pawn selected.
    pub fn resolve_promotion(&mut self, choice: PromotionChoice) -> ChessResult<SelectionOutcome> {
        let HandlerState::AwaitingPromotionChoice {
            piece,
            pending,
            legal_moves,
        } = &self.state
        else {
            return Err(ChessError::NoPendingPromotion);
        };

        match choice {
            PromotionChoice::Promote(kind) => {
                if !PROMOTION_CHOICES.contains(&kind) {
                    return Err(ChessError::InvalidPromotionChoice(format!("{kind:?}")));
                }
                let mv = pending.with_promotion_choice(kind);
                Ok(SelectionOutcome::Moved(self.commit_move(mv)))
            }
            PromotionChoice::Cancel => {
                let piece = *piece;
                let legal_moves = legal_moves.clone();
                if let Some(memento) = self.mementos.pop() {
                    self.game_state.restore_from_memento(&memento);
                }
                let destinations = destinations(&legal_moves);
                self.state = HandlerState::PieceSelected { piece, legal_moves };
                debug!("promotion cancelled");
                Ok(SelectionOutcome::Selected {
                    piece,
                    destinations,
                })
            }
        }
    }

    /// Resolves the pending promotion from a text token such as `q` or `knight`.
    pub fn resolve_promotion_token(&mut self, token: &str) -> ChessResult<SelectionOutcome> {
        if self.pending_promotion().is_none() {
            return Err(ChessError::NoPendingPromotion);
        }
        let kind = parse_promotion_token(token)?;
        self.resolve_promotion(PromotionChoice::Promote(kind))
    }

    /// Applies a move in long algebraic notation (`e2e4`, `e7e8q`), as sent by an engine.
    pub fn apply_external_move(&mut self, text: &str) -> ChessResult<GameStatus> {
        self.ensure_can_move()?;
        let mv = long_algebraic_to_move(text, &self.board, &self.history, self.side_to_move())
            .inspect_err(|err| warn!("rejected external move {text}: {err}"))?;
        self.mementos.push(self.game_state.create_memento());
        Ok(self.commit_move(mv))
    }

    /// Applies one of the current legal moves, for example one picked by a [`MoveChooser`].
    ///
    /// [`MoveChooser`]: crate::utils::random_playout::MoveChooser
    pub fn apply_move(&mut self, mv: Move) -> ChessResult<GameStatus> {
        self.ensure_can_move()?;
        if mv.is_promotion() && mv.promotion_choice().is_none() {
            return Err(ChessError::IllegalMove(format!(
                "{}: promotion piece missing",
                move_to_long_algebraic(&mv)
            )));
        }
        if !self.all_legal_moves().contains(&mv) {
            return Err(ChessError::IllegalMove(move_to_long_algebraic(&mv)));
        }
        self.mementos.push(self.game_state.create_memento());
        Ok(self.commit_move(mv))
    }

    pub fn undo_ply(&mut self) -> ChessResult<HistoryStep> {
        if self.pending_promotion().is_some() {
            return Err(ChessError::PromotionPending);
        }
        let Some(mv) = self.history.undo_move(&mut self.board) else {
            return Ok(HistoryStep::NothingToUndo);
        };
        if let Some(memento) = self.mementos.pop() {
            self.game_state.restore_from_memento(&memento);
        }
        self.state = HandlerState::Idle;
        debug!("undid {}", move_to_long_algebraic(&mv));
        Ok(HistoryStep::Applied(self.refresh_status()))
    }

    pub fn redo_ply(&mut self) -> ChessResult<HistoryStep> {
        if self.pending_promotion().is_some() {
            return Err(ChessError::PromotionPending);
        }
        let Some(captured) = self.history.undone_moves().last().map(Move::captured) else {
            return Ok(HistoryStep::NothingToRedo);
        };

        self.mementos.push(self.game_state.create_memento());
        let mover = self.side_to_move();
        if let Some(captured) = captured {
            self.game_state.record_capture(mover, captured);
        }
        if let Some(mv) = self.history.redo_move(&mut self.board) {
            debug!("redid {}", move_to_long_algebraic(&mv));
        }
        self.game_state.swap_players();
        self.state = HandlerState::Idle;
        Ok(HistoryStep::Applied(self.refresh_status()))
    }

    /// Undoes one ply, or two when that hands the turn back to a human facing an engine.
    pub fn undo_turn(&mut self) -> ChessResult<HistoryStep> {
        let step = self.undo_ply()?;
        if matches!(step, HistoryStep::Applied(_))
            && self.skip_engine_turn()
            && self.history.can_undo()
        {
            return self.undo_ply();
        }
        Ok(step)
    }

    /// Redoes one ply, or two when the first lands on the engine's turn.
    pub fn redo_turn(&mut self) -> ChessResult<HistoryStep> {
        let step = self.redo_ply()?;
        if matches!(step, HistoryStep::Applied(_))
            && self.skip_engine_turn()
            && self.history.can_redo()
        {
            return self.redo_ply();
        }
        Ok(step)
    }

    /// Undoes or redoes until exactly `ply` moves are applied.
    pub fn jump_to_ply(&mut self, ply: usize) -> ChessResult<GameStatus> {
        let reachable = self.history.len() + self.history.undone_moves().len();
        if ply > reachable {
            return Err(ChessError::IllegalMove(format!(
                "ply {ply} is beyond the {reachable} recorded moves"
            )));
        }
        while self.history.len() > ply {
            self.undo_ply()?;
        }
        while self.history.len() < ply {
            self.redo_ply()?;
        }
        Ok(self.status)
    }

    /// Starts over from the configured starting position.
    pub fn reset(&mut self) -> ChessResult<GameStatus> {
        let fen = self
            .config
            .starting_fen
            .clone()
            .unwrap_or_else(|| STARTING_POSITION_FEN.to_owned());
        self.load_fen(&fen)
    }

    /// Replaces the whole game with the position in `fen`. The current game is untouched on error.
    pub fn load_fen(&mut self, fen: &str) -> ChessResult<GameStatus> {
        let import = from_fen(fen, self.config.player1.clone(), self.config.player2.clone())?;
        *self = Self::from_import(self.config.clone(), import, fen.trim().to_owned());
        debug!("loaded game from FEN {fen}");
        Ok(self.status)
    }

    /// SAN-like tokens for every applied move, followed by the undone ones in redo order.
    pub fn move_log(&self) -> Vec<MoveLogEntry> {
        let applied = self.history.moves().iter().map(|mv| (mv, false));
        let undone = self.history.undone_moves().iter().rev().map(|mv| (mv, true));
        applied
            .chain(undone)
            .enumerate()
            .map(|(index, (mv, undone))| MoveLogEntry {
                ply: index + 1,
                token: move_token(&self.board, mv),
                undone,
            })
            .collect()
    }

    /// PGN text of the applied moves.
    pub fn to_pgn(&self) -> String {
        let white = &self.game_state.player(Color::Light).name;
        let black = &self.game_state.player(Color::Dark).name;
        let headers = default_headers(white, black, self.status.result_token(), &self.initial_fen);
        let movetext: Vec<String> = self
            .history
            .moves()
            .iter()
            .map(move_to_long_algebraic)
            .collect();
        write_pgn_with_headers(&headers, self.initial_side, self.initial_full_move, &movetext)
    }

    fn ensure_can_move(&self) -> ChessResult<()> {
        if self.pending_promotion().is_some() {
            return Err(ChessError::PromotionPending);
        }
        if self.is_game_over() {
            return Err(ChessError::GameOver);
        }
        Ok(())
    }

    fn skip_engine_turn(&self) -> bool {
        self.config.undo_full_turn_against_engine
            && self.config.is_human_vs_engine()
            && self.engine_to_move()
    }

    /// Executes a move whose memento is already on the stack and passes the turn.
    fn commit_move(&mut self, mv: Move) -> GameStatus {
        let mover = self.side_to_move();
        if let Some(captured) = mv.captured() {
            self.game_state.record_capture(mover, captured);
        }
        debug!("{mover:?} plays {}", move_to_long_algebraic(&mv));
        self.history.make_move(&mut self.board, mv);
        self.game_state.swap_players();
        self.state = HandlerState::Idle;
        self.refresh_status()
    }

    fn refresh_status(&mut self) -> GameStatus {
        let status = evaluate_status(
            &self.board,
            &self.history,
            self.side_to_move(),
            self.config.fifty_move_limit,
        );
        if status.is_game_over() && !self.game_state.is_game_over {
            info!("game over: {status:?}");
        }
        self.game_state.is_game_over = status.is_game_over();
        self.status = status;
        status
    }
}

fn destinations(moves: &[Move]) -> Vec<Square> {
    let mut out: Vec<Square> = Vec::with_capacity(moves.len());
    for mv in moves {
        if !out.contains(&mv.to()) {
            out.push(mv.to());
        }
    }
    out
}
