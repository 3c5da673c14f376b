//! Move engine: turn order, terminal detection and undo.

use crate::{Board, Mark, Move, MoveError, Outcome, PlayMode, Position, UndoError};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Current status of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// Game is ongoing.
    InProgress,
    /// Game ended in a win.
    Won(Mark),
    /// Game ended with a full board and no winner.
    Tie,
}

impl GameStatus {
    /// The outcome, once the game is over.
    pub fn outcome(self) -> Option<Outcome> {
        match self {
            GameStatus::InProgress => None,
            GameStatus::Won(mark) => Some(Outcome::Win(mark)),
            GameStatus::Tie => Some(Outcome::Tie),
        }
    }
}

/// Complete state of one game.
///
/// The engine owns the board; callers change it only through
/// [`GameState::apply_move`], [`GameState::undo`] and [`GameState::reset`].
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameState {
    /// The board.
    board: Board,
    /// Mark that moves next (or that made the winning move).
    current_mark: Mark,
    /// Game status.
    status: GameStatus,
    /// Moves in play order.
    history: Vec<Move>,
}

impl GameState {
    /// Creates a fresh game with X to move.
    #[instrument]
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            current_mark: Mark::X,
            status: GameStatus::InProgress,
            history: Vec::new(),
        }
    }

    /// True while moves can still be played.
    pub fn is_active(&self) -> bool {
        self.status == GameStatus::InProgress
    }

    /// The last move played, if any.
    pub fn last_move(&self) -> Option<&Move> {
        self.history.last()
    }

    /// Places the current mark at `pos`.
    ///
    /// On success returns the status after the move. A winning move leaves
    /// `current_mark` on the winner; otherwise the turn passes unless the
    /// board is full.
    ///
    /// # Errors
    ///
    /// - [`MoveError::GameOver`] if the game is not in progress.
    /// - [`MoveError::Occupied`] if the cell already holds a mark.
    ///
    /// Either way the state is left untouched.
    #[instrument(skip(self), fields(mark = %self.current_mark))]
    pub fn apply_move(&mut self, pos: Position) -> Result<GameStatus, MoveError> {
        if !self.is_active() {
            warn!("Move rejected: game is over");
            return Err(MoveError::GameOver);
        }
        if !self.board.is_empty(pos) {
            warn!("Move rejected: cell occupied");
            return Err(MoveError::Occupied(pos));
        }

        let mark = self.current_mark;
        self.history.push(Move::new(pos, mark, self.history.len()));
        self.board.set_cell(pos, mark)?;

        if let Some(winner) = self.board.winner() {
            info!(%winner, moves = self.history.len(), "Game won");
            self.status = GameStatus::Won(winner);
        } else if self.board.is_full() {
            info!("Game tied");
            self.status = GameStatus::Tie;
        } else {
            self.current_mark = mark.opponent();
            debug!(next = %self.current_mark, "Turn passed");
        }

        Ok(self.status)
    }

    /// Takes back moves according to the play mode.
    ///
    /// - [`PlayMode::Multi`] removes the last move. Needs one move.
    /// - [`PlayMode::Single`] needs two moves. It removes the last move and,
    ///   if that was the computer's, the human move before it, so the human
    ///   always moves next.
    ///
    /// Afterwards the mark of the last removed move is to play and the game
    /// is back in progress. Returns that mark.
    ///
    /// # Errors
    ///
    /// [`UndoError::InsufficientHistory`] when too few moves have been
    /// played; the state is left untouched.
    #[instrument(skip(self), fields(moves = self.history.len()))]
    pub fn undo(&mut self, mode: PlayMode) -> Result<Mark, UndoError> {
        let required = match mode {
            PlayMode::Single => 2,
            PlayMode::Multi => 1,
        };
        if self.history.len() < required {
            warn!(required, "Undo rejected");
            return Err(UndoError::InsufficientHistory {
                required,
                available: self.history.len(),
            });
        }

        let mut removed = self.pop_move()?;
        if let Some(computer) = mode.computer_mark()
            && removed.mark == computer
        {
            removed = self.pop_move()?;
        }

        self.current_mark = removed.mark;
        self.status = GameStatus::InProgress;
        info!(to_move = %self.current_mark, remaining = self.history.len(), "Undo applied");
        Ok(self.current_mark)
    }

    /// Starts over: empty board, empty history, X to move.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        info!("Resetting game");
        *self = Self::new();
    }

    /// Removes the last move from the history and clears its cell.
    fn pop_move(&mut self) -> Result<Move, UndoError> {
        let last = self.history.pop().ok_or(UndoError::InsufficientHistory {
            required: 1,
            available: 0,
        })?;
        self.board.clear_cell(last.position);
        debug!(%last, "Move taken back");
        Ok(last)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
