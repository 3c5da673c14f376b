//! First-class action types for tic-tac-toe.
//!
//! Moves are domain events, not side effects. They are recorded in the
//! move history so an undo knows exactly which cells to clear and whose
//! turn it becomes.

use crate::{Mark, Position};
use serde::{Deserialize, Serialize};

/// A mark placed at a position, numbered in play order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// Where the mark was placed.
    pub position: Position,
    /// The mark that was placed.
    pub mark: Mark,
    /// Zero-based index of this move within its game.
    pub sequence: usize,
}

impl Move {
    /// Creates a new move.
    pub fn new(position: Position, mark: Mark, sequence: usize) -> Self {
        Self {
            position,
            mark,
            sequence,
        }
    }

    /// Row of the move (0-2).
    pub fn row(&self) -> usize {
        self.position.row()
    }

    /// Column of the move (0-2).
    pub fn col(&self) -> usize {
        self.position.col()
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{} {} -> {}", self.sequence + 1, self.mark, self.position.label())
    }
}

/// Error returned when a move is rejected.
///
/// A rejected move never changes the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The cell at the position already holds a mark.
    #[display("{} is already occupied", _0)]
    Occupied(Position),

    /// The game is already over.
    #[display("Game is already over")]
    GameOver,
}

impl std::error::Error for MoveError {}

/// Error returned when an undo is rejected.
///
/// A rejected undo never changes the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum UndoError {
    /// Not enough moves have been played to undo.
    #[display("Nothing to undo: {} move(s) needed, {} played", required, available)]
    InsufficientHistory {
        /// Moves required by the play mode.
        required: usize,
        /// Moves currently in the history.
        available: usize,
    },
}

impl std::error::Error for UndoError {}
