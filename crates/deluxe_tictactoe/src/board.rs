//! The 3x3 board.

use crate::rules;
use crate::{Cell, Mark, MoveError, Position};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// 3x3 tic-tac-toe board.
///
/// Cells only go from [`Cell::Empty`] to a mark through [`Board::set_cell`];
/// the only way back is [`Board::clear_cell`], which the engine calls when
/// undoing a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    /// Cells in row-major order (0-8).
    cells: [Cell; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; 9],
        }
    }

    /// Gets the cell at the given position.
    pub fn get(&self, pos: Position) -> Cell {
        self.cells[pos.to_index()]
    }

    /// Checks if a cell is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos).is_empty()
    }

    /// Returns all cells in row-major order.
    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    /// Places `mark` on an empty cell.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::Occupied`] if the cell already holds a mark.
    #[instrument(skip(self))]
    pub fn set_cell(&mut self, pos: Position, mark: Mark) -> Result<(), MoveError> {
        if !self.is_empty(pos) {
            return Err(MoveError::Occupied(pos));
        }
        self.cells[pos.to_index()] = Cell::from(mark);
        Ok(())
    }

    /// Empties a cell.
    #[instrument(skip(self))]
    pub fn clear_cell(&mut self, pos: Position) {
        self.cells[pos.to_index()] = Cell::Empty;
    }

    /// Returns a copy of this board with `mark` placed at `pos`.
    ///
    /// The original board is untouched, which makes this the lookahead
    /// primitive for "would this move win?" questions.
    pub fn with_mark(&self, pos: Position, mark: Mark) -> Board {
        let mut trial = *self;
        trial.cells[pos.to_index()] = Cell::from(mark);
        trial
    }

    /// Empty positions in row-major order.
    pub fn empty_positions(&self) -> Vec<Position> {
        Position::ALL
            .iter()
            .copied()
            .filter(|&pos| self.is_empty(pos))
            .collect()
    }

    /// Returns the winning mark, if any line is complete.
    pub fn winner(&self) -> Option<Mark> {
        rules::check_winner(self)
    }

    /// Returns the first complete line of `mark`, in scan order.
    pub fn winning_line(&self, mark: Mark) -> Option<[Position; 3]> {
        rules::winning_line(self, mark)
    }

    /// Checks if no empty cell remains.
    pub fn is_full(&self) -> bool {
        rules::is_full(self)
    }

    /// Formats the board as a human-readable string.
    ///
    /// Empty cells show their 1-based keypad number.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for (idx, cell) in self.cells.iter().enumerate() {
            if idx > 0 && idx % 3 == 0 {
                result.push_str("\n-+-+-\n");
            }
            match cell.mark() {
                Some(mark) => result.push_str(&mark.to_string()),
                None => result.push_str(&(idx + 1).to_string()),
            }
            if idx % 3 < 2 {
                result.push('|');
            }
        }
        result
    }
}

impl From<[[Cell; 3]; 3]> for Board {
    fn from(rows: [[Cell; 3]; 3]) -> Self {
        let mut cells = [Cell::Empty; 9];
        for (r, row) in rows.iter().enumerate() {
            for (c, &cell) in row.iter().enumerate() {
                cells[r * 3 + c] = cell;
            }
        }
        Self { cells }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_cell_rejects_occupied() {
        let mut board = Board::new();
        board.set_cell(Position::Center, Mark::X).unwrap();
        let before = board;
        assert_eq!(
            board.set_cell(Position::Center, Mark::O),
            Err(MoveError::Occupied(Position::Center))
        );
        assert_eq!(board, before);
    }

    #[test]
    fn test_clear_cell_restores_empty() {
        let mut board = Board::new();
        board.set_cell(Position::TopLeft, Mark::O).unwrap();
        board.clear_cell(Position::TopLeft);
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_with_mark_leaves_original_untouched() {
        let board = Board::new();
        let trial = board.with_mark(Position::Center, Mark::X);
        assert!(board.is_empty(Position::Center));
        assert_eq!(trial.get(Position::Center), Cell::X);
    }

    #[test]
    fn test_empty_positions_row_major() {
        let mut board = Board::new();
        board.set_cell(Position::TopLeft, Mark::X).unwrap();
        board.set_cell(Position::Center, Mark::O).unwrap();
        let empty = board.empty_positions();
        assert_eq!(empty.len(), 7);
        assert_eq!(empty[0], Position::TopCenter);
        assert!(!empty.contains(&Position::Center));
    }

    #[test]
    fn test_from_rows() {
        let board = Board::from([
            [Cell::X, Cell::Empty, Cell::Empty],
            [Cell::Empty, Cell::O, Cell::Empty],
            [Cell::Empty, Cell::Empty, Cell::X],
        ]);
        assert_eq!(board.get(Position::TopLeft), Cell::X);
        assert_eq!(board.get(Position::Center), Cell::O);
        assert_eq!(board.get(Position::BottomRight), Cell::X);
    }

    #[test]
    fn test_display_shows_numbers_for_empty() {
        let mut board = Board::new();
        board.set_cell(Position::Center, Mark::X).unwrap();
        assert_eq!(board.display(), "1|2|3\n-+-+-\n4|X|6\n-+-+-\n7|8|9");
    }
}
