//! Win detection logic for tic-tac-toe.

use crate::{Board, Mark, Position};
use tracing::instrument;

/// The 8 winning lines in scan order.
///
/// Rows top to bottom, then columns left to right, then the main
/// diagonal, then the anti-diagonal. Highlighting relies on this order
/// when more than one line is complete.
pub const LINES: [[Position; 3]; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    [Position::BottomLeft, Position::BottomCenter, Position::BottomRight],
    // Columns
    [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    [Position::TopCenter, Position::Center, Position::BottomCenter],
    [Position::TopRight, Position::MiddleRight, Position::BottomRight],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// Checks if there is a winner on the board.
///
/// Returns the mark filling the first complete line in [`LINES`] order,
/// `None` otherwise.
#[instrument(skip(board))]
pub fn check_winner(board: &Board) -> Option<Mark> {
    LINES.iter().find_map(|&[a, b, c]| {
        let mark = board.get(a).mark()?;
        (board.get(b).mark() == Some(mark) && board.get(c).mark() == Some(mark)).then_some(mark)
    })
}

/// Returns the first line in [`LINES`] order filled entirely by `mark`.
#[instrument(skip(board))]
pub fn winning_line(board: &Board, mark: Mark) -> Option<[Position; 3]> {
    LINES
        .iter()
        .copied()
        .find(|line| line.iter().all(|&pos| board.get(pos).mark() == Some(mark)))
}
