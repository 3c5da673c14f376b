//! Draw detection logic for tic-tac-toe.

use super::win::check_winner;
use crate::Board;
use tracing::instrument;

/// Checks if the board is full (all cells occupied).
#[instrument(skip(board))]
pub fn is_full(board: &Board) -> bool {
    board.cells().iter().all(|cell| !cell.is_empty())
}

/// A full board with no winner is a draw.
#[instrument(skip(board))]
pub fn is_draw(board: &Board) -> bool {
    is_full(board) && check_winner(board).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Mark, Position};

    fn fill(board: &mut Board, rows: [[Mark; 3]; 3]) {
        for (r, row) in rows.iter().enumerate() {
            for (c, &mark) in row.iter().enumerate() {
                let pos = Position::from_row_col(r, c).unwrap();
                board.set_cell(pos, mark).unwrap();
            }
        }
    }

    #[test]
    fn test_empty_board_not_full() {
        let board = Board::new();
        assert!(!is_full(&board));
    }

    #[test]
    fn test_partial_board_not_full() {
        let mut board = Board::new();
        board.set_cell(Position::Center, Mark::X).unwrap();
        assert!(!is_full(&board));
    }

    #[test]
    fn test_draw_detection() {
        use Mark::{O, X};
        let mut board = Board::new();
        fill(&mut board, [[X, O, X], [O, X, X], [O, X, O]]);
        assert!(is_full(&board));
        assert!(is_draw(&board));
    }

    #[test]
    fn test_not_draw_if_winner() {
        use Mark::{O, X};
        let mut board = Board::new();
        fill(&mut board, [[X, X, X], [O, O, X], [X, O, O]]);
        assert!(is_full(&board));
        assert!(!is_draw(&board));
    }
}
