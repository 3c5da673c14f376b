//! Stateless rendering of the 3x3 grid.

use deluxe_tictactoe::{Board, Cell, Position};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Width of the rendered grid in columns.
pub const BOARD_WIDTH: u16 = 41;
/// Height of the rendered grid in rows.
pub const BOARD_HEIGHT: u16 = 11;

/// Draws the board centered in `area`.
///
/// `cursor` is shown inverted when given. Cells in `highlight` are drawn
/// in green to mark a winning line.
pub fn render_board(
    frame: &mut Frame,
    area: Rect,
    board: &Board,
    cursor: Option<Position>,
    highlight: Option<[Position; 3]>,
) {
    let board_area = center_rect(area, BOARD_WIDTH, BOARD_HEIGHT);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(board_area);

    let view = BoardView {
        board,
        cursor,
        highlight,
    };
    for row in 0..3 {
        view.draw_row(frame, rows[row * 2], row);
        if row < 2 {
            draw_separator(frame, rows[row * 2 + 1]);
        }
    }
}

struct BoardView<'a> {
    board: &'a Board,
    cursor: Option<Position>,
    highlight: Option<[Position; 3]>,
}

impl BoardView<'_> {
    fn draw_row(&self, frame: &mut Frame, area: Rect, row: usize) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(13),
                Constraint::Length(1),
                Constraint::Length(13),
                Constraint::Length(1),
                Constraint::Length(13),
            ])
            .split(area);

        for col in 0..3 {
            if let Some(pos) = Position::from_row_col(row, col) {
                self.draw_cell(frame, cols[col * 2], pos);
            }
            if col < 2 {
                draw_separator_vertical(frame, cols[col * 2 + 1]);
            }
        }
    }

    fn draw_cell(&self, frame: &mut Frame, area: Rect, pos: Position) {
        let winning = self.highlight.is_some_and(|line| line.contains(&pos));

        let (symbol, mut style) = match self.board.get(pos) {
            Cell::Empty => (
                format!(" {} ", pos.to_index() + 1),
                Style::default().fg(Color::DarkGray),
            ),
            Cell::X => (
                " X ".to_string(),
                Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            ),
            Cell::O => (
                " O ".to_string(),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
        };

        if winning {
            style = style.fg(Color::Green).add_modifier(Modifier::BOLD);
        }
        if self.cursor == Some(pos) {
            style = style.bg(Color::White).fg(Color::Black);
        }

        // Vertically center the symbol in the 3-line cell.
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(symbol, style)),
            Line::from(""),
        ];
        frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), area);
    }
}

fn draw_separator(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new("─".repeat(BOARD_WIDTH as usize))
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn draw_separator_vertical(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new(vec![Line::from("│"); 3]).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

/// Returns a `width` x `height` rectangle centered in `area`.
pub fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(area.height.saturating_sub(height) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(area.width.saturating_sub(width) / 2),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vert[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use deluxe_tictactoe::Cell::{Empty as E, O, X};
    use ratatui::{Terminal, backend::TestBackend};

    fn render(board: &Board, highlight: Option<[Position; 3]>) -> String {
        let backend = TestBackend::new(50, 15);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| render_board(f, f.area(), board, None, highlight))
            .unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_empty_board_shows_cell_numbers() {
        let out = render(&Board::new(), None);
        for digit in 1..=9 {
            assert!(out.contains(&digit.to_string()), "missing {digit}");
        }
    }

    #[test]
    fn test_marks_replace_numbers() {
        let board = Board::from([[X, E, E], [E, O, E], [E, E, E]]);
        let out = render(&board, None);
        assert!(out.contains('X'));
        assert!(out.contains('O'));
        assert!(!out.contains('1'));
        assert!(!out.contains('5'));
    }

    #[test]
    fn test_center_rect_fits_inside() {
        let area = Rect::new(0, 0, 80, 24);
        let inner = center_rect(area, 41, 11);
        assert_eq!(inner.width, 41);
        assert_eq!(inner.height, 11);
        assert_eq!(inner.x, 19);
        assert_eq!(inner.y, 6);
    }
}
