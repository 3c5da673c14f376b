//! Difficulty selection before a single-player game.

use crossterm::event::{KeyCode, KeyEvent};
use deluxe_tictactoe::{Difficulty, PlayMode};
use derive_getters::Getters;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use strum::IntoEnumIterator;
use tracing::{debug, info, instrument};

use super::{select_next, select_previous};
use crate::lobby::screen::{LobbyContext, Screen, ScreenTransition};

/// State for the difficulty selection screen.
#[derive(Debug, Getters)]
pub struct DifficultySelectScreen {
    levels: Vec<Difficulty>,
    list_state: ListState,
}

impl DifficultySelectScreen {
    /// Creates the screen with `preselected` highlighted.
    #[instrument]
    pub fn new(preselected: Difficulty) -> Self {
        debug!("Initializing DifficultySelectScreen");
        let levels: Vec<Difficulty> = Difficulty::iter().collect();
        let mut list_state = ListState::default();
        list_state.select(levels.iter().position(|d| *d == preselected).or(Some(0)));
        Self { levels, list_state }
    }

    fn selected(&self) -> Difficulty {
        let idx = self.list_state.selected().unwrap_or(0);
        self.levels
            .get(idx)
            .copied()
            .unwrap_or_default()
    }
}

fn describe(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Easy => "Plays anywhere",
        Difficulty::Medium => "Usually sees a win or a block",
        Difficulty::Hard => "Always takes a win, always blocks",
    }
}

impl Screen for DifficultySelectScreen {
    #[instrument(skip(self, frame, _ctx))]
    fn render(&self, frame: &mut Frame, _ctx: &LobbyContext) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(3),
            ])
            .split(area);

        let title = Paragraph::new("Single Player - Choose Difficulty")
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        let items: Vec<ListItem> = self
            .levels
            .iter()
            .map(|d| ListItem::new(format!("{:<8} {}", d.to_string(), describe(*d))))
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Difficulty"))
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        let mut list_state = self.list_state;
        frame.render_stateful_widget(list, chunks[1], &mut list_state);

        let help = Paragraph::new("↑↓: Navigate | Enter: Select | Esc: Back")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[2]);
    }

    #[instrument(skip(self, key, _ctx))]
    fn handle_key(&mut self, key: KeyEvent, _ctx: &mut LobbyContext) -> ScreenTransition {
        match key.code {
            KeyCode::Up => {
                select_previous(&mut self.list_state, self.levels.len());
                ScreenTransition::Stay
            }
            KeyCode::Down => {
                select_next(&mut self.list_state, self.levels.len());
                ScreenTransition::Stay
            }
            KeyCode::Enter => {
                let difficulty = self.selected();
                info!(%difficulty, "Difficulty selected");
                ScreenTransition::GoToPlayerNames {
                    mode: PlayMode::Single,
                    difficulty,
                }
            }
            KeyCode::Esc | KeyCode::Backspace => ScreenTransition::GoToMainMenu,
            _ => ScreenTransition::Stay,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lobby::screens::tests::context;
    use crossterm::event::KeyModifiers;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[tokio::test]
    async fn test_starts_on_preselected_level() {
        let (_dir, mut ctx) = context();
        let mut screen = DifficultySelectScreen::new(Difficulty::Hard);
        assert_eq!(
            screen.handle_key(press(KeyCode::Enter), &mut ctx),
            ScreenTransition::GoToPlayerNames {
                mode: PlayMode::Single,
                difficulty: Difficulty::Hard,
            }
        );
    }

    #[tokio::test]
    async fn test_down_from_easy_selects_medium() {
        let (_dir, mut ctx) = context();
        let mut screen = DifficultySelectScreen::new(Difficulty::Easy);
        screen.handle_key(press(KeyCode::Down), &mut ctx);
        assert_eq!(
            screen.handle_key(press(KeyCode::Enter), &mut ctx),
            ScreenTransition::GoToPlayerNames {
                mode: PlayMode::Single,
                difficulty: Difficulty::Medium,
            }
        );
        assert_eq!(
            screen.handle_key(press(KeyCode::Esc), &mut ctx),
            ScreenTransition::GoToMainMenu
        );
    }
}
