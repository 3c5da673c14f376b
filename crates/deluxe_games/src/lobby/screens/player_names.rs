//! Name entry before a game starts.
//!
//! Single-player games ask only for X; O is the computer. Blank fields
//! fall back to the configured default names.

use crossterm::event::{KeyCode, KeyEvent};
use deluxe_tictactoe::{Difficulty, Mark, PlayMode};
use derive_getters::Getters;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};
use tracing::{debug, info, instrument};

use crate::PlayerNames;
use crate::lobby::screen::{LobbyContext, Screen, ScreenTransition};

/// Longest name accepted from the keyboard.
const MAX_NAME_LEN: usize = 20;

/// State for the name entry screen.
#[derive(Debug, Getters)]
pub struct PlayerNamesScreen {
    mode: PlayMode,
    difficulty: Difficulty,
    x_input: String,
    o_input: String,
    editing: Mark,
}

impl PlayerNamesScreen {
    /// Creates the screen with empty fields.
    #[instrument]
    pub fn new(mode: PlayMode, difficulty: Difficulty) -> Self {
        debug!("Initializing PlayerNamesScreen");
        Self {
            mode,
            difficulty,
            x_input: String::new(),
            o_input: String::new(),
            editing: Mark::X,
        }
    }

    fn field_mut(&mut self) -> &mut String {
        match self.editing {
            Mark::X => &mut self.x_input,
            Mark::O => &mut self.o_input,
        }
    }

    fn switch_field(&mut self) {
        if self.mode == PlayMode::Multi {
            self.editing = self.editing.opponent();
        }
    }

    fn field_widget<'a>(&self, mark: Mark, input: &'a str, placeholder: &'a str) -> Paragraph<'a> {
        let active = self.editing == mark;
        let (text, style) = if input.is_empty() {
            (placeholder, Style::default().fg(Color::DarkGray))
        } else {
            (input, Style::default().fg(Color::White))
        };
        let border = if active {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let cursor = if active { "_" } else { "" };
        Paragraph::new(format!("{}{}", text, cursor))
            .style(style)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border)
                    .title(format!("Player {}", mark)),
            )
    }
}

impl Screen for PlayerNamesScreen {
    #[instrument(skip(self, frame, ctx))]
    fn render(&self, frame: &mut Frame, ctx: &LobbyContext) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(area);

        let title = Paragraph::new(format!("{} - Enter Names", self.mode))
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        let defaults = ctx.config.default_names();
        frame.render_widget(
            self.field_widget(Mark::X, &self.x_input, defaults.x()),
            chunks[1],
        );

        match self.mode {
            PlayMode::Multi => frame.render_widget(
                self.field_widget(Mark::O, &self.o_input, defaults.o()),
                chunks[2],
            ),
            PlayMode::Single => {
                let cpu = Paragraph::new(PlayerNames::computer_label(self.difficulty))
                    .style(Style::default().fg(Color::Red))
                    .block(Block::default().borders(Borders::ALL).title("Player O"));
                frame.render_widget(cpu, chunks[2]);
            }
        }

        let help = Paragraph::new("Type a name | Tab: Switch | Enter: Start | Esc: Back")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[4]);
    }

    #[instrument(skip(self, key, ctx))]
    fn handle_key(&mut self, key: KeyEvent, ctx: &mut LobbyContext) -> ScreenTransition {
        match key.code {
            KeyCode::Char(c) => {
                let field = self.field_mut();
                if field.chars().count() < MAX_NAME_LEN && !c.is_control() {
                    field.push(c);
                }
                ScreenTransition::Stay
            }
            KeyCode::Backspace => {
                self.field_mut().pop();
                ScreenTransition::Stay
            }
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.switch_field();
                ScreenTransition::Stay
            }
            KeyCode::Enter if self.mode == PlayMode::Multi && self.editing == Mark::X => {
                self.editing = Mark::O;
                ScreenTransition::Stay
            }
            KeyCode::Enter => {
                let names = PlayerNames::resolve(
                    &self.x_input,
                    &self.o_input,
                    self.mode,
                    self.difficulty,
                    &ctx.config.default_names(),
                );
                info!(x = %names.x(), o = %names.o(), "Names entered");
                ScreenTransition::GoToInGame {
                    mode: self.mode,
                    difficulty: self.difficulty,
                    names,
                }
            }
            KeyCode::Esc => ScreenTransition::GoToMainMenu,
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

    fn type_text(screen: &mut PlayerNamesScreen, ctx: &mut LobbyContext, text: &str) {
        for c in text.chars() {
            screen.handle_key(press(KeyCode::Char(c)), ctx);
        }
    }

    #[tokio::test]
    async fn test_multi_player_takes_both_names() {
        let (_dir, mut ctx) = context();
        let mut screen = PlayerNamesScreen::new(PlayMode::Multi, Difficulty::Medium);
        type_text(&mut screen, &mut ctx, "Adx");
        screen.handle_key(press(KeyCode::Backspace), &mut ctx);
        type_text(&mut screen, &mut ctx, "a");
        screen.handle_key(press(KeyCode::Enter), &mut ctx);
        type_text(&mut screen, &mut ctx, "Grace");

        assert_eq!(
            screen.handle_key(press(KeyCode::Enter), &mut ctx),
            ScreenTransition::GoToInGame {
                mode: PlayMode::Multi,
                difficulty: Difficulty::Medium,
                names: PlayerNames::new("Ada", "Grace"),
            }
        );
    }

    #[tokio::test]
    async fn test_single_player_blank_name_uses_default() {
        let (_dir, mut ctx) = context();
        let mut screen = PlayerNamesScreen::new(PlayMode::Single, Difficulty::Easy);
        // Tab does nothing without a second field.
        screen.handle_key(press(KeyCode::Tab), &mut ctx);
        type_text(&mut screen, &mut ctx, "   ");

        assert_eq!(
            screen.handle_key(press(KeyCode::Enter), &mut ctx),
            ScreenTransition::GoToInGame {
                mode: PlayMode::Single,
                difficulty: Difficulty::Easy,
                names: PlayerNames::new("Player 1", "CPU (Easy)"),
            }
        );
    }

    #[tokio::test]
    async fn test_names_are_capped() {
        let (_dir, mut ctx) = context();
        let mut screen = PlayerNamesScreen::new(PlayMode::Single, Difficulty::Easy);
        type_text(&mut screen, &mut ctx, &"n".repeat(40));
        assert_eq!(screen.x_input().len(), MAX_NAME_LEN);
    }
}
