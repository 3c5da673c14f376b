//! Main menu - the hub every other screen returns to.

use crossterm::event::{KeyCode, KeyEvent};
use deluxe_tictactoe::PlayMode;
use derive_getters::Getters;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use tracing::{debug, info, instrument};

use super::{select_next, select_previous};
use crate::lobby::screen::{LobbyContext, Screen, ScreenTransition};

/// Menu options available in the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuOption {
    SinglePlayer,
    MultiPlayer,
    Statistics,
    Exit,
}

impl MenuOption {
    const ALL: [MenuOption; 4] = [
        Self::SinglePlayer,
        Self::MultiPlayer,
        Self::Statistics,
        Self::Exit,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::SinglePlayer => "Single Player",
            Self::MultiPlayer => "Multi Player",
            Self::Statistics => "Statistics",
            Self::Exit => "Exit",
        }
    }
}

/// State for the main menu screen.
#[derive(Debug, Getters)]
pub struct MainMenuScreen {
    list_state: ListState,
}

impl MainMenuScreen {
    /// Creates the menu with the first option selected.
    #[instrument]
    pub fn new() -> Self {
        debug!("Initializing MainMenuScreen");
        let mut state = ListState::default();
        state.select(Some(0));
        Self { list_state: state }
    }

    fn selected_option(&self) -> MenuOption {
        let idx = self.list_state.selected().unwrap_or(0);
        MenuOption::ALL[idx.min(MenuOption::ALL.len() - 1)]
    }
}

impl Default for MainMenuScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for MainMenuScreen {
    #[instrument(skip(self, frame, ctx))]
    fn render(&self, frame: &mut Frame, ctx: &LobbyContext) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(6),
                Constraint::Length(3),
            ])
            .split(area);

        let title = Paragraph::new("Tic-Tac-Toe Deluxe")
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        let persisted = ctx.stats.persisted();
        let record = Paragraph::new(format!(
            "Games: {}   Player wins: {}   CPU wins: {}   Ties: {}",
            persisted.games_played(),
            persisted.player_wins(),
            persisted.cpu_wins(),
            persisted.ties()
        ))
        .style(Style::default().fg(Color::Green))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(record, chunks[1]);

        let items: Vec<ListItem> = MenuOption::ALL
            .iter()
            .map(|opt| ListItem::new(opt.label()))
            .collect();

        let menu = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Menu"))
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        let mut list_state = self.list_state;
        frame.render_stateful_widget(menu, chunks[2], &mut list_state);

        let help = Paragraph::new("↑↓: Navigate | Enter: Select | q: Quit")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[3]);
    }

    #[instrument(skip(self, key, ctx))]
    fn handle_key(&mut self, key: KeyEvent, ctx: &mut LobbyContext) -> ScreenTransition {
        match key.code {
            KeyCode::Up => {
                select_previous(&mut self.list_state, MenuOption::ALL.len());
                ScreenTransition::Stay
            }
            KeyCode::Down => {
                select_next(&mut self.list_state, MenuOption::ALL.len());
                ScreenTransition::Stay
            }
            KeyCode::Enter => {
                let option = self.selected_option();
                info!(option = ?option, "Menu option selected");
                match option {
                    MenuOption::SinglePlayer => ScreenTransition::GoToDifficultySelect,
                    MenuOption::MultiPlayer => ScreenTransition::GoToPlayerNames {
                        mode: PlayMode::Multi,
                        difficulty: *ctx.config.default_difficulty(),
                    },
                    MenuOption::Statistics => ScreenTransition::GoToStatsView,
                    MenuOption::Exit => ScreenTransition::Quit,
                }
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => ScreenTransition::Quit,
            _ => ScreenTransition::Stay,
        }
    }
}
