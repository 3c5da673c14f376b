//! Statistics view - the persisted record with percentages, plus this run's score.

use crossterm::event::{KeyCode, KeyEvent};
use deluxe_tictactoe::{Mark, PersistedStats, percentage};
use derive_getters::Getters;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};
use tracing::{debug, info, instrument, warn};

use crate::lobby::screen::{LobbyContext, Screen, ScreenTransition};

/// State for the statistics view screen.
#[derive(Debug, Default, Getters)]
pub struct StatsViewScreen {
    confirm_reset: bool,
    message: Option<String>,
}

impl StatsViewScreen {
    /// Creates the view.
    #[instrument]
    pub fn new() -> Self {
        debug!("Initializing StatsViewScreen");
        Self::default()
    }
}

/// One table row per counter: label, count and share of games played.
fn record_rows(stats: &PersistedStats) -> Vec<(&'static str, u64, Option<f64>)> {
    let total = *stats.games_played();
    vec![
        ("Games played", total, None),
        (
            "Player wins",
            *stats.player_wins(),
            Some(percentage(*stats.player_wins(), total)),
        ),
        (
            "CPU wins",
            *stats.cpu_wins(),
            Some(percentage(*stats.cpu_wins(), total)),
        ),
        ("Ties", *stats.ties(), Some(percentage(*stats.ties(), total))),
    ]
}

impl Screen for StatsViewScreen {
    #[instrument(skip(self, frame, ctx))]
    fn render(&self, frame: &mut Frame, ctx: &LobbyContext) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(8),
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(area);

        let title = Paragraph::new("Statistics")
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        let header = Row::new(vec![
            Cell::from("").style(Style::default().add_modifier(Modifier::BOLD)),
            Cell::from("Count").style(Style::default().add_modifier(Modifier::BOLD)),
            Cell::from("Share").style(Style::default().add_modifier(Modifier::BOLD)),
        ])
        .style(Style::default().fg(Color::Yellow));

        let rows: Vec<Row> = record_rows(ctx.stats.persisted())
            .into_iter()
            .map(|(label, count, share)| {
                Row::new(vec![
                    Cell::from(label),
                    Cell::from(count.to_string()),
                    Cell::from(share.map(|p| format!("{:.1}%", p)).unwrap_or_default()),
                ])
            })
            .collect();

        let widths = [
            Constraint::Percentage(50),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ];
        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::default().borders(Borders::ALL).title("All Time"));
        frame.render_widget(table, chunks[1]);

        let session = ctx.stats.session();
        let session_text = Paragraph::new(format!(
            "X wins: {}   O wins: {}   Ties: {}",
            session.wins(Mark::X),
            session.wins(Mark::O),
            session.ties()
        ))
        .style(Style::default().fg(Color::Green))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("This Session"));
        frame.render_widget(session_text, chunks[2]);

        let help = if self.confirm_reset {
            "Erase all saved statistics? y: Yes | n: No".to_string()
        } else {
            match &self.message {
                Some(msg) => msg.clone(),
                None => "Esc: Back | x: Reset statistics | q: Quit".to_string(),
            }
        };
        let help = Paragraph::new(help)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[4]);
    }

    #[instrument(skip(self, key, ctx))]
    fn handle_key(&mut self, key: KeyEvent, ctx: &mut LobbyContext) -> ScreenTransition {
        if self.confirm_reset {
            self.confirm_reset = false;
            if let KeyCode::Char('y') | KeyCode::Char('Y') = key.code {
                self.message = Some(match ctx.stats.reset_persisted() {
                    Ok(()) => {
                        info!("Statistics reset from the stats view");
                        "Statistics reset".to_string()
                    }
                    Err(e) => {
                        warn!(error = %e, "Failed to reset statistics");
                        e.to_string()
                    }
                });
            }
            return ScreenTransition::Stay;
        }

        match key.code {
            KeyCode::Char('x') | KeyCode::Char('X') => {
                self.confirm_reset = true;
                ScreenTransition::Stay
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => ScreenTransition::Quit,
            _ => ScreenTransition::GoToMainMenu,
        }
    }
}
