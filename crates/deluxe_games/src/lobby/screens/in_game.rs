//! In-game screen - the board, the turn indicator and the session score.
//!
//! Human moves are applied immediately. When a move hands the turn to the
//! computer, its ticket goes to the scheduler and comes back through
//! [`InGameScreen::on_opponent_ready`] once the delay has passed.

use crossterm::event::{KeyCode, KeyEvent};
use deluxe_tictactoe::{Difficulty, Mark, PlayMode, Position};
use derive_getters::Getters;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};
use tracing::{debug, info, instrument, warn};

use crate::lobby::screen::{LobbyContext, Screen, ScreenTransition};
use crate::tui::{digit_position, move_cursor, render_board};
use crate::{GameSession, OpponentTicket, PlayerNames, SessionError};

/// State for an active game.
#[derive(Debug, Getters)]
pub struct InGameScreen {
    session: GameSession,
    cursor: Position,
    message: Option<String>,
    confirm_leave: bool,
}

impl InGameScreen {
    /// Starts a game between `names`.
    #[instrument(skip(names))]
    pub fn new(mode: PlayMode, difficulty: Difficulty, names: PlayerNames) -> Self {
        debug!("Initializing InGameScreen");
        Self {
            session: GameSession::new(mode, difficulty, names),
            cursor: Position::Center,
            message: None,
            confirm_leave: false,
        }
    }

    /// Plays the computer's move for a delivered ticket.
    ///
    /// Stale tickets are dropped silently.
    #[instrument(skip(self, ctx))]
    pub fn on_opponent_ready(&mut self, ticket: OpponentTicket, ctx: &mut LobbyContext) {
        match self
            .session
            .play_opponent(ticket, &mut ctx.stats, &mut ctx.rng)
        {
            Ok(report) => {
                debug!(position = %report.position, "Computer moved");
                self.message = None;
            }
            Err(SessionError::StaleTicket) => debug!("Ignoring stale opponent ticket"),
            Err(e) => {
                warn!(error = %e, "Computer could not move");
                self.message = Some(e.to_string());
            }
        }
    }

    fn place(&mut self, pos: Position, ctx: &mut LobbyContext) {
        self.cursor = pos;
        match self.session.play_human(pos, &mut ctx.stats) {
            Ok(report) => {
                self.message = None;
                if let Some(ticket) = report.opponent_ticket {
                    ctx.scheduler.schedule(ticket);
                }
            }
            Err(e) => {
                debug!(error = %e, "Move refused");
                self.message = Some(e.to_string());
            }
        }
    }

    fn undo(&mut self, ctx: &mut LobbyContext) {
        match self.session.undo() {
            Ok(to_move) => {
                ctx.scheduler.cancel();
                info!(%to_move, "Move undone");
                self.message = None;
            }
            Err(e) => self.message = Some(e.to_string()),
        }
    }

    fn reset(&mut self, ctx: &mut LobbyContext) {
        ctx.scheduler.cancel();
        self.session.reset();
        self.cursor = Position::Center;
        self.message = None;
        info!("Board reset");
    }

    fn leave(&mut self, ctx: &mut LobbyContext, to: ScreenTransition) -> ScreenTransition {
        ctx.scheduler.cancel();
        self.session.abandon();
        to
    }

    fn status_line(&self) -> (String, Color) {
        match self.session.result_message() {
            Some(result) => (result, Color::Green),
            None if self.session.is_computer_turn() => (
                format!("{} (thinking...)", self.session.turn_label()),
                Color::Magenta,
            ),
            None => (self.session.turn_label(), Color::Yellow),
        }
    }

    fn help_line(&self) -> &'static str {
        if self.confirm_leave {
            "Leave this game? y: Yes | n: No"
        } else if self.session.game().is_active() {
            "Arrows/1-9: Move | Enter: Place | u: Undo | r: Reset | Esc: Menu | q: Quit"
        } else {
            "r: Play again | u: Undo | Esc: Menu | q: Quit"
        }
    }
}

impl Screen for InGameScreen {
    #[instrument(skip(self, frame, ctx))]
    fn render(&self, frame: &mut Frame, ctx: &LobbyContext) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(11),
                Constraint::Length(3),
                Constraint::Length(3),
            ])
            .split(area);

        let title_text = match self.session.mode() {
            PlayMode::Single => format!("Single Player ({})", self.session.difficulty()),
            PlayMode::Multi => "Multi Player".to_string(),
        };
        let title = Paragraph::new(title_text)
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        let (status, color) = self.status_line();
        let status = Paragraph::new(status)
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(status, chunks[1]);

        let cursor = self.session.game().is_active().then_some(self.cursor);
        render_board(
            frame,
            chunks[2],
            self.session.game().board(),
            cursor,
            self.session.winning_line(),
        );

        let names = self.session.names();
        let score = ctx.stats.session();
        let score = Paragraph::new(format!(
            "{}: {}   {}: {}   Ties: {}",
            names.name(Mark::X),
            score.wins(Mark::X),
            names.name(Mark::O),
            score.wins(Mark::O),
            score.ties()
        ))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Session"));
        frame.render_widget(score, chunks[3]);

        let footer_text = match &self.message {
            Some(msg) => msg.clone(),
            None => self.help_line().to_string(),
        };
        let footer_style = match (&self.message, self.confirm_leave) {
            (_, true) => Style::default().fg(Color::Yellow),
            (Some(_), false) => Style::default().fg(Color::Red),
            (None, false) => Style::default().fg(Color::DarkGray),
        };
        let footer = Paragraph::new(footer_text)
            .style(footer_style)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(footer, chunks[4]);
    }

    #[instrument(skip(self, key, ctx))]
    fn handle_key(&mut self, key: KeyEvent, ctx: &mut LobbyContext) -> ScreenTransition {
        if self.confirm_leave {
            return match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => {
                    info!("Leaving game");
                    self.leave(ctx, ScreenTransition::GoToMainMenu)
                }
                _ => {
                    self.confirm_leave = false;
                    self.message = None;
                    ScreenTransition::Stay
                }
            };
        }

        match key.code {
            KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
                self.cursor = move_cursor(self.cursor, key.code);
                ScreenTransition::Stay
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.place(self.cursor, ctx);
                ScreenTransition::Stay
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if let Some(pos) = digit_position(c) {
                    self.place(pos, ctx);
                }
                ScreenTransition::Stay
            }
            KeyCode::Char('u') | KeyCode::Char('U') => {
                self.undo(ctx);
                ScreenTransition::Stay
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.reset(ctx);
                ScreenTransition::Stay
            }
            KeyCode::Esc | KeyCode::Char('m') | KeyCode::Char('M') => {
                if self.session.game().is_active() && !self.session.game().history().is_empty() {
                    self.confirm_leave = true;
                    self.message = None;
                    ScreenTransition::Stay
                } else {
                    self.leave(ctx, ScreenTransition::GoToMainMenu)
                }
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => self.leave(ctx, ScreenTransition::Quit),
            _ => ScreenTransition::Stay,
        }
    }
}
