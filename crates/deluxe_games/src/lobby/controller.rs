//! Lobby controller - the state machine driving the multi-screen TUI.

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use deluxe_tictactoe::StatsTracker;
use derive_getters::Getters;
use rand::rngs::StdRng;
use ratatui::{Frame, Terminal, backend::Backend};
use tokio::sync::mpsc;
use tokio::time::{Duration, sleep};
use tracing::{debug, info, instrument};

use crate::lobby::screen::{LobbyContext, Screen, ScreenTransition};
use crate::lobby::screens::{
    DifficultySelectScreen, InGameScreen, MainMenuScreen, PlayerNamesScreen, StatsViewScreen,
};
use crate::{AppConfig, OpponentScheduler, OpponentTicket};

/// Active screen in the lobby state machine.
#[derive(Debug)]
enum ActiveScreen {
    MainMenu(MainMenuScreen),
    DifficultySelect(DifficultySelectScreen),
    PlayerNames(PlayerNamesScreen),
    InGame(Box<InGameScreen>),
    StatsView(StatsViewScreen),
}

impl ActiveScreen {
    fn as_screen(&self) -> &dyn Screen {
        match self {
            Self::MainMenu(s) => s,
            Self::DifficultySelect(s) => s,
            Self::PlayerNames(s) => s,
            Self::InGame(s) => s.as_ref(),
            Self::StatsView(s) => s,
        }
    }

    fn as_screen_mut(&mut self) -> &mut dyn Screen {
        match self {
            Self::MainMenu(s) => s,
            Self::DifficultySelect(s) => s,
            Self::PlayerNames(s) => s,
            Self::InGame(s) => s.as_mut(),
            Self::StatsView(s) => s,
        }
    }
}

/// Controller that drives the lobby state machine.
///
/// Call [`LobbyController::run`] to start the event loop.
#[derive(Debug, Getters)]
pub struct LobbyController {
    ctx: LobbyContext,
    #[getter(skip)]
    tickets: mpsc::UnboundedReceiver<OpponentTicket>,
    #[getter(skip)]
    screen: ActiveScreen,
}

impl LobbyController {
    /// Creates a controller showing the main menu.
    #[instrument(skip_all)]
    pub fn new(config: AppConfig, stats: StatsTracker, rng: StdRng) -> Self {
        info!("Creating LobbyController");
        let (scheduler, tickets) = OpponentScheduler::new(config.opponent_delay());
        Self {
            ctx: LobbyContext::new(config, stats, scheduler, rng),
            tickets,
            screen: ActiveScreen::MainMenu(MainMenuScreen::new()),
        }
    }

    /// Runs the lobby event loop until the user quits.
    #[instrument(skip(self, terminal))]
    pub async fn run<B: Backend + std::io::Write>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> anyhow::Result<()>
    where
        <B as Backend>::Error: Send + Sync + 'static,
    {
        info!("Starting lobby event loop");

        loop {
            terminal.draw(|f| self.render(f))?;

            self.drain_tickets();

            // Poll for input with short timeout to keep the loop responsive.
            if event::poll(Duration::from_millis(50))?
                && let Event::Key(key) = event::read()?
            {
                // Skip key release events (crossterm fires both press and release).
                if key.kind == KeyEventKind::Release {
                    continue;
                }
                if !self.handle_key(key) {
                    info!("Lobby quitting");
                    return Ok(());
                }
            }

            sleep(Duration::from_millis(10)).await;
        }
    }

    /// Renders the active screen.
    pub fn render(&self, frame: &mut Frame) {
        self.screen.as_screen().render(frame, &self.ctx);
    }

    /// Hands delivered opponent tickets to the game screen.
    ///
    /// Tickets that arrive after the game screen was left are dropped.
    #[instrument(skip(self))]
    pub fn drain_tickets(&mut self) {
        while let Ok(ticket) = self.tickets.try_recv() {
            match &mut self.screen {
                ActiveScreen::InGame(s) => s.on_opponent_ready(ticket, &mut self.ctx),
                _ => debug!(?ticket, "Dropping opponent ticket outside a game"),
            }
        }
    }

    /// Routes a key press to the active screen.
    ///
    /// Returns `false` when the application should exit.
    #[instrument(skip(self))]
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let transition = self.screen.as_screen_mut().handle_key(key, &mut self.ctx);
        self.apply_transition(transition)
    }

    /// True while the game screen is showing.
    pub fn in_game(&self) -> bool {
        matches!(self.screen, ActiveScreen::InGame(_))
    }

    /// Applies a screen transition, returning `false` to quit.
    #[instrument(skip(self))]
    fn apply_transition(&mut self, transition: ScreenTransition) -> bool {
        if transition != ScreenTransition::Stay {
            debug!(transition = ?transition, "Applying screen transition");
            // No computer move may outlive the screen that scheduled it.
            self.ctx.scheduler.cancel();
        }
        self.screen = match transition {
            ScreenTransition::Stay => return true,

            ScreenTransition::GoToMainMenu => {
                info!("Navigating to MainMenu");
                ActiveScreen::MainMenu(MainMenuScreen::new())
            }

            ScreenTransition::GoToDifficultySelect => {
                info!("Navigating to DifficultySelect");
                ActiveScreen::DifficultySelect(DifficultySelectScreen::new(
                    *self.ctx.config.default_difficulty(),
                ))
            }

            ScreenTransition::GoToPlayerNames { mode, difficulty } => {
                info!(%mode, %difficulty, "Navigating to PlayerNames");
                ActiveScreen::PlayerNames(PlayerNamesScreen::new(mode, difficulty))
            }

            ScreenTransition::GoToInGame {
                mode,
                difficulty,
                names,
            } => {
                info!(%mode, %difficulty, "Navigating to InGame");
                ActiveScreen::InGame(Box::new(InGameScreen::new(mode, difficulty, names)))
            }

            ScreenTransition::GoToStatsView => {
                info!("Navigating to StatsView");
                ActiveScreen::StatsView(StatsViewScreen::new())
            }

            ScreenTransition::Quit => return false,
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};
    use rand::SeedableRng;
    use tempfile::TempDir;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn controller(dir: &TempDir) -> LobbyController {
        let stats = StatsTracker::open(dir.path().join("stats.json"));
        LobbyController::new(AppConfig::default(), stats, StdRng::seed_from_u64(11))
    }

    #[tokio::test]
    async fn test_menu_to_game_and_back() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let mut lobby = controller(&dir);

        // Single Player -> Medium -> default name -> game.
        assert!(lobby.handle_key(press(KeyCode::Enter)));
        assert!(lobby.handle_key(press(KeyCode::Enter)));
        assert!(lobby.handle_key(press(KeyCode::Enter)));
        assert!(lobby.in_game());

        // No moves yet, so Esc leaves without asking.
        assert!(lobby.handle_key(press(KeyCode::Esc)));
        assert!(!lobby.in_game());

        // Main menu Esc quits.
        assert!(!lobby.handle_key(press(KeyCode::Esc)));
    }

    #[tokio::test]
    async fn test_leaving_game_cancels_pending_move() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let mut lobby = controller(&dir);
        for _ in 0..3 {
            lobby.handle_key(press(KeyCode::Enter));
        }
        lobby.handle_key(press(KeyCode::Char('5')));
        assert!(lobby.ctx().scheduler.is_pending());

        lobby.handle_key(press(KeyCode::Char('q')));
        assert!(!lobby.ctx().scheduler.is_pending());
    }
}
