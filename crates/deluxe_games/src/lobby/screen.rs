//! Screen trait, transition type and the state shared between screens.

use crossterm::event::KeyEvent;
use deluxe_tictactoe::{Difficulty, PlayMode, StatsTracker};
use rand::rngs::StdRng;
use ratatui::Frame;

use crate::{AppConfig, OpponentScheduler, PlayerNames};

/// The result of handling an input event on a screen.
///
/// Screens return this from [`Screen::handle_key`] to drive the
/// [`LobbyController`](crate::LobbyController) state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenTransition {
    /// Stay on the current screen.
    Stay,
    /// Navigate to the main menu.
    GoToMainMenu,
    /// Navigate to difficulty selection for a single-player game.
    GoToDifficultySelect,
    /// Ask for player names.
    GoToPlayerNames {
        /// Single or multi player.
        mode: PlayMode,
        /// Opponent difficulty (ignored in multi-player mode).
        difficulty: Difficulty,
    },
    /// Start a game.
    GoToInGame {
        /// Single or multi player.
        mode: PlayMode,
        /// Opponent difficulty.
        difficulty: Difficulty,
        /// Resolved player names.
        names: PlayerNames,
    },
    /// Navigate to the statistics view.
    GoToStatsView,
    /// Exit the application cleanly.
    Quit,
}

/// State owned by the controller and lent to the active screen.
#[derive(Debug)]
pub struct LobbyContext {
    /// Loaded configuration.
    pub config: AppConfig,
    /// Session score and persisted record.
    pub stats: StatsTracker,
    /// Delayed delivery of computer moves.
    pub scheduler: OpponentScheduler,
    /// Randomness for the opponent policy.
    pub rng: StdRng,
}

impl LobbyContext {
    /// Bundles the shared state.
    pub fn new(
        config: AppConfig,
        stats: StatsTracker,
        scheduler: OpponentScheduler,
        rng: StdRng,
    ) -> Self {
        Self {
            config,
            stats,
            scheduler,
            rng,
        }
    }
}

/// Trait implemented by each screen in the lobby state machine.
///
/// Each screen owns its own state, renders its UI, and handles key events.
/// The controller calls these methods in the event loop.
pub trait Screen {
    /// Renders the screen into the provided [`Frame`].
    fn render(&self, frame: &mut Frame, ctx: &LobbyContext);

    /// Handles a key event and returns the resulting [`ScreenTransition`].
    fn handle_key(&mut self, key: KeyEvent, ctx: &mut LobbyContext) -> ScreenTransition;
}
