//! Terminal setup and the widgets shared by the screens.

mod board;
mod input;

pub use board::{BOARD_HEIGHT, BOARD_WIDTH, center_rect, render_board};
pub use input::{digit_position, move_cursor};

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use deluxe_tictactoe::StatsTracker;
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use tracing::{error, info, instrument};

use crate::{AppConfig, LobbyController};

/// Runs the menu and game screens until the user quits.
///
/// The terminal is restored before returning, also on error.
#[instrument(skip_all)]
pub async fn run_tui(config: AppConfig, stats: StatsTracker) -> Result<()> {
    info!("Starting Tic-Tac-Toe Deluxe TUI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let rng = StdRng::from_rng(&mut rand::rng());
    let mut lobby = LobbyController::new(config, stats, rng);
    let res = lobby.run(&mut terminal).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Lobby loop error");
    }
    res
}
