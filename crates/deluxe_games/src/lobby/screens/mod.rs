//! Screen implementations for the lobby state machine.

mod difficulty_select;
mod in_game;
mod main_menu;
mod player_names;
mod stats_view;

pub use difficulty_select::DifficultySelectScreen;
pub use in_game::InGameScreen;
pub use main_menu::MainMenuScreen;
pub use player_names::PlayerNamesScreen;
pub use stats_view::StatsViewScreen;

use ratatui::widgets::ListState;

/// Moves a list selection up, wrapping to the bottom.
fn select_previous(state: &mut ListState, count: usize) {
    let i = match state.selected() {
        Some(i) if i > 0 => i - 1,
        _ => count - 1,
    };
    state.select(Some(i));
}

/// Moves a list selection down, wrapping to the top.
fn select_next(state: &mut ListState, count: usize) {
    let i = match state.selected() {
        Some(i) => (i + 1) % count,
        None => 0,
    };
    state.select(Some(i));
}
