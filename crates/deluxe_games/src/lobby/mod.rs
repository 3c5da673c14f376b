//! Menu system: main menu, difficulty and name entry, the game and statistics.

mod controller;
mod screen;
mod screens;

pub use controller::LobbyController;
pub use screen::{LobbyContext, Screen, ScreenTransition};
