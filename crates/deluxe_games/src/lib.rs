//! Tic-Tac-Toe Deluxe - terminal front end.
//!
//! Wraps the [`deluxe_tictactoe`] engine in a menu-driven terminal UI:
//! single-player games against a delayed computer opponent, two-player
//! games on one keyboard, undo, play again and persistent statistics.
//!
//! # Architecture
//!
//! - **Config**: [`AppConfig`] loaded from TOML, overridable from the CLI.
//! - **Session**: [`GameSession`] runs one match and counts its outcome once.
//! - **Scheduler**: [`OpponentScheduler`] delivers computer moves after a delay.
//! - **Lobby**: [`LobbyController`] drives the menu and game screens.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
mod config;
pub mod lobby;
mod scheduler;
mod session;
pub mod tui;

pub use cli::{Cli, Command};
pub use config::{AppConfig, ConfigError};
pub use lobby::{LobbyContext, LobbyController, Screen, ScreenTransition};
pub use scheduler::OpponentScheduler;
pub use session::{GameSession, MoveReport, OpponentTicket, PlayerNames, SessionError};
pub use tui::run_tui;
