//! Command-line interface for tictactoe_deluxe.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Tic-Tac-Toe Deluxe - terminal tic-tac-toe against a friend or the computer
#[derive(Parser, Debug)]
#[command(name = "tictactoe_deluxe")]
#[command(about = "Terminal tic-tac-toe with undo and persistent statistics", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file (defaults are used if it doesn't exist)
    #[arg(short, long, default_value = "tictactoe_deluxe.toml")]
    pub config: PathBuf,

    /// Override the stats file named in the config
    #[arg(long)]
    pub stats_file: Option<PathBuf>,

    /// Where to write the log
    #[arg(long, default_value = "tictactoe_deluxe.log")]
    pub log_file: PathBuf,

    /// Subcommand to run (defaults to `play`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Command {
    /// Open the game menu
    #[default]
    Play,

    /// Print the persisted statistics and exit
    Stats,

    /// Zero the persisted statistics and exit
    ResetStats,
}
