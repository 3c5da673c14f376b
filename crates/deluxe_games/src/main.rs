//! Tic-Tac-Toe Deluxe - command-line entry point.

#![warn(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use deluxe_games::{AppConfig, Cli, Command, run_tui};
use deluxe_tictactoe::{PersistedStats, StatsTracker, percentage};
use std::path::Path;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.log_file)?;

    let config = AppConfig::load(&cli.config)?.with_stats_file(cli.stats_file.clone());
    let stats = StatsTracker::open(config.stats_file());

    match cli.command.unwrap_or_default() {
        Command::Play => run_tui(config, stats).await,
        Command::Stats => {
            print_stats(stats.persisted());
            Ok(())
        }
        Command::ResetStats => reset_stats(stats),
    }
}

/// Logs to a file so output doesn't interfere with the TUI.
fn init_logging(log_file: &Path) -> Result<()> {
    let file = std::fs::File::create(log_file)
        .with_context(|| format!("Failed to create log file {}", log_file.display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("info,deluxe_games=debug,deluxe_tictactoe=debug")
        }))
        .with_writer(std::sync::Arc::new(file))
        .with_ansi(false)
        .try_init(); // Don't fail if already initialized
    Ok(())
}

#[instrument(skip(stats))]
fn print_stats(stats: &PersistedStats) {
    let total = *stats.games_played();
    println!("Games played: {}", total);
    for (label, count) in [
        ("Player wins", *stats.player_wins()),
        ("CPU wins", *stats.cpu_wins()),
        ("Ties", *stats.ties()),
    ] {
        println!("{:<13} {} ({:.1}%)", format!("{}:", label), count, percentage(count, total));
    }
}

#[instrument(skip(stats))]
fn reset_stats(mut stats: StatsTracker) -> Result<()> {
    stats
        .reset_persisted()
        .context("Failed to reset statistics")?;
    info!(path = %stats.path().display(), "Statistics reset");
    println!("Statistics reset ({})", stats.path().display());
    Ok(())
}
