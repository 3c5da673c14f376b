//! Session score and persisted cumulative statistics.
//!
//! The session score counts wins per mark for the current run. The
//! persisted record counts games from the human's point of view and lives
//! in a small JSON file that is rewritten after every finished game.

use crate::{Mark, Outcome, PlayMode, StatsError};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// Per-run counters, indexed by mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Getters, Serialize, Deserialize)]
pub struct SessionScore {
    /// Games won by X.
    wins_x: u32,
    /// Games won by O.
    wins_o: u32,
    /// Tied games.
    ties: u32,
}

impl SessionScore {
    /// Wins for a given mark.
    pub fn wins(&self, mark: Mark) -> u32 {
        match mark {
            Mark::X => self.wins_x,
            Mark::O => self.wins_o,
        }
    }

    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win(Mark::X) => self.wins_x += 1,
            Outcome::Win(Mark::O) => self.wins_o += 1,
            Outcome::Tie => self.ties += 1,
        }
    }
}

/// Durable counters stored in the stats file.
///
/// Serialized as a flat JSON object with the keys `games_played`,
/// `player_wins`, `cpu_wins` and `ties`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Getters, Serialize, Deserialize)]
pub struct PersistedStats {
    /// Completed games.
    games_played: u64,
    /// Games won by a human.
    player_wins: u64,
    /// Games won by the computer.
    cpu_wins: u64,
    /// Tied games.
    ties: u64,
}

impl PersistedStats {
    /// Builds a record from raw counters.
    pub fn new(games_played: u64, player_wins: u64, cpu_wins: u64, ties: u64) -> Self {
        Self {
            games_played,
            player_wins,
            cpu_wins,
            ties,
        }
    }

    /// Counts one finished game.
    ///
    /// X is always a human. O is the computer in single-player mode and a
    /// human in multi-player mode.
    #[instrument(skip(self))]
    pub fn record(&mut self, outcome: Outcome, mode: PlayMode) {
        self.games_played += 1;
        match (outcome, mode) {
            (Outcome::Tie, _) => self.ties += 1,
            (Outcome::Win(Mark::X), _) => self.player_wins += 1,
            (Outcome::Win(Mark::O), PlayMode::Single) => self.cpu_wins += 1,
            (Outcome::Win(Mark::O), PlayMode::Multi) => self.player_wins += 1,
        }
    }

    /// Reads the record from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError`] if the file is missing or is not a valid record.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn read(path: impl AsRef<Path>) -> Result<Self, StatsError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let stats: Self = serde_json::from_str(&content)?;
        debug!(?stats, "Stats loaded");
        Ok(stats)
    }

    /// Reads the record from `path`, falling back to zeros on any failure.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::read(path.as_ref()) {
            Ok(stats) => stats,
            Err(e) => {
                warn!(error = %e, "Using zeroed stats");
                Self::default()
            }
        }
    }

    /// Overwrites `path` with this record.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError`] if the file cannot be written.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn write(&self, path: impl AsRef<Path>) -> Result<(), StatsError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), content)?;
        debug!("Stats written");
        Ok(())
    }
}

/// Share of `part` in `total` as a percentage rounded to one decimal.
///
/// Zero when no games have been played.
pub fn percentage(part: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (part as f64 / total as f64 * 1000.0).round() / 10.0
}

/// Keeps the session score and the persisted record in step.
#[derive(Debug, Clone, Getters)]
pub struct StatsTracker {
    /// Where the persisted record lives.
    path: PathBuf,
    /// Counters for this run.
    session: SessionScore,
    /// Counters across runs.
    persisted: PersistedStats,
}

impl StatsTracker {
    /// Opens the tracker, loading the persisted record.
    ///
    /// A missing or unreadable file yields zeroed counters. When the file
    /// is missing a zeroed one is written so the next run finds it.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            info!("Stats file absent, creating it");
            if let Err(e) = PersistedStats::default().write(&path) {
                warn!(error = %e, "Could not create stats file");
            }
        }
        let persisted = PersistedStats::load_or_default(&path);
        Self {
            path,
            session: SessionScore::default(),
            persisted,
        }
    }

    /// Counts a finished game and rewrites the stats file.
    ///
    /// The persisted record is re-read from disk first, so changes made by
    /// another process since [`StatsTracker::open`] are kept. A missing or
    /// unreadable file counts from zero. The in-memory counters are updated
    /// even if the write fails.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError`] if the file could not be written.
    #[instrument(skip(self))]
    pub fn record_outcome(&mut self, outcome: Outcome, mode: PlayMode) -> Result<(), StatsError> {
        self.session.record(outcome);
        self.persisted = PersistedStats::load_or_default(&self.path);
        self.persisted.record(outcome, mode);
        info!(
            games_played = self.persisted.games_played,
            player_wins = self.persisted.player_wins,
            cpu_wins = self.persisted.cpu_wins,
            ties = self.persisted.ties,
            "Outcome recorded"
        );
        self.persisted.write(&self.path)
    }

    /// Zeroes the persisted record and rewrites the file.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError`] if the file could not be written.
    #[instrument(skip(self))]
    pub fn reset_persisted(&mut self) -> Result<(), StatsError> {
        info!("Resetting persisted stats");
        self.persisted = PersistedStats::default();
        self.persisted.write(&self.path)
    }
}
