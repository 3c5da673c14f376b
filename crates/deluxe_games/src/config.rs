//! Application configuration loaded from TOML.

use crate::PlayerNames;
use deluxe_tictactoe::Difficulty;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// User-tunable settings.
///
/// Every field is optional in the file; missing ones take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where cumulative statistics are stored.
    stats_file: PathBuf,

    /// Pause before the computer replies, in milliseconds.
    opponent_delay_ms: u64,

    /// Difficulty highlighted when the menu opens.
    default_difficulty: Difficulty,

    /// Name pre-filled for X.
    player_x_name: String,

    /// Name pre-filled for O in multi-player mode.
    player_o_name: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            stats_file: PathBuf::from("tictactoe_stats.json"),
            opponent_delay_ms: 500,
            default_difficulty: Difficulty::Medium,
            player_x_name: "Player 1".to_string(),
            player_o_name: "Player 2".to_string(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(stats_file = %config.stats_file.display(), "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise returns the defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Replaces the stats file location when `stats_file` is given.
    #[instrument(skip(self))]
    pub fn with_stats_file(mut self, stats_file: Option<PathBuf>) -> Self {
        if let Some(path) = stats_file {
            debug!(path = %path.display(), "Overriding stats file");
            self.stats_file = path;
        }
        self
    }

    /// Opponent delay as a [`Duration`].
    pub fn opponent_delay(&self) -> Duration {
        Duration::from_millis(self.opponent_delay_ms)
    }

    /// Default player names.
    pub fn default_names(&self) -> PlayerNames {
        PlayerNames::new(self.player_x_name.clone(), self.player_o_name.clone())
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
