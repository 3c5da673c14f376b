//! Tests for loading configuration files.

use deluxe_games::AppConfig;
use deluxe_tictactoe::{Difficulty, Mark};
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn test_missing_file_uses_defaults() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = AppConfig::load(dir.path().join("absent.toml")).expect("Defaults");
    assert_eq!(config, AppConfig::default());
    assert_eq!(config.opponent_delay(), Duration::from_millis(500));
    assert_eq!(config.default_names().name(Mark::X), "Player 1");
    assert_eq!(config.default_names().name(Mark::O), "Player 2");
}

#[test]
fn test_full_file_is_read() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("tictactoe_deluxe.toml");
    std::fs::write(
        &path,
        r#"
stats_file = "scores.json"
opponent_delay_ms = 0
default_difficulty = "Easy"
player_x_name = "Ada"
player_o_name = "Grace"
"#,
    )
    .expect("Write failed");

    let config = AppConfig::load(&path).expect("Config loads");
    assert_eq!(config.stats_file(), &PathBuf::from("scores.json"));
    assert_eq!(config.opponent_delay(), Duration::ZERO);
    assert_eq!(*config.default_difficulty(), Difficulty::Easy);
    assert_eq!(config.default_names().name(Mark::O), "Grace");
}

#[test]
fn test_malformed_file_is_an_error() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "opponent_delay_ms = \"soon\"\n").expect("Write failed");

    let err = AppConfig::load(&path).expect_err("Bad type");
    assert!(err.message.contains("Failed to parse config"));
}

#[test]
fn test_unknown_difficulty_is_an_error() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "default_difficulty = \"Impossible\"\n").expect("Write failed");
    assert!(AppConfig::from_file(&path).is_err());
}
