//! Tests for statistics persistence.

use deluxe_tictactoe::{Mark, Outcome, PersistedStats, PlayMode, StatsTracker};
use tempfile::TempDir;

fn stats_path(dir: &TempDir) -> std::path::PathBuf {
    dir.path().join("tictactoe_stats.json")
}

#[test]
fn test_write_then_read_roundtrip() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = stats_path(&dir);
    let stats = PersistedStats::new(12, 5, 4, 3);
    stats.write(&path).expect("Write failed");
    assert_eq!(PersistedStats::read(&path).expect("Read failed"), stats);
}

#[test]
fn test_file_uses_flat_keys() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = stats_path(&dir);
    PersistedStats::new(1, 2, 3, 4).write(&path).expect("Write failed");

    let raw = std::fs::read_to_string(&path).expect("Read failed");
    let value: serde_json::Value = serde_json::from_str(&raw).expect("Not JSON");
    assert_eq!(value["games_played"], 1);
    assert_eq!(value["player_wins"], 2);
    assert_eq!(value["cpu_wins"], 3);
    assert_eq!(value["ties"], 4);
}

#[test]
fn test_missing_file_reads_as_error_and_loads_as_zero() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = stats_path(&dir);
    assert!(PersistedStats::read(&path).is_err());
    assert_eq!(PersistedStats::load_or_default(&path), PersistedStats::default());
}

#[test]
fn test_corrupt_file_loads_as_zero() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = stats_path(&dir);
    std::fs::write(&path, "{ not json").expect("Write failed");
    assert!(PersistedStats::read(&path).is_err());
    assert_eq!(PersistedStats::load_or_default(&path), PersistedStats::default());
}

#[test]
fn test_open_creates_zeroed_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = stats_path(&dir);
    let tracker = StatsTracker::open(&path);
    assert!(path.exists());
    assert_eq!(*tracker.persisted(), PersistedStats::default());
}

#[test]
fn test_record_outcome_rewrites_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = stats_path(&dir);
    PersistedStats::new(10, 6, 2, 2).write(&path).expect("Write failed");

    let mut tracker = StatsTracker::open(&path);
    tracker
        .record_outcome(Outcome::Win(Mark::O), PlayMode::Single)
        .expect("Record failed");
    tracker
        .record_outcome(Outcome::Win(Mark::O), PlayMode::Multi)
        .expect("Record failed");
    tracker
        .record_outcome(Outcome::Tie, PlayMode::Single)
        .expect("Record failed");

    let on_disk = PersistedStats::read(&path).expect("Read failed");
    assert_eq!(on_disk, PersistedStats::new(13, 7, 3, 3));
    assert_eq!(*tracker.persisted(), on_disk);

    let session = tracker.session();
    assert_eq!(*session.wins_o(), 2);
    assert_eq!(*session.wins_x(), 0);
    assert_eq!(*session.ties(), 1);
}

#[test]
fn test_record_outcome_keeps_external_changes() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = stats_path(&dir);
    PersistedStats::new(4, 2, 1, 1).write(&path).expect("Write failed");
    let mut tracker = StatsTracker::open(&path);

    // Another process resets the file while this one is running.
    PersistedStats::default().write(&path).expect("Write failed");
    tracker
        .record_outcome(Outcome::Win(Mark::X), PlayMode::Single)
        .expect("Record failed");
    assert_eq!(
        PersistedStats::read(&path).expect("Read failed"),
        PersistedStats::new(1, 1, 0, 0)
    );

    // And later records games of its own.
    let mut other = StatsTracker::open(&path);
    other
        .record_outcome(Outcome::Tie, PlayMode::Multi)
        .expect("Record failed");
    tracker
        .record_outcome(Outcome::Win(Mark::O), PlayMode::Single)
        .expect("Record failed");
    assert_eq!(
        PersistedStats::read(&path).expect("Read failed"),
        PersistedStats::new(3, 1, 1, 1)
    );
    assert_eq!(*tracker.persisted(), PersistedStats::new(3, 1, 1, 1));
    assert_eq!(*tracker.session().wins_x(), 1);
    assert_eq!(*tracker.session().wins_o(), 1);
}

#[test]
fn test_record_outcome_survives_unwritable_path() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    // A directory cannot be overwritten as a file.
    let mut tracker = StatsTracker::open(dir.path());
    let result = tracker.record_outcome(Outcome::Win(Mark::X), PlayMode::Single);
    assert!(result.is_err());
    assert_eq!(*tracker.persisted().games_played(), 1);
    assert_eq!(*tracker.session().wins_x(), 1);
}

#[test]
fn test_reset_persisted_zeroes_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = stats_path(&dir);
    PersistedStats::new(3, 1, 1, 1).write(&path).expect("Write failed");

    let mut tracker = StatsTracker::open(&path);
    tracker.reset_persisted().expect("Reset failed");
    assert_eq!(PersistedStats::read(&path).expect("Read failed"), PersistedStats::default());
}
