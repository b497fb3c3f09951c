//! Logging through `follow_tracker::init` into a configured log file.
//!
//! Kept in its own test binary so the global subscriber is installed here first.

use chrono::NaiveDate;
use follow_tracker::config::{ConfigBuilder, LogLevel};
use follow_tracker::models::EventKind;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_init_keeps_log_file_writer_alive() {
    let dir = tempdir().unwrap();
    let log_path = dir.path().join("logs").join("tracker.log");
    let config = ConfigBuilder::new()
        .with_data_dir(dir.path())
        .with_log_file(&log_path)
        .with_log_level(LogLevel::Info)
        .build()
        .unwrap();

    let (mut store, guard) = follow_tracker::init(&config).unwrap();
    assert!(guard.is_some());

    let day = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
    store
        .record_event("alice", EventKind::Followed, day)
        .unwrap();

    // Dropping the guard flushes the non-blocking writer
    drop(guard);

    let contents = fs::read_to_string(&log_path).unwrap();
    assert!(contents.contains("event recorded"), "log file was: {contents:?}");
    assert!(contents.contains("@alice"));
}
