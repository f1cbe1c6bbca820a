//! Tests for rebuilding a table from its log
//!
//! These tests verify:
//! - Replay reproduces every key of the source table
//! - Last-write-wins across repeated keys
//! - The new table gets its own fresh log
//! - Missing and malformed source logs
//! - Existing target directories are wiped

use std::fs;
use std::path::PathBuf;

use bucketkv::table::Table;
use bucketkv::{ReplayResult, TableError};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_dirs() -> (TempDir, PathBuf, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("source");
    let target = temp_dir.path().join("target");
    (temp_dir, source, target)
}

// =============================================================================
// Replay Tests
// =============================================================================

#[test]
fn test_from_log_reproduces_table() {
    let (_temp, source_dir, target_dir) = setup_dirs();
    let source = Table::new(&source_dir, true, 3).unwrap();

    for i in -500i64..500 {
        source.set(i * 7919, i).unwrap();
    }

    let log = source.log_file_path().unwrap().to_path_buf();
    let rebuilt = Table::from_log(&log, &target_dir, 3).unwrap();

    for i in -500i64..500 {
        assert_eq!(rebuilt.get(i * 7919).unwrap(), source.get(i * 7919).unwrap());
    }
}

#[test]
fn test_from_log_last_write_wins() {
    let (_temp, source_dir, target_dir) = setup_dirs();
    let source = Table::new(&source_dir, true, 2).unwrap();

    source.set(1, 10).unwrap();
    source.set(2, 20).unwrap();
    source.set(1, 11).unwrap();
    source.set(1, 12).unwrap();

    let rebuilt = Table::from_log(source.log_file_path().unwrap(), &target_dir, 2).unwrap();

    assert_eq!(rebuilt.get(1).unwrap(), 12);
    assert_eq!(rebuilt.get(2).unwrap(), 20);
}

#[test]
fn test_from_log_writes_fresh_log() {
    let (_temp, source_dir, target_dir) = setup_dirs();
    let source = Table::new(&source_dir, true, 2).unwrap();
    source.set(5, 100).unwrap();
    source.set(21, 200).unwrap();

    let rebuilt = Table::from_log(source.log_file_path().unwrap(), &target_dir, 2).unwrap();

    let log = rebuilt.log_file_path().unwrap();
    assert_eq!(log, target_dir.join("log.txt"));
    assert_eq!(fs::read_to_string(log).unwrap(), "5,100\n21,200\n");
}

#[test]
fn test_from_log_with_different_magnitude() {
    let (_temp, source_dir, target_dir) = setup_dirs();
    let source = Table::new(&source_dir, true, 3).unwrap();
    for i in 0..100i64 {
        source.set(i, i * i).unwrap();
    }

    let rebuilt = Table::from_log(source.log_file_path().unwrap(), &target_dir, 1).unwrap();

    assert_eq!(rebuilt.bucket_magnitude(), 1);
    assert_eq!(rebuilt.bucket_files().unwrap().len(), 16);
    for i in 0..100i64 {
        assert_eq!(rebuilt.get(i).unwrap(), i * i);
    }
}

#[test]
fn test_replay_log_reports_record_count() {
    let (temp, _source_dir, target_dir) = setup_dirs();
    let log = temp.path().join("log.txt");
    fs::write(&log, "1,1\n\n2,2\n1,3\n").unwrap();

    let (rebuilt, result) = Table::replay_log(&log, &target_dir, 2).unwrap();

    assert_eq!(result, ReplayResult { records_replayed: 3 });
    assert_eq!(rebuilt.get(1).unwrap(), 3);
}

#[test]
fn test_from_log_empty_log() {
    let (_temp, source_dir, target_dir) = setup_dirs();
    let source = Table::new(&source_dir, true, 2).unwrap();

    let rebuilt = Table::from_log(source.log_file_path().unwrap(), &target_dir, 2).unwrap();

    assert!(rebuilt.bucket_files().unwrap().is_empty());
    assert!(matches!(rebuilt.get(0), Err(TableError::KeyNotFound(0))));
}

#[test]
fn test_from_log_tolerates_blank_and_padded_lines() {
    let (temp, _source_dir, target_dir) = setup_dirs();
    let log = temp.path().join("handwritten.txt");
    fs::write(&log, "1,2\n\n  3,4\r\n-5,-6").unwrap();

    let rebuilt = Table::from_log(&log, &target_dir, 2).unwrap();

    assert_eq!(rebuilt.get(1).unwrap(), 2);
    assert_eq!(rebuilt.get(3).unwrap(), 4);
    assert_eq!(rebuilt.get(-5).unwrap(), -6);
}

// =============================================================================
// Target Directory Tests
// =============================================================================

#[test]
fn test_from_log_wipes_existing_target() {
    let (temp, _source_dir, target_dir) = setup_dirs();
    let stale = Table::new(&target_dir, true, 2).unwrap();
    stale.set(99, 99).unwrap();
    fs::write(target_dir.join("stray.txt"), "leftover").unwrap();
    drop(stale);

    let log = temp.path().join("log.txt");
    fs::write(&log, "1,1\n").unwrap();

    let rebuilt = Table::from_log(&log, &target_dir, 2).unwrap();

    assert!(matches!(rebuilt.get(99), Err(TableError::KeyNotFound(99))));
    assert!(!target_dir.join("stray.txt").exists());
    assert_eq!(fs::read_to_string(target_dir.join("log.txt")).unwrap(), "1,1\n");
}

#[test]
fn test_from_log_in_place() {
    let (_temp, source_dir, _target_dir) = setup_dirs();
    let source = Table::new(&source_dir, true, 2).unwrap();
    source.set(7, 70).unwrap();
    source.set(8, 80).unwrap();
    let log = source.log_file_path().unwrap().to_path_buf();
    drop(source);

    // The log lives inside the directory being wiped
    let rebuilt = Table::from_log(&log, &source_dir, 2).unwrap();

    assert_eq!(rebuilt.get(7).unwrap(), 70);
    assert_eq!(rebuilt.get(8).unwrap(), 80);
    assert_eq!(fs::read_to_string(&log).unwrap(), "7,70\n8,80\n");
}

// =============================================================================
// Error Tests
// =============================================================================

#[test]
fn test_from_log_missing_log() {
    let (temp, _source_dir, target_dir) = setup_dirs();

    let result = Table::from_log(&temp.path().join("missing.txt"), &target_dir, 2);

    assert!(matches!(result, Err(TableError::LogNotFound(_))));
    assert!(!target_dir.exists());
}

#[test]
fn test_from_log_invalid_line() {
    let (temp, _source_dir, target_dir) = setup_dirs();
    let log = temp.path().join("log.txt");
    fs::write(&log, "1,1\nabc,5\n2,2\n").unwrap();

    let result = Table::from_log(&log, &target_dir, 2);

    match result {
        Err(TableError::InvalidLogFormat { line, content }) => {
            assert_eq!(line, 2);
            assert_eq!(content, "abc,5");
        }
        other => panic!("expected InvalidLogFormat, got {:?}", other.map(|_| ())),
    }

    // Replay is not rolled back
    let partial = Table::new(&target_dir, true, 2).unwrap();
    assert_eq!(partial.get(1).unwrap(), 1);
    assert!(matches!(partial.get(2), Err(TableError::KeyNotFound(2))));
}

#[test]
fn test_from_log_invalid_magnitude() {
    let (temp, _source_dir, target_dir) = setup_dirs();
    let existing = Table::new(&target_dir, true, 2).unwrap();
    existing.set(99, 99).unwrap();
    drop(existing);

    let log = temp.path().join("log.txt");
    fs::write(&log, "1,1\n").unwrap();

    let result = Table::from_log(&log, &target_dir, 16);

    assert!(matches!(result, Err(TableError::Config(_))));

    // A rejected magnitude leaves the existing table untouched
    assert!(target_dir.exists());
    let existing = Table::new(&target_dir, true, 2).unwrap();
    assert_eq!(existing.get(99).unwrap(), 99);
    assert_eq!(fs::read_to_string(target_dir.join("log.txt")).unwrap(), "99,99\n");
}
