//! Integration tests for logger behavior.

use campus_nav::logger::{init_file_logging, set_level, set_level_from_str, Level};
use campus_nav::{debug, error, info, verbose, warn};
use std::fs;
use tempfile::TempDir;

#[test]
fn level_parse_accepts_valid() {
    assert!(set_level_from_str("error"));
    assert!(set_level_from_str("WARN"));
    assert!(set_level_from_str("info"));
    assert!(set_level_from_str("debug"));
}

#[test]
fn level_parse_rejects_invalid() {
    assert!(!set_level_from_str("invalid"));
    assert!(!set_level_from_str(""));
}

#[test]
fn logs_do_not_panic() {
    set_level(Level::Debug);
    info!("info integration");
    warn!("warn integration for '{}'", "home");
    error!("error integration");
    debug!("debug integration");
    verbose!("verbose integration");
}

#[cfg(feature = "file-logging")]
#[test]
fn file_logging_creates_missing_directories() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("logs").join("campusnav.log");

    assert!(init_file_logging(&path));
    error!("written to file");

    let content = fs::read_to_string(&path).expect("log file exists");
    assert!(content.contains("[ERROR] written to file"));
}
