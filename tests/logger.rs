//! Integration tests for logger behavior.

use gpa_calc::logger::{set_level, set_level_from_str, Level};
use gpa_calc::{debug, error, info, verbose, warn};

#[test]
fn level_parse_accepts_valid() {
    assert!(set_level_from_str("error"));
    assert!(set_level_from_str("warn"));
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
    warn!("warn integration");
    error!("error integration");
    debug!("debug integration");
    verbose!("verbose integration");
}

#[cfg(feature = "file-logging")]
#[test]
fn file_logging_creates_parent_directory() {
    use gpa_calc::logger::init_file_logging;
    use tempfile::TempDir;

    let temp = TempDir::new().expect("temp dir");
    let path = temp.path().join("logs").join("run.log");
    assert!(init_file_logging(&path));
    error!("written to file");
    assert!(path.exists());
}
