use std::fs;

use groov_core_lib::config::AppConfig;
use groov_core_lib::error::AppResult;
use groov_core_lib::setup;
use tempfile::tempdir;
use tracing::info;

// The subscriber is process-global, so this binary holds a single test.
#[test]
fn test_setup_installs_file_logging_once() -> AppResult<()> {
    let dir = tempdir()?;
    let log_dir = dir.path().join("logs");

    let mut config = AppConfig::default();
    config.logging.log_dir = Some(log_dir.clone());
    config.logging.file_prefix = "groov-test.log".to_string();
    config.scheduling.default_task_minutes = 45;

    let state = setup(config)?;
    assert_eq!(state.default_task_minutes(), 45);
    info!(target: "app::command", "logging ready");

    assert!(log_dir.is_dir());
    let has_log_file = fs::read_dir(&log_dir)?
        .filter_map(Result::ok)
        .any(|entry| entry.file_name().to_string_lossy().starts_with("groov-test.log"));
    assert!(has_log_file);

    // A second setup keeps the installed subscriber and ignores the new log dir.
    let other_dir = dir.path().join("other");
    let mut second = AppConfig::default();
    second.logging.log_dir = Some(other_dir.clone());

    let state = setup(second)?;
    assert_eq!(state.default_task_minutes(), 30);
    assert!(!other_dir.exists());
    Ok(())
}
