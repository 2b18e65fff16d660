use std::fs;
use std::path::PathBuf;

use groov_core_lib::config::AppConfig;
use groov_core_lib::error::{AppError, AppResult};
use tempfile::tempdir;

#[test]
fn test_load_yaml_config() -> AppResult<()> {
    let dir = tempdir()?;
    let path = dir.path().join("groov.yaml");
    fs::write(
        &path,
        "logging:\n  directives: warn\n  logDir: /tmp/groov-logs\nscheduling:\n  defaultTaskMinutes: 50\n",
    )?;

    let config = AppConfig::from_path(&path)?;
    assert_eq!(config.logging.directives, "warn");
    assert_eq!(config.logging.log_dir, Some(PathBuf::from("/tmp/groov-logs")));
    assert_eq!(config.logging.file_prefix, "groov.log");
    assert_eq!(config.scheduling.default_task_minutes, 50);
    Ok(())
}

#[test]
fn test_load_json_config_with_defaults() -> AppResult<()> {
    let dir = tempdir()?;
    let path = dir.path().join("groov.json");
    fs::write(&path, r#"{"logging": {"filePrefix": "planner.log"}}"#)?;

    let config = AppConfig::from_path(&path)?;
    assert_eq!(config.logging.file_prefix, "planner.log");
    assert_eq!(config.scheduling.default_task_minutes, 30);
    Ok(())
}

#[test]
fn test_invalid_duration_is_rejected() -> AppResult<()> {
    let dir = tempdir()?;
    let path = dir.path().join("groov.yml");
    fs::write(&path, "scheduling:\n  defaultTaskMinutes: 0\n")?;

    let result = AppConfig::from_path(&path);
    assert!(matches!(result, Err(AppError::Config { .. })));
    Ok(())
}

#[test]
fn test_unknown_extension_is_rejected() -> AppResult<()> {
    let dir = tempdir()?;
    let path = dir.path().join("groov.ini");
    fs::write(&path, "[scheduling]\n")?;

    let result = AppConfig::from_path(&path);
    assert!(matches!(result, Err(AppError::Config { .. })));
    Ok(())
}

#[test]
fn test_malformed_yaml_surfaces_parse_error() -> AppResult<()> {
    let dir = tempdir()?;
    let path = dir.path().join("broken.yaml");
    fs::write(&path, "scheduling: [unterminated\n")?;

    let result = AppConfig::from_path(&path);
    assert!(matches!(result, Err(AppError::Yaml(_))));
    Ok(())
}

#[test]
fn test_missing_file_is_io_error() {
    let result = AppConfig::from_path("/definitely/not/here/groov.yaml");
    assert!(matches!(result, Err(AppError::Io(_))));
}
