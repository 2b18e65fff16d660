use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{AppError, AppResult};

pub const CONFIG_ENV_VAR: &str = "GROOV_CONFIG";

const DEFAULT_LOG_DIRECTIVES: &str = "info,app::parser=debug";
const DEFAULT_LOG_FILE_PREFIX: &str = "groov.log";
const DEFAULT_TASK_MINUTES: i64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub scheduling: SchedulingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingConfig {
    /// `EnvFilter` directives used when `RUST_LOG` is unset.
    pub directives: String,
    /// Enables a daily rolling log file in this directory.
    pub log_dir: Option<PathBuf>,
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directives: DEFAULT_LOG_DIRECTIVES.to_string(),
            log_dir: None,
            file_prefix: DEFAULT_LOG_FILE_PREFIX.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SchedulingConfig {
    /// Block length used when a title carries a time but no duration.
    pub default_task_minutes: i64,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            default_task_minutes: DEFAULT_TASK_MINUTES,
        }
    }
}

impl AppConfig {
    /// Loads a YAML (`.yaml`/`.yml`) or JSON file; missing keys keep defaults.
    pub fn from_path(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        let config: AppConfig = match extension.as_deref() {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&raw)?,
            Some("json") => serde_json::from_str(&raw)?,
            other => {
                return Err(AppError::config(format!(
                    "unsupported config format {:?} for {}",
                    other.unwrap_or(""),
                    path.display()
                )))
            }
        };

        config.validate()?;
        info!(target: "app::config", path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Reads the file named by `GROOV_CONFIG`, or falls back to defaults.
    pub fn from_env() -> AppResult<Self> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) if !path.is_empty() => Self::from_path(PathBuf::from(path)),
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.scheduling.default_task_minutes <= 0 {
            return Err(AppError::config(format!(
                "scheduling.defaultTaskMinutes must be positive, got {}",
                self.scheduling.default_task_minutes
            )));
        }
        if self.logging.file_prefix.trim().is_empty() {
            return Err(AppError::config("logging.filePrefix must not be empty"));
        }
        Ok(())
    }
}
