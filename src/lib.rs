pub mod commands;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use crate::models::schedule::{
    ConflictResult, IntervalSource, ParsedScheduleHints, TimeInterval,
};
pub use crate::services::conflict_detector::{detect_conflicts, ConflictDetector};
pub use crate::services::title_parser::{parse_task_title, TitleParser};

use crate::commands::AppState;
use crate::config::AppConfig;
use crate::error::AppResult;

/// Installs logging from `config` and builds the shared command state.
pub fn setup(config: AppConfig) -> AppResult<AppState> {
    crate::utils::logger::init_logging(&config.logging)?;
    AppState::new(config)
}

/// Same as [`setup`], reading the configuration named by `GROOV_CONFIG`.
pub fn setup_from_env() -> AppResult<AppState> {
    setup(AppConfig::from_env()?)
}
