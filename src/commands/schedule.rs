use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::models::schedule::{ConflictResult, ParsedScheduleHints, TimeInterval};
use crate::services::schedule_preview::{self, TaskSchedulePreview};
use crate::services::{conflict_detector, schedule_utils, title_parser};

use super::{AppState, CommandResult};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseTitleRequest {
    pub title: String,
    #[serde(default)]
    pub base_date: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectConflictsRequest {
    pub candidate_start: String,
    pub duration_minutes: i64,
    #[serde(default)]
    pub existing: Vec<TimeInterval>,
    #[serde(default)]
    pub exclude_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewScheduleRequest {
    pub title: String,
    #[serde(default)]
    pub base_date: Option<String>,
    #[serde(default)]
    pub existing: Vec<TimeInterval>,
    #[serde(default)]
    pub task_id: Option<String>,
    /// Overrides the configured default when the title has no duration.
    #[serde(default)]
    pub duration_minutes: Option<i64>,
}

pub fn tasks_parse_title(request: ParseTitleRequest) -> CommandResult<ParsedScheduleHints> {
    let base_date = parse_base_date(request.base_date.as_ref())?;
    Ok(title_parser::parse_task_title(&request.title, base_date))
}

pub fn schedule_detect_conflicts(request: DetectConflictsRequest) -> CommandResult<ConflictResult> {
    let candidate_start = schedule_utils::parse_datetime(&request.candidate_start)?;
    ensure_positive_duration(request.duration_minutes)?;

    debug!(
        target: "app::command",
        candidate_start = %request.candidate_start,
        duration_minutes = request.duration_minutes,
        existing = request.existing.len(),
        "detecting conflicts"
    );

    Ok(conflict_detector::detect_conflicts_excluding(
        candidate_start,
        request.duration_minutes,
        &request.existing,
        request.exclude_id.as_deref(),
    ))
}

pub fn tasks_preview_schedule(
    state: &AppState,
    request: PreviewScheduleRequest,
) -> CommandResult<TaskSchedulePreview> {
    let base_date = parse_base_date(request.base_date.as_ref())?;
    let default_minutes = match request.duration_minutes {
        Some(minutes) => {
            ensure_positive_duration(minutes)?;
            minutes
        }
        None => state.default_task_minutes(),
    };

    Ok(schedule_preview::preview_task_schedule(
        &request.title,
        base_date,
        &request.existing,
        default_minutes,
        request.task_id.as_deref(),
    ))
}

fn parse_base_date(value: Option<&String>) -> AppResult<Option<DateTime<FixedOffset>>> {
    schedule_utils::parse_optional_datetime(value)
}

fn ensure_positive_duration(minutes: i64) -> AppResult<()> {
    if minutes <= 0 {
        return Err(AppError::validation_with_details(
            "duration must be greater than 0 minutes",
            json!({ "durationMinutes": minutes }),
        ));
    }
    Ok(())
}
