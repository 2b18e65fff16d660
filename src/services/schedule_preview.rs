use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::schedule::{ConflictResult, ParsedScheduleHints, TimeInterval};
use crate::services::{conflict_detector, schedule_utils, title_parser};

/// What the task form shows before the user commits a title.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskSchedulePreview {
    pub hints: ParsedScheduleHints,
    #[serde(default)]
    pub start_at: Option<String>,
    #[serde(default)]
    pub end_at: Option<String>,
    pub duration_minutes: i64,
    #[serde(default)]
    pub conflicts: Option<ConflictResult>,
}

impl TaskSchedulePreview {
    pub fn is_scheduled(&self) -> bool {
        self.start_at.is_some()
    }
}

/// Parses `title` and, when it names a time, checks the resulting block
/// against `existing`. `task_id` keeps a task from conflicting with itself.
pub fn preview_task_schedule(
    title: &str,
    base_date: Option<DateTime<FixedOffset>>,
    existing: &[TimeInterval],
    default_duration_minutes: i64,
    task_id: Option<&str>,
) -> TaskSchedulePreview {
    let hints = title_parser::parse_task_title(title, base_date);
    let duration_minutes = hints.duration.unwrap_or(default_duration_minutes);

    let Some(start) = hints.time else {
        return TaskSchedulePreview {
            hints,
            start_at: None,
            end_at: None,
            duration_minutes,
            conflicts: None,
        };
    };

    let Some(end) = schedule_utils::checked_add_minutes(start, duration_minutes) else {
        warn!(
            target: "app::conflict",
            start = %start,
            duration_minutes,
            "preview window out of range"
        );
        return TaskSchedulePreview {
            hints,
            start_at: Some(schedule_utils::format_datetime(start)),
            end_at: None,
            duration_minutes,
            conflicts: None,
        };
    };
    let conflicts =
        conflict_detector::detect_conflicts_excluding(start, duration_minutes, existing, task_id);

    debug!(
        target: "app::conflict",
        start = %start,
        duration_minutes,
        conflicts = conflicts.total(),
        "schedule preview built"
    );

    TaskSchedulePreview {
        hints,
        start_at: Some(schedule_utils::format_datetime(start)),
        end_at: Some(schedule_utils::format_datetime(end)),
        duration_minutes,
        conflicts: Some(conflicts),
    }
}
