use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::services::schedule_utils;

/// Schedule hints extracted from a free-text task title.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ParsedScheduleHints {
    pub has_time: bool,
    pub has_day: bool,
    pub has_duration: bool,
    #[serde(default)]
    pub time: Option<DateTime<FixedOffset>>,
    /// Midnight of the resolved day. Falls back to the date of `time` when
    /// only a time phrase was present.
    #[serde(default)]
    pub day: Option<DateTime<FixedOffset>>,
    /// Minutes.
    #[serde(default)]
    pub duration: Option<i64>,
    pub clean_title: String,
}

impl ParsedScheduleHints {
    pub fn passthrough(title: &str) -> Self {
        Self {
            has_time: false,
            has_day: false,
            has_duration: false,
            time: None,
            day: None,
            duration: None,
            clean_title: title.to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.has_time && !self.has_day && !self.has_duration
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum IntervalSource {
    #[default]
    Task,
    Calendar,
    #[serde(other)]
    Other,
}

impl IntervalSource {
    /// Only externally synced calendar events are treated as fixed.
    pub fn is_immovable(self) -> bool {
        matches!(self, IntervalSource::Calendar)
    }
}

/// An existing commitment: a scheduled task or a synced calendar event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct TimeInterval {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub start_at: Option<String>,
    #[serde(default)]
    pub end_at: Option<String>,
    #[serde(default)]
    pub source: IntervalSource,
}

impl TimeInterval {
    pub fn new(
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
        source: IntervalSource,
    ) -> Self {
        Self {
            id: None,
            title: None,
            start_at: Some(schedule_utils::format_datetime(start)),
            end_at: Some(schedule_utils::format_datetime(end)),
            source,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Both endpoints, or `None` when either is missing or not RFC 3339.
    pub fn bounds(&self) -> Option<(DateTime<FixedOffset>, DateTime<FixedOffset>)> {
        let start = schedule_utils::try_parse_datetime(self.start_at.as_deref()?)?;
        let end = schedule_utils::try_parse_datetime(self.end_at.as_deref()?)?;
        Some((start, end))
    }

    fn label(&self) -> String {
        match (&self.title, &self.id) {
            (Some(title), _) => title.clone(),
            (None, Some(id)) => id.clone(),
            (None, None) => "untitled".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ConflictResult {
    pub moveable_conflicts: Vec<TimeInterval>,
    pub immoveable_conflicts: Vec<TimeInterval>,
}

impl ConflictResult {
    pub fn has_conflicts(&self) -> bool {
        !self.moveable_conflicts.is_empty() || !self.immoveable_conflicts.is_empty()
    }

    /// True when a fixed calendar event occupies part of the window.
    pub fn is_blocked(&self) -> bool {
        !self.immoveable_conflicts.is_empty()
    }

    pub fn total(&self) -> usize {
        self.moveable_conflicts.len() + self.immoveable_conflicts.len()
    }

    /// One line per conflict, immovable ones first.
    pub fn summary_messages(&self) -> Vec<String> {
        let fixed = self
            .immoveable_conflicts
            .iter()
            .map(|item| format!("Overlaps calendar event {}{}", item.label(), span(item)));
        let movable = self
            .moveable_conflicts
            .iter()
            .map(|item| format!("Overlaps task {} (can be moved){}", item.label(), span(item)));
        fixed.chain(movable).collect()
    }
}

fn span(item: &TimeInterval) -> String {
    match item.bounds() {
        Some((start, end)) => format!(
            " ({} to {})",
            start.format("%Y-%m-%d %H:%M"),
            end.format("%Y-%m-%d %H:%M")
        ),
        None => String::new(),
    }
}
