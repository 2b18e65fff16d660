use chrono::{DateTime, FixedOffset};
use tracing::{debug, warn};

use crate::models::schedule::{ConflictResult, TimeInterval};
use crate::services::schedule_utils;

/// Classifies existing commitments that overlap a candidate time window.
pub struct ConflictDetector;

impl ConflictDetector {
    pub fn detect(
        candidate_start: DateTime<FixedOffset>,
        duration_minutes: i64,
        existing: &[TimeInterval],
    ) -> ConflictResult {
        Self::detect_excluding(candidate_start, duration_minutes, existing, None)
    }

    /// Same as [`ConflictDetector::detect`] but ignores the item whose id is
    /// `exclude_id`, so a task being moved never conflicts with itself.
    pub fn detect_excluding(
        candidate_start: DateTime<FixedOffset>,
        duration_minutes: i64,
        existing: &[TimeInterval],
        exclude_id: Option<&str>,
    ) -> ConflictResult {
        let mut result = ConflictResult::default();

        let Some(candidate_end) =
            schedule_utils::checked_add_minutes(candidate_start, duration_minutes)
        else {
            warn!(
                target: "app::conflict",
                start = %candidate_start,
                duration_minutes,
                "candidate window out of range"
            );
            return result;
        };

        for item in existing {
            if let (Some(excluded), Some(id)) = (exclude_id, item.id.as_deref()) {
                if excluded == id {
                    continue;
                }
            }

            let Some((item_start, item_end)) = item.bounds() else {
                debug!(
                    target: "app::conflict",
                    id = item.id.as_deref().unwrap_or("-"),
                    "skipping interval without valid timestamps"
                );
                continue;
            };

            if !schedule_utils::overlaps_half_open(
                item_start,
                item_end,
                candidate_start,
                candidate_end,
            ) {
                continue;
            }

            if item.source.is_immovable() {
                result.immoveable_conflicts.push(item.clone());
            } else {
                result.moveable_conflicts.push(item.clone());
            }
        }

        debug!(
            target: "app::conflict",
            moveable = result.moveable_conflicts.len(),
            immoveable = result.immoveable_conflicts.len(),
            "conflict scan finished"
        );

        result
    }
}

pub fn detect_conflicts(
    candidate_start: DateTime<FixedOffset>,
    duration_minutes: i64,
    existing: &[TimeInterval],
) -> ConflictResult {
    ConflictDetector::detect(candidate_start, duration_minutes, existing)
}

pub fn detect_conflicts_excluding(
    candidate_start: DateTime<FixedOffset>,
    duration_minutes: i64,
    existing: &[TimeInterval],
    exclude_id: Option<&str>,
) -> ConflictResult {
    ConflictDetector::detect_excluding(candidate_start, duration_minutes, existing, exclude_id)
}
