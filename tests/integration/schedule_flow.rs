// End-to-end flow through the command facade: parse a title, preview the
// resulting block, then check conflicts the way the submission step does.

use groov_core_lib::commands::schedule::{
    schedule_detect_conflicts, tasks_parse_title, tasks_preview_schedule, DetectConflictsRequest,
    ParseTitleRequest, PreviewScheduleRequest,
};
use groov_core_lib::commands::AppState;
use groov_core_lib::config::{AppConfig, SchedulingConfig};
use groov_core_lib::models::schedule::TimeInterval;
use serde_json::json;

fn state(default_minutes: i64) -> AppState {
    AppState::new(AppConfig {
        scheduling: SchedulingConfig {
            default_task_minutes: default_minutes,
        },
        ..Default::default()
    })
    .expect("valid state")
}

fn week_events() -> Vec<TimeInterval> {
    serde_json::from_value(json!([
        {
            "id": "gcal-standup",
            "title": "Standup",
            "startAt": "2025-05-09T15:30:00+02:00",
            "endAt": "2025-05-09T15:45:00+02:00",
            "source": "calendar"
        },
        {
            "id": "task-inbox",
            "title": "Inbox zero",
            "startAt": "2025-05-09T16:00:00+02:00",
            "endAt": "2025-05-09T16:30:00+02:00",
            "source": "task"
        },
        {
            "id": "task-late",
            "startAt": "2025-05-09T16:30:00+02:00",
            "endAt": "2025-05-09T17:00:00+02:00",
            "source": "task"
        }
    ]))
    .expect("events deserialize")
}

#[test]
fn test_parse_command_resolves_hints() {
    let hints = tasks_parse_title(ParseTitleRequest {
        title: "Quarterly review on Friday at 3pm for 1.5 hours".to_string(),
        base_date: Some("2025-05-05T09:00:00+02:00".to_string()),
    })
    .expect("parse succeeds");

    assert_eq!(hints.clean_title, "Quarterly review");
    assert_eq!(hints.duration, Some(90));

    let value = serde_json::to_value(&hints).expect("serialize hints");
    assert_eq!(value["hasTime"], true);
    assert_eq!(value["hasDay"], true);
    assert_eq!(value["day"], "2025-05-09T00:00:00+02:00");
    assert_eq!(value["time"], "2025-05-09T15:00:00+02:00");
}

#[test]
fn test_preview_uses_parsed_duration_and_classifies_conflicts() {
    let preview = tasks_preview_schedule(
        &state(30),
        PreviewScheduleRequest {
            title: "Quarterly review on Friday at 3pm for 1.5 hours".to_string(),
            base_date: Some("2025-05-05T09:00:00+02:00".to_string()),
            existing: week_events(),
            task_id: None,
            duration_minutes: None,
        },
    )
    .expect("preview succeeds");

    assert_eq!(preview.duration_minutes, 90);
    assert_eq!(preview.start_at.as_deref(), Some("2025-05-09T15:00:00+02:00"));
    assert_eq!(preview.end_at.as_deref(), Some("2025-05-09T16:30:00+02:00"));

    let conflicts = preview.conflicts.expect("conflicts computed");
    assert!(conflicts.is_blocked());
    assert_eq!(conflicts.immoveable_conflicts[0].id.as_deref(), Some("gcal-standup"));
    // task-late starts exactly when the block ends.
    assert_eq!(conflicts.moveable_conflicts.len(), 1);
    assert_eq!(conflicts.moveable_conflicts[0].id.as_deref(), Some("task-inbox"));
}

#[test]
fn test_preview_falls_back_to_configured_duration() {
    let preview = tasks_preview_schedule(
        &state(45),
        PreviewScheduleRequest {
            title: "Pair with Dana fri at 4pm".to_string(),
            base_date: Some("2025-05-05T09:00:00+02:00".to_string()),
            existing: week_events(),
            task_id: Some("task-inbox".to_string()),
            duration_minutes: None,
        },
    )
    .expect("preview succeeds");

    assert_eq!(preview.duration_minutes, 45);
    assert_eq!(preview.end_at.as_deref(), Some("2025-05-09T16:45:00+02:00"));
    let conflicts = preview.conflicts.expect("conflicts computed");
    assert!(!conflicts.is_blocked());
    let ids: Vec<_> = conflicts
        .moveable_conflicts
        .iter()
        .filter_map(|item| item.id.as_deref())
        .collect();
    assert_eq!(ids, vec!["task-late"]);
}

#[test]
fn test_preview_rejects_invalid_override() {
    let error = tasks_preview_schedule(
        &state(30),
        PreviewScheduleRequest {
            title: "Gym at 7am".to_string(),
            base_date: None,
            existing: Vec::new(),
            task_id: None,
            duration_minutes: Some(-15),
        },
    )
    .expect_err("negative duration rejected");
    assert_eq!(error.code, "VALIDATION_ERROR");
}

#[test]
fn test_detect_command_reports_summary() {
    let result = schedule_detect_conflicts(DetectConflictsRequest {
        candidate_start: "2025-05-09T15:40:00+02:00".to_string(),
        duration_minutes: 30,
        existing: week_events(),
        exclude_id: None,
    })
    .expect("detect succeeds");

    assert_eq!(result.total(), 2);
    assert_eq!(
        result.summary_messages(),
        vec![
            "Overlaps calendar event Standup (2025-05-09 15:30 to 2025-05-09 15:45)".to_string(),
            "Overlaps task Inbox zero (can be moved) (2025-05-09 16:00 to 2025-05-09 16:30)"
                .to_string(),
        ]
    );
}

#[test]
fn test_detect_command_rejects_bad_start() {
    let error = schedule_detect_conflicts(DetectConflictsRequest {
        candidate_start: "Friday afternoon".to_string(),
        duration_minutes: 30,
        existing: Vec::new(),
        exclude_id: None,
    })
    .expect_err("bad start rejected");

    assert_eq!(error.code, "VALIDATION_ERROR");
    let details = error.details.expect("details attached");
    assert_eq!(details["value"], "Friday afternoon");
}
