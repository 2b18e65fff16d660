//! Extraction of schedule hints (duration, weekday, time of day) from task titles.
//!
//! Each stage takes the current title and returns `(hint, new_title)`. The
//! stages run as duration → day → time, and each one sees the title as the
//! previous stage left it. Every pattern family is an ordered list in which
//! the first usable match wins.

use chrono::{DateTime, Datelike, Duration, FixedOffset, Local, NaiveTime, Weekday};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::debug;

use crate::models::schedule::ParsedScheduleHints;
use crate::services::schedule_utils;

const NUMBER: &str = r"(\d+(?:\.\d+)?)";
const FULL_WEEKDAYS: &str = "sunday|monday|tuesday|wednesday|thursday|friday|saturday";
const SHORT_WEEKDAYS: &str = "sun|mon|tues|tue|wed|thurs|thur|thu|fri|sat";
const O_CLOCK: &str = r"o['’]?clock";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DurationUnit {
    Hours,
    Minutes,
}

impl DurationUnit {
    /// Whole minutes, or `None` when the amount is not positive or does not
    /// fit a `chrono::Duration`.
    fn to_minutes(self, value: f64) -> Option<i64> {
        let minutes = match self {
            DurationUnit::Hours => (value * 60.0).round(),
            DurationUnit::Minutes => value.round(),
        };
        if !minutes.is_finite() || minutes < 1.0 || minutes >= i64::MAX as f64 {
            return None;
        }

        let minutes = minutes as i64;
        Duration::try_minutes(minutes).map(|_| minutes)
    }
}

struct DurationPattern {
    regex: Regex,
    unit: DurationUnit,
}

fn compile(pattern: &str) -> Regex {
    Regex::new(&format!("(?i){pattern}")).expect("built-in title pattern must compile")
}

static DURATION_PATTERNS: Lazy<Vec<DurationPattern>> = Lazy::new(|| {
    let suffix = r"(?:\s+(?:long|duration))?";
    [
        (format!(r"\bfor\s+{NUMBER}\s*(?:hours?|hrs?)\b"), DurationUnit::Hours),
        (format!(r"\bfor\s+{NUMBER}\s*(?:minutes?|mins?)\b"), DurationUnit::Minutes),
        (format!(r"\bfor\s+{NUMBER}\s*h\b"), DurationUnit::Hours),
        (format!(r"\b{NUMBER}\s*(?:hours?|hrs?){suffix}\b"), DurationUnit::Hours),
        (format!(r"\b{NUMBER}\s*(?:minutes?|mins?){suffix}\b"), DurationUnit::Minutes),
        (format!(r"\b{NUMBER}\s*h{suffix}\b"), DurationUnit::Hours),
    ]
    .into_iter()
    .map(|(pattern, unit)| DurationPattern {
        regex: compile(&pattern),
        unit,
    })
    .collect()
});

static DAY_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        compile(&format!(r"\bon\s+({FULL_WEEKDAYS})\b")),
        compile(&format!(r"\b({FULL_WEEKDAYS})\b")),
        compile(&format!(r"\bon\s+({SHORT_WEEKDAYS})\b")),
        compile(&format!(r"\b({SHORT_WEEKDAYS})\b")),
    ]
});

static TIME_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        compile(r"\bat\s+(?P<hour>\d{1,2})(?::(?P<minute>\d{2}))?\s*(?P<meridiem>am|pm)\b"),
        compile(r"\bat\s+(?P<hour>\d{1,2})(?::(?P<minute>\d{2}))?\b"),
        compile(r"\b(?P<hour>\d{1,2})(?::(?P<minute>\d{2}))?\s*(?P<meridiem>am|pm)\b"),
        compile(&format!(r"\bat\s+(?P<hour>\d{{1,2}})\s*{O_CLOCK}\b")),
        compile(&format!(r"\b(?P<hour>\d{{1,2}})\s*{O_CLOCK}\b")),
    ]
});

static TRAILING_O_CLOCK: Lazy<Regex> = Lazy::new(|| compile(&format!(r"^\s*{O_CLOCK}\b")));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| compile(r"\s+"));
static SPACE_BEFORE_PUNCTUATION: Lazy<Regex> = Lazy::new(|| compile(r"\s+([,.;:!?])"));
static LEADING_PREPOSITION: Lazy<Regex> = Lazy::new(|| compile(r"^(?:for|of)\b\s*"));
static TRAILING_PREPOSITION: Lazy<Regex> = Lazy::new(|| compile(r"\s+(?:for|of)$"));

pub struct TitleParser;

impl TitleParser {
    /// Parses `title` relative to `base_date`, or to the local "now" when absent.
    ///
    /// Never fails: text that is not understood simply yields fewer hints.
    pub fn parse(title: &str, base_date: Option<DateTime<FixedOffset>>) -> ParsedScheduleHints {
        let base = base_date.unwrap_or_else(|| Local::now().fixed_offset());

        let (duration, after_duration) = parse_duration(title);
        let (day, after_day) = parse_day(&after_duration, base);
        let (time, after_time) = parse_time(&after_day, day.unwrap_or(base));

        let time = match (day, time) {
            (Some(day), Some(time)) => Some(schedule_utils::with_time_of_day(day, time.time())),
            (_, time) => time,
        };
        let has_day = day.is_some();
        let day = day.or_else(|| time.map(schedule_utils::start_of_day));

        let clean_title = if after_time.trim().is_empty() {
            title.to_string()
        } else {
            after_time
        };

        debug!(
            target: "app::parser",
            has_duration = duration.is_some(),
            has_day,
            has_time = time.is_some(),
            %clean_title,
            "parsed task title"
        );

        ParsedScheduleHints {
            has_time: time.is_some(),
            has_day,
            has_duration: duration.is_some(),
            time,
            day,
            duration,
            clean_title,
        }
    }
}

pub fn parse_task_title(
    title: &str,
    base_date: Option<DateTime<FixedOffset>>,
) -> ParsedScheduleHints {
    TitleParser::parse(title, base_date)
}

/// Duration in minutes. Zero-length and out-of-range matches are skipped.
pub fn parse_duration(title: &str) -> (Option<i64>, String) {
    for pattern in DURATION_PATTERNS.iter() {
        let Some(captures) = pattern.regex.captures(title) else {
            continue;
        };
        let Some(value) = captures
            .get(1)
            .and_then(|m| m.as_str().parse::<f64>().ok())
        else {
            continue;
        };

        let Some(minutes) = pattern.unit.to_minutes(value) else {
            debug!(target: "app::parser", matched = &captures[0], "ignoring unusable duration");
            continue;
        };

        return (Some(minutes), strip_match(title, &captures));
    }

    (None, title.to_string())
}

/// Next occurrence of a named weekday strictly after `base`'s date, at midnight.
pub fn parse_day(
    title: &str,
    base: DateTime<FixedOffset>,
) -> (Option<DateTime<FixedOffset>>, String) {
    for regex in DAY_PATTERNS.iter() {
        let Some(captures) = regex.captures(title) else {
            continue;
        };
        let Some(target) = weekday_from_name(&captures[1]) else {
            continue;
        };
        let Some(day) = next_weekday(base, target) else {
            continue;
        };

        return (Some(day), strip_match(title, &captures));
    }

    (None, title.to_string())
}

/// Time of day applied onto `base`'s date with seconds cleared.
pub fn parse_time(
    title: &str,
    base: DateTime<FixedOffset>,
) -> (Option<DateTime<FixedOffset>>, String) {
    for regex in TIME_PATTERNS.iter() {
        let Some(captures) = regex.captures(title) else {
            continue;
        };
        if splits_clock_time(title, &captures) {
            debug!(target: "app::parser", matched = &captures[0], "ignoring partial clock time");
            continue;
        }
        let Some(time) = time_from_captures(&captures) else {
            debug!(target: "app::parser", matched = &captures[0], "ignoring out-of-range time");
            continue;
        };

        let resolved = schedule_utils::with_time_of_day(base, time);
        return (Some(resolved), strip_match(title, &captures));
    }

    (None, title.to_string())
}

pub fn weekday_from_name(name: &str) -> Option<Weekday> {
    match name.to_ascii_lowercase().as_str() {
        "sunday" | "sun" => Some(Weekday::Sun),
        "monday" | "mon" => Some(Weekday::Mon),
        "tuesday" | "tue" | "tues" => Some(Weekday::Tue),
        "wednesday" | "wed" => Some(Weekday::Wed),
        "thursday" | "thu" | "thur" | "thurs" => Some(Weekday::Thu),
        "friday" | "fri" => Some(Weekday::Fri),
        "saturday" | "sat" => Some(Weekday::Sat),
        _ => None,
    }
}

fn next_weekday(base: DateTime<FixedOffset>, target: Weekday) -> Option<DateTime<FixedOffset>> {
    let current = i64::from(base.weekday().num_days_from_sunday());
    let mut days_until = i64::from(target.num_days_from_sunday()) - current;
    if days_until <= 0 {
        days_until += 7;
    }

    schedule_utils::start_of_day(base).checked_add_signed(Duration::days(days_until))
}

fn time_from_captures(captures: &Captures<'_>) -> Option<NaiveTime> {
    let mut hour: u32 = captures.name("hour")?.as_str().parse().ok()?;
    let minute: u32 = match captures.name("minute") {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };

    if let Some(meridiem) = captures.name("meridiem") {
        let is_pm = meridiem.as_str().eq_ignore_ascii_case("pm");
        if is_pm && hour != 12 {
            hour += 12;
        } else if !is_pm && hour == 12 {
            hour = 0;
        }
    }

    if hour > 23 || minute > 59 {
        return None;
    }

    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// True when the match stops right before `:<digit>`, e.g. "at 3" in "at 3:75pm".
fn splits_clock_time(title: &str, captures: &Captures<'_>) -> bool {
    let Some(found) = captures.get(0) else {
        return false;
    };
    let mut rest = title[found.end()..].chars();
    rest.next() == Some(':') && rest.next().is_some_and(|c| c.is_ascii_digit())
}

/// Removes the matched span (plus a dangling "o'clock") and tidies the rest.
fn strip_match(title: &str, captures: &Captures<'_>) -> String {
    let Some(found) = captures.get(0) else {
        return title.to_string();
    };

    let rest = &title[found.end()..];
    let rest = match TRAILING_O_CLOCK.find(rest) {
        Some(suffix) => &rest[suffix.end()..],
        None => rest,
    };

    tidy(&format!("{} {}", &title[..found.start()], rest))
}

fn tidy(title: &str) -> String {
    let collapsed = WHITESPACE.replace_all(title.trim(), " ");
    let collapsed = SPACE_BEFORE_PUNCTUATION.replace_all(&collapsed, "$1");
    let trimmed = LEADING_PREPOSITION.replace(&collapsed, "");
    let trimmed = TRAILING_PREPOSITION.replace(&trimmed, "");
    trimmed.trim().to_string()
}
