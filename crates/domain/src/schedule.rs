use chrono::{DateTime, Months, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The single zone every human facing date time is read and written in.
pub const FIXED_TIMEZONE: Tz = chrono_tz::Asia::Taipei;

/// Format of the date time text exchanged with users, e.g. `2024-12-29 14:00`
pub const LOCAL_DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// How far ahead of now a reminder may be scheduled
const MAX_MONTHS_AHEAD: u32 = 12;

/// What the extraction step made out of a free text message.
///
/// `is_valid` set to `false` is not an error, it means that the message did not
/// contain a well formed date, time and task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleCandidate {
    /// Local date time in `LOCAL_DATE_TIME_FORMAT`
    #[serde(rename = "dateTime", default)]
    pub date_time_text: String,
    #[serde(rename = "task", default)]
    pub task_text: String,
    #[serde(rename = "valid")]
    pub is_valid: bool,
}

impl ScheduleCandidate {
    pub fn new(date_time_text: impl Into<String>, task_text: impl Into<String>) -> Self {
        Self {
            date_time_text: date_time_text.into(),
            task_text: task_text.into(),
            is_valid: true,
        }
    }

    pub fn invalid() -> Self {
        Self {
            date_time_text: String::new(),
            task_text: String::new(),
            is_valid: false,
        }
    }
}

/// A `ScheduleCandidate` whose time has been checked to be in the
/// window `(now, now + 1 year]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedSchedule {
    pub scheduled_at: DateTime<Utc>,
    pub task: String,
}

impl ValidatedSchedule {
    pub fn validate(
        candidate: &ScheduleCandidate,
        now: DateTime<Utc>,
    ) -> Result<Self, ScheduleTimeError> {
        let scheduled_at = validate_schedule_time(&candidate.date_time_text, now)?;
        Ok(Self {
            scheduled_at,
            task: candidate.task_text.clone(),
        })
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleTimeError {
    #[error("Date time: `{0}` is not a valid YYYY-MM-DD HH:MM local time")]
    MalformedTime(String),
    #[error("Can't schedule a reminder in the past")]
    PastTime,
    #[error("Can't schedule a reminder more than one year ahead")]
    FutureTimeOutOfRange,
}

/// Reads a `LOCAL_DATE_TIME_FORMAT` string in the `FIXED_TIMEZONE`.
/// Local times that do not map to exactly one instant are rejected.
pub fn parse_local_date_time(date_time_text: &str) -> Result<DateTime<Utc>, ScheduleTimeError> {
    let malformed = || ScheduleTimeError::MalformedTime(date_time_text.to_string());

    let naive = NaiveDateTime::parse_from_str(date_time_text, LOCAL_DATE_TIME_FORMAT)
        .map_err(|_| malformed())?;
    FIXED_TIMEZONE
        .from_local_datetime(&naive)
        .single()
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(malformed)
}

pub fn format_local_date_time(instant: &DateTime<Utc>) -> String {
    instant
        .with_timezone(&FIXED_TIMEZONE)
        .format(LOCAL_DATE_TIME_FORMAT)
        .to_string()
}

/// Checks that the given local date time lies in `(now, now + 1 year]` and returns
/// it as an absolute instant. The year is added on the local calendar.
pub fn validate_schedule_time(
    date_time_text: &str,
    now: DateTime<Utc>,
) -> Result<DateTime<Utc>, ScheduleTimeError> {
    let scheduled_at = parse_local_date_time(date_time_text)?;

    if scheduled_at <= now {
        return Err(ScheduleTimeError::PastTime);
    }

    let latest = now
        .with_timezone(&FIXED_TIMEZONE)
        .checked_add_months(Months::new(MAX_MONTHS_AHEAD))
        .map(|latest| latest.with_timezone(&Utc));
    match latest {
        Some(latest) if scheduled_at <= latest => Ok(scheduled_at),
        _ => Err(ScheduleTimeError::FutureTimeOutOfRange),
    }
}
