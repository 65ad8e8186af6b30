//! Clinic session and doctor types.
//!
//! Sessions are created and owned by the clinic's records; the calendar only
//! reads them. Field names serialize in camelCase to match the records'
//! JSON shape (`scheduledAt`, `durationMinutes`, ...).

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{CalendarError, CalendarResult};

/// Identifier of a session or doctor record. Records use either numeric or
/// string ids; numeric ids order before string ids.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Str(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(n) => write!(f, "{n}"),
            RecordId::Str(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for RecordId {
    fn from(n: i64) -> Self {
        RecordId::Int(n)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        RecordId::Str(s.to_string())
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        RecordId::Str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SessionStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
    NoShow,
}

impl SessionStatus {
    pub const ALL: [SessionStatus; 5] = [
        SessionStatus::Scheduled,
        SessionStatus::InProgress,
        SessionStatus::Completed,
        SessionStatus::Cancelled,
        SessionStatus::NoShow,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SessionStatus::Scheduled => "scheduled",
            SessionStatus::InProgress => "in-progress",
            SessionStatus::Completed => "completed",
            SessionStatus::Cancelled => "cancelled",
            SessionStatus::NoShow => "no-show",
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SessionStatus {
    type Err = CalendarError;

    fn from_str(s: &str) -> CalendarResult<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        SessionStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| CalendarError::InvalidStatus(s.to_string()))
    }
}

/// A scheduled clinic session (appointment).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledEvent {
    pub id: RecordId,
    /// Local calendar time; no time zone is attached.
    pub scheduled_at: NaiveDateTime,
    pub duration_minutes: u32,
    /// Patient name
    pub subject_name: String,
    /// Doctor name
    pub counterpart_name: String,
    /// Doctor id, when the record links one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counterpart_id: Option<RecordId>,
    pub status: SessionStatus,
}

impl ScheduledEvent {
    pub fn validate(&self) -> CalendarResult<()> {
        if self.duration_minutes == 0 {
            return Err(CalendarError::InvalidEvent {
                id: self.id.to_string(),
                reason: "duration must be at least one minute".into(),
            });
        }
        Ok(())
    }

    /// Calendar day the session falls on, ignoring time of day.
    pub fn date(&self) -> NaiveDate {
        self.scheduled_at.date()
    }

    pub fn hour(&self) -> u32 {
        self.scheduled_at.hour()
    }

    pub fn ends_at(&self) -> NaiveDateTime {
        self.scheduled_at + Duration::minutes(i64::from(self.duration_minutes))
    }
}

impl fmt::Display for ScheduledEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} with {}", self.subject_name, self.counterpart_name)
    }
}

/// Orders sessions by start time, then by id so equal start times stay deterministic.
pub fn chronological(a: &ScheduledEvent, b: &ScheduledEvent) -> Ordering {
    a.scheduled_at
        .cmp(&b.scheduled_at)
        .then_with(|| a.id.cmp(&b.id))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: RecordId,
    pub name: String,
    pub specialization: String,
}
