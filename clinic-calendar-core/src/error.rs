//! Error types for the clinic calendar.

use thiserror::Error;

/// Errors that can occur in calendar operations.
#[derive(Error, Debug)]
pub enum CalendarError {
    #[error("Invalid view mode '{0}'. Expected one of: month, week, day")]
    InvalidMode(String),

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid navigation direction {0}. Expected +1 or -1")]
    InvalidDirection(i32),

    #[error("Invalid hour range {first}..={last}. Expected first <= last <= 23")]
    InvalidHourRange { first: u32, last: u32 },

    #[error("Unsupported locale '{0}'. Expected one of: en, en-US, ar, ar-SA")]
    InvalidLocale(String),

    #[error("Invalid session status '{0}'")]
    InvalidStatus(String),

    #[error("Invalid event {id}: {reason}")]
    InvalidEvent { id: String, reason: String },

    #[error("Unknown time zone '{0}'")]
    InvalidTimezone(String),

    #[error("Event source error: {0}")]
    Source(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for calendar operations.
pub type CalendarResult<T> = Result<T, CalendarError>;
