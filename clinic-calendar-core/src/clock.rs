//! Sources of "now" for navigation and highlighting today.

use chrono::{Local, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;

pub trait Clock {
    /// Current wall-clock time in the calendar's local time.
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Reads the system clock, in a configured time zone or the machine's own.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    tz: Option<Tz>,
}

impl SystemClock {
    pub fn local() -> Self {
        SystemClock { tz: None }
    }

    pub fn in_timezone(tz: Tz) -> Self {
        SystemClock { tz: Some(tz) }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        match self.tz {
            Some(tz) => Utc::now().with_timezone(&tz).naive_local(),
            None => Local::now().naive_local(),
        }
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(NaiveDateTime);

impl FixedClock {
    pub fn at(now: NaiveDateTime) -> Self {
        FixedClock(now)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
