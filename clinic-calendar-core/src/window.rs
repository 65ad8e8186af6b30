//! Visible date range for a calendar view.

use std::fmt;

use chrono::{Datelike, Days, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use crate::error::{CalendarError, CalendarResult};
use crate::view_mode::ViewMode;

/// Inclusive date range shown by a view.
/// Derived from a mode and a reference date; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ViewWindow {
    pub mode: ViewMode,
    pub reference_date: NaiveDate,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Compute the visible window for `mode` around `reference_date`.
///
/// - month: the month's first day walked back to Sunday, through the
///   month's last day walked forward to Saturday (whole weeks only)
/// - week: Sunday on/before the reference date through the following Saturday
/// - day: the reference date alone
pub fn compute_window(mode: ViewMode, reference_date: NaiveDate) -> ViewWindow {
    let (start, end) = match mode {
        ViewMode::Month => {
            let first = first_of_month(reference_date);
            let last = last_of_month(reference_date);
            (week_start(first), week_end(last))
        }
        ViewMode::Week => {
            let start = week_start(reference_date);
            (start, add_days(start, 6))
        }
        ViewMode::Day => (reference_date, reference_date),
    };

    ViewWindow {
        mode,
        reference_date,
        start,
        end,
    }
}

impl ViewWindow {
    /// Number of calendar days in the window, both ends included.
    pub fn day_count(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Every date in the window, in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let end = self.end;
        self.start.iter_days().take_while(move |date| *date <= end)
    }

    /// Local midnight at the start of the window.
    pub fn start_instant(&self) -> NaiveDateTime {
        self.start.and_time(NaiveTime::MIN)
    }

    /// 23:59:59.999 local on the last day of the window.
    pub fn end_instant(&self) -> NaiveDateTime {
        let last_millisecond = Duration::milliseconds(86_400_000 - 1);
        self.end
            .and_time(NaiveTime::MIN)
            .checked_add_signed(last_millisecond)
            .unwrap_or(NaiveDateTime::MAX)
    }
}

impl fmt::Display for ViewWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}..={}", self.mode, self.start, self.end)
    }
}

/// Parse a YYYY-MM-DD reference date.
pub fn parse_reference_date(s: &str) -> CalendarResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| CalendarError::InvalidDate(s.to_string()))
}

/// Sunday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    sub_days(date, date.weekday().num_days_from_sunday())
}

/// Saturday on or after `date`.
pub fn week_end(date: NaiveDate) -> NaiveDate {
    add_days(date, 6 - date.weekday().num_days_from_sunday())
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    sub_days(date, date.day0())
}

pub fn last_of_month(date: NaiveDate) -> NaiveDate {
    first_of_month(date)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

// Date arithmetic saturates at chrono's representable range.
pub(crate) fn add_days(date: NaiveDate, days: u32) -> NaiveDate {
    date.checked_add_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MAX)
}

pub(crate) fn sub_days(date: NaiveDate, days: u32) -> NaiveDate {
    date.checked_sub_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MIN)
}
