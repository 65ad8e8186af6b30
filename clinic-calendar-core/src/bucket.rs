//! Grouping sessions by calendar day and by hour of day.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{CalendarError, CalendarResult};
use crate::event::{ScheduledEvent, chronological};
use crate::window::ViewWindow;

/// Sessions falling on one calendar day, in chronological order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayBucket {
    pub date: NaiveDate,
    pub events: Vec<ScheduledEvent>,
}

impl DayBucket {
    pub fn empty(date: NaiveDate) -> Self {
        DayBucket {
            date,
            events: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Sessions starting within one hour of a day, in chronological order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourBucket {
    pub hour: u32,
    pub events: Vec<ScheduledEvent>,
}

/// Inclusive range of hours shown by the week and day grids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "HourRangeFields")]
pub struct HourRange {
    first: u32,
    last: u32,
}

#[derive(Deserialize)]
struct HourRangeFields {
    first: u32,
    last: u32,
}

impl TryFrom<HourRangeFields> for HourRange {
    type Error = CalendarError;

    fn try_from(fields: HourRangeFields) -> CalendarResult<Self> {
        HourRange::new(fields.first, fields.last)
    }
}

impl HourRange {
    /// 08:00 through the 20:00 hour.
    pub const BUSINESS: HourRange = HourRange { first: 8, last: 20 };

    pub fn new(first: u32, last: u32) -> CalendarResult<Self> {
        if first > last || last > 23 {
            return Err(CalendarError::InvalidHourRange { first, last });
        }
        Ok(HourRange { first, last })
    }

    pub fn first(&self) -> u32 {
        self.first
    }

    pub fn last(&self) -> u32 {
        self.last
    }

    pub fn contains(&self, hour: u32) -> bool {
        self.hours().contains(&hour)
    }

    pub fn hours(&self) -> RangeInclusive<u32> {
        self.first..=self.last
    }
}

impl Default for HourRange {
    fn default() -> Self {
        HourRange::BUSINESS
    }
}

/// Group `events` into one bucket per day of `window`, with no gaps.
///
/// Days without sessions get an empty bucket. Sessions dated outside the
/// window are ignored.
pub fn bucket_by_day(events: &[ScheduledEvent], window: &ViewWindow) -> Vec<DayBucket> {
    let mut by_date: BTreeMap<NaiveDate, Vec<ScheduledEvent>> = BTreeMap::new();
    for event in events.iter().filter(|e| window.contains(e.date())) {
        by_date.entry(event.date()).or_default().push(event.clone());
    }

    window
        .days()
        .map(|date| {
            let mut events = by_date.remove(&date).unwrap_or_default();
            events.sort_by(chronological);
            DayBucket { date, events }
        })
        .collect()
}

/// Group the sessions of `day` by the hour they start in, one bucket per hour
/// of `hours`.
///
/// Sessions starting outside `hours` are left out of the result. This is
/// display clipping for the fixed business-hours grid, not a filter on the
/// data: use [`clipped_events`] to find what was left out.
pub fn bucket_by_hour(
    events: &[ScheduledEvent],
    day: NaiveDate,
    hours: HourRange,
) -> Vec<HourBucket> {
    let mut by_hour: BTreeMap<u32, Vec<ScheduledEvent>> = BTreeMap::new();
    for event in events
        .iter()
        .filter(|e| e.date() == day && hours.contains(e.hour()))
    {
        by_hour.entry(event.hour()).or_default().push(event.clone());
    }

    hours
        .hours()
        .map(|hour| {
            let mut events = by_hour.remove(&hour).unwrap_or_default();
            events.sort_by(chronological);
            HourBucket { hour, events }
        })
        .collect()
}

/// Sessions of `day` that [`bucket_by_hour`] clips because they start outside `hours`.
pub fn clipped_events(
    events: &[ScheduledEvent],
    day: NaiveDate,
    hours: HourRange,
) -> Vec<ScheduledEvent> {
    let mut clipped: Vec<ScheduledEvent> = events
        .iter()
        .filter(|e| e.date() == day && !hours.contains(e.hour()))
        .cloned()
        .collect();
    clipped.sort_by(chronological);
    clipped
}
