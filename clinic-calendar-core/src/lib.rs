//! Scheduling view logic for the clinic calendar.
//!
//! This crate holds everything the calendar screens compute, independent of
//! how they are drawn:
//! - `window`: visible date range for month, week and day views
//! - `bucket` and `grid`: sessions grouped by day and by hour, and the month grid
//! - `navigation`: moving between windows
//! - `title`: locale-aware header labels
//! - `controller`: view state with protection against out-of-order fetches

pub mod bucket;
pub mod clock;
pub mod config;
pub mod controller;
pub mod error;
pub mod event;
pub mod grid;
pub mod navigation;
pub mod source;
pub mod title;
pub mod view_mode;
pub mod window;

pub use bucket::{DayBucket, HourBucket, HourRange, bucket_by_day, bucket_by_hour, clipped_events};
pub use clock::{Clock, FixedClock, SystemClock};
pub use controller::{CalendarController, CalendarSnapshot, EventFilter, FetchOutcome, ViewState};
pub use error::{CalendarError, CalendarResult};
pub use event::{Doctor, RecordId, ScheduledEvent, SessionStatus};
pub use navigation::{Direction, advance, advance_by, today};
pub use title::{TitleLocale, format_title};
pub use view_mode::ViewMode;
pub use window::{ViewWindow, compute_window, parse_reference_date};
