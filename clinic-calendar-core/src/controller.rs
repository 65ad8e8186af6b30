//! View state, fetch bookkeeping and render snapshots for the calendar.
//!
//! Fetches are tagged with the view they were issued for. A response that
//! arrives after the user has moved to another view, or after a newer
//! response for the same view, is dropped instead of overwriting what is on
//! screen.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, warn};

use crate::bucket::{DayBucket, HourBucket, HourRange, bucket_by_day, bucket_by_hour, clipped_events};
use crate::clock::Clock;
use crate::error::CalendarResult;
use crate::event::{ScheduledEvent, SessionStatus};
use crate::grid::MonthGrid;
use crate::navigation::{Direction, advance};
use crate::source::EventSource;
use crate::title::{TitleLocale, format_title};
use crate::view_mode::ViewMode;
use crate::window::{ViewWindow, compute_window};

/// What the user is looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ViewState {
    pub mode: ViewMode,
    pub reference_date: NaiveDate,
}

impl ViewState {
    pub fn new(mode: ViewMode, reference_date: NaiveDate) -> Self {
        ViewState {
            mode,
            reference_date,
        }
    }

    pub fn window(&self) -> ViewWindow {
        compute_window(self.mode, self.reference_date)
    }
}

/// Issued by [`CalendarController::begin_fetch`], handed back on completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    view: ViewState,
    sequence: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The response replaced the displayed sessions
    Applied { sessions: usize },
    /// The fetch failed; the view shows no sessions
    Failed,
    /// The response no longer matches the view and was dropped
    Stale,
}

/// Narrows the displayed sessions to one doctor and/or one status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    /// Doctor id or name
    pub doctor: Option<String>,
    pub status: Option<SessionStatus>,
}

impl EventFilter {
    pub fn matches(&self, event: &ScheduledEvent) -> bool {
        let doctor_ok = self.doctor.as_deref().is_none_or(|doctor| {
            event
                .counterpart_id
                .as_ref()
                .is_some_and(|id| id.to_string() == doctor)
                || event.counterpart_name.eq_ignore_ascii_case(doctor)
        });
        let status_ok = self.status.is_none_or(|status| event.status == status);
        doctor_ok && status_ok
    }
}

/// Hour grid for one day of a week or day view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySchedule {
    pub date: NaiveDate,
    pub hours: Vec<HourBucket>,
    /// Sessions starting outside the hour range, not shown in `hours`
    pub clipped: Vec<ScheduledEvent>,
}

/// Everything a view needs to draw itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarSnapshot {
    pub window: ViewWindow,
    pub title: String,
    pub locale: TitleLocale,
    pub hour_range: HourRange,
    pub days: Vec<DayBucket>,
    /// 42-cell layout, month views only
    pub month_grid: Option<MonthGrid>,
    /// Empty for month views
    pub schedules: Vec<DaySchedule>,
}

impl CalendarSnapshot {
    pub fn session_count(&self) -> usize {
        self.days.iter().map(|d| d.events.len()).sum()
    }

    pub fn clipped_count(&self) -> usize {
        self.schedules.iter().map(|s| s.clipped.len()).sum()
    }
}

pub struct CalendarController<S> {
    source: S,
    view: ViewState,
    hour_range: HourRange,
    locale: TitleLocale,
    filter: EventFilter,
    events: Vec<ScheduledEvent>,
    issued: u64,
    applied: u64,
}

impl<S> CalendarController<S> {
    pub fn new(source: S, view: ViewState) -> Self {
        CalendarController {
            source,
            view,
            hour_range: HourRange::default(),
            locale: TitleLocale::default(),
            filter: EventFilter::default(),
            events: Vec::new(),
            issued: 0,
            applied: 0,
        }
    }

    pub fn with_hour_range(mut self, hour_range: HourRange) -> Self {
        self.hour_range = hour_range;
        self
    }

    pub fn with_locale(mut self, locale: TitleLocale) -> Self {
        self.locale = locale;
        self
    }

    pub fn with_filter(mut self, filter: EventFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn set_mode(&mut self, mode: ViewMode) {
        self.view.mode = mode;
    }

    pub fn navigate(&mut self, direction: Direction) {
        self.view.reference_date = advance(self.view.mode, self.view.reference_date, direction);
    }

    pub fn go_to(&mut self, date: NaiveDate) {
        self.view.reference_date = date;
    }

    pub fn go_to_today(&mut self, clock: &impl Clock) {
        self.view.reference_date = clock.today();
    }

    pub fn set_filter(&mut self, filter: EventFilter) {
        self.filter = filter;
    }

    /// Tag a fetch with the current view.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.issued += 1;
        FetchTicket {
            view: self.view,
            sequence: self.issued,
        }
    }

    /// Apply a fetch result if it still belongs to the current view.
    ///
    /// A failed fetch clears the displayed sessions rather than surfacing
    /// the error to the date logic.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: CalendarResult<Vec<ScheduledEvent>>,
    ) -> FetchOutcome {
        if ticket.view != self.view || ticket.sequence < self.applied {
            debug!(
                issued_for = %ticket.view.window(),
                current = %self.view.window(),
                sequence = ticket.sequence,
                "dropping stale session fetch"
            );
            return FetchOutcome::Stale;
        }

        self.applied = ticket.sequence;
        match result {
            Ok(events) => {
                let sessions = events.len();
                self.events = events;
                FetchOutcome::Applied { sessions }
            }
            Err(err) => {
                warn!(error = %err, "session fetch failed; showing an empty calendar");
                self.events.clear();
                FetchOutcome::Failed
            }
        }
    }

    pub fn snapshot(&self) -> CalendarSnapshot {
        let window = self.view.window();
        let visible: Vec<ScheduledEvent> = self
            .events
            .iter()
            .filter(|e| self.filter.matches(e))
            .cloned()
            .collect();

        let days = bucket_by_day(&visible, &window);

        let month_grid = match self.view.mode {
            ViewMode::Month => Some(MonthGrid::new(&window, &visible)),
            ViewMode::Week | ViewMode::Day => None,
        };

        let schedules: Vec<DaySchedule> = if self.view.mode.uses_hour_grid() {
            days.iter()
                .map(|day| DaySchedule {
                    date: day.date,
                    hours: bucket_by_hour(&day.events, day.date, self.hour_range),
                    clipped: clipped_events(&day.events, day.date, self.hour_range),
                })
                .collect()
        } else {
            Vec::new()
        };

        let clipped: usize = schedules.iter().map(|s| s.clipped.len()).sum();
        if clipped > 0 {
            debug!(
                clipped,
                first_hour = self.hour_range.first(),
                last_hour = self.hour_range.last(),
                "sessions outside the hour grid"
            );
        }

        CalendarSnapshot {
            title: format_title(self.view.mode, &window, self.locale),
            window,
            locale: self.locale,
            hour_range: self.hour_range,
            days,
            month_grid,
            schedules,
        }
    }
}

impl<S: EventSource> CalendarController<S> {
    /// Fetch sessions for the current view and apply them.
    pub async fn refresh(&mut self) -> FetchOutcome {
        let ticket = self.begin_fetch();
        let result = self.source.list_events().await;
        self.complete_fetch(ticket, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::error::CalendarError;
    use crate::event::RecordId;
    use crate::event::tests::session;
    use crate::source::InMemorySource;
    use crate::window::tests::date;

    struct FailingSource;

    impl EventSource for FailingSource {
        async fn list_events(&self) -> CalendarResult<Vec<ScheduledEvent>> {
            Err(CalendarError::Source("connection refused".into()))
        }
    }

    fn sessions() -> Vec<ScheduledEvent> {
        let mut other_doctor = session(3, "2024-12-19T14:00");
        other_doctor.counterpart_name = "Dr. Karim Nasser".into();
        other_doctor.counterpart_id = Some(RecordId::Int(2));

        let mut cancelled = session(4, "2024-12-20T10:00");
        cancelled.status = SessionStatus::Cancelled;

        vec![
            session(1, "2024-12-19T09:00"),
            session(2, "2024-12-19T14:00"),
            other_doctor,
            cancelled,
            session(5, "2024-12-19T21:30"),
        ]
    }

    fn controller(mode: ViewMode) -> CalendarController<InMemorySource> {
        let source = InMemorySource::new(sessions(), vec![]).unwrap();
        CalendarController::new(source, ViewState::new(mode, date("2024-12-19")))
    }

    #[tokio::test]
    async fn refresh_applies_sessions_for_the_current_view() {
        let mut calendar = controller(ViewMode::Month);
        assert_eq!(calendar.refresh().await, FetchOutcome::Applied { sessions: 5 });

        let snapshot = calendar.snapshot();
        assert_eq!(snapshot.title, "December 2024");
        assert_eq!(snapshot.days.len(), 35);
        assert_eq!(snapshot.session_count(), 5);
        assert!(snapshot.schedules.is_empty());
        assert_eq!(snapshot.month_grid.as_ref().map(|g| g.cells().len()), Some(42));
    }

    #[tokio::test]
    async fn response_for_a_previous_view_is_dropped() {
        let mut calendar = controller(ViewMode::Week);
        calendar.refresh().await;

        let slow = calendar.begin_fetch();
        calendar.navigate(Direction::Forward);
        let fast = calendar.begin_fetch();

        assert_eq!(
            calendar.complete_fetch(fast, Ok(vec![])),
            FetchOutcome::Applied { sessions: 0 }
        );
        assert_eq!(
            calendar.complete_fetch(slow, Ok(sessions())),
            FetchOutcome::Stale
        );
        assert_eq!(calendar.snapshot().session_count(), 0);
    }

    #[tokio::test]
    async fn older_response_for_the_same_view_is_dropped() {
        let mut calendar = controller(ViewMode::Day);
        let first = calendar.begin_fetch();
        let second = calendar.begin_fetch();

        assert_eq!(
            calendar.complete_fetch(second, Ok(sessions())),
            FetchOutcome::Applied { sessions: 5 }
        );
        assert_eq!(
            calendar.complete_fetch(first, Ok(vec![])),
            FetchOutcome::Stale
        );
        assert_eq!(calendar.snapshot().session_count(), 4);
    }

    #[tokio::test]
    async fn returning_to_the_issuing_view_accepts_the_response() {
        let mut calendar = controller(ViewMode::Week);
        let ticket = calendar.begin_fetch();
        calendar.navigate(Direction::Forward);
        calendar.navigate(Direction::Backward);

        assert_eq!(
            calendar.complete_fetch(ticket, Ok(sessions())),
            FetchOutcome::Applied { sessions: 5 }
        );
    }

    #[tokio::test]
    async fn month_grid_shows_sessions_in_padding_weeks() {
        let mut january = session(6, "2025-01-06T09:00");
        january.counterpart_name = "Dr. Karim Nasser".into();
        let mut events = sessions();
        events.push(session(7, "2025-01-03T10:00"));
        events.push(january);

        let source = InMemorySource::new(events, vec![]).unwrap();
        let mut calendar =
            CalendarController::new(source, ViewState::new(ViewMode::Month, date("2024-12-19")))
                .with_filter(EventFilter {
                    doctor: Some("Dr. Hana Saleh".into()),
                    status: None,
                });
        calendar.refresh().await;

        let snapshot = calendar.snapshot();
        let grid = snapshot.month_grid.as_ref().expect("month view has a grid");
        let on = |d: &str| {
            grid.cells()
                .iter()
                .find(|c| c.date() == date(d))
                .map(|c| c.bucket.events.len())
        };
        assert_eq!(on("2025-01-03"), Some(1));
        assert_eq!(on("2025-01-06"), Some(0));
        assert_eq!(snapshot.days.len(), 35);
        assert_eq!(snapshot.session_count(), 5);
    }

    #[tokio::test]
    async fn week_snapshot_has_no_month_grid() {
        let mut calendar = controller(ViewMode::Week);
        calendar.refresh().await;
        assert!(calendar.snapshot().month_grid.is_none());
    }

    #[tokio::test]
    async fn failed_fetch_renders_an_empty_calendar() {
        let mut calendar = CalendarController::new(
            FailingSource,
            ViewState::new(ViewMode::Week, date("2024-12-19")),
        );
        let ticket = calendar.begin_fetch();
        calendar.complete_fetch(ticket, Ok(sessions()));
        assert_eq!(calendar.snapshot().session_count(), 5);

        assert_eq!(calendar.refresh().await, FetchOutcome::Failed);
        let snapshot = calendar.snapshot();
        assert_eq!(snapshot.session_count(), 0);
        assert_eq!(snapshot.days.len(), 7);
    }

    #[tokio::test]
    async fn day_view_builds_hour_grid_and_reports_clipping() {
        let mut calendar = controller(ViewMode::Day);
        calendar.refresh().await;

        let snapshot = calendar.snapshot();
        assert_eq!(snapshot.title, "Thursday, December 19, 2024");
        assert_eq!(snapshot.schedules.len(), 1);

        let schedule = &snapshot.schedules[0];
        assert_eq!(schedule.hours.len(), 13);
        let two_pm = schedule.hours.iter().find(|h| h.hour == 14).unwrap();
        let ids: Vec<RecordId> = two_pm.events.iter().map(|e| e.id.clone()).collect();
        assert_eq!(ids, vec![RecordId::Int(2), RecordId::Int(3)]);

        assert_eq!(snapshot.clipped_count(), 1);
        assert_eq!(schedule.clipped[0].id, RecordId::Int(5));
    }

    #[tokio::test]
    async fn filters_by_doctor_and_status() {
        let mut calendar = controller(ViewMode::Week).with_filter(EventFilter {
            doctor: Some("dr. karim nasser".into()),
            status: None,
        });
        calendar.refresh().await;
        assert_eq!(calendar.snapshot().session_count(), 1);

        calendar.set_filter(EventFilter {
            doctor: Some("1".into()),
            status: Some(SessionStatus::Cancelled),
        });
        let snapshot = calendar.snapshot();
        assert_eq!(snapshot.session_count(), 1);
        assert_eq!(snapshot.days[5].events[0].id, RecordId::Int(4));
    }

    #[test]
    fn navigation_moves_the_view() {
        let mut calendar = controller(ViewMode::Month);
        calendar.navigate(Direction::Backward);
        assert_eq!(calendar.view().reference_date, date("2024-11-19"));

        calendar.set_mode(ViewMode::Week);
        calendar.navigate(Direction::Forward);
        assert_eq!(calendar.view().reference_date, date("2024-11-26"));

        calendar.go_to_today(&FixedClock::at(date("2025-02-03").and_hms_opt(9, 0, 0).unwrap()));
        assert_eq!(calendar.view(), ViewState::new(ViewMode::Week, date("2025-02-03")));

        calendar.go_to(date("2024-12-19"));
        assert_eq!(calendar.view().window().start, date("2024-12-15"));
    }

    #[test]
    fn arabic_snapshot_titles() {
        let calendar = controller(ViewMode::Month).with_locale(TitleLocale::Arabic);
        let snapshot = calendar.snapshot();
        assert!(snapshot.locale.is_rtl());
        assert!(!snapshot.title.contains("December"));
    }
}
