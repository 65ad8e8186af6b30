//! Fixed 6×7 month grid layout.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::bucket::{DayBucket, bucket_by_day};
use crate::event::ScheduledEvent;
use crate::window::{ViewWindow, add_days};

pub const GRID_COLUMNS: usize = 7;
pub const GRID_ROWS: usize = 6;
pub const GRID_CELLS: usize = GRID_COLUMNS * GRID_ROWS;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridCell {
    /// Whether the cell's date belongs to the month being viewed
    pub in_month: bool,
    pub bucket: DayBucket,
}

impl GridCell {
    pub fn date(&self) -> NaiveDate {
        self.bucket.date
    }
}

/// Month view layout: always 42 cells starting on the window's Sunday.
///
/// A month window spans four to six weeks; the rows past the window are
/// filled with days of the following month, sessions included.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthGrid {
    cells: Vec<GridCell>,
}

impl MonthGrid {
    /// Lay out `events` over the 42 days starting at `window.start`.
    pub fn new(window: &ViewWindow, events: &[ScheduledEvent]) -> Self {
        let month = (window.reference_date.year(), window.reference_date.month());
        let span = ViewWindow {
            end: add_days(window.start, GRID_CELLS as u32 - 1),
            ..*window
        };

        let cells = bucket_by_day(events, &span)
            .into_iter()
            .map(|bucket| GridCell {
                in_month: (bucket.date.year(), bucket.date.month()) == month,
                bucket,
            })
            .collect();

        MonthGrid { cells }
    }

    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    /// Grid rows, Sunday first.
    pub fn weeks(&self) -> impl Iterator<Item = &[GridCell]> {
        self.cells.chunks(GRID_COLUMNS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::RecordId;
    use crate::event::tests::session;
    use crate::view_mode::ViewMode;
    use crate::window::compute_window;
    use crate::window::tests::date;

    #[test]
    fn five_week_month_is_padded_to_six_rows() {
        let window = compute_window(ViewMode::Month, date("2024-12-20"));
        let events = vec![session(1, "2024-12-19T09:00"), session(2, "2025-01-03T10:00")];
        let grid = MonthGrid::new(&window, &events);

        assert_eq!(grid.cells().len(), GRID_CELLS);
        assert_eq!(grid.weeks().count(), GRID_ROWS);
        assert_eq!(grid.cells()[0].date(), date("2024-12-01"));
        assert_eq!(grid.cells()[41].date(), date("2025-01-11"));

        let in_month = grid.cells().iter().filter(|c| c.in_month).count();
        assert_eq!(in_month, 31);

        let busy: Vec<NaiveDate> = grid
            .cells()
            .iter()
            .filter(|c| !c.bucket.is_empty())
            .map(GridCell::date)
            .collect();
        assert_eq!(busy, vec![date("2024-12-19"), date("2025-01-03")]);
    }

    #[test]
    fn six_week_month_fills_the_grid_exactly() {
        let window = compute_window(ViewMode::Month, date("2025-03-15"));
        let grid = MonthGrid::new(&window, &[]);

        assert_eq!(grid.cells()[0].date(), window.start);
        assert_eq!(grid.cells()[41].date(), window.end);
        assert!(!grid.cells()[0].in_month);
        assert!(grid.cells()[6].in_month);
    }

    #[test]
    fn padding_days_carry_their_sessions() {
        let window = compute_window(ViewMode::Month, date("2024-12-20"));
        let events = vec![
            session(1, "2025-01-03T10:00"),
            session(2, "2025-01-06T11:00"),
            session(3, "2025-01-06T09:00"),
            session(4, "2025-01-12T09:00"),
        ];
        let grid = MonthGrid::new(&window, &events);

        let count_on = |d: &str| {
            grid.cells()
                .iter()
                .find(|c| c.date() == date(d))
                .map(|c| c.bucket.events.len())
        };
        assert_eq!(count_on("2025-01-03"), Some(1));
        assert_eq!(count_on("2025-01-06"), Some(2));
        assert_eq!(count_on("2025-01-12"), None);

        let padded = &grid.cells()[36];
        assert_eq!(padded.date(), date("2025-01-06"));
        assert!(!padded.in_month);
        let ids: Vec<RecordId> = padded.bucket.events.iter().map(|e| e.id.clone()).collect();
        assert_eq!(ids, vec![RecordId::Int(3), RecordId::Int(2)]);
    }
}
