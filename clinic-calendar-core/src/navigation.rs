//! Moving the reference date between windows.

use chrono::{Days, Months, NaiveDate};

use crate::clock::Clock;
use crate::error::{CalendarError, CalendarResult};
use crate::view_mode::ViewMode;
use crate::window::{add_days, sub_days};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub fn reverse(self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }
}

impl TryFrom<i32> for Direction {
    type Error = CalendarError;

    fn try_from(step: i32) -> CalendarResult<Self> {
        match step {
            1 => Ok(Direction::Forward),
            -1 => Ok(Direction::Backward),
            other => Err(CalendarError::InvalidDirection(other)),
        }
    }
}

/// Move `reference_date` one unit of `mode` in `direction`.
///
/// Months clamp to the end of a shorter month (Jan 31 -> Feb 29), so the day
/// of month is not always preserved across a round trip. The reference date
/// stays put at the edges of the representable calendar.
pub fn advance(mode: ViewMode, reference_date: NaiveDate, direction: Direction) -> NaiveDate {
    match (mode, direction) {
        (ViewMode::Month, Direction::Forward) => reference_date
            .checked_add_months(Months::new(1))
            .unwrap_or(reference_date),
        (ViewMode::Month, Direction::Backward) => reference_date
            .checked_sub_months(Months::new(1))
            .unwrap_or(reference_date),
        (ViewMode::Week, Direction::Forward) => add_days(reference_date, 7),
        (ViewMode::Week, Direction::Backward) => sub_days(reference_date, 7),
        (ViewMode::Day, Direction::Forward) => add_days(reference_date, 1),
        (ViewMode::Day, Direction::Backward) => sub_days(reference_date, 1),
    }
}

/// Move `steps` units of `mode` at once; negative steps move backward.
///
/// Month jumps clamp only once, at the destination (Jan 31 + 2 months is
/// Mar 31). Out-of-range jumps saturate at the edge of the calendar.
pub fn advance_by(mode: ViewMode, reference_date: NaiveDate, steps: i32) -> NaiveDate {
    let forward = steps >= 0;
    let n = steps.unsigned_abs();
    let saturated = if forward { NaiveDate::MAX } else { NaiveDate::MIN };

    let moved = match mode {
        ViewMode::Month => {
            let months = Months::new(n);
            if forward {
                reference_date.checked_add_months(months)
            } else {
                reference_date.checked_sub_months(months)
            }
        }
        ViewMode::Week | ViewMode::Day => {
            let per_step = if mode == ViewMode::Week { 7 } else { 1 };
            let days = Days::new(u64::from(n) * per_step);
            if forward {
                reference_date.checked_add_days(days)
            } else {
                reference_date.checked_sub_days(days)
            }
        }
    };
    moved.unwrap_or(saturated)
}

/// Current date according to `clock`, whatever the view mode.
pub fn today(clock: &impl Clock) -> NaiveDate {
    clock.today()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::window::compute_window;
    use crate::window::tests::date;

    #[test]
    fn direction_from_step() {
        assert_eq!(Direction::try_from(1).unwrap(), Direction::Forward);
        assert_eq!(Direction::try_from(-1).unwrap(), Direction::Backward);
        assert!(matches!(
            Direction::try_from(2),
            Err(CalendarError::InvalidDirection(2))
        ));
        assert!(Direction::try_from(0).is_err());
    }

    #[test]
    fn month_steps_cross_year_boundaries() {
        assert_eq!(
            advance(ViewMode::Month, date("2024-12-20"), Direction::Forward),
            date("2025-01-20")
        );
        assert_eq!(
            advance(ViewMode::Month, date("2025-01-20"), Direction::Backward),
            date("2024-12-20")
        );
    }

    #[test]
    fn month_step_clamps_to_month_end() {
        assert_eq!(
            advance(ViewMode::Month, date("2024-01-31"), Direction::Forward),
            date("2024-02-29")
        );
        assert_eq!(
            advance(ViewMode::Month, date("2023-01-31"), Direction::Forward),
            date("2023-02-28")
        );
        assert_eq!(
            advance(ViewMode::Month, date("2024-03-31"), Direction::Backward),
            date("2024-02-29")
        );
    }

    #[test]
    fn jan_31_month_round_trip_returns_to_january_window() {
        let start = date("2024-01-31");
        let there = advance(ViewMode::Month, start, Direction::Forward);
        let back = advance(ViewMode::Month, there, Direction::Backward);

        // Day of month is lost to clamping, the window is not
        assert_eq!(back, date("2024-01-29"));
        let original = compute_window(ViewMode::Month, start);
        let returned = compute_window(ViewMode::Month, back);
        assert_eq!((original.start, original.end), (returned.start, returned.end));
    }

    #[test]
    fn round_trips_reproduce_the_window() {
        let references = [
            "2024-01-29", "2024-01-30", "2024-01-31", "2024-02-29", "2024-12-31",
            "2025-03-01", "2023-05-31",
        ];
        for mode in [ViewMode::Month, ViewMode::Week, ViewMode::Day] {
            for direction in [Direction::Forward, Direction::Backward] {
                for reference in references {
                    let d = date(reference);
                    let moved = advance(mode, d, direction);
                    let back = advance(mode, moved, direction.reverse());
                    let original = compute_window(mode, d);
                    let returned = compute_window(mode, back);
                    assert_eq!(
                        (original.start, original.end),
                        (returned.start, returned.end),
                        "{mode} {direction:?} from {reference}"
                    );
                }
            }
        }
    }

    #[test]
    fn week_and_day_steps() {
        assert_eq!(
            advance(ViewMode::Week, date("2024-12-29"), Direction::Forward),
            date("2025-01-05")
        );
        assert_eq!(
            advance(ViewMode::Day, date("2024-03-01"), Direction::Backward),
            date("2024-02-29")
        );
    }

    #[test]
    fn advance_by_multiple_steps() {
        assert_eq!(advance_by(ViewMode::Week, date("2024-12-19"), 3), date("2025-01-09"));
        assert_eq!(advance_by(ViewMode::Day, date("2024-12-19"), -19), date("2024-11-30"));
        assert_eq!(advance_by(ViewMode::Month, date("2024-12-19"), 0), date("2024-12-19"));
        assert_eq!(advance_by(ViewMode::Month, date("2025-01-31"), 2), date("2025-03-31"));
        assert_eq!(advance_by(ViewMode::Month, date("2024-12-19"), -13), date("2023-11-19"));
    }

    #[test]
    fn today_ignores_mode() {
        let clock = FixedClock::at(date("2024-12-20").and_hms_opt(16, 5, 0).unwrap());
        assert_eq!(today(&clock), date("2024-12-20"));
    }

    #[test]
    fn huge_offsets_saturate_without_stepping() {
        let reference = date("2024-12-19");
        assert_eq!(advance_by(ViewMode::Day, reference, i32::MAX), NaiveDate::MAX);
        assert_eq!(advance_by(ViewMode::Week, reference, i32::MIN), NaiveDate::MIN);
        assert_eq!(advance_by(ViewMode::Month, reference, 2_000_000_000), NaiveDate::MAX);
    }
}
