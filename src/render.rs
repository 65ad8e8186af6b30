//! Terminal rendering for calendar snapshots.
//!
//! Extension traits and helpers that draw core types with owo_colors.

use chrono::{Datelike, NaiveDate};
use clinic_calendar_core::bucket::HourRange;
use clinic_calendar_core::controller::{CalendarSnapshot, DaySchedule};
use clinic_calendar_core::grid::{GridCell, MonthGrid};
use clinic_calendar_core::title::format_weekday;
use clinic_calendar_core::{ScheduledEvent, SessionStatus, TitleLocale, ViewMode, compute_window, format_title};
use owo_colors::OwoColorize;

/// Width of one month-grid column, in characters
const CELL_WIDTH: usize = 10;

/// Right-to-left mark, so terminals that support bidi align Arabic titles
const RLM: char = '\u{200F}';

pub trait Render {
    fn render(&self) -> String;
}

impl Render for SessionStatus {
    fn render(&self) -> String {
        let label = self.as_str();
        match self {
            SessionStatus::Scheduled => label.blue().to_string(),
            SessionStatus::InProgress => label.yellow().to_string(),
            SessionStatus::Completed => label.green().to_string(),
            SessionStatus::Cancelled => label.red().to_string(),
            SessionStatus::NoShow => label.magenta().to_string(),
        }
    }
}

impl Render for ScheduledEvent {
    fn render(&self) -> String {
        let time = format!(
            "{}–{}",
            self.scheduled_at.format("%H:%M"),
            self.ends_at().format("%H:%M")
        );
        format!(
            "{} {} {} {}",
            time.dimmed(),
            self.subject_name,
            format!("· {}", self.counterpart_name).dimmed(),
            self.status.render()
        )
    }
}

pub fn render_snapshot(snapshot: &CalendarSnapshot, today: NaiveDate) -> String {
    let mut lines = Vec::new();

    let title = if snapshot.locale.is_rtl() {
        format!("{RLM}{}", snapshot.title)
    } else {
        snapshot.title.clone()
    };
    lines.push(title.bold().to_string());
    lines.push(String::new());

    match &snapshot.month_grid {
        Some(grid) => render_month(grid, snapshot.locale, today, &mut lines),
        None => render_schedules(snapshot, today, &mut lines),
    }

    let grid_empty = snapshot
        .month_grid
        .as_ref()
        .is_none_or(|grid| grid.cells().iter().all(|cell| cell.bucket.is_empty()));
    if snapshot.session_count() == 0 && grid_empty {
        lines.push("No sessions".dimmed().to_string());
    }

    lines.join("\n")
}

fn render_month(grid: &MonthGrid, locale: TitleLocale, today: NaiveDate, lines: &mut Vec<String>) {
    if let Some(first_week) = grid.weeks().next() {
        let header: String = first_week
            .iter()
            .map(|cell| pad(&format_weekday(cell.date(), locale)))
            .collect();
        lines.push(header.dimmed().to_string());
    }

    for week in grid.weeks() {
        let row: String = week.iter().map(|cell| render_cell(cell, today)).collect();
        lines.push(row);
    }

    let busy_days: Vec<&GridCell> = grid
        .cells()
        .iter()
        .filter(|cell| cell.in_month && !cell.bucket.is_empty())
        .collect();

    for cell in busy_days {
        lines.push(String::new());
        lines.push(day_label(cell.date(), locale, today).bold().to_string());
        for event in &cell.bucket.events {
            lines.push(format!("  {}", event.render()));
        }
    }
}

fn render_cell(cell: &GridCell, today: NaiveDate) -> String {
    let count = cell.bucket.events.len();
    let text = if count > 0 {
        pad(&format!("{:>2} •{}", cell.date().day(), count))
    } else {
        pad(&format!("{:>2}", cell.date().day()))
    };

    if cell.date() == today {
        text.reversed().to_string()
    } else if !cell.in_month {
        text.dimmed().to_string()
    } else if count > 0 {
        text.cyan().to_string()
    } else {
        text
    }
}

fn render_schedules(snapshot: &CalendarSnapshot, today: NaiveDate, lines: &mut Vec<String>) {
    let show_empty_hours = snapshot.window.mode == ViewMode::Day;

    for (i, schedule) in snapshot.schedules.iter().enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        if snapshot.window.mode == ViewMode::Week {
            lines.push(day_label(schedule.date, snapshot.locale, today).bold().to_string());
        }
        render_hours(schedule, show_empty_hours, lines);
        render_clipped(schedule, snapshot.hour_range, lines);
    }
}

fn render_hours(schedule: &DaySchedule, show_empty_hours: bool, lines: &mut Vec<String>) {
    let mut any = false;
    for bucket in &schedule.hours {
        let hour = format!("{:02}:00", bucket.hour);
        if bucket.events.is_empty() {
            if show_empty_hours {
                lines.push(format!("  {}", hour.dimmed()));
            }
            continue;
        }
        any = true;
        for (j, event) in bucket.events.iter().enumerate() {
            let label = if j == 0 { hour.clone() } else { " ".repeat(hour.len()) };
            lines.push(format!("  {}  {}", label, event.render()));
        }
    }

    if !any && !show_empty_hours && schedule.clipped.is_empty() {
        lines.push(format!("  {}", "·".dimmed()));
    }
}

/// Sessions the hour grid leaves out are listed under the day instead of vanishing.
fn render_clipped(schedule: &DaySchedule, hours: HourRange, lines: &mut Vec<String>) {
    if schedule.clipped.is_empty() {
        return;
    }

    let note = format!(
        "{} outside {:02}:00–{:02}:59",
        pluralize_sessions(schedule.clipped.len()),
        hours.first(),
        hours.last()
    );
    lines.push(format!("  {}", note.yellow()));
    for event in &schedule.clipped {
        lines.push(format!("    {}", event.render()));
    }
}

fn day_label(date: NaiveDate, locale: TitleLocale, today: NaiveDate) -> String {
    let label = format_title(ViewMode::Day, &compute_window(ViewMode::Day, date), locale);
    if date == today {
        format!("{label} (today)")
    } else {
        label
    }
}

fn pad(text: &str) -> String {
    format!("{text:<CELL_WIDTH$}")
}

fn pluralize_sessions(count: usize) -> String {
    if count == 1 {
        "1 session".to_string()
    } else {
        format!("{count} sessions")
    }
}
