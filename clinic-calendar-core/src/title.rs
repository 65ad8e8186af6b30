//! Locale-aware labels for the calendar header.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Locale, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{CalendarError, CalendarResult};
use crate::view_mode::ViewMode;
use crate::window::ViewWindow;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TitleLocale {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "ar")]
    Arabic,
}

impl TitleLocale {
    fn chrono_locale(self) -> Locale {
        match self {
            TitleLocale::English => Locale::en_US,
            TitleLocale::Arabic => Locale::ar_EG,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            TitleLocale::English => "en",
            TitleLocale::Arabic => "ar",
        }
    }

    /// Arabic titles are laid out right to left.
    pub fn is_rtl(self) -> bool {
        matches!(self, TitleLocale::Arabic)
    }
}

impl fmt::Display for TitleLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for TitleLocale {
    type Err = CalendarError;

    fn from_str(s: &str) -> CalendarResult<Self> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "en" | "en-us" => Ok(TitleLocale::English),
            "ar" | "ar-sa" | "ar-eg" => Ok(TitleLocale::Arabic),
            _ => Err(CalendarError::InvalidLocale(s.to_string())),
        }
    }
}

struct Templates {
    month: &'static str,
    week_start: &'static str,
    week_start_with_year: &'static str,
    week_end: &'static str,
    day: &'static str,
    weekday: &'static str,
}

const ENGLISH: Templates = Templates {
    month: "%B %Y",
    week_start: "%b %-d",
    week_start_with_year: "%b %-d, %Y",
    week_end: "%b %-d, %Y",
    day: "%A, %B %-d, %Y",
    weekday: "%a",
};

const ARABIC: Templates = Templates {
    month: "%B %Y",
    week_start: "%-d %B",
    week_start_with_year: "%-d %B %Y",
    week_end: "%-d %B %Y",
    day: "%A، %-d %B %Y",
    weekday: "%A",
};

fn templates(locale: TitleLocale) -> &'static Templates {
    match locale {
        TitleLocale::English => &ENGLISH,
        TitleLocale::Arabic => &ARABIC,
    }
}

fn localized(date: NaiveDate, template: &str, locale: TitleLocale) -> String {
    date.and_time(NaiveTime::MIN)
        .and_utc()
        .format_localized(template, locale.chrono_locale())
        .to_string()
}

/// Header label for a window: month and year, a week's date range, or the
/// full date of a single day.
pub fn format_title(mode: ViewMode, window: &ViewWindow, locale: TitleLocale) -> String {
    let t = templates(locale);
    match mode {
        ViewMode::Month => localized(window.reference_date, t.month, locale),
        ViewMode::Week => {
            let start_template = if window.start.year() == window.end.year() {
                t.week_start
            } else {
                t.week_start_with_year
            };
            format!(
                "{} – {}",
                localized(window.start, start_template, locale),
                localized(window.end, t.week_end, locale)
            )
        }
        ViewMode::Day => localized(window.start, t.day, locale),
    }
}

/// Weekday label for grid column headers ("Sun", "الأحد").
pub fn format_weekday(date: NaiveDate, locale: TitleLocale) -> String {
    localized(date, templates(locale).weekday, locale)
}
