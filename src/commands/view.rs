use std::path::PathBuf;

use anyhow::Result;
use clinic_calendar_core::config::CalendarConfig;
use clinic_calendar_core::{
    CalendarController, EventFilter, FetchOutcome, SessionStatus, TitleLocale, ViewMode,
    ViewState, advance_by, parse_reference_date, today,
};
use owo_colors::OwoColorize;
use tracing::debug;

use super::load_source;
use crate::render::render_snapshot;
use crate::utils::tui::create_spinner;

pub struct ViewArgs {
    pub mode: Option<String>,
    pub date: Option<String>,
    pub offset: i32,
    pub locale: Option<String>,
    pub doctor: Option<String>,
    pub status: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
}

pub async fn run(config: &CalendarConfig, args: ViewArgs) -> Result<()> {
    let mode = match args.mode.as_deref() {
        Some(mode) => mode.parse::<ViewMode>()?,
        None => config.default_mode,
    };
    let locale = match args.locale.as_deref() {
        Some(locale) => locale.parse::<TitleLocale>()?,
        None => config.locale,
    };
    let status = args
        .status
        .as_deref()
        .map(str::parse::<SessionStatus>)
        .transpose()?;

    let clock = config.clock()?;
    let reference = match args.date.as_deref() {
        Some(date) => parse_reference_date(date)?,
        None => today(&clock),
    };
    let reference = advance_by(mode, reference, args.offset);

    let source = load_source(config, args.data_dir.as_deref())?;
    let mut calendar = CalendarController::new(source, ViewState::new(mode, reference))
        .with_hour_range(config.hour_range()?)
        .with_locale(locale)
        .with_filter(EventFilter {
            doctor: args.doctor,
            status,
        });

    let spinner = create_spinner("Loading sessions".to_string());
    let outcome = calendar.refresh().await;
    spinner.finish_and_clear();

    let snapshot = calendar.snapshot();
    debug!(
        window = %snapshot.window,
        sessions = snapshot.session_count(),
        clipped = snapshot.clipped_count(),
        ?outcome,
        "rendering view"
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    if outcome == FetchOutcome::Failed {
        eprintln!(
            "{}",
            "Could not load sessions, showing an empty calendar".yellow()
        );
    }

    println!("{}", render_snapshot(&snapshot, today(&clock)));

    Ok(())
}
