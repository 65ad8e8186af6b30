use std::path::PathBuf;

use anyhow::Result;
use clinic_calendar_core::config::CalendarConfig;
use clinic_calendar_core::source::DoctorSource;
use owo_colors::OwoColorize;

use super::load_source;
use crate::utils::tui::create_spinner;

pub async fn run(config: &CalendarConfig, data_dir: Option<PathBuf>) -> Result<()> {
    let source = load_source(config, data_dir.as_deref())?;

    let spinner = create_spinner("Loading doctors".to_string());
    let result = source.list_doctors().await;
    spinner.finish_and_clear();

    let mut doctors = result?;
    if doctors.is_empty() {
        println!("{}", "No doctors found".dimmed());
        return Ok(());
    }

    doctors.sort_by(|a, b| a.name.cmp(&b.name));

    let id_width = doctors
        .iter()
        .map(|d| d.id.to_string().chars().count())
        .max()
        .unwrap_or(0);

    for doctor in &doctors {
        let id = format!("{:>id_width$}", doctor.id.to_string());
        println!(
            "  {} {} {}",
            id.dimmed(),
            doctor.name.bold(),
            format!("({})", doctor.specialization).dimmed()
        );
    }

    Ok(())
}
