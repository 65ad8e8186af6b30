pub mod config;
pub mod doctors;
pub mod view;

use std::path::Path;

use anyhow::{Context, Result};
use clinic_calendar_core::config::CalendarConfig;
use clinic_calendar_core::source::{InMemorySource, SESSIONS_FILE};

/// Load the clinic records from `data_dir`, or the configured directory.
pub fn load_source(config: &CalendarConfig, data_dir: Option<&Path>) -> Result<InMemorySource> {
    let dir = data_dir
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.data_path());

    if !dir.join(SESSIONS_FILE).exists() {
        anyhow::bail!(
            "No sessions found in {}.\n\n\
            Put your clinic's {} there, or point to another directory with:\n  \
            clinic-calendar view --data-dir <path>",
            dir.display(),
            SESSIONS_FILE
        );
    }

    let mut source = InMemorySource::from_data_dir(&dir)
        .with_context(|| format!("Could not load clinic records from {}", dir.display()))?;

    if let Some(latency) = config.latency()? {
        source = source.with_latency(latency);
    }

    Ok(source)
}
