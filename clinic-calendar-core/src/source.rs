//! Where sessions and doctors come from.
//!
//! The calendar logic only depends on the [`EventSource`] and
//! [`DoctorSource`] capabilities. [`InMemorySource`] is the clinic's mock
//! store: records held in memory, optionally delayed to mimic a network.

use std::future::Future;
use std::path::Path;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{CalendarError, CalendarResult};
use crate::event::{Doctor, ScheduledEvent};

pub const SESSIONS_FILE: &str = "sessions.json";
pub const DOCTORS_FILE: &str = "doctors.json";

pub trait EventSource {
    fn list_events(&self) -> impl Future<Output = CalendarResult<Vec<ScheduledEvent>>> + Send;
}

pub trait DoctorSource {
    fn list_doctors(&self) -> impl Future<Output = CalendarResult<Vec<Doctor>>> + Send;
}

#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    events: Vec<ScheduledEvent>,
    doctors: Vec<Doctor>,
    latency: Option<Duration>,
}

impl InMemorySource {
    /// Build a source from records, rejecting invalid sessions.
    pub fn new(events: Vec<ScheduledEvent>, doctors: Vec<Doctor>) -> CalendarResult<Self> {
        for event in &events {
            event.validate()?;
        }
        Ok(InMemorySource {
            events,
            doctors,
            latency: None,
        })
    }

    /// Delay every call by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Load `sessions.json` and, if present, `doctors.json` from `dir`.
    pub fn from_data_dir(dir: &Path) -> CalendarResult<Self> {
        let sessions_path = dir.join(SESSIONS_FILE);
        if !sessions_path.exists() {
            return Err(CalendarError::Source(format!(
                "No sessions file at {}",
                sessions_path.display()
            )));
        }

        let events: Vec<ScheduledEvent> = read_json(&sessions_path)?;

        let doctors_path = dir.join(DOCTORS_FILE);
        let doctors: Vec<Doctor> = if doctors_path.exists() {
            read_json(&doctors_path)?
        } else {
            Vec::new()
        };

        debug!(
            sessions = events.len(),
            doctors = doctors.len(),
            dir = %dir.display(),
            "loaded clinic records"
        );

        Self::new(events, doctors)
    }

    async fn simulate_latency(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> CalendarResult<T> {
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content)
        .map_err(|e| CalendarError::Serialization(format!("{}: {e}", path.display())))
}

impl EventSource for InMemorySource {
    async fn list_events(&self) -> CalendarResult<Vec<ScheduledEvent>> {
        self.simulate_latency().await;
        Ok(self.events.clone())
    }
}

impl DoctorSource for InMemorySource {
    async fn list_doctors(&self) -> CalendarResult<Vec<Doctor>> {
        self.simulate_latency().await;
        Ok(self.doctors.clone())
    }
}
