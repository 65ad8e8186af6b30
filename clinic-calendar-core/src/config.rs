//! Calendar configuration.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use chrono_tz::Tz;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::bucket::HourRange;
use crate::clock::SystemClock;
use crate::error::{CalendarError, CalendarResult};
use crate::title::TitleLocale;
use crate::view_mode::ViewMode;

static DEFAULT_DATA_DIR: &str = "~/clinic";

/// Prefix for environment overrides, e.g. `CLINIC_CALENDAR_LOCALE=ar`.
pub const ENV_PREFIX: &str = "CLINIC_CALENDAR";

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn is_default_data_dir(p: &PathBuf) -> bool {
    *p == default_data_dir()
}

fn default_first_hour() -> u32 {
    HourRange::BUSINESS.first()
}

fn default_last_hour() -> u32 {
    HourRange::BUSINESS.last()
}

/// Configuration at ~/.config/clinic-calendar/config.toml
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CalendarConfig {
    /// Directory holding sessions.json and doctors.json
    #[serde(default = "default_data_dir", skip_serializing_if = "is_default_data_dir")]
    pub data_dir: PathBuf,

    /// IANA time zone used for "today"; the machine's zone when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,

    #[serde(default)]
    pub locale: TitleLocale,

    #[serde(default)]
    pub default_mode: ViewMode,

    #[serde(default = "default_first_hour")]
    pub first_hour: u32,

    #[serde(default = "default_last_hour")]
    pub last_hour: u32,

    /// Artificial delay added to every fetch, e.g. "300ms"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simulated_latency: Option<String>,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        CalendarConfig {
            data_dir: default_data_dir(),
            timezone: None,
            locale: TitleLocale::default(),
            default_mode: ViewMode::default(),
            first_hour: default_first_hour(),
            last_hour: default_last_hour(),
            simulated_latency: None,
        }
    }
}

impl CalendarConfig {
    pub fn config_path() -> CalendarResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CalendarError::Config("Could not determine config directory".into()))?
            .join("clinic-calendar");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the user's config, writing a commented-out default on first use.
    pub fn load() -> CalendarResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load from `path` (if it exists) with environment overrides on top.
    pub fn load_from(path: &Path) -> CalendarResult<Self> {
        Self::load_with_env(path, Environment::with_prefix(ENV_PREFIX).try_parsing(true))
    }

    fn load_with_env(path: &Path, env: Environment) -> CalendarResult<Self> {
        let config: CalendarConfig = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(env)
            .build()
            .map_err(|e| CalendarError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CalendarError::Config(e.to_string()))?;

        config.hour_range()?;
        config.tz()?;
        config.latency()?;

        Ok(config)
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> CalendarResult<()> {
        let contents = format!(
            "\
# clinic-calendar configuration

# Where sessions.json and doctors.json live:
# data_dir = \"{}\"

# Time zone used to decide what \"today\" is (defaults to the system zone):
# timezone = \"Asia/Riyadh\"

# Title language, \"en\" or \"ar\":
# locale = \"en\"

# View shown when no --mode is given, \"month\", \"week\" or \"day\":
# default_mode = \"month\"

# Hours shown by the week and day grids. Sessions outside them are
# listed separately.
# first_hour = {}
# last_hour = {}

# Artificial delay for every fetch:
# simulated_latency = \"300ms\"
",
            DEFAULT_DATA_DIR,
            default_first_hour(),
            default_last_hour(),
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CalendarError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| CalendarError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    pub fn hour_range(&self) -> CalendarResult<HourRange> {
        HourRange::new(self.first_hour, self.last_hour)
    }

    pub fn tz(&self) -> CalendarResult<Option<Tz>> {
        self.timezone
            .as_deref()
            .map(|name| Tz::from_str(name).map_err(|_| CalendarError::InvalidTimezone(name.into())))
            .transpose()
    }

    pub fn latency(&self) -> CalendarResult<Option<Duration>> {
        self.simulated_latency
            .as_deref()
            .map(|s| {
                humantime::parse_duration(s)
                    .map_err(|e| CalendarError::Config(format!("Invalid simulated_latency '{s}': {e}")))
            })
            .transpose()
    }

    pub fn clock(&self) -> CalendarResult<SystemClock> {
        Ok(match self.tz()? {
            Some(tz) => SystemClock::in_timezone(tz),
            None => SystemClock::local(),
        })
    }
}
