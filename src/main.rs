mod commands;
mod render;
mod utils;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clinic_calendar_core::config::CalendarConfig;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (e.g. "clinic_calendar_core=debug")
const LOG_ENV: &str = "CLINIC_CALENDAR_LOG";

#[derive(Parser)]
#[command(name = "clinic-calendar")]
#[command(about = "Browse clinic sessions by month, week or day")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the calendar for a month, week or day
    View {
        /// View mode: month, week or day (defaults to the configured mode)
        #[arg(short, long)]
        mode: Option<String>,

        /// Reference date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Move this many months/weeks/days from the reference date
        #[arg(short, long, default_value_t = 0, allow_hyphen_values = true)]
        offset: i32,

        /// Title language: en or ar
        #[arg(short, long)]
        locale: Option<String>,

        /// Only show sessions with this doctor (id or name)
        #[arg(long)]
        doctor: Option<String>,

        /// Only show sessions with this status (e.g. "scheduled", "no-show")
        #[arg(long)]
        status: Option<String>,

        /// Directory holding sessions.json and doctors.json
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Print the view as JSON instead of a grid
        #[arg(long)]
        json: bool,
    },
    /// List doctors available for --doctor
    Doctors {
        /// Directory holding sessions.json and doctors.json
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
    /// Show config file location and effective settings
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let config = CalendarConfig::load()?;

    match cli.command {
        Commands::View {
            mode,
            date,
            offset,
            locale,
            doctor,
            status,
            data_dir,
            json,
        } => {
            let args = commands::view::ViewArgs {
                mode,
                date,
                offset,
                locale,
                doctor,
                status,
                data_dir,
                json,
            };
            commands::view::run(&config, args).await
        }
        Commands::Doctors { data_dir } => commands::doctors::run(&config, data_dir).await,
        Commands::Config => commands::config::run(&config),
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
