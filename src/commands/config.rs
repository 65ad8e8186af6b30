use anyhow::Result;
use clinic_calendar_core::config::CalendarConfig;
use owo_colors::OwoColorize;

pub fn run(config: &CalendarConfig) -> Result<()> {
    let config_path = CalendarConfig::config_path()?;
    let hours = config.hour_range()?;

    println!("{}", "Paths".bold());
    println!("  Config:    {}", config_path.display());
    println!("  Data:      {}", config.data_path().display());
    println!();
    println!("{}", "Settings".bold());
    println!("  Mode:      {}", config.default_mode);
    println!("  Locale:    {}", config.locale);
    println!(
        "  Timezone:  {}",
        config.timezone.as_deref().unwrap_or("system")
    );
    println!(
        "  Hours:     {:02}:00 to {:02}:59",
        hours.first(),
        hours.last()
    );
    if let Some(latency) = &config.simulated_latency {
        println!("  Latency:   {latency}");
    }

    Ok(())
}
