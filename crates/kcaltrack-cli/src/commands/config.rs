//! Configuration management.

use clap::Subcommand;
use kcaltrack_core::storage::Config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the current configuration
    Show,
    /// Set the adherence tolerance band in kcal
    SetTolerance { kcal: f64 },
    /// Set how many trailing days go into the advice context
    SetContextDays { days: u32 },
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Show => {
            let config = Config::load()?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        ConfigAction::SetTolerance { kcal } => {
            let mut config = Config::load()?;
            config.summary.adherence_tolerance_kcal = kcal;
            config.save()?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        ConfigAction::SetContextDays { days } => {
            let mut config = Config::load()?;
            config.summary.context_days = days;
            config.save()?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }
    Ok(())
}
