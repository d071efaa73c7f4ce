//! Raw log reads.

use chrono::NaiveDate;
use clap::Subcommand;
use kcaltrack_core::storage::LogDb;

#[derive(Subcommand)]
pub enum LogAction {
    /// Entries for one calendar day
    Day { date: NaiveDate },
    /// Entries for an inclusive date range
    Range { start: NaiveDate, end: NaiveDate },
    /// The full log in append order
    All,
}

pub fn run(action: LogAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = LogDb::open()?;

    let entries = match action {
        LogAction::Day { date } => db.entries_for_date(date)?,
        LogAction::Range { start, end } => db.entries_in_range(start, end)?,
        LogAction::All => db.all_entries()?,
    };
    println!("{}", serde_json::to_string_pretty(&entries)?);
    Ok(())
}
