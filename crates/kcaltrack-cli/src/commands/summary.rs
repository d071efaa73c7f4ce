//! Summary and trend commands.

use chrono::{Local, NaiveDate};
use clap::Subcommand;
use kcaltrack_core::storage::{Config, LogDb};
use kcaltrack_core::{profile, summary, ContextSummary, StorageError, Target, TrendMetric};

#[derive(Subcommand)]
pub enum SummaryAction {
    /// One day's rollup (defaults to today)
    Day { date: Option<NaiveDate> },
    /// Averages and adherence over an inclusive range
    Period { start: NaiveDate, end: NaiveDate },
    /// Per-day series for one metric, zero-filled
    Trend {
        start: NaiveDate,
        end: NaiveDate,
        /// consumed, burned, net, protein, carbs or fat
        #[arg(long, default_value = "net")]
        metric: String,
    },
    /// The context block handed to the advice collaborator
    Context,
}

pub fn run(action: SummaryAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = LogDb::open()?;

    match action {
        SummaryAction::Day { date } => {
            let date = date.unwrap_or_else(|| Local::now().date_naive());
            let target = current_target(&db)?;
            let s = summary::daily_summary(&db, date, &target)?;
            println!("{}", serde_json::to_string_pretty(&s)?);
        }
        SummaryAction::Period { start, end } => {
            let config = Config::load()?;
            let target = current_target(&db)?;
            let s = summary::period_summary(
                &db,
                start,
                end,
                &target,
                config.summary.adherence_tolerance_kcal,
            )?;
            println!("{}", serde_json::to_string_pretty(&s)?);
        }
        SummaryAction::Trend { start, end, metric } => {
            let metric: TrendMetric = metric.parse()?;
            let series = summary::trend_series(&db, start, end, metric)?;
            println!("{}", serde_json::to_string_pretty(&series)?);
        }
        SummaryAction::Context => {
            let config = Config::load()?;
            let today = Local::now().date_naive();
            let ctx = ContextSummary::build(&db, today, config.summary.context_days)?;
            println!("{}", serde_json::to_string_pretty(&ctx)?);
        }
    }
    Ok(())
}

fn current_target(db: &LogDb) -> Result<Target, Box<dyn std::error::Error>> {
    let profile = db.profile()?.ok_or(StorageError::ProfileMissing)?;
    Ok(profile::target(&profile)?)
}
