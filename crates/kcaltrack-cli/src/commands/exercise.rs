//! Exercise logging and burn previews.

use chrono::DateTime;
use clap::Subcommand;
use kcaltrack_core::exercise::calories_burned;
use kcaltrack_core::storage::LogDb;
use kcaltrack_core::{ExerciseDraft, MetTable, StorageError};

#[derive(Subcommand)]
pub enum ExerciseAction {
    /// Append an exercise; the burn is derived from the weight snapshot
    /// at the entry's timestamp
    Add {
        /// running, walking, cycling, swimming, weight_training, yoga, other
        #[arg(long)]
        activity: String,
        /// Duration in minutes
        #[arg(long)]
        duration: f64,
        /// low, medium or high
        #[arg(long)]
        intensity: String,
        #[arg(long)]
        notes: Option<String>,
        /// RFC 3339 timestamp; defaults to now
        #[arg(long)]
        at: Option<String>,
    },
    /// Compute the burn without logging anything
    Preview {
        #[arg(long)]
        activity: String,
        #[arg(long)]
        duration: f64,
        #[arg(long)]
        intensity: String,
        /// Weight in kg; defaults to the current profile weight
        #[arg(long)]
        weight: Option<f64>,
    },
}

pub fn run(action: ExerciseAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = LogDb::open()?;
    let met_table = MetTable::default();

    match action {
        ExerciseAction::Add {
            activity,
            duration,
            intensity,
            notes,
            at,
        } => {
            let timestamp = at
                .map(|s| DateTime::parse_from_rfc3339(&s))
                .transpose()?;
            let entry = db.append_exercise(
                ExerciseDraft {
                    activity: activity.parse()?,
                    duration_min: duration,
                    intensity: intensity.parse()?,
                    notes,
                    timestamp,
                },
                &met_table,
            )?;
            println!("{}", serde_json::to_string_pretty(&entry)?);
        }
        ExerciseAction::Preview {
            activity,
            duration,
            intensity,
            weight,
        } => {
            let weight_kg = match weight {
                Some(kg) => kg,
                None => {
                    db.profile()?
                        .ok_or(StorageError::ProfileMissing)?
                        .weight_kg
                }
            };
            let burned = calories_burned(
                &met_table,
                activity.parse()?,
                intensity.parse()?,
                duration,
                weight_kg,
            )?;
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "calories_burned": burned,
                    "weight_kg": weight_kg,
                }))?
            );
        }
    }
    Ok(())
}
