//! Meal logging.

use chrono::DateTime;
use clap::Subcommand;
use kcaltrack_core::storage::LogDb;
use kcaltrack_core::{Macros, MealDraft};
use uuid::Uuid;

#[derive(Subcommand)]
pub enum MealAction {
    /// Append a meal to the daily log
    Add {
        #[arg(long)]
        description: String,
        #[arg(long)]
        calories: f64,
        #[arg(long, default_value_t = 0.0)]
        protein: f64,
        #[arg(long, default_value_t = 0.0)]
        carbs: f64,
        #[arg(long, default_value_t = 0.0)]
        fat: f64,
        /// 0-100
        #[arg(long)]
        health_score: Option<u8>,
        /// Reference to the source photo
        #[arg(long)]
        source_image: Option<String>,
        /// Id of an earlier entry this one corrects
        #[arg(long)]
        supersedes: Option<Uuid>,
        /// RFC 3339 timestamp; defaults to now
        #[arg(long)]
        at: Option<String>,
    },
}

pub fn run(action: MealAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = LogDb::open()?;

    match action {
        MealAction::Add {
            description,
            calories,
            protein,
            carbs,
            fat,
            health_score,
            source_image,
            supersedes,
            at,
        } => {
            let timestamp = at
                .map(|s| DateTime::parse_from_rfc3339(&s))
                .transpose()?;
            let entry = db.append_meal(MealDraft {
                description,
                calories,
                macros: Macros {
                    protein_g: protein,
                    carbs_g: carbs,
                    fat_g: fat,
                },
                health_score,
                source_image,
                supersedes,
                timestamp,
            })?;
            println!("{}", serde_json::to_string_pretty(&entry)?);
        }
    }
    Ok(())
}
