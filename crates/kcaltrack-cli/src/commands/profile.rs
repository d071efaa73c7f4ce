//! Profile commands: onboarding, edits, and derived targets.

use clap::Subcommand;
use kcaltrack_core::profile;
use kcaltrack_core::storage::LogDb;
use kcaltrack_core::Profile;

use super::now;

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Create or replace the profile
    Set {
        #[arg(long)]
        age: u32,
        /// male, female or other
        #[arg(long)]
        sex: String,
        #[arg(long)]
        height_cm: f64,
        #[arg(long)]
        weight_kg: f64,
        /// sedentary, lightly_active, moderately_active, very_active,
        /// extremely_active
        #[arg(long)]
        activity: String,
        /// lose, maintain or gain
        #[arg(long)]
        goal: String,
        /// Goal rate in kg/week (default 0.5)
        #[arg(long)]
        rate: Option<f64>,
    },
    /// Show the stored profile with its weight and goal histories
    Show,
    /// Show the daily target derived from the current profile
    Target,
    /// Record a new weight observation
    Weight { kg: f64 },
    /// Record a goal change
    Goal {
        /// lose, maintain or gain
        goal: String,
        /// Goal rate in kg/week
        #[arg(long)]
        rate: Option<f64>,
    },
}

pub fn run(action: ProfileAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = LogDb::open()?;

    match action {
        ProfileAction::Set {
            age,
            sex,
            height_cm,
            weight_kg,
            activity,
            goal,
            rate,
        } => {
            let profile = Profile {
                age_years: age,
                sex: sex.parse()?,
                height_cm,
                weight_kg,
                activity_level: activity.parse()?,
                goal: goal.parse()?,
                goal_rate_kg_per_week: rate,
            };
            db.set_profile(&profile, now())?;
            print_target(&profile)?;
        }
        ProfileAction::Show => {
            let profile = db.profile()?;
            let output = serde_json::json!({
                "profile": profile,
                "weight_history": db.weight_history()?,
                "goal_history": db.goal_history()?,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        ProfileAction::Target => {
            let profile = db
                .profile()?
                .ok_or(kcaltrack_core::StorageError::ProfileMissing)?;
            print_target(&profile)?;
        }
        ProfileAction::Weight { kg } => {
            let profile = db.record_weight(kg, now())?;
            print_target(&profile)?;
        }
        ProfileAction::Goal { goal, rate } => {
            let profile = db.record_goal(goal.parse()?, rate, now())?;
            print_target(&profile)?;
        }
    }
    Ok(())
}

fn print_target(profile: &Profile) -> Result<(), Box<dyn std::error::Error>> {
    let target = profile::target(profile)?;
    println!("{}", serde_json::to_string_pretty(&target)?);
    if target.clamped {
        eprintln!(
            "warning: goal adjustment hit the safety floor; target clamped to {:.0} kcal",
            target.target_kcal
        );
    }
    Ok(())
}
