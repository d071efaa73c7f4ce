//! Profile types and energy-target derivation.
//!
//! The baseline (resting) energy need uses the revised Harris-Benedict
//! equations. The daily target applies the activity multiplier and a
//! goal-dependent delta, clamped to a safety floor. Targets are always
//! derived from the current profile, never persisted, so they cannot go
//! stale after a profile edit.

use std::str::FromStr;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::error::{EntryError, ProfileError};

/// Energy cost of one kilogram of body mass, used to turn a kg/week goal
/// rate into a daily calorie delta (7000 / 7 = 1000 kcal per kg/week).
pub const KCAL_PER_KG: f64 = 7000.0;

/// Goal rate assumed when the profile does not set one (kg/week).
pub const DEFAULT_GOAL_RATE: f64 = 0.5;

/// Goal rates beyond this are clamped (kg/week).
pub const MAX_GOAL_RATE: f64 = 1.0;

/// The target never drops below this fraction of the baseline.
pub const SAFETY_FLOOR: f64 = 0.8;

/// Protein target in grams per kilogram of body weight.
pub const PROTEIN_G_PER_KG: f64 = 1.6;

/// Biological sex, as the baseline formula distinguishes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BiologicalSex {
    Male,
    Female,
    /// Baseline is the mean of the male and female equations.
    Other,
}

/// Habitual activity level, mapped to a TDEE multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    LightlyActive,
    ModeratelyActive,
    VeryActive,
    ExtremelyActive,
}

impl ActivityLevel {
    /// TDEE multiplier applied to the baseline.
    pub fn multiplier(self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::LightlyActive => 1.375,
            ActivityLevel::ModeratelyActive => 1.55,
            ActivityLevel::VeryActive => 1.725,
            ActivityLevel::ExtremelyActive => 1.9,
        }
    }
}

/// Weight-management goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    Lose,
    Maintain,
    Gain,
}

/// A user profile. Weight and goal are the fields expected to change over
/// time; the store keeps a timestamped history of both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub age_years: u32,
    pub sex: BiologicalSex,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub activity_level: ActivityLevel,
    pub goal: Goal,
    /// Desired rate of change in kg/week. `None` means [`DEFAULT_GOAL_RATE`].
    #[serde(default)]
    pub goal_rate_kg_per_week: Option<f64>,
}

/// A timestamped weight observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightRecord {
    pub weight_kg: f64,
    pub recorded_at: DateTime<FixedOffset>,
}

/// A timestamped goal change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalChange {
    pub goal: Goal,
    pub goal_rate_kg_per_week: Option<f64>,
    pub changed_at: DateTime<FixedOffset>,
}

/// Daily energy target derived from a profile. Never stored; recompute on
/// demand from the current profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    /// Resting energy need (kcal/day).
    pub baseline_kcal: f64,
    /// Daily intake target after activity and goal adjustment (kcal/day).
    pub target_kcal: f64,
    /// Suggested protein intake (g/day).
    pub protein_target_g: f64,
    /// True when the goal adjustment hit the safety floor and the target
    /// was clamped up to `SAFETY_FLOOR * baseline_kcal`.
    pub clamped: bool,
}

impl Profile {
    /// Reject profiles the formulas are undefined for.
    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.age_years == 0 {
            return Err(ProfileError::InvalidProfile {
                field: "age_years",
                value: 0.0,
            });
        }
        if !(self.height_cm > 0.0) {
            return Err(ProfileError::InvalidProfile {
                field: "height_cm",
                value: self.height_cm,
            });
        }
        if !(self.weight_kg > 0.0) {
            return Err(ProfileError::InvalidProfile {
                field: "weight_kg",
                value: self.weight_kg,
            });
        }
        Ok(())
    }

    /// Effective goal rate: the stored rate clamped to `[0, MAX_GOAL_RATE]`,
    /// or `DEFAULT_GOAL_RATE` when unset.
    pub fn effective_goal_rate(&self) -> f64 {
        self.goal_rate_kg_per_week
            .unwrap_or(DEFAULT_GOAL_RATE)
            .clamp(0.0, MAX_GOAL_RATE)
    }
}

/// Resting energy need in kcal/day (revised Harris-Benedict).
pub fn baseline_kcal(profile: &Profile) -> Result<f64, ProfileError> {
    profile.validate()?;
    let w = profile.weight_kg;
    let h = profile.height_cm;
    let a = f64::from(profile.age_years);

    let male = 88.362 + 13.397 * w + 4.799 * h - 5.677 * a;
    let female = 447.593 + 9.247 * w + 3.098 * h - 4.330 * a;

    Ok(match profile.sex {
        BiologicalSex::Male => male,
        BiologicalSex::Female => female,
        BiologicalSex::Other => (male + female) / 2.0,
    })
}

/// Daily target: baseline x activity multiplier, shifted by the goal delta,
/// clamped to the safety floor. A clamped result is still returned, with
/// `Target::clamped` set, so callers can warn without failing.
pub fn target(profile: &Profile) -> Result<Target, ProfileError> {
    let baseline = baseline_kcal(profile)?;
    let maintenance = baseline * profile.activity_level.multiplier();

    let daily_delta = profile.effective_goal_rate() * KCAL_PER_KG / 7.0;
    let adjusted = match profile.goal {
        Goal::Lose => maintenance - daily_delta,
        Goal::Maintain => maintenance,
        Goal::Gain => maintenance + daily_delta,
    };

    let floor = SAFETY_FLOOR * baseline;
    let clamped = adjusted < floor;
    let target_kcal = if clamped { floor } else { adjusted };

    Ok(Target {
        baseline_kcal: baseline,
        target_kcal,
        protein_target_g: PROTEIN_G_PER_KG * profile.weight_kg,
        clamped,
    })
}

fn parse_err(field: &'static str, got: &str, expected: &str) -> EntryError {
    EntryError::InvalidValue {
        field,
        message: format!("'{got}' is not one of: {expected}"),
    }
}

impl FromStr for BiologicalSex {
    type Err = EntryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "male" | "m" => Ok(BiologicalSex::Male),
            "female" | "f" => Ok(BiologicalSex::Female),
            "other" => Ok(BiologicalSex::Other),
            _ => Err(parse_err("sex", s, "male, female, other")),
        }
    }
}

impl FromStr for ActivityLevel {
    type Err = EntryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sedentary" => Ok(ActivityLevel::Sedentary),
            "lightly_active" | "light" => Ok(ActivityLevel::LightlyActive),
            "moderately_active" | "moderate" => Ok(ActivityLevel::ModeratelyActive),
            "very_active" => Ok(ActivityLevel::VeryActive),
            "extremely_active" | "extra" => Ok(ActivityLevel::ExtremelyActive),
            _ => Err(parse_err(
                "activity_level",
                s,
                "sedentary, lightly_active, moderately_active, very_active, extremely_active",
            )),
        }
    }
}

impl FromStr for Goal {
    type Err = EntryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lose" => Ok(Goal::Lose),
            "maintain" => Ok(Goal::Maintain),
            "gain" => Ok(Goal::Gain),
            _ => Err(parse_err("goal", s, "lose, maintain, gain")),
        }
    }
}
