//! MET-based exercise energy expenditure.
//!
//! `calories_burned = MET(activity, intensity) * weight_kg * hours`.
//!
//! The weight passed in must be the profile weight valid at the entry's
//! timestamp (see `LogDb::weight_at`), not the current weight, so that
//! recomputing a historical burn always yields the value originally stored.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EntryError, ExerciseError};
use crate::units::minutes_to_hours;

/// Kind of logged activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    Running,
    Walking,
    Cycling,
    Swimming,
    WeightTraining,
    Yoga,
    Other,
}

/// Perceived intensity; selects the MET coefficient within an activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intensity {
    Low,
    Medium,
    High,
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ActivityType::Running => "running",
            ActivityType::Walking => "walking",
            ActivityType::Cycling => "cycling",
            ActivityType::Swimming => "swimming",
            ActivityType::WeightTraining => "weight_training",
            ActivityType::Yoga => "yoga",
            ActivityType::Other => "other",
        };
        f.write_str(s)
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Intensity::Low => "low",
            Intensity::Medium => "medium",
            Intensity::High => "high",
        };
        f.write_str(s)
    }
}

impl FromStr for ActivityType {
    type Err = ExerciseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "running" => Ok(ActivityType::Running),
            "walking" => Ok(ActivityType::Walking),
            "cycling" => Ok(ActivityType::Cycling),
            "swimming" => Ok(ActivityType::Swimming),
            "weight_training" | "weights" => Ok(ActivityType::WeightTraining),
            "yoga" => Ok(ActivityType::Yoga),
            "other" => Ok(ActivityType::Other),
            _ => Err(ExerciseError::UnknownActivity {
                activity: s.to_string(),
                intensity: "any".to_string(),
            }),
        }
    }
}

impl FromStr for Intensity {
    type Err = EntryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(Intensity::Low),
            "medium" | "moderate" => Ok(Intensity::Medium),
            "high" => Ok(Intensity::High),
            _ => Err(EntryError::InvalidValue {
                field: "intensity",
                message: format!("'{s}' is not one of: low, medium, high"),
            }),
        }
    }
}

/// MET coefficient table keyed by (activity, intensity).
///
/// `Default` loads the built-in coefficients; `set` lets a caller override
/// or extend them. Lookups on a pair with no coefficient fail with
/// `UnknownActivity`.
#[derive(Debug, Clone)]
pub struct MetTable {
    coefficients: HashMap<(ActivityType, Intensity), f64>,
}

impl MetTable {
    /// A table with no coefficients; populate it with `set`.
    pub fn empty() -> Self {
        Self {
            coefficients: HashMap::new(),
        }
    }

    /// Override or add a coefficient.
    pub fn set(&mut self, activity: ActivityType, intensity: Intensity, met: f64) {
        self.coefficients.insert((activity, intensity), met);
    }

    /// Look up a coefficient.
    pub fn met(&self, activity: ActivityType, intensity: Intensity) -> Option<f64> {
        self.coefficients.get(&(activity, intensity)).copied()
    }
}

impl Default for MetTable {
    fn default() -> Self {
        use ActivityType::*;
        use Intensity::*;

        let mut t = Self::empty();
        for (activity, low, medium, high) in [
            (Running, 8.0, 9.8, 11.0),
            (Walking, 2.8, 3.5, 4.3),
            (Cycling, 5.8, 8.0, 10.0),
            (Swimming, 5.8, 7.0, 9.8),
            (WeightTraining, 3.5, 5.0, 6.0),
            (Yoga, 2.3, 3.0, 4.0),
            (Other, 3.0, 5.0, 7.0),
        ] {
            t.set(activity, Low, low);
            t.set(activity, Medium, medium);
            t.set(activity, High, high);
        }
        t
    }
}

/// Energy expended for an activity, in kcal.
///
/// Pure in its four inputs; identical inputs always give identical output.
pub fn calories_burned(
    table: &MetTable,
    activity: ActivityType,
    intensity: Intensity,
    duration_min: f64,
    weight_kg: f64,
) -> Result<f64, ExerciseError> {
    if !(duration_min > 0.0) {
        return Err(ExerciseError::InvalidDuration(duration_min));
    }
    let met = table
        .met(activity, intensity)
        .ok_or_else(|| ExerciseError::UnknownActivity {
            activity: activity.to_string(),
            intensity: intensity.to_string(),
        })?;
    Ok(met * weight_kg * minutes_to_hours(duration_min))
}
