//! Log entry types.
//!
//! Entries are append-only: once stored, id, timestamp and payload never
//! change. Corrections are new entries carrying a `supersedes` reference.
//! Draft types hold caller input before the store assigns id/timestamp;
//! validation happens on the draft, so nothing malformed reaches the store.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EntryError;
use crate::exercise::{ActivityType, Intensity};

/// Macronutrient totals in grams.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Macros {
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

impl Macros {
    pub fn validate(&self) -> Result<(), EntryError> {
        for (field, value) in [
            ("protein_g", self.protein_g),
            ("carbs_g", self.carbs_g),
            ("fat_g", self.fat_g),
        ] {
            if !(value >= 0.0) || !value.is_finite() {
                return Err(EntryError::InvalidValue {
                    field,
                    message: format!("must be a finite value >= 0 (got {value})"),
                });
            }
        }
        Ok(())
    }
}

/// A logged meal. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealEntry {
    pub id: Uuid,
    pub timestamp: DateTime<FixedOffset>,
    pub description: String,
    pub calories: f64,
    pub macros: Macros,
    /// 0-100, when the recognition service provided one.
    #[serde(default)]
    pub health_score: Option<u8>,
    /// Reference to the source photo, when the entry came from one.
    #[serde(default)]
    pub source_image: Option<String>,
    /// Id of an earlier entry this one corrects.
    #[serde(default)]
    pub supersedes: Option<Uuid>,
}

/// A logged exercise. `calories_burned` is derived at append time from the
/// weight snapshot valid at `timestamp` and stored with the entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseEntry {
    pub id: Uuid,
    pub timestamp: DateTime<FixedOffset>,
    pub activity: ActivityType,
    pub duration_min: f64,
    pub intensity: Intensity,
    pub calories_burned: f64,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Either kind of log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Entry {
    Meal(MealEntry),
    Exercise(ExerciseEntry),
}

impl Entry {
    pub fn id(&self) -> Uuid {
        match self {
            Entry::Meal(m) => m.id,
            Entry::Exercise(e) => e.id,
        }
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        match self {
            Entry::Meal(m) => m.timestamp,
            Entry::Exercise(e) => e.timestamp,
        }
    }

    /// Calendar day of the entry, in the offset it was recorded with.
    pub fn day(&self) -> NaiveDate {
        self.timestamp().date_naive()
    }
}

/// Caller input for a meal, before the store assigns id and timestamp.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MealDraft {
    pub description: String,
    pub calories: f64,
    #[serde(default)]
    pub macros: Macros,
    #[serde(default)]
    pub health_score: Option<u8>,
    #[serde(default)]
    pub source_image: Option<String>,
    #[serde(default)]
    pub supersedes: Option<Uuid>,
    /// Logging time; `None` means "now".
    #[serde(default)]
    pub timestamp: Option<DateTime<FixedOffset>>,
}

impl MealDraft {
    pub fn validate(&self) -> Result<(), EntryError> {
        if self.description.trim().is_empty() {
            return Err(EntryError::InvalidValue {
                field: "description",
                message: "must not be empty".to_string(),
            });
        }
        if !(self.calories >= 0.0) || !self.calories.is_finite() {
            return Err(EntryError::InvalidValue {
                field: "calories",
                message: format!("must be a finite value >= 0 (got {})", self.calories),
            });
        }
        self.macros.validate()?;
        if let Some(score) = self.health_score {
            if score > 100 {
                return Err(EntryError::InvalidValue {
                    field: "health_score",
                    message: format!("must be 0-100 (got {score})"),
                });
            }
        }
        Ok(())
    }
}

/// Caller input for an exercise. The burn is derived by the store, never
/// supplied by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseDraft {
    pub activity: ActivityType,
    pub duration_min: f64,
    pub intensity: Intensity,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub timestamp: Option<DateTime<FixedOffset>>,
}
