//! Contracts toward the external AI collaborators.
//!
//! The core never talks to a network. It defines the typed request/response
//! shapes for the food-recognition and advice services, validates whatever
//! comes back at this boundary, and leaves the transport to implementors.
//! Collaborator errors pass through unmodified; the core does not retry.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::entry::{Macros, MealDraft};
use crate::error::{AdviceError, AnalysisError, CoreError, EntryError, StorageError};
use crate::profile::{self, Profile, Target};
use crate::storage::LogDb;
use crate::summary::{daily_summary, DailySummary};

/// Structured nutrition estimate for one photographed meal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodAnalysis {
    pub description: String,
    pub calories: f64,
    pub macros: Macros,
    #[serde(default)]
    pub health_score: Option<u8>,
}

impl FoodAnalysis {
    /// Coerce a service response into a meal draft, validating here so
    /// nothing malformed ever reaches the store.
    pub fn into_draft(
        self,
        timestamp: Option<DateTime<FixedOffset>>,
        source_image: Option<String>,
    ) -> Result<MealDraft, EntryError> {
        let draft = MealDraft {
            description: self.description,
            calories: self.calories,
            macros: self.macros,
            health_score: self.health_score,
            source_image,
            supersedes: None,
            timestamp,
        };
        draft.validate()?;
        Ok(draft)
    }
}

/// Food-recognition service: image bytes in, nutrition estimate out.
pub trait FoodRecognizer {
    fn analyze_food_image(&self, image: &[u8]) -> Result<FoodAnalysis, AnalysisError>;
}

/// Advice service: context summary in, free-text advice out. The core
/// never depends on the content of the returned text.
pub trait AdviceSource {
    fn advice(&self, context: &ContextSummary) -> Result<String, AdviceError>;
}

/// What the advice service gets to see: the profile, the derived target,
/// and the trailing daily summaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextSummary {
    pub profile: Profile,
    pub target: Target,
    pub recent_days: Vec<DailySummary>,
}

impl ContextSummary {
    /// Build the context from the store: current profile, fresh target,
    /// and summaries for the `days` calendar days ending at `today`.
    pub fn build(db: &LogDb, today: NaiveDate, days: u32) -> Result<Self, CoreError> {
        let profile = db.profile()?.ok_or(StorageError::ProfileMissing)?;
        let target = profile::target(&profile)?;

        let mut recent_days = Vec::with_capacity(days as usize);
        for back in (0..days.max(1)).rev() {
            let date = today - chrono::Duration::days(i64::from(back));
            recent_days.push(daily_summary(db, date, &target)?);
        }

        Ok(Self {
            profile,
            target,
            recent_days,
        })
    }
}
