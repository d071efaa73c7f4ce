//! # kcaltrack Core Library
//!
//! Deterministic energy-balance engine for a single-user health tracker:
//! it derives baseline and target energy needs from a profile, converts
//! logged exercises into expenditure estimates, keeps an append-only
//! per-day log of meals and exercises, and rolls the log up into daily and
//! period summaries.
//!
//! ## Architecture
//!
//! - **Profile**: revised Harris-Benedict baseline, activity multiplier and
//!   goal delta with a safety-floor clamp
//! - **Exercise**: MET coefficient table, burns derived from the weight
//!   snapshot valid at the entry's timestamp
//! - **Storage**: SQLite append-only log plus TOML-based configuration
//! - **Summary**: pure reads; zero-filled trend series, adherence rates
//! - **Adapters**: typed contracts for the food-recognition and advice
//!   services; no network code in the core
//!
//! ## Key Components
//!
//! - [`LogDb`]: profile + entry persistence, the single source of truth
//! - [`MetTable`]: activity/intensity MET coefficients
//! - [`Target`]: energy target derived on demand, never persisted
//! - [`FoodRecognizer`] / [`AdviceSource`]: collaborator traits

pub mod adapters;
pub mod entry;
pub mod error;
pub mod exercise;
pub mod profile;
pub mod storage;
pub mod summary;
pub mod units;

pub use adapters::{AdviceSource, ContextSummary, FoodAnalysis, FoodRecognizer};
pub use entry::{Entry, ExerciseDraft, ExerciseEntry, Macros, MealDraft, MealEntry};
pub use error::{
    AdviceError, AnalysisError, ConfigError, CoreError, EntryError, ExerciseError, ProfileError,
    Result, StorageError,
};
pub use exercise::{ActivityType, Intensity, MetTable};
pub use profile::{ActivityLevel, BiologicalSex, Goal, GoalChange, Profile, Target, WeightRecord};
pub use storage::{Config, LogDb, SummaryConfig};
pub use summary::{DailySummary, PeriodSummary, TrendMetric, TrendPoint};
