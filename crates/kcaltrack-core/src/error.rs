//! Core error types for kcaltrack-core.
//!
//! This module defines the error hierarchy using thiserror. Each engine has
//! its own error enum; `CoreError` aggregates them for callers that cross
//! engine boundaries (the store, the CLI).

use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

/// Core error type for kcaltrack-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Profile validation errors
    #[error("Profile error: {0}")]
    Profile(#[from] ProfileError),

    /// Exercise computation errors
    #[error("Exercise error: {0}")]
    Exercise(#[from] ExerciseError),

    /// Entry validation errors
    #[error("Entry error: {0}")]
    Entry(#[from] EntryError),

    /// Storage-level errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Food-recognition collaborator errors, passed through unmodified
    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    /// Advice collaborator errors, passed through unmodified
    #[error("Advice error: {0}")]
    Advice(#[from] AdviceError),

    /// Invalid date range handed to an aggregation call
    #[error("Invalid date range: {start} is after {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Profile validation errors.
#[derive(Error, Debug)]
pub enum ProfileError {
    /// A numeric profile field is outside its valid domain
    #[error("Invalid profile: {field} must be positive (got {value})")]
    InvalidProfile { field: &'static str, value: f64 },
}

/// Exercise computation errors.
#[derive(Error, Debug)]
pub enum ExerciseError {
    /// No MET coefficient exists for this activity/intensity pair
    #[error("Unknown activity: no MET coefficient for '{activity}' at {intensity} intensity")]
    UnknownActivity { activity: String, intensity: String },

    /// Duration must be strictly positive
    #[error("Invalid duration: {0} minutes (must be > 0)")]
    InvalidDuration(f64),
}

/// Entry validation errors, raised at the boundary before anything
/// reaches the log store.
#[derive(Error, Debug)]
pub enum EntryError {
    /// A field failed validation
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: &'static str, message: String },
}

/// Storage-specific errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the database file
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Schema migration failed
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// An operation needed a stored profile and none exists
    #[error("No profile stored; run profile setup first")]
    ProfileMissing,

    /// A stored record could not be decoded
    #[error("Corrupt record in store: {0}")]
    CorruptRecord(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Data directory could not be resolved or created
    #[error("Failed to resolve data directory: {0}")]
    DataDir(String),
}

/// Errors from the food-recognition collaborator. The core never retries
/// these; they surface to the caller as-is.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The image could not be read or decoded by the service
    #[error("Unreadable image: {0}")]
    InvalidImage(String),

    /// The service call itself failed
    #[error("Food analysis service failed: {0}")]
    ServiceFailed(String),

    /// The service answered with something that does not fit the contract
    #[error("Malformed analysis response: {0}")]
    MalformedResponse(String),
}

/// Errors from the advice collaborator.
#[derive(Error, Debug)]
pub enum AdviceError {
    /// The service call failed
    #[error("Advice service failed: {0}")]
    ServiceFailed(String),
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        StorageError::QueryFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
