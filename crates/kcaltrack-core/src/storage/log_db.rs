//! SQLite-backed append-only log store.
//!
//! The single source of truth: one profile, its timestamped weight and goal
//! histories, and an unbounded ordered collection of entries. Entries are
//! append-only; the store exposes no update or delete for them. Each append
//! is a single SQLite INSERT, which is transactional, so a parallel session
//! on the same file either sees the whole entry or none of it.
//!
//! Entries are stored as JSON payloads with indexed `day` and `ts_unix`
//! columns; the `day` column is fixed at append time from the timestamp's
//! own offset, so the bucket an entry lands in never shifts afterwards.

use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset, Local, NaiveDate};
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use super::data_dir;
use crate::entry::{Entry, ExerciseDraft, ExerciseEntry, MealDraft, MealEntry};
use crate::error::{CoreError, StorageError};
use crate::exercise::{self, MetTable};
use crate::profile::{Goal, GoalChange, Profile, WeightRecord};

/// Bumped whenever the schema changes shape; stored in the `meta` table
/// for forward migration.
pub const SCHEMA_VERSION: i64 = 1;

/// SQLite store holding the profile and the daily log.
pub struct LogDb {
    conn: Connection,
}

impl LogDb {
    /// Open the store at `~/.config/kcaltrack/kcaltrack.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, StorageError> {
        let path = data_dir()
            .map_err(|e| StorageError::MigrationFailed(e.to_string()))?
            .join("kcaltrack.db");
        Self::open_at(&path)
    }

    /// Open the store at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(|source| StorageError::OpenFailed {
            path: PathBuf::from(path),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory store (for tests).
    #[cfg(test)]
    pub fn open_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), StorageError> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS meta (
                    key   TEXT PRIMARY KEY,
                    value TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS entries (
                    id      TEXT PRIMARY KEY,
                    kind    TEXT NOT NULL,
                    ts      TEXT NOT NULL,
                    ts_unix INTEGER NOT NULL,
                    day     TEXT NOT NULL,
                    payload TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS profile (
                    id         INTEGER PRIMARY KEY CHECK (id = 1),
                    payload    TEXT NOT NULL,
                    updated_at TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS weight_history (
                    weight_kg        REAL NOT NULL,
                    recorded_at      TEXT NOT NULL,
                    recorded_at_unix INTEGER NOT NULL
                );

                CREATE TABLE IF NOT EXISTS goal_history (
                    goal            TEXT NOT NULL,
                    rate_kg_per_week REAL,
                    changed_at      TEXT NOT NULL,
                    changed_at_unix INTEGER NOT NULL
                );

                -- Indexes for the day-bucket and range query patterns
                CREATE INDEX IF NOT EXISTS idx_entries_day ON entries(day);
                CREATE INDEX IF NOT EXISTS idx_entries_ts ON entries(ts_unix);
                CREATE INDEX IF NOT EXISTS idx_weight_recorded
                    ON weight_history(recorded_at_unix);",
            )
            .map_err(|e| StorageError::MigrationFailed(e.to_string()))?;
        self.conn.execute(
            "INSERT OR IGNORE INTO meta (key, value) VALUES ('schema_version', ?1)",
            params![SCHEMA_VERSION.to_string()],
        )?;
        Ok(())
    }

    /// Schema version recorded in the store.
    pub fn schema_version(&self) -> Result<i64, StorageError> {
        let value: String = self.conn.query_row(
            "SELECT value FROM meta WHERE key = 'schema_version'",
            [],
            |row| row.get(0),
        )?;
        value
            .parse()
            .map_err(|_| StorageError::CorruptRecord(format!("schema_version = {value}")))
    }

    // ---- profile -----------------------------------------------------

    /// Store the profile (there is exactly one). Records weight/goal
    /// history rows when those fields changed.
    pub fn set_profile(
        &self,
        profile: &Profile,
        at: DateTime<FixedOffset>,
    ) -> Result<(), CoreError> {
        profile.validate()?;
        let previous = self.profile()?;

        let payload = serde_json::to_string(profile)?;
        self.conn.execute(
            "INSERT INTO profile (id, payload, updated_at) VALUES (1, ?1, ?2)
             ON CONFLICT(id) DO UPDATE SET payload = ?1, updated_at = ?2",
            params![payload, at.to_rfc3339()],
        )
        .map_err(StorageError::from)?;

        let weight_changed = previous
            .as_ref()
            .map_or(true, |p| p.weight_kg != profile.weight_kg);
        if weight_changed {
            self.insert_weight(profile.weight_kg, at)?;
        }

        let goal_changed = previous.as_ref().map_or(true, |p| {
            p.goal != profile.goal || p.goal_rate_kg_per_week != profile.goal_rate_kg_per_week
        });
        if goal_changed {
            self.insert_goal(profile.goal, profile.goal_rate_kg_per_week, at)?;
        }

        Ok(())
    }

    /// The stored profile, if onboarding has happened.
    pub fn profile(&self) -> Result<Option<Profile>, StorageError> {
        let payload: Option<String> = self
            .conn
            .query_row("SELECT payload FROM profile WHERE id = 1", [], |row| {
                row.get(0)
            })
            .optional()?;
        match payload {
            None => Ok(None),
            Some(p) => serde_json::from_str(&p)
                .map(Some)
                .map_err(|e| StorageError::CorruptRecord(e.to_string())),
        }
    }

    /// Record a new weight observation and update the current profile.
    pub fn record_weight(
        &self,
        weight_kg: f64,
        at: DateTime<FixedOffset>,
    ) -> Result<Profile, CoreError> {
        let mut profile = self.profile()?.ok_or(StorageError::ProfileMissing)?;
        profile.weight_kg = weight_kg;
        profile.validate()?;

        let payload = serde_json::to_string(&profile)?;
        self.conn.execute(
            "UPDATE profile SET payload = ?1, updated_at = ?2 WHERE id = 1",
            params![payload, at.to_rfc3339()],
        )
        .map_err(StorageError::from)?;
        self.insert_weight(weight_kg, at)?;
        Ok(profile)
    }

    /// Record a goal change and update the current profile.
    pub fn record_goal(
        &self,
        goal: Goal,
        rate_kg_per_week: Option<f64>,
        at: DateTime<FixedOffset>,
    ) -> Result<Profile, CoreError> {
        let mut profile = self.profile()?.ok_or(StorageError::ProfileMissing)?;
        profile.goal = goal;
        profile.goal_rate_kg_per_week = rate_kg_per_week;

        let payload = serde_json::to_string(&profile)?;
        self.conn.execute(
            "UPDATE profile SET payload = ?1, updated_at = ?2 WHERE id = 1",
            params![payload, at.to_rfc3339()],
        )
        .map_err(StorageError::from)?;
        self.insert_goal(goal, rate_kg_per_week, at)?;
        Ok(profile)
    }

    fn insert_weight(&self, weight_kg: f64, at: DateTime<FixedOffset>) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO weight_history (weight_kg, recorded_at, recorded_at_unix)
             VALUES (?1, ?2, ?3)",
            params![weight_kg, at.to_rfc3339(), at.timestamp()],
        )?;
        Ok(())
    }

    fn insert_goal(
        &self,
        goal: Goal,
        rate: Option<f64>,
        at: DateTime<FixedOffset>,
    ) -> Result<(), StorageError> {
        let goal_str = serde_json::to_string(&goal)
            .map_err(|e| StorageError::CorruptRecord(e.to_string()))?;
        self.conn.execute(
            "INSERT INTO goal_history (goal, rate_kg_per_week, changed_at, changed_at_unix)
             VALUES (?1, ?2, ?3, ?4)",
            params![goal_str, rate, at.to_rfc3339(), at.timestamp()],
        )?;
        Ok(())
    }

    /// Weight snapshot valid at `ts`: the latest record at or before it,
    /// falling back to the earliest record. Exercise burns use this, never
    /// the current weight, so historical burns stay stable under later
    /// weight edits.
    pub fn weight_at(&self, ts: DateTime<FixedOffset>) -> Result<f64, StorageError> {
        let at_or_before: Option<f64> = self
            .conn
            .query_row(
                "SELECT weight_kg FROM weight_history
                 WHERE recorded_at_unix <= ?1
                 ORDER BY recorded_at_unix DESC, rowid DESC LIMIT 1",
                params![ts.timestamp()],
                |row| row.get(0),
            )
            .optional()?;
        if let Some(w) = at_or_before {
            return Ok(w);
        }
        // Entry predates every record; the first known weight is the best
        // available snapshot.
        let earliest: Option<f64> = self
            .conn
            .query_row(
                "SELECT weight_kg FROM weight_history
                 ORDER BY recorded_at_unix ASC, rowid ASC LIMIT 1",
                [],
                |row| row.get(0),
            )
            .optional()?;
        earliest.ok_or(StorageError::ProfileMissing)
    }

    /// All weight observations, oldest first.
    pub fn weight_history(&self) -> Result<Vec<WeightRecord>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT weight_kg, recorded_at FROM weight_history
             ORDER BY recorded_at_unix ASC, rowid ASC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, f64>(0)?, row.get::<_, String>(1)?))
        })?;
        let mut records = Vec::new();
        for row in rows {
            let (weight_kg, recorded_at) = row?;
            records.push(WeightRecord {
                weight_kg,
                recorded_at: parse_ts(&recorded_at)?,
            });
        }
        Ok(records)
    }

    /// All goal changes, oldest first.
    pub fn goal_history(&self) -> Result<Vec<GoalChange>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT goal, rate_kg_per_week, changed_at FROM goal_history
             ORDER BY changed_at_unix ASC, rowid ASC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, Option<f64>>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?;
        let mut changes = Vec::new();
        for row in rows {
            let (goal_str, rate, changed_at) = row?;
            let goal: Goal = serde_json::from_str(&goal_str)
                .map_err(|e| StorageError::CorruptRecord(e.to_string()))?;
            changes.push(GoalChange {
                goal,
                goal_rate_kg_per_week: rate,
                changed_at: parse_ts(&changed_at)?,
            });
        }
        Ok(changes)
    }

    // ---- entries -----------------------------------------------------

    /// Append a meal. Assigns id and timestamp when the draft has none;
    /// validates before anything is written.
    pub fn append_meal(&self, draft: MealDraft) -> Result<MealEntry, CoreError> {
        draft.validate()?;
        let entry = MealEntry {
            id: Uuid::new_v4(),
            timestamp: draft.timestamp.unwrap_or_else(now_local),
            description: draft.description,
            calories: draft.calories,
            macros: draft.macros,
            health_score: draft.health_score,
            source_image: draft.source_image,
            supersedes: draft.supersedes,
        };
        self.insert_entry(&Entry::Meal(entry.clone()))?;
        Ok(entry)
    }

    /// Append an exercise. The burn is derived here from the weight
    /// snapshot valid at the entry timestamp and stored with the entry.
    pub fn append_exercise(
        &self,
        draft: ExerciseDraft,
        met_table: &MetTable,
    ) -> Result<ExerciseEntry, CoreError> {
        let timestamp = draft.timestamp.unwrap_or_else(now_local);
        let weight_kg = self.weight_at(timestamp)?;
        let calories_burned = exercise::calories_burned(
            met_table,
            draft.activity,
            draft.intensity,
            draft.duration_min,
            weight_kg,
        )?;
        let entry = ExerciseEntry {
            id: Uuid::new_v4(),
            timestamp,
            activity: draft.activity,
            duration_min: draft.duration_min,
            intensity: draft.intensity,
            calories_burned,
            notes: draft.notes,
        };
        self.insert_entry(&Entry::Exercise(entry.clone()))?;
        Ok(entry)
    }

    fn insert_entry(&self, entry: &Entry) -> Result<(), CoreError> {
        let ts = entry.timestamp();
        let kind = match entry {
            Entry::Meal(_) => "meal",
            Entry::Exercise(_) => "exercise",
        };
        let payload = serde_json::to_string(entry)?;
        self.conn.execute(
            "INSERT INTO entries (id, kind, ts, ts_unix, day, payload)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                entry.id().to_string(),
                kind,
                ts.to_rfc3339(),
                ts.timestamp(),
                entry.day().to_string(),
                payload,
            ],
        )
        .map_err(StorageError::from)?;
        Ok(())
    }

    /// Entries whose calendar day equals `date`, ascending by timestamp,
    /// ties broken by insertion order.
    pub fn entries_for_date(&self, date: NaiveDate) -> Result<Vec<Entry>, StorageError> {
        self.query_entries(
            "SELECT payload FROM entries WHERE day = ?1
             ORDER BY ts_unix ASC, rowid ASC",
            params![date.to_string()],
        )
    }

    /// Entries with calendar day in `start..=end`, ascending by timestamp.
    pub fn entries_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Entry>, StorageError> {
        self.query_entries(
            "SELECT payload FROM entries WHERE day BETWEEN ?1 AND ?2
             ORDER BY ts_unix ASC, rowid ASC",
            params![start.to_string(), end.to_string()],
        )
    }

    /// The full log in append order.
    pub fn all_entries(&self) -> Result<Vec<Entry>, StorageError> {
        self.query_entries("SELECT payload FROM entries ORDER BY rowid ASC", params![])
    }

    fn query_entries(
        &self,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> Result<Vec<Entry>, StorageError> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params, |row| row.get::<_, String>(0))?;
        let mut entries = Vec::new();
        for payload in rows {
            let payload = payload?;
            let entry: Entry = serde_json::from_str(&payload)
                .map_err(|e| StorageError::CorruptRecord(e.to_string()))?;
            entries.push(entry);
        }
        Ok(entries)
    }
}

fn now_local() -> DateTime<FixedOffset> {
    Local::now().fixed_offset()
}

fn parse_ts(s: &str) -> Result<DateTime<FixedOffset>, StorageError> {
    DateTime::parse_from_rfc3339(s).map_err(|e| StorageError::CorruptRecord(e.to_string()))
}
