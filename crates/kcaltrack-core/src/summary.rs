//! Daily and period summaries over the log.
//!
//! Every call here is a pure read over the store's current state; nothing
//! is cached, so a summary always reflects the latest appended entry.
//! Trend series are zero-filled: one point for every calendar day in the
//! range, so chart consumers never special-case missing days.

use std::collections::HashMap;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::entry::Entry;
use crate::error::{CoreError, EntryError, StorageError};
use crate::profile::Target;
use crate::storage::LogDb;

/// One day's rollup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub calories_consumed: f64,
    pub calories_burned: f64,
    /// consumed - burned
    pub net_calories: f64,
    pub target_calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    /// consumed / target; 0 when the target is not positive.
    pub percent_of_target: f64,
}

/// Metric selectable for a trend series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendMetric {
    CaloriesConsumed,
    CaloriesBurned,
    NetCalories,
    ProteinG,
    CarbsG,
    FatG,
}

/// One point of a trend series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Averages and adherence over a date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodSummary {
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Calendar days in the range, entries or not.
    pub days: u32,
    pub avg_calories_consumed: f64,
    pub avg_calories_burned: f64,
    /// Fraction of days with |net - target| within the tolerance band.
    pub adherence_rate: f64,
}

/// Per-day running totals, accumulated while walking entries.
#[derive(Debug, Clone, Copy, Default)]
struct DayTotals {
    consumed: f64,
    burned: f64,
    protein_g: f64,
    carbs_g: f64,
    fat_g: f64,
}

impl DayTotals {
    fn add(&mut self, entry: &Entry) {
        match entry {
            Entry::Meal(m) => {
                self.consumed += m.calories;
                self.protein_g += m.macros.protein_g;
                self.carbs_g += m.macros.carbs_g;
                self.fat_g += m.macros.fat_g;
            }
            Entry::Exercise(e) => {
                self.burned += e.calories_burned;
            }
        }
    }

    fn metric(&self, metric: TrendMetric) -> f64 {
        match metric {
            TrendMetric::CaloriesConsumed => self.consumed,
            TrendMetric::CaloriesBurned => self.burned,
            TrendMetric::NetCalories => self.consumed - self.burned,
            TrendMetric::ProteinG => self.protein_g,
            TrendMetric::CarbsG => self.carbs_g,
            TrendMetric::FatG => self.fat_g,
        }
    }

    fn summary(&self, date: NaiveDate, target: &Target) -> DailySummary {
        let percent_of_target = if target.target_kcal > 0.0 {
            self.consumed / target.target_kcal
        } else {
            0.0
        };
        DailySummary {
            date,
            calories_consumed: self.consumed,
            calories_burned: self.burned,
            net_calories: self.consumed - self.burned,
            target_calories: target.target_kcal,
            protein_g: self.protein_g,
            carbs_g: self.carbs_g,
            fat_g: self.fat_g,
            percent_of_target,
        }
    }
}

fn totals_by_day(entries: &[Entry]) -> HashMap<NaiveDate, DayTotals> {
    let mut map: HashMap<NaiveDate, DayTotals> = HashMap::new();
    for entry in entries {
        map.entry(entry.day()).or_default().add(entry);
    }
    map
}

/// Inclusive list of days in `start..=end`.
fn days_in_range(start: NaiveDate, end: NaiveDate) -> Result<Vec<NaiveDate>, CoreError> {
    if start > end {
        return Err(CoreError::InvalidRange { start, end });
    }
    Ok(start.iter_days().take_while(|d| *d <= end).collect())
}

/// Roll up one day's entries against the current target.
pub fn daily_summary(
    db: &LogDb,
    date: NaiveDate,
    target: &Target,
) -> Result<DailySummary, StorageError> {
    let entries = db.entries_for_date(date)?;
    let mut totals = DayTotals::default();
    for entry in &entries {
        totals.add(entry);
    }
    Ok(totals.summary(date, target))
}

/// One point per calendar day in `start..=end`, zero-filled for days with
/// no entries. The result always has exactly `end - start + 1` points.
pub fn trend_series(
    db: &LogDb,
    start: NaiveDate,
    end: NaiveDate,
    metric: TrendMetric,
) -> Result<Vec<TrendPoint>, CoreError> {
    let days = days_in_range(start, end)?;
    let entries = db.entries_in_range(start, end)?;
    let totals = totals_by_day(&entries);
    Ok(days
        .into_iter()
        .map(|date| TrendPoint {
            date,
            value: totals.get(&date).map_or(0.0, |t| t.metric(metric)),
        })
        .collect())
}

/// Averages over every calendar day in the range plus the adherence rate.
/// Days with no entries still count as days (net 0).
pub fn period_summary(
    db: &LogDb,
    start: NaiveDate,
    end: NaiveDate,
    target: &Target,
    tolerance_kcal: f64,
) -> Result<PeriodSummary, CoreError> {
    let days = days_in_range(start, end)?;
    let entries = db.entries_in_range(start, end)?;
    let totals = totals_by_day(&entries);

    let day_count = days.len() as f64;
    let mut consumed_sum = 0.0;
    let mut burned_sum = 0.0;
    let mut adherent_days = 0u32;

    for date in &days {
        let t = totals.get(date).copied().unwrap_or_default();
        consumed_sum += t.consumed;
        burned_sum += t.burned;
        let net = t.consumed - t.burned;
        if (net - target.target_kcal).abs() <= tolerance_kcal {
            adherent_days += 1;
        }
    }

    Ok(PeriodSummary {
        start,
        end,
        days: days.len() as u32,
        avg_calories_consumed: consumed_sum / day_count,
        avg_calories_burned: burned_sum / day_count,
        adherence_rate: f64::from(adherent_days) / day_count,
    })
}

impl FromStr for TrendMetric {
    type Err = EntryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "calories_consumed" | "consumed" => Ok(TrendMetric::CaloriesConsumed),
            "calories_burned" | "burned" => Ok(TrendMetric::CaloriesBurned),
            "net_calories" | "net" => Ok(TrendMetric::NetCalories),
            "protein" | "protein_g" => Ok(TrendMetric::ProteinG),
            "carbs" | "carbs_g" => Ok(TrendMetric::CarbsG),
            "fat" | "fat_g" => Ok(TrendMetric::FatG),
            _ => Err(EntryError::InvalidValue {
                field: "metric",
                message: format!(
                    "'{s}' is not one of: consumed, burned, net, protein, carbs, fat"
                ),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, FixedOffset};
    use proptest::prelude::*;

    use crate::entry::{Macros, MealDraft};
    use crate::exercise::{ActivityType, Intensity, MetTable};
    use crate::profile::{self, ActivityLevel, BiologicalSex, Goal, Profile};

    fn ts(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn reference_profile() -> Profile {
        Profile {
            age_years: 30,
            sex: BiologicalSex::Male,
            height_cm: 175.0,
            weight_kg: 70.0,
            activity_level: ActivityLevel::Sedentary,
            goal: Goal::Lose,
            goal_rate_kg_per_week: Some(0.5),
        }
    }

    fn seeded_db() -> (LogDb, Target) {
        let db = LogDb::open_memory().unwrap();
        let profile = reference_profile();
        db.set_profile(&profile, ts("2024-01-01T08:00:00+00:00")).unwrap();
        let target = profile::target(&profile).unwrap();
        (db, target)
    }

    fn add_meal(db: &LogDb, calories: f64, macros: Macros, at: &str) {
        db.append_meal(MealDraft {
            description: "test meal".to_string(),
            calories,
            macros,
            timestamp: Some(ts(at)),
            ..MealDraft::default()
        })
        .unwrap();
    }

    #[test]
    fn test_reference_daily_summary() {
        // Two meals (300 + 500) and a 200 kcal exercise against a ~1535
        // target: consumed 800, burned ~200, net ~600, percent ~0.52.
        let (db, target) = seeded_db();
        add_meal(&db, 300.0, Macros { protein_g: 20.0, carbs_g: 30.0, fat_g: 10.0 },
            "2024-01-10T08:00:00+00:00");
        add_meal(&db, 500.0, Macros { protein_g: 25.0, carbs_g: 55.0, fat_g: 15.0 },
            "2024-01-10T13:00:00+00:00");
        // ~200 kcal: walking medium (3.5 MET) * 70 kg * (48.98/60) h
        db.append_exercise(
            crate::entry::ExerciseDraft {
                activity: ActivityType::Walking,
                duration_min: 48.98,
                intensity: Intensity::Medium,
                notes: None,
                timestamp: Some(ts("2024-01-10T18:00:00+00:00")),
            },
            &MetTable::default(),
        )
        .unwrap();

        let s = daily_summary(&db, date(2024, 1, 10), &target).unwrap();
        assert_eq!(s.calories_consumed, 800.0);
        assert!((s.calories_burned - 200.0).abs() < 0.2);
        assert!((s.net_calories - 600.0).abs() < 0.2);
        assert!((s.percent_of_target - 800.0 / target.target_kcal).abs() < 1e-9);
        assert!((s.percent_of_target - 0.521).abs() < 0.001);
        assert_eq!(s.protein_g, 45.0);
        assert_eq!(s.carbs_g, 85.0);
        assert_eq!(s.fat_g, 25.0);
    }

    #[test]
    fn test_empty_day_is_all_zero() {
        let (db, target) = seeded_db();
        let s = daily_summary(&db, date(2024, 5, 1), &target).unwrap();
        assert_eq!(s.calories_consumed, 0.0);
        assert_eq!(s.calories_burned, 0.0);
        assert_eq!(s.net_calories, 0.0);
        assert_eq!(s.percent_of_target, 0.0);
    }

    #[test]
    fn test_zero_target_guard() {
        let (db, mut target) = seeded_db();
        add_meal(&db, 500.0, Macros::default(), "2024-01-10T08:00:00+00:00");
        target.target_kcal = 0.0;
        let s = daily_summary(&db, date(2024, 1, 10), &target).unwrap();
        assert_eq!(s.percent_of_target, 0.0);
    }

    #[test]
    fn test_trend_series_zero_fills() {
        let (db, _target) = seeded_db();
        add_meal(&db, 400.0, Macros::default(), "2024-01-10T08:00:00+00:00");
        add_meal(&db, 600.0, Macros::default(), "2024-01-12T08:00:00+00:00");

        let series = trend_series(
            &db,
            date(2024, 1, 9),
            date(2024, 1, 13),
            TrendMetric::CaloriesConsumed,
        )
        .unwrap();

        assert_eq!(series.len(), 5);
        let values: Vec<f64> = series.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![0.0, 400.0, 0.0, 600.0, 0.0]);
        // Dates are consecutive and in order.
        for pair in series.windows(2) {
            assert_eq!(pair[1].date, pair[0].date.succ_opt().unwrap());
        }
    }

    #[test]
    fn test_trend_series_single_day() {
        let (db, _target) = seeded_db();
        let series =
            trend_series(&db, date(2024, 1, 10), date(2024, 1, 10), TrendMetric::NetCalories)
                .unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].value, 0.0);
    }

    #[test]
    fn test_inverted_range_rejected() {
        let (db, target) = seeded_db();
        assert!(matches!(
            trend_series(&db, date(2024, 1, 10), date(2024, 1, 9), TrendMetric::NetCalories),
            Err(CoreError::InvalidRange { .. })
        ));
        assert!(period_summary(&db, date(2024, 1, 10), date(2024, 1, 9), &target, 200.0).is_err());
    }

    #[test]
    fn test_period_summary_averages_over_all_days() {
        let (db, target) = seeded_db();
        add_meal(&db, 900.0, Macros::default(), "2024-01-10T08:00:00+00:00");
        add_meal(&db, 300.0, Macros::default(), "2024-01-11T08:00:00+00:00");
        // 2024-01-12 has no entries but still counts as a day.

        let s = period_summary(&db, date(2024, 1, 10), date(2024, 1, 12), &target, 200.0).unwrap();
        assert_eq!(s.days, 3);
        assert!((s.avg_calories_consumed - 400.0).abs() < 1e-9);
        assert_eq!(s.avg_calories_burned, 0.0);
    }

    #[test]
    fn test_adherence_counts_days_within_band() {
        let (db, target) = seeded_db(); // target ~1534.8
        // Day 1: net within 200 of target.
        add_meal(&db, 1500.0, Macros::default(), "2024-01-10T08:00:00+00:00");
        // Day 2: way under.
        add_meal(&db, 400.0, Macros::default(), "2024-01-11T08:00:00+00:00");
        // Day 3: empty, net 0, not adherent.

        let s = period_summary(&db, date(2024, 1, 10), date(2024, 1, 12), &target, 200.0).unwrap();
        assert!((s.adherence_rate - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_summary_reflects_latest_append() {
        let (db, target) = seeded_db();
        let before = daily_summary(&db, date(2024, 1, 10), &target).unwrap();
        assert_eq!(before.calories_consumed, 0.0);

        add_meal(&db, 250.0, Macros::default(), "2024-01-10T08:00:00+00:00");
        let after = daily_summary(&db, date(2024, 1, 10), &target).unwrap();
        assert_eq!(after.calories_consumed, 250.0);
    }

    #[test]
    fn test_metric_parsing() {
        assert_eq!("net".parse::<TrendMetric>().unwrap(), TrendMetric::NetCalories);
        assert_eq!("protein".parse::<TrendMetric>().unwrap(), TrendMetric::ProteinG);
        assert!("steps".parse::<TrendMetric>().is_err());
    }

    proptest! {
        /// trend_series over any range has exactly end - start + 1 points,
        /// regardless of which days hold entries.
        #[test]
        fn prop_trend_series_length(start_off in 0i64..200, len in 0i64..120,
                                    meal_days in proptest::collection::vec(0i64..120, 0..8)) {
            let (db, _target) = seeded_db();
            let base = date(2024, 1, 1);
            let start = base + chrono::Duration::days(start_off);
            let end = start + chrono::Duration::days(len);

            for off in meal_days {
                let day = start + chrono::Duration::days(off);
                add_meal(&db, 100.0, Macros::default(),
                    &format!("{day}T12:00:00+00:00"));
            }

            let series = trend_series(&db, start, end, TrendMetric::CaloriesConsumed).unwrap();
            prop_assert_eq!(series.len() as i64, len + 1);
            // Partition: series total equals the sum over the raw range.
            let total: f64 = series.iter().map(|p| p.value).sum();
            let raw: f64 = db.entries_in_range(start, end).unwrap().iter()
                .map(|e| match e {
                    crate::entry::Entry::Meal(m) => m.calories,
                    crate::entry::Entry::Exercise(_) => 0.0,
                })
                .sum();
            prop_assert!((total - raw).abs() < 1e-6);
        }
    }
}
