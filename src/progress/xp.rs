//! XP aggregation over the progress ledger.
//!
//! The aggregate is always recomputed from a full ledger snapshot, never
//! patched incrementally: records can be edited or deleted after the fact,
//! and a from-scratch recompute is correct regardless of what happened to
//! previously persisted aggregates.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::types::ProgressLedger;
use crate::workouts::types::WorkoutUnit;

/// Maximum XP creditable to a single calendar date.
pub const DAILY_XP_CAP: u32 = 100;

/// XP per unit when a workout/unit pair has no rate table entry.
pub const DEFAULT_XP_RATE: f64 = 0.1;

/// Per-unit XP rates for the built-in catalog, keyed by lowercase name.
const XP_RATES: &[(&str, WorkoutUnit, f64)] = &[
    ("push-ups", WorkoutUnit::Reps, 0.1),
    ("squats", WorkoutUnit::Reps, 0.1),
    ("pull-ups", WorkoutUnit::Reps, 0.15),
    ("lunges", WorkoutUnit::Reps, 0.1),
    ("burpees", WorkoutUnit::Reps, 0.2),
    ("sit-ups", WorkoutUnit::Reps, 0.08),
    ("plank", WorkoutUnit::Seconds, 0.1),
    ("running", WorkoutUnit::Km, 6.0),
    ("cycling", WorkoutUnit::Km, 2.5),
    ("walking", WorkoutUnit::Km, 3.0),
    ("swimming", WorkoutUnit::Km, 10.0),
    ("yoga", WorkoutUnit::Minutes, 0.8),
    ("hiit circuit", WorkoutUnit::Minutes, 1.5),
    ("strength training", WorkoutUnit::Minutes, 1.0),
];

/// XP rate for a workout/unit pair, falling back to [`DEFAULT_XP_RATE`]
/// when the pair is unrecognized.
pub fn rate_per_unit(workout_name: &str, unit: WorkoutUnit) -> f64 {
    XP_RATES
        .iter()
        .find(|(name, rate_unit, _)| *rate_unit == unit && workout_name.eq_ignore_ascii_case(name))
        .map(|(_, _, rate)| *rate)
        .unwrap_or(DEFAULT_XP_RATE)
}

/// Derived XP state: capped per-date ledger plus its sum.
///
/// Invariants after every recompute: each daily value is within
/// `[0, DAILY_XP_CAP]` and `total_xp` equals the sum of the daily values.
/// Weekly and monthly XP are views over the daily map, not stored state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct XpAggregate {
    pub total_xp: u64,
    pub daily_xp: BTreeMap<NaiveDate, u32>,
}

impl XpAggregate {
    /// XP credited to one date; 0 when nothing was logged.
    pub fn daily(&self, date: NaiveDate) -> u32 {
        self.daily_xp.get(&date).copied().unwrap_or(0)
    }

    /// Sum of daily XP over an inclusive date window. Daily values are
    /// already capped; windows are never re-capped.
    pub fn xp_in_window(&self, start: NaiveDate, end: NaiveDate) -> u64 {
        self.daily_xp
            .range(start..=end)
            .map(|(_, &xp)| xp as u64)
            .sum()
    }

    /// XP for the Sunday-start calendar week containing `reference`.
    pub fn weekly_xp(&self, reference: NaiveDate) -> u64 {
        let week = reference.week(Weekday::Sun);
        self.xp_in_window(week.first_day(), week.last_day())
    }

    /// XP for the calendar month containing `reference`.
    pub fn monthly_xp(&self, reference: NaiveDate) -> u64 {
        let (start, end) = month_bounds(reference);
        self.xp_in_window(start, end)
    }
}

/// Recompute the XP aggregate from a full ledger snapshot.
///
/// Only completed records earn XP. Each contributes
/// `floor(value * rate_per_unit)`, accumulated per date, after which every
/// date is clamped to [`DAILY_XP_CAP`]. Pure and idempotent: the same
/// ledger always yields the same aggregate.
pub fn recompute_all(ledger: &ProgressLedger) -> XpAggregate {
    let mut daily_xp: BTreeMap<NaiveDate, u32> = BTreeMap::new();

    for (name, date, record) in ledger.iter() {
        if !record.completed {
            continue;
        }
        let rate = rate_per_unit(name, record.unit);
        let earned = (record.value * rate).floor().max(0.0) as u32;
        let entry = daily_xp.entry(date).or_insert(0);
        *entry = entry.saturating_add(earned);
    }

    for xp in daily_xp.values_mut() {
        *xp = (*xp).min(DAILY_XP_CAP);
    }

    let total_xp = daily_xp.values().map(|&xp| xp as u64).sum();
    XpAggregate { total_xp, daily_xp }
}

fn month_bounds(reference: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = NaiveDate::from_ymd_opt(reference.year(), reference.month(), 1)
        .unwrap_or(reference);
    let next_month = if reference.month() == 12 {
        NaiveDate::from_ymd_opt(reference.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(reference.year(), reference.month() + 1, 1)
    };
    let end = next_month
        .map(|first| first - Duration::days(1))
        .unwrap_or(reference);
    (start, end)
}
