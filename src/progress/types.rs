//! Progress records and the per-user ledger.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::workouts::types::WorkoutUnit;

/// One logged workout entry for a workout name and date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressRecord {
    /// Logged amount, clamped to the target for catalog entries.
    pub value: f64,
    /// Whether the entry counts for XP. Always true for additional entries.
    pub completed: bool,
    /// Creation or last-update instant.
    pub timestamp: DateTime<Utc>,
    pub unit: WorkoutUnit,
    pub intensity: Option<String>,
    /// Estimated energy expenditure; display data only.
    pub calories: Option<u32>,
    /// Free-form logged activity rather than a catalog daily workout.
    pub is_additional: bool,
}

/// Per-user store of progress records keyed by (workout name, date).
///
/// Both map levels are ordered, so iteration yields a deterministic
/// sequence of `(name, date, record)` triples.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressLedger {
    entries: BTreeMap<String, BTreeMap<NaiveDate, ProgressRecord>>,
}

impl ProgressLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the record for a (name, date) key. Last write
    /// wins; there is no merging of fields.
    pub fn upsert(&mut self, name: &str, date: NaiveDate, record: ProgressRecord) {
        self.entries
            .entry(name.to_string())
            .or_default()
            .insert(date, record);
    }

    /// Remove the record for a (name, date) key, pruning the workout name
    /// entry when no dates remain under it.
    pub fn remove(&mut self, name: &str, date: NaiveDate) -> Option<ProgressRecord> {
        let dates = self.entries.get_mut(name)?;
        let removed = dates.remove(&date);
        if dates.is_empty() {
            self.entries.remove(name);
        }
        removed
    }

    pub fn get(&self, name: &str, date: NaiveDate) -> Option<&ProgressRecord> {
        self.entries.get(name)?.get(&date)
    }

    /// Number of records across all workouts and dates.
    pub fn len(&self) -> usize {
        self.entries.values().map(|dates| dates.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All records as ordered `(name, date, record)` triples.
    pub fn iter(&self) -> impl Iterator<Item = (&str, NaiveDate, &ProgressRecord)> {
        self.entries.iter().flat_map(|(name, dates)| {
            dates
                .iter()
                .map(move |(date, record)| (name.as_str(), *date, record))
        })
    }

    /// Whether a catalog (non-additional) record exists for this name and
    /// date. Additional activities never satisfy this check, so logging one
    /// does not block the catalog workout for the day.
    pub fn has_catalog_entry(&self, name: &str, date: NaiveDate) -> bool {
        self.get(name, date)
            .map(|record| !record.is_additional)
            .unwrap_or(false)
    }

    /// Remove abandoned records older than yesterday.
    ///
    /// A record is stale when its date is strictly before `as_of - 1 day`
    /// and it carries no progress (`value == 0` and not completed). All
    /// other past records are kept permanently. Returns the removed keys so
    /// the backing store can delete the same entries.
    pub fn cleanup_stale(&mut self, as_of: NaiveDate) -> Vec<(String, NaiveDate)> {
        let cutoff = as_of - Duration::days(1);
        let mut removed = Vec::new();

        for (name, dates) in &mut self.entries {
            dates.retain(|date, record| {
                let stale = *date < cutoff && record.value == 0.0 && !record.completed;
                if stale {
                    removed.push((name.clone(), *date));
                }
                !stale
            });
        }
        self.entries.retain(|_, dates| !dates.is_empty());

        removed
    }
}
