//! Progress store: the per-user workout ledger.

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::progress::types::{ProgressLedger, ProgressRecord};
use crate::storage::database::DatabaseError;
use crate::workouts::types::WorkoutUnit;

/// Store for progress records, keyed by user id.
pub struct ProgressStore<'a> {
    conn: &'a Connection,
}

impl<'a> ProgressStore<'a> {
    /// Create a new progress store with the given connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Load the whole ledger for a user.
    pub fn load_ledger(&self, user_id: &Uuid) -> Result<ProgressLedger, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT workout_name, date, value, completed, timestamp, unit,
                    intensity, calories, is_additional
             FROM progress_records WHERE user_id = ?1",
        )?;

        let rows = stmt.query_map(params![user_id.to_string()], |row| {
            let name: String = row.get(0)?;
            let date_str: String = row.get(1)?;
            let timestamp_str: String = row.get(4)?;
            let unit_str: String = row.get(5)?;
            let calories: Option<i64> = row.get(7)?;

            let record = ProgressRecord {
                value: row.get(2)?,
                completed: row.get(3)?,
                timestamp: DateTime::parse_from_rfc3339(&timestamp_str)
                    .map(|t| t.with_timezone(&Utc))
                    .unwrap_or_else(|_| Utc::now()),
                unit: WorkoutUnit::from_str(&unit_str).unwrap_or(WorkoutUnit::Reps),
                intensity: row.get(6)?,
                calories: calories.map(|c| c.max(0) as u32),
                is_additional: row.get(8)?,
            };
            Ok((name, date_str, record))
        })?;

        let mut ledger = ProgressLedger::new();
        for row in rows {
            let (name, date_str, record) = row?;
            if let Ok(date) = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d") {
                ledger.upsert(&name, date, record);
            }
        }
        Ok(ledger)
    }

    /// Insert or overwrite the record for one (workout, date) key.
    pub fn upsert_record(
        &self,
        user_id: &Uuid,
        workout_name: &str,
        date: NaiveDate,
        record: &ProgressRecord,
    ) -> Result<(), DatabaseError> {
        self.conn.execute(
            "INSERT INTO progress_records
             (user_id, workout_name, date, value, completed, timestamp, unit,
              intensity, calories, is_additional)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
             ON CONFLICT(user_id, workout_name, date) DO UPDATE SET
               value = excluded.value,
               completed = excluded.completed,
               timestamp = excluded.timestamp,
               unit = excluded.unit,
               intensity = excluded.intensity,
               calories = excluded.calories,
               is_additional = excluded.is_additional",
            params![
                user_id.to_string(),
                workout_name,
                date.to_string(),
                record.value,
                record.completed,
                record.timestamp.to_rfc3339(),
                record.unit.as_str(),
                record.intensity,
                record.calories.map(|c| c as i64),
                record.is_additional,
            ],
        )?;
        Ok(())
    }

    /// Delete the record for one (workout, date) key. Returns false when
    /// no such record existed.
    pub fn delete_record(
        &self,
        user_id: &Uuid,
        workout_name: &str,
        date: NaiveDate,
    ) -> Result<bool, DatabaseError> {
        let deleted = self.conn.execute(
            "DELETE FROM progress_records
             WHERE user_id = ?1 AND workout_name = ?2 AND date = ?3",
            params![user_id.to_string(), workout_name, date.to_string()],
        )?;
        Ok(deleted > 0)
    }

    /// Delete a batch of (workout, date) keys, as produced by the ledger's
    /// stale sweep. Returns the number of rows removed.
    pub fn delete_records(
        &self,
        user_id: &Uuid,
        keys: &[(String, NaiveDate)],
    ) -> Result<usize, DatabaseError> {
        let mut removed = 0;
        for (workout_name, date) in keys {
            if self.delete_record(user_id, workout_name, *date)? {
                removed += 1;
            }
        }
        Ok(removed)
    }
}
