//! Validation and construction of progress records.

use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;

use super::types::{ProgressLedger, ProgressRecord};
use crate::workouts::types::WorkoutUnit;

/// Request to log one workout entry.
#[derive(Debug, Clone)]
pub struct LogRequest {
    pub workout_name: String,
    pub date: NaiveDate,
    /// Raw value as entered by the user.
    pub value: f64,
    pub unit: WorkoutUnit,
    /// Free-form logged activity rather than a catalog daily workout.
    pub is_additional: bool,
    /// Target for catalog entries; resolved from the catalog when absent.
    pub target_value: Option<f64>,
    pub intensity: Option<String>,
}

impl LogRequest {
    /// Request for a catalog workout; the target is resolved later.
    pub fn catalog(workout_name: &str, date: NaiveDate, value: f64, unit: WorkoutUnit) -> Self {
        Self {
            workout_name: workout_name.to_string(),
            date,
            value,
            unit,
            is_additional: false,
            target_value: None,
            intensity: None,
        }
    }

    /// Request for a free-form additional activity.
    pub fn additional(workout_name: &str, date: NaiveDate, value: f64, unit: WorkoutUnit) -> Self {
        Self {
            workout_name: workout_name.to_string(),
            date,
            value,
            unit,
            is_additional: true,
            target_value: None,
            intensity: None,
        }
    }

    pub fn with_intensity(mut self, intensity: &str) -> Self {
        self.intensity = Some(intensity.to_string());
        self
    }

    pub fn with_target(mut self, target: f64) -> Self {
        self.target_value = Some(target);
        self
    }
}

/// Progress validation errors. Raised before any ledger write, so a
/// rejected request leaves no partial state behind.
#[derive(Debug, Error)]
pub enum ProgressError {
    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Validate a log request and build the record that would be stored.
///
/// Catalog entries clamp the value to the target and derive completion
/// from it; additional entries are complete by definition and must carry a
/// positive value.
pub fn build_record(
    request: &LogRequest,
    now: DateTime<Utc>,
) -> Result<ProgressRecord, ProgressError> {
    if !request.value.is_finite() {
        return Err(ProgressError::ValidationError(format!(
            "value for '{}' is not a number",
            request.workout_name
        )));
    }

    if request.is_additional {
        if request.value <= 0.0 {
            return Err(ProgressError::ValidationError(format!(
                "logged value for '{}' must be positive",
                request.workout_name
            )));
        }
        return Ok(ProgressRecord {
            value: request.value,
            completed: true,
            timestamp: now,
            unit: request.unit,
            intensity: request.intensity.clone(),
            calories: None,
            is_additional: true,
        });
    }

    let target = request.target_value.ok_or_else(|| {
        ProgressError::ValidationError(format!(
            "'{}' is not a catalog workout and no target was given",
            request.workout_name
        ))
    })?;

    let value = request.value.min(target);
    Ok(ProgressRecord {
        value,
        completed: value >= target,
        timestamp: now,
        unit: request.unit,
        intensity: request.intensity.clone(),
        calories: None,
        is_additional: false,
    })
}

/// Validate a request and write the resulting record into the ledger.
/// Overwrites any existing record for the same (name, date) key.
pub fn record_progress(
    ledger: &mut ProgressLedger,
    request: &LogRequest,
    now: DateTime<Utc>,
) -> Result<ProgressRecord, ProgressError> {
    let record = build_record(request, now)?;
    ledger.upsert(&request.workout_name, request.date, record.clone());
    Ok(record)
}
