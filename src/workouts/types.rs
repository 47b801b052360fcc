//! Workout catalog types and enums.

use serde::{Deserialize, Serialize};

/// Measurement unit for a workout metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutUnit {
    /// Repetition count
    Reps,
    /// Duration in minutes
    Minutes,
    /// Duration in seconds
    Seconds,
    /// Distance in meters
    Meters,
    /// Distance in kilometers
    Km,
}

impl WorkoutUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutUnit::Reps => "reps",
            WorkoutUnit::Minutes => "minutes",
            WorkoutUnit::Seconds => "seconds",
            WorkoutUnit::Meters => "meters",
            WorkoutUnit::Km => "km",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "reps" => Some(WorkoutUnit::Reps),
            "minutes" => Some(WorkoutUnit::Minutes),
            "seconds" => Some(WorkoutUnit::Seconds),
            "meters" => Some(WorkoutUnit::Meters),
            "km" => Some(WorkoutUnit::Km),
            _ => None,
        }
    }
}

impl std::fmt::Display for WorkoutUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// High-level grouping of catalog workouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutCategory {
    Strength,
    Cardio,
    Core,
    Flexibility,
}

impl WorkoutCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutCategory::Strength => "strength",
            WorkoutCategory::Cardio => "cardio",
            WorkoutCategory::Core => "core",
            WorkoutCategory::Flexibility => "flexibility",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "strength" => Some(WorkoutCategory::Strength),
            "cardio" => Some(WorkoutCategory::Cardio),
            "core" => Some(WorkoutCategory::Core),
            "flexibility" => Some(WorkoutCategory::Flexibility),
            _ => None,
        }
    }
}

/// Immutable catalog template for a daily workout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutDefinition {
    pub name: String,
    pub category: WorkoutCategory,
    pub icon: String,
    /// Label shown next to the metric input, e.g. "Repetitions".
    pub metric_label: String,
    pub unit: WorkoutUnit,
    /// Daily target value; logged values are clamped to this.
    pub default_target: Option<f64>,
}
