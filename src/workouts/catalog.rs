//! Built-in workout catalog.
//!
//! Catalog workouts drive the daily checklist: each has a target value the
//! logged amount is clamped to. Free-form "additional" activities are not
//! part of the catalog.

use super::types::{WorkoutCategory, WorkoutDefinition, WorkoutUnit};

/// Lookup over workout definitions, case-insensitive by name.
#[derive(Debug, Clone)]
pub struct WorkoutCatalog {
    definitions: Vec<WorkoutDefinition>,
}

impl WorkoutCatalog {
    /// Catalog with the built-in workout set.
    pub fn builtin() -> Self {
        Self {
            definitions: default_workouts(),
        }
    }

    /// Catalog over an explicit definition list.
    pub fn new(definitions: Vec<WorkoutDefinition>) -> Self {
        Self { definitions }
    }

    /// Find a definition by name.
    pub fn get(&self, name: &str) -> Option<&WorkoutDefinition> {
        self.definitions
            .iter()
            .find(|def| def.name.eq_ignore_ascii_case(name))
    }

    /// All definitions in catalog order.
    pub fn definitions(&self) -> &[WorkoutDefinition] {
        &self.definitions
    }
}

impl Default for WorkoutCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn workout(
    name: &str,
    category: WorkoutCategory,
    icon: &str,
    metric_label: &str,
    unit: WorkoutUnit,
    target: f64,
) -> WorkoutDefinition {
    WorkoutDefinition {
        name: name.to_string(),
        category,
        icon: icon.to_string(),
        metric_label: metric_label.to_string(),
        unit,
        default_target: Some(target),
    }
}

/// Default workout definitions.
pub fn default_workouts() -> Vec<WorkoutDefinition> {
    vec![
        workout(
            "Push-ups",
            WorkoutCategory::Strength,
            "💪",
            "Repetitions",
            WorkoutUnit::Reps,
            30.0,
        ),
        workout(
            "Squats",
            WorkoutCategory::Strength,
            "🏋️",
            "Repetitions",
            WorkoutUnit::Reps,
            40.0,
        ),
        workout(
            "Pull-ups",
            WorkoutCategory::Strength,
            "🤸",
            "Repetitions",
            WorkoutUnit::Reps,
            10.0,
        ),
        workout(
            "Lunges",
            WorkoutCategory::Strength,
            "🦵",
            "Repetitions",
            WorkoutUnit::Reps,
            30.0,
        ),
        workout(
            "Burpees",
            WorkoutCategory::Cardio,
            "🔥",
            "Repetitions",
            WorkoutUnit::Reps,
            20.0,
        ),
        workout(
            "Sit-ups",
            WorkoutCategory::Core,
            "🎯",
            "Repetitions",
            WorkoutUnit::Reps,
            40.0,
        ),
        workout(
            "Plank",
            WorkoutCategory::Core,
            "🧱",
            "Hold time",
            WorkoutUnit::Seconds,
            60.0,
        ),
        workout(
            "Running",
            WorkoutCategory::Cardio,
            "🏃",
            "Distance",
            WorkoutUnit::Km,
            5.0,
        ),
        workout(
            "Cycling",
            WorkoutCategory::Cardio,
            "🚴",
            "Distance",
            WorkoutUnit::Km,
            10.0,
        ),
        workout(
            "Walking",
            WorkoutCategory::Cardio,
            "🚶",
            "Distance",
            WorkoutUnit::Km,
            3.0,
        ),
        workout(
            "Swimming",
            WorkoutCategory::Cardio,
            "🏊",
            "Distance",
            WorkoutUnit::Km,
            1.0,
        ),
        workout(
            "Yoga",
            WorkoutCategory::Flexibility,
            "🧘",
            "Duration",
            WorkoutUnit::Minutes,
            20.0,
        ),
        workout(
            "HIIT Circuit",
            WorkoutCategory::Cardio,
            "⚡",
            "Duration",
            WorkoutUnit::Minutes,
            15.0,
        ),
        workout(
            "Strength Training",
            WorkoutCategory::Strength,
            "🏆",
            "Duration",
            WorkoutUnit::Minutes,
            30.0,
        ),
    ]
}
