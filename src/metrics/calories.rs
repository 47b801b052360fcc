//! MET-based calorie estimation.
//!
//! Heuristic constant tables, kept as domain configuration. Estimates are
//! display data only and never feed the XP computation.

use crate::workouts::types::WorkoutUnit;

/// Body weight assumed when the profile carries no usable value.
pub const DEFAULT_WEIGHT_KG: f64 = 70.0;

const LOW_MARKERS: &[&str] = &["low", "slow", "light", "gentle", "beginner"];
const HIGH_MARKERS: &[&str] = &["high", "fast", "intense", "power", "advanced"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IntensityBand {
    Low,
    Moderate,
    High,
}

fn intensity_band(intensity: Option<&str>) -> IntensityBand {
    let Some(raw) = intensity else {
        return IntensityBand::Moderate;
    };
    let lower = raw.to_lowercase();
    if LOW_MARKERS.iter().any(|marker| lower.contains(marker)) {
        IntensityBand::Low
    } else if HIGH_MARKERS.iter().any(|marker| lower.contains(marker)) {
        IntensityBand::High
    } else {
        IntensityBand::Moderate
    }
}

fn intensity_multiplier(band: IntensityBand) -> f64 {
    match band {
        IntensityBand::Low => 0.8,
        IntensityBand::Moderate => 1.0,
        IntensityBand::High => 1.2,
    }
}

/// MET value by substring match on the workout name.
fn met_for(workout_name: &str, band: IntensityBand) -> f64 {
    let name = workout_name.to_lowercase();
    let banded = |low: f64, moderate: f64, high: f64| match band {
        IntensityBand::Low => low,
        IntensityBand::Moderate => moderate,
        IntensityBand::High => high,
    };

    if name.contains("run") || name.contains("jog") {
        banded(7.0, 9.8, 12.0)
    } else if name.contains("cycl") || name.contains("bike") || name.contains("spin") {
        banded(4.0, 6.8, 10.0)
    } else if name.contains("walk") {
        banded(2.5, 3.5, 4.0)
    } else if name.contains("swim") {
        banded(5.0, 6.0, 8.0)
    } else if name.contains("yoga") || name.contains("pilates") {
        2.5
    } else if name.contains("circuit") || name.contains("hiit") {
        6.0
    } else if name.contains("strength") || name.contains("weight") {
        3.5
    } else {
        3.0
    }
}

fn per_km_factor(workout_name: &str) -> f64 {
    let name = workout_name.to_lowercase();
    if name.contains("run") || name.contains("jog") {
        1.0
    } else if name.contains("cycl") || name.contains("bike") {
        0.5
    } else if name.contains("walk") {
        0.6
    } else if name.contains("swim") {
        2.0
    } else {
        0.8
    }
}

fn rep_factor(workout_name: &str) -> f64 {
    let name = workout_name.to_lowercase();
    if name.contains("push") {
        0.1
    } else if name.contains("pull") {
        0.15
    } else if name.contains("squat") {
        0.15
    } else if name.contains("burpee") {
        0.3
    } else if name.contains("lunge") {
        0.1
    } else {
        0.12
    }
}

/// Estimate calories burned for a logged workout, rounded to the nearest
/// integer.
///
/// `weight_kg` falls back to [`DEFAULT_WEIGHT_KG`] when non-finite or not
/// positive. Intensity selects both the MET band and a 0.8/1.0/1.2
/// multiplier by substring match against a fixed vocabulary.
pub fn estimate_calories(
    workout_name: &str,
    value: f64,
    unit: WorkoutUnit,
    intensity: Option<&str>,
    weight_kg: f64,
) -> u32 {
    let weight = if weight_kg.is_finite() && weight_kg > 0.0 {
        weight_kg
    } else {
        DEFAULT_WEIGHT_KG
    };
    let band = intensity_band(intensity);
    let multiplier = intensity_multiplier(band);

    let calories = match unit {
        WorkoutUnit::Minutes => met_for(workout_name, band) * weight * (value / 60.0) * multiplier,
        WorkoutUnit::Km => weight * per_km_factor(workout_name) * value * multiplier,
        WorkoutUnit::Reps => rep_factor(workout_name) * (1.0 + weight / 100.0) * value * multiplier,
        WorkoutUnit::Meters => 0.06 * (1.0 + weight / 100.0) * value * multiplier,
        WorkoutUnit::Seconds => (weight / 70.0) * 0.05 * value * multiplier,
    };

    calories.round().max(0.0) as u32
}
