//! Unit tests for calorie estimation.

use fitquest::metrics::calories::{estimate_calories, DEFAULT_WEIGHT_KG};
use fitquest::workouts::types::WorkoutUnit;

#[test]
fn test_each_unit_has_a_formula() {
    // None of the unit paths should collapse to zero for ordinary input.
    let cases = [
        ("Running", 30.0, WorkoutUnit::Minutes),
        ("Running", 5.0, WorkoutUnit::Km),
        ("Push-ups", 30.0, WorkoutUnit::Reps),
        ("Rowing", 500.0, WorkoutUnit::Meters),
        ("Plank", 60.0, WorkoutUnit::Seconds),
    ];
    for (name, value, unit) in cases {
        let calories = estimate_calories(name, value, unit, None, 70.0);
        assert!(calories > 0, "{name} {unit} estimated 0");
    }
}

#[test]
fn test_intensity_vocabulary() {
    let base = estimate_calories("Cycling", 60.0, WorkoutUnit::Minutes, None, 80.0);
    for marker in ["low", "slow", "light", "gentle", "beginner"] {
        let estimate = estimate_calories("Cycling", 60.0, WorkoutUnit::Minutes, Some(marker), 80.0);
        assert!(estimate < base, "{marker} should lower the estimate");
    }
    for marker in ["high", "fast", "intense", "power", "advanced"] {
        let estimate = estimate_calories("Cycling", 60.0, WorkoutUnit::Minutes, Some(marker), 80.0);
        assert!(estimate > base, "{marker} should raise the estimate");
    }
}

#[test]
fn test_intensity_matches_inside_longer_phrases() {
    let gentle = estimate_calories("Yoga", 30.0, WorkoutUnit::Minutes, Some("Gentle flow"), 70.0);
    let plain = estimate_calories("Yoga", 30.0, WorkoutUnit::Minutes, None, 70.0);
    assert!(gentle < plain);
}

#[test]
fn test_heavier_users_burn_more() {
    let light = estimate_calories("Running", 5.0, WorkoutUnit::Km, None, 55.0);
    let heavy = estimate_calories("Running", 5.0, WorkoutUnit::Km, None, 95.0);
    assert!(heavy > light);
}

#[test]
fn test_default_weight_fallback() {
    let explicit = estimate_calories("Running", 5.0, WorkoutUnit::Km, None, DEFAULT_WEIGHT_KG);
    assert_eq!(
        estimate_calories("Running", 5.0, WorkoutUnit::Km, None, f64::NAN),
        explicit
    );
    assert_eq!(
        estimate_calories("Running", 5.0, WorkoutUnit::Km, None, -10.0),
        explicit
    );
}

#[test]
fn test_result_is_rounded_not_truncated() {
    // 0.12 * (1 + 0.7) * 13 = 2.652 -> 3
    assert_eq!(
        estimate_calories("Mystery Sport", 13.0, WorkoutUnit::Reps, None, 70.0),
        3
    );
}
