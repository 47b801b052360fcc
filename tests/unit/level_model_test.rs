//! Unit tests for the level model.

use fitquest::progression::levels::{level_of, LEVEL_THRESHOLDS, MAX_LEVEL};

/// Every total maps to a level whose floor it has reached but whose
/// ceiling it has not.
#[test]
fn test_level_bounds_property() {
    for total in (0..40_000u64).step_by(113) {
        let progress = level_of(total);
        let level = progress.level as usize;

        assert!(level >= 1 && level <= MAX_LEVEL as usize);
        assert!(LEVEL_THRESHOLDS[level - 1] <= total);
        if level < LEVEL_THRESHOLDS.len() {
            assert!(total < LEVEL_THRESHOLDS[level]);
            assert_eq!(
                progress.xp_for_next_level,
                LEVEL_THRESHOLDS[level] - LEVEL_THRESHOLDS[level - 1]
            );
        }
    }
}

#[test]
fn test_level_is_monotonic_in_xp() {
    let mut last_level = 0;
    for total in 0..30_000u64 {
        let level = level_of(total).level;
        assert!(level >= last_level, "level dropped at {total} XP");
        last_level = level;
    }
}

#[test]
fn test_every_threshold_starts_its_level() {
    for (index, &threshold) in LEVEL_THRESHOLDS.iter().enumerate() {
        let progress = level_of(threshold);
        assert_eq!(progress.level as usize, index + 1);
        assert_eq!(progress.current_level_xp, 0);
    }
}

#[test]
fn test_max_level_has_no_next() {
    let top = level_of(u64::MAX);
    assert_eq!(top.level, MAX_LEVEL);
    assert_eq!(top.current_level_xp, 0);
    assert_eq!(top.xp_for_next_level, 0);
}
