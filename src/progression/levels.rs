//! Threshold-table level model.

use serde::{Deserialize, Serialize};

/// Cumulative XP floor of each level. `LEVEL_THRESHOLDS[k]` is the floor of
/// level `k + 1`; the table is strictly increasing and starts at 0, so every
/// XP total maps to exactly one level.
pub const LEVEL_THRESHOLDS: &[u64] = &[
    0, 100, 250, 500, 1_000, 1_750, 2_750, 4_000, 5_500, 7_500, 10_000, 13_000, 16_500, 20_500,
    25_000,
];

/// Highest reachable level.
pub const MAX_LEVEL: u32 = LEVEL_THRESHOLDS.len() as u32;

/// Position within the level curve for a cumulative XP total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelProgress {
    /// Current level, 1-indexed.
    pub level: u32,
    /// XP earned past the current level's floor.
    pub current_level_xp: u64,
    /// XP span of the current level; 0 at max level.
    pub xp_for_next_level: u64,
}

impl LevelProgress {
    /// Fraction of the way through the current level, 1.0 at max level.
    pub fn progress_fraction(&self) -> f32 {
        if self.xp_for_next_level == 0 {
            1.0
        } else {
            self.current_level_xp as f32 / self.xp_for_next_level as f32
        }
    }
}

/// Map a cumulative XP total to its level position.
///
/// Total for all inputs: 0 XP is level 1, and totals at or past the last
/// threshold clamp to the max level with no further progress to report.
pub fn level_of(total_xp: u64) -> LevelProgress {
    let mut level = 1usize;
    for (index, &threshold) in LEVEL_THRESHOLDS.iter().enumerate() {
        if total_xp >= threshold {
            level = index + 1;
        } else {
            break;
        }
    }

    if level >= LEVEL_THRESHOLDS.len() {
        return LevelProgress {
            level: level as u32,
            current_level_xp: 0,
            xp_for_next_level: 0,
        };
    }

    let floor = LEVEL_THRESHOLDS[level - 1];
    LevelProgress {
        level: level as u32,
        current_level_xp: total_xp - floor,
        xp_for_next_level: LEVEL_THRESHOLDS[level] - floor,
    }
}
