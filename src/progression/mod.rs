//! Level progression over cumulative XP.

pub mod levels;

pub use levels::{level_of, LevelProgress, LEVEL_THRESHOLDS, MAX_LEVEL};
