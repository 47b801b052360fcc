//! Leaderboard construction over ranking snapshots.

pub mod rankings;
pub mod types;

pub use rankings::{RankingEngine, RankingError, RequesterContext};
pub use types::{
    Leaderboard, LeaderboardEntry, LeaderboardQuery, RankingDimension, RankingSnapshot, TimeWindow,
};
