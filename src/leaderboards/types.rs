//! Leaderboard types and enums.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Population scope of a leaderboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingDimension {
    /// Every user with a ranking snapshot
    Global,
    /// Users on the requester's (or a selected) continent
    Continental,
    /// Users in the requester's (or a selected) country
    Country,
    /// Users within 100 km of the requester's location fix
    Regional,
    /// Users the requester follows
    Followers,
}

impl RankingDimension {
    pub fn as_str(&self) -> &'static str {
        match self {
            RankingDimension::Global => "global",
            RankingDimension::Continental => "continental",
            RankingDimension::Country => "country",
            RankingDimension::Regional => "regional",
            RankingDimension::Followers => "followers",
        }
    }
}

impl std::fmt::Display for RankingDimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// XP field displayed next to each ranked user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeWindow {
    #[default]
    Overall,
    Monthly,
    Weekly,
    Daily,
}

impl TimeWindow {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeWindow::Overall => "overall",
            TimeWindow::Monthly => "monthly",
            TimeWindow::Weekly => "weekly",
            TimeWindow::Daily => "daily",
        }
    }
}

impl std::fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Denormalized per-user projection consumed only by the ranking engine.
/// Refreshed after every XP recompute so leaderboard builds never join
/// against the progress store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingSnapshot {
    pub user_id: Uuid,
    pub username: String,
    pub theme: String,
    pub total_xp: u64,
    /// XP for the day the snapshot was refreshed.
    pub daily_xp: u32,
    pub weekly_xp: u64,
    pub monthly_xp: u64,
    pub country: String,
    pub continent: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl RankingSnapshot {
    /// Both coordinates, when the user has a location fix.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }

    /// The XP value displayed for a time window. The sort key is always
    /// `total_xp` regardless of the window.
    pub fn display_xp(&self, window: TimeWindow) -> u64 {
        match window {
            TimeWindow::Overall => self.total_xp,
            TimeWindow::Monthly => self.monthly_xp,
            TimeWindow::Weekly => self.weekly_xp,
            TimeWindow::Daily => self.daily_xp as u64,
        }
    }
}

/// One ranked leaderboard row.
#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardEntry {
    /// Dense rank, starting at 1.
    pub rank: u32,
    pub user_id: Uuid,
    pub username: String,
    pub theme: String,
    /// Displayed XP for the requested time window.
    pub xp: u64,
    pub total_xp: u64,
    pub is_current_user: bool,
    pub is_followed: bool,
}

/// A built leaderboard view.
#[derive(Debug, Clone)]
pub struct Leaderboard {
    pub dimension: RankingDimension,
    pub window: TimeWindow,
    pub entries: Vec<LeaderboardEntry>,
    /// The requester's own row, when present in the view.
    pub requester_entry: Option<LeaderboardEntry>,
}

/// Parameters for one leaderboard build.
#[derive(Debug, Clone)]
pub struct LeaderboardQuery {
    pub dimension: RankingDimension,
    pub window: TimeWindow,
    /// Explicit country selection overriding the requester's own.
    pub selected_country: Option<String>,
    /// Explicit continent selection overriding the requester's own.
    pub selected_continent: Option<String>,
}

impl LeaderboardQuery {
    pub fn new(dimension: RankingDimension, window: TimeWindow) -> Self {
        Self {
            dimension,
            window,
            selected_country: None,
            selected_continent: None,
        }
    }
}
