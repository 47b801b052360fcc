//! Ranking engine: deterministic leaderboard builds.

use std::collections::BTreeSet;

use thiserror::Error;
use uuid::Uuid;

use super::types::{
    Leaderboard, LeaderboardEntry, LeaderboardQuery, RankingDimension, RankingSnapshot,
};
use crate::geo;
use crate::social::types::UserLocation;

/// Maximum candidates retained per build, applied before any post-filter.
pub const MAX_CANDIDATES: usize = 100;

/// Radius of the regional dimension in kilometers.
pub const REGIONAL_RADIUS_KM: f64 = 100.0;

/// The requesting user's view of the world at query time.
#[derive(Debug, Clone)]
pub struct RequesterContext {
    pub user_id: Uuid,
    pub country: String,
    pub continent: String,
    /// Latest location fix, if any.
    pub coordinates: Option<(f64, f64)>,
    /// Ids the requester follows.
    pub following: BTreeSet<Uuid>,
}

/// Leaderboard build errors.
#[derive(Debug, Error)]
pub enum RankingError {
    #[error("No resolvable location for the {0} leaderboard")]
    LocationUnavailable(RankingDimension),

    #[error("No users found for this leaderboard")]
    NoUsersFound,
}

/// Builds ranked leaderboard views from denormalized snapshots.
pub struct RankingEngine;

impl RankingEngine {
    /// Build a leaderboard for one query.
    ///
    /// Ranks always come from `total_xp` descending with ties broken by
    /// ascending user id; the requested time window only selects the
    /// displayed XP field, so ranks may not follow the displayed values
    /// for non-overall windows. Candidates are capped at
    /// [`MAX_CANDIDATES`] after sorting, then the regional dimension
    /// drops candidates beyond [`REGIONAL_RADIUS_KM`] and the survivors
    /// are re-ranked densely from 1.
    pub fn build(
        snapshots: Vec<RankingSnapshot>,
        requester: &RequesterContext,
        query: &LeaderboardQuery,
    ) -> Result<Leaderboard, RankingError> {
        let mut candidates = Self::select_candidates(snapshots, requester, query)?;

        candidates.sort_by(|a, b| {
            b.total_xp
                .cmp(&a.total_xp)
                .then_with(|| a.user_id.cmp(&b.user_id))
        });
        candidates.truncate(MAX_CANDIDATES);

        if query.dimension == RankingDimension::Regional {
            let (lat, lon) = requester
                .coordinates
                .ok_or(RankingError::LocationUnavailable(RankingDimension::Regional))?;
            candidates.retain(|snapshot| {
                snapshot
                    .coordinates()
                    .map(|(s_lat, s_lon)| {
                        geo::haversine_km(lat, lon, s_lat, s_lon) <= REGIONAL_RADIUS_KM
                    })
                    .unwrap_or(false)
            });
        }

        if candidates.is_empty() {
            return Err(RankingError::NoUsersFound);
        }

        let entries: Vec<LeaderboardEntry> = candidates
            .into_iter()
            .enumerate()
            .map(|(index, snapshot)| LeaderboardEntry {
                rank: index as u32 + 1,
                xp: snapshot.display_xp(query.window),
                total_xp: snapshot.total_xp,
                is_current_user: snapshot.user_id == requester.user_id,
                is_followed: requester.following.contains(&snapshot.user_id),
                user_id: snapshot.user_id,
                username: snapshot.username,
                theme: snapshot.theme,
            })
            .collect();

        let requester_entry = entries.iter().find(|entry| entry.is_current_user).cloned();

        Ok(Leaderboard {
            dimension: query.dimension,
            window: query.window,
            entries,
            requester_entry,
        })
    }

    /// Candidate selection per dimension, before sorting and capping.
    fn select_candidates(
        snapshots: Vec<RankingSnapshot>,
        requester: &RequesterContext,
        query: &LeaderboardQuery,
    ) -> Result<Vec<RankingSnapshot>, RankingError> {
        match query.dimension {
            RankingDimension::Global => Ok(snapshots),

            RankingDimension::Continental => {
                let continent = query
                    .selected_continent
                    .clone()
                    .unwrap_or_else(|| requester.continent.clone());
                if is_unresolved(&continent) {
                    return Err(RankingError::LocationUnavailable(
                        RankingDimension::Continental,
                    ));
                }
                Ok(snapshots
                    .into_iter()
                    .filter(|snapshot| snapshot.continent == continent)
                    .collect())
            }

            RankingDimension::Country => {
                let country = query
                    .selected_country
                    .clone()
                    .unwrap_or_else(|| requester.country.clone());
                if is_unresolved(&country) {
                    return Err(RankingError::LocationUnavailable(RankingDimension::Country));
                }
                Ok(snapshots
                    .into_iter()
                    .filter(|snapshot| snapshot.country == country)
                    .collect())
            }

            RankingDimension::Regional => {
                if requester.coordinates.is_none() {
                    return Err(RankingError::LocationUnavailable(RankingDimension::Regional));
                }
                Ok(snapshots
                    .into_iter()
                    .filter(|snapshot| snapshot.coordinates().is_some())
                    .collect())
            }

            RankingDimension::Followers => {
                if requester.following.is_empty() {
                    return Err(RankingError::NoUsersFound);
                }
                Ok(snapshots
                    .into_iter()
                    .filter(|snapshot| requester.following.contains(&snapshot.user_id))
                    .collect())
            }
        }
    }
}

fn is_unresolved(value: &str) -> bool {
    value.is_empty() || value == UserLocation::UNKNOWN
}
