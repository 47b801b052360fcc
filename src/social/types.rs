//! Profile and social graph types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

use crate::metrics::calories::DEFAULT_WEIGHT_KG;

/// Location fields attached to a profile.
///
/// `country` and `continent` hold the literal string `"Unknown"` until
/// geocoding resolves them; coordinates are absent until a location fix
/// exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserLocation {
    pub country: String,
    pub continent: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl UserLocation {
    /// Sentinel for an unresolved country or continent.
    pub const UNKNOWN: &'static str = "Unknown";

    pub fn unknown() -> Self {
        Self {
            country: Self::UNKNOWN.to_string(),
            continent: Self::UNKNOWN.to_string(),
            latitude: None,
            longitude: None,
        }
    }

    /// Both coordinates, when a location fix exists.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }
}

impl Default for UserLocation {
    fn default() -> Self {
        Self::unknown()
    }
}

/// Profile document for one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub username: String,
    /// Selected UI theme id; opaque to the engine, carried into ranking
    /// snapshots for display.
    pub theme: String,
    /// Body weight in kilograms, used by the calorie estimator.
    pub weight_kg: f64,
    pub location: UserLocation,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// Create a profile with default values.
    pub fn new(id: Uuid, username: String, now: DateTime<Utc>) -> Self {
        Self {
            id,
            username,
            theme: "classic".to_string(),
            weight_kg: DEFAULT_WEIGHT_KG,
            location: UserLocation::unknown(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Follower and following sets for one user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserSocialState {
    pub followers: BTreeSet<Uuid>,
    pub following: BTreeSet<Uuid>,
}

impl UserSocialState {
    pub fn is_following(&self, user_id: &Uuid) -> bool {
        self.following.contains(user_id)
    }
}
