//! Profile store: user documents, XP aggregate writeback, follow graph.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use crate::progress::xp::XpAggregate;
use crate::social::types::{UserLocation, UserProfile, UserSocialState};
use crate::storage::database::DatabaseError;

/// Store for profile documents, keyed by user id.
pub struct ProfileStore<'a> {
    conn: &'a Connection,
}

impl<'a> ProfileStore<'a> {
    /// Create a new profile store with the given connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Insert or update a profile document. The XP aggregate columns are
    /// left untouched; they are owned by [`Self::write_aggregate`].
    pub fn upsert_profile(&self, profile: &UserProfile) -> Result<(), DatabaseError> {
        self.conn.execute(
            "INSERT INTO profiles
             (id, username, theme, weight_kg, country, continent, latitude, longitude,
              created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
             ON CONFLICT(id) DO UPDATE SET
               username = excluded.username,
               theme = excluded.theme,
               weight_kg = excluded.weight_kg,
               country = excluded.country,
               continent = excluded.continent,
               latitude = excluded.latitude,
               longitude = excluded.longitude,
               updated_at = excluded.updated_at",
            params![
                profile.id.to_string(),
                profile.username,
                profile.theme,
                profile.weight_kg,
                profile.location.country,
                profile.location.continent,
                profile.location.latitude,
                profile.location.longitude,
                profile.created_at.to_rfc3339(),
                profile.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Get a profile by user id.
    pub fn get_profile(&self, user_id: &Uuid) -> Result<Option<UserProfile>, DatabaseError> {
        self.conn
            .query_row(
                "SELECT id, username, theme, weight_kg, country, continent,
                        latitude, longitude, created_at, updated_at
                 FROM profiles WHERE id = ?1",
                params![user_id.to_string()],
                parse_profile_row,
            )
            .optional()
            .map_err(DatabaseError::from)
    }

    /// Get the profile for a user, creating a default one when absent.
    pub fn get_or_create_profile(
        &self,
        user_id: &Uuid,
        now: DateTime<Utc>,
    ) -> Result<UserProfile, DatabaseError> {
        if let Some(profile) = self.get_profile(user_id)? {
            return Ok(profile);
        }

        let id_str = user_id.to_string();
        let profile = UserProfile::new(*user_id, format!("athlete-{}", &id_str[..8]), now);
        self.upsert_profile(&profile)?;
        tracing::debug!(user = %user_id, "created default profile");
        Ok(profile)
    }

    /// Read the stored XP aggregate for a user. A missing profile row
    /// reads as an empty aggregate.
    pub fn read_aggregate(&self, user_id: &Uuid) -> Result<XpAggregate, DatabaseError> {
        let row: Option<(i64, String)> = self
            .conn
            .query_row(
                "SELECT total_xp, daily_xp FROM profiles WHERE id = ?1",
                params![user_id.to_string()],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        let Some((total_xp, daily_json)) = row else {
            return Ok(XpAggregate::default());
        };

        let daily_xp = serde_json::from_str(&daily_json)?;
        Ok(XpAggregate {
            total_xp: total_xp.max(0) as u64,
            daily_xp,
        })
    }

    /// Write back the `{total_xp, daily_xp}` aggregate after a recompute.
    pub fn write_aggregate(
        &self,
        user_id: &Uuid,
        aggregate: &XpAggregate,
        now: DateTime<Utc>,
    ) -> Result<(), DatabaseError> {
        let daily_json = serde_json::to_string(&aggregate.daily_xp)?;
        let updated = self.conn.execute(
            "UPDATE profiles SET total_xp = ?1, daily_xp = ?2, updated_at = ?3 WHERE id = ?4",
            params![
                aggregate.total_xp as i64,
                daily_json,
                now.to_rfc3339(),
                user_id.to_string()
            ],
        )?;

        if updated == 0 {
            return Err(DatabaseError::QueryFailed(format!(
                "no profile row for user {user_id}"
            )));
        }
        Ok(())
    }

    // ========== Follow graph ==========

    /// Record that `follower` follows `followed`. Returns false when the
    /// edge already existed.
    pub fn follow(
        &self,
        follower: &Uuid,
        followed: &Uuid,
        now: DateTime<Utc>,
    ) -> Result<bool, DatabaseError> {
        let inserted = self.conn.execute(
            "INSERT OR IGNORE INTO follows (follower_id, followed_id, created_at)
             VALUES (?1, ?2, ?3)",
            params![follower.to_string(), followed.to_string(), now.to_rfc3339()],
        )?;
        Ok(inserted > 0)
    }

    /// Remove a follow edge. Returns false when it did not exist.
    pub fn unfollow(&self, follower: &Uuid, followed: &Uuid) -> Result<bool, DatabaseError> {
        let deleted = self.conn.execute(
            "DELETE FROM follows WHERE follower_id = ?1 AND followed_id = ?2",
            params![follower.to_string(), followed.to_string()],
        )?;
        Ok(deleted > 0)
    }

    /// Whether `follower` currently follows `followed`.
    pub fn is_following(&self, follower: &Uuid, followed: &Uuid) -> Result<bool, DatabaseError> {
        let exists: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM follows WHERE follower_id = ?1 AND followed_id = ?2)",
            params![follower.to_string(), followed.to_string()],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    /// Assemble the follower/following sets for a user.
    pub fn social_state(&self, user_id: &Uuid) -> Result<UserSocialState, DatabaseError> {
        let mut state = UserSocialState::default();
        let id = user_id.to_string();

        let mut stmt = self
            .conn
            .prepare("SELECT follower_id FROM follows WHERE followed_id = ?1")?;
        let follower_rows = stmt.query_map(params![id], |row| row.get::<_, String>(0))?;
        for row in follower_rows {
            if let Ok(follower) = Uuid::parse_str(&row?) {
                state.followers.insert(follower);
            }
        }

        let mut stmt = self
            .conn
            .prepare("SELECT followed_id FROM follows WHERE follower_id = ?1")?;
        let following_rows = stmt.query_map(params![id], |row| row.get::<_, String>(0))?;
        for row in following_rows {
            if let Ok(followed) = Uuid::parse_str(&row?) {
                state.following.insert(followed);
            }
        }

        Ok(state)
    }
}

/// Parse a database row into a UserProfile.
fn parse_profile_row(row: &rusqlite::Row) -> rusqlite::Result<UserProfile> {
    let id_str: String = row.get(0)?;
    let created_at_str: String = row.get(8)?;
    let updated_at_str: String = row.get(9)?;

    Ok(UserProfile {
        id: Uuid::parse_str(&id_str).unwrap_or_default(),
        username: row.get(1)?,
        theme: row.get(2)?,
        weight_kg: row.get(3)?,
        location: UserLocation {
            country: row.get(4)?,
            continent: row.get(5)?,
            latitude: row.get(6)?,
            longitude: row.get(7)?,
        },
        created_at: DateTime::parse_from_rfc3339(&created_at_str)
            .map(|t| t.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now()),
        updated_at: DateTime::parse_from_rfc3339(&updated_at_str)
            .map(|t| t.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now()),
    })
}
