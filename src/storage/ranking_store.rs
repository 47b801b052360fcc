//! Ranking snapshot store.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use crate::leaderboards::types::RankingSnapshot;
use crate::storage::database::DatabaseError;

/// Store for denormalized ranking snapshots, keyed by user id.
pub struct RankingStore<'a> {
    conn: &'a Connection,
}

impl<'a> RankingStore<'a> {
    /// Create a new ranking store with the given connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Insert or replace the snapshot for a user.
    pub fn upsert(
        &self,
        snapshot: &RankingSnapshot,
        now: DateTime<Utc>,
    ) -> Result<(), DatabaseError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO ranking_snapshots
             (user_id, username, theme, total_xp, daily_xp, weekly_xp, monthly_xp,
              country, continent, latitude, longitude, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                snapshot.user_id.to_string(),
                snapshot.username,
                snapshot.theme,
                snapshot.total_xp as i64,
                snapshot.daily_xp as i64,
                snapshot.weekly_xp as i64,
                snapshot.monthly_xp as i64,
                snapshot.country,
                snapshot.continent,
                snapshot.latitude,
                snapshot.longitude,
                now.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Get the snapshot for one user.
    pub fn get(&self, user_id: &Uuid) -> Result<Option<RankingSnapshot>, DatabaseError> {
        self.conn
            .query_row(
                "SELECT user_id, username, theme, total_xp, daily_xp, weekly_xp,
                        monthly_xp, country, continent, latitude, longitude
                 FROM ranking_snapshots WHERE user_id = ?1",
                params![user_id.to_string()],
                parse_snapshot_row,
            )
            .optional()
            .map_err(DatabaseError::from)
    }

    /// Load every snapshot in the store.
    pub fn load_all(&self) -> Result<Vec<RankingSnapshot>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT user_id, username, theme, total_xp, daily_xp, weekly_xp,
                    monthly_xp, country, continent, latitude, longitude
             FROM ranking_snapshots",
        )?;

        let rows = stmt.query_map([], parse_snapshot_row)?;
        rows.collect::<Result<Vec<_>, _>>()
            .map_err(DatabaseError::from)
    }
}

/// Parse a database row into a RankingSnapshot.
fn parse_snapshot_row(row: &rusqlite::Row) -> rusqlite::Result<RankingSnapshot> {
    let id_str: String = row.get(0)?;
    let total_xp: i64 = row.get(3)?;
    let daily_xp: i64 = row.get(4)?;
    let weekly_xp: i64 = row.get(5)?;
    let monthly_xp: i64 = row.get(6)?;

    Ok(RankingSnapshot {
        user_id: Uuid::parse_str(&id_str).unwrap_or_default(),
        username: row.get(1)?,
        theme: row.get(2)?,
        total_xp: total_xp.max(0) as u64,
        daily_xp: daily_xp.clamp(0, i64::from(u32::MAX)) as u32,
        weekly_xp: weekly_xp.max(0) as u64,
        monthly_xp: monthly_xp.max(0) as u64,
        country: row.get(7)?,
        continent: row.get(8)?,
        latitude: row.get(9)?,
        longitude: row.get(10)?,
    })
}
