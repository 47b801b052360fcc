//! Engine orchestration.
//!
//! Ties the ledger, aggregator, stores and ranking engine together:
//! every ledger mutation triggers a full XP recompute, and the aggregate
//! plus the user's ranking snapshot are persisted only when the recompute
//! actually changed them.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::leaderboards::rankings::{RankingEngine, RankingError, RequesterContext};
use crate::leaderboards::types::{Leaderboard, LeaderboardQuery, RankingSnapshot};
use crate::metrics::calories;
use crate::progress::ledger::{self, LogRequest, ProgressError};
use crate::progress::types::ProgressRecord;
use crate::progress::xp::{self, XpAggregate, DAILY_XP_CAP};
use crate::progression::levels::{self, LevelProgress};
use crate::social::types::{UserProfile, UserSocialState};
use crate::storage::config::AppConfig;
use crate::storage::database::{Database, DatabaseError};
use crate::storage::profile_store::ProfileStore;
use crate::storage::progress_store::ProgressStore;
use crate::storage::ranking_store::RankingStore;
use crate::workouts::catalog::WorkoutCatalog;

/// Explicit per-call session values. The engine reads no ambient state:
/// the acting user, the calendar date and the mutation instant all come
/// from the caller.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub user_id: Uuid,
    /// The session's local calendar date.
    pub today: NaiveDate,
    /// Instant stamped on mutations.
    pub now: DateTime<Utc>,
}

impl SessionContext {
    pub fn new(user_id: Uuid, today: NaiveDate, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            today,
            now,
        }
    }
}

/// Result of logging one workout.
#[derive(Debug, Clone)]
pub struct RecordOutcome {
    /// The record as stored, after clamping and calorie estimation.
    pub record: ProgressRecord,
    /// XP credited to the record's date by this mutation.
    pub xp_gained: u32,
    /// XP on the record's date after the recompute.
    pub daily_xp: u32,
    /// The record's date sits at the daily cap. A signal for user
    /// feedback, not an error; the record itself is stored either way.
    pub cap_reached: bool,
    pub total_xp: u64,
    pub level: LevelProgress,
}

/// Engine errors.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("{0}")]
    Progress(#[from] ProgressError),

    #[error("{0}")]
    Ranking(#[from] RankingError),

    #[error("Persistence failure: {0}")]
    Store(#[from] DatabaseError),
}

/// Orchestrates ledger mutations, XP recomputes and snapshot refreshes.
pub struct ProgressEngine {
    db: Arc<Database>,
    catalog: WorkoutCatalog,
}

impl ProgressEngine {
    /// Create an engine over an open database, with the built-in catalog.
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            db,
            catalog: WorkoutCatalog::builtin(),
        }
    }

    /// Create an engine with an explicit workout catalog.
    pub fn with_catalog(db: Arc<Database>, catalog: WorkoutCatalog) -> Self {
        Self { db, catalog }
    }

    /// Open the engine over the database named by the configuration.
    pub fn open(config: &AppConfig) -> Result<Self, EngineError> {
        let db = Database::open(&config.database_path())?;
        Ok(Self::new(Arc::new(db)))
    }

    /// The active workout catalog.
    pub fn catalog(&self) -> &WorkoutCatalog {
        &self.catalog
    }

    /// Log or edit a workout entry.
    ///
    /// Validation happens before any write; a rejected request leaves
    /// ledger and aggregate untouched. On success the full aggregate is
    /// recomputed from the updated ledger and persisted together with a
    /// fresh ranking snapshot, unless the recompute produced the value
    /// already stored.
    pub fn log_workout(
        &self,
        session: &SessionContext,
        mut request: LogRequest,
    ) -> Result<RecordOutcome, EngineError> {
        let conn = self.db.connection();
        let profiles = ProfileStore::new(conn);
        let progress = ProgressStore::new(conn);

        // Catalog entries take their target from the catalog unless the
        // caller supplied one explicitly.
        if !request.is_additional && request.target_value.is_none() {
            request.target_value = self
                .catalog
                .get(&request.workout_name)
                .and_then(|def| def.default_target);
        }

        let profile = profiles.get_or_create_profile(&session.user_id, session.now)?;
        let mut record = ledger::build_record(&request, session.now)?;
        record.calories = Some(calories::estimate_calories(
            &request.workout_name,
            record.value,
            record.unit,
            record.intensity.as_deref(),
            profile.weight_kg,
        ));

        let previous = profiles.read_aggregate(&session.user_id)?;
        let mut ledger_state = progress.load_ledger(&session.user_id)?;

        progress.upsert_record(&session.user_id, &request.workout_name, request.date, &record)?;
        ledger_state.upsert(&request.workout_name, request.date, record.clone());

        let aggregate = xp::recompute_all(&ledger_state);
        self.persist_if_changed(session, &profile, &previous, &aggregate)?;

        let daily_xp = aggregate.daily(request.date);
        let xp_gained = daily_xp.saturating_sub(previous.daily(request.date));
        if daily_xp >= DAILY_XP_CAP {
            tracing::debug!(user = %session.user_id, date = %request.date, "daily XP cap reached");
        }

        Ok(RecordOutcome {
            record,
            xp_gained,
            daily_xp,
            cap_reached: daily_xp >= DAILY_XP_CAP,
            total_xp: aggregate.total_xp,
            level: levels::level_of(aggregate.total_xp),
        })
    }

    /// Delete a workout entry and recompute.
    pub fn remove_workout(
        &self,
        session: &SessionContext,
        workout_name: &str,
        date: NaiveDate,
    ) -> Result<XpAggregate, EngineError> {
        let conn = self.db.connection();
        let profiles = ProfileStore::new(conn);
        let progress = ProgressStore::new(conn);

        let profile = profiles.get_or_create_profile(&session.user_id, session.now)?;
        let previous = profiles.read_aggregate(&session.user_id)?;
        let mut ledger_state = progress.load_ledger(&session.user_id)?;

        progress.delete_record(&session.user_id, workout_name, date)?;
        ledger_state.remove(workout_name, date);

        let aggregate = xp::recompute_all(&ledger_state);
        self.persist_if_changed(session, &profile, &previous, &aggregate)?;
        Ok(aggregate)
    }

    /// Session-start sweep: purge abandoned records older than yesterday,
    /// then recompute. Idempotent; the recompute only persists when the
    /// sweep changed something that mattered.
    pub fn cleanup_session_start(&self, session: &SessionContext) -> Result<usize, EngineError> {
        let conn = self.db.connection();
        let profiles = ProfileStore::new(conn);
        let progress = ProgressStore::new(conn);

        let profile = profiles.get_or_create_profile(&session.user_id, session.now)?;
        let previous = profiles.read_aggregate(&session.user_id)?;
        let mut ledger_state = progress.load_ledger(&session.user_id)?;

        let removed = ledger_state.cleanup_stale(session.today);
        if !removed.is_empty() {
            progress.delete_records(&session.user_id, &removed)?;
            tracing::info!(user = %session.user_id, count = removed.len(), "purged stale progress records");
        }

        let aggregate = xp::recompute_all(&ledger_state);
        self.persist_if_changed(session, &profile, &previous, &aggregate)?;
        Ok(removed.len())
    }

    /// Whether a catalog workout already has an entry for today.
    /// Additional activities never count.
    pub fn is_logged_today(
        &self,
        session: &SessionContext,
        workout_name: &str,
    ) -> Result<bool, EngineError> {
        let progress = ProgressStore::new(self.db.connection());
        let ledger_state = progress.load_ledger(&session.user_id)?;
        Ok(ledger_state.has_catalog_entry(workout_name, session.today))
    }

    /// Level position for the stored aggregate.
    pub fn level_progress(&self, session: &SessionContext) -> Result<LevelProgress, EngineError> {
        let profiles = ProfileStore::new(self.db.connection());
        let aggregate = profiles.read_aggregate(&session.user_id)?;
        Ok(levels::level_of(aggregate.total_xp))
    }

    /// Insert or update a profile document and refresh the user's ranking
    /// snapshot so display fields stay in sync.
    pub fn save_profile(
        &self,
        session: &SessionContext,
        profile: &UserProfile,
    ) -> Result<(), EngineError> {
        let conn = self.db.connection();
        let profiles = ProfileStore::new(conn);

        profiles.upsert_profile(profile)?;
        let aggregate = profiles.read_aggregate(&profile.id)?;
        let snapshot = Self::snapshot_from(profile, &aggregate, session.today);
        RankingStore::new(conn).upsert(&snapshot, session.now)?;
        Ok(())
    }

    /// Follow another user. Self-follows are ignored.
    pub fn follow(&self, session: &SessionContext, target: &Uuid) -> Result<bool, EngineError> {
        if *target == session.user_id {
            return Ok(false);
        }
        let profiles = ProfileStore::new(self.db.connection());
        Ok(profiles.follow(&session.user_id, target, session.now)?)
    }

    /// Unfollow another user.
    pub fn unfollow(&self, session: &SessionContext, target: &Uuid) -> Result<bool, EngineError> {
        let profiles = ProfileStore::new(self.db.connection());
        Ok(profiles.unfollow(&session.user_id, target)?)
    }

    /// Follower/following sets for the session user.
    pub fn social_state(&self, session: &SessionContext) -> Result<UserSocialState, EngineError> {
        let profiles = ProfileStore::new(self.db.connection());
        Ok(profiles.social_state(&session.user_id)?)
    }

    /// Build a leaderboard view for the session user.
    pub fn leaderboard(
        &self,
        session: &SessionContext,
        query: &LeaderboardQuery,
    ) -> Result<Leaderboard, EngineError> {
        let conn = self.db.connection();
        let profiles = ProfileStore::new(conn);

        let profile = profiles.get_or_create_profile(&session.user_id, session.now)?;
        let social = profiles.social_state(&session.user_id)?;
        let snapshots = RankingStore::new(conn).load_all()?;

        let requester = RequesterContext {
            user_id: session.user_id,
            country: profile.location.country.clone(),
            continent: profile.location.continent.clone(),
            coordinates: profile.location.coordinates(),
            following: social.following,
        };

        RankingEngine::build(snapshots, &requester, query).map_err(EngineError::from)
    }

    /// Persist the aggregate and refresh the ranking snapshot, skipping
    /// both writes when the recompute matched the stored aggregate. The
    /// computation itself always runs; only redundant writes are avoided.
    fn persist_if_changed(
        &self,
        session: &SessionContext,
        profile: &UserProfile,
        previous: &XpAggregate,
        aggregate: &XpAggregate,
    ) -> Result<(), DatabaseError> {
        if aggregate == previous {
            tracing::debug!(user = %session.user_id, "aggregate unchanged, skipping write");
            return Ok(());
        }

        let conn = self.db.connection();
        ProfileStore::new(conn).write_aggregate(&session.user_id, aggregate, session.now)?;

        let snapshot = Self::snapshot_from(profile, aggregate, session.today);
        RankingStore::new(conn).upsert(&snapshot, session.now)?;

        tracing::info!(
            user = %session.user_id,
            total_xp = aggregate.total_xp,
            "persisted XP aggregate and ranking snapshot"
        );
        Ok(())
    }

    /// Project a profile and aggregate into a ranking snapshot for the
    /// given date.
    fn snapshot_from(
        profile: &UserProfile,
        aggregate: &XpAggregate,
        today: NaiveDate,
    ) -> RankingSnapshot {
        RankingSnapshot {
            user_id: profile.id,
            username: profile.username.clone(),
            theme: profile.theme.clone(),
            total_xp: aggregate.total_xp,
            daily_xp: aggregate.daily(today),
            weekly_xp: aggregate.weekly_xp(today),
            monthly_xp: aggregate.monthly_xp(today),
            country: profile.location.country.clone(),
            continent: profile.location.continent.clone(),
            latitude: profile.location.latitude,
            longitude: profile.location.longitude,
        }
    }
}
