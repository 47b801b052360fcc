//! End-to-end tests for leaderboard builds over persisted snapshots.

use std::sync::Arc;

use chrono::{NaiveDate, TimeZone, Utc};
use uuid::Uuid;

use fitquest::engine::{EngineError, ProgressEngine, SessionContext};
use fitquest::leaderboards::rankings::RankingError;
use fitquest::leaderboards::types::{LeaderboardQuery, RankingDimension, TimeWindow};
use fitquest::progress::ledger::LogRequest;
use fitquest::social::types::UserProfile;
use fitquest::storage::database::Database;
use fitquest::workouts::types::WorkoutUnit;

struct Fixture {
    engine: ProgressEngine,
    today: NaiveDate,
    now: chrono::DateTime<Utc>,
}

impl Fixture {
    fn new() -> Self {
        Self {
            engine: ProgressEngine::new(Arc::new(Database::open_in_memory().unwrap())),
            today: NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
            now: Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap(),
        }
    }

    fn session(&self, user_id: Uuid) -> SessionContext {
        SessionContext::new(user_id, self.today, self.now)
    }

    /// Create a user with a profile, then earn XP by running `km_per_day`
    /// kilometers on each of the given days of March 2026.
    fn user(
        &self,
        username: &str,
        country: &str,
        continent: &str,
        coords: Option<(f64, f64)>,
        km_per_day: f64,
        days: &[u32],
    ) -> Uuid {
        let id = Uuid::new_v4();
        let session = self.session(id);

        let mut profile = UserProfile::new(id, username.to_string(), self.now);
        profile.location.country = country.to_string();
        profile.location.continent = continent.to_string();
        profile.location.latitude = coords.map(|(lat, _)| lat);
        profile.location.longitude = coords.map(|(_, lon)| lon);
        self.engine.save_profile(&session, &profile).unwrap();

        for &day in days {
            let date = NaiveDate::from_ymd_opt(2026, 3, day).unwrap();
            let request =
                LogRequest::catalog("Running", date, km_per_day, WorkoutUnit::Km).with_target(km_per_day);
            self.engine.log_workout(&session, request).unwrap();
        }
        id
    }
}

const OSLO: (f64, f64) = (59.9139, 10.7522);
const BERGEN: (f64, f64) = (60.3913, 5.3221);
const DRAMMEN: (f64, f64) = (59.7439, 10.2045);
const SYDNEY: (f64, f64) = (-33.8688, 151.2093);

#[test]
fn test_global_board_ranks_by_total_xp() {
    let f = Fixture::new();
    // 5 km/day -> 30 XP/day.
    let strong = f.user("strong", "Norway", "Europe", Some(OSLO), 5.0, &[8, 9, 10]);
    let middle = f.user("middle", "Sweden", "Europe", None, 5.0, &[9, 10]);
    let weak = f.user("weak", "Australia", "Oceania", Some(SYDNEY), 5.0, &[10]);

    let session = f.session(strong);
    let query = LeaderboardQuery::new(RankingDimension::Global, TimeWindow::Overall);
    let board = f.engine.leaderboard(&session, &query).unwrap();

    let ids: Vec<Uuid> = board.entries.iter().map(|e| e.user_id).collect();
    assert_eq!(ids, vec![strong, middle, weak]);
    assert_eq!(board.entries[0].xp, 90);
    assert_eq!(
        board.requester_entry.as_ref().map(|e| e.rank),
        Some(1)
    );
}

#[test]
fn test_daily_window_displays_daily_xp_without_resorting() {
    let f = Fixture::new();
    // "veteran" has more total XP but logged nothing today; "rookie"
    // earned 30 today.
    let veteran = f.user("veteran", "Norway", "Europe", None, 5.0, &[1, 2, 3]);
    let rookie = f.user("rookie", "Norway", "Europe", None, 5.0, &[10]);

    let session = f.session(rookie);
    let query = LeaderboardQuery::new(RankingDimension::Global, TimeWindow::Daily);
    let board = f.engine.leaderboard(&session, &query).unwrap();

    // Sort key stays total XP, so the veteran leads with 0 displayed.
    assert_eq!(board.entries[0].user_id, veteran);
    assert_eq!(board.entries[0].xp, 0);
    assert_eq!(board.entries[1].user_id, rookie);
    assert_eq!(board.entries[1].xp, 30);
}

#[test]
fn test_country_board_filters_by_exact_match() {
    let f = Fixture::new();
    let kari = f.user("kari", "Norway", "Europe", None, 5.0, &[10]);
    f.user("sven", "Sweden", "Europe", None, 5.0, &[9, 10]);

    let session = f.session(kari);
    let query = LeaderboardQuery::new(RankingDimension::Country, TimeWindow::Overall);
    let board = f.engine.leaderboard(&session, &query).unwrap();

    assert_eq!(board.entries.len(), 1);
    assert_eq!(board.entries[0].user_id, kari);
}

#[test]
fn test_continental_board_with_unknown_location_fails() {
    let f = Fixture::new();
    let lost = f.user("lost", "Unknown", "Unknown", None, 5.0, &[10]);

    let session = f.session(lost);
    let query = LeaderboardQuery::new(RankingDimension::Continental, TimeWindow::Overall);
    let result = f.engine.leaderboard(&session, &query);

    assert!(matches!(
        result,
        Err(EngineError::Ranking(RankingError::LocationUnavailable(_)))
    ));
}

#[test]
fn test_regional_board_keeps_neighbors_only() {
    let f = Fixture::new();
    let oslo = f.user("oslo", "Norway", "Europe", Some(OSLO), 5.0, &[10]);
    let drammen = f.user("drammen", "Norway", "Europe", Some(DRAMMEN), 5.0, &[9, 10]);
    // Bergen is ~300 km from Oslo, Sydney is on the other side of the
    // planet, and one user has no fix at all.
    f.user("bergen", "Norway", "Europe", Some(BERGEN), 5.0, &[8, 9, 10]);
    f.user("sydney", "Australia", "Oceania", Some(SYDNEY), 5.0, &[10]);
    f.user("nofix", "Norway", "Europe", None, 5.0, &[10]);

    let session = f.session(oslo);
    let query = LeaderboardQuery::new(RankingDimension::Regional, TimeWindow::Overall);
    let board = f.engine.leaderboard(&session, &query).unwrap();

    let names: Vec<&str> = board.entries.iter().map(|e| e.username.as_str()).collect();
    assert_eq!(names, vec!["drammen", "oslo"]);
    assert_eq!(board.entries[0].rank, 1);
    assert_eq!(board.entries[1].rank, 2);
}

#[test]
fn test_followers_board_follows_the_graph() {
    let f = Fixture::new();
    let me = f.user("me", "Norway", "Europe", None, 5.0, &[10]);
    let friend = f.user("friend", "Norway", "Europe", None, 5.0, &[9, 10]);
    f.user("stranger", "Norway", "Europe", None, 5.0, &[8, 9, 10]);

    let session = f.session(me);
    let query = LeaderboardQuery::new(RankingDimension::Followers, TimeWindow::Overall);

    // Nobody followed yet.
    assert!(matches!(
        f.engine.leaderboard(&session, &query),
        Err(EngineError::Ranking(RankingError::NoUsersFound))
    ));

    assert!(f.engine.follow(&session, &friend).unwrap());
    let board = f.engine.leaderboard(&session, &query).unwrap();
    assert_eq!(board.entries.len(), 1);
    assert_eq!(board.entries[0].user_id, friend);
    assert!(board.entries[0].is_followed);

    assert!(f.engine.unfollow(&session, &friend).unwrap());
    assert!(matches!(
        f.engine.leaderboard(&session, &query),
        Err(EngineError::Ranking(RankingError::NoUsersFound))
    ));
}

#[test]
fn test_follow_state_marks_global_entries() {
    let f = Fixture::new();
    let me = f.user("me", "Norway", "Europe", None, 5.0, &[10]);
    let friend = f.user("friend", "Norway", "Europe", None, 5.0, &[9, 10]);

    let session = f.session(me);
    f.engine.follow(&session, &friend).unwrap();
    // Self-follows are ignored.
    assert!(!f.engine.follow(&session, &me).unwrap());

    let query = LeaderboardQuery::new(RankingDimension::Global, TimeWindow::Overall);
    let board = f.engine.leaderboard(&session, &query).unwrap();

    for entry in &board.entries {
        if entry.user_id == friend {
            assert!(entry.is_followed);
        }
        if entry.user_id == me {
            assert!(entry.is_current_user);
            assert!(!entry.is_followed);
        }
    }

    let social = f.engine.social_state(&session).unwrap();
    assert!(social.is_following(&friend));
    assert_eq!(social.followers.len(), 0);
}

#[test]
fn test_snapshot_refresh_follows_profile_updates() {
    let f = Fixture::new();
    let id = f.user("old-name", "Norway", "Europe", None, 5.0, &[10]);
    let session = f.session(id);

    let mut profile = UserProfile::new(id, "new-name".to_string(), f.now);
    profile.location.country = "Norway".to_string();
    profile.location.continent = "Europe".to_string();
    f.engine.save_profile(&session, &profile).unwrap();

    let query = LeaderboardQuery::new(RankingDimension::Global, TimeWindow::Overall);
    let board = f.engine.leaderboard(&session, &query).unwrap();

    assert_eq!(board.entries[0].username, "new-name");
    // XP earned before the rename is still reflected.
    assert_eq!(board.entries[0].total_xp, 30);
}
