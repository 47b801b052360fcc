//! Unit tests for leaderboard ranking behavior.

use std::collections::BTreeSet;

use fitquest::geo::haversine_km;
use fitquest::leaderboards::rankings::{
    RankingEngine, RankingError, RequesterContext, MAX_CANDIDATES, REGIONAL_RADIUS_KM,
};
use fitquest::leaderboards::types::{
    LeaderboardQuery, RankingDimension, RankingSnapshot, TimeWindow,
};
use uuid::Uuid;

fn snapshot(id: u128, name: &str, total_xp: u64, lat: f64, lon: f64) -> RankingSnapshot {
    RankingSnapshot {
        user_id: Uuid::from_u128(id),
        username: name.to_string(),
        theme: "classic".to_string(),
        total_xp,
        daily_xp: (total_xp % 100) as u32,
        weekly_xp: total_xp / 2,
        monthly_xp: total_xp,
        country: "Norway".to_string(),
        continent: "Europe".to_string(),
        latitude: Some(lat),
        longitude: Some(lon),
    }
}

fn oslo_requester(id: u128) -> RequesterContext {
    RequesterContext {
        user_id: Uuid::from_u128(id),
        country: "Norway".to_string(),
        continent: "Europe".to_string(),
        coordinates: Some((59.91, 10.75)),
        following: BTreeSet::new(),
    }
}

#[test]
fn test_haversine_one_degree_longitude() {
    let dist = haversine_km(0.0, 0.0, 0.0, 1.0);
    assert!((dist - 111.19).abs() < 0.1, "got {dist}");
}

#[test]
fn test_regional_excludes_everyone_beyond_radius() {
    // Users scattered around Oslo at growing offsets; some well past the
    // 100 km radius.
    let mut snapshots = Vec::new();
    for i in 0..30u128 {
        let offset = i as f64 * 0.08;
        snapshots.push(snapshot(i + 1, &format!("user{i}"), 100 + i as u64, 59.91 + offset, 10.75));
    }

    let requester = oslo_requester(1);
    let query = LeaderboardQuery::new(RankingDimension::Regional, TimeWindow::Overall);
    let board = RankingEngine::build(snapshots.clone(), &requester, &query).unwrap();

    for entry in &board.entries {
        let original = snapshots
            .iter()
            .find(|s| s.user_id == entry.user_id)
            .unwrap();
        let dist = haversine_km(
            59.91,
            10.75,
            original.latitude.unwrap(),
            original.longitude.unwrap(),
        );
        assert!(
            dist <= REGIONAL_RADIUS_KM,
            "{} is {dist:.1} km away",
            entry.username
        );
    }
    assert!(board.entries.len() < snapshots.len());
}

#[test]
fn test_ranks_are_dense_from_one() {
    let snapshots: Vec<RankingSnapshot> = (0..12u128)
        .map(|i| snapshot(i + 1, &format!("user{i}"), 1_000 - i as u64 * 7, 59.91, 10.75))
        .collect();

    let query = LeaderboardQuery::new(RankingDimension::Global, TimeWindow::Overall);
    let board = RankingEngine::build(snapshots, &oslo_requester(1), &query).unwrap();

    for (index, entry) in board.entries.iter().enumerate() {
        assert_eq!(entry.rank, index as u32 + 1);
    }
}

#[test]
fn test_result_set_caps_at_one_hundred() {
    let snapshots: Vec<RankingSnapshot> = (0..250u128)
        .map(|i| snapshot(i + 1, &format!("user{i}"), i as u64, 59.91, 10.75))
        .collect();

    let query = LeaderboardQuery::new(RankingDimension::Global, TimeWindow::Overall);
    let board = RankingEngine::build(snapshots, &oslo_requester(1), &query).unwrap();

    assert_eq!(board.entries.len(), MAX_CANDIDATES);
    // The cap keeps the highest totals.
    assert_eq!(board.entries[0].total_xp, 249);
    assert_eq!(board.entries.last().unwrap().total_xp, 150);
}

#[test]
fn test_deterministic_order_for_equal_totals() {
    let snapshots: Vec<RankingSnapshot> = (0..20u128)
        .map(|i| snapshot(i + 1, &format!("user{i}"), 500, 59.91, 10.75))
        .collect();

    let query = LeaderboardQuery::new(RankingDimension::Global, TimeWindow::Overall);
    let first = RankingEngine::build(snapshots.clone(), &oslo_requester(1), &query).unwrap();
    let mut shuffled = snapshots;
    shuffled.reverse();
    let second = RankingEngine::build(shuffled, &oslo_requester(1), &query).unwrap();

    let order_a: Vec<Uuid> = first.entries.iter().map(|e| e.user_id).collect();
    let order_b: Vec<Uuid> = second.entries.iter().map(|e| e.user_id).collect();
    assert_eq!(order_a, order_b);
    for pair in order_a.windows(2) {
        assert!(pair[0] < pair[1]);
    }
}

#[test]
fn test_followers_empty_following_never_panics() {
    let query = LeaderboardQuery::new(RankingDimension::Followers, TimeWindow::Daily);
    let result = RankingEngine::build(
        vec![snapshot(2, "someone", 50, 59.91, 10.75)],
        &oslo_requester(1),
        &query,
    );
    assert!(matches!(result, Err(RankingError::NoUsersFound)));
}

#[test]
fn test_display_value_follows_window() {
    let snapshots = vec![snapshot(2, "athlete", 400, 59.91, 10.75)];
    let requester = oslo_requester(1);

    for (window, expected) in [
        (TimeWindow::Overall, 400),
        (TimeWindow::Monthly, 400),
        (TimeWindow::Weekly, 200),
        (TimeWindow::Daily, 0),
    ] {
        let query = LeaderboardQuery::new(RankingDimension::Global, window);
        let board = RankingEngine::build(snapshots.clone(), &requester, &query).unwrap();
        assert_eq!(board.entries[0].xp, expected, "window {window}");
        // Rank is still driven by the overall total.
        assert_eq!(board.entries[0].total_xp, 400);
    }
}
