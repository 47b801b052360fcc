//! Database schema definitions.

/// Current schema version.
pub const CURRENT_VERSION: i32 = 1;

/// Schema version tracking table.
pub const SCHEMA_VERSION_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY,
    applied_at TEXT NOT NULL
);
"#;

/// Initial schema.
pub const SCHEMA: &str = r#"
-- Profile store: one document per user, including the XP aggregate
-- written back after every recompute.
CREATE TABLE IF NOT EXISTS profiles (
    id TEXT PRIMARY KEY,
    username TEXT NOT NULL,
    theme TEXT NOT NULL DEFAULT 'classic',
    weight_kg REAL NOT NULL DEFAULT 70.0,
    country TEXT NOT NULL DEFAULT 'Unknown',
    continent TEXT NOT NULL DEFAULT 'Unknown',
    latitude REAL,
    longitude REAL,
    total_xp INTEGER NOT NULL DEFAULT 0,
    daily_xp TEXT NOT NULL DEFAULT '{}',
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

-- Follow graph edges.
CREATE TABLE IF NOT EXISTS follows (
    follower_id TEXT NOT NULL,
    followed_id TEXT NOT NULL,
    created_at TEXT NOT NULL,
    PRIMARY KEY (follower_id, followed_id)
);

CREATE INDEX IF NOT EXISTS idx_follows_followed ON follows(followed_id);

-- Progress store: one row per (user, workout, date).
CREATE TABLE IF NOT EXISTS progress_records (
    user_id TEXT NOT NULL,
    workout_name TEXT NOT NULL,
    date TEXT NOT NULL,
    value REAL NOT NULL,
    completed INTEGER NOT NULL,
    timestamp TEXT NOT NULL,
    unit TEXT NOT NULL,
    intensity TEXT,
    calories INTEGER,
    is_additional INTEGER NOT NULL DEFAULT 0,
    PRIMARY KEY (user_id, workout_name, date)
);

CREATE INDEX IF NOT EXISTS idx_progress_user ON progress_records(user_id);

-- Ranking snapshot store: denormalized projection per user, refreshed
-- after every recompute.
CREATE TABLE IF NOT EXISTS ranking_snapshots (
    user_id TEXT PRIMARY KEY,
    username TEXT NOT NULL,
    theme TEXT NOT NULL,
    total_xp INTEGER NOT NULL,
    daily_xp INTEGER NOT NULL,
    weekly_xp INTEGER NOT NULL,
    monthly_xp INTEGER NOT NULL,
    country TEXT NOT NULL,
    continent TEXT NOT NULL,
    latitude REAL,
    longitude REAL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_snapshots_total_xp ON ranking_snapshots(total_xp DESC);
"#;
