//! SQL schema for the pointbook SQLite store.
//!
//! Executed once at connection startup; idempotent thanks to
//! `CREATE TABLE IF NOT EXISTS`. The version is recorded in
//! `PRAGMA user_version`.

pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS games (
    game_id     TEXT PRIMARY KEY,
    event       TEXT NOT NULL,
    game_date   TEXT NOT NULL,   -- YYYY-MM-DD
    opponent    TEXT NOT NULL,
    footage_url TEXT,
    created_at  TEXT NOT NULL    -- RFC 3339 UTC; server-assigned
);

CREATE TABLE IF NOT EXISTS squad (
    player_id   TEXT PRIMARY KEY,
    player_name TEXT NOT NULL,
    created_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS points (
    point_id                      TEXT PRIMARY KEY,
    game_id                       TEXT NOT NULL REFERENCES games(game_id) ON DELETE CASCADE,
    point_number                  INTEGER NOT NULL,
    point_video_url               TEXT,
    point_timestamp               TEXT,            -- free-form, as typed
    offense_or_defense            TEXT NOT NULL,   -- 'Offense' | 'Defense'
    offense_initiation            TEXT,
    offense_initiation_successful INTEGER NOT NULL DEFAULT 0,
    defense_initiation            TEXT,
    defense_initiation_successful INTEGER NOT NULL DEFAULT 0,
    offense_main_strategy         TEXT,
    defense_main_strategy         TEXT,
    turns                         INTEGER NOT NULL DEFAULT 0,
    won_point                     INTEGER NOT NULL,
    notes                         TEXT,
    recorded_at                   TEXT NOT NULL,
    UNIQUE (game_id, point_number)
);

-- Lineup for a point; `slot` keeps the order players were picked in.
CREATE TABLE IF NOT EXISTS point_players (
    point_id  TEXT NOT NULL REFERENCES points(point_id) ON DELETE CASCADE,
    player_id TEXT NOT NULL REFERENCES squad(player_id) ON DELETE CASCADE,
    slot      INTEGER NOT NULL,
    PRIMARY KEY (point_id, player_id)
);

CREATE INDEX IF NOT EXISTS points_game_idx         ON points(game_id);
CREATE INDEX IF NOT EXISTS point_players_player_idx ON point_players(player_id);

PRAGMA user_version = 1;
";
