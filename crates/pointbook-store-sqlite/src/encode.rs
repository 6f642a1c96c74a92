//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, calendar dates as `YYYY-MM-DD`.
//! UUIDs are stored as hyphenated lowercase strings.

use chrono::{DateTime, NaiveDate, Utc};
use pointbook_core::{
  game::Game,
  point::{Point, PointDetails, Side},
  squad::Player,
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── NaiveDate ────────────────────────────────────────────────────────────────

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn encode_date(d: NaiveDate) -> String { d.format(DATE_FORMAT).to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, DATE_FORMAT)
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Side ─────────────────────────────────────────────────────────────────────

pub fn encode_side(side: Side) -> String { side.to_string() }

pub fn decode_side(s: &str) -> Result<Side> { Ok(Side::parse(s)?) }

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `games` row.
pub struct RawGame {
  pub game_id:     String,
  pub event:       String,
  pub game_date:   String,
  pub opponent:    String,
  pub footage_url: Option<String>,
  pub created_at:  String,
}

impl RawGame {
  pub fn into_game(self) -> Result<Game> {
    Ok(Game {
      game_id:     decode_uuid(&self.game_id)?,
      event:       self.event,
      game_date:   decode_date(&self.game_date)?,
      opponent:    self.opponent,
      footage_url: self.footage_url,
      created_at:  decode_dt(&self.created_at)?,
    })
  }
}

/// Raw strings read directly from a `squad` row.
pub struct RawPlayer {
  pub player_id:   String,
  pub player_name: String,
  pub created_at:  String,
}

impl RawPlayer {
  pub fn into_player(self) -> Result<Player> {
    Ok(Player {
      player_id:   decode_uuid(&self.player_id)?,
      player_name: self.player_name,
      created_at:  decode_dt(&self.created_at)?,
    })
  }
}

/// A `points` row plus its lineup from `point_players`, in slot order.
pub struct RawPoint {
  pub point_id:                      String,
  pub game_id:                       String,
  pub point_number:                  u32,
  pub point_video_url:               Option<String>,
  pub point_timestamp:               Option<String>,
  pub offense_or_defense:            String,
  pub offense_initiation:            Option<String>,
  pub offense_initiation_successful: bool,
  pub defense_initiation:            Option<String>,
  pub defense_initiation_successful: bool,
  pub offense_main_strategy:         Option<String>,
  pub defense_main_strategy:         Option<String>,
  pub turns:                         u32,
  pub won_point:                     bool,
  pub notes:                         Option<String>,
  pub recorded_at:                   String,
  pub players:                       Vec<String>,
}

impl RawPoint {
  pub fn into_point(self) -> Result<Point> {
    let players = self
      .players
      .iter()
      .map(|p| decode_uuid(p))
      .collect::<Result<Vec<_>>>()?;

    Ok(Point {
      point_id:     decode_uuid(&self.point_id)?,
      game_id:      decode_uuid(&self.game_id)?,
      point_number: self.point_number,
      details:      PointDetails {
        point_video_url: self.point_video_url,
        point_timestamp: self.point_timestamp,
        side: decode_side(&self.offense_or_defense)?,
        offense_initiation: self.offense_initiation,
        offense_initiation_successful: self.offense_initiation_successful,
        defense_initiation: self.defense_initiation,
        defense_initiation_successful: self.defense_initiation_successful,
        offense_main_strategy: self.offense_main_strategy,
        defense_main_strategy: self.defense_main_strategy,
        turns: self.turns,
        won_point: self.won_point,
        notes: self.notes,
        players,
      },
      recorded_at:  decode_dt(&self.recorded_at)?,
    })
  }
}
