//! Points: a single possession within a game and the tactics around it.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

use crate::{Error, Result, game::non_blank, score::Outcome};

/// Number of lineup slots on the point entry form.
pub const MAX_POINT_PLAYERS: usize = 7;

// ─── Side ────────────────────────────────────────────────────────────────────

/// Whether the team started the point with the disc.
#[derive(
  Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
pub enum Side {
  #[default]
  Offense,
  Defense,
}

impl Side {
  pub fn parse(s: &str) -> Result<Self> {
    s.parse().map_err(|_| Error::UnknownSide(s.to_owned()))
  }
}

// ─── PointDetails ────────────────────────────────────────────────────────────

/// The editable part of a point. Free-text tactical labels are open strings;
/// suggestions come from [`crate::store::TrackerStore::strategy_suggestions`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointDetails {
  /// Overrides the game's footage when each point is its own video.
  pub point_video_url:               Option<String>,
  /// Free-form `SS`, `MM:SS` or `HH:MM:SS`, as typed.
  pub point_timestamp:               Option<String>,
  #[serde(rename = "offense_or_defense")]
  pub side:                          Side,
  pub offense_initiation:            Option<String>,
  pub offense_initiation_successful: bool,
  pub defense_initiation:            Option<String>,
  pub defense_initiation_successful: bool,
  pub offense_main_strategy:         Option<String>,
  pub defense_main_strategy:         Option<String>,
  /// Turnovers during the point.
  pub turns:                         u32,
  pub won_point:                     bool,
  pub notes:                         Option<String>,
  /// Squad ids on the field, in slot order.
  pub players:                       Vec<Uuid>,
}

impl PointDetails {
  /// Blank strings become `None`, nil player ids (empty slots) and repeated
  /// ids are dropped. Fails if more than [`MAX_POINT_PLAYERS`] remain.
  pub fn normalized(self) -> Result<Self> {
    let mut seen = HashSet::new();
    let players: Vec<Uuid> = self
      .players
      .into_iter()
      .filter(|id| !id.is_nil() && seen.insert(*id))
      .collect();

    if players.len() > MAX_POINT_PLAYERS {
      return Err(Error::TooManyPlayers {
        max: MAX_POINT_PLAYERS,
        got: players.len(),
      });
    }

    Ok(Self {
      point_video_url: non_blank(self.point_video_url),
      point_timestamp: non_blank(self.point_timestamp),
      side: self.side,
      offense_initiation: non_blank(self.offense_initiation),
      offense_initiation_successful: self.offense_initiation_successful,
      defense_initiation: non_blank(self.defense_initiation),
      defense_initiation_successful: self.defense_initiation_successful,
      offense_main_strategy: non_blank(self.offense_main_strategy),
      defense_main_strategy: non_blank(self.defense_main_strategy),
      turns: self.turns,
      won_point: self.won_point,
      notes: non_blank(self.notes),
      players,
    })
  }
}

// ─── Point ───────────────────────────────────────────────────────────────────

/// A persisted point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
  pub point_id:     Uuid,
  pub game_id:      Uuid,
  /// 1-based position within the game; unique per game.
  pub point_number: u32,
  #[serde(flatten)]
  pub details:      PointDetails,
  /// Server-assigned timestamp.
  pub recorded_at:  DateTime<Utc>,
}

impl Point {
  /// The initiation play for the side the team was on.
  pub fn initiation(&self) -> Option<&str> {
    match self.details.side {
      Side::Offense => self.details.offense_initiation.as_deref(),
      Side::Defense => self.details.defense_initiation.as_deref(),
    }
  }

  /// The main strategy for the side the team was on.
  pub fn main_strategy(&self) -> Option<&str> {
    match self.details.side {
      Side::Offense => self.details.offense_main_strategy.as_deref(),
      Side::Defense => self.details.defense_main_strategy.as_deref(),
    }
  }
}

impl Outcome for Point {
  fn sequence_number(&self) -> u32 { self.point_number }

  fn won_by_team(&self) -> bool { self.details.won_point }
}

// ─── NewPoint ────────────────────────────────────────────────────────────────

/// Input to [`crate::store::TrackerStore::record_point`].
/// When `point_number` is `None` the store assigns the next free number.
#[derive(Debug, Clone)]
pub struct NewPoint {
  pub game_id:      Uuid,
  pub point_number: Option<u32>,
  pub details:      PointDetails,
}

impl NewPoint {
  pub fn new(game_id: Uuid, details: PointDetails) -> Self {
    Self { game_id, point_number: None, details }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn side_text_form() {
    assert_eq!(Side::Defense.to_string(), "Defense");
    assert_eq!(Side::parse("Offense").unwrap(), Side::Offense);
    assert!(matches!(Side::parse("Zone"), Err(Error::UnknownSide(_))));
  }

  #[test]
  fn normalized_blanks_become_none() {
    let details = PointDetails {
      offense_initiation: Some("  ".into()),
      defense_initiation: Some(" Wall ".into()),
      notes: Some(String::new()),
      ..Default::default()
    }
    .normalized()
    .unwrap();

    assert_eq!(details.offense_initiation, None);
    assert_eq!(details.defense_initiation.as_deref(), Some("Wall"));
    assert_eq!(details.notes, None);
  }

  #[test]
  fn normalized_skips_empty_slots_and_repeats() {
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    let details = PointDetails {
      players: vec![a, Uuid::nil(), b, a],
      ..Default::default()
    }
    .normalized()
    .unwrap();
    assert_eq!(details.players, vec![a, b]);
  }

  #[test]
  fn normalized_caps_the_lineup() {
    let details = PointDetails {
      players: (0..8).map(|_| Uuid::new_v4()).collect(),
      ..Default::default()
    };
    let err = details.normalized().unwrap_err();
    assert!(matches!(err, Error::TooManyPlayers { max: 7, got: 8 }));
  }

  #[test]
  fn initiation_follows_side() {
    let mut point = Point {
      point_id:     Uuid::new_v4(),
      game_id:      Uuid::new_v4(),
      point_number: 1,
      details:      PointDetails {
        offense_initiation: Some("Windmill".into()),
        defense_initiation: Some("Wall".into()),
        offense_main_strategy: Some("Vertical Stack".into()),
        defense_main_strategy: Some("Match Flick".into()),
        ..Default::default()
      },
      recorded_at:  Utc::now(),
    };
    assert_eq!(point.initiation(), Some("Windmill"));
    assert_eq!(point.main_strategy(), Some("Vertical Stack"));

    point.details.side = Side::Defense;
    assert_eq!(point.initiation(), Some("Wall"));
    assert_eq!(point.main_strategy(), Some("Match Flick"));
  }

  #[test]
  fn details_deserialize_with_defaults() {
    let details: PointDetails =
      serde_json::from_str(r#"{"offense_or_defense":"Defense","won_point":true}"#).unwrap();
    assert_eq!(details.side, Side::Defense);
    assert!(details.won_point);
    assert_eq!(details.turns, 0);
    assert!(details.players.is_empty());
  }
}
