//! Games: one fixture against one opponent.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

/// A recorded game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
  pub game_id:     Uuid,
  /// Tournament or league round, e.g. "Nationals 2024".
  pub event:       String,
  pub game_date:   NaiveDate,
  pub opponent:    String,
  /// Full-game footage; per-point clip links are built from this.
  pub footage_url: Option<String>,
  /// Server-assigned timestamp.
  pub created_at:  DateTime<Utc>,
}

/// Input to [`crate::store::TrackerStore::add_game`] and `update_game`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewGame {
  pub event:       String,
  pub game_date:   NaiveDate,
  pub opponent:    String,
  #[serde(default)]
  pub footage_url: Option<String>,
}

impl NewGame {
  pub fn new(event: impl Into<String>, game_date: NaiveDate, opponent: impl Into<String>) -> Self {
    Self {
      event: event.into(),
      game_date,
      opponent: opponent.into(),
      footage_url: None,
    }
  }

  /// Trim text fields, drop a blank footage URL, and reject blank required
  /// fields.
  pub fn normalized(self) -> Result<Self> {
    let event = self.event.trim().to_owned();
    let opponent = self.opponent.trim().to_owned();
    if event.is_empty() {
      return Err(Error::BlankField("event"));
    }
    if opponent.is_empty() {
      return Err(Error::BlankField("opponent"));
    }
    Ok(Self {
      event,
      game_date: self.game_date,
      opponent,
      footage_url: non_blank(self.footage_url),
    })
  }
}

/// `Some` only if the trimmed value is non-empty.
pub fn non_blank(value: Option<String>) -> Option<String> {
  value
    .map(|v| v.trim().to_owned())
    .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn date() -> NaiveDate { NaiveDate::from_ymd_opt(2024, 6, 1).unwrap() }

  #[test]
  fn normalized_trims_and_drops_blank_footage() {
    let mut input = NewGame::new("  Regionals ", date(), " Rivals ");
    input.footage_url = Some("   ".into());

    let game = input.normalized().unwrap();
    assert_eq!(game.event, "Regionals");
    assert_eq!(game.opponent, "Rivals");
    assert_eq!(game.footage_url, None);
  }

  #[test]
  fn normalized_rejects_blank_opponent() {
    let err = NewGame::new("Regionals", date(), "  ").normalized().unwrap_err();
    assert!(matches!(err, Error::BlankField("opponent")));
  }
}
