//! The `TrackerStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g.
//! `pointbook-store-sqlite`). Higher layers (`pointbook-api`) depend on this
//! abstraction, not on any concrete backend.

use std::{collections::HashSet, future::Future};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  game::{Game, NewGame},
  point::{NewPoint, Point, PointDetails, Side},
  squad::Player,
};

// ─── Query type ──────────────────────────────────────────────────────────────

/// Parameters for [`TrackerStore::search_points`]. Every field is an equality
/// filter; `None` means "any".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointQuery {
  pub game_id:            Option<Uuid>,
  #[serde(rename = "offense_or_defense")]
  pub side:               Option<Side>,
  pub offense_initiation: Option<String>,
  pub defense_initiation: Option<String>,
  pub offense_success:    Option<bool>,
  pub defense_success:    Option<bool>,
  pub turns:              Option<u32>,
  pub won_point:          Option<bool>,
}

/// `(game_id, won_point)` for a single point; enough to tally a final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
  pub game_id:   Uuid,
  pub won_point: bool,
}

// ─── Suggestions ─────────────────────────────────────────────────────────────

/// Distinct values already used for the four tactical fields, offered as
/// completions when entering a point.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategySuggestions {
  pub offense_initiations:     Vec<String>,
  pub defense_initiations:     Vec<String>,
  pub offense_main_strategies: Vec<String>,
  pub defense_main_strategies: Vec<String>,
}

impl StrategySuggestions {
  /// Collect distinct trimmed non-blank values from raw column tuples in
  /// `(offense_initiation, defense_initiation, offense_main, defense_main)`
  /// order. First occurrence wins.
  pub fn collect<I>(rows: I) -> Self
  where
    I: IntoIterator<
      Item = (Option<String>, Option<String>, Option<String>, Option<String>),
    >,
  {
    let mut out = Self::default();
    let mut seen: [HashSet<String>; 4] = Default::default();

    for (off_init, def_init, off_main, def_main) in rows {
      let columns = [
        (off_init, &mut out.offense_initiations),
        (def_init, &mut out.defense_initiations),
        (off_main, &mut out.offense_main_strategies),
        (def_main, &mut out.defense_main_strategies),
      ];
      for ((value, list), distinct) in columns.into_iter().zip(seen.iter_mut()) {
        let Some(value) = value else { continue };
        let value = value.trim();
        if !value.is_empty() && distinct.insert(value.to_owned()) {
          list.push(value.to_owned());
        }
      }
    }
    out
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a pointbook store backend.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait TrackerStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Games ─────────────────────────────────────────────────────────────

  /// Persist a new game. Input is expected to be normalised already.
  fn add_game(
    &self,
    input: NewGame,
  ) -> impl Future<Output = Result<Game, Self::Error>> + Send + '_;

  /// Retrieve a game by UUID. Returns `None` if not found.
  fn get_game(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Game>, Self::Error>> + Send + '_;

  /// All games, oldest fixture first.
  fn list_games(
    &self,
  ) -> impl Future<Output = Result<Vec<Game>, Self::Error>> + Send + '_;

  /// Overwrite a game's fields. Returns `None` if the game does not exist.
  fn update_game(
    &self,
    id: Uuid,
    input: NewGame,
  ) -> impl Future<Output = Result<Option<Game>, Self::Error>> + Send + '_;

  /// Delete a game together with its points. Returns `false` if not found.
  fn delete_game(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Squad ─────────────────────────────────────────────────────────────

  fn add_player(
    &self,
    player_name: String,
  ) -> impl Future<Output = Result<Player, Self::Error>> + Send + '_;

  /// All squad members ordered by name.
  fn list_players(
    &self,
  ) -> impl Future<Output = Result<Vec<Player>, Self::Error>> + Send + '_;

  /// Remove a player from the squad and from every point they played.
  fn delete_player(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Points ────────────────────────────────────────────────────────────

  /// Record a point and its lineup. Assigns the next point number when the
  /// input leaves it unset. Errors if the game does not exist.
  fn record_point(
    &self,
    input: NewPoint,
  ) -> impl Future<Output = Result<Point, Self::Error>> + Send + '_;

  fn get_point(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Point>, Self::Error>> + Send + '_;

  /// All points of a game ordered by point number.
  fn list_points(
    &self,
    game_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Point>, Self::Error>> + Send + '_;

  /// Replace a point's details and lineup. Game and point number are kept.
  /// Returns `None` if the point does not exist.
  fn update_point(
    &self,
    id: Uuid,
    details: PointDetails,
  ) -> impl Future<Output = Result<Option<Point>, Self::Error>> + Send + '_;

  fn delete_point(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// One more than the highest point number recorded for `game_id`; 1 for a
  /// game without points.
  fn next_point_number(
    &self,
    game_id: Uuid,
  ) -> impl Future<Output = Result<u32, Self::Error>> + Send + '_;

  /// Win/loss of every point across all games.
  fn list_outcomes(
    &self,
  ) -> impl Future<Output = Result<Vec<GameOutcome>, Self::Error>> + Send + '_;

  /// Points matching every set field of `query`, ordered by game then point
  /// number.
  fn search_points<'a>(
    &'a self,
    query: &'a PointQuery,
  ) -> impl Future<Output = Result<Vec<Point>, Self::Error>> + Send + 'a;

  fn strategy_suggestions(
    &self,
  ) -> impl Future<Output = Result<StrategySuggestions, Self::Error>> + Send + '_;
}
