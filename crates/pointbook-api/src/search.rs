//! Handlers for `GET /points/search` and `GET /points/suggestions`.
//!
//! Search params map directly to [`PointQuery`] fields, plus `opponent`,
//! which keeps points from games whose opponent contains the given text.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State},
};
use pointbook_core::{
  game::non_blank,
  point::{Point, Side},
  store::{PointQuery, StrategySuggestions, TrackerStore},
  view::retain_opponent,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;

#[derive(Debug, Deserialize, Default)]
pub struct SearchParams {
  pub game_id:            Option<Uuid>,
  /// `Offense` or `Defense`.
  pub offense_or_defense: Option<Side>,
  pub offense_initiation: Option<String>,
  pub defense_initiation: Option<String>,
  pub offense_success:    Option<bool>,
  pub defense_success:    Option<bool>,
  pub turns:              Option<u32>,
  pub won_point:          Option<bool>,
  /// Case-insensitive substring of the opponent's name.
  pub opponent:           Option<String>,
}

/// `GET /points/search[?offense_or_defense=...][&offense_initiation=...][&won_point=...][&opponent=...]`
pub async fn handler<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Point>>, ApiError>
where
  S: TrackerStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let query = PointQuery {
    game_id:            params.game_id,
    side:               params.offense_or_defense,
    offense_initiation: non_blank(params.offense_initiation),
    defense_initiation: non_blank(params.defense_initiation),
    offense_success:    params.offense_success,
    defense_success:    params.defense_success,
    turns:              params.turns,
    won_point:          params.won_point,
  };

  let mut points = store
    .search_points(&query)
    .await
    .map_err(ApiError::store)?;

  if let Some(opponent) = non_blank(params.opponent) {
    let games = store.list_games().await.map_err(ApiError::store)?;
    retain_opponent(&mut points, &games, &opponent);
  }

  tracing::debug!(hits = points.len(), "point search");
  Ok(Json(points))
}

/// `GET /points/suggestions`
pub async fn suggestions<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<StrategySuggestions>, ApiError>
where
  S: TrackerStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let suggestions = store
    .strategy_suggestions()
    .await
    .map_err(ApiError::store)?;
  Ok(Json(suggestions))
}
