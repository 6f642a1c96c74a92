//! Handlers for a game's points and for single points.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`    | `/games/{id}/points` | Rows with running score and clip link |
//! | `POST`   | `/games/{id}/points` | Body: [`CreateBody`]; returns 201 + stored point |
//! | `GET`    | `/games/{id}/next-point-number` | `{"point_number": n}` |
//! | `GET`    | `/points/{id}` | 404 if not found |
//! | `PUT`    | `/points/{id}` | Body: [`PointDetails`]; keeps game and number |
//! | `DELETE` | `/points/{id}` | 204 |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use pointbook_core::{
  Error as CoreError,
  game::Game,
  point::{NewPoint, Point, PointDetails},
  store::TrackerStore,
  view::{PointRow, point_rows},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;

async fn require_game<S>(store: &S, id: Uuid) -> Result<Game, ApiError>
where
  S: TrackerStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Ok(
    store
      .get_game(id)
      .await
      .map_err(ApiError::store)?
      .ok_or(CoreError::GameNotFound(id))?,
  )
}

// ─── Game points ──────────────────────────────────────────────────────────────

/// `GET /games/{id}/points`
pub async fn list_for_game<S>(
  State(store): State<Arc<S>>,
  Path(game_id): Path<Uuid>,
) -> Result<Json<Vec<PointRow>>, ApiError>
where
  S: TrackerStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let game = require_game(store.as_ref(), game_id).await?;
  let points = store.list_points(game_id).await.map_err(ApiError::store)?;
  tracing::debug!(%game_id, points = points.len(), "deriving point rows");
  Ok(Json(point_rows(&game, &points)))
}

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  /// Omit to take the next free number in the game.
  #[serde(default)]
  pub point_number: Option<u32>,
  #[serde(flatten)]
  pub details:      PointDetails,
}

/// `POST /games/{id}/points`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Path(game_id): Path<Uuid>,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: TrackerStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  if body.point_number == Some(0) {
    return Err(ApiError::BadRequest("point_number starts at 1".into()));
  }
  let details = body.details.normalized()?;
  require_game(store.as_ref(), game_id).await?;

  let point = store
    .record_point(NewPoint {
      game_id,
      point_number: body.point_number,
      details,
    })
    .await
    .map_err(ApiError::store)?;
  tracing::info!(%game_id, point_number = point.point_number, "point recorded");
  Ok((StatusCode::CREATED, Json(point)))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NextNumber {
  pub point_number: u32,
}

/// `GET /games/{id}/next-point-number`
pub async fn next_number<S>(
  State(store): State<Arc<S>>,
  Path(game_id): Path<Uuid>,
) -> Result<Json<NextNumber>, ApiError>
where
  S: TrackerStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  require_game(store.as_ref(), game_id).await?;
  let point_number = store
    .next_point_number(game_id)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(NextNumber { point_number }))
}

// ─── Single point ─────────────────────────────────────────────────────────────

/// `GET /points/{id}`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Point>, ApiError>
where
  S: TrackerStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let point = store
    .get_point(id)
    .await
    .map_err(ApiError::store)?
    .ok_or(CoreError::PointNotFound(id))?;
  Ok(Json(point))
}

/// `PUT /points/{id}`
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<PointDetails>,
) -> Result<Json<Point>, ApiError>
where
  S: TrackerStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let details = body.normalized()?;
  let point = store
    .update_point(id, details)
    .await
    .map_err(ApiError::store)?
    .ok_or(CoreError::PointNotFound(id))?;
  tracing::info!(point_id = %id, "point updated");
  Ok(Json(point))
}

/// `DELETE /points/{id}`
pub async fn remove<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: TrackerStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  if !store.delete_point(id).await.map_err(ApiError::store)? {
    return Err(CoreError::PointNotFound(id).into());
  }
  tracing::info!(point_id = %id, "point deleted");
  Ok(StatusCode::NO_CONTENT)
}
