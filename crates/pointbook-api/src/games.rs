//! Handlers for `/games` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`    | `/games` | Each game with its final score |
//! | `POST`   | `/games` | Body: [`NewGame`]; returns 201 + stored game |
//! | `GET`    | `/games/{id}` | 404 if not found |
//! | `PUT`    | `/games/{id}` | Body: [`NewGame`]; replaces every field |
//! | `DELETE` | `/games/{id}` | 204; removes the game's points too |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use pointbook_core::{
  Error as CoreError,
  game::{Game, NewGame},
  store::TrackerStore,
  view::{GameSummary, summarize_games},
};
use uuid::Uuid;

use crate::error::ApiError;

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /games`
pub async fn list<S>(State(store): State<Arc<S>>) -> Result<Json<Vec<GameSummary>>, ApiError>
where
  S: TrackerStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let games = store.list_games().await.map_err(ApiError::store)?;
  let outcomes = store.list_outcomes().await.map_err(ApiError::store)?;
  tracing::debug!(games = games.len(), points = outcomes.len(), "summarising games");
  Ok(Json(summarize_games(games, &outcomes)))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /games`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewGame>,
) -> Result<impl IntoResponse, ApiError>
where
  S: TrackerStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let input = body.normalized()?;
  let game = store.add_game(input).await.map_err(ApiError::store)?;
  tracing::info!(game_id = %game.game_id, opponent = %game.opponent, "game added");
  Ok((StatusCode::CREATED, Json(game)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /games/{id}`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Game>, ApiError>
where
  S: TrackerStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let game = store
    .get_game(id)
    .await
    .map_err(ApiError::store)?
    .ok_or(CoreError::GameNotFound(id))?;
  Ok(Json(game))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /games/{id}`
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<NewGame>,
) -> Result<Json<Game>, ApiError>
where
  S: TrackerStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let input = body.normalized()?;
  let game = store
    .update_game(id, input)
    .await
    .map_err(ApiError::store)?
    .ok_or(CoreError::GameNotFound(id))?;
  tracing::info!(game_id = %id, "game updated");
  Ok(Json(game))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /games/{id}`
pub async fn remove<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: TrackerStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  if !store.delete_game(id).await.map_err(ApiError::store)? {
    return Err(CoreError::GameNotFound(id).into());
  }
  tracing::info!(game_id = %id, "game deleted");
  Ok(StatusCode::NO_CONTENT)
}
