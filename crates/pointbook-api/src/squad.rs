//! Handlers for `/squad` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`    | `/squad` | Ordered by name |
//! | `POST`   | `/squad` | Body: `{"player_name":"..."}` |
//! | `DELETE` | `/squad/{id}` | 204; also drops the player from lineups |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use pointbook_core::{Error as CoreError, squad::Player, store::TrackerStore};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;

/// `GET /squad`
pub async fn list<S>(State(store): State<Arc<S>>) -> Result<Json<Vec<Player>>, ApiError>
where
  S: TrackerStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let players = store.list_players().await.map_err(ApiError::store)?;
  Ok(Json(players))
}

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub player_name: String,
}

/// `POST /squad`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: TrackerStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let name = body.player_name.trim();
  if name.is_empty() {
    return Err(CoreError::BlankField("player_name").into());
  }
  let player = store
    .add_player(name.to_owned())
    .await
    .map_err(ApiError::store)?;
  tracing::info!(player_id = %player.player_id, "player added");
  Ok((StatusCode::CREATED, Json(player)))
}

/// `DELETE /squad/{id}`
pub async fn remove<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: TrackerStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  if !store.delete_player(id).await.map_err(ApiError::store)? {
    return Err(ApiError::NotFound(format!("player {id} not found")));
  }
  tracing::info!(player_id = %id, "player removed");
  Ok(StatusCode::NO_CONTENT)
}
