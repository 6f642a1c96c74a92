//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("conflict: {0}")]
  Conflict(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Wrap a store error. A [`pointbook_core::Error`] anywhere in its source
  /// chain is a rejected request and maps like one; anything else is a 500.
  pub fn store<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    let rejected = std::iter::successors(
      Some(&err as &(dyn std::error::Error + 'static)),
      |e| e.source(),
    )
    .find_map(|e| e.downcast_ref::<pointbook_core::Error>());
    if let Some(core) = rejected {
      tracing::debug!(error = %core, "store rejected request");
      return ApiError::from_core(core);
    }

    tracing::error!(error = %err, "store failure");
    ApiError::Store(Box::new(err))
  }

  fn from_core(err: &pointbook_core::Error) -> Self {
    use pointbook_core::Error as E;
    let message = err.to_string();
    match err {
      E::GameNotFound(_) | E::PointNotFound(_) => ApiError::NotFound(message),
      E::DuplicatePointNumber(_) => ApiError::Conflict(message),
      _ => ApiError::BadRequest(message),
    }
  }
}

impl From<pointbook_core::Error> for ApiError {
  fn from(err: pointbook_core::Error) -> Self { ApiError::from_core(&err) }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Conflict(m) => (StatusCode::CONFLICT, m.clone()),
      ApiError::Store(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
