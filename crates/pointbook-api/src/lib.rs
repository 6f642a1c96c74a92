//! JSON REST API for pointbook.
//!
//! Exposes an axum [`Router`] backed by any [`pointbook_core::store::TrackerStore`].
//! Auth, TLS, and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", pointbook_api::api_router(store.clone()))
//! ```

pub mod error;
pub mod games;
pub mod points;
pub mod search;
pub mod squad;


use std::sync::Arc;

use axum::{
  Router,
  routing::{delete, get},
};
use pointbook_core::store::TrackerStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: TrackerStore + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    // Games
    .route("/games", get(games::list::<S>).post(games::create::<S>))
    .route(
      "/games/{id}",
      get(games::get_one::<S>)
        .put(games::update::<S>)
        .delete(games::remove::<S>),
    )
    .route(
      "/games/{id}/points",
      get(points::list_for_game::<S>).post(points::create::<S>),
    )
    .route("/games/{id}/next-point-number", get(points::next_number::<S>))
    // Points
    .route("/points/search", get(search::handler::<S>))
    .route("/points/suggestions", get(search::suggestions::<S>))
    .route(
      "/points/{id}",
      get(points::get_one::<S>)
        .put(points::update::<S>)
        .delete(points::remove::<S>),
    )
    // Squad
    .route("/squad", get(squad::list::<S>).post(squad::create::<S>))
    .route("/squad/{id}", delete(squad::remove::<S>))
    .with_state(store)
}
