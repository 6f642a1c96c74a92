//! Async HTTP client wrapping the pointbook JSON API.

use anyhow::{Context, Result, anyhow};
use pointbook_core::view::{GameSummary, PointRow};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use uuid::Uuid;

/// Connection settings for the pointbook API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
}

/// Async HTTP client for the pointbook JSON REST API.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!(
      "{}/api{}",
      self.config.base_url.trim_end_matches('/'),
      path
    )
  }

  async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
    let resp = self
      .client
      .get(self.url(path))
      .send()
      .await
      .with_context(|| format!("GET {path} failed"))?;

    if !resp.status().is_success() {
      return Err(anyhow!("GET {path} → {}", resp.status()));
    }
    resp
      .json()
      .await
      .with_context(|| format!("deserialising {path}"))
  }

  /// `GET /api/games`
  pub async fn list_games(&self) -> Result<Vec<GameSummary>> {
    self.get_json("/games").await
  }

  /// `GET /api/games/{id}/points`
  pub async fn game_points(&self, game_id: Uuid) -> Result<Vec<PointRow>> {
    self.get_json(&format!("/games/{game_id}/points")).await
  }
}
