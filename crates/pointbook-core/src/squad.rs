//! Squad: the roster players are picked from when recording a point.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
  pub player_id:   Uuid,
  pub player_name: String,
  pub created_at:  DateTime<Utc>,
}
