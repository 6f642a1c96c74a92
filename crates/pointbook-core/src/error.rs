//! Error types for `pointbook-core`.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("game not found: {0}")]
  GameNotFound(Uuid),

  #[error("point not found: {0}")]
  PointNotFound(Uuid),

  #[error("{0} must not be blank")]
  BlankField(&'static str),

  #[error("a point can list at most {max} players, got {got}")]
  TooManyPlayers { max: usize, got: usize },

  #[error("unknown side: {0:?}")]
  UnknownSide(String),

  /// A lineup names a player who is not on the squad.
  #[error("player is not on the squad: {0}")]
  UnknownPlayer(Uuid),

  #[error("point number {0} is already taken in this game")]
  DuplicatePointNumber(u32),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
