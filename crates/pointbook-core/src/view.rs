//! Read models assembled from stored records. Derived on every read, never stored.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  clip::resolve_clip_url,
  game::Game,
  point::Point,
  score::{Score, ScoreStatus, derive_scores, tally_by_game},
  store::GameOutcome,
};

// ─── Games list ──────────────────────────────────────────────────────────────

/// A game with its final score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSummary {
  #[serde(flatten)]
  pub game:   Game,
  pub score:  Score,
  pub status: ScoreStatus,
}

/// Pair every game with the final score tallied from `outcomes`.
/// Games with no recorded points are 0 - 0.
pub fn summarize_games(games: Vec<Game>, outcomes: &[GameOutcome]) -> Vec<GameSummary> {
  let scores = tally_by_game(outcomes.iter().map(|o| (o.game_id, o.won_point)));
  games
    .into_iter()
    .map(|game| {
      let score = scores.get(&game.game_id).copied().unwrap_or_default();
      GameSummary { game, score, status: score.status() }
    })
    .collect()
}

// ─── Game detail ─────────────────────────────────────────────────────────────

/// One line of a game's point list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointRow {
  pub point:          Point,
  pub team_score:     u32,
  pub opponent_score: u32,
  pub status:         ScoreStatus,
  /// Initiation play for the side the team was on.
  pub initiation:     Option<String>,
  pub main_strategy:  Option<String>,
  pub clip_url:       Option<String>,
}

impl PointRow {
  pub fn score(&self) -> Score { Score::new(self.team_score, self.opponent_score) }
}

/// Fold a game's points into display rows with running scores and clip
/// links. Points are expected to belong to `game`.
pub fn point_rows(game: &Game, points: &[Point]) -> Vec<PointRow> {
  derive_scores(points)
    .into_iter()
    .map(|scored| {
      let status = scored.status();
      let point = scored.outcome;
      let clip_url = resolve_clip_url(
        point.details.point_video_url.as_deref(),
        game.footage_url.as_deref(),
        point.details.point_timestamp.as_deref(),
      );
      PointRow {
        initiation: point.initiation().map(str::to_owned),
        main_strategy: point.main_strategy().map(str::to_owned),
        team_score: scored.team_score_after,
        opponent_score: scored.opponent_score_after,
        status,
        clip_url,
        point,
      }
    })
    .collect()
}

// ─── Search ──────────────────────────────────────────────────────────────────

/// Ids of games whose opponent contains `name`, ignoring case.
pub fn games_against(games: &[Game], name: &str) -> Vec<Uuid> {
  let needle = name.trim().to_lowercase();
  games
    .iter()
    .filter(|g| g.opponent.to_lowercase().contains(&needle))
    .map(|g| g.game_id)
    .collect()
}

/// Keep only points played against an opponent matching `name`.
pub fn retain_opponent(points: &mut Vec<Point>, games: &[Game], name: &str) {
  let ids = games_against(games, name);
  points.retain(|p| ids.contains(&p.game_id));
}
