//! Score derivation: folding point outcomes into running scores.
//!
//! A game's points arrive from the store in no particular order. They are
//! sorted by point number and folded into a `(team, opponent)` pair, one row
//! per point, carrying the score *after* that point was played.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

// ─── Outcomes ────────────────────────────────────────────────────────────────

/// Anything that can be folded into a running score.
pub trait Outcome {
  /// Position of the point within its game; decides fold order.
  fn sequence_number(&self) -> u32;
  /// `true` if the team won the point, `false` if the opponent did.
  fn won_by_team(&self) -> bool;
}

/// The minimal record the score fold needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointOutcome {
  pub sequence_number: u32,
  pub won_by_team:     bool,
}

impl PointOutcome {
  pub fn new(sequence_number: u32, won_by_team: bool) -> Self {
    Self { sequence_number, won_by_team }
  }
}

impl Outcome for PointOutcome {
  fn sequence_number(&self) -> u32 { self.sequence_number }

  fn won_by_team(&self) -> bool { self.won_by_team }
}

// ─── Status ──────────────────────────────────────────────────────────────────

/// Who is ahead, from the team's point of view.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ScoreStatus {
  Trailing,
  Tied,
  Leading,
}

impl ScoreStatus {
  /// Hex colour used to render a score in this state.
  pub fn colour(self) -> &'static str {
    match self {
      Self::Trailing => "#e72727",
      Self::Tied => "#dc9934",
      Self::Leading => "#28c61d",
    }
  }
}

/// Classify a `(team, opponent)` score pair.
pub fn classify(team_score: u32, opponent_score: u32) -> ScoreStatus {
  match team_score.cmp(&opponent_score) {
    std::cmp::Ordering::Less => ScoreStatus::Trailing,
    std::cmp::Ordering::Equal => ScoreStatus::Tied,
    std::cmp::Ordering::Greater => ScoreStatus::Leading,
  }
}

// ─── Score ───────────────────────────────────────────────────────────────────

/// A `(team, opponent)` score pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
  pub team:     u32,
  pub opponent: u32,
}

impl Score {
  pub fn new(team: u32, opponent: u32) -> Self { Self { team, opponent } }

  /// Credit one point to whichever side won it.
  pub fn record(&mut self, won_by_team: bool) {
    if won_by_team {
      self.team += 1;
    } else {
      self.opponent += 1;
    }
  }

  pub fn status(&self) -> ScoreStatus { classify(self.team, self.opponent) }
}

impl std::fmt::Display for Score {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{} - {}", self.team, self.opponent)
  }
}

// ─── Fold ────────────────────────────────────────────────────────────────────

/// An outcome annotated with the running score after it was played.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scored<T> {
  pub outcome:              T,
  pub team_score_after:     u32,
  pub opponent_score_after: u32,
}

pub type ScoredPoint = Scored<PointOutcome>;

impl<T> Scored<T> {
  pub fn score(&self) -> Score {
    Score::new(self.team_score_after, self.opponent_score_after)
  }

  pub fn status(&self) -> ScoreStatus {
    classify(self.team_score_after, self.opponent_score_after)
  }
}

/// Sort `outcomes` by sequence number and fold them into running scores.
///
/// The sort is stable, so outcomes sharing a sequence number keep their input
/// order. The input slice is left untouched; the returned rows follow the
/// sorted order.
pub fn derive_scores<T: Outcome + Clone>(outcomes: &[T]) -> Vec<Scored<T>> {
  let mut sorted: Vec<&T> = outcomes.iter().collect();
  sorted.sort_by_key(|o| o.sequence_number());

  let mut running = Score::default();
  sorted
    .into_iter()
    .map(|o| {
      running.record(o.won_by_team());
      Scored {
        outcome:              o.clone(),
        team_score_after:     running.team,
        opponent_score_after: running.opponent,
      }
    })
    .collect()
}

/// Fold `(game_id, won_by_team)` pairs into a final score per game.
///
/// Order does not matter for a final tally. Games with no outcomes are simply
/// absent from the map; callers treat them as 0 - 0.
pub fn tally_by_game(
  outcomes: impl IntoIterator<Item = (Uuid, bool)>,
) -> HashMap<Uuid, Score> {
  let mut scores: HashMap<Uuid, Score> = HashMap::new();
  for (game_id, won) in outcomes {
    scores.entry(game_id).or_default().record(won);
  }
  scores
}
