//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::NaiveDate;
use pointbook_core::{
  Error as CoreError,
  game::NewGame,
  point::{NewPoint, PointDetails, Side},
  score::{ScoreStatus, derive_scores},
  store::{PointQuery, TrackerStore},
};
use uuid::Uuid;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn date(day: u32) -> NaiveDate { NaiveDate::from_ymd_opt(2024, 6, day).unwrap() }

fn new_game(opponent: &str, day: u32) -> NewGame {
  let mut game = NewGame::new("Regionals", date(day), opponent);
  game.footage_url = Some("https://youtube.com/watch?v=abc".into());
  game
}

fn details(side: Side, won: bool) -> PointDetails {
  PointDetails { side, won_point: won, ..Default::default() }
}

// ─── Games ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_and_get_game() {
  let s = store().await;

  let game = s.add_game(new_game("Rivals", 1)).await.unwrap();
  let fetched = s.get_game(game.game_id).await.unwrap().unwrap();

  assert_eq!(fetched.game_id, game.game_id);
  assert_eq!(fetched.opponent, "Rivals");
  assert_eq!(fetched.game_date, date(1));
  assert_eq!(fetched.footage_url.as_deref(), Some("https://youtube.com/watch?v=abc"));
}

#[tokio::test]
async fn get_game_missing_returns_none() {
  let s = store().await;
  assert!(s.get_game(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn list_games_in_date_order() {
  let s = store().await;
  s.add_game(new_game("Late", 20)).await.unwrap();
  s.add_game(new_game("Early", 2)).await.unwrap();

  let games = s.list_games().await.unwrap();
  let opponents: Vec<&str> = games.iter().map(|g| g.opponent.as_str()).collect();
  assert_eq!(opponents, vec!["Early", "Late"]);
}

#[tokio::test]
async fn update_game_overwrites_fields() {
  let s = store().await;
  let game = s.add_game(new_game("Rivals", 1)).await.unwrap();

  let mut input = NewGame::new("Nationals", date(9), "Rivals B");
  input.footage_url = None;
  let updated = s.update_game(game.game_id, input).await.unwrap().unwrap();

  assert_eq!(updated.event, "Nationals");
  assert_eq!(updated.opponent, "Rivals B");
  assert_eq!(updated.footage_url, None);
  assert_eq!(updated.created_at, game.created_at);

  let missing = s
    .update_game(Uuid::new_v4(), new_game("Nobody", 1))
    .await
    .unwrap();
  assert!(missing.is_none());
}

#[tokio::test]
async fn delete_game_cascades_to_points() {
  let s = store().await;
  let game = s.add_game(new_game("Rivals", 1)).await.unwrap();
  let point = s
    .record_point(NewPoint::new(game.game_id, details(Side::Offense, true)))
    .await
    .unwrap();

  assert!(s.delete_game(game.game_id).await.unwrap());
  assert!(!s.delete_game(game.game_id).await.unwrap());
  assert!(s.get_point(point.point_id).await.unwrap().is_none());
  assert!(s.list_outcomes().await.unwrap().is_empty());
}

// ─── Points ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn record_point_assigns_next_number() {
  let s = store().await;
  let game = s.add_game(new_game("Rivals", 1)).await.unwrap();
  assert_eq!(s.next_point_number(game.game_id).await.unwrap(), 1);

  let first = s
    .record_point(NewPoint::new(game.game_id, details(Side::Offense, true)))
    .await
    .unwrap();
  let second = s
    .record_point(NewPoint::new(game.game_id, details(Side::Defense, false)))
    .await
    .unwrap();

  assert_eq!(first.point_number, 1);
  assert_eq!(second.point_number, 2);
  assert_eq!(s.next_point_number(game.game_id).await.unwrap(), 3);
}

#[tokio::test]
async fn record_point_respects_explicit_number() {
  let s = store().await;
  let game = s.add_game(new_game("Rivals", 1)).await.unwrap();

  let mut input = NewPoint::new(game.game_id, details(Side::Offense, true));
  input.point_number = Some(5);
  let point = s.record_point(input).await.unwrap();

  assert_eq!(point.point_number, 5);
  assert_eq!(s.next_point_number(game.game_id).await.unwrap(), 6);
}

#[tokio::test]
async fn record_point_for_unknown_game_errors() {
  let s = store().await;
  let err = s
    .record_point(NewPoint::new(Uuid::new_v4(), details(Side::Offense, true)))
    .await
    .unwrap_err();
  assert!(matches!(err, crate::Error::Core(CoreError::GameNotFound(_))));
}

#[tokio::test]
async fn duplicate_point_number_is_rejected() {
  let s = store().await;
  let game = s.add_game(new_game("Rivals", 1)).await.unwrap();

  let mut input = NewPoint::new(game.game_id, details(Side::Offense, true));
  input.point_number = Some(1);
  s.record_point(input.clone()).await.unwrap();

  let err = s.record_point(input).await.unwrap_err();
  assert!(matches!(err, crate::Error::Core(CoreError::DuplicatePointNumber(1))));
  assert_eq!(s.list_points(game.game_id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn lineup_must_come_from_the_squad() {
  let s = store().await;
  let game = s.add_game(new_game("Rivals", 1)).await.unwrap();
  let ann = s.add_player("Ann".into()).await.unwrap();
  let stranger = Uuid::new_v4();

  let mut lineup = details(Side::Offense, true);
  lineup.players = vec![ann.player_id, stranger];
  let err = s
    .record_point(NewPoint::new(game.game_id, lineup.clone()))
    .await
    .unwrap_err();
  assert!(matches!(err, crate::Error::Core(CoreError::UnknownPlayer(id)) if id == stranger));
  assert!(s.list_points(game.game_id).await.unwrap().is_empty());

  let mut ok = details(Side::Offense, true);
  ok.players = vec![ann.player_id];
  let point = s
    .record_point(NewPoint::new(game.game_id, ok))
    .await
    .unwrap();

  let err = s.update_point(point.point_id, lineup).await.unwrap_err();
  assert!(matches!(err, crate::Error::Core(CoreError::UnknownPlayer(id)) if id == stranger));

  // The rejected update leaves the point untouched.
  let stored = s.get_point(point.point_id).await.unwrap().unwrap();
  assert_eq!(stored.details.players, vec![ann.player_id]);
}

#[tokio::test]
async fn point_fields_and_lineup_roundtrip() {
  let s = store().await;
  let game = s.add_game(new_game("Rivals", 1)).await.unwrap();
  let ann = s.add_player("Ann".into()).await.unwrap();
  let bea = s.add_player("Bea".into()).await.unwrap();

  let input = PointDetails {
    point_video_url: Some("https://veo.co/p1".into()),
    point_timestamp: Some("12:34".into()),
    side: Side::Defense,
    defense_initiation: Some("Wall".into()),
    defense_initiation_successful: true,
    defense_main_strategy: Some("Match Flick".into()),
    turns: 3,
    won_point: true,
    notes: Some("long point".into()),
    players: vec![bea.player_id, ann.player_id],
    ..Default::default()
  };
  let recorded = s
    .record_point(NewPoint::new(game.game_id, input.clone()))
    .await
    .unwrap();

  let fetched = s.get_point(recorded.point_id).await.unwrap().unwrap();
  assert_eq!(fetched.details, input);
  assert_eq!(fetched.details.players, vec![bea.player_id, ann.player_id]);
  assert_eq!(fetched.initiation(), Some("Wall"));
}

#[tokio::test]
async fn update_point_replaces_details_and_lineup() {
  let s = store().await;
  let game = s.add_game(new_game("Rivals", 1)).await.unwrap();
  let ann = s.add_player("Ann".into()).await.unwrap();
  let bea = s.add_player("Bea".into()).await.unwrap();

  let mut original = details(Side::Offense, false);
  original.players = vec![ann.player_id];
  let point = s
    .record_point(NewPoint::new(game.game_id, original))
    .await
    .unwrap();

  let mut replacement = details(Side::Defense, true);
  replacement.players = vec![bea.player_id];
  replacement.turns = 2;
  let updated = s
    .update_point(point.point_id, replacement.clone())
    .await
    .unwrap()
    .unwrap();

  assert_eq!(updated.point_number, point.point_number);
  assert_eq!(updated.game_id, game.game_id);
  assert_eq!(updated.details, replacement);

  let missing = s
    .update_point(Uuid::new_v4(), details(Side::Offense, true))
    .await
    .unwrap();
  assert!(missing.is_none());
}

#[tokio::test]
async fn delete_player_drops_them_from_lineups() {
  let s = store().await;
  let game = s.add_game(new_game("Rivals", 1)).await.unwrap();
  let ann = s.add_player("Ann".into()).await.unwrap();
  let bea = s.add_player("Bea".into()).await.unwrap();

  let mut input = details(Side::Offense, true);
  input.players = vec![ann.player_id, bea.player_id];
  let point = s
    .record_point(NewPoint::new(game.game_id, input))
    .await
    .unwrap();

  assert!(s.delete_player(ann.player_id).await.unwrap());
  let fetched = s.get_point(point.point_id).await.unwrap().unwrap();
  assert_eq!(fetched.details.players, vec![bea.player_id]);

  let squad = s.list_players().await.unwrap();
  assert_eq!(squad.len(), 1);
  assert_eq!(squad[0].player_name, "Bea");
}

#[tokio::test]
async fn listed_points_fold_into_scores() {
  let s = store().await;
  let game = s.add_game(new_game("Rivals", 1)).await.unwrap();
  for won in [true, false, false] {
    s.record_point(NewPoint::new(game.game_id, details(Side::Offense, won)))
      .await
      .unwrap();
  }

  let points = s.list_points(game.game_id).await.unwrap();
  let rows = derive_scores(&points);
  let last = rows.last().unwrap();
  assert_eq!((last.team_score_after, last.opponent_score_after), (1, 2));
  assert_eq!(last.status(), ScoreStatus::Trailing);
}

// ─── Search ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn search_applies_only_set_filters() {
  let s = store().await;
  let game = s.add_game(new_game("Rivals", 1)).await.unwrap();

  let mut windmill = details(Side::Offense, true);
  windmill.offense_initiation = Some("Windmill".into());
  windmill.offense_initiation_successful = true;
  s.record_point(NewPoint::new(game.game_id, windmill)).await.unwrap();

  let mut lost = details(Side::Offense, false);
  lost.offense_initiation = Some("Windmill".into());
  lost.turns = 2;
  s.record_point(NewPoint::new(game.game_id, lost)).await.unwrap();

  s.record_point(NewPoint::new(game.game_id, details(Side::Defense, true)))
    .await
    .unwrap();

  let all = s.search_points(&PointQuery::default()).await.unwrap();
  assert_eq!(all.len(), 3);

  let query = PointQuery {
    offense_initiation: Some("Windmill".into()),
    ..Default::default()
  };
  assert_eq!(s.search_points(&query).await.unwrap().len(), 2);

  let query = PointQuery {
    offense_initiation: Some("Windmill".into()),
    won_point: Some(false),
    turns: Some(2),
    ..Default::default()
  };
  let hits = s.search_points(&query).await.unwrap();
  assert_eq!(hits.len(), 1);
  assert_eq!(hits[0].point_number, 2);

  let query = PointQuery {
    side: Some(Side::Defense),
    ..Default::default()
  };
  assert_eq!(s.search_points(&query).await.unwrap()[0].point_number, 3);

  let query = PointQuery {
    offense_success: Some(true),
    ..Default::default()
  };
  assert_eq!(s.search_points(&query).await.unwrap()[0].point_number, 1);
}

#[tokio::test]
async fn search_orders_by_game_date_then_number() {
  let s = store().await;
  let late = s.add_game(new_game("Late", 20)).await.unwrap();
  let early = s.add_game(new_game("Early", 2)).await.unwrap();

  for game_id in [late.game_id, early.game_id, late.game_id] {
    s.record_point(NewPoint::new(game_id, details(Side::Offense, true)))
      .await
      .unwrap();
  }

  let hits = s.search_points(&PointQuery::default()).await.unwrap();
  let order: Vec<(Uuid, u32)> = hits.iter().map(|p| (p.game_id, p.point_number)).collect();
  assert_eq!(
    order,
    vec![(early.game_id, 1), (late.game_id, 1), (late.game_id, 2)]
  );
}

#[tokio::test]
async fn suggestions_collect_distinct_values() {
  let s = store().await;
  let game = s.add_game(new_game("Rivals", 1)).await.unwrap();

  for (init, main) in [("Windmill", "Vertical Stack"), ("Windmill", "Ho Stack")] {
    let mut d = details(Side::Offense, true);
    d.offense_initiation = Some(init.into());
    d.offense_main_strategy = Some(main.into());
    s.record_point(NewPoint::new(game.game_id, d)).await.unwrap();
  }

  let suggestions = s.strategy_suggestions().await.unwrap();
  assert_eq!(suggestions.offense_initiations, vec!["Windmill"]);
  assert_eq!(
    suggestions.offense_main_strategies,
    vec!["Vertical Stack", "Ho Stack"]
  );
  assert!(suggestions.defense_initiations.is_empty());
}

#[tokio::test]
async fn outcomes_cover_every_point() {
  let s = store().await;
  let a = s.add_game(new_game("A", 1)).await.unwrap();
  let b = s.add_game(new_game("B", 2)).await.unwrap();

  s.record_point(NewPoint::new(a.game_id, details(Side::Offense, true)))
    .await
    .unwrap();
  s.record_point(NewPoint::new(b.game_id, details(Side::Offense, false)))
    .await
    .unwrap();

  let outcomes = s.list_outcomes().await.unwrap();
  assert_eq!(outcomes.len(), 2);
  assert!(outcomes.iter().any(|o| o.game_id == a.game_id && o.won_point));
  assert!(outcomes.iter().any(|o| o.game_id == b.game_id && !o.won_point));
}
