//! [`SqliteStore`], the SQLite implementation of [`TrackerStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::{OptionalExtension as _, types::Value};
use uuid::Uuid;

use pointbook_core::{
  Error as CoreError,
  game::{Game, NewGame},
  point::{NewPoint, Point, PointDetails},
  squad::Player,
  store::{GameOutcome, PointQuery, StrategySuggestions, TrackerStore},
};

use crate::{
  Error, Result,
  encode::{
    RawGame, RawPlayer, RawPoint, decode_uuid, encode_date, encode_dt, encode_side, encode_uuid,
  },
  schema::SCHEMA,
};

// ─── Row helpers ─────────────────────────────────────────────────────────────

const GAME_COLUMNS: &str = "game_id, event, game_date, opponent, footage_url, created_at";

const POINT_COLUMNS: &str = "
  p.point_id, p.game_id, p.point_number, p.point_video_url, p.point_timestamp,
  p.offense_or_defense, p.offense_initiation, p.offense_initiation_successful,
  p.defense_initiation, p.defense_initiation_successful,
  p.offense_main_strategy, p.defense_main_strategy,
  p.turns, p.won_point, p.notes, p.recorded_at";

fn game_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawGame> {
  Ok(RawGame {
    game_id:     row.get(0)?,
    event:       row.get(1)?,
    game_date:   row.get(2)?,
    opponent:    row.get(3)?,
    footage_url: row.get(4)?,
    created_at:  row.get(5)?,
  })
}

fn point_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawPoint> {
  Ok(RawPoint {
    point_id:                      row.get(0)?,
    game_id:                       row.get(1)?,
    point_number:                  row.get(2)?,
    point_video_url:               row.get(3)?,
    point_timestamp:               row.get(4)?,
    offense_or_defense:            row.get(5)?,
    offense_initiation:            row.get(6)?,
    offense_initiation_successful: row.get(7)?,
    defense_initiation:            row.get(8)?,
    defense_initiation_successful: row.get(9)?,
    offense_main_strategy:         row.get(10)?,
    defense_main_strategy:         row.get(11)?,
    turns:                         row.get(12)?,
    won_point:                     row.get(13)?,
    notes:                         row.get(14)?,
    recorded_at:                   row.get(15)?,
    players:                       Vec::new(),
  })
}

/// Run a `SELECT {POINT_COLUMNS} FROM points p ...` query and attach each
/// point's lineup.
fn query_points(
  conn: &rusqlite::Connection,
  sql: &str,
  params: impl rusqlite::Params,
) -> rusqlite::Result<Vec<RawPoint>> {
  let mut stmt = conn.prepare(sql)?;
  let mut points = stmt
    .query_map(params, point_from_row)?
    .collect::<rusqlite::Result<Vec<_>>>()?;

  let mut lineup = conn.prepare_cached(
    "SELECT player_id FROM point_players WHERE point_id = ?1 ORDER BY slot",
  )?;
  for point in &mut points {
    point.players = lineup
      .query_map(rusqlite::params![point.point_id], |r| r.get(0))?
      .collect::<rusqlite::Result<Vec<String>>>()?;
  }
  Ok(points)
}

fn insert_lineup(
  conn: &rusqlite::Connection,
  point_id: &str,
  players: &[Uuid],
) -> rusqlite::Result<()> {
  let mut stmt = conn.prepare_cached(
    "INSERT INTO point_players (point_id, player_id, slot) VALUES (?1, ?2, ?3)",
  )?;
  for (slot, player_id) in players.iter().enumerate() {
    stmt.execute(rusqlite::params![point_id, encode_uuid(*player_id), slot as i64])?;
  }
  Ok(())
}

/// First lineup entry with no matching `squad` row, if any.
fn unknown_player(
  conn: &rusqlite::Connection,
  players: &[Uuid],
) -> rusqlite::Result<Option<Uuid>> {
  let mut stmt = conn.prepare_cached("SELECT 1 FROM squad WHERE player_id = ?1")?;
  for &player_id in players {
    if !stmt.exists(rusqlite::params![encode_uuid(player_id)])? {
      return Ok(Some(player_id));
    }
  }
  Ok(None)
}

type StrategyRow = (Option<String>, Option<String>, Option<String>, Option<String>);

/// Column values of [`PointDetails`] in `points` table order, starting at
/// `point_video_url`.
struct DetailColumns {
  point_video_url:               Option<String>,
  point_timestamp:               Option<String>,
  side:                          String,
  offense_initiation:            Option<String>,
  offense_initiation_successful: bool,
  defense_initiation:            Option<String>,
  defense_initiation_successful: bool,
  offense_main_strategy:         Option<String>,
  defense_main_strategy:         Option<String>,
  turns:                         u32,
  won_point:                     bool,
  notes:                         Option<String>,
  players:                       Vec<Uuid>,
}

impl From<PointDetails> for DetailColumns {
  fn from(d: PointDetails) -> Self {
    Self {
      point_video_url:               d.point_video_url,
      point_timestamp:               d.point_timestamp,
      side:                          encode_side(d.side),
      offense_initiation:            d.offense_initiation,
      offense_initiation_successful: d.offense_initiation_successful,
      defense_initiation:            d.defense_initiation,
      defense_initiation_successful: d.defense_initiation_successful,
      offense_main_strategy:         d.offense_main_strategy,
      defense_main_strategy:         d.defense_main_strategy,
      turns:                         d.turns,
      won_point:                     d.won_point,
      notes:                         d.notes,
      players:                       d.players,
    }
  }
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A pointbook store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, mostly for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    tracing::debug!("sqlite schema initialised");
    Ok(())
  }

  /// Run `DELETE ... WHERE <column> = ?1` and report whether a row went.
  async fn delete_by_id(&self, sql: &'static str, id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(id);
    let changed = self
      .conn
      .call(move |conn| Ok(conn.execute(sql, rusqlite::params![id_str])?))
      .await?;
    Ok(changed > 0)
  }
}

// ─── TrackerStore impl ───────────────────────────────────────────────────────

impl TrackerStore for SqliteStore {
  type Error = Error;

  // ── Games ─────────────────────────────────────────────────────────────────

  async fn add_game(&self, input: NewGame) -> Result<Game> {
    let game = Game {
      game_id:     Uuid::new_v4(),
      event:       input.event,
      game_date:   input.game_date,
      opponent:    input.opponent,
      footage_url: input.footage_url,
      created_at:  Utc::now(),
    };

    let id_str   = encode_uuid(game.game_id);
    let date_str = encode_date(game.game_date);
    let at_str   = encode_dt(game.created_at);
    let event    = game.event.clone();
    let opponent = game.opponent.clone();
    let footage  = game.footage_url.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO games (game_id, event, game_date, opponent, footage_url, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![id_str, event, date_str, opponent, footage, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(game)
  }

  async fn get_game(&self, id: Uuid) -> Result<Option<Game>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawGame> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {GAME_COLUMNS} FROM games WHERE game_id = ?1"),
            rusqlite::params![id_str],
            game_from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawGame::into_game).transpose()
  }

  async fn list_games(&self) -> Result<Vec<Game>> {
    let raws: Vec<RawGame> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {GAME_COLUMNS} FROM games ORDER BY game_date, created_at"
        ))?;
        let rows = stmt
          .query_map([], game_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawGame::into_game).collect()
  }

  async fn update_game(&self, id: Uuid, input: NewGame) -> Result<Option<Game>> {
    let id_str   = encode_uuid(id);
    let date_str = encode_date(input.game_date);

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE games SET event = ?2, game_date = ?3, opponent = ?4, footage_url = ?5
           WHERE game_id = ?1",
          rusqlite::params![id_str, input.event, date_str, input.opponent, input.footage_url],
        )?)
      })
      .await?;

    if changed == 0 {
      return Ok(None);
    }
    self.get_game(id).await
  }

  async fn delete_game(&self, id: Uuid) -> Result<bool> {
    self.delete_by_id("DELETE FROM games WHERE game_id = ?1", id).await
  }

  // ── Squad ─────────────────────────────────────────────────────────────────

  async fn add_player(&self, player_name: String) -> Result<Player> {
    let player = Player {
      player_id: Uuid::new_v4(),
      player_name,
      created_at: Utc::now(),
    };

    let id_str = encode_uuid(player.player_id);
    let name   = player.player_name.clone();
    let at_str = encode_dt(player.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO squad (player_id, player_name, created_at) VALUES (?1, ?2, ?3)",
          rusqlite::params![id_str, name, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(player)
  }

  async fn list_players(&self) -> Result<Vec<Player>> {
    let raws: Vec<RawPlayer> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT player_id, player_name, created_at FROM squad
           ORDER BY player_name COLLATE NOCASE",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawPlayer {
              player_id:   row.get(0)?,
              player_name: row.get(1)?,
              created_at:  row.get(2)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPlayer::into_player).collect()
  }

  async fn delete_player(&self, id: Uuid) -> Result<bool> {
    self.delete_by_id("DELETE FROM squad WHERE player_id = ?1", id).await
  }

  // ── Points ────────────────────────────────────────────────────────────────

  async fn record_point(&self, input: NewPoint) -> Result<Point> {
    let game_id     = input.game_id;
    let point_id    = Uuid::new_v4();
    let recorded_at = Utc::now();

    let game_id_str  = encode_uuid(game_id);
    let point_id_str = encode_uuid(point_id);
    let at_str       = encode_dt(recorded_at);
    let requested    = input.point_number;
    let cols         = DetailColumns::from(input.details.clone());

    // Rejections return `Ok(Err(..))`; dropping `tx` rolls them back.
    let point_number = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let game_exists = tx
          .query_row(
            "SELECT 1 FROM games WHERE game_id = ?1",
            rusqlite::params![game_id_str],
            |_| Ok(()),
          )
          .optional()?
          .is_some();
        if !game_exists {
          return Ok(Err(CoreError::GameNotFound(game_id)));
        }
        if let Some(player_id) = unknown_player(&tx, &cols.players)? {
          return Ok(Err(CoreError::UnknownPlayer(player_id)));
        }

        let number: u32 = match requested {
          Some(n) => {
            let taken = tx.query_row(
              "SELECT EXISTS(SELECT 1 FROM points WHERE game_id = ?1 AND point_number = ?2)",
              rusqlite::params![game_id_str, n],
              |r| r.get::<_, bool>(0),
            )?;
            if taken {
              return Ok(Err(CoreError::DuplicatePointNumber(n)));
            }
            n
          }
          None => tx.query_row(
            "SELECT COALESCE(MAX(point_number), 0) + 1 FROM points WHERE game_id = ?1",
            rusqlite::params![game_id_str],
            |r| r.get(0),
          )?,
        };

        tx.execute(
          "INSERT INTO points (
             point_id, game_id, point_number, point_video_url, point_timestamp,
             offense_or_defense, offense_initiation, offense_initiation_successful,
             defense_initiation, defense_initiation_successful,
             offense_main_strategy, defense_main_strategy,
             turns, won_point, notes, recorded_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
          rusqlite::params![
            point_id_str,
            game_id_str,
            number,
            cols.point_video_url,
            cols.point_timestamp,
            cols.side,
            cols.offense_initiation,
            cols.offense_initiation_successful,
            cols.defense_initiation,
            cols.defense_initiation_successful,
            cols.offense_main_strategy,
            cols.defense_main_strategy,
            cols.turns,
            cols.won_point,
            cols.notes,
            at_str,
          ],
        )?;
        insert_lineup(&tx, &point_id_str, &cols.players)?;

        tx.commit()?;
        Ok(Ok(number))
      })
      .await??;

    tracing::debug!(%game_id, point_number, "point recorded");

    Ok(Point {
      point_id,
      game_id,
      point_number,
      details: input.details,
      recorded_at,
    })
  }

  async fn get_point(&self, id: Uuid) -> Result<Option<Point>> {
    let id_str = encode_uuid(id);

    let raws: Vec<RawPoint> = self
      .conn
      .call(move |conn| {
        Ok(query_points(
          conn,
          &format!("SELECT {POINT_COLUMNS} FROM points p WHERE p.point_id = ?1"),
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    raws.into_iter().next().map(RawPoint::into_point).transpose()
  }

  async fn list_points(&self, game_id: Uuid) -> Result<Vec<Point>> {
    let id_str = encode_uuid(game_id);

    let raws: Vec<RawPoint> = self
      .conn
      .call(move |conn| {
        Ok(query_points(
          conn,
          &format!(
            "SELECT {POINT_COLUMNS} FROM points p WHERE p.game_id = ?1 ORDER BY p.point_number"
          ),
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    raws.into_iter().map(RawPoint::into_point).collect()
  }

  async fn update_point(&self, id: Uuid, details: PointDetails) -> Result<Option<Point>> {
    let id_str = encode_uuid(id);
    let cols   = DetailColumns::from(details);

    let found = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let changed = tx.execute(
          "UPDATE points SET
             point_video_url = ?2, point_timestamp = ?3, offense_or_defense = ?4,
             offense_initiation = ?5, offense_initiation_successful = ?6,
             defense_initiation = ?7, defense_initiation_successful = ?8,
             offense_main_strategy = ?9, defense_main_strategy = ?10,
             turns = ?11, won_point = ?12, notes = ?13
           WHERE point_id = ?1",
          rusqlite::params![
            id_str,
            cols.point_video_url,
            cols.point_timestamp,
            cols.side,
            cols.offense_initiation,
            cols.offense_initiation_successful,
            cols.defense_initiation,
            cols.defense_initiation_successful,
            cols.offense_main_strategy,
            cols.defense_main_strategy,
            cols.turns,
            cols.won_point,
            cols.notes,
          ],
        )?;
        if changed == 0 {
          return Ok(Ok(false));
        }
        if let Some(player_id) = unknown_player(&tx, &cols.players)? {
          return Ok(Err(CoreError::UnknownPlayer(player_id)));
        }

        tx.execute(
          "DELETE FROM point_players WHERE point_id = ?1",
          rusqlite::params![id_str],
        )?;
        insert_lineup(&tx, &id_str, &cols.players)?;

        tx.commit()?;
        Ok(Ok(true))
      })
      .await??;

    if !found {
      return Ok(None);
    }
    self.get_point(id).await
  }

  async fn delete_point(&self, id: Uuid) -> Result<bool> {
    self.delete_by_id("DELETE FROM points WHERE point_id = ?1", id).await
  }

  async fn next_point_number(&self, game_id: Uuid) -> Result<u32> {
    let id_str = encode_uuid(game_id);
    let next = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          "SELECT COALESCE(MAX(point_number), 0) + 1 FROM points WHERE game_id = ?1",
          rusqlite::params![id_str],
          |r| r.get::<_, u32>(0),
        )?)
      })
      .await?;
    Ok(next)
  }

  async fn list_outcomes(&self) -> Result<Vec<GameOutcome>> {
    let rows: Vec<(String, bool)> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare("SELECT game_id, won_point FROM points")?;
        let rows = stmt
          .query_map([], |r| Ok((r.get(0)?, r.get(1)?)))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    rows
      .into_iter()
      .map(|(game_id, won_point)| {
        Ok(GameOutcome { game_id: decode_uuid(&game_id)?, won_point })
      })
      .collect()
  }

  async fn search_points(&self, query: &PointQuery) -> Result<Vec<Point>> {
    // Build WHERE clause dynamically; each set filter binds one parameter.
    let mut conds: Vec<String> = vec![];
    let mut values: Vec<Value> = vec![];
    let mut push = |column: &str, value: Value| {
      values.push(value);
      conds.push(format!("p.{column} = ?{}", values.len()));
    };

    if let Some(id) = query.game_id {
      push("game_id", Value::Text(encode_uuid(id)));
    }
    if let Some(side) = query.side {
      push("offense_or_defense", Value::Text(encode_side(side)));
    }
    if let Some(init) = &query.offense_initiation {
      push("offense_initiation", Value::Text(init.clone()));
    }
    if let Some(init) = &query.defense_initiation {
      push("defense_initiation", Value::Text(init.clone()));
    }
    if let Some(ok) = query.offense_success {
      push("offense_initiation_successful", Value::Integer(ok as i64));
    }
    if let Some(ok) = query.defense_success {
      push("defense_initiation_successful", Value::Integer(ok as i64));
    }
    if let Some(turns) = query.turns {
      push("turns", Value::Integer(turns.into()));
    }
    if let Some(won) = query.won_point {
      push("won_point", Value::Integer(won as i64));
    }

    let where_clause = if conds.is_empty() {
      String::new()
    } else {
      format!("WHERE {}", conds.join(" AND "))
    };
    let sql = format!(
      "SELECT {POINT_COLUMNS}
       FROM points p
       JOIN games g ON g.game_id = p.game_id
       {where_clause}
       ORDER BY g.game_date, g.created_at, p.point_number"
    );

    let raws: Vec<RawPoint> = self
      .conn
      .call(move |conn| Ok(query_points(conn, &sql, rusqlite::params_from_iter(values))?))
      .await?;

    raws.into_iter().map(RawPoint::into_point).collect()
  }

  async fn strategy_suggestions(&self) -> Result<StrategySuggestions> {
    let rows: Vec<StrategyRow> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT offense_initiation, defense_initiation,
                  offense_main_strategy, defense_main_strategy
           FROM points
           ORDER BY recorded_at, rowid",
        )?;
        let rows = stmt
          .query_map([], |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?)))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(StrategySuggestions::collect(rows))
  }
}
