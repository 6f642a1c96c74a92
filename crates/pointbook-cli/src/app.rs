//! Application state machine and event dispatcher.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use fuzzy_matcher::{FuzzyMatcher, skim::SkimMatcherV2};
use pointbook_core::view::{GameSummary, PointRow};
use uuid::Uuid;

use crate::client::ApiClient;

// ─── Screen ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
  /// Focus on the games list.
  GameList,
  /// Focus on the point list of the selected game.
  GameDetail,
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App {
  pub screen: Screen,

  /// Every game with its final score, in date order.
  pub games: Vec<GameSummary>,

  /// Current fuzzy-filter string (only edited while `filter_active`).
  pub filter: String,

  /// Whether the user is typing a filter query.
  pub filter_active: bool,

  /// Cursor position within the *filtered* games list.
  pub list_cursor: usize,

  /// First visible row in the detail pane.
  pub detail_scroll: usize,

  pub selected_game_id: Option<Uuid>,

  /// Point rows for the selected game.
  pub rows: Vec<PointRow>,

  /// One-line status message shown in the status bar.
  pub status_msg: String,

  pub client: Arc<ApiClient>,
}

impl App {
  pub fn new(client: ApiClient) -> Self {
    Self {
      screen: Screen::GameList,
      games: Vec::new(),
      filter: String::new(),
      filter_active: false,
      list_cursor: 0,
      detail_scroll: 0,
      selected_game_id: None,
      rows: Vec::new(),
      status_msg: String::new(),
      client: Arc::new(client),
    }
  }

  // ── Data loading ──────────────────────────────────────────────────────────

  /// Fetch all games from the API into `self.games`.
  pub async fn load_games(&mut self) -> anyhow::Result<()> {
    self.status_msg = "Loading games…".into();
    match self.client.list_games().await {
      Ok(games) => {
        tracing::debug!(count = games.len(), "games loaded");
        self.games = games;
        self.list_cursor = self.list_cursor.min(self.games.len().saturating_sub(1));
        self.status_msg = String::new();
        Ok(())
      }
      Err(e) => {
        tracing::warn!(error = %e, "loading games failed");
        self.status_msg = format!("Error: {e}");
        Err(e)
      }
    }
  }

  async fn load_rows(&mut self, game_id: Uuid) -> anyhow::Result<()> {
    self.status_msg = "Loading points…".into();
    match self.client.game_points(game_id).await {
      Ok(rows) => {
        tracing::debug!(%game_id, count = rows.len(), "points loaded");
        self.rows = rows;
        self.detail_scroll = 0;
        self.status_msg = String::new();
        Ok(())
      }
      Err(e) => {
        tracing::warn!(%game_id, error = %e, "loading points failed");
        self.status_msg = format!("Error: {e}");
        Err(e)
      }
    }
  }

  /// Reload games, and the open game's points when in detail view.
  /// Failures stay in the status bar instead of ending the session.
  async fn reload(&mut self) {
    if self.load_games().await.is_err() {
      return;
    }
    if let Some(id) = self.selected_game_id {
      let _ = self.load_rows(id).await;
    }
  }

  // ── Filtered list ─────────────────────────────────────────────────────────

  /// Games whose opponent or event fuzzy-matches the filter.
  pub fn filtered_games(&self) -> Vec<&GameSummary> {
    if self.filter.is_empty() {
      return self.games.iter().collect();
    }
    let matcher = SkimMatcherV2::default();
    self
      .games
      .iter()
      .filter(|s| {
        matcher.fuzzy_match(&s.game.opponent, &self.filter).is_some()
          || matcher.fuzzy_match(&s.game.event, &self.filter).is_some()
      })
      .collect()
  }

  pub fn cursor_game(&self) -> Option<&GameSummary> {
    self.filtered_games().get(self.list_cursor).copied()
  }

  pub fn selected_game(&self) -> Option<&GameSummary> {
    let id = self.selected_game_id?;
    self.games.iter().find(|s| s.game.game_id == id)
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub async fn handle_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return Ok(false);
    }

    if self.filter_active {
      return self.handle_filter_key(key).await;
    }

    match self.screen {
      Screen::GameList => self.handle_list_key(key).await,
      Screen::GameDetail => self.handle_detail_key(key).await,
    }
  }

  async fn handle_filter_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    match key.code {
      KeyCode::Esc => {
        self.filter_active = false;
        self.filter.clear();
        self.list_cursor = 0;
      }
      KeyCode::Enter => {
        self.filter_active = false;
        self.list_cursor = 0;
        // A single match opens straight away.
        let only = match self.filtered_games().as_slice() {
          [only] => Some(only.game.game_id),
          _ => None,
        };
        if let Some(id) = only {
          self.open_detail(id).await;
        }
      }
      KeyCode::Backspace => {
        self.filter.pop();
        self.list_cursor = 0;
      }
      KeyCode::Char(c) => {
        self.filter.push(c);
        self.list_cursor = 0;
      }
      _ => {}
    }
    Ok(true)
  }

  async fn handle_list_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    match key.code {
      KeyCode::Char('q') => return Ok(false),

      KeyCode::Down | KeyCode::Char('j') => {
        let len = self.filtered_games().len();
        if self.list_cursor + 1 < len {
          self.list_cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.list_cursor = self.list_cursor.saturating_sub(1);
      }

      KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => {
        if let Some(id) = self.cursor_game().map(|s| s.game.game_id) {
          self.open_detail(id).await;
        }
      }

      KeyCode::Char('/') => {
        self.filter_active = true;
        self.filter.clear();
        self.list_cursor = 0;
      }

      KeyCode::Char('r') => self.reload().await,

      _ => {}
    }
    Ok(true)
  }

  async fn handle_detail_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    match key.code {
      KeyCode::Char('q') => return Ok(false),

      KeyCode::Esc | KeyCode::Left | KeyCode::Char('h') => {
        self.screen = Screen::GameList;
        self.selected_game_id = None;
        self.rows.clear();
      }

      KeyCode::Down | KeyCode::Char('j') => {
        if self.detail_scroll + 1 < self.rows.len() {
          self.detail_scroll += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.detail_scroll = self.detail_scroll.saturating_sub(1);
      }

      KeyCode::Char('r') => self.reload().await,

      _ => {}
    }
    Ok(true)
  }

  /// Switch to `GameDetail` for `game_id`, loading its points. On a failed
  /// load the list stays up and the error stays in the status bar.
  async fn open_detail(&mut self, game_id: Uuid) {
    if self.load_rows(game_id).await.is_ok() {
      self.selected_game_id = Some(game_id);
      self.screen = Screen::GameDetail;
    }
  }
}

#[cfg(test)]
mod tests {
  use chrono::{NaiveDate, Utc};
  use crossterm::event::KeyEventKind;
  use pointbook_core::{game::Game, score::Score};

  use super::*;
  use crate::client::ApiConfig;

  fn key(code: KeyCode) -> KeyEvent {
    KeyEvent {
      code,
      modifiers: KeyModifiers::NONE,
      kind: KeyEventKind::Press,
      state: crossterm::event::KeyEventState::NONE,
    }
  }

  fn summary(opponent: &str, event: &str) -> GameSummary {
    let score = Score::new(3, 1);
    GameSummary {
      game: Game {
        game_id:     Uuid::new_v4(),
        event:       event.into(),
        game_date:   NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        opponent:    opponent.into(),
        footage_url: None,
        created_at:  Utc::now(),
      },
      score,
      status: score.status(),
    }
  }

  fn app_with_games() -> App {
    let client = ApiClient::new(ApiConfig {
      base_url: "http://127.0.0.1:9".into(),
    })
    .unwrap();
    let mut app = App::new(client);
    app.games = vec![
      summary("Rivals United", "Regionals"),
      summary("Neighbours", "Nationals"),
      summary("Old Friends", "Nationals"),
    ];
    app
  }

  #[tokio::test]
  async fn cursor_stays_in_bounds() {
    let mut app = app_with_games();
    app.handle_key(key(KeyCode::Char('k'))).await.unwrap();
    assert_eq!(app.list_cursor, 0);

    for _ in 0..5 {
      app.handle_key(key(KeyCode::Char('j'))).await.unwrap();
    }
    assert_eq!(app.list_cursor, 2);
  }

  #[tokio::test]
  async fn filter_narrows_by_opponent_or_event() {
    let mut app = app_with_games();
    app.handle_key(key(KeyCode::Char('/'))).await.unwrap();
    assert!(app.filter_active);

    for c in "nationals".chars() {
      app.handle_key(key(KeyCode::Char(c))).await.unwrap();
    }
    assert_eq!(app.filtered_games().len(), 2);

    app.handle_key(key(KeyCode::Esc)).await.unwrap();
    assert!(!app.filter_active);
    assert_eq!(app.filtered_games().len(), 3);
  }

  #[tokio::test]
  async fn q_quits_from_list() {
    let mut app = app_with_games();
    assert!(!app.handle_key(key(KeyCode::Char('q'))).await.unwrap());
  }

  #[tokio::test]
  async fn failed_points_load_keeps_the_list_open() {
    let mut app = app_with_games();

    assert!(app.handle_key(key(KeyCode::Enter)).await.unwrap());
    assert_eq!(app.screen, Screen::GameList);
    assert!(app.selected_game_id.is_none());
    assert!(app.status_msg.starts_with("Error"), "{}", app.status_msg);

    // Same through the single-match filter shortcut.
    app.handle_key(key(KeyCode::Char('/'))).await.unwrap();
    for c in "rivals".chars() {
      app.handle_key(key(KeyCode::Char(c))).await.unwrap();
    }
    assert!(app.handle_key(key(KeyCode::Enter)).await.unwrap());
    assert_eq!(app.screen, Screen::GameList);
  }

  #[tokio::test]
  async fn esc_returns_to_list() {
    let mut app = app_with_games();
    app.screen = Screen::GameDetail;
    app.selected_game_id = Some(app.games[0].game.game_id);

    assert!(app.handle_key(key(KeyCode::Esc)).await.unwrap());
    assert_eq!(app.screen, Screen::GameList);
    assert!(app.selected_game_id.is_none());
  }
}
