//! `pointbook`: terminal UI for browsing games and points.
//!
//! # Usage
//!
//! ```
//! pointbook --url http://localhost:8420
//! pointbook --config ~/.config/pointbook/config.toml --log-file /tmp/pointbook.log
//! ```
//!
//! Settings resolve flag (or env var), then config file, then default.

mod app;
mod client;
mod ui;

use std::{
  fs::File,
  io::{self, Stdout},
  path::{Path, PathBuf},
  sync::Mutex,
  time::Duration,
};

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use client::{ApiClient, ApiConfig};
use crossterm::{
  event::{self, Event, KeyEvent, KeyEventKind},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::backend::CrosstermBackend;
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

const DEFAULT_URL: &str = "http://localhost:8420";

/// How long one poll for input blocks before the next redraw.
const TICK: Duration = Duration::from_millis(50);

#[derive(Parser, Debug, Default)]
#[command(name = "pointbook", about = "Terminal UI for the pointbook game tracker")]
struct Args {
  /// TOML file with `url` and `log_file` keys.
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Server base URL [default: http://localhost:8420].
  #[arg(long, env = "POINTBOOK_URL")]
  url: Option<String>,

  /// Log to this file. Nothing is logged without one.
  #[arg(long, value_name = "FILE", env = "POINTBOOK_LOG_FILE")]
  log_file: Option<PathBuf>,
}

#[derive(Deserialize, Default, Debug)]
#[serde(default)]
struct ConfigFile {
  url:      Option<String>,
  log_file: Option<PathBuf>,
}

impl ConfigFile {
  fn load(path: &Path) -> Result<Self> {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("parsing config file {}", path.display()))
  }
}

/// Effective settings after layering flags over the config file.
#[derive(Debug, PartialEq)]
struct Settings {
  base_url: String,
  log_file: Option<PathBuf>,
}

impl Settings {
  fn resolve(args: Args, file: ConfigFile) -> Self {
    let base_url = [args.url, file.url]
      .into_iter()
      .flatten()
      .map(|url| url.trim().trim_end_matches('/').to_owned())
      .find(|url| !url.is_empty())
      .unwrap_or_else(|| DEFAULT_URL.to_owned());
    Self {
      base_url,
      log_file: args.log_file.or(file.log_file),
    }
  }
}

fn init_logging(path: &Path) -> Result<()> {
  let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .with_writer(Mutex::new(file))
    .with_ansi(false)
    .init();
  Ok(())
}

type Terminal = ratatui::Terminal<CrosstermBackend<Stdout>>;

/// Raw mode and the alternate screen, both undone on drop.
struct TerminalSession {
  terminal: Terminal,
}

impl TerminalSession {
  fn enter() -> Result<Self> {
    let terminal =
      Terminal::new(CrosstermBackend::new(io::stdout())).context("creating terminal")?;
    enable_raw_mode().context("enabling raw mode")?;
    let mut session = Self { terminal };
    execute!(session.terminal.backend_mut(), EnterAlternateScreen)
      .context("entering alternate screen")?;
    Ok(session)
  }
}

impl Drop for TerminalSession {
  fn drop(&mut self) {
    disable_raw_mode().ok();
    execute!(self.terminal.backend_mut(), LeaveAlternateScreen).ok();
    self.terminal.show_cursor().ok();
  }
}

/// Wait up to one [`TICK`] for a key press. Releases and repeats are dropped.
fn next_key_press() -> io::Result<Option<KeyEvent>> {
  tokio::task::block_in_place(|| {
    if !event::poll(TICK)? {
      return Ok(None);
    }
    Ok(match event::read()? {
      Event::Key(key) if key.kind == KeyEventKind::Press => Some(key),
      _ => None,
    })
  })
}

async fn run(session: &mut TerminalSession, app: &mut App) -> Result<()> {
  loop {
    session
      .terminal
      .draw(|f| ui::draw(f, app))
      .context("drawing frame")?;

    if let Some(key) = next_key_press()?
      && !app.handle_key(key).await?
    {
      return Ok(());
    }
  }
}

#[tokio::main]
async fn main() -> Result<()> {
  let mut args = Args::parse();
  let file = match args.config.take() {
    Some(path) => ConfigFile::load(&path)?,
    None => ConfigFile::default(),
  };
  let settings = Settings::resolve(args, file);

  if let Some(path) = &settings.log_file {
    init_logging(path)?;
  }
  tracing::info!(url = %settings.base_url, "starting");

  let mut app = App::new(ApiClient::new(ApiConfig {
    base_url: settings.base_url,
  })?);
  // Fail before touching the terminal when the server is unreachable.
  app.load_games().await?;

  let mut session = TerminalSession::enter()?;
  run(&mut session, &mut app).await
}
