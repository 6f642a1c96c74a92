//! Frame layout: a title row, the games and points panes, and a key-hint row.

pub mod game_detail;
pub mod game_list;

use chrono::Local;
use pointbook_core::score::ScoreStatus;
use ratatui::{
  Frame,
  layout::{Alignment, Constraint, Layout, Rect},
  style::{Color, Modifier, Style, Stylize as _},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
};

use crate::app::{App, Screen};

pub fn draw(f: &mut Frame, app: &App) {
  let [title, body, hints] =
    Layout::vertical([Constraint::Length(1), Constraint::Fill(1), Constraint::Length(1)])
      .areas(f.area());
  let [list, detail] =
    Layout::horizontal([Constraint::Percentage(35), Constraint::Percentage(65)]).areas(body);

  draw_title(f, title, app);
  game_list::draw(f, list, app);
  if app.selected_game_id.is_some() {
    game_detail::draw(f, detail, app);
  } else {
    draw_placeholder(f, detail);
  }
  draw_hints(f, hints, app);
}

/// Terminal colour for a score in `status`.
pub fn status_colour(status: ScoreStatus) -> Color {
  let hex = status.colour().trim_start_matches('#');
  let channel = |i: usize| hex.get(i..i + 2).and_then(|c| u8::from_str_radix(c, 16).ok());
  match (channel(0), channel(2), channel(4)) {
    (Some(r), Some(g), Some(b)) => Color::Rgb(r, g, b),
    _ => Color::Reset,
  }
}

/// App name, or the open game's matchup, on the left; today's date on the right.
fn draw_title(f: &mut Frame, area: Rect, app: &App) {
  let bar = Style::default().bg(Color::DarkGray);
  let name = match app.selected_game() {
    Some(s) => format!(" pointbook · {} vs {}", s.game.event, s.game.opponent),
    None => " pointbook".to_owned(),
  };

  let date = format!("{} ", Local::now().format("%a %d %b %Y"));

  f.render_widget(
    Paragraph::new(Span::styled(
      name,
      Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    ))
    .style(bar),
    area,
  );
  // Drawn over the title row; only the date's own cells change.
  f.render_widget(
    Paragraph::new(Span::styled(date, Style::default().fg(Color::Gray)))
      .alignment(Alignment::Right),
    area,
  );
}

fn draw_placeholder(f: &mut Frame, area: Rect) {
  let hint = Paragraph::new("\nno game open\n\npick one on the left with Enter")
    .alignment(Alignment::Center)
    .dark_gray()
    .block(
      Block::default()
        .title(" Points ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray)),
    );
  f.render_widget(hint, area);
}

type Keys = &'static [(&'static str, &'static str)];

const FILTER_KEYS: Keys = &[("type", "match"), ("Enter", "apply"), ("Esc", "clear")];
const LIST_KEYS: Keys =
  &[("j/k", "move"), ("Enter", "open"), ("/", "filter"), ("r", "reload"), ("q", "quit")];
const DETAIL_KEYS: Keys = &[("j/k", "scroll"), ("Esc", "back"), ("r", "reload"), ("q", "quit")];

/// Mode badge text and `(key, action)` pairs for the bottom row.
fn key_hints(app: &App) -> (&'static str, Keys) {
  match app.screen {
    Screen::GameList if app.filter_active => ("FILTER", FILTER_KEYS),
    Screen::GameList => ("GAMES", LIST_KEYS),
    Screen::GameDetail => ("POINTS", DETAIL_KEYS),
  }
}

/// Mode badge followed by the status message, or key hints when there is none.
fn draw_hints(f: &mut Frame, area: Rect, app: &App) {
  let (mode, keys) = key_hints(app);
  let mut spans = vec![Span::styled(
    format!(" {mode} "),
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  )];

  if app.status_msg.is_empty() {
    for (key, action) in keys {
      spans.push(Span::raw("  "));
      spans.push(Span::styled(*key, Style::default().fg(Color::Yellow)));
      spans.push(Span::styled(format!(" {action}"), Style::default().fg(Color::DarkGray)));
    }
  } else {
    let colour = if app.status_msg.starts_with("Error") {
      Color::Red
    } else {
      Color::Gray
    };
    spans.push(Span::styled(format!("  {}", app.status_msg), Style::default().fg(colour)));
  }

  f.render_widget(Paragraph::new(Line::from(spans)).on_black(), area);
}
