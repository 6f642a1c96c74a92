//! Point list for the selected game (right panel).

use pointbook_core::view::PointRow;
use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
};

use super::status_colour;
use crate::app::App;

/// Render the point list into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let title = app
    .selected_game()
    .map(|s| format!(" {} vs {} ({}) ", s.game.event, s.game.opponent, s.score))
    .unwrap_or_else(|| " Points ".to_string());

  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  let inner = block.inner(area);
  f.render_widget(block, area);

  if app.rows.is_empty() {
    f.render_widget(
      Paragraph::new("No points recorded.").style(Style::default().fg(Color::DarkGray)),
      inner,
    );
    return;
  }

  let header = Line::from(Span::styled(
    format!(
      "{:>3}  {:>7}  {:<8} {:<18} {:<18} {:<3} Clip",
      "#", "Score", "Side", "Initiation", "Strategy", "W/L"
    ),
    Style::default()
      .fg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  ));

  let lines: Vec<Line> = std::iter::once(header)
    .chain(app.rows.iter().skip(app.detail_scroll).map(row_line))
    .collect();

  f.render_widget(Paragraph::new(lines), inner);
}

fn row_line(row: &PointRow) -> Line<'static> {
  let details = &row.point.details;
  let (result, result_colour) = if details.won_point {
    ("W", Color::Green)
  } else {
    ("L", Color::Red)
  };
  let clip = match &row.clip_url {
    Some(url) => Span::raw(url.clone()),
    None => Span::styled("No URL", Style::default().fg(Color::DarkGray)),
  };

  Line::from(vec![
    Span::raw(format!("{:>3}  ", row.point.point_number)),
    Span::styled(
      format!("{:>7}  ", row.score().to_string()),
      Style::default().fg(status_colour(row.status)),
    ),
    Span::raw(format!("{:<8} ", details.side.to_string())),
    Span::raw(format!("{:<18} ", truncate(row.initiation.as_deref().unwrap_or("-"), 18))),
    Span::raw(format!("{:<18} ", truncate(row.main_strategy.as_deref().unwrap_or("-"), 18))),
    Span::styled(format!("{result:<3} "), Style::default().fg(result_colour)),
    clip,
  ])
}

/// Cut `s` to at most `max` characters.
fn truncate(s: &str, max: usize) -> String {
  match s.char_indices().nth(max) {
    Some((idx, _)) => s[..idx].to_string(),
    None => s.to_string(),
  }
}
