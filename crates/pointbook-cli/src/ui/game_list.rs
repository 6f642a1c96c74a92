//! Games list pane (left panel).

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use super::status_colour;
use crate::app::App;

/// Render the games list into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let filtered = app.filtered_games();
  let total = app.games.len();

  let title = if app.filter_active || !app.filter.is_empty() {
    format!(" Games ({}/{}) ", filtered.len(), total)
  } else {
    format!(" Games ({total}) ")
  };

  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  let items: Vec<ListItem> = filtered
    .iter()
    .map(|summary| {
      let game = &summary.game;
      ListItem::new(vec![
        Line::from(vec![
          Span::styled(
            format!("{:>7} ", summary.score.to_string()),
            Style::default()
              .fg(status_colour(summary.status))
              .add_modifier(Modifier::BOLD),
          ),
          Span::raw(game.opponent.clone()),
        ]),
        Line::from(Span::styled(
          format!("        {}  {}", game.event, game.game_date.format("%Y-%m-%d")),
          Style::default().fg(Color::DarkGray),
        )),
      ])
    })
    .collect();

  let mut inner_area = block.inner(area);
  f.render_widget(block, area);

  // Filter bar on the last inner line.
  if (app.filter_active || !app.filter.is_empty()) && inner_area.height > 2 {
    let filter_area = Rect {
      y: inner_area.y + inner_area.height - 1,
      height: 1,
      ..inner_area
    };
    inner_area.height -= 1;

    let filter_text = if app.filter_active {
      format!("/{}_", app.filter)
    } else {
      format!("/{}", app.filter)
    };
    f.render_widget(
      Paragraph::new(filter_text).style(Style::default().fg(Color::Yellow)),
      filter_area,
    );
  }

  let mut state = ListState::default();
  state.select((!filtered.is_empty()).then_some(app.list_cursor));

  f.render_stateful_widget(
    List::new(items).highlight_style(
      Style::default()
        .bg(Color::Blue)
        .fg(Color::White)
        .add_modifier(Modifier::BOLD),
    ),
    inner_area,
    &mut state,
  );
}
