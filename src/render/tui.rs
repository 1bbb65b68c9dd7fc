//! ratatui view: grid on the left, scoreboard and event feed on the right

use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};
use ratatui::Frame;

use super::colors::tui_color;
use super::{collect_render_cells, ScoreLine};
use crate::sim::World;
use crate::ui::ViewState;

/// Narrowest the side panel may get
const SIDE_PANEL_MIN_WIDTH: u16 = 40;

/// Draw one frame
pub fn draw(frame: &mut Frame, world: &World, scores: &[ScoreLine], view: &ViewState) {
    let grid_width = world.dimensions().width.max(0) as u16;
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(grid_width.saturating_add(2)),
            Constraint::Min(SIDE_PANEL_MIN_WIDTH),
        ])
        .split(frame.size());

    let grid = Paragraph::new(grid_lines(world)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title(world, view)),
    );
    frame.render_widget(grid, columns[0]);

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(scores.len() as u16 + 2),
            Constraint::Min(3),
            Constraint::Length(3),
        ])
        .split(columns[1]);

    let board = Paragraph::new(scoreboard_lines(scores))
        .block(Block::default().borders(Borders::ALL).title(" Domains "));
    frame.render_widget(board, side[0]);

    if view.show_events {
        let rows = side[1].height.saturating_sub(2) as usize;
        let items: Vec<ListItem> = event_lines(world, rows).into_iter().map(ListItem::new).collect();
        let feed = List::new(items).block(Block::default().borders(Borders::ALL).title(" Events "));
        frame.render_widget(feed, side[1]);
    }

    let status = Paragraph::new(status_line(world, view))
        .block(Block::default().borders(Borders::ALL).title(" q quit | space pause | s step | +/- speed | e events "));
    frame.render_widget(status, side[2]);
}

fn title(world: &World, view: &ViewState) -> String {
    if view.paused {
        format!(" Dominion | tick {} | paused ", world.tick())
    } else {
        format!(" Dominion | tick {} ", world.tick())
    }
}

/// Grid rows as colored lines, one span per cell
pub fn grid_lines(world: &World) -> Vec<Line<'static>> {
    let width = world.dimensions().width.max(1) as usize;
    let mut cells = Vec::with_capacity(world.dimensions().area());
    collect_render_cells(world, &mut cells);

    cells
        .chunks(width)
        .map(|row| {
            let spans: Vec<Span<'static>> = row
                .iter()
                .map(|cell| {
                    Span::styled(cell.glyph.to_string(), Style::default().fg(tui_color(cell.color)))
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

/// One line per domain: a colored swatch followed by the figures
pub fn scoreboard_lines(scores: &[ScoreLine]) -> Vec<Line<'static>> {
    scores
        .iter()
        .map(|score| {
            let style = Style::default().fg(tui_color(score.color));
            let text_style = if score.tiles == 0 {
                style.add_modifier(Modifier::DIM)
            } else {
                style
            };
            Line::from(vec![
                Span::styled("■ ".to_string(), style),
                Span::styled(score.to_string(), text_style),
            ])
        })
        .collect()
}

/// The newest `n` events, oldest first
pub fn event_lines(world: &World, n: usize) -> Vec<Line<'static>> {
    world
        .events()
        .recent(n)
        .iter()
        .map(|event| Line::from(format!("[{:>5}] {}", event.tick, event.event_type)))
        .collect()
}

fn status_line(world: &World, view: &ViewState) -> Line<'static> {
    if let Some(winner) = world.winner() {
        return Line::from(Span::styled(
            format!("Domain {} controls the map. Press q to leave.", winner),
            Style::default().add_modifier(Modifier::BOLD),
        ));
    }
    Line::from(view.last_message().unwrap_or("").to_string())
}
