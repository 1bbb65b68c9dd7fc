//! Plain-text and ANSI renderings, for logs and the headless runner

use std::fmt::Write as _;

use crossterm::style::Stylize;

use super::colors::ansi_color;
use super::{collect_render_cells, RenderCell, ScoreLine};
use crate::sim::World;

/// Grid as glyph rows, one line per row
pub fn render_plain(world: &World) -> String {
    render_with(world, |cell, out| out.push(cell.glyph))
}

/// Grid as glyph rows with ANSI color escapes
pub fn render_ansi(world: &World) -> String {
    render_with(world, |cell, out| {
        let _ = write!(out, "{}", cell.glyph.with(ansi_color(cell.color)));
    })
}

fn render_with(world: &World, mut draw: impl FnMut(&RenderCell, &mut String)) -> String {
    let width = world.dimensions().width as usize;
    let mut cells = Vec::with_capacity(world.dimensions().area());
    collect_render_cells(world, &mut cells);

    let mut out = String::with_capacity(cells.len() * 2);
    for row in cells.chunks(width.max(1)) {
        for cell in row {
            draw(cell, &mut out);
        }
        out.push('\n');
    }
    out
}

/// Scoreboard as text, one domain per line
pub fn render_scoreboard(lines: &[ScoreLine], ansi: bool) -> String {
    let mut out = String::new();
    for line in lines {
        if ansi {
            let _ = writeln!(out, "{}", line.to_string().with(ansi_color(line.color)));
        } else {
            let _ = writeln!(out, "{}", line);
        }
    }
    out
}
