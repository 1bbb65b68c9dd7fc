//! Terminal rendering for Dominion
//!
//! Provides visual representation of simulation state: a (glyph, color)
//! pair per cell, the scoreboard, and the views built from them.
//! This module is READ-ONLY - it never modifies simulation state.

pub mod colors;
pub mod scoreboard;
pub mod text;
pub mod tui;

use crate::core::types::TileColor;
use crate::sim::World;

pub use scoreboard::{scoreboard, DomainStatus, ScoreLine};

/// What the renderer draws for one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderCell {
    pub glyph: char,
    pub color: TileColor,
}

/// Collects every cell of the world in row-major order into a reusable buffer.
/// Call this once per frame, passing the same buffer to avoid allocations.
pub fn collect_render_cells(world: &World, buffer: &mut Vec<RenderCell>) {
    buffer.clear();
    buffer.extend(world.tiles().iter().map(|tile| RenderCell {
        glyph: tile.glyph(),
        color: tile.color(),
    }));
}
