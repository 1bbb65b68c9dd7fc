//! Mapping from the simulation's console palette to terminal colors

use crate::core::types::TileColor;

/// Color for the ratatui view. Console "bright" colors are ratatui's
/// `Light*` variants; console "dark" colors are ratatui's plain ones.
pub fn tui_color(color: TileColor) -> ratatui::style::Color {
    use ratatui::style::Color;

    match color {
        TileColor::Black => Color::Black,
        TileColor::DarkBlue => Color::Blue,
        TileColor::DarkGreen => Color::Green,
        TileColor::DarkCyan => Color::Cyan,
        TileColor::DarkRed => Color::Red,
        TileColor::DarkMagenta => Color::Magenta,
        TileColor::DarkYellow => Color::Yellow,
        TileColor::Gray => Color::Gray,
        TileColor::DarkGray => Color::DarkGray,
        TileColor::Blue => Color::LightBlue,
        TileColor::Green => Color::LightGreen,
        TileColor::Cyan => Color::LightCyan,
        TileColor::Red => Color::LightRed,
        TileColor::Magenta => Color::LightMagenta,
        TileColor::Yellow => Color::LightYellow,
        TileColor::White => Color::White,
    }
}

/// Color for plain ANSI output
pub fn ansi_color(color: TileColor) -> crossterm::style::Color {
    use crossterm::style::Color;

    match color {
        TileColor::Black => Color::Black,
        TileColor::DarkBlue => Color::DarkBlue,
        TileColor::DarkGreen => Color::DarkGreen,
        TileColor::DarkCyan => Color::DarkCyan,
        TileColor::DarkRed => Color::DarkRed,
        TileColor::DarkMagenta => Color::DarkMagenta,
        TileColor::DarkYellow => Color::DarkYellow,
        TileColor::Gray => Color::Grey,
        TileColor::DarkGray => Color::DarkGrey,
        TileColor::Blue => Color::Blue,
        TileColor::Green => Color::Green,
        TileColor::Cyan => Color::Cyan,
        TileColor::Red => Color::Red,
        TileColor::Magenta => Color::Magenta,
        TileColor::Yellow => Color::Yellow,
        TileColor::White => Color::White,
    }
}
