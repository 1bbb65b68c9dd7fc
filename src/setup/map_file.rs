//! Map file format
//!
//! ```text
//! width: 20
//! height: 12
//! domains: 2
//! position: 3 3
//! position: 8 15
//! ####################
//! #..................#
//! ```
//!
//! Labels are case-insensitive. Blank lines in the header are skipped. The
//! first line without a `label:` prefix starts the literal grid; every line
//! from there on is a grid row. A file without grid rows gets the default
//! bordered rectangle.

use std::path::Path;

use crate::core::error::Result;
use crate::core::types::{Point, Rect};
use crate::setup::{parse_numbers, to_coordinate, Layout, Setup, SetupError};

/// Split `label: value` header lines; anything else is grid content
fn header_field(line: &str) -> Option<(String, &str)> {
    let (label, value) = line.split_once(':')?;
    let label = label.trim();
    if label.is_empty() || !label.chars().all(|c| c.is_ascii_alphabetic() || c == '_') {
        return None;
    }
    Some((label.to_ascii_lowercase(), value))
}

pub fn parse_map_file(content: &str) -> std::result::Result<Setup, SetupError> {
    let mut width = None;
    let mut height = None;
    let mut domain_count = None;
    let mut positions = Vec::new();
    let mut grid_rows: Vec<&str> = Vec::new();

    let mut lines = content.lines().enumerate().peekable();

    while let Some(&(index, raw)) = lines.peek() {
        let line_no = index + 1;
        let line = raw.trim();
        if line.is_empty() {
            lines.next();
            continue;
        }

        let Some((label, value)) = header_field(line) else {
            break;
        };
        lines.next();

        match label.as_str() {
            "width" => width = Some(to_coordinate(parse_numbers(value, 1, line_no)?[0], line_no)?),
            "height" => height = Some(to_coordinate(parse_numbers(value, 1, line_no)?[0], line_no)?),
            "domains" => {
                let count = parse_numbers(value, 1, line_no)?[0];
                if count < 0 {
                    return Err(SetupError::NegativeDomainCount(count));
                }
                domain_count = Some(count as usize);
            }
            "position" => {
                let values = parse_numbers(value, 2, line_no)?;
                positions.push(Point::new(
                    to_coordinate(values[0], line_no)?,
                    to_coordinate(values[1], line_no)?,
                ));
            }
            _ => return Err(SetupError::UnknownLabel { line: line_no, label }),
        }
    }

    for (_, raw) in lines {
        grid_rows.push(raw.trim_end_matches('\r'));
    }
    while grid_rows.last().is_some_and(|r| r.trim().is_empty()) {
        grid_rows.pop();
    }

    let width = width.ok_or(SetupError::MissingField("width"))?;
    let height = height.ok_or(SetupError::MissingField("height"))?;

    if let Some(expected) = domain_count {
        if expected != positions.len() {
            return Err(SetupError::PositionCountMismatch {
                expected,
                found: positions.len(),
            });
        }
    }

    let mut setup = Setup::new(Rect::new(width, height), positions);
    if !grid_rows.is_empty() {
        setup = setup.with_layout(Layout::from_rows(grid_rows));
    }

    setup.validate()?;
    Ok(setup)
}

pub fn load_map_file(path: &Path) -> Result<Setup> {
    let content = std::fs::read_to_string(path)?;
    let setup = parse_map_file(&content)?;
    tracing::debug!(
        path = %path.display(),
        domains = setup.positions.len(),
        custom_layout = setup.layout.is_some(),
        "Loaded map file"
    );
    Ok(setup)
}
