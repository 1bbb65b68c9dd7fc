//! World setup: grid dimensions, starting positions and optional layout
//!
//! Setups come from a map file (`map_file`), the interactive prompt
//! (`wizard`), or command-line flags. All of them are validated here before a
//! `World` is built; the world itself trusts its input.

pub mod map_file;
pub mod wizard;

use std::collections::HashSet;

use thiserror::Error;

use crate::core::types::{Point, Rect};

pub use map_file::{load_map_file, parse_map_file};
pub use wizard::run_wizard;

/// Smallest grid with at least one cell inside the border frame
pub const MIN_GRID: Rect = Rect::new(3, 3);

/// Largest grid a setup may ask for
pub const MAX_GRID: Rect = Rect::new(1024, 1024);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    #[error("missing field: {0}")]
    MissingField(&'static str),

    #[error("line {line}: '{token}' is not a whole number")]
    InvalidNumber { line: usize, token: String },

    #[error("line {line}: expected {expected} value(s), found {found}")]
    WrongArity { line: usize, expected: usize, found: usize },

    #[error("line {line}: unknown field '{label}'")]
    UnknownLabel { line: usize, label: String },

    #[error("domain count cannot be negative (got {0})")]
    NegativeDomainCount(i64),

    #[error("expected {expected} starting position(s), found {found}")]
    PositionCountMismatch { expected: usize, found: usize },

    #[error("grid {}x{} is too small (minimum {}x{})", .0.width, .0.height, MIN_GRID.width, MIN_GRID.height)]
    GridTooSmall(Rect),

    #[error("grid {}x{} is too large (maximum {}x{})", .0.width, .0.height, MAX_GRID.width, MAX_GRID.height)]
    GridTooLarge(Rect),

    #[error("{requested} domain(s) do not fit in {available} open cell(s)")]
    TooManyDomains { requested: u64, available: usize },

    #[error("starting position {0} is outside the grid")]
    OutOfBounds(Point),

    #[error("starting position {0} is on the border")]
    OnBorder(Point),

    #[error("starting position {0} is used twice")]
    DuplicatePosition(Point),
}

/// Custom map layout as literal character rows. `#` is border, anything
/// else is empty ground. Cells beyond a short row or past the last row are
/// empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    rows: Vec<Vec<char>>,
}

impl Layout {
    pub const BORDER: char = '#';

    pub fn from_rows<I, S>(rows: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|r| r.as_ref().chars().collect())
                .collect(),
        }
    }

    pub fn rows(&self) -> &[Vec<char>] {
        &self.rows
    }

    pub fn is_border(&self, p: Point) -> bool {
        if p.row < 0 || p.col < 0 {
            return false;
        }
        self.rows
            .get(p.row as usize)
            .and_then(|row| row.get(p.col as usize))
            .is_some_and(|&c| c == Self::BORDER)
    }
}

/// Everything needed to build a world
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Setup {
    pub dimensions: Rect,
    /// One per domain, in roster order
    pub positions: Vec<Point>,
    pub layout: Option<Layout>,
}

impl Setup {
    pub fn new(dimensions: Rect, positions: Vec<Point>) -> Self {
        Self {
            dimensions,
            positions,
            layout: None,
        }
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Whether `p` starts out as a border tile
    pub fn is_border(&self, p: Point) -> bool {
        match &self.layout {
            Some(layout) => layout.is_border(p),
            None => self.dimensions.is_on_frame(p),
        }
    }

    /// Cells a domain may start on. Only meaningful once the dimensions
    /// have passed `check_dimensions`.
    pub fn open_cells(&self) -> usize {
        let mut open = 0;
        for row in 0..self.dimensions.height {
            for col in 0..self.dimensions.width {
                if !self.is_border(Point::new(row, col)) {
                    open += 1;
                }
            }
        }
        open
    }

    pub fn validate(&self) -> Result<(), SetupError> {
        check_dimensions(self.dimensions)?;
        check_domain_count(self, self.positions.len() as u64)?;
        let mut seen = HashSet::new();
        for &p in &self.positions {
            check_position(self, p)?;
            if !seen.insert(p) {
                return Err(SetupError::DuplicatePosition(p));
            }
        }
        Ok(())
    }
}

/// Build and validate a setup from command-line values
pub fn from_flags(width: i32, height: i32, positions: Vec<Point>) -> Result<Setup, SetupError> {
    let setup = Setup::new(Rect::new(width, height), positions);
    setup.validate()?;
    Ok(setup)
}

/// Parse a `row,column` (or `row column`) command-line position
pub fn parse_position_arg(text: &str) -> Result<Point, SetupError> {
    let values = parse_numbers(&text.replace(',', " "), 2, 1)?;
    Ok(Point::new(to_coordinate(values[0], 1)?, to_coordinate(values[1], 1)?))
}

pub(crate) fn check_dimensions(dimensions: Rect) -> Result<(), SetupError> {
    if dimensions.width < MIN_GRID.width || dimensions.height < MIN_GRID.height {
        return Err(SetupError::GridTooSmall(dimensions));
    }
    if dimensions.width > MAX_GRID.width || dimensions.height > MAX_GRID.height {
        return Err(SetupError::GridTooLarge(dimensions));
    }
    Ok(())
}

pub(crate) fn check_domain_count(setup: &Setup, requested: u64) -> Result<(), SetupError> {
    let available = setup.open_cells();
    if requested > available as u64 {
        return Err(SetupError::TooManyDomains { requested, available });
    }
    Ok(())
}

pub(crate) fn check_position(setup: &Setup, p: Point) -> Result<(), SetupError> {
    if !setup.dimensions.contains(p) {
        return Err(SetupError::OutOfBounds(p));
    }
    if setup.is_border(p) {
        return Err(SetupError::OnBorder(p));
    }
    Ok(())
}

/// Parse every whitespace-separated token of `text` as an integer and
/// require exactly `expected` of them
pub(crate) fn parse_numbers(text: &str, expected: usize, line: usize) -> Result<Vec<i64>, SetupError> {
    let values = text
        .split_whitespace()
        .map(|token| {
            token.parse::<i64>().map_err(|_| SetupError::InvalidNumber {
                line,
                token: token.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if values.len() != expected {
        return Err(SetupError::WrongArity {
            line,
            expected,
            found: values.len(),
        });
    }
    Ok(values)
}

pub(crate) fn to_coordinate(value: i64, line: usize) -> Result<i32, SetupError> {
    i32::try_from(value).map_err(|_| SetupError::InvalidNumber {
        line,
        token: value.to_string(),
    })
}
