//! Interactive setup prompt
//!
//! Asks for grid size, domain count and one starting position per domain.
//! Malformed answers are reported and the same question is asked again.

use std::collections::HashSet;
use std::io::{self, BufRead, Write};

use crate::core::types::{Point, Rect};
use crate::setup::{
    check_dimensions, check_domain_count, check_position, parse_numbers, to_coordinate, Setup,
    SetupError,
};

/// Ask `question` until `parse` accepts the answer
fn ask<R, W, T, F>(input: &mut R, output: &mut W, question: &str, mut parse: F) -> io::Result<T>
where
    R: BufRead,
    W: Write,
    F: FnMut(&str) -> Result<T, SetupError>,
{
    loop {
        write!(output, "{}", question)?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input ended before setup was complete",
            ));
        }

        match parse(line.trim()) {
            Ok(value) => return Ok(value),
            Err(e) => {
                tracing::warn!("Rejected setup input: {}", e);
                writeln!(output, "  {}. Try again.", e)?;
            }
        }
    }
}

pub fn run_wizard<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<Setup> {
    writeln!(output, "=== New game ===")?;

    let dimensions = ask(input, output, "Grid width and height: ", |answer| {
        let values = parse_numbers(answer, 2, 1)?;
        let dims = Rect::new(to_coordinate(values[0], 1)?, to_coordinate(values[1], 1)?);
        check_dimensions(dims)?;
        Ok(dims)
    })?;

    let mut setup = Setup::new(dimensions, Vec::new());

    let count = ask(input, output, "Number of domains: ", |answer| {
        let value = parse_numbers(answer, 1, 1)?[0];
        if value < 0 {
            return Err(SetupError::NegativeDomainCount(value));
        }
        check_domain_count(&setup, value as u64)?;
        Ok(value as usize)
    })?;

    let mut taken = HashSet::new();

    for i in 0..count {
        let question = format!("Domain {} start (row column): ", i + 1);
        let position = ask(input, output, &question, |answer| {
            let values = parse_numbers(answer, 2, 1)?;
            let p = Point::new(to_coordinate(values[0], 1)?, to_coordinate(values[1], 1)?);
            check_position(&setup, p)?;
            if taken.contains(&p) {
                return Err(SetupError::DuplicatePosition(p));
            }
            Ok(p)
        })?;
        taken.insert(position);
        setup.positions.push(position);
    }

    Ok(setup)
}
