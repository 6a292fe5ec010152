//! Parsing of hand-drawn ASCII grids, used by tests and debug tooling.

use glam::UVec2;

use crate::error::ParseError;
use crate::map::grid::{Cell, Grid};

/// Parser for converting ASCII rows (`#` wall, `.` open) into a [`Grid`].
pub struct GridParser;

impl GridParser {
    /// Parses a single character into a cell.
    pub fn parse_character(c: char) -> Result<Cell, ParseError> {
        match c {
            '#' => Ok(Cell::Wall),
            '.' => Ok(Cell::Open),
            _ => Err(ParseError::UnknownCharacter(c)),
        }
    }

    /// Parses rows of equal length into a grid. The first row is `y = 0`.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no cells, if a row's length differs from the first row's,
    /// or if any character is not `#` or `.`.
    pub fn parse_rows<S: AsRef<str>>(rows: &[S]) -> Result<Grid, ParseError> {
        let width = rows.first().map(|r| r.as_ref().chars().count()).unwrap_or(0);
        if width == 0 {
            return Err(ParseError::Empty);
        }

        let mut grid = Grid::filled(width as u32, rows.len() as u32);
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let found = row.chars().count();
            if found != width {
                return Err(ParseError::RaggedRow {
                    row: y,
                    expected: width,
                    found,
                });
            }

            for (x, character) in row.chars().enumerate() {
                grid.set(UVec2::new(x as u32, y as u32), Self::parse_character(character)?);
            }
        }

        Ok(grid)
    }
}

impl Grid {
    /// Shorthand for [`GridParser::parse_rows`].
    pub fn parse<S: AsRef<str>>(rows: &[S]) -> Result<Grid, ParseError> {
        GridParser::parse_rows(rows)
    }
}
