//! Flat text grid format.
//!
//! The first line gives the size as `<rows>x<cols>`. Each following line is
//! one row of exactly `cols` characters, `1` for a live cell and `0` for a
//! dead one:
//!
//! ```text
//! 3x4
//! 0110
//! 1001
//! 0110
//! ```

use thiserror::Error;

use crate::config::{self, ConfigError};
use crate::grid::BitGrid;

/// Result type returned by fallible text grid routines.
pub type LoadResult<T> = Result<T, LoadError>;

/// Error encountered while loading a text grid.
#[allow(missing_docs)]
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("file is empty")]
    Empty,
    #[error("invalid grid dimensions: {0}")]
    BadHeader(#[from] ConfigError),
    #[error("file data incomplete: expected {expected} rows, found {found}")]
    MissingRows { expected: usize, found: usize },
    #[error("row {row} has incorrect length: expected {expected}, found {found}")]
    BadRowLength { row: usize, expected: usize, found: usize },
    #[error("row {row} has invalid character {ch:?} at column {col}")]
    BadCell { row: usize, col: usize, ch: char },
    #[error("unexpected data after row {rows}")]
    TrailingData { rows: usize },
    #[error("unable to read grid file: {0}")]
    Io(#[from] std::io::Error),
}

/// Parses a grid from text. Nothing is allocated for the grid until the
/// header has been validated.
pub fn parse(text: &str) -> LoadResult<BitGrid> {
    let mut lines = text.lines().map(str::trim);
    let header = lines.next().filter(|line| !line.is_empty()).ok_or(LoadError::Empty)?;
    let (rows, cols) = config::parse_size(header)?;

    let mut grid = BitGrid::new(rows, cols);
    for y in 0..rows {
        let line = lines.next().ok_or(LoadError::MissingRows {
            expected: rows,
            found: y,
        })?;
        let found = line.chars().count();
        if found != cols {
            return Err(LoadError::BadRowLength {
                row: y,
                expected: cols,
                found,
            });
        }
        for (x, ch) in line.chars().enumerate() {
            match ch {
                '0' => (),
                '1' => grid.set(x, y, true),
                _ => return Err(LoadError::BadCell { row: y, col: x, ch }),
            }
        }
    }
    if lines.any(|line| !line.is_empty()) {
        return Err(LoadError::TrailingData { rows });
    }
    Ok(grid)
}

/// Formats a grid as text, ending with a newline.
pub fn to_string(grid: &BitGrid) -> String {
    let mut ret = String::with_capacity((grid.cols() + 1) * (grid.rows() + 1) + 10);
    ret.push_str(&format!("{}x{}\n", grid.rows(), grid.cols()));
    for y in 0..grid.rows() {
        ret.extend((0..grid.cols()).map(|x| if grid.get(x, y) { '1' } else { '0' }));
        ret.push('\n');
    }
    ret
}

#[cfg(test)]
mod tests;
