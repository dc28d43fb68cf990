//! Formats for saving and loading grids.

use log::info;
use std::fs;
use std::path::Path;

pub mod text;

use crate::grid::BitGrid;
pub use text::{LoadError, LoadResult};

/// Reads a text grid from a file.
pub fn load_file(path: impl AsRef<Path>) -> LoadResult<BitGrid> {
    let path = path.as_ref();
    let grid = text::parse(&fs::read_to_string(path)?)?;
    info!(
        "Loaded {}x{} grid from {}",
        grid.rows(),
        grid.cols(),
        path.display()
    );
    Ok(grid)
}

/// Writes a grid to a file in the text format.
pub fn save_file(grid: &BitGrid, path: impl AsRef<Path>) -> std::io::Result<()> {
    let path = path.as_ref();
    fs::write(path, text::to_string(grid))?;
    info!(
        "Saved {}x{} grid to {}",
        grid.rows(),
        grid.cols(),
        path.display()
    );
    Ok(())
}
