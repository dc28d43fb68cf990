use std::fmt;

use crate::grid::BitGrid;

/// A 2-state totalistic 2D range-1 Moore-neighborhood rule on a torus.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MooreTotalistic2D {
    birth: [bool; 9],
    survival: [bool; 9],
}
impl Default for MooreTotalistic2D {
    fn default() -> Self {
        LIFE
    }
}
impl fmt::Display for MooreTotalistic2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "B")?;
        for i in (0..=8).filter(|&i| self.birth[i]) {
            write!(f, "{}", i)?;
        }
        write!(f, "/S")?;
        for i in (0..=8).filter(|&i| self.survival[i]) {
            write!(f, "{}", i)?;
        }
        Ok(())
    }
}

impl MooreTotalistic2D {
    /// Returns the next state of the cell at `(x, y)`.
    #[inline]
    pub fn next_state(&self, grid: &BitGrid, x: usize, y: usize) -> bool {
        let live_neighbors = count_moore_neighbors(grid, x, y);
        // Index LUT to get next cell state.
        if grid.get(x, y) {
            self.survival[live_neighbors]
        } else {
            self.birth[live_neighbors]
        }
    }
}

/// Counts the live cells among the 8 toroidal Moore neighbors of `(x, y)`.
pub fn count_moore_neighbors(grid: &BitGrid, x: usize, y: usize) -> usize {
    let (rows, cols) = (grid.rows(), grid.cols());
    let mut count = 0;
    // Offsets are added modulo the axis length, so `len - 1` steps backwards.
    // On a 1-wide axis a neighbor may be the cell itself.
    for (i, dy) in [rows - 1, 0, 1].into_iter().enumerate() {
        let row = grid.row((y + dy) % rows);
        for (j, dx) in [cols - 1, 0, 1].into_iter().enumerate() {
            if i == 1 && j == 1 {
                continue;
            }
            let nx = (x + dx) % cols;
            if crate::grid::get_bit(row, nx) {
                count += 1;
            }
        }
    }
    count
}

/// Conway's Game of Life.
pub const LIFE: MooreTotalistic2D = MooreTotalistic2D {
    birth: [false, false, false, true, false, false, false, false, false],
    survival: [false, false, true, true, false, false, false, false, false],
};

/// Life-like rule where a dead cell with exactly 2 neighbors is born and a live
/// cell survives only with exactly 7.
pub const B2_S7: MooreTotalistic2D = MooreTotalistic2D {
    birth: [false, false, true, false, false, false, false, false, false],
    survival: [false, false, false, false, false, false, false, true, false],
};
