//! Toroidal bit-packed 2D grid.
//!
//! Cells are packed eight to a byte in row-major order. Bit `x` of row `y`
//! lives in byte `x >> 3` of that row, at bit `x & 7`. Each row occupies
//! `ceil(cols / 8)` bytes, and the padding bits past the last column are always
//! zero.
//!
//! Direct accessors (`get()`, `set()`) do not wrap; callers reduce coordinates
//! with `wrap()` whenever they walk a neighborhood or a pattern window.

use itertools::Itertools;
use rand::Rng;
use std::fmt;

/// Minimum length of either axis of a grid.
pub const MIN_SIZE: usize = 1;
/// Maximum length of either axis of a grid.
pub const MAX_SIZE: usize = 5000;

/// Returns the number of bytes used to store a row of `cols` cells.
#[inline]
pub fn row_bytes_for(cols: usize) -> usize {
    (cols + 7) / 8
}

/// Returns the cell at column `x` of a packed row.
#[inline]
pub fn get_bit(row: &[u8], x: usize) -> bool {
    row[x >> 3] & (1 << (x & 7)) != 0
}

/// Sets the cell at column `x` of a packed row.
#[inline]
pub fn set_bit(row: &mut [u8], x: usize, value: bool) {
    let mask = 1 << (x & 7);
    if value {
        row[x >> 3] |= mask;
    } else {
        row[x >> 3] &= !mask;
    }
}

/// Boolean matrix with `rows × cols` cells, addressed as `(x, y)` where `x` is
/// the column and `y` is the row.
#[derive(Clone, PartialEq, Eq)]
pub struct BitGrid {
    rows: usize,
    cols: usize,
    row_bytes: usize,
    data: Box<[u8]>,
}
impl fmt::Debug for BitGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BitGrid")
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .field("population", &self.population())
            .finish()
    }
}
impl fmt::Display for BitGrid {
    /// Draws the grid using `#` for live cells and `.` for dead cells.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines = (0..self.rows).map(|y| {
            (0..self.cols)
                .map(|x| if self.get(x, y) { '#' } else { '.' })
                .collect::<String>()
        });
        write!(f, "{}", lines.format("\n"))
    }
}

impl BitGrid {
    /// Constructs an empty grid.
    ///
    /// # Panics
    ///
    /// This function panics if either dimension is zero. Session
    /// configuration validates sizes before a grid is ever allocated.
    pub fn new(rows: usize, cols: usize) -> Self {
        assert!(rows >= MIN_SIZE && cols >= MIN_SIZE, "Grid must be nonempty");
        let row_bytes = row_bytes_for(cols);
        Self {
            rows,
            cols,
            row_bytes,
            data: vec![0; rows * row_bytes].into_boxed_slice(),
        }
    }

    /// Constructs a grid with the given live cells, each given as `(x, y)`.
    /// Coordinates wrap.
    pub fn with_cells(
        rows: usize,
        cols: usize,
        cells: impl IntoIterator<Item = (isize, isize)>,
    ) -> Self {
        let mut ret = Self::new(rows, cols);
        for (x, y) in cells {
            let (x, y) = ret.wrap(x, y);
            ret.set(x, y, true);
        }
        ret
    }

    /// Returns the number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }
    /// Returns the number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }
    /// Returns the number of bytes used to store each row.
    #[inline]
    pub fn row_bytes(&self) -> usize {
        self.row_bytes
    }

    /// Returns the state of the cell at column `x`, row `y`.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        assert!(x < self.cols && y < self.rows, "({}, {}) out of range", x, y);
        get_bit(self.row(y), x)
    }
    /// Sets the state of the cell at column `x`, row `y`.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        assert!(x < self.cols && y < self.rows, "({}, {}) out of range", x, y);
        set_bit(self.row_mut(y), x, value);
    }
    /// Flips the state of the cell at column `x`, row `y` and returns the new
    /// state.
    pub fn toggle(&mut self, x: usize, y: usize) -> bool {
        let new_state = !self.get(x, y);
        self.set(x, y, new_state);
        new_state
    }

    /// Returns the state of the cell at a signed position, wrapping around the
    /// edges of the grid.
    #[inline]
    pub fn get_wrapped(&self, x: isize, y: isize) -> bool {
        let (x, y) = self.wrap(x, y);
        self.get(x, y)
    }

    /// Reduces a signed position modulo the grid size.
    #[inline]
    pub fn wrap(&self, x: isize, y: isize) -> (usize, usize) {
        (
            x.rem_euclid(self.cols as isize) as usize,
            y.rem_euclid(self.rows as isize) as usize,
        )
    }

    /// Kills every cell.
    pub fn clear(&mut self) {
        self.data.iter_mut().for_each(|byte| *byte = 0);
    }

    /// Returns the number of live cells.
    pub fn population(&self) -> usize {
        self.data.iter().map(|byte| byte.count_ones() as usize).sum()
    }

    /// Replaces every cell with a random state, where `density` is the
    /// probability that a cell is alive.
    pub fn randomize(&mut self, density: f64, rng: &mut impl Rng) {
        for y in 0..self.rows {
            for x in 0..self.cols {
                let alive = rng.random::<f64>() < density;
                self.set(x, y, alive);
            }
        }
    }

    /// Returns an iterator over the positions `(x, y)` of all live cells in
    /// row-major order.
    pub fn iter_alive(&self) -> impl '_ + Iterator<Item = (usize, usize)> {
        (0..self.rows)
            .cartesian_product(0..self.cols)
            .filter(move |&(y, x)| self.get(x, y))
            .map(|(y, x)| (x, y))
    }

    /// Returns the packed bytes of a single row.
    #[inline]
    pub fn row(&self, y: usize) -> &[u8] {
        let start = y * self.row_bytes;
        &self.data[start..start + self.row_bytes]
    }
    /// Returns the packed bytes of a single row, mutably.
    #[inline]
    pub fn row_mut(&mut self, y: usize) -> &mut [u8] {
        let start = y * self.row_bytes;
        &mut self.data[start..start + self.row_bytes]
    }

    /// Returns all packed bytes, mutably, for splitting into row bands.
    pub(crate) fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}
