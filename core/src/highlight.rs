//! Boolean mask of cells belonging to detected patterns.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

/// Mask with the same shape as the grid, accumulated monotonically during a
/// detection pass.
///
/// Between calls to `clear()` cells are only ever set to `true`, so any number
/// of pattern scans may mark cells concurrently through a shared reference.
pub struct HighlightBuffer {
    rows: usize,
    cols: usize,
    cells: Box<[AtomicBool]>,
}
impl fmt::Debug for HighlightBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HighlightBuffer")
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .field("count", &self.count())
            .finish()
    }
}
impl Clone for HighlightBuffer {
    fn clone(&self) -> Self {
        Self {
            rows: self.rows,
            cols: self.cols,
            cells: self
                .cells
                .iter()
                .map(|cell| AtomicBool::new(cell.load(Ordering::Relaxed)))
                .collect(),
        }
    }
}

impl HighlightBuffer {
    /// Constructs an all-false buffer.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: (0..rows * cols).map(|_| AtomicBool::new(false)).collect(),
        }
    }

    /// Returns the number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }
    /// Returns the number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns whether the cell at column `x`, row `y` is highlighted.
    ///
    /// # Panics
    ///
    /// This method panics if the cell is outside the buffer.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.cells[self.index(x, y)].load(Ordering::Relaxed)
    }
    /// Highlights the cell at column `x`, row `y`. There is no way to
    /// un-highlight a single cell.
    ///
    /// # Panics
    ///
    /// This method panics if the cell is outside the buffer.
    #[inline]
    pub fn mark(&self, x: usize, y: usize) {
        self.cells[self.index(x, y)].store(true, Ordering::Relaxed);
    }

    /// Resets every cell to `false`. Requires exclusive access, so it cannot
    /// race with a detection pass.
    pub fn clear(&mut self) {
        for cell in self.cells.iter_mut() {
            *cell.get_mut() = false;
        }
    }

    /// Returns the number of highlighted cells.
    pub fn count(&self) -> usize {
        self.cells
            .iter()
            .filter(|cell| cell.load(Ordering::Relaxed))
            .count()
    }

    /// Returns an iterator over the positions `(x, y)` of highlighted cells in
    /// row-major order.
    pub fn iter_marked(&self) -> impl '_ + Iterator<Item = (usize, usize)> {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.load(Ordering::Relaxed))
            .map(move |(i, _)| (i % cols, i / cols))
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        assert!(x < self.cols && y < self.rows, "({}, {}) out of range", x, y);
        y * self.cols + x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concurrent_marks_accumulate() {
        let buffer = HighlightBuffer::new(16, 16);
        std::thread::scope(|s| {
            for t in 0..4 {
                let buffer = &buffer;
                s.spawn(move || {
                    // Every thread marks its own diagonal plus the shared
                    // first row.
                    for i in 0..16 {
                        buffer.mark(i, (i + t) % 16);
                        buffer.mark(i, 0);
                    }
                });
            }
        });
        for t in 0..4 {
            for i in 0..16 {
                assert!(buffer.get(i, (i + t) % 16));
            }
        }
        assert!((0..16).all(|x| buffer.get(x, 0)));
    }

    #[test]
    fn test_clear() {
        let mut buffer = HighlightBuffer::new(3, 5);
        buffer.mark(4, 2);
        buffer.mark(0, 1);
        assert_eq!(vec![(0, 1), (4, 2)], buffer.iter_marked().collect::<Vec<_>>());
        let snapshot = buffer.clone();
        buffer.clear();
        assert_eq!(0, buffer.count());
        assert_eq!(2, snapshot.count());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_column_past_end_panics() {
        // (5, 0) would alias (0, 1) without the bounds check.
        HighlightBuffer::new(3, 5).get(5, 0);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_mark_past_end_panics() {
        HighlightBuffer::new(3, 5).mark(0, 3);
    }
}
