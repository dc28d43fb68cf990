//! What the renderer draws for each cell.

use std::fmt;

use crate::grid::BitGrid;
use crate::highlight::HighlightBuffer;

/// Visual state of a single cell.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CellDisplay {
    /// Dead cell.
    Dead,
    /// Live cell that is not part of any detected pattern.
    Alive,
    /// Cell belonging to a detected pattern.
    Highlighted,
}
impl Default for CellDisplay {
    fn default() -> Self {
        Self::Dead
    }
}
impl fmt::Display for CellDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Write;
        f.write_char(self.to_char())
    }
}

impl CellDisplay {
    /// Returns the character used for this state in text renderings.
    pub fn to_char(self) -> char {
        match self {
            Self::Dead => '.',
            Self::Alive => '#',
            Self::Highlighted => '@',
        }
    }
}

/// Returns the visual state of a cell. A highlighted cell is drawn as
/// highlighted whether or not it is alive.
pub fn cell_display(
    grid: &BitGrid,
    highlight: &HighlightBuffer,
    x: usize,
    y: usize,
) -> CellDisplay {
    if highlight.get(x, y) {
        CellDisplay::Highlighted
    } else if grid.get(x, y) {
        CellDisplay::Alive
    } else {
        CellDisplay::Dead
    }
}

/// Iterates over the visual states of one row, left to right.
pub fn row_display<'a>(
    grid: &'a BitGrid,
    highlight: &'a HighlightBuffer,
    y: usize,
) -> impl 'a + Iterator<Item = CellDisplay> {
    (0..grid.cols()).map(move |x| cell_display(grid, highlight, x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_precedence() {
        let grid = BitGrid::with_cells(1, 4, vec![(1, 0), (2, 0)]);
        let highlight = HighlightBuffer::new(1, 4);
        highlight.mark(2, 0);
        highlight.mark(3, 0);
        assert_eq!(
            vec![
                CellDisplay::Dead,
                CellDisplay::Alive,
                CellDisplay::Highlighted,
                CellDisplay::Highlighted,
            ],
            row_display(&grid, &highlight, 0).collect::<Vec<_>>()
        );
        assert_eq!(
            ".#@@",
            row_display(&grid, &highlight, 0)
                .map(CellDisplay::to_char)
                .collect::<String>()
        );
    }
}
