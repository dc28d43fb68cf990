//! Text rendering of grids for the terminal.

use itertools::Itertools;

use lifescan_core::display::{row_display, CellDisplay};
use lifescan_core::prelude::*;

/// Renders the grid with detected patterns highlighted, one line per row.
/// Returns `None` if the grid is larger than `max_size` in either direction.
pub fn render_frame(
    grid: &BitGrid,
    highlight: &HighlightBuffer,
    max_size: usize,
) -> Option<String> {
    if grid.rows() > max_size || grid.cols() > max_size {
        return None;
    }
    Some(
        (0..grid.rows())
            .map(|y| {
                row_display(grid, highlight, y)
                    .map(CellDisplay::to_char)
                    .collect::<String>()
            })
            .join("\n"),
    )
}

/// Renders two generations side by side under a header.
pub fn render_generations(
    previous: &BitGrid,
    current: &BitGrid,
    max_size: usize,
) -> Option<String> {
    if current.rows() > max_size || current.cols() > max_size {
        return None;
    }
    let row_text = |grid: &BitGrid, y: usize| -> String {
        (0..grid.cols())
            .map(|x| if grid.get(x, y) { '#' } else { '.' })
            .collect()
    };
    let width = current.cols().max("previous".len());
    let mut lines = vec![format!("{:width$}  {}", "previous", "current", width = width)];
    lines.extend((0..current.rows()).map(|y| {
        format!(
            "{:width$}  {}",
            row_text(previous, y),
            row_text(current, y),
            width = width,
        )
    }));
    Some(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_render_frame() {
        let grid = BitGrid::with_cells(2, 3, vec![(0, 0), (2, 1)]);
        let highlight = HighlightBuffer::new(2, 3);
        highlight.mark(2, 1);
        assert_eq!(Some("#..\n..@".to_owned()), render_frame(&grid, &highlight, 50));
        assert_eq!(None, render_frame(&grid, &highlight, 2));
    }

    #[test]
    fn test_render_generations() {
        let previous = BitGrid::with_cells(2, 3, vec![(0, 0)]);
        let current = BitGrid::with_cells(2, 3, vec![(1, 1)]);
        assert_eq!(
            Some("previous  current\n#..       ...\n...       .#.".to_owned()),
            render_generations(&previous, &current, 50)
        );
    }

    proptest! {
        #[test]
        fn test_frame_counts_match_grid(
            cells in proptest::collection::vec((0..9_isize, 0..12_isize), 0..40),
            marks in proptest::collection::vec((0..9_usize, 0..12_usize), 0..10),
        ) {
            let grid = BitGrid::with_cells(12, 9, cells);
            let highlight = HighlightBuffer::new(12, 9);
            for &(x, y) in &marks {
                highlight.mark(x, y);
            }
            let frame = render_frame(&grid, &highlight, 12).unwrap();
            prop_assert_eq!(12, frame.lines().count());
            prop_assert!(frame.lines().all(|line| line.chars().count() == 9));
            prop_assert_eq!(highlight.count(), frame.matches('@').count());
            let unmarked_alive = grid
                .iter_alive()
                .filter(|&(x, y)| !highlight.get(x, y))
                .count();
            prop_assert_eq!(unmarked_alive, frame.matches('#').count());
        }
    }
}
