//! Known local patterns and how to recognize them.
//!
//! A pattern is either a still life, which is recognized in a single
//! generation, or an evolving pattern (oscillator or spaceship), which is
//! recognized by matching one phase in the previous generation and the next
//! phase in the current generation.

use std::fmt;

pub mod catalog;
mod matcher;

use crate::grid::BitGrid;
use crate::highlight::HighlightBuffer;
pub use catalog::PatternId;
pub use matcher::{scan_pattern, DetectReport, PatternMatcher, PatternMatches};

/// Translation between two anchors, in cells.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Offset {
    /// Offset along the X axis (columns), increasing to the right.
    pub dx: isize,
    /// Offset along the Y axis (rows), increasing downwards.
    pub dy: isize,
}
impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.dx, self.dy)
    }
}
impl Offset {
    /// Zero offset.
    pub const ZERO: Self = Self { dx: 0, dy: 0 };

    /// Constructs an offset.
    pub const fn new(dx: isize, dy: isize) -> Self {
        Self { dx, dy }
    }
}

/// Rectangular shape, stored as one packed integer per row.
///
/// Bit `width - 1 - c` of a row encodes column `c`, so a row literal reads
/// left-to-right the same way the shape looks. Both live and dead cells are
/// significant when matching.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Bitmask {
    width: usize,
    rows: &'static [u32],
}

impl Bitmask {
    /// Constructs a bitmask from row literals.
    ///
    /// # Panics
    ///
    /// This function panics if `width` is not in `1..=32` or if a row has bits
    /// set beyond `width`.
    pub const fn new(width: usize, rows: &'static [u32]) -> Self {
        assert!(width >= 1 && width <= 32, "Bitmask width out of range");
        let mut i = 0;
        while i < rows.len() {
            assert!(width == 32 || rows[i] >> width == 0, "Bitmask row wider than width");
            i += 1;
        }
        Self { width, rows }
    }

    /// Returns the width of the bounding box.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }
    /// Returns the height of the bounding box.
    #[inline]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Returns whether the cell at column `c`, row `r` of the shape is alive.
    #[inline]
    pub fn get(&self, c: usize, r: usize) -> bool {
        (self.rows[r] >> (self.width - 1 - c)) & 1 != 0
    }

    /// Returns the number of live cells in the shape.
    pub fn population(&self) -> usize {
        self.rows.iter().map(|row| row.count_ones() as usize).sum()
    }

    /// Returns an iterator over the positions `(c, r)` of live cells in the
    /// shape.
    pub fn iter_alive(&self) -> impl '_ + Iterator<Item = (usize, usize)> {
        (0..self.height())
            .flat_map(move |r| (0..self.width).map(move |c| (c, r)))
            .filter(move |&(c, r)| self.get(c, r))
    }

    /// Returns `true` if the toroidal window of `grid` whose top-left corner is
    /// at `(x, y)` equals this shape exactly.
    pub fn matches_at(&self, grid: &BitGrid, x: isize, y: isize) -> bool {
        let (x, y) = grid.wrap(x, y);
        (0..self.height()).all(|r| {
            let row = grid.row((y + r) % grid.rows());
            (0..self.width).all(|c| {
                let gx = (x + c) % grid.cols();
                crate::grid::get_bit(row, gx) == self.get(c, r)
            })
        })
    }

    /// Highlights the live cells of this shape placed with its top-left
    /// corner at `(x, y)`, wrapping around the edges of `buffer`.
    pub fn mark_at(&self, buffer: &HighlightBuffer, x: usize, y: usize) {
        for (c, r) in self.iter_alive() {
            buffer.mark((x + c) % buffer.cols(), (y + r) % buffer.rows());
        }
    }
}
impl fmt::Display for Bitmask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.height() {
            if r > 0 {
                writeln!(f)?;
            }
            for c in 0..self.width {
                write!(f, "{}", if self.get(c, r) { '#' } else { '.' })?;
            }
        }
        Ok(())
    }
}

/// Pattern that is invariant under one step, possibly in several
/// orientations.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct StillLife {
    /// Human-readable name.
    pub name: &'static str,
    /// Each orientation that the pattern is recognized in.
    pub orientations: &'static [Bitmask],
}

impl StillLife {
    /// Returns the orientation that exactly matches `grid` with its top-left
    /// corner at `(x, y)`, if there is one.
    pub fn matching_orientation(&self, grid: &BitGrid, x: usize, y: usize) -> Option<&Bitmask> {
        self.orientations
            .iter()
            .find(|shape| shape.matches_at(grid, x as isize, y as isize))
    }

    /// Returns `true` if some orientation exactly matches `grid` at `(x, y)`.
    pub fn matches(&self, grid: &BitGrid, x: usize, y: usize) -> bool {
        self.matching_orientation(grid, x, y).is_some()
    }

    /// Highlights the live cells of whichever orientation matches `grid` at
    /// `(x, y)`. Returns `false` (and marks nothing) if none does.
    pub fn mark(&self, buffer: &HighlightBuffer, grid: &BitGrid, x: usize, y: usize) -> bool {
        match self.matching_orientation(grid, x, y) {
            Some(shape) => {
                shape.mark_at(buffer, x, y);
                true
            }
            None => false,
        }
    }
}

/// Pattern that cycles through several phases, possibly translating.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Evolving {
    /// Human-readable name.
    pub name: &'static str,
    /// Shapes in the order that they evolve into each other.
    pub phases: &'static [Bitmask],
    /// `offsets[i]` is the anchor of `phases[i - 1]` in the previous
    /// generation relative to the anchor of `phases[i]` in the current
    /// generation.
    pub offsets: &'static [Offset],
    /// Translation of the pattern after one full period.
    pub displacement: Offset,
}

impl Evolving {
    /// Returns the number of phases.
    pub fn period(&self) -> usize {
        self.phases.len()
    }

    /// Returns the index of the phase that `new` contains at `(x, y)`, given
    /// that `old` contains the preceding phase at the matching offset.
    ///
    /// Every one of the `period()` transitions is tried in turn.
    pub fn matching_transition(
        &self,
        old: &BitGrid,
        new: &BitGrid,
        x: usize,
        y: usize,
    ) -> Option<usize> {
        let period = self.period();
        (0..period).find(|&new_index| {
            let old_index = (new_index + period - 1) % period;
            let offset = self.offsets[new_index];
            self.phases[new_index].matches_at(new, x as isize, y as isize)
                && self.phases[old_index].matches_at(
                    old,
                    x as isize + offset.dx,
                    y as isize + offset.dy,
                )
        })
    }

    /// Returns `true` if `new` contains some phase at `(x, y)` and `old`
    /// contains the preceding phase at the corresponding offset.
    pub fn matches_after_evolution(
        &self,
        old: &BitGrid,
        new: &BitGrid,
        x: usize,
        y: usize,
    ) -> bool {
        self.matching_transition(old, new, x, y).is_some()
    }

    /// Returns the index of the phase that exactly matches `grid` at `(x, y)`.
    pub fn matching_phase(&self, grid: &BitGrid, x: usize, y: usize) -> Option<usize> {
        self.phases
            .iter()
            .position(|phase| phase.matches_at(grid, x as isize, y as isize))
    }

    /// Highlights the live cells of whichever phase matches `grid` at `(x, y)`.
    /// Returns `false` (and marks nothing) if none does.
    pub fn mark(&self, buffer: &HighlightBuffer, grid: &BitGrid, x: usize, y: usize) -> bool {
        match self.matching_phase(grid, x, y) {
            Some(i) => {
                self.phases[i].mark_at(buffer, x, y);
                true
            }
            None => false,
        }
    }
}

/// Pattern definition.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Pattern {
    /// Pattern recognized in a single generation.
    StillLife(StillLife),
    /// Pattern recognized across two consecutive generations.
    Evolving(Evolving),
}

impl Pattern {
    /// Returns the human-readable name of the pattern.
    pub fn name(&self) -> &'static str {
        match self {
            Pattern::StillLife(p) => p.name,
            Pattern::Evolving(p) => p.name,
        }
    }
    /// Returns the number of generations after which the pattern repeats.
    pub fn period(&self) -> usize {
        match self {
            Pattern::StillLife(_) => 1,
            Pattern::Evolving(p) => p.period(),
        }
    }
    /// Returns the translation of the pattern after one full period.
    pub fn displacement(&self) -> Offset {
        match self {
            Pattern::StillLife(_) => Offset::ZERO,
            Pattern::Evolving(p) => p.displacement,
        }
    }

    /// Returns `true` if the pattern occurs at `(x, y)`. Still lifes only look
    /// at `current`.
    pub fn matches(&self, previous: &BitGrid, current: &BitGrid, x: usize, y: usize) -> bool {
        match self {
            Pattern::StillLife(p) => p.matches(current, x, y),
            Pattern::Evolving(p) => p.matches_after_evolution(previous, current, x, y),
        }
    }

    /// Highlights the cells of the shape that occurs in `current` at `(x, y)`.
    pub fn mark(&self, buffer: &HighlightBuffer, current: &BitGrid, x: usize, y: usize) -> bool {
        match self {
            Pattern::StillLife(p) => p.mark(buffer, current, x, y),
            Pattern::Evolving(p) => p.mark(buffer, current, x, y),
        }
    }
}
