//! Sliding window over the most recent grid generations.

use crate::grid::BitGrid;

/// Number of generations retained by a `HistoryRing`.
pub const HISTORY_CAPACITY: usize = 2;

/// Fixed-capacity ring of grid snapshots taken immediately before each step.
///
/// Pushing onto a full ring evicts the oldest snapshot first, so the ring never
/// holds more than `HISTORY_CAPACITY` generations.
#[derive(Debug, Default, Clone)]
pub struct HistoryRing {
    slots: [Option<BitGrid>; HISTORY_CAPACITY],
    /// Index of the slot that the next push writes to.
    head: usize,
}

impl HistoryRing {
    /// Constructs an empty history ring.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a snapshot, evicting the oldest one if the ring is full.
    pub fn push(&mut self, snapshot: BitGrid) {
        // Evict before writing so that at most `HISTORY_CAPACITY` snapshots
        // are ever alive at once.
        drop(self.slots[self.head].take());
        self.slots[self.head] = Some(snapshot);
        self.head = (self.head + 1) % HISTORY_CAPACITY;
    }

    /// Returns the most recent snapshot.
    pub fn previous(&self) -> Option<&BitGrid> {
        self.slots[(self.head + HISTORY_CAPACITY - 1) % HISTORY_CAPACITY].as_ref()
    }
    /// Returns the oldest retained snapshot.
    pub fn oldest(&self) -> Option<&BitGrid> {
        self.slots[self.head]
            .as_ref()
            .or_else(|| self.previous())
    }

    /// Returns the number of retained snapshots.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }
    /// Returns `true` if no snapshot has been recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Returns the maximum number of retained snapshots.
    pub fn capacity(&self) -> usize {
        HISTORY_CAPACITY
    }

    /// Discards all snapshots.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marked_grid(x: usize) -> BitGrid {
        let mut grid = BitGrid::new(1, 8);
        grid.set(x, 0, true);
        grid
    }

    #[test]
    fn test_history_ring_eviction() {
        let mut history = HistoryRing::new();
        assert!(history.is_empty());
        assert_eq!(None, history.previous());

        history.push(marked_grid(0));
        assert_eq!(1, history.len());
        assert_eq!(Some(&marked_grid(0)), history.previous());
        assert_eq!(Some(&marked_grid(0)), history.oldest());

        for x in 1..6 {
            history.push(marked_grid(x));
            assert_eq!(2, history.len());
            assert_eq!(Some(&marked_grid(x)), history.previous());
            assert_eq!(Some(&marked_grid(x - 1)), history.oldest());
        }
        assert_eq!(HISTORY_CAPACITY, history.capacity());

        history.clear();
        assert!(history.is_empty());
    }
}
