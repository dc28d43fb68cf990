//! Row-band parallel application of a rule to a whole grid.

use log::{trace, warn};
use std::ops::Range;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::rule::Rule;
use super::{WorkerTask, WorkerTaskFailure};
use crate::grid::{self, BitGrid};

/// Outcome of computing one generation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepReport {
    /// Number of live cells in the new generation.
    pub alive: usize,
    /// Bands that failed. Their rows are dead in the new generation.
    pub failures: Vec<WorkerTaskFailure>,
    /// Wall time spent computing the generation.
    pub elapsed: Duration,
}
impl StepReport {
    /// Returns `true` if every band was computed.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Splits `rows` into at most `threads` contiguous bands of `rows / threads`
/// rows each, with the last band absorbing the remainder. Never produces an
/// empty band.
pub fn partition_rows(rows: usize, threads: usize) -> Vec<Range<usize>> {
    let bands = threads.min(rows).max(1);
    let chunk = rows / bands;
    (0..bands)
        .map(|t| {
            let start = t * chunk;
            let end = if t == bands - 1 { rows } else { start + chunk };
            start..end
        })
        .collect()
}

/// Computes successive generations on a shared worker pool.
///
/// Each worker reads only the current grid and writes only its own band of
/// the new grid, so no locking is needed. The new grid is returned only after
/// every band is finished.
#[derive(Debug, Clone)]
pub struct ParallelStepper {
    pool: Arc<rayon::ThreadPool>,
}

impl ParallelStepper {
    /// Constructs a stepper that runs on the given pool.
    pub fn new(pool: Arc<rayon::ThreadPool>) -> Self {
        Self { pool }
    }

    /// Returns the number of worker threads.
    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Computes the generation after `grid` under `rule`.
    pub fn step(&self, grid: &BitGrid, rule: Rule) -> (BitGrid, StepReport) {
        self.step_with(grid, |g, x, y| rule.next_state(g, x, y))
    }

    /// Computes a new grid by applying a single-cell transition function to
    /// every cell of `grid`.
    pub(crate) fn step_with<F>(&self, grid: &BitGrid, transition: F) -> (BitGrid, StepReport)
    where
        F: Sync + Fn(&BitGrid, usize, usize) -> bool,
    {
        let start_time = Instant::now();
        let row_bytes = grid.row_bytes();
        let bands = partition_rows(grid.rows(), self.threads());
        let mut outcomes: Vec<Result<usize, WorkerTaskFailure>> =
            bands.iter().map(|_| Ok(0)).collect();

        let mut next = BitGrid::new(grid.rows(), grid.cols());
        {
            // Carve the new grid into disjoint mutable bands.
            let mut rest = next.bytes_mut();
            let mut band_slices = Vec::with_capacity(bands.len());
            for band in &bands {
                let (head, tail) = std::mem::take(&mut rest).split_at_mut(band.len() * row_bytes);
                band_slices.push(head);
                rest = tail;
            }

            let transition = &transition;
            self.pool.scope(|s| {
                let jobs = bands.iter().cloned().zip(band_slices).zip(&mut outcomes);
                for (index, ((rows, out), outcome)) in jobs.enumerate() {
                    s.spawn(move |_| {
                        trace!("Computing rows {}..{}", rows.start, rows.end);
                        let result = panic::catch_unwind(AssertUnwindSafe(|| {
                            transition_band(grid, rows.clone(), &mut *out, transition)
                        }));
                        *outcome = result.map_err(|payload| {
                            // Discard whatever the band wrote before failing.
                            out.iter_mut().for_each(|byte| *byte = 0);
                            let failure = WorkerTaskFailure::from_panic(
                                WorkerTask::StepBand { index, rows },
                                payload,
                            );
                            warn!("{}", failure);
                            failure
                        });
                    });
                }
            });
        }

        let mut report = StepReport::default();
        for outcome in outcomes {
            match outcome {
                Ok(alive) => report.alive += alive,
                Err(failure) => report.failures.push(failure),
            }
        }
        report.elapsed = start_time.elapsed();
        (next, report)
    }
}

/// Fills `out` with the new states of `rows` and returns how many are alive.
fn transition_band<F>(grid: &BitGrid, rows: Range<usize>, out: &mut [u8], transition: &F) -> usize
where
    F: Fn(&BitGrid, usize, usize) -> bool,
{
    let mut alive = 0;
    for (y, row_out) in rows.zip(out.chunks_mut(grid.row_bytes())) {
        for x in 0..grid.cols() {
            let state = transition(grid, x, y);
            grid::set_bit(row_out, x, state);
            alive += state as usize;
        }
    }
    alive
}
