use itertools::Itertools;
use log::{debug, trace, warn};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::{Pattern, PatternId};
use crate::grid::BitGrid;
use crate::highlight::HighlightBuffer;
use crate::sim::{WorkerTask, WorkerTaskFailure};

/// Number of anchors at which a pattern was found.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PatternMatches {
    /// Pattern that was scanned for.
    pub pattern: PatternId,
    /// Number of anchors at which it matched.
    pub count: usize,
}

/// Outcome of one detection pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetectReport {
    /// Matches for each pattern whose scan completed.
    pub matches: Vec<PatternMatches>,
    /// Scans that failed. Cells they marked before failing stay marked.
    pub failures: Vec<WorkerTaskFailure>,
    /// Wall time spent scanning.
    pub elapsed: Duration,
}
impl DetectReport {
    /// Returns `true` if every scan completed.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
    /// Returns the number of matches for a pattern, or `None` if it was not
    /// scanned for.
    pub fn count(&self, pattern: PatternId) -> Option<usize> {
        self.matches
            .iter()
            .find(|m| m.pattern == pattern)
            .map(|m| m.count)
    }
}

/// Scans every anchor of `current` for `pattern` and highlights each match.
/// Returns the number of anchors that matched.
pub fn scan_pattern(
    pattern: &Pattern,
    previous: &BitGrid,
    current: &BitGrid,
    buffer: &HighlightBuffer,
) -> usize {
    let mut count = 0;
    for y in 0..current.rows() {
        for x in 0..current.cols() {
            if pattern.matches(previous, current, x, y) {
                pattern.mark(buffer, current, x, y);
                count += 1;
            }
        }
    }
    count
}

/// Runs pattern scans concurrently on a shared worker pool.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    pool: Arc<rayon::ThreadPool>,
}

impl PatternMatcher {
    /// Constructs a matcher that runs on the given pool.
    pub fn new(pool: Arc<rayon::ThreadPool>) -> Self {
        Self { pool }
    }

    /// Scans for each selected pattern in its own task and highlights every
    /// match in `buffer`. Returns once every scan has finished.
    ///
    /// `previous` is the generation before `current`; still lifes ignore it.
    pub fn scan(
        &self,
        previous: &BitGrid,
        current: &BitGrid,
        patterns: &[PatternId],
        buffer: &HighlightBuffer,
    ) -> DetectReport {
        self.scan_with(previous, current, patterns, buffer, |id, previous, current, buffer| {
            scan_pattern(id.pattern(), previous, current, buffer)
        })
    }

    pub(crate) fn scan_with<F>(
        &self,
        previous: &BitGrid,
        current: &BitGrid,
        patterns: &[PatternId],
        buffer: &HighlightBuffer,
        scan_fn: F,
    ) -> DetectReport
    where
        F: Sync + Fn(PatternId, &BitGrid, &BitGrid, &HighlightBuffer) -> usize,
    {
        assert_eq!(
            (previous.rows(), previous.cols()),
            (current.rows(), current.cols()),
            "Generations differ in size"
        );
        let start_time = Instant::now();
        let patterns = patterns.iter().copied().unique().collect_vec();
        let mut outcomes: Vec<Result<usize, WorkerTaskFailure>> =
            patterns.iter().map(|_| Ok(0)).collect();

        let scan_fn = &scan_fn;
        self.pool.scope(|s| {
            for (&id, outcome) in patterns.iter().zip(&mut outcomes) {
                s.spawn(move |_| {
                    trace!("Scanning for {}", id);
                    let result = panic::catch_unwind(AssertUnwindSafe(|| {
                        scan_fn(id, previous, current, buffer)
                    }));
                    *outcome = result.map_err(|payload| {
                        let task = WorkerTask::PatternScan {
                            pattern: id.pattern().name(),
                        };
                        let failure = WorkerTaskFailure::from_panic(task, payload);
                        warn!("{}", failure);
                        failure
                    });
                });
            }
        });

        let mut report = DetectReport::default();
        for (pattern, outcome) in patterns.into_iter().zip(outcomes) {
            match outcome {
                Ok(count) => report.matches.push(PatternMatches { pattern, count }),
                Err(failure) => report.failures.push(failure),
            }
        }
        report.elapsed = start_time.elapsed();
        debug!(
            "Detection pass found {} in {:?}",
            report
                .matches
                .iter()
                .map(|m| format!("{} {}", m.count, m.pattern))
                .join(", "),
            report.elapsed,
        );
        report
    }
}
