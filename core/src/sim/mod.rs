//! Rules and parallel simulation.

use log::debug;
use std::any::Any;
use std::fmt;
use std::ops::Range;

pub mod rule;
mod stepper;

use crate::config::ConfigError;
pub use stepper::{partition_rows, ParallelStepper, StepReport};

/// Builds the worker pool shared by stepping and pattern scanning.
pub fn build_pool(threads: usize) -> Result<rayon::ThreadPool, ConfigError> {
    if threads == 0 {
        return Err(ConfigError::NoThreads);
    }
    debug!("Building worker pool with {} threads", threads);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("lifescan-worker-{}", i))
        .build()
        .map_err(|e| ConfigError::ThreadPool(e.to_string()))
}

/// Unit of work run on the worker pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerTask {
    /// Computing one band of rows of the next generation.
    StepBand {
        /// Index of the band.
        index: usize,
        /// Rows covered by the band.
        rows: Range<usize>,
    },
    /// Scanning the grid for one pattern.
    PatternScan {
        /// Name of the pattern.
        pattern: &'static str,
    },
}
impl fmt::Display for WorkerTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkerTask::StepBand { index, rows } => {
                write!(f, "step band #{} (rows {}..{})", index, rows.start, rows.end)
            }
            WorkerTask::PatternScan { pattern } => write!(f, "{} scan", pattern),
        }
    }
}

/// Failure of a single task on the worker pool. The rest of the operation
/// still completes; the failed task's output is best-effort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerTaskFailure {
    /// Task that failed.
    pub task: WorkerTask,
    /// Panic message.
    pub message: String,
}
impl fmt::Display for WorkerTaskFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed: {}", self.task, self.message)
    }
}
impl std::error::Error for WorkerTaskFailure {}

impl WorkerTaskFailure {
    pub(crate) fn from_panic(task: WorkerTask, payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_owned()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic".to_owned()
        };
        Self { task, message }
    }
}
