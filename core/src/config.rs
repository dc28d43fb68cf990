//! Session configuration, as supplied by the setup dialog.

use thiserror::Error;

use crate::grid::{MAX_SIZE, MIN_SIZE};
use crate::sim::rule::Rule;

/// Fraction of cells that start alive in a freshly configured grid.
pub const DEFAULT_DENSITY: f64 = 0.2;

lazy_static::lazy_static! {
    /// Regex matching a grid size such as `1000x1000`.
    static ref SIZE_REGEX: regex::Regex = regex::Regex::new(r"^(\d+)x(\d+)$").unwrap();
}

/// Error that prevents a session from starting.
#[allow(missing_docs)]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("grid size must be written as ROWSxCOLS, got {0:?}")]
    BadSizeSyntax(String),
    #[error(
        "grid size must be between {min}x{min} and {max}x{max}, got {rows}x{cols}",
        min = MIN_SIZE,
        max = MAX_SIZE
    )]
    SizeOutOfRange { rows: usize, cols: usize },
    #[error("unknown rule {0:?}")]
    UnknownRule(String),
    #[error("unknown Game of Life variant {0:?}")]
    UnknownVariant(String),
    #[error("initial density must be between 0 and 1, got {0}")]
    BadDensity(f64),
    #[error("worker pool needs at least one thread")]
    NoThreads,
    #[error("unable to build worker pool: {0}")]
    ThreadPool(String),
}

/// Parameters needed to start or reconfigure a session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// Number of rows in the grid.
    pub rows: usize,
    /// Number of columns in the grid.
    pub cols: usize,
    /// Transition rule.
    pub rule: Rule,
    /// Number of worker threads, or `None` to use the available hardware
    /// parallelism.
    pub threads: Option<usize>,
    /// Probability that each cell starts alive.
    pub density: f64,
    /// Seed for the initial random cells, or `None` to pick one at random.
    pub seed: Option<u64>,
}
impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            rows: 1000,
            cols: 1000,
            rule: Rule::default(),
            threads: None,
            density: DEFAULT_DENSITY,
            seed: None,
        }
    }
}

impl SessionConfig {
    /// Constructs a configuration with the given grid size and rule, using
    /// defaults for everything else.
    pub fn new(rows: usize, cols: usize, rule: Rule) -> Self {
        Self {
            rows,
            cols,
            rule,
            ..Self::default()
        }
    }

    /// Constructs a configuration from the raw strings of the setup dialog:
    /// a size such as `"1000 x 1000"` and the rule and variant selectors.
    pub fn from_selectors(size: &str, rule: &str, variant: &str) -> Result<Self, ConfigError> {
        let (rows, cols) = parse_size(size)?;
        let ret = Self::new(rows, cols, Rule::from_selectors(rule, variant)?);
        ret.validate()?;
        Ok(ret)
    }

    /// Checks that every parameter is within bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_size(self.rows, self.cols)?;
        if !(0.0..=1.0).contains(&self.density) {
            return Err(ConfigError::BadDensity(self.density));
        }
        if self.threads == Some(0) {
            return Err(ConfigError::NoThreads);
        }
        Ok(())
    }

    /// Returns the number of worker threads to use.
    pub fn thread_count(&self) -> usize {
        self.threads.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }
}

/// Parses a grid size such as `"1000x1000"`. Case and spaces are ignored.
pub fn parse_size(s: &str) -> Result<(usize, usize), ConfigError> {
    let normalized: String = s
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_lowercase();
    let bad_syntax = || ConfigError::BadSizeSyntax(s.to_owned());
    let captures = SIZE_REGEX.captures(&normalized).ok_or_else(bad_syntax)?;
    let rows = captures[1].parse().map_err(|_| bad_syntax())?;
    let cols = captures[2].parse().map_err(|_| bad_syntax())?;
    check_size(rows, cols)?;
    Ok((rows, cols))
}

/// Checks that a grid size is within the supported bounds.
pub fn check_size(rows: usize, cols: usize) -> Result<(), ConfigError> {
    let range = MIN_SIZE..=MAX_SIZE;
    if range.contains(&rows) && range.contains(&cols) {
        Ok(())
    } else {
        Err(ConfigError::SizeOutOfRange { rows, cols })
    }
}
