//! Simulation session: the grid and everything derived from it.

use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;
use std::sync::Arc;

use crate::config::{ConfigError, SessionConfig};
use crate::grid::BitGrid;
use crate::highlight::HighlightBuffer;
use crate::history::HistoryRing;
use crate::io::{self, text, LoadResult};
use crate::pattern::{DetectReport, PatternId, PatternMatcher};
use crate::sim::rule::Rule;
use crate::sim::{build_pool, ParallelStepper, StepReport};

/// Outcome of one step followed by one detection pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Outcome of the step.
    pub step: StepReport,
    /// Outcome of the detection pass.
    pub detect: DetectReport,
    /// Generation number after the step.
    pub generation: u64,
    /// Number of live cells after the step.
    pub alive: usize,
}
impl TickReport {
    /// Returns `true` if no worker task failed.
    pub fn is_complete(&self) -> bool {
        self.step.is_complete() && self.detect.is_complete()
    }
}

/// Grid, history, highlight and counters of a running simulation, together
/// with the worker pool that computes it.
///
/// The history always holds at least one snapshot, so detection of evolving
/// patterns has a previous generation to compare against. Before the first
/// step that snapshot is the current grid itself.
#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    grid: BitGrid,
    highlight: HighlightBuffer,
    history: HistoryRing,
    stepper: ParallelStepper,
    matcher: PatternMatcher,
    generation: u64,
    alive: usize,
}

impl Session {
    /// Starts a session with a grid in which each cell is alive with
    /// probability `config.density`.
    pub fn new(config: SessionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let pool = Arc::new(build_pool(config.thread_count())?);
        let grid = BitGrid::new(config.rows, config.cols);
        let mut ret = Self {
            highlight: HighlightBuffer::new(config.rows, config.cols),
            history: HistoryRing::new(),
            stepper: ParallelStepper::new(Arc::clone(&pool)),
            matcher: PatternMatcher::new(pool),
            generation: 0,
            alive: 0,
            grid,
            config,
        };
        ret.populate();
        ret.restart();
        info!(
            "Started {}x{} session with rule {} on {} threads",
            ret.config.rows,
            ret.config.cols,
            ret.config.rule,
            ret.stepper.threads(),
        );
        Ok(ret)
    }

    /// Returns the configuration the session is running with. Its size always
    /// matches the grid.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }
    /// Returns the current generation.
    pub fn grid(&self) -> &BitGrid {
        &self.grid
    }
    /// Returns the cells marked by the most recent detection pass.
    pub fn highlight(&self) -> &HighlightBuffer {
        &self.highlight
    }
    /// Returns the snapshots taken before recent steps.
    pub fn history(&self) -> &HistoryRing {
        &self.history
    }
    /// Returns the transition rule.
    pub fn rule(&self) -> Rule {
        self.config.rule
    }
    /// Returns the number of steps since the grid was last reset or loaded.
    pub fn generation(&self) -> u64 {
        self.generation
    }
    /// Returns the number of live cells.
    pub fn alive_count(&self) -> usize {
        self.alive
    }

    /// Snapshots the grid into the history and advances it by one
    /// generation.
    pub fn step(&mut self) -> StepReport {
        self.history.push(self.grid.clone());
        let (next, report) = self.stepper.step(&self.grid, self.config.rule);
        self.grid = next;
        self.generation += 1;
        self.alive = report.alive;
        debug!(
            "Computed generation {} with {} live cells in {:?}",
            self.generation, self.alive, report.elapsed,
        );
        report
    }

    /// Clears the highlight and marks every occurrence of the selected
    /// patterns in the current generation. Evolving patterns are matched
    /// against the most recent history snapshot.
    pub fn detect(&mut self, patterns: &[PatternId]) -> DetectReport {
        self.highlight.clear();
        let previous = self.history.previous().unwrap_or(&self.grid);
        self.matcher
            .scan(previous, &self.grid, patterns, &self.highlight)
    }

    /// Advances by one generation and then runs a detection pass.
    pub fn tick(&mut self, patterns: &[PatternId]) -> TickReport {
        let step = self.step();
        let detect = self.detect(patterns);
        TickReport {
            step,
            detect,
            generation: self.generation,
            alive: self.alive,
        }
    }

    /// Kills every cell and forgets the history.
    pub fn reset(&mut self) {
        self.grid.clear();
        self.restart();
        info!("Reset {}x{} grid", self.grid.rows(), self.grid.cols());
    }

    /// Switches to a new size and rule and refills the grid at the configured
    /// density. On error the session is left unchanged.
    pub fn reconfigure(&mut self, config: SessionConfig) -> Result<(), ConfigError> {
        config.validate()?;
        if config.thread_count() != self.stepper.threads() {
            let pool = Arc::new(build_pool(config.thread_count())?);
            self.stepper = ParallelStepper::new(Arc::clone(&pool));
            self.matcher = PatternMatcher::new(pool);
        }
        self.grid = BitGrid::new(config.rows, config.cols);
        self.highlight = HighlightBuffer::new(config.rows, config.cols);
        self.config = config;
        self.populate();
        self.restart();
        info!(
            "Reconfigured session to {}x{} with rule {}",
            self.config.rows, self.config.cols, self.config.rule,
        );
        Ok(())
    }

    /// Replaces the grid with random cells, each alive with probability
    /// `density`. The same seed always produces the same grid.
    pub fn randomize(&mut self, density: f64, seed: u64) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&density) {
            return Err(ConfigError::BadDensity(density));
        }
        self.grid.randomize(density, &mut StdRng::seed_from_u64(seed));
        self.restart();
        info!(
            "Randomized grid with density {} ({} live cells)",
            density, self.alive,
        );
        Ok(())
    }

    /// Sets the state of a single cell.
    ///
    /// # Panics
    ///
    /// This method panics if the cell is outside the grid.
    pub fn set_cell(&mut self, x: usize, y: usize, alive: bool) {
        if self.grid.get(x, y) != alive {
            self.toggle_cell(x, y);
        }
    }
    /// Flips the state of a single cell and returns its new state.
    ///
    /// # Panics
    ///
    /// This method panics if the cell is outside the grid.
    pub fn toggle_cell(&mut self, x: usize, y: usize) -> bool {
        let alive = self.grid.toggle(x, y);
        if alive {
            self.alive += 1;
        } else {
            self.alive -= 1;
        }
        alive
    }

    /// Replaces the grid with one parsed from text, adopting its size. On
    /// error the session is left unchanged.
    pub fn load_text(&mut self, s: &str) -> LoadResult<()> {
        let grid = text::parse(s)?;
        self.replace_grid(grid);
        Ok(())
    }
    /// Replaces the grid with one read from a text file, adopting its size.
    /// On error the session is left unchanged.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> LoadResult<()> {
        let grid = io::load_file(path)?;
        self.replace_grid(grid);
        Ok(())
    }

    /// Returns the current generation in the text format.
    pub fn save_text(&self) -> String {
        text::to_string(&self.grid)
    }
    /// Writes the current generation to a text file.
    pub fn save_file(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        io::save_file(&self.grid, path)
    }

    fn replace_grid(&mut self, grid: BitGrid) {
        if (grid.rows(), grid.cols()) != (self.config.rows, self.config.cols) {
            self.config.rows = grid.rows();
            self.config.cols = grid.cols();
            self.highlight = HighlightBuffer::new(grid.rows(), grid.cols());
        }
        self.grid = grid;
        self.restart();
    }

    /// Fills the grid with random cells at the configured density.
    fn populate(&mut self) {
        if self.config.density > 0.0 {
            let seed = self.config.seed.unwrap_or_else(rand::random);
            info!(
                "Seeding grid with density {} from seed {}",
                self.config.density, seed,
            );
            self.grid
                .randomize(self.config.density, &mut StdRng::seed_from_u64(seed));
        }
    }

    /// Clears the highlight and history and zeroes the counters, keeping the
    /// current grid as generation zero.
    fn restart(&mut self) {
        self.highlight.clear();
        self.reseed_history();
        self.generation = 0;
        self.alive = self.grid.population();
    }

    fn reseed_history(&mut self) {
        self.history.clear();
        self.history.push(self.grid.clone());
    }
}

#[cfg(test)]
mod tests;
