//! Headless terminal front-end.
//!
//! Runs a session for a fixed number of generations, printing the generation
//! and population after every step.

#![warn(missing_docs)]

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use log::{debug, info, LevelFilter};
use std::path::PathBuf;
use std::time::Duration;

use lifescan_core::config::DEFAULT_DENSITY;
use lifescan_core::prelude::*;
use lifescan_core::sim::rule::{GAME_OF_LIFE_SELECTOR, STANDARD_VARIANT_SELECTOR};

mod config;
mod driver;
mod render;
mod worker;

use config::Config;
use driver::Driver;

/// Simulates a toroidal cellular automaton and highlights known patterns.
#[derive(Parser, Debug)]
#[command(name = "lifescan")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Grid size as ROWSxCOLS
    #[arg(short, long, default_value = "64x64")]
    size: String,

    /// Rule family ("Game of Life" or "Rule 30")
    #[arg(short, long, default_value = GAME_OF_LIFE_SELECTOR)]
    rule: String,

    /// Game of Life variant ("Standard (B3/S23)" or "Variant (B2/S7)")
    #[arg(long, default_value = STANDARD_VARIANT_SELECTOR)]
    variant: String,

    /// Grid file to start from instead of a random grid
    #[arg(short, long)]
    load: Option<PathBuf>,

    /// File to save the final grid to
    #[arg(long)]
    save: Option<PathBuf>,

    /// Number of generations to run
    #[arg(short, long, default_value = "100")]
    generations: u64,

    /// Minimum time between steps, in milliseconds
    #[arg(short, long, default_value = "100")]
    interval_ms: u64,

    /// Patterns to highlight, separated by commas
    #[arg(
        short,
        long,
        value_delimiter = ',',
        default_values = ["Block", "Blinker", "Glider", "Beehive"]
    )]
    patterns: Vec<PatternId>,

    /// Number of worker threads (defaults to the number of CPUs)
    #[arg(short, long)]
    threads: Option<usize>,

    /// Fraction of cells alive in the initial random grid
    #[arg(short, long, default_value_t = DEFAULT_DENSITY)]
    density: f64,

    /// Seed for the initial random grid
    #[arg(long)]
    seed: Option<u64>,

    /// Print the final frame, and both generations after every step
    #[arg(long)]
    render: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn to_config(&self) -> Result<Config> {
        let mut config = Config::default();

        let session = &mut config.sim.session;
        *session = SessionConfig::from_selectors(&self.size, &self.rule, &self.variant)
            .context("Invalid session configuration")?;
        session.threads = self.threads;
        session.density = if self.load.is_some() { 0.0 } else { self.density };
        session.seed = self.seed;
        session.validate().context("Invalid session configuration")?;

        config.sim.generations = self.generations;
        config.sim.interval = Duration::from_millis(self.interval_ms);
        config.detect.patterns = self.patterns.clone();
        config.render.final_frame = self.render;
        config.render.debug_generations = self.render;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let level: LevelFilter = args
        .log_level
        .parse()
        .map_err(|_| anyhow!("Invalid log level {:?}", args.log_level))?;
    simple_logger::SimpleLogger::new().with_level(level).init()?;
    info!("Starting lifescan v{} ...", env!("CARGO_PKG_VERSION"));

    let config = args.to_config()?;
    debug!("{:#?}", config);

    let session = Session::new(config.sim.session.clone()).context("Unable to start session")?;
    let mut driver = Driver::new(session, &config.detect.patterns, config.sim.interval)?;
    if let Some(path) = &args.load {
        driver
            .edit(|s| s.load_file(path))?
            .with_context(|| format!("Unable to load {}", path.display()))?;
    }
    let session = std::sync::Arc::clone(driver.session());
    {
        let s = session.lock();
        println!("Generation: {}", s.generation());
        println!("Alive Cells: {}", s.alive_count());
    }

    driver.run(config.sim.generations, |report| {
        println!("Generation: {}", report.generation);
        println!("Alive Cells: {}", report.alive);
        for m in &report.detect.matches {
            println!("  {}: {}", m.pattern, m.count);
        }
        if config.render.debug_generations {
            let s = session.lock();
            if let Some(previous) = s.history().previous() {
                let max_size = config.render.max_size;
                if let Some(text) = render::render_generations(previous, s.grid(), max_size) {
                    println!("{}", text);
                }
            }
        }
    })?;
    info!(
        "Requested {} ticks, completed {}, dropped {} triggers",
        driver.requested(),
        driver.completed(),
        driver.dropped(),
    );

    let s = session.lock();
    if config.render.final_frame {
        match render::render_frame(s.grid(), s.highlight(), config.render.max_size) {
            Some(text) => println!("{}", text),
            None => println!(
                "Grid is too large to print (max {0}x{0})",
                config.render.max_size
            ),
        }
    }
    if let Some(path) = &args.save {
        s.save_file(path)
            .with_context(|| format!("Unable to save {}", path.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_and_density_reach_session() {
        let args = Args::parse_from([
            "lifescan", "--size", "20x30", "--density", "0.3", "--seed", "5",
        ]);
        let session = args.to_config().unwrap().sim.session;
        assert_eq!((20, 30), (session.rows, session.cols));
        assert_eq!((0.3, Some(5)), (session.density, session.seed));

        // A loaded file replaces the grid, so none is generated first.
        let args = Args::parse_from(["lifescan", "--load", "grid.txt", "--seed", "5"]);
        assert_eq!(0.0, args.to_config().unwrap().sim.session.density);
    }
}
