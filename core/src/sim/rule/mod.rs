//! Everything related to the description of a cellular automaton rule,
//! primarily the transition function.

use std::fmt;
use std::str::FromStr;

mod totalistic;

use crate::config::ConfigError;
use crate::grid::{self, BitGrid};
pub use totalistic::*;

/// Rule selector name for the Life-like family offered by the setup dialog.
pub const GAME_OF_LIFE_SELECTOR: &str = "Game of Life";
/// Rule selector name for the elementary rule 30.
pub const RULE_30_SELECTOR: &str = "Rule 30";
/// Variant selector name for B3/S23.
pub const STANDARD_VARIANT_SELECTOR: &str = "Standard (B3/S23)";
/// Variant selector name for B2/S7.
pub const B2_S7_VARIANT_SELECTOR: &str = "Variant (B2/S7)";

/// Cellular automaton rule.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Rule {
    /// Conway's Game of Life (B3/S23).
    ConwayStandard,
    /// Life-like variant B2/S7.
    ConwayVariant,
    /// Wolfram's elementary rule 30, applied to each row from the row above
    /// it. Row 0 never changes.
    Rule30,
}
impl Default for Rule {
    fn default() -> Self {
        Self::ConwayStandard
    }
}
impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::ConwayStandard => write!(f, "{}", LIFE),
            Rule::ConwayVariant => write!(f, "{}", B2_S7),
            Rule::Rule30 => write!(f, "{}", RULE_30_SELECTOR),
        }
    }
}
impl FromStr for Rule {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, ConfigError> {
        let normalized = s.trim().to_ascii_lowercase().replace(' ', "");
        match normalized.as_str() {
            "b3/s23" | "life" | "gameoflife" | "standard(b3/s23)" => Ok(Rule::ConwayStandard),
            "b2/s7" | "variant(b2/s7)" => Ok(Rule::ConwayVariant),
            "rule30" | "w30" => Ok(Rule::Rule30),
            _ => Err(ConfigError::UnknownRule(s.to_owned())),
        }
    }
}

impl Rule {
    /// Returns the rule picked by a rule selector and a Life variant selector,
    /// as offered by the setup dialog. The variant is ignored for rule 30.
    pub fn from_selectors(rule: &str, variant: &str) -> Result<Self, ConfigError> {
        match rule.trim() {
            GAME_OF_LIFE_SELECTOR => match variant.trim() {
                STANDARD_VARIANT_SELECTOR => Ok(Rule::ConwayStandard),
                B2_S7_VARIANT_SELECTOR => Ok(Rule::ConwayVariant),
                other => Err(ConfigError::UnknownVariant(other.to_owned())),
            },
            RULE_30_SELECTOR => Ok(Rule::Rule30),
            other => Err(ConfigError::UnknownRule(other.to_owned())),
        }
    }

    /// Returns the next state of the cell at `(x, y)`. Only reads `grid`.
    #[inline]
    pub fn next_state(self, grid: &BitGrid, x: usize, y: usize) -> bool {
        match self {
            Rule::ConwayStandard => LIFE.next_state(grid, x, y),
            Rule::ConwayVariant => B2_S7.next_state(grid, x, y),
            Rule::Rule30 => rule_30_next_state(grid, x, y),
        }
    }
}

/// Returns the next state of the cell at `(x, y)` under `rule`.
#[inline]
pub fn next_state(grid: &BitGrid, x: usize, y: usize, rule: Rule) -> bool {
    rule.next_state(grid, x, y)
}

fn rule_30_next_state(grid: &BitGrid, x: usize, y: usize) -> bool {
    if y == 0 {
        return grid.get(x, 0);
    }
    let cols = grid.cols();
    let above = grid.row(y - 1);
    let left = grid::get_bit(above, (x + cols - 1) % cols);
    let center = grid::get_bit(above, x);
    let right = grid::get_bit(above, (x + 1) % cols);
    left ^ (center || right)
}
