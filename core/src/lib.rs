//! Toroidal bit-packed cellular automaton simulation with parallel pattern
//! detection.

#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all)]
#![deny(clippy::correctness)]

pub mod config;
pub mod display;
pub mod grid;
pub mod highlight;
pub mod history;
pub mod io;
pub mod pattern;
pub mod session;
pub mod sim;

pub mod prelude {
    //! Types needed to run a session.

    pub use crate::config::{ConfigError, SessionConfig};
    pub use crate::display::{cell_display, CellDisplay};
    pub use crate::grid::BitGrid;
    pub use crate::highlight::HighlightBuffer;
    pub use crate::history::HistoryRing;
    pub use crate::io::LoadError;
    pub use crate::pattern::{DetectReport, PatternId};
    pub use crate::session::{Session, TickReport};
    pub use crate::sim::rule::Rule;
    pub use crate::sim::{StepReport, WorkerTask, WorkerTaskFailure};
}
