//! The built-in pattern definitions.

use std::fmt;
use std::str::FromStr;

use super::{Bitmask, Evolving, Offset, Pattern, StillLife};

/// 2x2 block, with the surrounding dead ring.
pub const BLOCK: Pattern = Pattern::StillLife(StillLife {
    name: "Block",
    orientations: &[Bitmask::new(
        4,
        &[
            0b0000, //
            0b0110, //
            0b0110, //
            0b0000,
        ],
    )],
});

/// Beehive, lying horizontally or standing vertically.
pub const BEEHIVE: Pattern = Pattern::StillLife(StillLife {
    name: "Beehive",
    orientations: &[
        Bitmask::new(
            4,
            &[
                0b0110, //
                0b1001, //
                0b0110,
            ],
        ),
        Bitmask::new(
            4,
            &[
                0b0100, //
                0b1010, //
                0b1010, //
                0b0100,
            ],
        ),
    ],
});

/// Period-2 oscillator. Both phases share a center, so no offset is needed.
pub const BLINKER: Pattern = Pattern::Evolving(Evolving {
    name: "Blinker",
    phases: &[
        Bitmask::new(
            3,
            &[
                0b000, //
                0b111, //
                0b000,
            ],
        ),
        Bitmask::new(
            3,
            &[
                0b010, //
                0b010, //
                0b010,
            ],
        ),
    ],
    offsets: &[Offset::ZERO, Offset::ZERO],
    displacement: Offset::ZERO,
});

/// Period-4 spaceship travelling one cell down and to the right per period.
///
/// Each phase sits in a 5x5 box whose border is dead. The box moves down one
/// cell on the transition into phase 1 and right one cell on the transition
/// into phase 3.
pub const GLIDER: Pattern = Pattern::Evolving(Evolving {
    name: "Glider",
    phases: &[
        Bitmask::new(
            5,
            &[
                0b00000, //
                0b00100, //
                0b00010, //
                0b01110, //
                0b00000,
            ],
        ),
        Bitmask::new(
            5,
            &[
                0b00000, //
                0b01010, //
                0b00110, //
                0b00100, //
                0b00000,
            ],
        ),
        Bitmask::new(
            5,
            &[
                0b00000, //
                0b00010, //
                0b01010, //
                0b00110, //
                0b00000,
            ],
        ),
        Bitmask::new(
            5,
            &[
                0b00000, //
                0b01000, //
                0b00110, //
                0b01100, //
                0b00000,
            ],
        ),
    ],
    offsets: &[
        Offset::ZERO,
        Offset::new(0, -1),
        Offset::ZERO,
        Offset::new(-1, 0),
    ],
    displacement: Offset::new(1, 1),
});

/// Identifier for a built-in pattern.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PatternId {
    /// See `BLOCK`.
    Block,
    /// See `BEEHIVE`.
    Beehive,
    /// See `BLINKER`.
    Blinker,
    /// See `GLIDER`.
    Glider,
}
impl fmt::Display for PatternId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pattern().name())
    }
}
impl FromStr for PatternId {
    type Err = UnknownPattern;

    fn from_str(s: &str) -> Result<Self, UnknownPattern> {
        let s = s.trim();
        PatternId::ALL
            .iter()
            .copied()
            .find(|id| id.pattern().name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownPattern(s.to_owned()))
    }
}

impl PatternId {
    /// Every built-in pattern, in the order the selection list shows them.
    pub const ALL: [PatternId; 4] = [
        PatternId::Block,
        PatternId::Blinker,
        PatternId::Glider,
        PatternId::Beehive,
    ];

    /// Returns the definition of the pattern.
    pub fn pattern(self) -> &'static Pattern {
        match self {
            PatternId::Block => &BLOCK,
            PatternId::Beehive => &BEEHIVE,
            PatternId::Blinker => &BLINKER,
            PatternId::Glider => &GLIDER,
        }
    }
}

/// Error returned when parsing the name of a pattern that isn't built in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPattern(pub String);
impl fmt::Display for UnknownPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown pattern {:?}", self.0)
    }
}
impl std::error::Error for UnknownPattern {}
