// pattern.rs - Pattern identifiers and the state each pattern carries between steps

use std::fmt;

use serde::{Deserialize, Serialize};

/// The animations the engine can run over the calendar grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Pattern {
    #[default]
    GameOfLife,
    Ripple,
    Wave,
    Rain,
    Spiral,
    Noise,
    Rule30,
    /// Reserved. Has no step function; stepping it leaves the grid as is.
    Image,
}

impl Pattern {
    pub const ALL: [Self; 8] = [
        Self::GameOfLife,
        Self::Ripple,
        Self::Wave,
        Self::Rain,
        Self::Spiral,
        Self::Noise,
        Self::Rule30,
        Self::Image,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::GameOfLife => "Game of Life",
            Self::Ripple => "Ripple",
            Self::Wave => "Wave",
            Self::Rain => "Rain",
            Self::Spiral => "Spiral",
            Self::Noise => "Noise",
            Self::Rule30 => "Rule 30",
            Self::Image => "Image",
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One expanding ring of the Ripple pattern.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Emitter {
    pub center_row: usize,
    pub center_col: usize,
    pub radius: f64,
    pub max_radius: f64,
}

/// Data a pattern keeps from one step to the next.
///
/// Only Ripple, Wave and Spiral carry anything; the rest run on the grid
/// alone. Cleared whenever the active pattern changes.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PatternState {
    #[default]
    Empty,
    Ripple { emitters: Vec<Emitter> },
    Wave { time: u64 },
    Spiral { time: u64 },
}

impl PatternState {
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}
