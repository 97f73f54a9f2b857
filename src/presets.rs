//! Canned example scripts.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One of the built-in example scripts.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Preset {
    /// Place, move north, report
    A,
    /// Place, turn left, report
    B,
    /// A short route ending at `3,3,NORTH`
    C,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::A, Preset::B, Preset::C];

    pub fn name(&self) -> &'static str {
        match self {
            Self::A => "a",
            Self::B => "b",
            Self::C => "c",
        }
    }

    /// Script text, one command per line.
    pub fn script(&self) -> &'static str {
        match self {
            Self::A => "PLACE 0,0,NORTH\nMOVE\nREPORT",
            Self::B => "PLACE 0,0,NORTH\nLEFT\nREPORT",
            Self::C => "PLACE 1,2,EAST\nMOVE\nMOVE\nLEFT\nMOVE\nREPORT",
        }
    }

    /// The REPORT output the script produces.
    pub fn expected_output(&self) -> &'static str {
        match self {
            Self::A => "0,1,NORTH",
            Self::B => "0,0,WEST",
            Self::C => "3,3,NORTH",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown example '{0}', expected one of a, b, c")]
pub struct ParsePresetError(pub String);

impl FromStr for Preset {
    type Err = ParsePresetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParsePresetError(s.to_string()))
    }
}
