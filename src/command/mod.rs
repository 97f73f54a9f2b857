//! Typed commands and the text grammar that produces them.
//!
//! The parser is the only producer of [`Command`] values. Lines that start
//! with `PLACE` but break its grammar come back as a [`MalformedPlace`] error
//! instead of a command, so they can never reach the state machine.

mod error;
mod parser;

pub use error::{Axis, MalformedPlace, PlaceSyntaxError};
pub(crate) use error::join_reasons;
pub use parser::{command_lines, normalize, parse};

use crate::core::Direction;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A parsed robot command.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Command {
    Place { x: i64, y: i64, facing: Direction },
    Move,
    Left,
    Right,
    Report,
    /// Any non-blank text that is not a recognized command
    Unknown { raw: String },
}

impl Command {
    /// Keyword this command was parsed from, if it was recognized.
    pub fn keyword(&self) -> Option<&'static str> {
        match self {
            Self::Place { .. } => Some("PLACE"),
            Self::Move => Some("MOVE"),
            Self::Left => Some("LEFT"),
            Self::Right => Some("RIGHT"),
            Self::Report => Some("REPORT"),
            Self::Unknown { .. } => None,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Place { x, y, facing } => write!(f, "PLACE {x},{y},{facing}"),
            Self::Unknown { raw } => f.write_str(raw),
            other => f.write_str(other.keyword().unwrap_or_default()),
        }
    }
}
