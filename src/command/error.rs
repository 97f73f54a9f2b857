//! Errors describing why a PLACE line could not be parsed.

use crate::core::ParseDirectionError;
use std::fmt;
use thiserror::Error;

/// Coordinate axis named in a syntax error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => f.write_str("x"),
            Self::Y => f.write_str("y"),
        }
    }
}

/// A single problem found in the arguments of a PLACE command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaceSyntaxError {
    #[error("missing arguments, expected x,y,FACING")]
    MissingArguments,

    #[error("expected whitespace after PLACE, found '{found}'")]
    MissingSeparator { found: String },

    #[error("expected 3 comma-separated arguments, found {found}")]
    WrongArity { found: usize },

    #[error("{axis} coordinate '{token}' is not an integer")]
    InvalidCoordinate { axis: Axis, token: String },

    #[error(transparent)]
    InvalidDirection(#[from] ParseDirectionError),
}

/// A line that starts with the PLACE keyword but does not follow its grammar.
///
/// Carries every problem found in the arguments so the message can name
/// them all at once.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed PLACE command '{raw}': {}", join_reasons(.reasons))]
pub struct MalformedPlace {
    /// The normalized line
    pub raw: String,
    pub reasons: Vec<PlaceSyntaxError>,
}

pub(crate) fn join_reasons(reasons: &[PlaceSyntaxError]) -> String {
    reasons
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
