//! What happened when a command was applied.

use crate::command::{join_reasons, PlaceSyntaxError};
use crate::core::{Direction, Pose, Position, Severity};
use std::fmt;

/// Direction of a rotation.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Turn {
    Left,
    Right,
}

impl Turn {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
        }
    }
}

/// The command that would have left the table.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum OutOfBounds {
    /// PLACE named a cell outside the table
    Place { x: i64, y: i64 },
    /// MOVE would step off the edge
    Move { from: Position, facing: Direction },
}

/// Result of processing one command line.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Outcome {
    Placed { pose: Pose },
    Moved { to: Position },
    Rotated { turn: Turn, facing: Direction },
    Reported { value: String },
    RejectedOutOfBounds(OutOfBounds),
    RejectedNotPlaced,
    RejectedMalformed { reasons: Vec<PlaceSyntaxError> },
    RejectedUnknownCommand { raw: String },
}

impl Outcome {
    /// Severity tag for the history entry of this outcome.
    ///
    /// The whole severity policy lives here. Out-of-bounds PLACE is an
    /// error, out-of-bounds MOVE is a warning.
    pub fn severity(&self) -> Severity {
        match self {
            Self::Placed { .. } | Self::Moved { .. } | Self::Rotated { .. } => Severity::Success,
            Self::Reported { .. } => Severity::Report,
            Self::RejectedNotPlaced => Severity::Warning,
            Self::RejectedOutOfBounds(OutOfBounds::Move { .. }) => Severity::Warning,
            Self::RejectedOutOfBounds(OutOfBounds::Place { .. }) => Severity::Error,
            Self::RejectedMalformed { .. } | Self::RejectedUnknownCommand { .. } => {
                Severity::Error
            }
        }
    }

    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::RejectedOutOfBounds(_)
                | Self::RejectedNotPlaced
                | Self::RejectedMalformed { .. }
                | Self::RejectedUnknownCommand { .. }
        )
    }

    /// The REPORT value, for outcomes that produce output.
    pub fn report(&self) -> Option<&str> {
        match self {
            Self::Reported { value } => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Placed { pose } => write!(
                f,
                "Placed robot at {} facing {}",
                pose.position(),
                pose.facing()
            ),
            Self::Moved { to } => write!(f, "Moved to {to}"),
            Self::Rotated { turn, facing } => {
                write!(f, "Turned {}, now facing {facing}", turn.name())
            }
            Self::Reported { value } => write!(f, "REPORT: {value}"),
            Self::RejectedOutOfBounds(OutOfBounds::Place { x, y }) => {
                write!(f, "Invalid PLACE: ({x}, {y}) is off the table")
            }
            Self::RejectedOutOfBounds(OutOfBounds::Move { .. }) => {
                f.write_str("Move ignored: would fall off table")
            }
            Self::RejectedNotPlaced => f.write_str("Command ignored: robot not placed yet"),
            Self::RejectedMalformed { reasons } => {
                write!(f, "Invalid PLACE command format: {}", join_reasons(reasons))
            }
            Self::RejectedUnknownCommand { raw } => write!(f, "Unknown command: {raw}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepted_outcomes_are_success() {
        let placed = Outcome::Placed {
            pose: Pose::new(0, 0, Direction::North).unwrap(),
        };
        let moved = Outcome::Moved {
            to: Position::new(0, 1).unwrap(),
        };
        let rotated = Outcome::Rotated {
            turn: Turn::Left,
            facing: Direction::West,
        };

        for outcome in [placed, moved, rotated] {
            assert_eq!(outcome.severity(), Severity::Success);
            assert!(!outcome.is_rejection());
        }
    }

    #[test]
    fn out_of_bounds_severity_depends_on_command() {
        let place = Outcome::RejectedOutOfBounds(OutOfBounds::Place { x: 5, y: 5 });
        let step = Outcome::RejectedOutOfBounds(OutOfBounds::Move {
            from: Position::new(0, 4).unwrap(),
            facing: Direction::North,
        });

        assert_eq!(place.severity(), Severity::Error);
        assert_eq!(step.severity(), Severity::Warning);
        assert!(place.is_rejection());
        assert!(step.is_rejection());
    }

    #[test]
    fn rejections_map_to_expected_severity() {
        assert_eq!(Outcome::RejectedNotPlaced.severity(), Severity::Warning);
        assert_eq!(
            Outcome::RejectedMalformed { reasons: vec![] }.severity(),
            Severity::Error
        );
        assert_eq!(
            Outcome::RejectedUnknownCommand {
                raw: "JUMP".to_string()
            }
            .severity(),
            Severity::Error
        );
    }

    #[test]
    fn report_value_is_exposed() {
        let outcome = Outcome::Reported {
            value: "0,1,NORTH".to_string(),
        };
        assert_eq!(outcome.severity(), Severity::Report);
        assert_eq!(outcome.report(), Some("0,1,NORTH"));
        assert_eq!(Outcome::RejectedNotPlaced.report(), None);
    }

    #[test]
    fn messages_describe_outcome() {
        let cases = [
            (
                Outcome::Placed {
                    pose: Pose::new(1, 2, Direction::East).unwrap(),
                },
                "Placed robot at (1, 2) facing EAST",
            ),
            (
                Outcome::Moved {
                    to: Position::new(0, 1).unwrap(),
                },
                "Moved to (0, 1)",
            ),
            (
                Outcome::Rotated {
                    turn: Turn::Right,
                    facing: Direction::South,
                },
                "Turned RIGHT, now facing SOUTH",
            ),
            (
                Outcome::Reported {
                    value: "3,3,NORTH".to_string(),
                },
                "REPORT: 3,3,NORTH",
            ),
            (
                Outcome::RejectedOutOfBounds(OutOfBounds::Place { x: 5, y: -1 }),
                "Invalid PLACE: (5, -1) is off the table",
            ),
            (
                Outcome::RejectedNotPlaced,
                "Command ignored: robot not placed yet",
            ),
            (
                Outcome::RejectedMalformed {
                    reasons: vec![PlaceSyntaxError::MissingArguments],
                },
                "Invalid PLACE command format: missing arguments, expected x,y,FACING",
            ),
            (
                Outcome::RejectedUnknownCommand {
                    raw: "JUMP".to_string(),
                },
                "Unknown command: JUMP",
            ),
        ];

        for (outcome, expected) in cases {
            assert_eq!(outcome.to_string(), expected);
        }
    }
}
