//! Cardinal directions and rotation over their fixed cyclic order.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One of the four cardinal directions a robot can face.
///
/// Rotation walks the fixed cyclic order `[North, East, South, West]`:
/// turning right advances one step, turning left goes back one step.
///
/// # Example
///
/// ```rust
/// use toy_robot::core::Direction;
///
/// assert_eq!(Direction::North.right(), Direction::East);
/// assert_eq!(Direction::North.left(), Direction::West);
/// assert_eq!("south".parse::<Direction>().unwrap(), Direction::South);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    North,
    East,
    South,
    West,
}

/// Rotation order used by [`Direction::left`] and [`Direction::right`].
pub const DIRECTIONS: [Direction; 4] = [
    Direction::North,
    Direction::East,
    Direction::South,
    Direction::West,
];

impl Direction {
    /// Upper-case name as it appears in commands and reports.
    pub fn name(&self) -> &'static str {
        match self {
            Self::North => "NORTH",
            Self::East => "EAST",
            Self::South => "SOUTH",
            Self::West => "WEST",
        }
    }

    /// Position of this direction in [`DIRECTIONS`].
    pub fn index(&self) -> usize {
        match self {
            Self::North => 0,
            Self::East => 1,
            Self::South => 2,
            Self::West => 3,
        }
    }

    /// Rotate by `steps` positions over the cyclic order (negative turns left).
    pub fn rotate(&self, steps: i32) -> Self {
        let len = DIRECTIONS.len() as i32;
        let index = (self.index() as i32 + steps).rem_euclid(len);
        DIRECTIONS[index as usize]
    }

    /// Quarter turn counter-clockwise.
    pub fn left(&self) -> Self {
        self.rotate(-1)
    }

    /// Quarter turn clockwise.
    pub fn right(&self) -> Self {
        self.rotate(1)
    }

    /// Unit step `(dx, dy)` taken by a MOVE while facing this direction.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Self::North => (0, 1),
            Self::East => (1, 0),
            Self::South => (0, -1),
            Self::West => (-1, 0),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Token that is not one of the four direction names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown direction '{token}'")]
pub struct ParseDirectionError {
    pub token: String,
}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        DIRECTIONS
            .iter()
            .copied()
            .find(|d| d.name().eq_ignore_ascii_case(token))
            .ok_or_else(|| ParseDirectionError {
                token: token.to_string(),
            })
    }
}
