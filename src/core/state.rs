//! Robot state on the table.
//!
//! A robot is either unplaced or placed with a full pose. There is no
//! partially placed robot: the type has no way to express one, and the flat
//! serialized view rejects one on the way in.

use super::direction::Direction;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Width and height of the square table.
pub const TABLE_SIZE: i32 = 5;

/// A coordinate pair that does not name a cell on the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("({x}, {y}) is off the table")]
pub struct OffTable {
    pub x: i64,
    pub y: i64,
}

/// A cell on the table.
///
/// Both coordinates always lie in `0..TABLE_SIZE`; the only ways to get a
/// `Position` are the checked [`Position::new`] and [`Position::step`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
pub struct Position {
    x: i32,
    y: i32,
}

impl Position {
    pub fn new(x: i64, y: i64) -> Result<Self, OffTable> {
        let range = 0..i64::from(TABLE_SIZE);
        if !range.contains(&x) || !range.contains(&y) {
            return Err(OffTable { x, y });
        }
        // Both values are in 0..TABLE_SIZE, so they fit in i32.
        Ok(Self {
            x: x as i32,
            y: y as i32,
        })
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    /// The neighbouring cell one unit step towards `facing`, or `None` at
    /// the edge.
    pub fn step(&self, facing: Direction) -> Option<Self> {
        let (dx, dy) = facing.delta();
        Self::new(
            i64::from(self.x) + i64::from(dx),
            i64::from(self.y) + i64::from(dy),
        )
        .ok()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Where a placed robot stands and which way it faces.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
pub struct Pose {
    position: Position,
    facing: Direction,
}

impl Pose {
    pub fn new(x: i64, y: i64, facing: Direction) -> Result<Self, OffTable> {
        Ok(Self::at(Position::new(x, y)?, facing))
    }

    pub fn at(position: Position, facing: Direction) -> Self {
        Self { position, facing }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn facing(&self) -> Direction {
        self.facing
    }

    pub fn facing_towards(&self, facing: Direction) -> Self {
        Self::at(self.position, facing)
    }

    /// Report string in the `x,y,FACING` form.
    pub fn report(&self) -> String {
        format!("{},{},{}", self.position.x, self.position.y, self.facing)
    }
}

/// State of the single robot.
///
/// Serializes to the flat `{placed, x, y, facing}` shape read by the
/// presentation layer.
///
/// # Example
///
/// ```rust
/// use toy_robot::core::{Direction, RobotState};
///
/// let robot = RobotState::placed(1, 2, Direction::East)?;
/// assert!(robot.is_placed());
/// assert_eq!(robot.x(), Some(1));
/// assert_eq!(robot.facing(), Some(Direction::East));
///
/// assert_eq!(RobotState::default().x(), None);
///
/// assert!(RobotState::placed(5, 0, Direction::North).is_err());
/// # Ok::<(), toy_robot::core::OffTable>(())
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(into = "RobotView", try_from = "RobotView")]
pub enum RobotState {
    #[default]
    Unplaced,
    Placed(Pose),
}

impl RobotState {
    /// A robot placed at `(x, y)`, if that cell is on the table.
    pub fn placed(x: i64, y: i64, facing: Direction) -> Result<Self, OffTable> {
        Pose::new(x, y, facing).map(Self::Placed)
    }

    pub fn is_placed(&self) -> bool {
        matches!(self, Self::Placed(_))
    }

    pub fn pose(&self) -> Option<&Pose> {
        match self {
            Self::Placed(pose) => Some(pose),
            Self::Unplaced => None,
        }
    }

    pub fn x(&self) -> Option<i32> {
        self.pose().map(|p| p.position.x)
    }

    pub fn y(&self) -> Option<i32> {
        self.pose().map(|p| p.position.y)
    }

    pub fn facing(&self) -> Option<Direction> {
        self.pose().map(Pose::facing)
    }
}

/// Flat wire view of [`RobotState`].
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct RobotView {
    pub placed: bool,
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub facing: Option<Direction>,
}

/// A flat view that does not describe a valid robot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RobotViewError {
    #[error("robot view is partially placed (placed={placed}, x={x:?}, y={y:?}, facing={facing:?})")]
    Partial {
        placed: bool,
        x: Option<i32>,
        y: Option<i32>,
        facing: Option<Direction>,
    },

    #[error("placed robot at {0}")]
    OffTable(#[from] OffTable),
}

impl From<RobotState> for RobotView {
    fn from(state: RobotState) -> Self {
        Self {
            placed: state.is_placed(),
            x: state.x(),
            y: state.y(),
            facing: state.facing(),
        }
    }
}

impl TryFrom<RobotView> for RobotState {
    type Error = RobotViewError;

    fn try_from(view: RobotView) -> Result<Self, Self::Error> {
        match (view.placed, view.x, view.y, view.facing) {
            (false, None, None, None) => Ok(Self::Unplaced),
            (true, Some(x), Some(y), Some(facing)) => {
                Ok(Self::placed(i64::from(x), i64::from(y), facing)?)
            }
            (placed, x, y, facing) => Err(RobotViewError::Partial {
                placed,
                x,
                y,
                facing,
            }),
        }
    }
}
