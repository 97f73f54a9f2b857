//! Core data types for the robot interpreter.
//!
//! This module contains the plain values the rest of the crate operates on:
//! - Directions and their rotation order
//! - Robot state with the no-partial-placement invariant
//! - Append-only history and report output
//!
//! Nothing here performs I/O or knows about commands.

mod direction;
mod history;
mod state;

pub use direction::{Direction, ParseDirectionError, DIRECTIONS};
pub use history::{History, HistoryEntry, Output, Severity};
pub use state::{OffTable, Pose, Position, RobotState, RobotView, RobotViewError, TABLE_SIZE};
