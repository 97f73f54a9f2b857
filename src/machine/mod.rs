//! The robot state machine.
//!
//! Two modes, Unplaced and Placed. Only a PLACE on the table leaves
//! Unplaced; a PLACE while already placed re-places the robot. There is no
//! terminal state.
//!
//! [`apply`] is a pure function. Recording its outcome is the engine's job.

mod outcome;
mod transition;

pub use outcome::{OutOfBounds, Outcome, Turn};
pub use transition::apply;
