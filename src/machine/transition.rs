//! The transition function.

use super::outcome::{OutOfBounds, Outcome, Turn};
use crate::command::Command;
use crate::core::{Direction, Pose, RobotState};

/// Apply `command` to `state`, returning the next state and what happened.
///
/// Pure: the same inputs always produce the same outputs, and `state` is
/// never modified. Rejected commands return an unchanged copy of `state`.
///
/// While unplaced, only a PLACE on the table is accepted. Every other
/// command, unknown text included, is rejected as not placed.
///
/// # Example
///
/// ```rust
/// use toy_robot::command::Command;
/// use toy_robot::core::{Direction, RobotState};
/// use toy_robot::machine::{apply, Outcome};
///
/// let start = RobotState::placed(0, 0, Direction::North)?;
/// let (next, outcome) = apply(&start, &Command::Move);
///
/// assert_eq!(next, RobotState::placed(0, 1, Direction::North)?);
/// assert!(matches!(outcome, Outcome::Moved { .. }));
///
/// let (same, outcome) = apply(&RobotState::Unplaced, &Command::Report);
/// assert_eq!(same, RobotState::Unplaced);
/// assert_eq!(outcome, Outcome::RejectedNotPlaced);
/// # Ok::<(), toy_robot::core::OffTable>(())
/// ```
pub fn apply(state: &RobotState, command: &Command) -> (RobotState, Outcome) {
    match (command, state) {
        (Command::Place { x, y, facing }, _) => place(state, *x, *y, *facing),
        (_, RobotState::Unplaced) => (*state, Outcome::RejectedNotPlaced),
        (Command::Move, RobotState::Placed(pose)) => step(pose),
        (Command::Left, RobotState::Placed(pose)) => rotate(pose, Turn::Left),
        (Command::Right, RobotState::Placed(pose)) => rotate(pose, Turn::Right),
        (Command::Report, RobotState::Placed(pose)) => (
            *state,
            Outcome::Reported {
                value: pose.report(),
            },
        ),
        (Command::Unknown { raw }, RobotState::Placed(_)) => (
            *state,
            Outcome::RejectedUnknownCommand { raw: raw.clone() },
        ),
    }
}

fn place(state: &RobotState, x: i64, y: i64, facing: Direction) -> (RobotState, Outcome) {
    match Pose::new(x, y, facing) {
        Ok(pose) => (RobotState::Placed(pose), Outcome::Placed { pose }),
        Err(_) => (
            *state,
            Outcome::RejectedOutOfBounds(OutOfBounds::Place { x, y }),
        ),
    }
}

fn step(pose: &Pose) -> (RobotState, Outcome) {
    match pose.position().step(pose.facing()) {
        Some(to) => (
            RobotState::Placed(Pose::at(to, pose.facing())),
            Outcome::Moved { to },
        ),
        None => (
            RobotState::Placed(*pose),
            Outcome::RejectedOutOfBounds(OutOfBounds::Move {
                from: pose.position(),
                facing: pose.facing(),
            }),
        ),
    }
}

fn rotate(pose: &Pose, turn: Turn) -> (RobotState, Outcome) {
    let facing = match turn {
        Turn::Left => pose.facing().left(),
        Turn::Right => pose.facing().right(),
    };
    (
        RobotState::Placed(pose.facing_towards(facing)),
        Outcome::Rotated { turn, facing },
    )
}
