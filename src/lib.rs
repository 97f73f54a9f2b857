//! Toy Robot: a pure functional command interpreter for a robot on a table
//!
//! A single robot moves on a 5x5 table, driven by the commands `PLACE x,y,F`,
//! `MOVE`, `LEFT`, `RIGHT` and `REPORT`. The crate follows a "pure core,
//! imperative shell" layout: parsing and state transitions are pure
//! functions, and the engine is the only place state and logs change.
//!
//! # Core Concepts
//!
//! - **Commands**: typed values produced by [`command::parse`]
//! - **State machine**: [`machine::apply`], a pure transition function
//! - **Session**: owns the robot, the history and the REPORT output
//! - **Epochs**: a reset or a new batch cancels any batch still in flight
//!
//! # Example
//!
//! ```rust
//! use toy_robot::engine::Session;
//! use toy_robot::core::Severity;
//!
//! let mut session = Session::new();
//! session.run_batch(["PLACE 1,2,EAST", "MOVE", "MOVE", "LEFT", "MOVE", "REPORT"]);
//!
//! assert_eq!(session.output().reports(), ["3,3,NORTH"]);
//! assert_eq!(session.history().count(Severity::Success), 5);
//!
//! // Quick commands continue from the current state.
//! session.run_one("RIGHT");
//! assert_eq!(
//!     session.history().last().map(|e| e.message.as_str()),
//!     Some("Turned RIGHT, now facing EAST")
//! );
//! ```

pub mod command;
pub mod config;
pub mod core;
pub mod engine;
pub mod machine;
pub mod presets;
pub mod snapshot;

// Re-export commonly used types
pub use command::{parse, Command, MalformedPlace};
pub use config::{load_settings, settings_file, Overrides, Settings};
pub use crate::core::{Direction, History, HistoryEntry, Output, RobotState, Severity};
pub use engine::{Driver, RunSummary, Session, StepResult};
pub use machine::{apply, Outcome};
pub use presets::Preset;
pub use snapshot::Snapshot;
