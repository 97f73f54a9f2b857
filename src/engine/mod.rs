//! Execution engine: the imperative shell around the pure state machine.
//!
//! # Key Concepts
//!
//! - **Session**: exclusively owns the robot, the history and the output
//! - **Batch runs**: reset, then one line per [`Session::step`]
//! - **Epochs**: every reset or new batch bumps the epoch; a step from an
//!   older run commits nothing
//! - **Driver**: runs batches on tokio with a pause before each step
//!
//! [`Session`] can be driven synchronously by any external ticker. [`Driver`]
//! is the paced async variant used by the command-line front end.

mod driver;
mod session;

pub use driver::Driver;
pub use session::{BatchRun, RunSummary, Session, StepResult};
