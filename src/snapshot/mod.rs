//! Read-only snapshots of an interpreter session.
//!
//! A snapshot is what the presentation layer reads: the robot, the REPORT
//! output and the history, stamped with the session id and epoch. Snapshots
//! are never fed back into a session.

use crate::core::{History, Output, RobotState, Severity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod error;

pub use error::SnapshotError;

/// Version identifier for snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serializable view of a session at one point in time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Snapshot format version
    pub version: u32,

    /// Session the snapshot was taken from
    pub session_id: Uuid,

    /// When the snapshot was taken
    pub taken_at: DateTime<Utc>,

    /// Session epoch at the time of the snapshot
    pub epoch: u64,

    /// Whether a batch was still in flight
    pub running: bool,

    pub robot: RobotState,

    /// REPORT values in emission order
    pub output: Output,

    pub history: History,
}

impl Snapshot {
    pub fn new(
        session_id: Uuid,
        epoch: u64,
        running: bool,
        robot: RobotState,
        output: Output,
        history: History,
    ) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            session_id,
            taken_at: Utc::now(),
            epoch,
            running,
            robot,
            output,
            history,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Decode a snapshot, checking its version and history numbering.
    pub fn from_json(raw: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(raw)?;

        if snapshot.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: snapshot.version,
                supported: SNAPSHOT_VERSION,
            });
        }

        snapshot.validate()?;
        Ok(snapshot)
    }

    fn validate(&self) -> Result<(), SnapshotError> {
        for (index, entry) in self.history.iter().enumerate() {
            let expected = index as u64 + 1;
            if entry.sequence != expected {
                return Err(SnapshotError::SequenceGap {
                    index,
                    found: entry.sequence,
                    expected,
                });
            }
        }

        let reports = self
            .history
            .iter()
            .filter(|e| e.severity == Severity::Report)
            .count();
        if reports != self.output.len() {
            return Err(SnapshotError::OutputMismatch {
                reports,
                outputs: self.output.len(),
            });
        }

        Ok(())
    }
}
