//! Reasons a snapshot could not be read back.

use thiserror::Error;

/// A snapshot document that does not describe a consistent session.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Not JSON, or JSON that does not have the snapshot shape. Includes
    /// partially placed and off-table robots.
    #[error("snapshot does not decode: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("snapshot version {found} is not readable, expected version {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// `history[index].sequence` breaks the 1..n numbering.
    #[error("history[{index}].sequence is {found}, expected {expected}")]
    SequenceGap {
        index: usize,
        found: u64,
        expected: u64,
    },

    /// `output` does not hold one value per report entry in `history`.
    #[error("history has {reports} report entries but output holds {outputs} values")]
    OutputMismatch { reports: usize, outputs: usize },
}
