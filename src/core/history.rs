//! Append-only command history and report output.
//!
//! Both logs only grow. Entries are never reordered or rewritten; the only
//! way to empty a log is to replace it with a fresh one on reset.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a history entry should be presented.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
    Warning,
    Info,
    Report,
}

impl Severity {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
            Self::Report => "report",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Record of a single processed command.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Position in the history, starting at 1
    pub sequence: u64,
    /// The normalized command text that was processed
    pub command: String,
    /// Human-readable description of the outcome
    pub message: String,
    pub severity: Severity,
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} [{}] {}: {}",
            self.sequence, self.severity, self.command, self.message
        )
    }
}

/// Ordered history of processed commands.
///
/// Sequence numbers are assigned on [`History::record`] and are strictly
/// increasing from 1.
///
/// # Example
///
/// ```rust
/// use toy_robot::core::{History, Severity};
///
/// let mut history = History::new();
/// history.record("MOVE", "Command ignored: robot not placed yet", Severity::Warning);
/// history.record("REPORT", "Command ignored: robot not placed yet", Severity::Warning);
///
/// let sequences: Vec<u64> = history.iter().map(|e| e.sequence).collect();
/// assert_eq!(sequences, vec![1, 2]);
/// ```
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry and return it.
    pub fn record(
        &mut self,
        command: impl Into<String>,
        message: impl Into<String>,
        severity: Severity,
    ) -> &HistoryEntry {
        let sequence = self.entries.len() as u64 + 1;
        self.entries.push(HistoryEntry {
            sequence,
            command: command.into(),
            message: message.into(),
            severity,
        });
        &self.entries[self.entries.len() - 1]
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries recorded with `severity`.
    pub fn count(&self, severity: Severity) -> usize {
        self.entries
            .iter()
            .filter(|e| e.severity == severity)
            .count()
    }
}

/// REPORT values in emission order.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Output {
    reports: Vec<String>,
}

impl Output {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, report: impl Into<String>) {
        self.reports.push(report.into());
    }

    pub fn reports(&self) -> &[String] {
        &self.reports
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.reports.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}
