//! Interpreter session that owns robot state and both logs.

use crate::command::{normalize, parse};
use crate::core::{History, HistoryEntry, Output, RobotState};
use crate::machine::{apply, Outcome};
use crate::snapshot::Snapshot;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;
use uuid::Uuid;

/// Result of executing a single batch step
#[derive(Clone, Debug, PartialEq)]
pub enum StepResult {
    /// A line was processed and recorded
    Applied(HistoryEntry),

    /// No lines left in the run
    Finished,

    /// The run was superseded by a reset or a newer batch; nothing was applied
    Cancelled,
}

/// A batch in progress.
///
/// Created by [`Session::begin_batch`], advanced one line at a time with
/// [`Session::step`] and closed with [`Session::finish_batch`]. A run is tied to the epoch that was current when it
/// began and stops applying lines as soon as the session moves past it.
#[derive(Clone, Debug)]
pub struct BatchRun {
    epoch: u64,
    pending: VecDeque<String>,
    applied: usize,
    started_at: DateTime<Utc>,
}

impl BatchRun {
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Lines not yet processed.
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    pub fn applied(&self) -> usize {
        self.applied
    }

    pub fn is_done(&self) -> bool {
        self.pending.is_empty()
    }

    fn finish(self, cancelled: bool) -> RunSummary {
        RunSummary {
            epoch: self.epoch,
            applied: self.applied,
            skipped: self.pending.len(),
            cancelled,
            started_at: self.started_at,
            finished_at: Utc::now(),
        }
    }
}

/// How a batch ended.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub epoch: u64,
    /// Lines that produced a history entry
    pub applied: usize,
    /// Lines dropped because the run was cancelled
    pub skipped: usize,
    pub cancelled: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl RunSummary {
    /// Wall-clock time between start and finish.
    pub fn duration(&self) -> Option<Duration> {
        self.finished_at
            .signed_duration_since(self.started_at)
            .to_std()
            .ok()
    }
}

/// Exclusive owner of the robot state, the history and the report output.
///
/// All mutation goes through [`Session::run_one`], [`Session::step`] (or
/// [`Session::run_batch`]) and [`Session::reset`]. Each processed line
/// appends exactly one history entry.
///
/// # Example
///
/// ```rust
/// use toy_robot::engine::Session;
///
/// let mut session = Session::new();
/// session.run_batch(["PLACE 0,0,NORTH", "MOVE", "REPORT"]);
///
/// assert_eq!(session.output().reports(), ["0,1,NORTH"]);
/// assert_eq!(session.history().len(), 3);
/// ```
#[derive(Debug)]
pub struct Session {
    id: Uuid,
    robot: RobotState,
    history: History,
    output: Output,
    epoch: u64,
    /// Epoch of the batch still being stepped, if any
    active_run: Option<u64>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Create a session with an unplaced robot and empty logs.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            robot: RobotState::Unplaced,
            history: History::new(),
            output: Output::new(),
            epoch: 0,
            active_run: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn robot(&self) -> &RobotState {
        &self.robot
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn output(&self) -> &Output {
        &self.output
    }

    /// Current epoch. Bumped by every reset and every new batch.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Whether a batch has begun and not yet finished or been cancelled.
    pub fn is_running(&self) -> bool {
        self.active_run.is_some()
    }

    /// Whether `run` may still apply lines.
    pub fn is_current(&self, run: &BatchRun) -> bool {
        run.epoch == self.epoch
    }

    /// Unplace the robot, empty both logs and cancel any batch in flight.
    pub fn reset(&mut self) {
        self.robot = RobotState::Unplaced;
        self.history = History::new();
        self.output = Output::new();
        self.epoch += 1;
        self.active_run = None;
        tracing::debug!(session = %self.id, epoch = self.epoch, "session reset");
    }

    /// Apply a single command against the current state.
    ///
    /// Does not reset anything. Blank input is ignored and returns `None`.
    pub fn run_one(&mut self, raw: &str) -> Option<&HistoryEntry> {
        if raw.trim().is_empty() {
            return None;
        }
        tracing::debug!(session = %self.id, command = raw.trim(), "quick command");
        Some(self.execute(raw))
    }

    /// Reset the session and queue the non-blank `lines` as a new run.
    pub fn begin_batch<I, S>(&mut self, lines: I) -> BatchRun
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.reset();
        let pending: VecDeque<String> = lines
            .into_iter()
            .filter(|line| !line.as_ref().trim().is_empty())
            .map(|line| line.as_ref().to_string())
            .collect();

        self.active_run = Some(self.epoch);
        tracing::info!(
            session = %self.id,
            epoch = self.epoch,
            lines = pending.len(),
            "batch started"
        );

        BatchRun {
            epoch: self.epoch,
            pending,
            applied: 0,
            started_at: Utc::now(),
        }
    }

    /// Process the next line of `run`.
    ///
    /// A run whose epoch is no longer current gets [`StepResult::Cancelled`]
    /// and leaves the session untouched.
    pub fn step(&mut self, run: &mut BatchRun) -> StepResult {
        if !self.is_current(run) {
            tracing::debug!(
                session = %self.id,
                run_epoch = run.epoch,
                epoch = self.epoch,
                "stale batch step dropped"
            );
            return StepResult::Cancelled;
        }

        let Some(line) = run.pending.pop_front() else {
            self.active_run = None;
            return StepResult::Finished;
        };

        let entry = self.execute(&line).clone();
        run.applied += 1;
        StepResult::Applied(entry)
    }

    /// Run a whole batch with no delay between steps.
    pub fn run_batch<I, S>(&mut self, lines: I) -> RunSummary
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut run = self.begin_batch(lines);
        while let StepResult::Applied(_) = self.step(&mut run) {}
        self.finish_batch(run)
    }

    /// Close `run` and summarize it.
    ///
    /// A run counts as cancelled when the session moved past its epoch
    /// before every line was applied. Closing the active run clears
    /// [`Session::is_running`]; closing a stale one leaves the newer run
    /// alone.
    pub fn finish_batch(&mut self, run: BatchRun) -> RunSummary {
        if self.active_run == Some(run.epoch) {
            self.active_run = None;
        }
        let cancelled = !run.is_done();
        run.finish(cancelled)
    }

    /// Point-in-time copy of everything the presentation layer reads.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(
            self.id,
            self.epoch,
            self.is_running(),
            self.robot,
            self.output.clone(),
            self.history.clone(),
        )
    }

    fn execute(&mut self, raw: &str) -> &HistoryEntry {
        let (next, outcome) = match parse(raw) {
            Ok(command) => apply(&self.robot, &command),
            Err(malformed) => (
                self.robot,
                Outcome::RejectedMalformed {
                    reasons: malformed.reasons,
                },
            ),
        };

        self.robot = next;
        if let Some(value) = outcome.report() {
            self.output.push(value);
        }

        let entry = self
            .history
            .record(normalize(raw), outcome.to_string(), outcome.severity());
        tracing::debug!(
            session = %self.id,
            sequence = entry.sequence,
            command = %entry.command,
            severity = %entry.severity,
            rejected = outcome.is_rejection(),
            "command applied"
        );
        entry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Direction, Severity};

    #[test]
    fn new_session_is_unplaced_and_empty() {
        let session = Session::new();
        assert_eq!(session.robot(), &RobotState::Unplaced);
        assert!(session.history().is_empty());
        assert!(session.output().is_empty());
        assert_eq!(session.epoch(), 0);
    }

    #[test]
    fn run_one_appends_one_entry_without_reset() {
        let mut session = Session::new();
        session.run_one("PLACE 0,0,NORTH");
        session.run_one("MOVE");
        let entry = session.run_one("REPORT").cloned().unwrap();

        assert_eq!(entry.sequence, 3);
        assert_eq!(entry.severity, Severity::Report);
        assert_eq!(session.output().reports(), ["0,1,NORTH"]);
        assert_eq!(session.epoch(), 0);
    }

    #[test]
    fn run_one_ignores_blank_input() {
        let mut session = Session::new();
        assert!(session.run_one("   ").is_none());
        assert!(session.history().is_empty());
    }

    #[test]
    fn malformed_place_is_recorded_as_error() {
        let mut session = Session::new();
        let entry = session.run_one("place 1,2").cloned().unwrap();

        assert_eq!(entry.command, "PLACE 1,2");
        assert_eq!(entry.severity, Severity::Error);
        assert_eq!(
            entry.message,
            "Invalid PLACE command format: expected 3 comma-separated arguments, found 2"
        );
        assert_eq!(session.robot(), &RobotState::Unplaced);
    }

    #[test]
    fn malformed_place_keeps_placed_robot() {
        let mut session = Session::new();
        session.run_one("PLACE 2,2,EAST");
        session.run_one("PLACE x,2,EAST");
        assert_eq!(session.robot(), &RobotState::placed(2, 2, Direction::East).unwrap());
    }

    #[test]
    fn reset_clears_everything_and_bumps_epoch() {
        let mut session = Session::new();
        session.run_batch(["PLACE 1,1,SOUTH", "REPORT"]);
        let epoch = session.epoch();

        session.reset();

        assert_eq!(session.robot(), &RobotState::Unplaced);
        assert!(session.history().is_empty());
        assert!(session.output().is_empty());
        assert_eq!(session.epoch(), epoch + 1);
    }

    #[test]
    fn history_sequence_restarts_after_reset() {
        let mut session = Session::new();
        session.run_one("MOVE");
        session.run_one("MOVE");
        session.reset();
        let entry = session.run_one("MOVE").cloned().unwrap();
        assert_eq!(entry.sequence, 1);
    }

    #[test]
    fn begin_batch_resets_and_filters_blank_lines() {
        let mut session = Session::new();
        session.run_one("PLACE 0,0,NORTH");

        let run = session.begin_batch(["MOVE", "", "  ", "REPORT"]);

        assert_eq!(run.remaining(), 2);
        assert_eq!(run.epoch(), session.epoch());
        assert!(session.history().is_empty());
        assert_eq!(session.robot(), &RobotState::Unplaced);
    }

    #[test]
    fn step_applies_lines_in_order_then_finishes() {
        let mut session = Session::new();
        let mut run = session.begin_batch(["PLACE 0,0,NORTH", "LEFT", "REPORT"]);

        let mut sequences = Vec::new();
        while let StepResult::Applied(entry) = session.step(&mut run) {
            sequences.push(entry.sequence);
        }

        assert_eq!(sequences, vec![1, 2, 3]);
        assert_eq!(session.step(&mut run), StepResult::Finished);
        assert_eq!(session.output().reports(), ["0,0,WEST"]);
    }

    #[test]
    fn stale_run_is_cancelled_without_side_effects() {
        let mut session = Session::new();
        let mut run = session.begin_batch(["PLACE 0,0,NORTH", "MOVE", "REPORT"]);
        assert!(matches!(session.step(&mut run), StepResult::Applied(_)));

        session.reset();

        assert_eq!(session.step(&mut run), StepResult::Cancelled);
        assert!(session.history().is_empty());
        assert_eq!(session.robot(), &RobotState::Unplaced);

        let summary = session.finish_batch(run);
        assert_eq!(summary.applied, 1);
        assert_eq!(summary.skipped, 2);
        assert!(summary.cancelled);
    }

    #[test]
    fn running_flag_follows_the_active_run() {
        let mut session = Session::new();
        assert!(!session.is_running());

        let mut run = session.begin_batch(["PLACE 0,0,NORTH", "REPORT"]);
        assert!(session.is_running());
        assert!(session.snapshot().running);

        while let StepResult::Applied(_) = session.step(&mut run) {}
        assert!(!session.is_running());

        let summary = session.finish_batch(run);
        assert!(!summary.cancelled);
        assert!(!session.snapshot().running);
    }

    #[test]
    fn reset_clears_running_flag() {
        let mut session = Session::new();
        let run = session.begin_batch(["MOVE", "MOVE"]);
        session.reset();

        assert!(!session.is_running());
        assert!(session.finish_batch(run).cancelled);
    }

    #[test]
    fn closing_stale_run_keeps_newer_run_active() {
        let mut session = Session::new();
        let old = session.begin_batch(["MOVE"]);
        let _new = session.begin_batch(["LEFT"]);

        let summary = session.finish_batch(old);

        assert!(summary.cancelled);
        assert!(session.is_running());
    }

    #[test]
    fn newer_batch_supersedes_older_run() {
        let mut session = Session::new();
        let mut old = session.begin_batch(["PLACE 4,4,SOUTH", "REPORT"]);
        let mut new = session.begin_batch(["PLACE 0,0,EAST", "REPORT"]);

        assert_eq!(session.step(&mut old), StepResult::Cancelled);
        while let StepResult::Applied(_) = session.step(&mut new) {}

        assert_eq!(session.output().reports(), ["0,0,EAST"]);
    }

    #[test]
    fn run_batch_summary_counts_applied_lines() {
        let mut session = Session::new();
        let summary = session.run_batch(["MOVE", "", "REPORT", "JUMP"]);

        assert_eq!(summary.applied, 3);
        assert_eq!(summary.skipped, 0);
        assert!(!summary.cancelled);
        assert!(summary.duration().is_some());
        assert_eq!(session.history().count(Severity::Warning), 3);
    }

    #[test]
    fn quick_command_continues_from_batch_state() {
        let mut session = Session::new();
        session.run_batch(["PLACE 1,2,EAST", "MOVE"]);
        session.run_one("REPORT");

        assert_eq!(session.output().reports(), ["2,2,EAST"]);
        assert_eq!(session.history().len(), 3);
    }
}
