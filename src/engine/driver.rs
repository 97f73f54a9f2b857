//! Paced batch execution on tokio.

use super::session::{RunSummary, Session, StepResult};
use crate::config::Settings;
use crate::core::HistoryEntry;
use crate::snapshot::Snapshot;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// Async shell around a shared [`Session`].
///
/// A batch waits `step_delay` before each line. After every wait it
/// re-checks its epoch, so a [`Driver::reset`] or a newer
/// [`Driver::run_batch`] issued meanwhile stops it before it touches the
/// session again. The lock is never held across a wait.
#[derive(Clone, Debug)]
pub struct Driver {
    session: Arc<Mutex<Session>>,
    step_delay: Duration,
}

impl Driver {
    pub fn new(step_delay: Duration) -> Self {
        Self::with_session(Session::new(), step_delay)
    }

    pub fn with_session(session: Session, step_delay: Duration) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
            step_delay,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.step_delay())
    }

    pub fn step_delay(&self) -> Duration {
        self.step_delay
    }

    /// Reset the session and run `lines` in order, pausing before each one.
    ///
    /// Returns early with `cancelled: true` if the run is superseded.
    pub async fn run_batch<I, S>(&self, lines: I) -> RunSummary
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut run = self.session.lock().await.begin_batch(lines);

        while !run.is_done() {
            self.pause().await;

            let result = self.session.lock().await.step(&mut run);
            if result == StepResult::Cancelled {
                break;
            }
        }
        let summary = self.session.lock().await.finish_batch(run);

        if summary.cancelled {
            tracing::info!(
                epoch = summary.epoch,
                applied = summary.applied,
                skipped = summary.skipped,
                "batch cancelled"
            );
        } else {
            tracing::info!(
                epoch = summary.epoch,
                applied = summary.applied,
                elapsed_ms = summary.duration().map(|d| d.as_millis() as u64),
                "batch finished"
            );
        }
        summary
    }

    /// Whether a batch is still being paced through the session.
    pub async fn is_running(&self) -> bool {
        self.session.lock().await.is_running()
    }

    /// Apply one command immediately against the current state.
    pub async fn run_one(&self, raw: &str) -> Option<HistoryEntry> {
        self.session.lock().await.run_one(raw).cloned()
    }

    /// Reset the session, cancelling any batch in flight.
    pub async fn reset(&self) {
        self.session.lock().await.reset();
    }

    pub async fn snapshot(&self) -> Snapshot {
        self.session.lock().await.snapshot()
    }

    /// Read the session under the lock.
    pub async fn inspect<R>(&self, f: impl FnOnce(&Session) -> R) -> R {
        let session = self.session.lock().await;
        f(&session)
    }

    async fn pause(&self) {
        if self.step_delay.is_zero() {
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep(self.step_delay).await;
        }
    }
}
