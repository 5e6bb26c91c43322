//! Single-shot completion handle.

use super::job::JobOutcome;
use crate::engine::EngineError;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use tracing::warn;

/// Message delivered when a handle is dropped without being completed.
pub const ABANDONED_MESSAGE: &str = "job was released before completion";

/// Boxed caller callback receiving a job's outcome.
pub type Callback = Box<dyn FnOnce(JobOutcome) + Send + 'static>;

/// Reports one job's outcome to its caller exactly once.
///
/// [`complete`](Self::complete) consumes the handle, so it cannot be
/// invoked twice. If a handle is dropped without being completed, the
/// callback still runs once with an error carrying [`ABANDONED_MESSAGE`],
/// so a caller is never left without an answer.
pub struct CompletionHandle {
    callback: Option<Callback>,
}

impl CompletionHandle {
    pub fn new(callback: impl FnOnce(JobOutcome) + Send + 'static) -> Self {
        Self::from_boxed(Box::new(callback))
    }

    pub fn from_boxed(callback: Callback) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    /// Invokes the callback with the job's outcome.
    pub fn complete(mut self, outcome: JobOutcome) {
        if let Some(callback) = self.callback.take() {
            callback(outcome);
        }
    }
}

impl Drop for CompletionHandle {
    fn drop(&mut self) {
        let Some(callback) = self.callback.take() else {
            return;
        };

        warn!("Completion handle dropped before completion, reporting failure");
        let outcome = Err(EngineError::new(ABANDONED_MESSAGE));
        if panic::catch_unwind(AssertUnwindSafe(|| callback(outcome))).is_err() {
            warn!("Completion callback panicked while reporting an abandoned job");
        }
    }
}

impl fmt::Debug for CompletionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionHandle")
            .field("pending", &self.callback.is_some())
            .finish()
    }
}
