//! Job record and lifecycle state.
//!
//! A [`Job`] binds one validated request to the shared engine, a result
//! slot and a completion handle. It moves through
//! `Validated → Submitted → Executing → Completed → Released` without
//! skipping a state, and is consumed by [`Job::release`].

use super::completion::CompletionHandle;
use crate::engine::{EngineError, EngineHandle, InFlightGuard};
use crate::panic::panic_message;
use crate::params::RequestDescriptor;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Global counter for generating unique job IDs.
static JOB_ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Result of one engine query: the textual payload or the engine's error.
pub type JobOutcome = Result<String, EngineError>;

/// Unique identifier for a job.
#[derive(Clone, Hash, Eq, PartialEq)]
pub struct JobId(String);

impl JobId {
    /// Creates a new job ID with the given string value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Creates a unique auto-generated job ID of the form `job-{counter}`.
    pub fn auto() -> Self {
        let counter = JOB_ID_COUNTER.fetch_add(1, Ordering::Relaxed);
        Self(format!("job-{}", counter))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JobId({})", self.0)
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for JobId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Lifecycle state of a job.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JobState {
    /// Request validated and job record created.
    Validated,
    /// Engine reference taken and work handed to the pool.
    Submitted,
    /// A worker is running the engine query.
    Executing,
    /// Result slot written.
    Completed,
    /// Completion handle invoked; the job is discarded.
    Released,
}

impl JobState {
    /// Returns the only state this one may move to.
    pub fn successor(self) -> Option<Self> {
        match self {
            Self::Validated => Some(Self::Submitted),
            Self::Submitted => Some(Self::Executing),
            Self::Executing => Some(Self::Completed),
            Self::Completed => Some(Self::Released),
            Self::Released => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Released)
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validated => write!(f, "Validated"),
            Self::Submitted => write!(f, "Submitted"),
            Self::Executing => write!(f, "Executing"),
            Self::Completed => write!(f, "Completed"),
            Self::Released => write!(f, "Released"),
        }
    }
}

/// One in-flight request.
///
/// The job owns its completion handle exclusively and holds an
/// [`InFlightGuard`] on the engine until it is released.
pub struct Job {
    id: JobId,
    request: RequestDescriptor,
    engine: InFlightGuard,
    outcome: Option<JobOutcome>,
    completion: CompletionHandle,
    state: JobState,
    created_at: Instant,
}

impl Job {
    /// Creates a job in the `Validated` state.
    ///
    /// The engine reference is taken here so it is counted from the moment
    /// the job exists.
    pub(crate) fn new(
        request: RequestDescriptor,
        engine: &Arc<EngineHandle>,
        completion: CompletionHandle,
    ) -> Self {
        Self {
            id: JobId::auto(),
            request,
            engine: engine.acquire(),
            outcome: None,
            completion,
            state: JobState::Validated,
            created_at: Instant::now(),
        }
    }

    pub fn id(&self) -> &JobId {
        &self.id
    }

    pub fn request(&self) -> &RequestDescriptor {
        &self.request
    }

    pub fn state(&self) -> JobState {
        self.state
    }

    /// Returns true once the result slot has been written.
    pub fn is_completed(&self) -> bool {
        self.outcome.is_some()
    }

    /// Returns true if the result slot holds a payload.
    pub fn succeeded(&self) -> bool {
        matches!(self.outcome, Some(Ok(_)))
    }

    pub(crate) fn mark_submitted(&mut self) {
        self.advance(JobState::Submitted);
    }

    /// Runs the engine query and writes the result slot.
    ///
    /// Blocking; called on a worker thread.
    pub(crate) fn execute(&mut self) {
        self.advance(JobState::Executing);
        let outcome = self
            .engine
            .handle()
            .query(&self.request)
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned());
        self.complete(outcome);
    }

    fn complete(&mut self, outcome: JobOutcome) {
        debug_assert!(self.outcome.is_none(), "result slot written twice");
        self.outcome = Some(outcome);
        self.advance(JobState::Completed);
    }

    /// Invokes the completion handle and discards the job.
    ///
    /// A panic raised by the caller's callback is caught and reported in
    /// the returned [`Release`]; the engine reference is dropped either way.
    pub(crate) fn release(mut self) -> Release {
        self.advance(JobState::Released);

        let Job {
            id,
            engine,
            outcome,
            completion,
            created_at,
            ..
        } = self;

        let outcome = outcome.unwrap_or_else(|| {
            Err(EngineError::new(
                "job released before the engine produced a result",
            ))
        });
        let succeeded = outcome.is_ok();

        let callback_panic = panic::catch_unwind(AssertUnwindSafe(move || {
            completion.complete(outcome);
        }))
        .err()
        .map(|payload| panic_message(payload.as_ref()));

        drop(engine);

        Release {
            job_id: id,
            succeeded,
            callback_panic,
            total: created_at.elapsed(),
        }
    }

    fn advance(&mut self, next: JobState) {
        debug_assert_eq!(
            self.state.successor(),
            Some(next),
            "invalid job transition {} -> {}",
            self.state,
            next
        );
        self.state = next;
    }
}

impl fmt::Debug for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Job")
            .field("id", &self.id)
            .field("service", &self.request.kind())
            .field("state", &self.state)
            .finish()
    }
}

/// Summary of a released job.
#[derive(Debug, Clone)]
pub struct Release {
    pub job_id: JobId,
    pub succeeded: bool,
    /// Panic message if the caller's callback panicked.
    pub callback_panic: Option<String>,
    /// Time from job creation to release.
    pub total: Duration,
}
