//! Worker pool abstraction.
//!
//! The dispatcher hands each job's blocking engine query to a
//! [`WorkerPool`]. Production code runs work on tokio's blocking thread
//! pool through [`TokioWorkerPool`]; tests substitute inline pools so job
//! ordering is deterministic.

use std::fmt;
use thiserror::Error;
use tokio::runtime::Handle;

/// A unit of blocking work handed to a pool.
pub type WorkItem = Box<dyn FnOnce() + Send + 'static>;

/// Runs blocking work items off the submitting context.
///
/// A pool may drop a work item without running it (for example after
/// runtime shutdown). Dropping a job's work item still reports a failure
/// to its caller through the job's completion handle.
pub trait WorkerPool: Send + Sync + 'static {
    fn execute(&self, work: WorkItem);
}

/// Errors from worker pool setup.
#[derive(Debug, Clone, Error)]
pub enum ExecutorError {
    /// No tokio runtime is active on the calling thread.
    #[error("no tokio runtime available: {0}")]
    NoRuntime(String),
}

/// Worker pool backed by tokio's blocking thread pool.
///
/// The pool size is the runtime's `max_blocking_threads`.
#[derive(Clone)]
pub struct TokioWorkerPool {
    handle: Handle,
}

impl TokioWorkerPool {
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Uses the runtime the caller is currently running inside.
    pub fn try_current() -> Result<Self, ExecutorError> {
        Handle::try_current()
            .map(Self::new)
            .map_err(|e| ExecutorError::NoRuntime(e.to_string()))
    }
}

impl WorkerPool for TokioWorkerPool {
    fn execute(&self, work: WorkItem) {
        // The join handle is detached; results travel through the
        // completion channel instead.
        drop(self.handle.spawn_blocking(work));
    }
}

impl fmt::Debug for TokioWorkerPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokioWorkerPool").finish_non_exhaustive()
    }
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_try_current_outside_runtime_fails() {
        let result = TokioWorkerPool::try_current();
        assert!(matches!(result, Err(ExecutorError::NoRuntime(_))));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_tokio_pool_runs_work() {
        let pool = TokioWorkerPool::try_current().unwrap();
        let (tx, rx) = tokio::sync::oneshot::channel();

        pool.execute(Box::new(move || {
            let _ = tx.send(std::thread::current().name().map(str::to_string));
        }));

        assert!(rx.await.is_ok());
    }

    #[test]
    fn test_inline_pool_runs_immediately() {
        let pool = InlineWorkerPool::default();
        let ran = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&ran);

        pool.execute(Box::new(move || flag.store(true, Ordering::SeqCst)));

        assert!(ran.load(Ordering::SeqCst));
        assert_eq!(pool.executed(), 1);
    }

    #[test]
    fn test_deferred_pool_holds_work() {
        let pool = DeferredWorkerPool::default();
        let ran = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&ran);

        pool.execute(Box::new(move || flag.store(true, Ordering::SeqCst)));
        assert_eq!(pool.pending(), 1);
        assert!(!ran.load(Ordering::SeqCst));

        assert_eq!(pool.run_all(), 1);
        assert!(ran.load(Ordering::SeqCst));
        assert_eq!(pool.pending(), 0);
    }
}
