//! Job dispatching and completion delivery.
//!
//! [`Dispatcher::submit`] runs on the submitting context: it creates the
//! job, takes the engine reference and hands the blocking query to the
//! [`WorkerPool`]. Workers send finished jobs back over a channel, and the
//! [`CompletionLoop`] (also on the submitting context) invokes each job's
//! completion handle and releases it.
//!
//! ```text
//! submit ──► WorkerPool ──► engine query ──► channel ──► CompletionLoop ──► callback
//! ```

use super::completion::CompletionHandle;
use super::job::{Job, JobId};
use super::telemetry::{TelemetryEvent, TelemetrySink, TracingTelemetrySink};
use super::traits::WorkerPool;
use crate::engine::EngineHandle;
use crate::params::RequestDescriptor;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Submitting side of the executor.
///
/// Cheap to clone; all clones feed the same [`CompletionLoop`].
#[derive(Clone)]
pub struct Dispatcher {
    pool: Arc<dyn WorkerPool>,
    telemetry: Arc<dyn TelemetrySink>,
    completions: mpsc::UnboundedSender<Job>,
}

impl Dispatcher {
    /// Creates a dispatcher that reports telemetry through `tracing`.
    pub fn new(pool: Arc<dyn WorkerPool>) -> (Self, CompletionLoop) {
        Self::with_telemetry(pool, Arc::new(TracingTelemetrySink))
    }

    pub fn with_telemetry(
        pool: Arc<dyn WorkerPool>,
        telemetry: Arc<dyn TelemetrySink>,
    ) -> (Self, CompletionLoop) {
        let (completions, receiver) = mpsc::unbounded_channel();
        let dispatcher = Self {
            pool,
            telemetry: Arc::clone(&telemetry),
            completions,
        };
        let completion_loop = CompletionLoop {
            receiver,
            telemetry,
        };
        (dispatcher, completion_loop)
    }

    /// Submits one validated request for execution.
    ///
    /// Returns as soon as the work is handed to the pool. The completion
    /// handle is invoked exactly once, later, by the [`CompletionLoop`].
    pub fn submit(
        &self,
        request: RequestDescriptor,
        engine: &Arc<EngineHandle>,
        completion: CompletionHandle,
    ) -> JobId {
        let mut job = Job::new(request, engine, completion);
        job.mark_submitted();

        let job_id = job.id().clone();
        self.telemetry.emit(TelemetryEvent::JobSubmitted {
            job_id: job_id.clone(),
            service: job.request().kind(),
            in_flight: engine.in_flight(),
        });

        let telemetry = Arc::clone(&self.telemetry);
        let completions = self.completions.clone();
        self.pool
            .execute(Box::new(move || run_on_worker(job, completions, telemetry)));

        job_id
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("loop_closed", &self.completions.is_closed())
            .finish_non_exhaustive()
    }
}

fn run_on_worker(
    mut job: Job,
    completions: mpsc::UnboundedSender<Job>,
    telemetry: Arc<dyn TelemetrySink>,
) {
    let job_id = job.id().clone();
    telemetry.emit(TelemetryEvent::JobStarted {
        job_id: job_id.clone(),
    });

    let started = Instant::now();
    job.execute();

    telemetry.emit(TelemetryEvent::JobCompleted {
        job_id,
        succeeded: job.succeeded(),
        duration: started.elapsed(),
    });

    if let Err(mpsc::error::SendError(job)) = completions.send(job) {
        telemetry.emit(TelemetryEvent::ReleasedOnWorker {
            job_id: job.id().clone(),
        });
        release(job, telemetry.as_ref());
    }
}

fn release(job: Job, telemetry: &dyn TelemetrySink) -> JobId {
    let release = job.release();

    if let Some(message) = release.callback_panic {
        telemetry.emit(TelemetryEvent::CallbackPanicked {
            job_id: release.job_id.clone(),
            message,
        });
    }

    telemetry.emit(TelemetryEvent::JobReleased {
        job_id: release.job_id.clone(),
        succeeded: release.succeeded,
        total: release.total,
    });

    release.job_id
}

/// Delivers finished jobs to their callers.
///
/// Drive it with [`run`](Self::run) inside an async host,
/// [`complete_next`](Self::complete_next) for one job at a time, or
/// [`process_pending`](Self::process_pending) as a non-blocking tick from
/// an external event loop. Dropping the loop releases anything already
/// finished; jobs that finish afterwards are released on their worker.
pub struct CompletionLoop {
    receiver: mpsc::UnboundedReceiver<Job>,
    telemetry: Arc<dyn TelemetrySink>,
}

impl CompletionLoop {
    /// Releases jobs as they arrive until `shutdown` is cancelled or every
    /// dispatcher (and every in-flight job) is gone.
    pub async fn run(mut self, shutdown: CancellationToken) {
        info!("Completion loop started");

        loop {
            tokio::select! {
                biased;

                _ = shutdown.cancelled() => break,

                job = self.receiver.recv() => match job {
                    Some(job) => {
                        release(job, self.telemetry.as_ref());
                    }
                    None => break,
                },
            }
        }

        let drained = self.close_and_drain();
        info!(drained, "Completion loop stopped");
    }

    /// Waits for the next finished job and releases it.
    ///
    /// Returns `None` once no dispatcher or in-flight job remains.
    pub async fn complete_next(&mut self) -> Option<JobId> {
        let job = self.receiver.recv().await?;
        Some(release(job, self.telemetry.as_ref()))
    }

    /// Releases every job that has already finished, without waiting.
    pub fn process_pending(&mut self) -> usize {
        let mut released = 0;
        while let Ok(job) = self.receiver.try_recv() {
            release(job, self.telemetry.as_ref());
            released += 1;
        }
        released
    }

    fn close_and_drain(&mut self) -> usize {
        self.receiver.close();
        self.process_pending()
    }
}

impl Drop for CompletionLoop {
    fn drop(&mut self) {
        let drained = self.close_and_drain();
        if drained > 0 {
            debug!(drained, "Released finished jobs while dropping completion loop");
        }
    }
}

impl fmt::Debug for CompletionLoop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionLoop").finish_non_exhaustive()
    }
}
