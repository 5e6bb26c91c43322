//! Telemetry for dispatch observability.
//!
//! The dispatcher emits structured events through a sink abstraction and
//! does not know how they are consumed. Logging, metrics and tests each
//! plug in their own [`TelemetrySink`].
//!
//! # Example
//!
//! ```ignore
//! use routelayer::executor::{TelemetryEvent, TelemetrySink};
//!
//! struct LoggingSink;
//!
//! impl TelemetrySink for LoggingSink {
//!     fn emit(&self, event: TelemetryEvent) {
//!         tracing::info!(?event, "Dispatch event");
//!     }
//! }
//! ```

use super::job::JobId;
use crate::params::ServiceKind;
use std::time::Duration;

// =============================================================================
// Telemetry Events
// =============================================================================

/// Events emitted over a job's lifecycle.
#[derive(Clone, Debug, PartialEq)]
pub enum TelemetryEvent {
    /// A job was handed to the worker pool.
    JobSubmitted {
        job_id: JobId,
        service: ServiceKind,
        /// Engine in-flight count including this job.
        in_flight: usize,
    },

    /// A worker started the engine query.
    JobStarted { job_id: JobId },

    /// The engine query finished and the result slot was written.
    JobCompleted {
        job_id: JobId,
        succeeded: bool,
        duration: Duration,
    },

    /// The completion callback ran and the job was discarded.
    JobReleased {
        job_id: JobId,
        succeeded: bool,
        /// Time from submission to release.
        total: Duration,
    },

    /// The completion loop was gone, so the job was released on its worker.
    ReleasedOnWorker { job_id: JobId },

    /// The caller's completion callback panicked.
    CallbackPanicked { job_id: JobId, message: String },
}

impl TelemetryEvent {
    /// Returns the job ID associated with this event.
    pub fn job_id(&self) -> &JobId {
        match self {
            Self::JobSubmitted { job_id, .. }
            | Self::JobStarted { job_id }
            | Self::JobCompleted { job_id, .. }
            | Self::JobReleased { job_id, .. }
            | Self::ReleasedOnWorker { job_id }
            | Self::CallbackPanicked { job_id, .. } => job_id,
        }
    }

    /// Returns a short name for this event type.
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::JobSubmitted { .. } => "job_submitted",
            Self::JobStarted { .. } => "job_started",
            Self::JobCompleted { .. } => "job_completed",
            Self::JobReleased { .. } => "job_released",
            Self::ReleasedOnWorker { .. } => "released_on_worker",
            Self::CallbackPanicked { .. } => "callback_panicked",
        }
    }
}

// =============================================================================
// Telemetry Sink Trait
// =============================================================================

/// Sink for telemetry events.
///
/// Events are emitted from both the submitting context and worker threads,
/// so implementations must be thread-safe. `emit` should be fast and must
/// not block.
pub trait TelemetrySink: Send + Sync {
    fn emit(&self, event: TelemetryEvent);
}

// =============================================================================
// Sink Implementations
// =============================================================================

/// Sink that logs events using the `tracing` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingTelemetrySink;

impl TelemetrySink for TracingTelemetrySink {
    fn emit(&self, event: TelemetryEvent) {
        match &event {
            TelemetryEvent::JobSubmitted {
                job_id,
                service,
                in_flight,
            } => {
                tracing::debug!(
                    job_id = %job_id,
                    service = %service,
                    in_flight = in_flight,
                    "Job submitted"
                );
            }
            TelemetryEvent::JobStarted { job_id } => {
                tracing::trace!(job_id = %job_id, "Job started");
            }
            TelemetryEvent::JobCompleted {
                job_id,
                succeeded,
                duration,
            } => {
                tracing::debug!(
                    job_id = %job_id,
                    succeeded = succeeded,
                    duration_ms = duration.as_millis() as u64,
                    "Job completed"
                );
            }
            TelemetryEvent::JobReleased {
                job_id,
                succeeded,
                total,
            } => {
                tracing::trace!(
                    job_id = %job_id,
                    succeeded = succeeded,
                    total_ms = total.as_millis() as u64,
                    "Job released"
                );
            }
            TelemetryEvent::ReleasedOnWorker { job_id } => {
                tracing::warn!(
                    job_id = %job_id,
                    "Completion loop closed, released job on worker thread"
                );
            }
            TelemetryEvent::CallbackPanicked { job_id, message } => {
                tracing::warn!(
                    job_id = %job_id,
                    panic = %message,
                    "Completion callback panicked"
                );
            }
        }
    }
}

/// Sink that keeps every event, for assertions in tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingTelemetrySink {
    events: std::sync::Mutex<Vec<TelemetryEvent>>,
}

#[cfg(test)]
impl RecordingTelemetrySink {
    pub(crate) fn events(&self) -> Vec<TelemetryEvent> {
        self.events.lock().unwrap().clone()
    }

    pub(crate) fn event_types_for(&self, job_id: &JobId) -> Vec<&'static str> {
        self.events()
            .iter()
            .filter(|event| event.job_id() == job_id)
            .map(TelemetryEvent::event_type)
            .collect()
    }
}

#[cfg(test)]
impl TelemetrySink for RecordingTelemetrySink {
    fn emit(&self, event: TelemetryEvent) {
        self.events.lock().unwrap().push(event);
    }
}
