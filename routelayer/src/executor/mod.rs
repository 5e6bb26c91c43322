//! Asynchronous dispatch of engine queries.
//!
//! Each validated request becomes a [`Job`] that runs its blocking engine
//! query on a [`WorkerPool`] and reports back to the caller through a
//! single-shot [`CompletionHandle`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Submitting context                          │
//! │                                                              │
//! │  Dispatcher::submit ──────────┐        CompletionLoop        │
//! │   (Validated → Submitted)     │     (Completed → Released,   │
//! │                               │      callback invoked here)  │
//! └───────────────────────────────┼──────────────▲───────────────┘
//!                                 ▼              │ mpsc channel
//! ┌───────────────────────────────────────────────┴─────────────┐
//! │                     WorkerPool                               │
//! │        engine query (Submitted → Executing → Completed)      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use routelayer::executor::{CompletionHandle, Dispatcher, TokioWorkerPool};
//!
//! let (dispatcher, mut completions) = Dispatcher::new(Arc::new(TokioWorkerPool::try_current()?));
//! dispatcher.submit(request, &engine, CompletionHandle::new(|outcome| println!("{:?}", outcome)));
//! completions.complete_next().await;
//! ```

mod completion;
mod config;
mod dispatch;
mod job;
mod telemetry;
mod traits;

pub use completion::{Callback, CompletionHandle, ABANDONED_MESSAGE};
pub use config::{DispatcherConfig, DEFAULT_WORKER_THREADS, WORKER_THREAD_NAME};
pub use dispatch::{CompletionLoop, Dispatcher};
pub use job::{Job, JobId, JobOutcome, JobState, Release};
pub use telemetry::{TelemetryEvent, TelemetrySink, TracingTelemetrySink};
pub use traits::{ExecutorError, TokioWorkerPool, WorkItem, WorkerPool};

#[cfg(test)]
pub(crate) use traits::testing;
