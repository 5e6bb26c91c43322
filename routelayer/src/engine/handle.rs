//! Shared engine handle with an in-flight job counter.

use super::{ConstructionError, DatasetSource, Engine, EngineError, EngineFactory};
use crate::panic::panic_message;
use crate::params::RequestDescriptor;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::info;

/// Owns one engine instance and tracks the jobs currently using it.
///
/// The handle is shared by `Arc` across all jobs. Each job holds an
/// [`InFlightGuard`], which keeps the handle alive and is counted in
/// [`in_flight`](Self::in_flight) until the job is released.
pub struct EngineHandle {
    engine: Arc<dyn Engine>,
    source: DatasetSource,
    in_flight: AtomicUsize,
}

impl EngineHandle {
    /// Constructs the engine for `source` and wraps it in a handle.
    ///
    /// Construction either yields a usable handle or fails as a whole.
    pub fn construct(
        source: DatasetSource,
        factory: &dyn EngineFactory,
    ) -> Result<Arc<Self>, ConstructionError> {
        let engine = factory.create(&source)?;
        info!(source = %source, "Engine constructed");
        Ok(Arc::new(Self::from_engine(engine, source)))
    }

    /// Wraps an already-constructed engine.
    pub fn from_engine(engine: Arc<dyn Engine>, source: DatasetSource) -> Self {
        Self {
            engine,
            source,
            in_flight: AtomicUsize::new(0),
        }
    }

    /// Runs a blocking query against the engine.
    ///
    /// A panic inside the engine is reported as an [`EngineError`] so the
    /// owning job still completes.
    pub fn query(&self, request: &RequestDescriptor) -> Result<Vec<u8>, EngineError> {
        panic::catch_unwind(AssertUnwindSafe(|| self.engine.query(request)))
            .unwrap_or_else(|payload| {
                Err(EngineError::new(format!(
                    "engine panicked: {}",
                    panic_message(payload.as_ref())
                )))
            })
    }

    /// Registers a new in-flight job.
    pub fn acquire(self: &Arc<Self>) -> InFlightGuard {
        self.in_flight.fetch_add(1, Ordering::AcqRel);
        InFlightGuard {
            handle: Arc::clone(self),
        }
    }

    /// Number of jobs currently holding this handle.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn source(&self) -> &DatasetSource {
        &self.source
    }
}

impl fmt::Debug for EngineHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineHandle")
            .field("source", &self.source)
            .field("in_flight", &self.in_flight())
            .finish()
    }
}

/// Keeps an [`EngineHandle`] alive for one job.
///
/// Dropping the guard decrements the handle's in-flight count.
pub struct InFlightGuard {
    handle: Arc<EngineHandle>,
}

impl InFlightGuard {
    pub fn handle(&self) -> &Arc<EngineHandle> {
        &self.handle
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.handle.in_flight.fetch_sub(1, Ordering::AcqRel);
    }
}

impl fmt::Debug for InFlightGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InFlightGuard")
            .field("source", &self.handle.source)
            .finish()
    }
}
