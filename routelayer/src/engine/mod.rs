//! Engine handle and the query engine seam.
//!
//! The routing/geocoding/table algorithms live behind the [`Engine`] trait
//! and are treated as an opaque, blocking, read-only collaborator. This
//! module owns the [`EngineHandle`] that shares one engine across every
//! in-flight job and counts how many jobs currently hold it.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────┐   create()   ┌──────────────────────────────────┐
//! │ EngineFactory │ ───────────► │ EngineHandle                     │
//! └───────────────┘              │  engine: Arc<dyn Engine>         │
//!        ▲                       │  in_flight: AtomicUsize          │
//!        │ DatasetSource         └───────────────┬──────────────────┘
//!        │ (path | shared memory)                │ acquire()
//!                                                ▼
//!                                 InFlightGuard (one per job, RAII)
//! ```

mod echo;
mod error;
mod handle;

pub use echo::{EchoEngine, EchoEngineFactory};
pub use error::{ConstructionError, EngineError};
pub use handle::{EngineHandle, InFlightGuard};

use crate::params::RequestDescriptor;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// A blocking geospatial query processor.
///
/// Implementations must be safe to query concurrently from many worker
/// threads; the dataset is read-only once the engine is constructed.
pub trait Engine: Send + Sync + 'static {
    /// Runs one request and returns the raw response body.
    ///
    /// Errors carry a message that is delivered verbatim to the caller.
    fn query(&self, request: &RequestDescriptor) -> Result<Vec<u8>, EngineError>;
}

/// Where an engine loads its dataset from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    /// Files sharing a common base path (e.g. `/data/berlin.osrm`).
    Path(PathBuf),
    /// A dataset already loaded into shared memory by another process.
    SharedMemory,
}

impl fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::SharedMemory => write!(f, "shared memory"),
        }
    }
}

/// Constructs engines from a dataset source.
///
/// Dataset loading is opaque to the dispatch layer; a factory either returns
/// a fully usable engine or a [`ConstructionError`].
pub trait EngineFactory: Send + Sync {
    fn create(&self, source: &DatasetSource) -> Result<Arc<dyn Engine>, ConstructionError>;
}
