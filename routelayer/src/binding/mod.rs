//! Host-facing routing API.
//!
//! [`Osrm`] is the object a host runtime talks to. Every query operation
//! takes the host's untyped argument list: a request value followed by a
//! callback. Argument problems are returned immediately and schedule no
//! work; everything else is answered through the callback, exactly once,
//! on the context that drives the [`CompletionLoop`](crate::executor::CompletionLoop).
//!
//! # Example
//!
//! ```ignore
//! use routelayer::binding::{HostValue, Osrm};
//! use routelayer::engine::EchoEngineFactory;
//! use serde_json::json;
//!
//! let osrm = Osrm::new(&[HostValue::from(json!("/data/berlin.osrm"))], &EchoEngineFactory::new(), dispatcher)?;
//! osrm.locate(vec![
//!     HostValue::from(json!([52.4224, 13.333086])),
//!     HostValue::function(|result| println!("{:?}", result)),
//! ])?;
//! ```

mod error;

pub use error::BindingError;

use crate::engine::{DatasetSource, EngineFactory, EngineHandle};
use crate::executor::{Callback, CompletionHandle, Dispatcher, JobId, JobOutcome};
use crate::params::{self, RequestDescriptor, ServiceKind, ValidationError};
use serde_json::Value;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// One argument as passed by a dynamically typed host.
pub enum HostValue {
    /// Plain data (objects, arrays, numbers, strings, null).
    Value(Value),
    /// A callable, consumed when the job completes.
    Function(Callback),
}

impl HostValue {
    pub fn function(callback: impl FnOnce(JobOutcome) + Send + 'static) -> Self {
        Self::Function(Box::new(callback))
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            Self::Function(_) => None,
        }
    }
}

impl From<Value> for HostValue {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl fmt::Debug for HostValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Function(_) => f.write_str("Function"),
        }
    }
}

/// A constructed engine plus the dispatcher its queries run on.
#[derive(Debug)]
pub struct Osrm {
    engine: Arc<EngineHandle>,
    dispatcher: Dispatcher,
}

impl Osrm {
    /// Constructs the engine from host constructor arguments.
    ///
    /// No arguments selects the shared-memory dataset; a single string is
    /// the dataset base path. Anything else is rejected.
    pub fn new(
        args: &[HostValue],
        factory: &dyn EngineFactory,
        dispatcher: Dispatcher,
    ) -> Result<Self, BindingError> {
        Self::with_source(dataset_source(args)?, factory, dispatcher)
    }

    pub fn with_source(
        source: DatasetSource,
        factory: &dyn EngineFactory,
        dispatcher: Dispatcher,
    ) -> Result<Self, BindingError> {
        let engine = EngineHandle::construct(source, factory)?;
        Ok(Self { engine, dispatcher })
    }

    /// Shortest path through two or more waypoints.
    pub fn route(&self, args: Vec<HostValue>) -> Result<JobId, BindingError> {
        self.dispatch(ServiceKind::Route, args)
    }

    /// Distance matrix between two or more coordinates.
    pub fn table(&self, args: Vec<HostValue>) -> Result<JobId, BindingError> {
        self.dispatch(ServiceKind::Table, args)
    }

    /// Snaps one coordinate to the closest graph node.
    pub fn locate(&self, args: Vec<HostValue>) -> Result<JobId, BindingError> {
        self.dispatch(ServiceKind::Locate, args)
    }

    /// Snaps one coordinate to the closest point on a street segment.
    pub fn nearest(&self, args: Vec<HostValue>) -> Result<JobId, BindingError> {
        self.dispatch(ServiceKind::Nearest, args)
    }

    /// Typed entry point for callers that already hold a request value
    /// and a Rust callback.
    pub fn query(
        &self,
        kind: ServiceKind,
        raw: &Value,
        callback: impl FnOnce(JobOutcome) + Send + 'static,
    ) -> Result<JobId, BindingError> {
        let request = params::build(kind, raw)?;
        Ok(self.submit(request, CompletionHandle::new(callback)))
    }

    /// Number of jobs currently holding the engine.
    pub fn in_flight(&self) -> usize {
        self.engine.in_flight()
    }

    pub fn engine(&self) -> &Arc<EngineHandle> {
        &self.engine
    }

    fn dispatch(&self, kind: ServiceKind, mut args: Vec<HostValue>) -> Result<JobId, BindingError> {
        if args.len() < 2 {
            return Err(ValidationError::TwoArgumentsRequired.into());
        }

        // A callable in the request position fails the shape check like
        // any other non-data value.
        let request = params::build(kind, args[0].as_value().unwrap_or(&Value::Null))?;

        let callback = match args.pop() {
            Some(HostValue::Function(callback)) => callback,
            _ => return Err(ValidationError::MissingCallback.into()),
        };

        Ok(self.submit(request, CompletionHandle::from_boxed(callback)))
    }

    fn submit(&self, request: RequestDescriptor, completion: CompletionHandle) -> JobId {
        let job_id = self.dispatcher.submit(request, &self.engine, completion);
        debug!(job_id = %job_id, in_flight = self.engine.in_flight(), "Query scheduled");
        job_id
    }
}

fn dataset_source(args: &[HostValue]) -> Result<DatasetSource, ValidationError> {
    match args {
        [] => Ok(DatasetSource::SharedMemory),
        [HostValue::Value(Value::String(base))] => Ok(DatasetSource::Path(PathBuf::from(base))),
        _ => Err(ValidationError::InvalidBasePath),
    }
}

#[cfg(test)]
mod tests;
