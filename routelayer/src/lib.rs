//! RouteLayer - asynchronous host bindings for a road-network routing engine
//!
//! This library exposes a routing engine (route, distance table, locate,
//! nearest) to dynamically typed host runtimes. Requests are validated
//! synchronously, executed on a worker pool, and answered through a
//! per-request callback on the submitting context.
//!
//! # High-Level API
//!
//! The [`binding`] module provides the host-facing facade:
//!
//! ```ignore
//! use routelayer::binding::{HostValue, Osrm};
//! use routelayer::engine::EchoEngineFactory;
//! use routelayer::executor::{Dispatcher, TokioWorkerPool};
//!
//! let (dispatcher, completions) = Dispatcher::new(Arc::new(TokioWorkerPool::try_current()?));
//! let osrm = Osrm::new(&[], &EchoEngineFactory::new(), dispatcher)?;
//! osrm.nearest(vec![json!([52.4224, 13.333086]).into(), HostValue::function(print_result)])?;
//! tokio::spawn(completions.run(shutdown));
//! ```

pub mod binding;
pub mod config;
pub mod coord;
pub mod engine;
pub mod executor;
pub mod logging;
pub mod params;

mod panic;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
