//! Request parameter validation.
//!
//! Callers hand the binding untyped JSON-like values. This module validates
//! them per service kind and produces an immutable [`RequestDescriptor`].
//! Validation is synchronous and has no side effects: a request that fails
//! here never becomes a job.
//!
//! # Accepted input
//!
//! | Service   | Input                                   | Coordinates |
//! |-----------|-----------------------------------------|-------------|
//! | `route`   | object with `coordinates` + options     | ≥ 2         |
//! | `table`   | object with `coordinates` + options     | ≥ 2         |
//! | `locate`  | `[lat, lon]`                            | exactly 1   |
//! | `nearest` | `[lat, lon]`                            | exactly 1   |
//!
//! # Example
//!
//! ```
//! use routelayer::params::{build, ServiceKind};
//! use serde_json::json;
//!
//! let descriptor = build(
//!     ServiceKind::Route,
//!     &json!({ "coordinates": [[52.5, 13.4], [52.6, 13.5]], "zoomLevel": 14 }),
//! )
//! .unwrap();
//!
//! assert_eq!(descriptor.coordinates().len(), 2);
//! assert_eq!(descriptor.zoom_level(), 14);
//! ```

mod builder;
mod error;
mod types;

pub use builder::{build, build_locate, build_nearest, build_route, build_table};
pub use error::ValidationError;
pub use types::{
    RequestDescriptor, ServiceKind, DEFAULT_ZOOM_LEVEL, MIN_MULTI_COORDINATES, OUTPUT_FORMAT,
};
