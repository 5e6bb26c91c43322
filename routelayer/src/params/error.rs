//! Validation error types.

use thiserror::Error;

/// Synchronous rejection of malformed caller input.
///
/// These errors are returned directly to the calling operation and are
/// never delivered through a completion callback. The messages match the
/// ones host callers have always received from the binding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Fewer than two host arguments (request + callback) were supplied, or
    /// a route request was a scalar.
    #[error("two arguments required")]
    TwoArgumentsRequired,

    /// Route/table input was null.
    #[error("first arg must be an object")]
    NotAnObject,

    /// Route input had no `coordinates` field.
    #[error("must provide a coordinates property")]
    MissingCoordinates,

    /// `coordinates` was not an array of numeric pairs.
    #[error("coordinates must be an array of (lat/long) pairs")]
    InvalidCoordinates,

    /// Route/table input had fewer than two coordinates.
    #[error("at least two coordinates must be provided")]
    TooFewCoordinates,

    /// Locate/nearest input was not a single numeric pair.
    #[error("first argument must be an array of lat, long")]
    InvalidCoordinatePair,

    /// `hints` was present but not an array.
    #[error("hints must be an array of strings/null")]
    HintsNotArray,

    /// A `hints` element was neither a string nor null.
    #[error("hint must be null or string")]
    InvalidHint,

    /// An optional field had the wrong type or was out of range.
    #[error("{field} must be {expected}")]
    InvalidOption {
        field: &'static str,
        expected: &'static str,
    },

    /// The trailing host argument was not callable.
    #[error("last argument must be a callback function")]
    MissingCallback,

    /// The constructor argument was neither absent nor a string.
    #[error("OSRM base path must be a string")]
    InvalidBasePath,
}
