//! Binding error types.

use crate::engine::ConstructionError;
use crate::params::ValidationError;
use thiserror::Error;

/// Errors returned synchronously by [`Osrm`](super::Osrm) operations.
///
/// Engine failures while running a query are never reported here; they
/// reach the caller's callback instead.
#[derive(Debug, Error)]
pub enum BindingError {
    /// The caller's arguments were rejected before any work was scheduled.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The engine could not be constructed.
    #[error(transparent)]
    Construction(#[from] ConstructionError),
}

impl BindingError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
