//! Engine error types.

use thiserror::Error;

/// Failure raised by the engine while answering a query.
///
/// The message is the engine's own text, unchanged. `Display` prints only
/// the message so it can be handed to callers as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct EngineError {
    message: String,
}

impl EngineError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the engine's message text.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Failure to initialise an engine from its dataset.
#[derive(Debug, Error)]
pub enum ConstructionError {
    /// The dataset base path does not exist.
    #[error("dataset not found: {0}")]
    DatasetNotFound(String),

    /// No shared-memory dataset is available.
    #[error("no shared memory dataset is loaded")]
    SharedMemoryUnavailable,

    /// The dataset exists but could not be loaded.
    #[error("failed to load dataset: {0}")]
    Load(String),

    /// I/O error while inspecting the dataset.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
