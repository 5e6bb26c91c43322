//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use routelayer::binding::BindingError;
use routelayer::config::ConfigFileError;
use routelayer::engine::{ConstructionError, EngineError};
use std::fmt;
use std::process;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(std::io::Error),
    /// Configuration error
    Config(ConfigFileError),
    /// Failed to build the async runtime
    Runtime(std::io::Error),
    /// The request argument was not valid JSON
    InvalidJson(serde_json::Error),
    /// The binding rejected the request or could not start the engine
    Binding(BindingError),
    /// The engine answered with an error
    Query(EngineError),
    /// The completion callback never reported back
    NoResult,
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        match self {
            CliError::Binding(BindingError::Construction(
                ConstructionError::SharedMemoryUnavailable,
            )) => {
                eprintln!();
                eprintln!("No dataset is loaded into shared memory. Either:");
                eprintln!("  1. Pass a dataset base path with --dataset <PATH>");
                eprintln!("  2. Set 'dataset' in the [engine] section of config.ini");
            }
            CliError::InvalidJson(_) => {
                eprintln!();
                eprintln!("Examples:");
                eprintln!("  routelayer route '{{\"coordinates\": [[52.51, 13.38], [52.50, 13.42]]}}'");
                eprintln!("  routelayer nearest '[52.4224, 13.333086]'");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(e) => write!(f, "Failed to initialize logging: {}", e),
            CliError::Config(e) => write!(f, "Configuration error: {}", e),
            CliError::Runtime(e) => write!(f, "Failed to start runtime: {}", e),
            CliError::InvalidJson(e) => write!(f, "Request is not valid JSON: {}", e),
            CliError::Binding(e) => write!(f, "{}", e),
            CliError::Query(e) => write!(f, "Query failed: {}", e),
            CliError::NoResult => write!(f, "Query finished without a result"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::LoggingInit(e) => Some(e),
            CliError::Config(e) => Some(e),
            CliError::Runtime(e) => Some(e),
            CliError::InvalidJson(e) => Some(e),
            CliError::Binding(e) => Some(e),
            CliError::Query(e) => Some(e),
            CliError::NoResult => None,
        }
    }
}

impl From<BindingError> for CliError {
    fn from(e: BindingError) -> Self {
        CliError::Binding(e)
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e)
    }
}
