//! Settings structs for each configuration section.
//!
//! Each struct represents one `[section]` of the INI config file.

use crate::engine::DatasetSource;
use crate::executor::DEFAULT_WORKER_THREADS;
use std::path::PathBuf;

/// Default log directory, relative to the working directory.
pub const DEFAULT_LOG_DIRECTORY: &str = "logs";

/// Default log file name.
pub const DEFAULT_LOG_FILE: &str = "routelayer.log";

/// Complete configuration loaded from config.ini.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigFile {
    pub engine: EngineSettings,
    pub dispatcher: DispatcherSettings,
    pub logging: LoggingSettings,
}

impl ConfigFile {
    /// Where the engine should load its dataset from.
    ///
    /// Shared memory is used when forced or when no dataset path is set.
    pub fn dataset_source(&self) -> DatasetSource {
        match (&self.engine.dataset, self.engine.shared_memory) {
            (Some(path), false) => DatasetSource::Path(path.clone()),
            _ => DatasetSource::SharedMemory,
        }
    }
}

/// `[engine]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineSettings {
    /// Dataset base path (e.g. `/data/berlin.osrm`).
    pub dataset: Option<PathBuf>,
    /// Use the shared-memory dataset even if a path is set.
    pub shared_memory: bool,
}

/// `[dispatcher]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatcherSettings {
    /// Maximum number of concurrent engine queries.
    pub worker_threads: usize,
}

impl Default for DispatcherSettings {
    fn default() -> Self {
        Self {
            worker_threads: DEFAULT_WORKER_THREADS,
        }
    }
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    pub directory: PathBuf,
    pub file: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_LOG_DIRECTORY),
            file: DEFAULT_LOG_FILE.to_string(),
        }
    }
}
