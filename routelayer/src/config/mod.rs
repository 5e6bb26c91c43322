//! User configuration loaded from `~/.routelayer/config.ini`.
//!
//! Settings structs live in [`settings`], INI parsing in `parser` and
//! serialization in `writer`. A missing file yields defaults.
//!
//! # Example
//!
//! ```
//! use routelayer::config::ConfigFile;
//! use routelayer::engine::DatasetSource;
//!
//! let config = ConfigFile::default();
//! assert_eq!(config.dataset_source(), DatasetSource::SharedMemory);
//! ```

mod file;
mod parser;
pub mod settings;
mod writer;

pub use file::{config_directory, config_file_path, ConfigFileError};
pub use settings::{
    ConfigFile, DispatcherSettings, EngineSettings, LoggingSettings, DEFAULT_LOG_DIRECTORY,
    DEFAULT_LOG_FILE,
};
