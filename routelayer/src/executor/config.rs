//! Dispatcher runtime configuration.

use std::io;
use tokio::runtime::{Builder, Runtime};

/// Default number of blocking worker threads.
pub const DEFAULT_WORKER_THREADS: usize = 4;

/// Thread name prefix for runtime threads.
pub const WORKER_THREAD_NAME: &str = "routelayer-worker";

/// Configuration for the runtime that hosts the worker pool.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DispatcherConfig {
    /// Maximum number of engine queries running at once.
    pub worker_threads: usize,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            worker_threads: DEFAULT_WORKER_THREADS,
        }
    }
}

impl DispatcherConfig {
    /// Builds a multi-thread runtime whose blocking pool is sized to
    /// `worker_threads`.
    pub fn build_runtime(&self) -> io::Result<Runtime> {
        Builder::new_multi_thread()
            .max_blocking_threads(self.worker_threads.max(1))
            .thread_name(WORKER_THREAD_NAME)
            .enable_all()
            .build()
    }
}

impl From<&crate::config::DispatcherSettings> for DispatcherConfig {
    fn from(settings: &crate::config::DispatcherSettings) -> Self {
        Self {
            worker_threads: settings.worker_threads,
        }
    }
}
