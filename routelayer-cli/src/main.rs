//! RouteLayer CLI - Command-line interface
//!
//! Runs a single query through the full binding path (validation, worker
//! pool, completion loop) and prints the engine's answer.

mod error;

use clap::{Parser, ValueEnum};
use error::CliError;
use routelayer::binding::{HostValue, Osrm};
use routelayer::config::ConfigFile;
use routelayer::engine::{DatasetSource, EchoEngineFactory};
use routelayer::executor::{Dispatcher, DispatcherConfig, TokioWorkerPool};
use routelayer::logging;
use routelayer::params::ServiceKind;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Service {
    /// Shortest path through two or more waypoints
    Route,
    /// Distance matrix between two or more coordinates
    Table,
    /// Snap one coordinate to the closest graph node
    Locate,
    /// Snap one coordinate to the closest street segment
    Nearest,
}

impl From<Service> for ServiceKind {
    fn from(service: Service) -> Self {
        match service {
            Service::Route => ServiceKind::Route,
            Service::Table => ServiceKind::Table,
            Service::Locate => ServiceKind::Locate,
            Service::Nearest => ServiceKind::Nearest,
        }
    }
}

#[derive(Parser)]
#[command(name = "routelayer")]
#[command(version = routelayer::VERSION)]
#[command(about = "Run a routing query against a road-network dataset", long_about = None)]
struct Args {
    /// Config file (default: ~/.routelayer/config.ini)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Dataset base path, overriding the config file
    #[arg(long, conflicts_with = "shared_memory")]
    dataset: Option<PathBuf>,

    /// Use the dataset already loaded into shared memory
    #[arg(long)]
    shared_memory: bool,

    /// Service to query
    #[arg(value_enum)]
    service: Service,

    /// Request as JSON: an object with `coordinates` for route/table,
    /// a `[lat, lon]` pair for locate/nearest
    request: String,
}

fn main() {
    if let Err(e) = run(Args::parse()) {
        e.exit();
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let config = match &args.config {
        Some(path) => ConfigFile::load_from(path)?,
        None => ConfigFile::load()?,
    };

    let _logging_guard =
        logging::init_from_settings(&config.logging).map_err(CliError::LoggingInit)?;

    let source = if args.shared_memory {
        DatasetSource::SharedMemory
    } else if let Some(path) = &args.dataset {
        DatasetSource::Path(path.clone())
    } else {
        config.dataset_source()
    };

    let request: serde_json::Value =
        serde_json::from_str(&args.request).map_err(CliError::InvalidJson)?;

    let runtime = DispatcherConfig::from(&config.dispatcher)
        .build_runtime()
        .map_err(CliError::Runtime)?;

    let payload = runtime.block_on(query(source, args.service.into(), request))?;
    println!("{}", payload);
    Ok(())
}

async fn query(
    source: DatasetSource,
    kind: ServiceKind,
    request: serde_json::Value,
) -> Result<String, CliError> {
    let pool = Arc::new(TokioWorkerPool::new(Handle::current()));
    let (dispatcher, completions) = Dispatcher::new(pool);
    let osrm = Osrm::with_source(source, &EchoEngineFactory::new(), dispatcher)?;

    let shutdown = CancellationToken::new();
    let completion_task = tokio::spawn(completions.run(shutdown.clone()));

    let (tx, rx) = oneshot::channel();
    let host_args = vec![
        HostValue::from(request),
        HostValue::function(move |outcome| {
            let _ = tx.send(outcome);
        }),
    ];

    let job_id = match kind {
        ServiceKind::Route => osrm.route(host_args),
        ServiceKind::Table => osrm.table(host_args),
        ServiceKind::Locate => osrm.locate(host_args),
        ServiceKind::Nearest => osrm.nearest(host_args),
    }?;
    info!(job_id = %job_id, service = %kind, "Query submitted");

    let outcome = rx.await.map_err(|_| CliError::NoResult)?;

    shutdown.cancel();
    if let Err(e) = completion_task.await {
        debug!(error = %e, "Completion loop task ended abnormally");
    }

    outcome.map_err(CliError::Query)
}
