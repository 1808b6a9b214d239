//! vtt-game service entry point.
//!
//! Wires the configured repositories to an in-process event bus and runs the
//! schedule materializer until Ctrl+C.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};

use vtt_game::adapters::{
    FileGameSessionRepository, FileScheduleRepository, InMemoryEventBus,
    InMemoryGameSessionRepository, InMemoryScheduleRepository,
};
use vtt_game::application::ScheduleMaterializer;
use vtt_game::config::{AppConfig, LogFormat, ServiceConfig, StorageBackend, StorageConfig};
use vtt_game::ports::{GameSessionRepository, ScheduleRepository};

type BoxError = Box<dyn std::error::Error + Send + Sync>;
type Repositories = (Arc<dyn GameSessionRepository>, Arc<dyn ScheduleRepository>);

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    config.validate()?;
    init_tracing(&config.service)?;

    info!(
        environment = ?config.service.environment,
        backend = ?config.storage.backend,
        "Starting vtt-game"
    );

    let (sessions, schedules) = repositories(&config.storage);
    let event_bus = Arc::new(InMemoryEventBus::new());
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let worker = if config.scheduler.enabled {
        let materializer = ScheduleMaterializer::with_config(
            schedules,
            sessions,
            event_bus,
            config.scheduler.materializer_config(),
        );
        Some(tokio::spawn(async move { materializer.run(shutdown_rx).await }))
    } else {
        warn!("Schedule materializer disabled");
        None
    };

    tokio::signal::ctrl_c().await?;
    info!("Shutdown requested");
    shutdown_tx.send(true)?;

    if let Some(worker) = worker {
        worker.await?;
    }
    Ok(())
}

fn init_tracing(service: &ServiceConfig) -> Result<(), BoxError> {
    let filter = service.env_filter()?;
    match service.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .try_init()?,
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).try_init()?,
    }
    Ok(())
}

fn repositories(storage: &StorageConfig) -> Repositories {
    match (storage.backend, &storage.data_dir) {
        (StorageBackend::File, Some(dir)) => (
            Arc::new(FileGameSessionRepository::new(dir)),
            Arc::new(FileScheduleRepository::new(dir)),
        ),
        _ => (
            Arc::new(InMemoryGameSessionRepository::new()),
            Arc::new(InMemoryScheduleRepository::new()),
        ),
    }
}
