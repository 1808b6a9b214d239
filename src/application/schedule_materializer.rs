//! ScheduleMaterializer - Background worker that turns upcoming schedule
//! occurrences into `Scheduled` game sessions.
//!
//! ## Configuration
//!
//! | Setting | Default | Description |
//! |---------|---------|-------------|
//! | `poll_interval` | 60s | How often every schedule is examined |
//! | `horizon_days` | 30 | How far ahead sessions are created |
//!
//! ## Shutdown
//!
//! The worker stops as soon as the shutdown signal flips to `true`. A batch
//! in flight completes; no extra batch is started.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time;
use tracing::{debug, error, info, warn};

use crate::domain::foundation::{CommandMetadata, DomainError, OwnedByUser, Timestamp};
use crate::ports::{EventPublisher, GameSessionRepository, ScheduleRepository};

use super::handlers::{GenerateSessionsCommand, GenerateSessionsHandler};

/// Source recorded on commands issued by the worker.
pub const SCHEDULER_SOURCE: &str = "scheduler";

#[derive(Debug, Clone)]
pub struct ScheduleMaterializerConfig {
    pub poll_interval: Duration,
    pub horizon_days: u32,
}

impl Default for ScheduleMaterializerConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(60),
            horizon_days: 30,
        }
    }
}

impl ScheduleMaterializerConfig {
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_horizon_days(mut self, days: u32) -> Self {
        self.horizon_days = days;
        self
    }
}

pub struct ScheduleMaterializer {
    schedules: Arc<dyn ScheduleRepository>,
    generator: GenerateSessionsHandler,
    config: ScheduleMaterializerConfig,
}

impl ScheduleMaterializer {
    pub fn new(
        schedules: Arc<dyn ScheduleRepository>,
        sessions: Arc<dyn GameSessionRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self::with_config(
            schedules,
            sessions,
            event_publisher,
            ScheduleMaterializerConfig::default(),
        )
    }

    pub fn with_config(
        schedules: Arc<dyn ScheduleRepository>,
        sessions: Arc<dyn GameSessionRepository>,
        event_publisher: Arc<dyn EventPublisher>,
        config: ScheduleMaterializerConfig,
    ) -> Self {
        let generator = GenerateSessionsHandler::new(schedules.clone(), sessions, event_publisher);
        Self {
            schedules,
            generator,
            config,
        }
    }

    /// Run until the shutdown signal is received.
    ///
    /// A failed batch is logged and retried on the next tick.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let mut interval = time::interval(self.config.poll_interval);
        info!(
            poll_interval_secs = self.config.poll_interval.as_secs(),
            horizon_days = self.config.horizon_days,
            "Schedule materializer started"
        );

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        info!("Schedule materializer stopped");
                        return;
                    }
                }

                _ = interval.tick() => {
                    if let Err(e) = self.process_batch().await {
                        error!(error = %e, "Schedule materializer batch failed");
                    }
                }
            }
        }
    }

    /// Generate sessions for every stored schedule up to the horizon.
    ///
    /// Returns the number of sessions created. A failure for one schedule is
    /// logged and the remaining schedules are still processed.
    pub async fn process_batch(&self) -> Result<usize, DomainError> {
        let now = Timestamp::now();
        let horizon = now
            .add_days(i64::from(self.config.horizon_days))
            .ok_or_else(|| {
                DomainError::validation("horizon_days", "Materializer horizon is out of range")
            })?;
        let schedules = self.schedules.list_all().await?;
        let mut created = 0;

        for schedule in schedules {
            if !schedule.has_occurrence_in(now, horizon) {
                continue;
            }
            let metadata =
                CommandMetadata::new(schedule.owner_id().clone()).with_source(SCHEDULER_SOURCE);
            let cmd = GenerateSessionsCommand::new(*schedule.id())
                .starting_at(now)
                .up_to(horizon);

            match self.generator.handle(cmd, metadata).await {
                Ok(result) => created += result.sessions.len(),
                Err(e) => {
                    warn!(schedule_id = %schedule.id(), error = %e, "Failed to materialize schedule");
                }
            }
        }

        debug!(created, "Schedule materializer batch complete");
        Ok(created)
    }

    /// Run exactly one batch.
    pub async fn poll_once(&self) -> Result<usize, DomainError> {
        self.process_batch().await
    }
}
