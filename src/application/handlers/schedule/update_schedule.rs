//! UpdateScheduleHandler - Owner edits a schedule.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::foundation::{CommandMetadata, EventId, ScheduleId, Timestamp};
use crate::domain::schedule::{Schedule, ScheduleChanges, ScheduleError, ScheduleUpdated};
use crate::ports::{EventPublisher, ScheduleRepository};

use super::support::{load_owned, publish};

#[derive(Debug, Clone)]
pub struct UpdateScheduleCommand {
    pub schedule_id: ScheduleId,
    pub changes: ScheduleChanges,
}

pub struct UpdateScheduleHandler {
    repository: Arc<dyn ScheduleRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl UpdateScheduleHandler {
    pub fn new(
        repository: Arc<dyn ScheduleRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            event_publisher,
        }
    }

    /// Sessions already generated keep their original dates and participants.
    pub async fn handle(
        &self,
        cmd: UpdateScheduleCommand,
        metadata: CommandMetadata,
    ) -> Result<Schedule, ScheduleError> {
        let mut schedule = load_owned(
            self.repository.as_ref(),
            cmd.schedule_id,
            &metadata.user_id,
            "Only the schedule owner can update this schedule",
        )
        .await?;

        if cmd.changes.is_empty() || !schedule.apply(cmd.changes, Timestamp::now())? {
            debug!(schedule_id = %cmd.schedule_id, "Schedule unchanged");
            return Ok(schedule);
        }

        self.repository.update(&schedule).await?;

        let event = ScheduleUpdated {
            event_id: EventId::new(),
            schedule_id: cmd.schedule_id,
            updated_by: metadata.user_id.clone(),
            updated_at: *schedule.updated_at(),
        };
        publish(self.event_publisher.as_ref(), &event, &metadata).await?;

        info!(schedule_id = %cmd.schedule_id, "Schedule updated");
        Ok(schedule)
    }
}
