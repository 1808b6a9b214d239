//! DeleteScheduleHandler - Owner removes a schedule.
//!
//! Sessions generated from the schedule are never touched, whatever their
//! status. The result reports how many were left in place.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{CommandMetadata, EventId, ScheduleId, Timestamp};
use crate::domain::schedule::{ScheduleDeleted, ScheduleError};
use crate::ports::{EventPublisher, GameSessionRepository, ScheduleRepository};

use super::support::{load_owned, publish};

#[derive(Debug, Clone)]
pub struct DeleteScheduleCommand {
    pub schedule_id: ScheduleId,
}

pub struct DeleteScheduleHandler {
    schedules: Arc<dyn ScheduleRepository>,
    sessions: Arc<dyn GameSessionRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl DeleteScheduleHandler {
    pub fn new(
        schedules: Arc<dyn ScheduleRepository>,
        sessions: Arc<dyn GameSessionRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            schedules,
            sessions,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: DeleteScheduleCommand,
        metadata: CommandMetadata,
    ) -> Result<ScheduleDeleted, ScheduleError> {
        load_owned(
            self.schedules.as_ref(),
            cmd.schedule_id,
            &metadata.user_id,
            "Only the schedule owner can delete this schedule",
        )
        .await?;

        let retained_sessions = self
            .sessions
            .find_by_schedule_id(&cmd.schedule_id)
            .await?
            .len();
        self.schedules.delete(&cmd.schedule_id).await?;

        let event = ScheduleDeleted {
            event_id: EventId::new(),
            schedule_id: cmd.schedule_id,
            deleted_by: metadata.user_id.clone(),
            retained_sessions,
            deleted_at: Timestamp::now(),
        };
        publish(self.event_publisher.as_ref(), &event, &metadata).await?;

        info!(schedule_id = %cmd.schedule_id, retained_sessions, "Schedule deleted");
        Ok(event)
    }
}
