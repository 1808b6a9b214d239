//! CreateScheduleHandler - Command handler for new schedules.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{
    CalendarEventId, CommandMetadata, EventId, ScheduleId, Timestamp,
};
use crate::domain::game_session::Participant;
use crate::domain::schedule::{NewSchedule, Recurrence, Schedule, ScheduleCreated, ScheduleError};
use crate::ports::{EventPublisher, ScheduleRepository};

use super::support::publish;

/// The caller becomes the owner and must appear in `participants`.
#[derive(Debug, Clone)]
pub struct CreateScheduleCommand {
    pub title: String,
    pub calendar_event_id: Option<CalendarEventId>,
    pub start: Timestamp,
    pub duration_minutes: u32,
    pub recurrence: Option<Recurrence>,
    pub participants: Vec<Participant>,
}

pub struct CreateScheduleHandler {
    repository: Arc<dyn ScheduleRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl CreateScheduleHandler {
    pub fn new(
        repository: Arc<dyn ScheduleRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateScheduleCommand,
        metadata: CommandMetadata,
    ) -> Result<Schedule, ScheduleError> {
        let new = NewSchedule {
            owner_id: metadata.user_id.clone(),
            title: cmd.title,
            calendar_event_id: cmd.calendar_event_id,
            start: cmd.start,
            duration_minutes: cmd.duration_minutes,
            recurrence: cmd.recurrence,
            participants: cmd.participants,
        };
        let schedule = Schedule::create(ScheduleId::new(), new, Timestamp::now())?;

        self.repository.save(&schedule).await?;

        let event = ScheduleCreated {
            event_id: EventId::new(),
            schedule_id: *schedule.id(),
            owner_id: metadata.user_id.clone(),
            title: schedule.title().to_string(),
            start: schedule.start(),
            created_at: *schedule.created_at(),
        };
        publish(self.event_publisher.as_ref(), &event, &metadata).await?;

        info!(
            schedule_id = %schedule.id(),
            start = %schedule.start(),
            recurring = schedule.recurrence().is_some(),
            "Schedule created"
        );
        Ok(schedule)
    }
}
