//! Schedule domain events.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    domain_event, EventId, GameSessionId, ScheduleId, Timestamp, UserId,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleCreated {
    pub event_id: EventId,
    pub schedule_id: ScheduleId,
    pub owner_id: UserId,
    pub title: String,
    pub start: Timestamp,
    pub created_at: Timestamp,
}

domain_event!(
    ScheduleCreated,
    event_type = "schedule.created.v1",
    schema_version = 1,
    aggregate_id = schedule_id,
    aggregate_type = "Schedule",
    occurred_at = created_at,
    event_id = event_id
);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleUpdated {
    pub event_id: EventId,
    pub schedule_id: ScheduleId,
    pub updated_by: UserId,
    pub updated_at: Timestamp,
}

domain_event!(
    ScheduleUpdated,
    event_type = "schedule.updated.v1",
    schema_version = 1,
    aggregate_id = schedule_id,
    aggregate_type = "Schedule",
    occurred_at = updated_at,
    event_id = event_id
);

/// Published when a schedule is deleted. Its sessions are left in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleDeleted {
    pub event_id: EventId,
    pub schedule_id: ScheduleId,
    pub deleted_by: UserId,
    pub retained_sessions: usize,
    pub deleted_at: Timestamp,
}

domain_event!(
    ScheduleDeleted,
    event_type = "schedule.deleted.v1",
    schema_version = 1,
    aggregate_id = schedule_id,
    aggregate_type = "Schedule",
    occurred_at = deleted_at,
    event_id = event_id
);

/// Published once per generation run that created at least one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionsGenerated {
    pub event_id: EventId,
    pub schedule_id: ScheduleId,
    pub session_ids: Vec<GameSessionId>,
    pub occurrences: Vec<Timestamp>,
    pub generated_at: Timestamp,
}

domain_event!(
    SessionsGenerated,
    event_type = "schedule.sessions_generated.v1",
    schema_version = 1,
    aggregate_id = schedule_id,
    aggregate_type = "Schedule",
    occurred_at = generated_at,
    event_id = event_id
);
