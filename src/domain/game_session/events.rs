//! Game session domain events.
//!
//! Published after each successful mutation so realtime fan-out can push
//! changes to connected clients.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::domain::foundation::{
    domain_event, EncounterId, EventId, GameSessionId, GameSessionStatus, SceneId, ScheduleId,
    Timestamp, UserId,
};

use super::{MessageType, PlayerType};

// ════════════════════════════════════════════════════════════════════════════
// Lifecycle
// ════════════════════════════════════════════════════════════════════════════

/// Published when a game session is created, by hand or from a schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSessionCreated {
    pub event_id: EventId,
    pub session_id: GameSessionId,
    pub owner_id: UserId,
    pub title: String,
    pub status: GameSessionStatus,
    /// Set when the session was generated from a schedule occurrence.
    pub schedule_id: Option<ScheduleId>,
    pub created_at: Timestamp,
}

domain_event!(
    GameSessionCreated,
    event_type = "game_session.created.v1",
    schema_version = 1,
    aggregate_id = session_id,
    aggregate_type = "GameSession",
    occurred_at = created_at,
    event_id = event_id
);

/// Published when the owner changes the title.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSessionUpdated {
    pub event_id: EventId,
    pub session_id: GameSessionId,
    pub updated_by: UserId,
    pub title: String,
    pub updated_at: Timestamp,
}

domain_event!(
    GameSessionUpdated,
    event_type = "game_session.updated.v1",
    schema_version = 1,
    aggregate_id = session_id,
    aggregate_type = "GameSession",
    occurred_at = updated_at,
    event_id = event_id
);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSessionDeleted {
    pub event_id: EventId,
    pub session_id: GameSessionId,
    pub deleted_by: UserId,
    pub deleted_at: Timestamp,
}

domain_event!(
    GameSessionDeleted,
    event_type = "game_session.deleted.v1",
    schema_version = 1,
    aggregate_id = session_id,
    aggregate_type = "GameSession",
    occurred_at = deleted_at,
    event_id = event_id
);

/// Published on start, pause, resume and finish.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSessionStatusChanged {
    pub event_id: EventId,
    pub session_id: GameSessionId,
    pub changed_by: UserId,
    pub from: GameSessionStatus,
    pub to: GameSessionStatus,
    pub changed_at: Timestamp,
}

domain_event!(
    GameSessionStatusChanged,
    event_type = "game_session.status_changed.v1",
    schema_version = 1,
    aggregate_id = session_id,
    aggregate_type = "GameSession",
    occurred_at = changed_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// Membership
// ════════════════════════════════════════════════════════════════════════════

/// Published when a user joins or is added by the owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantAdded {
    pub event_id: EventId,
    pub session_id: GameSessionId,
    pub user_id: UserId,
    pub player_type: PlayerType,
    pub added_by: UserId,
    pub added_at: Timestamp,
}

domain_event!(
    ParticipantAdded,
    event_type = "game_session.participant_added.v1",
    schema_version = 1,
    aggregate_id = session_id,
    aggregate_type = "GameSession",
    occurred_at = added_at,
    event_id = event_id
);

/// Published when a user leaves or is removed by the owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantRemoved {
    pub event_id: EventId,
    pub session_id: GameSessionId,
    pub user_id: UserId,
    pub removed_by: UserId,
    pub removed_at: Timestamp,
}

domain_event!(
    ParticipantRemoved,
    event_type = "game_session.participant_removed.v1",
    schema_version = 1,
    aggregate_id = session_id,
    aggregate_type = "GameSession",
    occurred_at = removed_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// Active content
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveSceneChanged {
    pub event_id: EventId,
    pub session_id: GameSessionId,
    pub scene_id: Option<SceneId>,
    pub changed_by: UserId,
    pub changed_at: Timestamp,
}

domain_event!(
    ActiveSceneChanged,
    event_type = "game_session.scene_changed.v1",
    schema_version = 1,
    aggregate_id = session_id,
    aggregate_type = "GameSession",
    occurred_at = changed_at,
    event_id = event_id
);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveEncounterChanged {
    pub event_id: EventId,
    pub session_id: GameSessionId,
    pub encounter_id: Option<EncounterId>,
    pub changed_by: UserId,
    pub changed_at: Timestamp,
}

domain_event!(
    ActiveEncounterChanged,
    event_type = "game_session.encounter_changed.v1",
    schema_version = 1,
    aggregate_id = session_id,
    aggregate_type = "GameSession",
    occurred_at = changed_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// Log
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessageSent {
    pub event_id: EventId,
    pub session_id: GameSessionId,
    pub sent_by: UserId,
    pub sent_to: Vec<UserId>,
    pub message_type: MessageType,
    pub content: String,
    pub sent_at: Timestamp,
}

domain_event!(
    ChatMessageSent,
    event_type = "game_session.message_sent.v1",
    schema_version = 1,
    aggregate_id = session_id,
    aggregate_type = "GameSession",
    occurred_at = sent_at,
    event_id = event_id
);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameEventRecorded {
    pub event_id: EventId,
    pub session_id: GameSessionId,
    pub recorded_by: UserId,
    pub game_event_type: String,
    pub payload: JsonValue,
    pub recorded_at: Timestamp,
}

domain_event!(
    GameEventRecorded,
    event_type = "game_session.event_recorded.v1",
    schema_version = 1,
    aggregate_id = session_id,
    aggregate_type = "GameSession",
    occurred_at = recorded_at,
    event_id = event_id
);
