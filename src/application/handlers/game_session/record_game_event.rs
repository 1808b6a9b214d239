//! RecordGameEventHandler - Append a structured game event (dice roll,
//! damage, condition...) to the session log.

use std::sync::Arc;

use serde_json::Value as JsonValue;
use tracing::info;

use crate::domain::foundation::{CommandMetadata, EventId, GameSessionId};
use crate::domain::game_session::{
    GameEventRecorded, GameSession, GameSessionError, GameSessionEvent,
};
use crate::ports::{EventPublisher, GameSessionRepository};

use super::support::{append_with_retry, publish};

#[derive(Debug, Clone)]
pub struct RecordGameEventCommand {
    pub session_id: GameSessionId,
    pub event_type: String,
    pub payload: JsonValue,
}

pub struct RecordGameEventHandler {
    repository: Arc<dyn GameSessionRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl RecordGameEventHandler {
    pub fn new(
        repository: Arc<dyn GameSessionRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: RecordGameEventCommand,
        metadata: CommandMetadata,
    ) -> Result<GameSessionEvent, GameSessionError> {
        let event_type = GameSession::validate_event_type(&cmd.event_type)?;

        let actor = &metadata.user_id;
        let (_, recorded) =
            append_with_retry(self.repository.as_ref(), cmd.session_id, |session| {
                session.record_event(&event_type, cmd.payload.clone())
            })
            .await?;

        let event = GameEventRecorded {
            event_id: EventId::new(),
            session_id: cmd.session_id,
            recorded_by: actor.clone(),
            game_event_type: recorded.event_type.clone(),
            payload: recorded.payload.clone(),
            recorded_at: recorded.timestamp,
        };
        publish(self.event_publisher.as_ref(), &event, &metadata).await?;

        info!(
            session_id = %cmd.session_id,
            event_type = %recorded.event_type,
            "Game event recorded"
        );
        Ok(recorded)
    }
}
