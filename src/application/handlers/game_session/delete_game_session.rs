//! DeleteGameSessionHandler - Owner removes a session.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{CommandMetadata, EventId, GameSessionId, Timestamp};
use crate::domain::game_session::{GameSessionDeleted, GameSessionError};
use crate::ports::{EventPublisher, GameSessionRepository};

use super::support::{load, publish};

#[derive(Debug, Clone)]
pub struct DeleteGameSessionCommand {
    pub session_id: GameSessionId,
}

pub struct DeleteGameSessionHandler {
    repository: Arc<dyn GameSessionRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl DeleteGameSessionHandler {
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
        cmd: DeleteGameSessionCommand,
        metadata: CommandMetadata,
    ) -> Result<GameSessionDeleted, GameSessionError> {
        let session = load(self.repository.as_ref(), cmd.session_id).await?;
        session.ensure_owner(&metadata.user_id)?;

        self.repository.delete(&cmd.session_id).await?;

        let event = GameSessionDeleted {
            event_id: EventId::new(),
            session_id: cmd.session_id,
            deleted_by: metadata.user_id.clone(),
            deleted_at: Timestamp::now(),
        };
        publish(self.event_publisher.as_ref(), &event, &metadata).await?;

        info!(session_id = %cmd.session_id, "Game session deleted");
        Ok(event)
    }
}
