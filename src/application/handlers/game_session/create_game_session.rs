//! CreateGameSessionHandler - Command handler for opening a new table.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{
    CommandMetadata, EncounterId, EventId, GameSessionId, SceneId,
};
use crate::domain::game_session::{GameSession, GameSessionCreated, GameSessionError};
use crate::ports::{ContentCatalog, EventPublisher, GameSessionRepository};

use super::support::publish;

/// Command to create a new game session. The caller becomes owner and Master.
#[derive(Debug, Clone)]
pub struct CreateGameSessionCommand {
    pub title: String,
    pub scene_id: Option<SceneId>,
    pub encounter_id: Option<EncounterId>,
}

#[derive(Debug, Clone)]
pub struct CreateGameSessionResult {
    pub session: GameSession,
    pub event: GameSessionCreated,
}

pub struct CreateGameSessionHandler {
    repository: Arc<dyn GameSessionRepository>,
    catalog: Arc<dyn ContentCatalog>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl CreateGameSessionHandler {
    pub fn new(
        repository: Arc<dyn GameSessionRepository>,
        catalog: Arc<dyn ContentCatalog>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            catalog,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateGameSessionCommand,
        metadata: CommandMetadata,
    ) -> Result<CreateGameSessionResult, GameSessionError> {
        let owner = metadata.user_id.clone();
        let mut session = GameSession::new(GameSessionId::new(), owner.clone(), &cmd.title)?;

        if let Some(scene_id) = cmd.scene_id {
            if !self.catalog.scene_exists(&scene_id).await? {
                return Err(GameSessionError::reference_not_found("Scene not found"));
            }
            session.set_scene(&owner, Some(scene_id))?;
        }
        if let Some(encounter_id) = cmd.encounter_id {
            if !self.catalog.encounter_exists(&encounter_id).await? {
                return Err(GameSessionError::reference_not_found("Encounter not found"));
            }
            session.set_encounter(&owner, Some(encounter_id))?;
        }

        self.repository.save(&session).await?;

        let event = GameSessionCreated {
            event_id: EventId::new(),
            session_id: *session.id(),
            owner_id: owner,
            title: session.title().to_string(),
            status: session.status(),
            schedule_id: None,
            created_at: *session.created_at(),
        };
        publish(self.event_publisher.as_ref(), &event, &metadata).await?;

        info!(session_id = %session.id(), owner = %metadata.user_id, "Game session created");
        Ok(CreateGameSessionResult { session, event })
    }
}
