//! SetActiveEncounterHandler - Master runs or clears an encounter.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{CommandMetadata, EncounterId, EventId, GameSessionId, Timestamp};
use crate::domain::game_session::{ActiveEncounterChanged, GameSession, GameSessionError};
use crate::ports::{ContentCatalog, EventPublisher, GameSessionRepository};

use super::support::{load, persist, publish};

#[derive(Debug, Clone)]
pub struct SetActiveEncounterCommand {
    pub session_id: GameSessionId,
    pub encounter_id: Option<EncounterId>,
}

pub struct SetActiveEncounterHandler {
    repository: Arc<dyn GameSessionRepository>,
    catalog: Arc<dyn ContentCatalog>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl SetActiveEncounterHandler {
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
        cmd: SetActiveEncounterCommand,
        metadata: CommandMetadata,
    ) -> Result<GameSession, GameSessionError> {
        let mut session = load(self.repository.as_ref(), cmd.session_id).await?;
        session.ensure_master(&metadata.user_id)?;

        if let Some(encounter_id) = cmd.encounter_id {
            if !self.catalog.encounter_exists(&encounter_id).await? {
                return Err(GameSessionError::reference_not_found("Encounter not found"));
            }
        }

        if !session.set_encounter(&metadata.user_id, cmd.encounter_id)? {
            return Ok(session);
        }
        persist(self.repository.as_ref(), &mut session).await?;

        let event = ActiveEncounterChanged {
            event_id: EventId::new(),
            session_id: cmd.session_id,
            encounter_id: cmd.encounter_id,
            changed_by: metadata.user_id.clone(),
            changed_at: Timestamp::now(),
        };
        publish(self.event_publisher.as_ref(), &event, &metadata).await?;

        info!(
            session_id = %cmd.session_id,
            encounter_id = ?cmd.encounter_id,
            "Active encounter changed"
        );
        Ok(session)
    }
}
