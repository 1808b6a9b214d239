//! UpdateGameSessionHandler - Owner edits of title and encounter.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::foundation::{CommandMetadata, EncounterId, EventId, GameSessionId, Timestamp};
use crate::domain::game_session::{
    ActiveEncounterChanged, GameSession, GameSessionError, GameSessionUpdated,
};
use crate::ports::{ContentCatalog, EventPublisher, GameSessionRepository};

use super::support::{load, persist, publish};

/// `None` leaves a field alone; `encounter_id: Some(None)` clears the encounter.
#[derive(Debug, Clone)]
pub struct UpdateGameSessionCommand {
    pub session_id: GameSessionId,
    pub title: Option<String>,
    pub encounter_id: Option<Option<EncounterId>>,
}

#[derive(Debug, Clone)]
pub struct UpdateGameSessionResult {
    pub session: GameSession,
    /// `false` when the command matched the stored state.
    pub changed: bool,
}

pub struct UpdateGameSessionHandler {
    repository: Arc<dyn GameSessionRepository>,
    catalog: Arc<dyn ContentCatalog>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl UpdateGameSessionHandler {
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
        cmd: UpdateGameSessionCommand,
        metadata: CommandMetadata,
    ) -> Result<UpdateGameSessionResult, GameSessionError> {
        let mut session = load(self.repository.as_ref(), cmd.session_id).await?;
        session.ensure_owner(&metadata.user_id)?;

        if let Some(Some(encounter_id)) = cmd.encounter_id {
            if !self.catalog.encounter_exists(&encounter_id).await? {
                return Err(GameSessionError::reference_not_found("Encounter not found"));
            }
        }

        let renamed = match &cmd.title {
            Some(title) => session.rename(title)?,
            None => false,
        };
        let encounter_changed = match cmd.encounter_id {
            Some(encounter_id) => session.replace_encounter(encounter_id)?,
            None => false,
        };

        if !renamed && !encounter_changed {
            debug!(session_id = %cmd.session_id, "Update matched stored state, skipping");
            return Ok(UpdateGameSessionResult {
                session,
                changed: false,
            });
        }

        persist(self.repository.as_ref(), &mut session).await?;

        let now = Timestamp::now();
        if renamed {
            let event = GameSessionUpdated {
                event_id: EventId::new(),
                session_id: cmd.session_id,
                updated_by: metadata.user_id.clone(),
                title: session.title().to_string(),
                updated_at: now,
            };
            publish(self.event_publisher.as_ref(), &event, &metadata).await?;
        }
        if encounter_changed {
            let event = ActiveEncounterChanged {
                event_id: EventId::new(),
                session_id: cmd.session_id,
                encounter_id: session.encounter_id(),
                changed_by: metadata.user_id.clone(),
                changed_at: now,
            };
            publish(self.event_publisher.as_ref(), &event, &metadata).await?;
        }

        info!(session_id = %cmd.session_id, renamed, encounter_changed, "Game session updated");
        Ok(UpdateGameSessionResult {
            session,
            changed: true,
        })
    }
}
