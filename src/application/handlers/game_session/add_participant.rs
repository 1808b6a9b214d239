//! AddParticipantHandler - Owner seats another user.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{CommandMetadata, EventId, GameSessionId, Timestamp, UserId};
use crate::domain::game_session::{
    GameSession, GameSessionError, Participant, ParticipantAdded, PlayerType,
};
use crate::ports::{EventPublisher, GameSessionRepository, UserDirectory};

use super::support::{load, persist, publish};

#[derive(Debug, Clone)]
pub struct AddParticipantCommand {
    pub session_id: GameSessionId,
    pub user_id: UserId,
    pub player_type: PlayerType,
    pub is_required: bool,
}

pub struct AddParticipantHandler {
    repository: Arc<dyn GameSessionRepository>,
    users: Arc<dyn UserDirectory>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl AddParticipantHandler {
    pub fn new(
        repository: Arc<dyn GameSessionRepository>,
        users: Arc<dyn UserDirectory>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            users,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: AddParticipantCommand,
        metadata: CommandMetadata,
    ) -> Result<GameSession, GameSessionError> {
        let mut session = load(self.repository.as_ref(), cmd.session_id).await?;
        session.ensure_can_manage_participants(&metadata.user_id)?;

        if !self.users.user_exists(&cmd.user_id).await? {
            return Err(GameSessionError::reference_not_found("User not found"));
        }

        let mut participant = Participant::new(cmd.user_id.clone(), cmd.player_type);
        participant.is_required = cmd.is_required;
        session.add_participant(&metadata.user_id, participant)?;

        persist(self.repository.as_ref(), &mut session).await?;

        let event = ParticipantAdded {
            event_id: EventId::new(),
            session_id: cmd.session_id,
            user_id: cmd.user_id.clone(),
            player_type: cmd.player_type,
            added_by: metadata.user_id.clone(),
            added_at: Timestamp::now(),
        };
        publish(self.event_publisher.as_ref(), &event, &metadata).await?;

        info!(
            session_id = %cmd.session_id,
            user_id = %cmd.user_id,
            player_type = ?cmd.player_type,
            "Participant added"
        );
        Ok(session)
    }
}
