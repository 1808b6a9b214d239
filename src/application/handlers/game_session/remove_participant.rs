//! RemoveParticipantHandler - Owner unseats a participant.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{CommandMetadata, EventId, GameSessionId, Timestamp, UserId};
use crate::domain::game_session::{GameSession, GameSessionError, ParticipantRemoved};
use crate::ports::{EventPublisher, GameSessionRepository};

use super::support::{load, persist, publish};

#[derive(Debug, Clone)]
pub struct RemoveParticipantCommand {
    pub session_id: GameSessionId,
    pub user_id: UserId,
}

pub struct RemoveParticipantHandler {
    repository: Arc<dyn GameSessionRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl RemoveParticipantHandler {
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
        cmd: RemoveParticipantCommand,
        metadata: CommandMetadata,
    ) -> Result<GameSession, GameSessionError> {
        let mut session = load(self.repository.as_ref(), cmd.session_id).await?;
        session.remove_participant(&metadata.user_id, &cmd.user_id)?;

        persist(self.repository.as_ref(), &mut session).await?;

        let event = ParticipantRemoved {
            event_id: EventId::new(),
            session_id: cmd.session_id,
            user_id: cmd.user_id.clone(),
            removed_by: metadata.user_id.clone(),
            removed_at: Timestamp::now(),
        };
        publish(self.event_publisher.as_ref(), &event, &metadata).await?;

        info!(session_id = %cmd.session_id, user_id = %cmd.user_id, "Participant removed");
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::super::support::fixtures::*;
    use super::*;

    fn handler(harness: &Harness) -> RemoveParticipantHandler {
        RemoveParticipantHandler::new(harness.repository.clone(), harness.bus.clone())
    }

    fn remove(session_id: GameSessionId, user_id: &str) -> RemoveParticipantCommand {
        RemoveParticipantCommand {
            session_id,
            user_id: user(user_id),
        }
    }

    #[tokio::test]
    async fn owner_removes_player() {
        let harness = Harness::new();
        let id = harness.draft_session().await;

        let session = handler(&harness)
            .handle(remove(id, "alice"), CommandMetadata::for_user("gm"))
            .await
            .unwrap();

        assert!(!session.is_participant(&user("alice")));
        assert!(harness.bus.has_event("game_session.participant_removed.v1"));
    }

    #[tokio::test]
    async fn master_removal_always_fails() {
        let harness = Harness::new();
        let id = harness.draft_session().await;

        let err = handler(&harness)
            .handle(remove(id, "gm"), CommandMetadata::for_user("gm"))
            .await
            .unwrap_err();

        assert_eq!(err, GameSessionError::CannotRemoveMaster);
    }

    #[tokio::test]
    async fn removing_non_participant_fails() {
        let harness = Harness::new();
        let id = harness.draft_session().await;

        let err = handler(&harness)
            .handle(remove(id, "bob"), CommandMetadata::for_user("gm"))
            .await
            .unwrap_err();

        assert_eq!(err, GameSessionError::NotParticipant);
    }

    #[tokio::test]
    async fn non_owner_is_forbidden() {
        let harness = Harness::new();
        let id = harness.draft_session().await;

        let err = handler(&harness)
            .handle(remove(id, "gm"), CommandMetadata::for_user("alice"))
            .await
            .unwrap_err();

        assert_eq!(err, GameSessionError::owner_only());
    }
}
