//! LeaveGameSessionHandler - Caller gives up their seat.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{CommandMetadata, EventId, GameSessionId, Timestamp};
use crate::domain::game_session::{GameSessionError, ParticipantRemoved};
use crate::ports::{EventPublisher, GameSessionRepository};

use super::support::{load, persist, publish};

#[derive(Debug, Clone)]
pub struct LeaveGameSessionCommand {
    pub session_id: GameSessionId,
}

pub struct LeaveGameSessionHandler {
    repository: Arc<dyn GameSessionRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl LeaveGameSessionHandler {
    pub fn new(
        repository: Arc<dyn GameSessionRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            event_publisher,
        }
    }

    /// Returns `false` when the caller was not seated.
    pub async fn handle(
        &self,
        cmd: LeaveGameSessionCommand,
        metadata: CommandMetadata,
    ) -> Result<bool, GameSessionError> {
        let mut session = load(self.repository.as_ref(), cmd.session_id).await?;

        if !session.leave(&metadata.user_id)? {
            return Ok(false);
        }

        persist(self.repository.as_ref(), &mut session).await?;

        let event = ParticipantRemoved {
            event_id: EventId::new(),
            session_id: cmd.session_id,
            user_id: metadata.user_id.clone(),
            removed_by: metadata.user_id.clone(),
            removed_at: Timestamp::now(),
        };
        publish(self.event_publisher.as_ref(), &event, &metadata).await?;

        info!(session_id = %cmd.session_id, user_id = %metadata.user_id, "Left game session");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::super::support::fixtures::*;
    use super::*;

    fn handler(harness: &Harness) -> LeaveGameSessionHandler {
        LeaveGameSessionHandler::new(harness.repository.clone(), harness.bus.clone())
    }

    #[tokio::test]
    async fn player_leaves() {
        let harness = Harness::new();
        let id = harness.draft_session().await;

        let left = handler(&harness)
            .handle(LeaveGameSessionCommand { session_id: id }, CommandMetadata::for_user("alice"))
            .await
            .unwrap();

        assert!(left);
        assert!(!harness.stored(id).await.is_participant(&user("alice")));
        assert!(harness.bus.has_event("game_session.participant_removed.v1"));
    }

    #[tokio::test]
    async fn outsider_leaving_is_a_no_op() {
        let harness = Harness::new();
        let id = harness.draft_session().await;

        let left = handler(&harness)
            .handle(LeaveGameSessionCommand { session_id: id }, CommandMetadata::for_user("bob"))
            .await
            .unwrap();

        assert!(!left);
        assert_eq!(harness.bus.event_count(), 0);
    }

    #[tokio::test]
    async fn master_cannot_leave() {
        let harness = Harness::new();
        let id = harness.draft_session().await;

        let err = handler(&harness)
            .handle(LeaveGameSessionCommand { session_id: id }, CommandMetadata::for_user("gm"))
            .await
            .unwrap_err();

        assert_eq!(err, GameSessionError::CannotRemoveMaster);
        assert!(harness.stored(id).await.is_master(&user("gm")));
    }
}
