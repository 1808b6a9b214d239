//! JoinGameSessionHandler - Caller takes a seat at the table.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::foundation::{CommandMetadata, EventId, GameSessionId, Timestamp};
use crate::domain::game_session::{GameSession, GameSessionError, ParticipantAdded, PlayerType};
use crate::ports::{EventPublisher, GameSessionRepository};

use super::support::{load, persist, publish};

#[derive(Debug, Clone)]
pub struct JoinGameSessionCommand {
    pub session_id: GameSessionId,
    pub player_type: PlayerType,
}

#[derive(Debug, Clone)]
pub struct JoinGameSessionResult {
    pub session: GameSession,
    /// `false` when the caller was already seated.
    pub joined: bool,
}

pub struct JoinGameSessionHandler {
    repository: Arc<dyn GameSessionRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl JoinGameSessionHandler {
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
        cmd: JoinGameSessionCommand,
        metadata: CommandMetadata,
    ) -> Result<JoinGameSessionResult, GameSessionError> {
        let mut session = load(self.repository.as_ref(), cmd.session_id).await?;

        if !session.join(metadata.user_id.clone(), cmd.player_type)? {
            debug!(session_id = %cmd.session_id, user_id = %metadata.user_id, "Already seated");
            return Ok(JoinGameSessionResult {
                session,
                joined: false,
            });
        }

        persist(self.repository.as_ref(), &mut session).await?;

        let event = ParticipantAdded {
            event_id: EventId::new(),
            session_id: cmd.session_id,
            user_id: metadata.user_id.clone(),
            player_type: cmd.player_type,
            added_by: metadata.user_id.clone(),
            added_at: Timestamp::now(),
        };
        publish(self.event_publisher.as_ref(), &event, &metadata).await?;

        info!(session_id = %cmd.session_id, user_id = %metadata.user_id, "Joined game session");
        Ok(JoinGameSessionResult {
            session,
            joined: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::support::fixtures::*;
    use super::*;

    fn handler(harness: &Harness) -> JoinGameSessionHandler {
        JoinGameSessionHandler::new(harness.repository.clone(), harness.bus.clone())
    }

    fn join_as(session_id: GameSessionId, player_type: PlayerType) -> JoinGameSessionCommand {
        JoinGameSessionCommand {
            session_id,
            player_type,
        }
    }

    #[tokio::test]
    async fn user_joins_as_player() {
        let harness = Harness::new();
        let id = harness.draft_session().await;

        let result = handler(&harness)
            .handle(join_as(id, PlayerType::Player), CommandMetadata::for_user("bob"))
            .await
            .unwrap();

        assert!(result.joined);
        assert!(harness.stored(id).await.is_participant(&user("bob")));
        assert!(harness.bus.has_event("game_session.participant_added.v1"));
    }

    #[tokio::test]
    async fn joining_twice_is_a_no_op() {
        let harness = Harness::new();
        let id = harness.draft_session().await;

        let result = handler(&harness)
            .handle(join_as(id, PlayerType::Guest), CommandMetadata::for_user("alice"))
            .await
            .unwrap();

        assert!(!result.joined);
        assert_eq!(harness.stored(id).await.players().len(), 2);
        assert_eq!(harness.bus.event_count(), 0);
    }

    #[tokio::test]
    async fn second_master_is_rejected() {
        let harness = Harness::new();
        let id = harness.draft_session().await;

        let err = handler(&harness)
            .handle(join_as(id, PlayerType::Master), CommandMetadata::for_user("bob"))
            .await
            .unwrap_err();

        assert_eq!(err, GameSessionError::MasterAlreadyAssigned);
    }

    #[tokio::test]
    async fn finished_session_cannot_be_joined() {
        let harness = Harness::new();
        let id = harness.running_session().await;
        let mut session = harness.stored(id).await;
        session.finish(&user("gm")).unwrap();
        harness.repository.update(&session).await.unwrap();

        let err = handler(&harness)
            .handle(join_as(id, PlayerType::Player), CommandMetadata::for_user("bob"))
            .await
            .unwrap_err();

        assert!(matches!(err, GameSessionError::InvalidState(_)));
    }
}
