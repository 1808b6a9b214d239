//! SendChatMessageHandler - Append a chat message to the session log.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{CommandMetadata, EventId, GameSessionId};
use crate::domain::game_session::{
    ChatMessageSent, GameSession, GameSessionError, GameSessionMessage, MessageType,
};
use crate::ports::{EventPublisher, GameSessionRepository};

use super::support::{append_with_retry, publish};

#[derive(Debug, Clone)]
pub struct SendChatMessageCommand {
    pub session_id: GameSessionId,
    pub message_type: MessageType,
    pub content: String,
}

pub struct SendChatMessageHandler {
    repository: Arc<dyn GameSessionRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl SendChatMessageHandler {
    pub fn new(
        repository: Arc<dyn GameSessionRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            event_publisher,
        }
    }

    /// Content is checked before the session is loaded, so a blank message
    /// fails the same way whatever the session state.
    pub async fn handle(
        &self,
        cmd: SendChatMessageCommand,
        metadata: CommandMetadata,
    ) -> Result<GameSessionMessage, GameSessionError> {
        GameSession::validate_message_content(&cmd.content)?;

        let sender = &metadata.user_id;
        let (_, message) =
            append_with_retry(self.repository.as_ref(), cmd.session_id, |session| {
                session.post_message(sender, cmd.message_type, &cmd.content)
            })
            .await?;

        let event = ChatMessageSent {
            event_id: EventId::new(),
            session_id: cmd.session_id,
            sent_by: message.sent_by.clone(),
            sent_to: message.sent_to.clone(),
            message_type: message.message_type,
            content: message.content.clone(),
            sent_at: message.sent_at,
        };
        publish(self.event_publisher.as_ref(), &event, &metadata).await?;

        info!(
            session_id = %cmd.session_id,
            sent_by = %message.sent_by,
            recipients = message.sent_to.len(),
            "Chat message sent"
        );
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::super::support::fixtures::*;
    use super::*;
    use crate::domain::foundation::GameSessionStatus;
    use crate::domain::game_session::MAX_MESSAGE_LENGTH;

    fn handler(harness: &Harness) -> SendChatMessageHandler {
        SendChatMessageHandler::new(harness.repository.clone(), harness.bus.clone())
    }

    fn say(session_id: GameSessionId, content: &str) -> SendChatMessageCommand {
        SendChatMessageCommand {
            session_id,
            message_type: MessageType::Chat,
            content: content.to_string(),
        }
    }

    #[tokio::test]
    async fn participant_message_is_appended_and_published() {
        let harness = Harness::new();
        let id = harness.running_session().await;

        let message = handler(&harness)
            .handle(say(id, "I search the room"), CommandMetadata::for_user("alice"))
            .await
            .unwrap();

        assert_eq!(message.sent_by, user("alice"));
        assert_eq!(message.sent_to, vec![user("gm"), user("alice")]);
        assert_eq!(harness.stored(id).await.messages().len(), 1);

        let event = &harness.bus.events_of_type("game_session.message_sent.v1")[0];
        let payload: ChatMessageSent = event.payload_as().unwrap();
        assert_eq!(payload.content, "I search the room");
    }

    #[tokio::test]
    async fn blank_message_fails_before_lookup() {
        let harness = Harness::new();

        let err = handler(&harness)
            .handle(say(GameSessionId::new(), "   "), CommandMetadata::for_user("alice"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            GameSessionError::ValidationFailed { ref field, .. } if field == "content"
        ));
    }

    #[tokio::test]
    async fn oversized_message_is_rejected() {
        let harness = Harness::new();
        let id = harness.running_session().await;
        let content = "x".repeat(MAX_MESSAGE_LENGTH + 1);

        let err = handler(&harness)
            .handle(say(id, &content), CommandMetadata::for_user("alice"))
            .await
            .unwrap_err();

        assert!(matches!(err, GameSessionError::ValidationFailed { .. }));
    }

    #[tokio::test]
    async fn outsider_cannot_send() {
        let harness = Harness::new();
        let id = harness.running_session().await;

        let err = handler(&harness)
            .handle(say(id, "hello"), CommandMetadata::for_user("bob"))
            .await
            .unwrap_err();

        assert_eq!(err, GameSessionError::NotParticipant);
    }

    #[tokio::test]
    async fn draft_session_rejects_messages() {
        let harness = Harness::new();
        let id = harness.draft_session().await;

        let err = handler(&harness)
            .handle(say(id, "hello"), CommandMetadata::for_user("alice"))
            .await
            .unwrap_err();

        assert_eq!(err, GameSessionError::cannot_send_in(GameSessionStatus::Draft));
        assert_eq!(err.message(), "Cannot send messages in Draft session");
    }

    #[tokio::test]
    async fn paused_session_accepts_messages() {
        let harness = Harness::new();
        let id = harness.running_session().await;
        let mut session = harness.stored(id).await;
        session.pause(&user("gm")).unwrap();
        harness.repository.update(&session).await.unwrap();

        let result = handler(&harness)
            .handle(say(id, "brb"), CommandMetadata::for_user("gm"))
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn concurrent_senders_keep_every_message() {
        let harness = Harness::new();
        let id = harness.running_session().await;
        let shared = Arc::new(handler(&harness));

        let mut tasks = Vec::new();
        for (sender, text) in [("gm", "roll initiative"), ("alice", "natural 20")] {
            let handler = shared.clone();
            tasks.push(tokio::spawn(async move {
                handler
                    .handle(say(id, text), CommandMetadata::for_user(sender))
                    .await
            }));
        }
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        assert_eq!(harness.stored(id).await.messages().len(), 2);
    }
}
