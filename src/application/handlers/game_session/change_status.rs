//! ChangeGameSessionStatusHandler - Start, pause, resume and finish.
//!
//! All four transitions are Master-only. Starting a running session and
//! finishing a finished one succeed without persisting or publishing.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::foundation::{
    CommandMetadata, EventId, GameSessionId, GameSessionStatus, Timestamp,
};
use crate::domain::game_session::{GameSession, GameSessionError, GameSessionStatusChanged};
use crate::ports::{EventPublisher, GameSessionRepository};

use super::support::{load, persist, publish};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusAction {
    Start,
    Pause,
    Resume,
    Finish,
}

#[derive(Debug, Clone)]
pub struct ChangeGameSessionStatusCommand {
    pub session_id: GameSessionId,
    pub action: StatusAction,
}

impl ChangeGameSessionStatusCommand {
    pub fn start(session_id: GameSessionId) -> Self {
        Self {
            session_id,
            action: StatusAction::Start,
        }
    }

    pub fn pause(session_id: GameSessionId) -> Self {
        Self {
            session_id,
            action: StatusAction::Pause,
        }
    }

    pub fn resume(session_id: GameSessionId) -> Self {
        Self {
            session_id,
            action: StatusAction::Resume,
        }
    }

    pub fn finish(session_id: GameSessionId) -> Self {
        Self {
            session_id,
            action: StatusAction::Finish,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChangeGameSessionStatusResult {
    pub session: GameSession,
    /// `None` when the session was already in the requested state.
    pub event: Option<GameSessionStatusChanged>,
}

pub struct ChangeGameSessionStatusHandler {
    repository: Arc<dyn GameSessionRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl ChangeGameSessionStatusHandler {
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
        cmd: ChangeGameSessionStatusCommand,
        metadata: CommandMetadata,
    ) -> Result<ChangeGameSessionStatusResult, GameSessionError> {
        let mut session = load(self.repository.as_ref(), cmd.session_id).await?;
        let actor = &metadata.user_id;

        let previous: Option<GameSessionStatus> = match cmd.action {
            StatusAction::Start => session.start(actor)?,
            StatusAction::Pause => Some(session.pause(actor)?),
            StatusAction::Resume => Some(session.resume(actor)?),
            StatusAction::Finish => session.finish(actor)?,
        };

        let Some(from) = previous else {
            debug!(session_id = %cmd.session_id, action = ?cmd.action, "Status unchanged");
            return Ok(ChangeGameSessionStatusResult {
                session,
                event: None,
            });
        };

        persist(self.repository.as_ref(), &mut session).await?;

        let event = GameSessionStatusChanged {
            event_id: EventId::new(),
            session_id: cmd.session_id,
            changed_by: actor.clone(),
            from,
            to: session.status(),
            changed_at: Timestamp::now(),
        };
        publish(self.event_publisher.as_ref(), &event, &metadata).await?;

        info!(
            session_id = %cmd.session_id,
            from = %from,
            to = %session.status(),
            "Game session status changed"
        );
        Ok(ChangeGameSessionStatusResult {
            session,
            event: Some(event),
        })
    }
}
