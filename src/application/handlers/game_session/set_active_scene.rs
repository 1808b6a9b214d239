//! SetActiveSceneHandler - Master points the table at a scene.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{CommandMetadata, EventId, GameSessionId, SceneId, Timestamp};
use crate::domain::game_session::{ActiveSceneChanged, GameSession, GameSessionError};
use crate::ports::{ContentCatalog, EventPublisher, GameSessionRepository};

use super::support::{load, persist, publish};

/// `scene_id: None` clears the active scene.
#[derive(Debug, Clone)]
pub struct SetActiveSceneCommand {
    pub session_id: GameSessionId,
    pub scene_id: Option<SceneId>,
}

pub struct SetActiveSceneHandler {
    repository: Arc<dyn GameSessionRepository>,
    catalog: Arc<dyn ContentCatalog>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl SetActiveSceneHandler {
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
        cmd: SetActiveSceneCommand,
        metadata: CommandMetadata,
    ) -> Result<GameSession, GameSessionError> {
        let mut session = load(self.repository.as_ref(), cmd.session_id).await?;
        session.ensure_master(&metadata.user_id)?;

        if let Some(scene_id) = cmd.scene_id {
            if !self.catalog.scene_exists(&scene_id).await? {
                return Err(GameSessionError::reference_not_found("Scene not found"));
            }
        }

        if !session.set_scene(&metadata.user_id, cmd.scene_id)? {
            return Ok(session);
        }
        persist(self.repository.as_ref(), &mut session).await?;

        let event = ActiveSceneChanged {
            event_id: EventId::new(),
            session_id: cmd.session_id,
            scene_id: cmd.scene_id,
            changed_by: metadata.user_id.clone(),
            changed_at: Timestamp::now(),
        };
        publish(self.event_publisher.as_ref(), &event, &metadata).await?;

        info!(session_id = %cmd.session_id, scene_id = ?cmd.scene_id, "Active scene changed");
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::super::support::fixtures::*;
    use super::*;

    fn handler(harness: &Harness) -> SetActiveSceneHandler {
        SetActiveSceneHandler::new(
            harness.repository.clone(),
            harness.catalog.clone(),
            harness.bus.clone(),
        )
    }

    #[tokio::test]
    async fn master_sets_known_scene() {
        let harness = Harness::new();
        let id = harness.draft_session().await;
        let scene = SceneId::new();
        harness.catalog.add_scene(scene).await;

        handler(&harness)
            .handle(
                SetActiveSceneCommand {
                    session_id: id,
                    scene_id: Some(scene),
                },
                CommandMetadata::for_user("gm"),
            )
            .await
            .unwrap();

        assert_eq!(harness.stored(id).await.scene_id(), Some(scene));
        assert!(harness.bus.has_event("game_session.scene_changed.v1"));
    }

    #[tokio::test]
    async fn player_cannot_change_scene() {
        let harness = Harness::new();
        let id = harness.draft_session().await;
        let scene = SceneId::new();
        harness.catalog.add_scene(scene).await;

        let err = handler(&harness)
            .handle(
                SetActiveSceneCommand {
                    session_id: id,
                    scene_id: Some(scene),
                },
                CommandMetadata::for_user("alice"),
            )
            .await
            .unwrap_err();

        assert_eq!(err, GameSessionError::master_only());
    }

    #[tokio::test]
    async fn unknown_scene_is_rejected() {
        let harness = Harness::new();
        let id = harness.draft_session().await;

        let err = handler(&harness)
            .handle(
                SetActiveSceneCommand {
                    session_id: id,
                    scene_id: Some(SceneId::new()),
                },
                CommandMetadata::for_user("gm"),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, GameSessionError::ReferenceNotFound(_)));
    }

    #[tokio::test]
    async fn clearing_an_empty_scene_publishes_nothing() {
        let harness = Harness::new();
        let id = harness.draft_session().await;

        handler(&harness)
            .handle(
                SetActiveSceneCommand {
                    session_id: id,
                    scene_id: None,
                },
                CommandMetadata::for_user("gm"),
            )
            .await
            .unwrap();

        assert_eq!(harness.bus.event_count(), 0);
    }
}
