//! File-backed game session repository.
//!
//! Stores each session as `<data_dir>/game_sessions/<id>.yaml`.

use async_trait::async_trait;
use std::path::Path;
use tracing::debug;

use crate::domain::foundation::{DomainError, GameSessionId, ScheduleId, UserId};
use crate::domain::game_session::GameSession;
use crate::ports::GameSessionRepository;

use super::in_memory_game_session_repository::session_not_found;
use super::yaml_store::YamlStore;
use super::{already_exists, check_version, sort_by_start, sort_for_listing};

#[derive(Debug)]
pub struct FileGameSessionRepository {
    store: YamlStore,
}

impl FileGameSessionRepository {
    /// ```ignore
    /// let repo = FileGameSessionRepository::new("./data");
    /// ```
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            store: YamlStore::new(data_dir.as_ref().join("game_sessions")),
        }
    }
}

#[async_trait]
impl GameSessionRepository for FileGameSessionRepository {
    async fn save(&self, session: &GameSession) -> Result<(), DomainError> {
        let _guard = self.store.lock().await;
        if self.store.exists(session.id()).await? {
            return Err(already_exists("Game session", session.id()));
        }
        self.store.write(session.id(), session).await?;
        debug!(session_id = %session.id(), "Game session saved");
        Ok(())
    }

    async fn update(&self, session: &GameSession) -> Result<(), DomainError> {
        let _guard = self.store.lock().await;
        let stored: GameSession = self
            .store
            .read(session.id())
            .await?
            .ok_or_else(|| session_not_found(session.id()))?;
        check_version(session.id(), stored.version(), session.version())?;

        let mut next = session.clone();
        next.advance_version();
        self.store.write(session.id(), &next).await?;
        debug!(session_id = %session.id(), version = next.version(), "Game session updated");
        Ok(())
    }

    async fn find_by_id(&self, id: &GameSessionId) -> Result<Option<GameSession>, DomainError> {
        self.store.read(id).await
    }

    async fn find_by_schedule_id(
        &self,
        schedule_id: &ScheduleId,
    ) -> Result<Vec<GameSession>, DomainError> {
        let mut found: Vec<GameSession> = self
            .store
            .read_all::<GameSession>()
            .await?
            .into_iter()
            .filter(|s| s.schedule_id() == Some(*schedule_id))
            .collect();
        sort_by_start(&mut found);
        Ok(found)
    }

    async fn find_for_user(&self, user_id: &UserId) -> Result<Vec<GameSession>, DomainError> {
        let mut found: Vec<GameSession> = self
            .store
            .read_all::<GameSession>()
            .await?
            .into_iter()
            .filter(|s| s.can_view(user_id))
            .collect();
        sort_for_listing(&mut found);
        Ok(found)
    }

    async fn delete(&self, id: &GameSessionId) -> Result<(), DomainError> {
        let _guard = self.store.lock().await;
        if self.store.remove(id).await? {
            Ok(())
        } else {
            Err(session_not_found(id))
        }
    }
}
