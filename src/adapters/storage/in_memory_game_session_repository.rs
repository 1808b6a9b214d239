//! In-memory game session repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, GameSessionId, ScheduleId, UserId};
use crate::domain::game_session::GameSession;
use crate::ports::GameSessionRepository;

use super::{already_exists, check_version, sort_for_listing, sort_by_start};

#[derive(Debug, Clone, Default)]
pub struct InMemoryGameSessionRepository {
    sessions: Arc<RwLock<HashMap<GameSessionId, GameSession>>>,
}

impl InMemoryGameSessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

pub(crate) fn session_not_found(id: &GameSessionId) -> DomainError {
    DomainError::new(ErrorCode::GameSessionNotFound, "Game session not found")
        .with_detail("session_id", id.to_string())
}

#[async_trait]
impl GameSessionRepository for InMemoryGameSessionRepository {
    async fn save(&self, session: &GameSession) -> Result<(), DomainError> {
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(session.id()) {
            return Err(already_exists("Game session", session.id()));
        }
        sessions.insert(*session.id(), session.clone());
        Ok(())
    }

    async fn update(&self, session: &GameSession) -> Result<(), DomainError> {
        let mut sessions = self.sessions.write().await;
        let stored = sessions
            .get(session.id())
            .ok_or_else(|| session_not_found(session.id()))?;
        check_version(session.id(), stored.version(), session.version())?;

        let mut next = session.clone();
        next.advance_version();
        sessions.insert(*session.id(), next);
        Ok(())
    }

    async fn find_by_id(&self, id: &GameSessionId) -> Result<Option<GameSession>, DomainError> {
        Ok(self.sessions.read().await.get(id).cloned())
    }

    async fn find_by_schedule_id(
        &self,
        schedule_id: &ScheduleId,
    ) -> Result<Vec<GameSession>, DomainError> {
        let mut found: Vec<GameSession> = self
            .sessions
            .read()
            .await
            .values()
            .filter(|s| s.schedule_id() == Some(*schedule_id))
            .cloned()
            .collect();
        sort_by_start(&mut found);
        Ok(found)
    }

    async fn find_for_user(&self, user_id: &UserId) -> Result<Vec<GameSession>, DomainError> {
        let mut found: Vec<GameSession> = self
            .sessions
            .read()
            .await
            .values()
            .filter(|s| s.can_view(user_id))
            .cloned()
            .collect();
        sort_for_listing(&mut found);
        Ok(found)
    }

    async fn delete(&self, id: &GameSessionId) -> Result<(), DomainError> {
        self.sessions
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| session_not_found(id))
    }
}
