//! ListGameSessionsHandler - Query handler for a user's tables.

use std::sync::Arc;

use crate::domain::foundation::{GameSessionStatus, UserId};
use crate::domain::game_session::{GameSession, GameSessionError};
use crate::ports::GameSessionRepository;

/// Sessions the user owns or sits in, most recently updated first.
#[derive(Debug, Clone)]
pub struct ListGameSessionsQuery {
    pub user_id: UserId,
    pub status: Option<GameSessionStatus>,
}

impl ListGameSessionsQuery {
    pub fn all(user_id: UserId) -> Self {
        Self {
            user_id,
            status: None,
        }
    }

    pub fn with_status(mut self, status: GameSessionStatus) -> Self {
        self.status = Some(status);
        self
    }
}

pub struct ListGameSessionsHandler {
    repository: Arc<dyn GameSessionRepository>,
}

impl ListGameSessionsHandler {
    pub fn new(repository: Arc<dyn GameSessionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        query: ListGameSessionsQuery,
    ) -> Result<Vec<GameSession>, GameSessionError> {
        let mut sessions = self.repository.find_for_user(&query.user_id).await?;
        if let Some(status) = query.status {
            sessions.retain(|s| s.status() == status);
        }
        Ok(sessions)
    }
}

#[cfg(test)]
mod tests {
    use super::super::support::fixtures::*;
    use super::*;

    #[tokio::test]
    async fn lists_sessions_for_participant_only() {
        let harness = Harness::new();
        let first = harness.draft_session().await;
        let second = harness.running_session().await;
        let handler = ListGameSessionsHandler::new(harness.repository.clone());

        let alice = handler
            .handle(ListGameSessionsQuery::all(user("alice")))
            .await
            .unwrap();
        let bob = handler
            .handle(ListGameSessionsQuery::all(user("bob")))
            .await
            .unwrap();

        let ids: Vec<_> = alice.iter().map(|s| *s.id()).collect();
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&first) && ids.contains(&second));
        assert!(bob.is_empty());
    }

    #[tokio::test]
    async fn status_filter_narrows_results() {
        let harness = Harness::new();
        harness.draft_session().await;
        let running = harness.running_session().await;
        let handler = ListGameSessionsHandler::new(harness.repository.clone());

        let sessions = handler
            .handle(ListGameSessionsQuery::all(user("gm")).with_status(GameSessionStatus::InProgress))
            .await
            .unwrap();

        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].id(), &running);
    }
}
