//! GetGameSessionHandler - Query handler for a single session.

use std::sync::Arc;

use crate::domain::foundation::{GameSessionId, UserId};
use crate::domain::game_session::{GameSession, GameSessionError};
use crate::ports::GameSessionRepository;

use super::support::load;

#[derive(Debug, Clone)]
pub struct GetGameSessionQuery {
    pub session_id: GameSessionId,
    pub user_id: UserId,
}

pub struct GetGameSessionHandler {
    repository: Arc<dyn GameSessionRepository>,
}

impl GetGameSessionHandler {
    pub fn new(repository: Arc<dyn GameSessionRepository>) -> Self {
        Self { repository }
    }

    /// Visible to the owner and seated participants only.
    pub async fn handle(&self, query: GetGameSessionQuery) -> Result<GameSession, GameSessionError> {
        let session = load(self.repository.as_ref(), query.session_id).await?;
        session.ensure_can_view(&query.user_id)?;
        Ok(session)
    }
}
