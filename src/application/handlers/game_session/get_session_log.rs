//! GetSessionLogHandler - Query handler for the merged chat and event log.

use std::sync::Arc;

use crate::domain::foundation::{GameSessionId, Timestamp, UserId};
use crate::domain::game_session::{GameSessionError, LogEntry};
use crate::ports::GameSessionRepository;

use super::support::load;

#[derive(Debug, Clone)]
pub struct GetSessionLogQuery {
    pub session_id: GameSessionId,
    pub user_id: UserId,
    /// Only entries at or after this instant.
    pub since: Option<Timestamp>,
}

pub struct GetSessionLogHandler {
    repository: Arc<dyn GameSessionRepository>,
}

impl GetSessionLogHandler {
    pub fn new(repository: Arc<dyn GameSessionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetSessionLogQuery) -> Result<Vec<LogEntry>, GameSessionError> {
        let session = load(self.repository.as_ref(), query.session_id).await?;
        session.ensure_can_view(&query.user_id)?;
        Ok(session.log(query.since))
    }
}
