//! Game session repository port.
//!
//! Sessions are persisted whole on every mutation. `update` is guarded by
//! the aggregate's `version` so concurrent writers cannot silently overwrite
//! each other's log entries.

use crate::domain::foundation::{DomainError, GameSessionId, ScheduleId, UserId};
use crate::domain::game_session::GameSession;
use async_trait::async_trait;

#[async_trait]
pub trait GameSessionRepository: Send + Sync {
    /// Save a new session.
    async fn save(&self, session: &GameSession) -> Result<(), DomainError>;

    /// Replace a stored session.
    ///
    /// # Errors
    ///
    /// - `GameSessionNotFound` if the session doesn't exist
    /// - `ConcurrencyConflict` if the stored version differs from `session.version()`
    /// - `StorageError` on persistence failure
    ///
    /// On success the stored version is `session.version() + 1`.
    async fn update(&self, session: &GameSession) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &GameSessionId) -> Result<Option<GameSession>, DomainError>;

    /// Sessions generated from the given schedule, in start order.
    async fn find_by_schedule_id(
        &self,
        schedule_id: &ScheduleId,
    ) -> Result<Vec<GameSession>, DomainError>;

    /// Sessions the user owns or participates in, most recently updated first.
    async fn find_for_user(&self, user_id: &UserId) -> Result<Vec<GameSession>, DomainError>;

    /// # Errors
    ///
    /// - `GameSessionNotFound` if the session doesn't exist
    async fn delete(&self, id: &GameSessionId) -> Result<(), DomainError>;
}
