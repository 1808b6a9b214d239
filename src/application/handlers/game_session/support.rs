//! Load and persist steps shared by the game session handlers.

use tracing::debug;

use crate::domain::foundation::GameSessionId;
use crate::domain::game_session::{GameSession, GameSessionError};
use crate::ports::GameSessionRepository;

pub(super) use super::super::publish;

/// Attempts made by append-only commands before a conflict is surfaced.
pub(super) const MAX_APPEND_ATTEMPTS: u32 = 3;

pub(super) async fn load(
    repository: &dyn GameSessionRepository,
    id: GameSessionId,
) -> Result<GameSession, GameSessionError> {
    repository
        .find_by_id(&id)
        .await?
        .ok_or_else(|| GameSessionError::not_found(id))
}

/// Stores a modified session and advances the in-hand copy to the stored
/// version.
pub(super) async fn persist(
    repository: &dyn GameSessionRepository,
    session: &mut GameSession,
) -> Result<(), GameSessionError> {
    repository.update(session).await?;
    session.advance_version();
    Ok(())
}

/// Reload, mutate and persist, retrying on a version conflict.
///
/// `mutate` must be free of side effects outside the session since it can
/// run more than once.
pub(super) async fn append_with_retry<T, F>(
    repository: &dyn GameSessionRepository,
    id: GameSessionId,
    mut mutate: F,
) -> Result<(GameSession, T), GameSessionError>
where
    F: FnMut(&mut GameSession) -> Result<T, GameSessionError>,
{
    let mut attempt = 1;
    loop {
        let mut session = load(repository, id).await?;
        let output = mutate(&mut session)?;
        match persist(repository, &mut session).await {
            Ok(()) => return Ok((session, output)),
            Err(GameSessionError::Conflict(_)) if attempt < MAX_APPEND_ATTEMPTS => {
                debug!(session_id = %id, attempt, "Version conflict on append, retrying");
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}
