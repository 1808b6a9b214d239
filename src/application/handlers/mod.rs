//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod game_session;
pub mod schedule;

pub use game_session::*;
pub use schedule::*;

use crate::domain::foundation::{CommandMetadata, DomainError, SerializableDomainEvent};
use crate::ports::EventPublisher;

/// Wraps an event in an envelope stamped with the command's correlation id
/// and caller, then publishes it.
pub(crate) async fn publish<E: SerializableDomainEvent>(
    publisher: &dyn EventPublisher,
    event: &E,
    metadata: &CommandMetadata,
) -> Result<(), DomainError> {
    let envelope = event
        .to_envelope()?
        .with_correlation_id(metadata.correlation_id())
        .with_user_id(metadata.user_id.to_string());
    publisher.publish(envelope).await
}
