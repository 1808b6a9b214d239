//! Foundation module - Shared domain primitives.
//!
//! Identifiers, timestamps, status enums, error types and event plumbing
//! shared by the game session and schedule aggregates.

mod command;
mod errors;
mod events;
mod game_session_status;
mod ids;
mod ownership;
mod state_machine;
mod timestamp;

pub use command::CommandMetadata;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use events::{
    domain_event, DomainEvent, EventEnvelope, EventId, EventMetadata, SerializableDomainEvent,
};
pub use game_session_status::GameSessionStatus;
pub use ids::{CalendarEventId, EncounterId, GameSessionId, SceneId, ScheduleId, UserId};
pub use ownership::OwnedByUser;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
