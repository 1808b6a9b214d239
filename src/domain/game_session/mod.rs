//! Game session domain module.
//!
//! A game session seats participants around a virtual table and keeps an
//! append-only log of chat messages and game events.
//!
//! # Events
//!
//! - `GameSessionCreated`, `GameSessionUpdated`, `GameSessionDeleted`
//! - `GameSessionStatusChanged` - start, pause, resume, finish
//! - `ParticipantAdded`, `ParticipantRemoved`
//! - `ActiveSceneChanged`, `ActiveEncounterChanged`
//! - `ChatMessageSent`, `GameEventRecorded`

mod aggregate;
mod errors;
mod events;
mod log;
mod participant;

pub use aggregate::{GameSession, MAX_TITLE_LENGTH};
pub use errors::GameSessionError;
pub use events::{
    ActiveEncounterChanged, ActiveSceneChanged, ChatMessageSent, GameEventRecorded,
    GameSessionCreated, GameSessionDeleted, GameSessionStatusChanged, GameSessionUpdated,
    ParticipantAdded, ParticipantRemoved,
};
pub use log::{
    merge_log, GameSessionEvent, GameSessionMessage, LogEntry, MessageType, MAX_EVENT_TYPE_LENGTH,
    MAX_MESSAGE_LENGTH,
};
pub use participant::{count_masters, Participant, PlayerType};
