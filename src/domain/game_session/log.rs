//! Chat messages and game events: the append-only session log.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;

use crate::domain::foundation::{Timestamp, UserId};

/// Maximum length for chat message content, in characters.
pub const MAX_MESSAGE_LENGTH: usize = 4096;

/// Maximum length for a game event type.
pub const MAX_EVENT_TYPE_LENGTH: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    Text,
    /// A slash command such as a dice roll, interpreted by clients.
    Command,
    #[default]
    Chat,
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MessageType::Text => "Text",
            MessageType::Command => "Command",
            MessageType::Chat => "Chat",
        };
        write!(f, "{}", s)
    }
}

/// A chat message as stored in the session log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSessionMessage {
    pub sent_by: UserId,
    /// Assigned by the server when the message is appended.
    pub sent_at: Timestamp,
    /// Participants present when the message was sent.
    pub sent_to: Vec<UserId>,
    pub message_type: MessageType,
    pub content: String,
}

/// A structured game event such as a dice roll or initiative change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSessionEvent {
    pub timestamp: Timestamp,
    pub event_type: String,
    #[serde(default)]
    pub payload: JsonValue,
}

impl GameSessionEvent {
    /// Human-readable form, `"{type}: {payload}"`.
    pub fn description(&self) -> String {
        format!("{}: {}", self.event_type, self.payload)
    }
}

/// One entry of the merged, time-ordered session log.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LogEntry {
    Message(GameSessionMessage),
    Event(GameSessionEvent),
}

impl LogEntry {
    pub fn timestamp(&self) -> Timestamp {
        match self {
            LogEntry::Message(m) => m.sent_at,
            LogEntry::Event(e) => e.timestamp,
        }
    }
}

/// Merges messages and events into one list ordered by timestamp.
///
/// The sort is stable: entries with equal timestamps keep insertion order,
/// messages ahead of events.
pub fn merge_log(
    messages: &[GameSessionMessage],
    events: &[GameSessionEvent],
    since: Option<Timestamp>,
) -> Vec<LogEntry> {
    let keep = |ts: &Timestamp| since.map_or(true, |s| !ts.is_before(&s));

    let mut entries: Vec<LogEntry> = messages
        .iter()
        .filter(|m| keep(&m.sent_at))
        .cloned()
        .map(LogEntry::Message)
        .chain(
            events
                .iter()
                .filter(|e| keep(&e.timestamp))
                .cloned()
                .map(LogEntry::Event),
        )
        .collect();

    entries.sort_by_key(LogEntry::timestamp);
    entries
}
