//! GameSession aggregate.
//!
//! A game session is one sitting at the virtual table: who is playing, what
//! they said, what happened, and which scene and encounter are on screen.
//!
//! # Invariants
//!
//! - `title` is 1-128 characters after trimming
//! - at most one participant holds the `Master` role
//! - `messages` and `events` are append-only
//! - log entries are accepted only while `InProgress` or `Paused`
//! - participants cannot change once `Finished`

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::domain::foundation::{
    EncounterId, GameSessionId, GameSessionStatus, OwnedByUser, SceneId, ScheduleId,
    StateMachine, Timestamp, UserId,
};

use super::log::{merge_log, MAX_EVENT_TYPE_LENGTH, MAX_MESSAGE_LENGTH};
use super::participant::count_masters;
use super::{
    GameSessionError, GameSessionEvent, GameSessionMessage, LogEntry, MessageType, Participant,
    PlayerType,
};

/// Maximum length for session title.
pub const MAX_TITLE_LENGTH: usize = 128;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    id: GameSessionId,
    owner_id: UserId,
    title: String,
    status: GameSessionStatus,
    players: Vec<Participant>,
    #[serde(default)]
    messages: Vec<GameSessionMessage>,
    #[serde(default)]
    events: Vec<GameSessionEvent>,
    scene_id: Option<SceneId>,
    encounter_id: Option<EncounterId>,
    /// Schedule this session was generated from, if any.
    schedule_id: Option<ScheduleId>,
    /// Planned start for scheduled sessions.
    starts_at: Option<Timestamp>,
    created_at: Timestamp,
    updated_at: Timestamp,
    /// Optimistic concurrency token, advanced by every stored update.
    #[serde(default)]
    version: u64,
}

impl GameSession {
    /// Create a draft session with the owner seated as Master.
    pub fn new(
        id: GameSessionId,
        owner_id: UserId,
        title: &str,
    ) -> Result<Self, GameSessionError> {
        let title = Self::validate_title(title)?;
        let now = Timestamp::now();

        Ok(Self {
            id,
            players: vec![Participant::master(owner_id.clone())],
            owner_id,
            title,
            status: GameSessionStatus::Draft,
            messages: Vec::new(),
            events: Vec::new(),
            scene_id: None,
            encounter_id: None,
            schedule_id: None,
            starts_at: None,
            created_at: now,
            updated_at: now,
            version: 0,
        })
    }

    /// Create a `Scheduled` session for one occurrence of a schedule.
    ///
    /// Participants are copied from the schedule. When none of them is a
    /// Master the owner's seat is promoted.
    pub fn from_schedule(
        id: GameSessionId,
        owner_id: UserId,
        title: &str,
        schedule_id: ScheduleId,
        starts_at: Timestamp,
        participants: &[Participant],
    ) -> Result<Self, GameSessionError> {
        if count_masters(participants) > 1 {
            return Err(GameSessionError::MasterAlreadyAssigned);
        }

        let mut session = Self::new(id, owner_id, title)?;
        let mut players = participants.to_vec();
        if count_masters(&players) == 0 {
            match players.iter().position(|p| p.user_id == session.owner_id) {
                Some(index) => players[index].player_type = PlayerType::Master,
                None => players.insert(0, Participant::master(session.owner_id.clone())),
            }
        }

        session.players = players;
        session.status = GameSessionStatus::Scheduled;
        session.schedule_id = Some(schedule_id);
        session.starts_at = Some(starts_at);
        Ok(session)
    }

    fn validate_title(title: &str) -> Result<String, GameSessionError> {
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return Err(GameSessionError::validation("title", "Title cannot be empty"));
        }
        let len = trimmed.chars().count();
        if len > MAX_TITLE_LENGTH {
            return Err(GameSessionError::validation(
                "title",
                format!("Title cannot exceed {} characters", MAX_TITLE_LENGTH),
            ));
        }
        Ok(trimmed.to_string())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &GameSessionId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn status(&self) -> GameSessionStatus {
        self.status
    }

    pub fn players(&self) -> &[Participant] {
        &self.players
    }

    pub fn messages(&self) -> &[GameSessionMessage] {
        &self.messages
    }

    pub fn events(&self) -> &[GameSessionEvent] {
        &self.events
    }

    pub fn scene_id(&self) -> Option<SceneId> {
        self.scene_id
    }

    pub fn encounter_id(&self) -> Option<EncounterId> {
        self.encounter_id
    }

    pub fn schedule_id(&self) -> Option<ScheduleId> {
        self.schedule_id
    }

    pub fn starts_at(&self) -> Option<Timestamp> {
        self.starts_at
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Called by storage after a successful versioned write.
    pub fn advance_version(&mut self) {
        self.version += 1;
    }

    /// Participant IDs in seating order.
    pub fn participant_ids(&self) -> Vec<UserId> {
        self.players.iter().map(|p| p.user_id.clone()).collect()
    }

    pub fn participant(&self, user_id: &UserId) -> Option<&Participant> {
        self.players.iter().find(|p| &p.user_id == user_id)
    }

    pub fn master(&self) -> Option<&Participant> {
        self.players.iter().find(|p| p.is_master())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Authorization
    // ─────────────────────────────────────────────────────────────────────────

    pub fn is_participant(&self, user_id: &UserId) -> bool {
        self.participant(user_id).is_some()
    }

    pub fn is_master(&self, user_id: &UserId) -> bool {
        self.participant(user_id).is_some_and(Participant::is_master)
    }

    /// Owner or participant.
    pub fn can_view(&self, user_id: &UserId) -> bool {
        self.is_owner(user_id) || self.is_participant(user_id)
    }

    pub fn ensure_can_view(&self, user_id: &UserId) -> Result<(), GameSessionError> {
        if self.can_view(user_id) {
            Ok(())
        } else {
            Err(GameSessionError::NotParticipant)
        }
    }

    pub fn ensure_owner(&self, user_id: &UserId) -> Result<(), GameSessionError> {
        if self.is_owner(user_id) {
            Ok(())
        } else {
            Err(GameSessionError::Forbidden(
                "Only the session owner can modify the session".to_string(),
            ))
        }
    }

    pub fn ensure_master(&self, user_id: &UserId) -> Result<(), GameSessionError> {
        if self.is_master(user_id) {
            Ok(())
        } else {
            Err(GameSessionError::master_only())
        }
    }

    /// Owner check plus the finished-session guard for participant management.
    pub fn ensure_can_manage_participants(
        &self,
        user_id: &UserId,
    ) -> Result<(), GameSessionError> {
        if !self.is_owner(user_id) {
            return Err(GameSessionError::owner_only());
        }
        if self.status.is_finished() {
            return Err(GameSessionError::invalid_state(
                "Cannot add participants to a finished session",
            ));
        }
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Details
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns `false` when the trimmed title is unchanged.
    pub fn rename(&mut self, title: &str) -> Result<bool, GameSessionError> {
        let title = Self::validate_title(title)?;
        if title == self.title {
            return Ok(false);
        }
        self.title = title;
        self.touch();
        Ok(true)
    }

    /// Master-only. Returns `false` when the scene is unchanged.
    pub fn set_scene(
        &mut self,
        actor: &UserId,
        scene_id: Option<SceneId>,
    ) -> Result<bool, GameSessionError> {
        self.ensure_master(actor)?;
        if self.scene_id == scene_id {
            return Ok(false);
        }
        self.scene_id = scene_id;
        self.touch();
        Ok(true)
    }

    /// Master-only. Returns `false` when the encounter is unchanged.
    pub fn set_encounter(
        &mut self,
        actor: &UserId,
        encounter_id: Option<EncounterId>,
    ) -> Result<bool, GameSessionError> {
        self.ensure_master(actor)?;
        self.replace_encounter(encounter_id)
    }

    /// Owner path for the encounter, used by session updates.
    pub fn replace_encounter(
        &mut self,
        encounter_id: Option<EncounterId>,
    ) -> Result<bool, GameSessionError> {
        if self.encounter_id == encounter_id {
            return Ok(false);
        }
        self.encounter_id = encounter_id;
        self.touch();
        Ok(true)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Participants
    // ─────────────────────────────────────────────────────────────────────────

    /// Seat the caller. Returns `false` if they were already seated.
    pub fn join(
        &mut self,
        user_id: UserId,
        player_type: PlayerType,
    ) -> Result<bool, GameSessionError> {
        if self.status.is_finished() {
            return Err(GameSessionError::invalid_state("Cannot join a finished session"));
        }
        if self.is_participant(&user_id) {
            return Ok(false);
        }
        self.seat(Participant::new(user_id, player_type))?;
        Ok(true)
    }

    /// Remove the caller. Returns `false` if they were not seated.
    pub fn leave(&mut self, user_id: &UserId) -> Result<bool, GameSessionError> {
        let Some(participant) = self.participant(user_id) else {
            return Ok(false);
        };
        if participant.is_master() {
            return Err(GameSessionError::CannotRemoveMaster);
        }
        if self.status.is_finished() {
            return Err(GameSessionError::invalid_state(
                "Cannot modify participants in finished session",
            ));
        }
        self.players.retain(|p| &p.user_id != user_id);
        self.touch();
        Ok(true)
    }

    /// Owner adds another user. The caller checks that the user exists.
    pub fn add_participant(
        &mut self,
        actor: &UserId,
        participant: Participant,
    ) -> Result<(), GameSessionError> {
        self.ensure_can_manage_participants(actor)?;
        if self.is_participant(&participant.user_id) {
            return Err(GameSessionError::AlreadyParticipant);
        }
        self.seat(participant)
    }

    /// Owner removes a participant. The Master can never be removed.
    pub fn remove_participant(
        &mut self,
        actor: &UserId,
        user_id: &UserId,
    ) -> Result<Participant, GameSessionError> {
        if !self.is_owner(actor) {
            return Err(GameSessionError::owner_only());
        }
        if self.status.is_finished() {
            return Err(GameSessionError::invalid_state(
                "Cannot modify participants in finished session",
            ));
        }
        let index = self
            .players
            .iter()
            .position(|p| &p.user_id == user_id)
            .ok_or(GameSessionError::NotParticipant)?;
        if self.players[index].is_master() {
            return Err(GameSessionError::CannotRemoveMaster);
        }

        let removed = self.players.remove(index);
        self.touch();
        Ok(removed)
    }

    fn seat(&mut self, participant: Participant) -> Result<(), GameSessionError> {
        if participant.is_master() && self.master().is_some() {
            return Err(GameSessionError::MasterAlreadyAssigned);
        }
        self.players.push(participant);
        self.touch();
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    /// Master starts play. Starting a running session is a no-op (`None`).
    pub fn start(
        &mut self,
        actor: &UserId,
    ) -> Result<Option<GameSessionStatus>, GameSessionError> {
        self.ensure_master(actor)?;
        match self.status {
            GameSessionStatus::InProgress => Ok(None),
            GameSessionStatus::Draft | GameSessionStatus::Scheduled => {
                self.move_to(GameSessionStatus::InProgress).map(Some)
            }
            other => Err(GameSessionError::invalid_state(format!(
                "Cannot start a session that is {}",
                other
            ))),
        }
    }

    pub fn pause(&mut self, actor: &UserId) -> Result<GameSessionStatus, GameSessionError> {
        self.ensure_master(actor)?;
        self.move_to(GameSessionStatus::Paused)
    }

    pub fn resume(&mut self, actor: &UserId) -> Result<GameSessionStatus, GameSessionError> {
        self.ensure_master(actor)?;
        if self.status != GameSessionStatus::Paused {
            return Err(GameSessionError::invalid_state(format!(
                "Cannot resume a session that is {}",
                self.status
            )));
        }
        self.move_to(GameSessionStatus::InProgress)
    }

    /// Master ends play. Finishing twice is a no-op (`None`).
    pub fn finish(
        &mut self,
        actor: &UserId,
    ) -> Result<Option<GameSessionStatus>, GameSessionError> {
        self.ensure_master(actor)?;
        if self.status.is_finished() {
            return Ok(None);
        }
        self.move_to(GameSessionStatus::Finished).map(Some)
    }

    /// Returns the previous status.
    fn move_to(
        &mut self,
        target: GameSessionStatus,
    ) -> Result<GameSessionStatus, GameSessionError> {
        let next = self
            .status
            .transition_to(target)
            .map_err(|_| {
                GameSessionError::invalid_state(format!(
                    "Cannot move session from {} to {}",
                    self.status, target
                ))
            })?;
        let previous = std::mem::replace(&mut self.status, next);
        self.touch();
        Ok(previous)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Log
    // ─────────────────────────────────────────────────────────────────────────

    /// Validates chat content without touching the session.
    pub fn validate_message_content(content: &str) -> Result<(), GameSessionError> {
        if content.trim().is_empty() {
            return Err(GameSessionError::validation(
                "content",
                "Message content cannot be empty",
            ));
        }
        if content.chars().count() > MAX_MESSAGE_LENGTH {
            return Err(GameSessionError::validation(
                "content",
                format!("Message content cannot exceed {} characters", MAX_MESSAGE_LENGTH),
            ));
        }
        Ok(())
    }

    /// Validates and normalizes a game event type.
    pub fn validate_event_type(event_type: &str) -> Result<String, GameSessionError> {
        let trimmed = event_type.trim();
        if trimmed.is_empty() {
            return Err(GameSessionError::validation(
                "event_type",
                "EventType cannot be empty",
            ));
        }
        if trimmed.chars().count() > MAX_EVENT_TYPE_LENGTH {
            return Err(GameSessionError::validation(
                "event_type",
                format!("EventType cannot exceed {} characters", MAX_EVENT_TYPE_LENGTH),
            ));
        }
        Ok(trimmed.to_string())
    }

    /// Append a chat message addressed to everyone currently seated.
    pub fn post_message(
        &mut self,
        sender: &UserId,
        message_type: MessageType,
        content: &str,
    ) -> Result<GameSessionMessage, GameSessionError> {
        Self::validate_message_content(content)?;
        if !self.is_participant(sender) {
            return Err(GameSessionError::NotParticipant);
        }
        if !self.status.accepts_log_entries() {
            return Err(GameSessionError::cannot_send_in(self.status));
        }

        let message = GameSessionMessage {
            sent_by: sender.clone(),
            sent_at: Timestamp::now(),
            sent_to: self.participant_ids(),
            message_type,
            content: content.to_string(),
        };
        self.messages.push(message.clone());
        self.touch();
        Ok(message)
    }

    /// Append a structured game event.
    ///
    /// Any caller may record; seating is not required.
    pub fn record_event(
        &mut self,
        event_type: &str,
        payload: JsonValue,
    ) -> Result<GameSessionEvent, GameSessionError> {
        let event_type = Self::validate_event_type(event_type)?;
        if !self.status.accepts_log_entries() {
            return Err(GameSessionError::cannot_record_events());
        }

        let event = GameSessionEvent {
            timestamp: Timestamp::now(),
            event_type,
            payload,
        };
        self.events.push(event.clone());
        self.touch();
        Ok(event)
    }

    /// Messages and events merged in time order, optionally from `since` on.
    pub fn log(&self, since: Option<Timestamp>) -> Vec<LogEntry> {
        merge_log(&self.messages, &self.events, since)
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}

impl OwnedByUser for GameSession {
    fn owner_id(&self) -> &UserId {
        &self.owner_id
    }
}
