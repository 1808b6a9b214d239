//! Game session error types.

use crate::domain::foundation::{DomainError, ErrorCode, GameSessionId, GameSessionStatus};

/// Errors returned by game session operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameSessionError {
    /// Session was not found.
    NotFound(GameSessionId),
    /// Caller lacks the owner or Master role required for the operation.
    Forbidden(String),
    /// Caller is not a participant of the session.
    NotParticipant,
    /// User is already a participant.
    AlreadyParticipant,
    /// A second Master would violate the one-Master rule.
    MasterAlreadyAssigned,
    /// The Master cannot be removed or leave.
    CannotRemoveMaster,
    /// Operation not allowed in the current status.
    InvalidState(String),
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// A referenced user, scene or encounter does not exist.
    ReferenceNotFound(String),
    /// The session changed concurrently.
    Conflict(String),
    /// Infrastructure error.
    Infrastructure(String),
}

impl GameSessionError {
    pub fn not_found(id: GameSessionId) -> Self {
        GameSessionError::NotFound(id)
    }

    pub fn owner_only() -> Self {
        GameSessionError::Forbidden("Only the session owner can manage participants".to_string())
    }

    pub fn master_only() -> Self {
        GameSessionError::Forbidden("Only the Game Master can modify the session".to_string())
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        GameSessionError::InvalidState(message.into())
    }

    /// Status does not accept chat messages.
    pub fn cannot_send_in(status: GameSessionStatus) -> Self {
        GameSessionError::InvalidState(format!("Cannot send messages in {} session", status))
    }

    /// Status does not accept game events.
    pub fn cannot_record_events() -> Self {
        GameSessionError::InvalidState(
            "Events can only be recorded for InProgress or Paused sessions".to_string(),
        )
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        GameSessionError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn reference_not_found(message: impl Into<String>) -> Self {
        GameSessionError::ReferenceNotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        GameSessionError::Conflict(message.into())
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        GameSessionError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            GameSessionError::NotFound(_) => ErrorCode::GameSessionNotFound,
            GameSessionError::Forbidden(_) => ErrorCode::Forbidden,
            GameSessionError::NotParticipant => ErrorCode::ParticipantNotFound,
            GameSessionError::AlreadyParticipant => ErrorCode::DuplicateParticipant,
            GameSessionError::MasterAlreadyAssigned => ErrorCode::MasterRoleViolation,
            GameSessionError::CannotRemoveMaster => ErrorCode::MasterRoleViolation,
            GameSessionError::InvalidState(_) => ErrorCode::InvalidStateTransition,
            GameSessionError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            GameSessionError::ReferenceNotFound(_) => ErrorCode::ReferenceNotFound,
            GameSessionError::Conflict(_) => ErrorCode::ConcurrencyConflict,
            GameSessionError::Infrastructure(_) => ErrorCode::StorageError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            GameSessionError::NotFound(_) => "Game session not found".to_string(),
            GameSessionError::Forbidden(msg) => msg.clone(),
            GameSessionError::NotParticipant => {
                "User is not a participant in this session".to_string()
            }
            GameSessionError::AlreadyParticipant => {
                "This user is already a participant in the session".to_string()
            }
            GameSessionError::MasterAlreadyAssigned => {
                "A session can only have one participant with the Master role".to_string()
            }
            GameSessionError::CannotRemoveMaster => {
                "Cannot remove Game Master from session".to_string()
            }
            GameSessionError::InvalidState(msg) => msg.clone(),
            GameSessionError::ValidationFailed { message, .. } => message.clone(),
            GameSessionError::ReferenceNotFound(msg) => msg.clone(),
            GameSessionError::Conflict(msg) => format!("Concurrent modification: {}", msg),
            GameSessionError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for GameSessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for GameSessionError {}

impl From<DomainError> for GameSessionError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Forbidden => GameSessionError::Forbidden(err.message),
            ErrorCode::ConcurrencyConflict => GameSessionError::Conflict(err.message),
            ErrorCode::ReferenceNotFound => GameSessionError::ReferenceNotFound(err.message),
            ErrorCode::InvalidStateTransition => GameSessionError::InvalidState(err.message),
            ErrorCode::ValidationFailed => GameSessionError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => GameSessionError::Infrastructure(err.to_string()),
        }
    }
}
