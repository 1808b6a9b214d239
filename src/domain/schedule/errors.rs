//! Schedule-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, ScheduleId};
use crate::domain::game_session::GameSessionError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// Schedule was not found.
    NotFound(ScheduleId),
    /// Caller does not own the schedule.
    Forbidden(String),
    /// One or more validation rules failed. All messages are collected.
    Invalid(Vec<String>),
    /// Infrastructure error.
    Infrastructure(String),
}

impl ScheduleError {
    pub fn not_found(id: ScheduleId) -> Self {
        ScheduleError::NotFound(id)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ScheduleError::Forbidden(message.into())
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        ScheduleError::Invalid(vec![message.into()])
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        ScheduleError::Infrastructure(message.into())
    }

    /// The individual validation messages, empty for other variants.
    pub fn errors(&self) -> &[String] {
        match self {
            ScheduleError::Invalid(errors) => errors,
            _ => &[],
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ScheduleError::NotFound(_) => ErrorCode::ScheduleNotFound,
            ScheduleError::Forbidden(_) => ErrorCode::Forbidden,
            ScheduleError::Invalid(_) => ErrorCode::ValidationFailed,
            ScheduleError::Infrastructure(_) => ErrorCode::StorageError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ScheduleError::NotFound(_) => "Schedule not found".to_string(),
            ScheduleError::Forbidden(msg) => msg.clone(),
            ScheduleError::Invalid(errors) => errors.join("; "),
            ScheduleError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ScheduleError {}

impl From<DomainError> for ScheduleError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Forbidden => ScheduleError::Forbidden(err.message),
            ErrorCode::ValidationFailed => ScheduleError::Invalid(vec![err.message]),
            _ => ScheduleError::Infrastructure(err.to_string()),
        }
    }
}

impl From<GameSessionError> for ScheduleError {
    fn from(err: GameSessionError) -> Self {
        match err {
            GameSessionError::ValidationFailed { message, .. } => {
                ScheduleError::Invalid(vec![message])
            }
            GameSessionError::MasterAlreadyAssigned => ScheduleError::Invalid(vec![err.message()]),
            other => ScheduleError::Infrastructure(other.message()),
        }
    }
}
