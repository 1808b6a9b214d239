//! Lifecycle status of a game session.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::StateMachine;

/// Where a game session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GameSessionStatus {
    #[default]
    Draft,
    Scheduled,
    InProgress,
    Paused,
    Finished,
}

impl GameSessionStatus {
    /// Chat messages and game events are only accepted while the table is live.
    pub fn accepts_log_entries(&self) -> bool {
        matches!(self, GameSessionStatus::InProgress | GameSessionStatus::Paused)
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, GameSessionStatus::Finished)
    }
}

impl StateMachine for GameSessionStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use GameSessionStatus::*;
        matches!(
            (self, target),
            (Draft, InProgress)
                | (Scheduled, InProgress)
                | (InProgress, Paused)
                | (Paused, InProgress)
                | (Draft, Finished)
                | (Scheduled, Finished)
                | (InProgress, Finished)
                | (Paused, Finished)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use GameSessionStatus::*;
        match self {
            Draft | Scheduled => vec![InProgress, Finished],
            InProgress => vec![Paused, Finished],
            Paused => vec![InProgress, Finished],
            Finished => vec![],
        }
    }
}

impl fmt::Display for GameSessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GameSessionStatus::Draft => "Draft",
            GameSessionStatus::Scheduled => "Scheduled",
            GameSessionStatus::InProgress => "InProgress",
            GameSessionStatus::Paused => "Paused",
            GameSessionStatus::Finished => "Finished",
        };
        write!(f, "{}", s)
    }
}
