//! Participant membership and roles.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{Timestamp, UserId};

/// Role a user plays at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlayerType {
    /// Runs the game. At most one per session.
    Master,
    Assistant,
    #[default]
    Player,
    Guest,
}

impl PlayerType {
    pub fn is_master(&self) -> bool {
        matches!(self, PlayerType::Master)
    }
}

impl fmt::Display for PlayerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PlayerType::Master => "Master",
            PlayerType::Assistant => "Assistant",
            PlayerType::Player => "Player",
            PlayerType::Guest => "Guest",
        };
        write!(f, "{}", s)
    }
}

/// A user's membership in a game session or schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub user_id: UserId,
    pub player_type: PlayerType,
    /// Whether the session should not run without this user.
    #[serde(default)]
    pub is_required: bool,
    pub joined_at: Timestamp,
}

impl Participant {
    pub fn new(user_id: UserId, player_type: PlayerType) -> Self {
        Self {
            user_id,
            player_type,
            is_required: false,
            joined_at: Timestamp::now(),
        }
    }

    /// The session owner's entry: a required Master.
    pub fn master(user_id: UserId) -> Self {
        Self::new(user_id, PlayerType::Master).required()
    }

    pub fn required(mut self) -> Self {
        self.is_required = true;
        self
    }

    pub fn is_master(&self) -> bool {
        self.player_type.is_master()
    }
}

/// Counts participants holding the Master role.
pub fn count_masters(participants: &[Participant]) -> usize {
    participants.iter().filter(|p| p.is_master()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    #[test]
    fn master_constructor_is_required() {
        let p = Participant::master(user("gm"));
        assert!(p.is_master());
        assert!(p.is_required);
    }

    #[test]
    fn default_role_is_player() {
        assert_eq!(PlayerType::default(), PlayerType::Player);
    }

    #[test]
    fn count_masters_ignores_other_roles() {
        let players = vec![
            Participant::master(user("gm")),
            Participant::new(user("a"), PlayerType::Assistant),
            Participant::new(user("p"), PlayerType::Player),
        ];
        assert_eq!(count_masters(&players), 1);
    }

    #[test]
    fn is_required_defaults_when_missing_from_yaml() {
        let yaml = "user_id: p1\nplayer_type: guest\njoined_at: 2025-01-01T00:00:00Z\n";
        let p: Participant = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(p.player_type, PlayerType::Guest);
        assert!(!p.is_required);
    }
}
