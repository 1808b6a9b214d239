//! Storage Adapters
//!
//! Implementations of the repository ports.
//!
//! ## Available Adapters
//!
//! - **InMemoryGameSessionRepository** / **InMemoryScheduleRepository** -
//!   `HashMap` behind a `tokio::sync::RwLock` (tests, development)
//! - **FileGameSessionRepository** / **FileScheduleRepository** - one YAML
//!   document per aggregate under a data directory
//!
//! ```ignore
//! let sessions = FileGameSessionRepository::new("./data");
//! let schedules = FileScheduleRepository::new("./data");
//! ```

mod file_game_session_repository;
mod file_schedule_repository;
mod in_memory_game_session_repository;
mod in_memory_schedule_repository;
mod yaml_store;

pub use file_game_session_repository::FileGameSessionRepository;
pub use file_schedule_repository::FileScheduleRepository;
pub use in_memory_game_session_repository::InMemoryGameSessionRepository;
pub use in_memory_schedule_repository::InMemoryScheduleRepository;

use std::fmt::Display;

use crate::domain::foundation::{DomainError, ErrorCode, GameSessionId};
use crate::domain::game_session::GameSession;

fn already_exists(kind: &str, id: &impl Display) -> DomainError {
    DomainError::storage(format!("{} {} already exists", kind, id))
}

/// Fails with `ConcurrencyConflict` when the caller's copy is stale.
fn check_version(id: &GameSessionId, stored: u64, given: u64) -> Result<(), DomainError> {
    if stored == given {
        return Ok(());
    }
    Err(DomainError::new(
        ErrorCode::ConcurrencyConflict,
        format!("Game session {} was modified concurrently", id),
    )
    .with_detail("expected_version", given.to_string())
    .with_detail("actual_version", stored.to_string()))
}

/// Most recently updated first.
fn sort_for_listing(sessions: &mut [GameSession]) {
    sessions.sort_by(|a, b| b.updated_at().cmp(a.updated_at()));
}

/// Planned start first, falling back to creation time.
fn sort_by_start(sessions: &mut [GameSession]) {
    sessions.sort_by_key(|s| s.starts_at().unwrap_or(*s.created_at()));
}
