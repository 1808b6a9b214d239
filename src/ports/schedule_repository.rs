//! Schedule repository port.

use crate::domain::foundation::{DomainError, ScheduleId, UserId};
use crate::domain::schedule::Schedule;
use async_trait::async_trait;

#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    async fn save(&self, schedule: &Schedule) -> Result<(), DomainError>;

    /// # Errors
    ///
    /// - `ScheduleNotFound` if the schedule doesn't exist
    async fn update(&self, schedule: &Schedule) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &ScheduleId) -> Result<Option<Schedule>, DomainError>;

    /// Schedules owned by the user, ordered by start.
    async fn find_by_owner(&self, owner_id: &UserId) -> Result<Vec<Schedule>, DomainError>;

    /// Every stored schedule. Used by the materializer.
    async fn list_all(&self) -> Result<Vec<Schedule>, DomainError>;

    /// Removes the schedule only; its generated sessions are untouched.
    ///
    /// # Errors
    ///
    /// - `ScheduleNotFound` if the schedule doesn't exist
    async fn delete(&self, id: &ScheduleId) -> Result<(), DomainError>;
}
