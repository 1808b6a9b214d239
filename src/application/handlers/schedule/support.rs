//! Lookup and ownership steps shared by the schedule handlers.

use crate::domain::foundation::{OwnedByUser, ScheduleId, UserId};
use crate::domain::schedule::{Schedule, ScheduleError};
use crate::ports::ScheduleRepository;

pub(super) use super::super::publish;

/// Loads a schedule and checks that `user_id` owns it, failing with
/// `denied` otherwise.
pub(super) async fn load_owned(
    repository: &dyn ScheduleRepository,
    id: ScheduleId,
    user_id: &UserId,
    denied: &str,
) -> Result<Schedule, ScheduleError> {
    let schedule = repository
        .find_by_id(&id)
        .await?
        .ok_or_else(|| ScheduleError::not_found(id))?;
    if !schedule.is_owner(user_id) {
        return Err(ScheduleError::forbidden(denied));
    }
    Ok(schedule)
}
