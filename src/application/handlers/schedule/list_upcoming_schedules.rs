//! ListUpcomingSchedulesHandler - Query handler for a calendar window.

use std::sync::Arc;

use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::schedule::{Schedule, ScheduleError};
use crate::ports::ScheduleRepository;

/// Both window boundaries are inclusive.
#[derive(Debug, Clone)]
pub struct ListUpcomingSchedulesQuery {
    pub user_id: UserId,
    pub start: Timestamp,
    pub end: Timestamp,
}

pub struct ListUpcomingSchedulesHandler {
    repository: Arc<dyn ScheduleRepository>,
}

impl ListUpcomingSchedulesHandler {
    pub fn new(repository: Arc<dyn ScheduleRepository>) -> Self {
        Self { repository }
    }

    /// The caller's schedules whose start or any occurrence lands in the window.
    pub async fn handle(
        &self,
        query: ListUpcomingSchedulesQuery,
    ) -> Result<Vec<Schedule>, ScheduleError> {
        if !query.end.is_after(&query.start) {
            return Err(ScheduleError::invalid("End date must be after start date"));
        }

        let schedules = self.repository.find_by_owner(&query.user_id).await?;
        Ok(schedules
            .into_iter()
            .filter(|s| s.has_occurrence_in(query.start, query.end))
            .collect())
    }
}
