//! In-memory schedule repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, OwnedByUser, ScheduleId, UserId};
use crate::domain::schedule::Schedule;
use crate::ports::ScheduleRepository;

use super::already_exists;

#[derive(Debug, Clone, Default)]
pub struct InMemoryScheduleRepository {
    schedules: Arc<RwLock<HashMap<ScheduleId, Schedule>>>,
}

impl InMemoryScheduleRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

pub(crate) fn schedule_not_found(id: &ScheduleId) -> DomainError {
    DomainError::new(ErrorCode::ScheduleNotFound, "Schedule not found")
        .with_detail("schedule_id", id.to_string())
}

pub(crate) fn sort_schedules(schedules: &mut [Schedule]) {
    schedules.sort_by_key(|s| (s.start(), *s.id()));
}

#[async_trait]
impl ScheduleRepository for InMemoryScheduleRepository {
    async fn save(&self, schedule: &Schedule) -> Result<(), DomainError> {
        let mut schedules = self.schedules.write().await;
        if schedules.contains_key(schedule.id()) {
            return Err(already_exists("Schedule", schedule.id()));
        }
        schedules.insert(*schedule.id(), schedule.clone());
        Ok(())
    }

    async fn update(&self, schedule: &Schedule) -> Result<(), DomainError> {
        let mut schedules = self.schedules.write().await;
        match schedules.get_mut(schedule.id()) {
            Some(stored) => {
                *stored = schedule.clone();
                Ok(())
            }
            None => Err(schedule_not_found(schedule.id())),
        }
    }

    async fn find_by_id(&self, id: &ScheduleId) -> Result<Option<Schedule>, DomainError> {
        Ok(self.schedules.read().await.get(id).cloned())
    }

    async fn find_by_owner(&self, owner_id: &UserId) -> Result<Vec<Schedule>, DomainError> {
        let mut found: Vec<Schedule> = self
            .schedules
            .read()
            .await
            .values()
            .filter(|s| s.is_owner(owner_id))
            .cloned()
            .collect();
        sort_schedules(&mut found);
        Ok(found)
    }

    async fn list_all(&self) -> Result<Vec<Schedule>, DomainError> {
        let mut all: Vec<Schedule> = self.schedules.read().await.values().cloned().collect();
        sort_schedules(&mut all);
        Ok(all)
    }

    async fn delete(&self, id: &ScheduleId) -> Result<(), DomainError> {
        self.schedules
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| schedule_not_found(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;
    use crate::domain::game_session::Participant;
    use crate::domain::schedule::NewSchedule;

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn schedule(owner: &str, days_ahead: i64) -> Schedule {
        Schedule::create(
            ScheduleId::new(),
            NewSchedule {
                owner_id: user(owner),
                title: "Curse of Strahd".to_string(),
                calendar_event_id: None,
                start: Timestamp::now().add_days(days_ahead).unwrap(),
                duration_minutes: 180,
                recurrence: None,
                participants: vec![Participant::master(user(owner))],
            },
            Timestamp::now(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn find_by_owner_filters_and_orders_by_start() {
        let repo = InMemoryScheduleRepository::new();
        let later = schedule("gm", 5);
        let sooner = schedule("gm", 1);
        let foreign = schedule("other", 2);
        for s in [&later, &sooner, &foreign] {
            repo.save(s).await.unwrap();
        }

        let found = repo.find_by_owner(&user("gm")).await.unwrap();
        let ids: Vec<_> = found.iter().map(|s| *s.id()).collect();

        assert_eq!(ids, vec![*sooner.id(), *later.id()]);
        assert_eq!(repo.list_all().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn duplicate_save_is_rejected() {
        let repo = InMemoryScheduleRepository::new();
        let s = schedule("gm", 1);
        repo.save(&s).await.unwrap();

        assert!(repo.save(&s).await.is_err());
    }

    #[tokio::test]
    async fn update_and_delete_missing_schedule_fail() {
        let repo = InMemoryScheduleRepository::new();
        let s = schedule("gm", 1);

        let err = repo.update(&s).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ScheduleNotFound);
        let err = repo.delete(s.id()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ScheduleNotFound);
    }
}
