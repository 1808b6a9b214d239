//! File-backed schedule repository.
//!
//! Stores each schedule as `<data_dir>/schedules/<id>.yaml`.

use async_trait::async_trait;
use std::path::Path;
use tracing::debug;

use crate::domain::foundation::{DomainError, OwnedByUser, ScheduleId, UserId};
use crate::domain::schedule::Schedule;
use crate::ports::ScheduleRepository;

use super::already_exists;
use super::in_memory_schedule_repository::{schedule_not_found, sort_schedules};
use super::yaml_store::YamlStore;

#[derive(Debug)]
pub struct FileScheduleRepository {
    store: YamlStore,
}

impl FileScheduleRepository {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            store: YamlStore::new(data_dir.as_ref().join("schedules")),
        }
    }
}

#[async_trait]
impl ScheduleRepository for FileScheduleRepository {
    async fn save(&self, schedule: &Schedule) -> Result<(), DomainError> {
        let _guard = self.store.lock().await;
        if self.store.exists(schedule.id()).await? {
            return Err(already_exists("Schedule", schedule.id()));
        }
        self.store.write(schedule.id(), schedule).await?;
        debug!(schedule_id = %schedule.id(), "Schedule saved");
        Ok(())
    }

    async fn update(&self, schedule: &Schedule) -> Result<(), DomainError> {
        let _guard = self.store.lock().await;
        if !self.store.exists(schedule.id()).await? {
            return Err(schedule_not_found(schedule.id()));
        }
        self.store.write(schedule.id(), schedule).await
    }

    async fn find_by_id(&self, id: &ScheduleId) -> Result<Option<Schedule>, DomainError> {
        self.store.read(id).await
    }

    async fn find_by_owner(&self, owner_id: &UserId) -> Result<Vec<Schedule>, DomainError> {
        let mut found: Vec<Schedule> = self
            .store
            .read_all::<Schedule>()
            .await?
            .into_iter()
            .filter(|s| s.is_owner(owner_id))
            .collect();
        sort_schedules(&mut found);
        Ok(found)
    }

    async fn list_all(&self) -> Result<Vec<Schedule>, DomainError> {
        let mut all = self.store.read_all::<Schedule>().await?;
        sort_schedules(&mut all);
        Ok(all)
    }

    async fn delete(&self, id: &ScheduleId) -> Result<(), DomainError> {
        let _guard = self.store.lock().await;
        if self.store.remove(id).await? {
            Ok(())
        } else {
            Err(schedule_not_found(id))
        }
    }
}
