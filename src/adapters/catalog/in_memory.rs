//! Seedable in-memory content catalog and user directory.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, EncounterId, SceneId, UserId};
use crate::ports::{ContentCatalog, UserDirectory};

#[derive(Debug, Clone, Default)]
pub struct InMemoryContentCatalog {
    scenes: Arc<RwLock<HashSet<SceneId>>>,
    encounters: Arc<RwLock<HashSet<EncounterId>>>,
}

impl InMemoryContentCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_scene(&self, id: SceneId) {
        self.scenes.write().await.insert(id);
    }

    pub async fn add_encounter(&self, id: EncounterId) {
        self.encounters.write().await.insert(id);
    }
}

#[async_trait]
impl ContentCatalog for InMemoryContentCatalog {
    async fn scene_exists(&self, id: &SceneId) -> Result<bool, DomainError> {
        Ok(self.scenes.read().await.contains(id))
    }

    async fn encounter_exists(&self, id: &EncounterId) -> Result<bool, DomainError> {
        Ok(self.encounters.read().await.contains(id))
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryUserDirectory {
    users: Arc<RwLock<HashSet<UserId>>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory pre-populated with the given users.
    pub fn with_users<I>(users: I) -> Self
    where
        I: IntoIterator<Item = UserId>,
    {
        Self {
            users: Arc::new(RwLock::new(users.into_iter().collect())),
        }
    }

    pub async fn add_user(&self, id: UserId) {
        self.users.write().await.insert(id);
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn user_exists(&self, id: &UserId) -> Result<bool, DomainError> {
        Ok(self.users.read().await.contains(id))
    }
}
