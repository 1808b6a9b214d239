//! Lookups into the content library and the user directory.
//!
//! Game sessions reference scenes, encounters and users owned by other
//! services. These ports only answer whether a reference is valid.

use crate::domain::foundation::{DomainError, EncounterId, SceneId, UserId};
use async_trait::async_trait;

/// Existence checks against the content library.
#[async_trait]
pub trait ContentCatalog: Send + Sync {
    async fn scene_exists(&self, id: &SceneId) -> Result<bool, DomainError>;

    async fn encounter_exists(&self, id: &EncounterId) -> Result<bool, DomainError>;
}

/// Existence checks against the identity service.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn user_exists(&self, id: &UserId) -> Result<bool, DomainError>;
}
