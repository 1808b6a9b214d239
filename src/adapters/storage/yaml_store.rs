//! One-YAML-file-per-aggregate directory store.
//!
//! Layout: `<base_path>/<id>.yaml`. Writes go to a temporary file first and
//! are renamed into place so a crash never leaves a half-written document.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::{Mutex, MutexGuard};
use tracing::warn;

use crate::domain::foundation::DomainError;

const EXTENSION: &str = "yaml";

#[derive(Debug)]
pub(crate) struct YamlStore {
    base_path: PathBuf,
    write_lock: Mutex<()>,
}

impl YamlStore {
    pub(crate) fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    /// Serialises read-modify-write sequences across tasks.
    pub(crate) async fn lock(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().await
    }

    fn path_for(&self, id: &impl Display) -> PathBuf {
        self.base_path.join(format!("{}.{}", id, EXTENSION))
    }

    pub(crate) async fn exists(&self, id: &impl Display) -> Result<bool, DomainError> {
        fs::try_exists(self.path_for(id))
            .await
            .map_err(|e| DomainError::storage(format!("Failed to stat document {}: {}", id, e)))
    }

    pub(crate) async fn read<T: DeserializeOwned>(
        &self,
        id: &impl Display,
    ) -> Result<Option<T>, DomainError> {
        let path = self.path_for(id);
        match fs::read_to_string(&path).await {
            Ok(yaml) => Self::parse(&path, &yaml).map(Some),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(DomainError::storage(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    pub(crate) async fn write<T: Serialize>(
        &self,
        id: &impl Display,
        value: &T,
    ) -> Result<(), DomainError> {
        fs::create_dir_all(&self.base_path).await.map_err(|e| {
            DomainError::storage(format!(
                "Failed to create {}: {}",
                self.base_path.display(),
                e
            ))
        })?;

        let yaml = serde_yaml::to_string(value)
            .map_err(|e| DomainError::storage(format!("Failed to serialize {}: {}", id, e)))?;

        let path = self.path_for(id);
        let tmp = path.with_extension(format!("{}.tmp", EXTENSION));
        fs::write(&tmp, yaml)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to write {}: {}", tmp.display(), e)))?;
        fs::rename(&tmp, &path).await.map_err(|e| {
            DomainError::storage(format!("Failed to move {} into place: {}", path.display(), e))
        })
    }

    /// Returns `false` if there was nothing to remove.
    pub(crate) async fn remove(&self, id: &impl Display) -> Result<bool, DomainError> {
        match fs::remove_file(self.path_for(id)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(DomainError::storage(format!("Failed to delete {}: {}", id, e))),
        }
    }

    /// Every document in the directory. Unreadable files are skipped with a warning.
    pub(crate) async fn read_all<T: DeserializeOwned>(&self) -> Result<Vec<T>, DomainError> {
        let mut entries = match fs::read_dir(&self.base_path).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(DomainError::storage(format!(
                    "Failed to list {}: {}",
                    self.base_path.display(),
                    e
                )))
            }
        };

        let mut items = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to list documents: {}", e)))?
        {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(EXTENSION) {
                continue;
            }
            let parsed = match fs::read_to_string(&path).await {
                Ok(yaml) => Self::parse(&path, &yaml),
                Err(e) => Err(DomainError::storage(e.to_string())),
            };
            match parsed {
                Ok(item) => items.push(item),
                Err(e) => warn!(path = %path.display(), error = %e, "Skipping unreadable document"),
            }
        }
        Ok(items)
    }

    fn parse<T: DeserializeOwned>(path: &Path, yaml: &str) -> Result<T, DomainError> {
        serde_yaml::from_str(yaml).map_err(|e| {
            DomainError::storage(format!("Failed to parse {}: {}", path.display(), e))
        })
    }
}
