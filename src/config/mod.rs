//! Application configuration module
//!
//! Configuration is read from environment variables with the `VTT_GAME`
//! prefix; nested values use double underscores as separators. Every
//! section has defaults, so an empty environment yields a runnable
//! in-memory service.
//!
//! # Example
//!
//! ```no_run
//! use vtt_game::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod error;
mod scheduler;
mod service;
mod storage;

pub use error::{ConfigError, ValidationError};
pub use scheduler::SchedulerConfig;
pub use service::{Environment, LogFormat, ServiceConfig};
pub use storage::{StorageBackend, StorageConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Environment and logging
    #[serde(default)]
    pub service: ServiceConfig,

    /// Repository backend (memory or YAML files)
    #[serde(default)]
    pub storage: StorageConfig,

    /// Background session generation
    #[serde(default)]
    pub scheduler: SchedulerConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads `.env` when present, then reads `VTT_GAME__SECTION__KEY`
    /// variables:
    ///
    /// - `VTT_GAME__STORAGE__BACKEND=file` -> `storage.backend = File`
    /// - `VTT_GAME__SCHEDULER__HORIZON_DAYS=14` -> `scheduler.horizon_days = 14`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a value cannot be parsed into its expected type.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("VTT_GAME")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for out-of-range scheduler settings, a
    /// malformed log filter or a file backend without a data directory.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.service.validate()?;
        self.storage.validate()?;
        self.scheduler.validate()?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.service.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::path::PathBuf;
    use std::sync::Mutex;

    // Env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: [&str; 6] = [
        "VTT_GAME__SERVICE__ENVIRONMENT",
        "VTT_GAME__SERVICE__LOG_FORMAT",
        "VTT_GAME__STORAGE__BACKEND",
        "VTT_GAME__STORAGE__DATA_DIR",
        "VTT_GAME__SCHEDULER__ENABLED",
        "VTT_GAME__SCHEDULER__HORIZON_DAYS",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();

        let config = AppConfig::load().unwrap();

        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert!(config.scheduler.enabled);
        assert_eq!(config.scheduler.horizon_days, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn nested_values_are_read() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("VTT_GAME__SERVICE__ENVIRONMENT", "production");
        env::set_var("VTT_GAME__SERVICE__LOG_FORMAT", "json");
        env::set_var("VTT_GAME__STORAGE__BACKEND", "file");
        env::set_var("VTT_GAME__STORAGE__DATA_DIR", "/tmp/vtt");
        env::set_var("VTT_GAME__SCHEDULER__ENABLED", "false");
        env::set_var("VTT_GAME__SCHEDULER__HORIZON_DAYS", "14");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
        assert_eq!(config.service.log_format, LogFormat::Json);
        assert_eq!(config.storage.backend, StorageBackend::File);
        assert_eq!(config.storage.data_dir, Some(PathBuf::from("/tmp/vtt")));
        assert!(!config.scheduler.enabled);
        assert_eq!(config.scheduler.horizon_days, 14);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn file_backend_without_directory_fails_validation() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("VTT_GAME__STORAGE__BACKEND", "file");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("storage.data_dir"))
        );
    }

    #[test]
    fn unknown_backend_fails_to_load() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("VTT_GAME__STORAGE__BACKEND", "postgres");
        let result = AppConfig::load();
        clear_env();

        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }
}
