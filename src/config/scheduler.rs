//! Schedule materializer settings

use std::time::Duration;

use serde::Deserialize;

use super::error::ValidationError;
use crate::application::ScheduleMaterializerConfig;

const MAX_POLL_INTERVAL_SECS: u64 = 86_400;
const MAX_HORIZON_DAYS: u32 = 366;

#[derive(Debug, Clone, Deserialize)]
pub struct SchedulerConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    #[serde(default = "default_horizon_days")]
    pub horizon_days: u32,
}

impl SchedulerConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(1..=MAX_POLL_INTERVAL_SECS).contains(&self.poll_interval_secs) {
            return Err(ValidationError::InvalidPollInterval);
        }
        if !(1..=MAX_HORIZON_DAYS).contains(&self.horizon_days) {
            return Err(ValidationError::InvalidHorizon);
        }
        Ok(())
    }

    pub fn materializer_config(&self) -> ScheduleMaterializerConfig {
        ScheduleMaterializerConfig::default()
            .with_poll_interval(Duration::from_secs(self.poll_interval_secs))
            .with_horizon_days(self.horizon_days)
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            poll_interval_secs: default_poll_interval(),
            horizon_days: default_horizon_days(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_poll_interval() -> u64 {
    60
}

fn default_horizon_days() -> u32 {
    30
}
