//! Configuration management for the clinic gate service.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{Result, ServiceError};

/// Main configuration for the service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GateConfig {
    /// Admission control configuration
    #[serde(default)]
    pub admission: AdmissionConfig,
}

/// Admission limiter configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdmissionConfig {
    /// Maximum admissions allowed per key per window
    #[serde(default = "default_max_requests")]
    pub max_requests: u64,

    /// Window length in milliseconds
    #[serde(default = "default_window_length_ms")]
    pub window_length_ms: u64,
}

impl Default for AdmissionConfig {
    fn default() -> Self {
        Self {
            max_requests: default_max_requests(),
            window_length_ms: default_window_length_ms(),
        }
    }
}

fn default_max_requests() -> u64 {
    10
}

fn default_window_length_ms() -> u64 {
    1000
}

impl AdmissionConfig {
    /// Window length as a duration.
    pub fn window_length(&self) -> Duration {
        Duration::from_millis(self.window_length_ms)
    }

    /// Reject zero limits and zero-length windows.
    pub fn validate(&self) -> Result<()> {
        if self.max_requests == 0 {
            return Err(ServiceError::Config(
                "max_requests must be greater than zero".to_string(),
            ));
        }
        if self.window_length_ms == 0 {
            return Err(ServiceError::Config(
                "window_length_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl GateConfig {
    /// Load configuration from a YAML file and validate it.
    pub fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: GateConfig =
            serde_yaml::from_str(&contents).map_err(|e| ServiceError::Config(e.to_string()))?;
        config.admission.validate()?;
        Ok(config)
    }
}
