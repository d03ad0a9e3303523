//! Configuration handling for the registration client

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Intake endpoint used when neither the environment nor the file names one
pub const DEFAULT_INTAKE_URL: &str = "http://127.0.0.1:8080/intake";

/// Environment variable overriding the intake endpoint
pub const INTAKE_URL_ENV: &str = "REGISTRATION_INTAKE_URL";

const DEFAULT_DELIVERY_ATTEMPTS: u32 = 3;
const DEFAULT_RETRY_BACKOFF_MS: u64 = 2000;

/// User configuration, every field optional
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct RegistrationConfig {
    /// Where submissions are POSTed
    pub intake_url: Option<String>,
    /// Delivery tries per submission, including the first
    pub delivery_attempts: Option<u32>,
    /// Pause between delivery tries
    pub retry_backoff_ms: Option<u64>,
}

impl RegistrationConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("pk", "gs1", "registration-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from the platform config dir
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load from `path`; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: RegistrationConfig = serde_json::from_str(&content)?;
        tracing::debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Environment beats file beats built-in default
    pub fn intake_url(&self) -> String {
        std::env::var(INTAKE_URL_ENV)
            .ok()
            .filter(|url| !url.is_empty())
            .or_else(|| self.intake_url.clone())
            .unwrap_or_else(|| DEFAULT_INTAKE_URL.to_string())
    }

    /// At least one attempt is always made
    pub fn delivery_attempts(&self) -> u32 {
        self.delivery_attempts
            .unwrap_or(DEFAULT_DELIVERY_ATTEMPTS)
            .max(1)
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms.unwrap_or(DEFAULT_RETRY_BACKOFF_MS))
    }
}
