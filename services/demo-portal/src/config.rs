//! Configuration types for the demo portal

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub page: PageConfig,
}

impl Config {
    /// Reject settings the service cannot run with
    pub fn validate(&self) -> crate::Result<()> {
        let intervals = [
            ("clock_interval_seconds", self.schedule.clock_interval_seconds),
            ("health_interval_seconds", self.schedule.health_interval_seconds),
            ("refresh_interval_seconds", self.schedule.refresh_interval_seconds),
        ];
        for (field, seconds) in intervals {
            if seconds == 0 {
                return Err(crate::PortalError::Config(format!(
                    "schedule.{} must be greater than zero",
                    field
                )));
            }
        }
        if self.backend.local_url.is_empty() || self.backend.remote_url.is_empty() {
            return Err(crate::PortalError::Config(
                "backend URLs must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Where the backend lives.
///
/// The base URL is picked from two fixed candidates by looking at the host
/// the portal is served under, see [`BackendConfig::base_url`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_local_url")]
    pub local_url: String,
    #[serde(default = "default_remote_url")]
    pub remote_url: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            local_url: default_local_url(),
            remote_url: default_remote_url(),
        }
    }
}

impl BackendConfig {
    /// Resolve the backend base URL for the configured host
    pub fn base_url(&self) -> &str {
        resolve_base_url(&self.host, &self.local_url, &self.remote_url)
    }
}

/// Pick `local_url` when running on localhost, `remote_url` otherwise
pub fn resolve_base_url<'a>(host: &str, local_url: &'a str, remote_url: &'a str) -> &'a str {
    if host == "localhost" {
        local_url
    } else {
        remote_url
    }
}

/// Intervals of the three periodic tasks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    #[serde(default = "default_clock_interval")]
    pub clock_interval_seconds: u64,
    #[serde(default = "default_health_interval")]
    pub health_interval_seconds: u64,
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_seconds: u64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            clock_interval_seconds: default_clock_interval(),
            health_interval_seconds: default_health_interval(),
            refresh_interval_seconds: default_refresh_interval(),
        }
    }
}

impl ScheduleConfig {
    pub fn clock_interval(&self) -> Duration {
        Duration::from_secs(self.clock_interval_seconds)
    }

    pub fn health_interval(&self) -> Duration {
        Duration::from_secs(self.health_interval_seconds)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_seconds)
    }
}

/// Page server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_page_port")]
    pub port: u16,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            port: default_page_port(),
        }
    }
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_local_url() -> String {
    "http://localhost:5001".to_string()
}

fn default_remote_url() -> String {
    "http://backend:5000".to_string()
}

fn default_clock_interval() -> u64 {
    1
}

fn default_health_interval() -> u64 {
    30
}

fn default_refresh_interval() -> u64 {
    10
}

fn default_true() -> bool {
    true
}

fn default_page_port() -> u16 {
    8080
}

/// Load configuration from a JSON file
pub fn load_config(path: &Path) -> crate::Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        crate::PortalError::Config(format!("Failed to read config file {:?}: {}", path, e))
    })?;
    let config: Config = serde_json::from_str(&content)?;
    Ok(config)
}
