pub mod manager;
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
pub use manager::ConfigManager;

use crate::constants::http::DEFAULT_TIMEOUT_SECONDS;
use crate::logging::{LogLevel, LoggerSettings};

/// `logging` configures the shared logger when the context is built.
/// Once a component initializes, its `component.log_level` and
/// `component.include_*` fields replace those settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggerSettings,
    #[serde(default)]
    pub component: ComponentConfig,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        self.component.validate()
    }
}

/// Per-component settings, mutable through the component's setters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentConfig {
    #[serde(default)]
    pub default_url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: f64,
    #[serde(default = "default_log_level")]
    pub log_level: LogLevel,
    #[serde(default = "default_true")]
    pub auto_initialize: bool,
    #[serde(default = "default_true")]
    pub events_enabled: bool,
    #[serde(default = "default_true")]
    pub include_timestamp: bool,
    #[serde(default = "default_true")]
    pub include_level: bool,
}

fn default_timeout_seconds() -> f64 {
    DEFAULT_TIMEOUT_SECONDS
}

fn default_log_level() -> LogLevel {
    LogLevel::Info
}

fn default_true() -> bool {
    true
}

impl Default for ComponentConfig {
    fn default() -> Self {
        Self {
            default_url: String::new(),
            timeout_seconds: default_timeout_seconds(),
            log_level: default_log_level(),
            auto_initialize: true,
            events_enabled: true,
            include_timestamp: true,
            include_level: true,
        }
    }
}

impl ComponentConfig {
    pub fn validate(&self) -> Result<()> {
        if !is_valid_timeout(self.timeout_seconds) {
            return Err(anyhow!(
                "component.timeout_seconds must be greater than 0 and fit in a Duration, got {}",
                self.timeout_seconds
            ));
        }
        Ok(())
    }

    pub fn logger_settings(&self) -> LoggerSettings {
        LoggerSettings {
            threshold: self.log_level,
            include_timestamp: self.include_timestamp,
            include_level: self.include_level,
        }
    }
}

/// Positive and representable as a `Duration`
pub fn is_valid_timeout(timeout_seconds: f64) -> bool {
    timeout_seconds > 0.0 && Duration::try_from_secs_f64(timeout_seconds).is_ok()
}
