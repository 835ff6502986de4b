//! Level-filtered logging facade
//!
//! [`Logger`] formats a message, forwards it to the `tracing` sink matching
//! its severity and publishes it to subscribers. Settings are shared and
//! last-write-wins; every read happens synchronously on the logging call.

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use tracing::{debug, error, info, warn};

use crate::constants::logging::{CONTEXT_PREFIX, TIMESTAMP_FORMAT};
use crate::events::{Notifier, SubscriptionId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
        }
    }

    fn from_u8(value: u8) -> Self {
        match value {
            0 => LogLevel::Debug,
            1 => LogLevel::Info,
            2 => LogLevel::Warning,
            _ => LogLevel::Error,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" | "WARNING" => Ok(LogLevel::Warning),
            "ERROR" => Ok(LogLevel::Error),
            other => Err(anyhow::anyhow!("Unknown log level '{}'", other)),
        }
    }
}

impl TryFrom<String> for LogLevel {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, anyhow::Error> {
        value.parse()
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        level.as_str().to_string()
    }
}

/// A formatted line delivered to log subscribers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogMessage {
    pub level: LogLevel,
    pub message: String,
}

/// Snapshot of the logger's configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerSettings {
    #[serde(default = "default_threshold")]
    pub threshold: LogLevel,
    #[serde(default = "default_true")]
    pub include_timestamp: bool,
    #[serde(default = "default_true")]
    pub include_level: bool,
}

fn default_threshold() -> LogLevel {
    LogLevel::Info
}

fn default_true() -> bool {
    true
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            include_timestamp: true,
            include_level: true,
        }
    }
}

#[derive(Debug)]
pub struct Logger {
    threshold: AtomicU8,
    include_timestamp: AtomicBool,
    include_level: AtomicBool,
    messages: Notifier<LogMessage>,
}

impl Logger {
    pub fn new() -> Self {
        Self::with_settings(LoggerSettings::default())
    }

    pub fn with_settings(settings: LoggerSettings) -> Self {
        Self {
            threshold: AtomicU8::new(settings.threshold as u8),
            include_timestamp: AtomicBool::new(settings.include_timestamp),
            include_level: AtomicBool::new(settings.include_level),
            messages: Notifier::new("log_message"),
        }
    }

    pub fn threshold(&self) -> LogLevel {
        LogLevel::from_u8(self.threshold.load(Ordering::Relaxed))
    }

    pub fn set_threshold(&self, level: LogLevel) {
        self.threshold.store(level as u8, Ordering::Relaxed);
    }

    pub fn set_include_timestamp(&self, enabled: bool) {
        self.include_timestamp.store(enabled, Ordering::Relaxed);
    }

    pub fn set_include_level(&self, enabled: bool) {
        self.include_level.store(enabled, Ordering::Relaxed);
    }

    pub fn apply(&self, settings: LoggerSettings) {
        self.set_threshold(settings.threshold);
        self.set_include_timestamp(settings.include_timestamp);
        self.set_include_level(settings.include_level);
    }

    pub fn settings(&self) -> LoggerSettings {
        LoggerSettings {
            threshold: self.threshold(),
            include_timestamp: self.include_timestamp.load(Ordering::Relaxed),
            include_level: self.include_level.load(Ordering::Relaxed),
        }
    }

    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level >= self.threshold()
    }

    /// Compose a log line: timestamp, `[LEVEL]`, message, `Context: ...`.
    /// Disabled or empty segments are dropped along with their separator.
    pub fn format(&self, level: LogLevel, message: &str, context: Option<&str>) -> String {
        let mut segments: Vec<String> = Vec::with_capacity(4);

        if self.include_timestamp.load(Ordering::Relaxed) {
            segments.push(Local::now().format(TIMESTAMP_FORMAT).to_string());
        }
        if self.include_level.load(Ordering::Relaxed) {
            segments.push(format!("[{}]", level));
        }
        segments.push(message.to_string());
        if let Some(context) = context.filter(|c| !c.is_empty()) {
            segments.push(format!("{} {}", CONTEXT_PREFIX, context));
        }

        segments.join(" ")
    }

    pub fn log(&self, level: LogLevel, message: &str, context: Option<&str>) {
        if !self.is_enabled(level) {
            return;
        }

        let formatted = self.format(level, message, context);
        match level {
            LogLevel::Debug => debug!("{}", formatted),
            LogLevel::Info => info!("{}", formatted),
            LogLevel::Warning => warn!("{}", formatted),
            LogLevel::Error => error!("{}", formatted),
        }

        self.messages.publish(&LogMessage {
            level,
            message: formatted,
        });
    }

    pub fn debug(&self, message: &str, context: Option<&str>) {
        self.log(LogLevel::Debug, message, context);
    }

    pub fn info(&self, message: &str, context: Option<&str>) {
        self.log(LogLevel::Info, message, context);
    }

    pub fn warn(&self, message: &str, context: Option<&str>) {
        self.log(LogLevel::Warning, message, context);
    }

    pub fn error(&self, message: &str, context: Option<&str>) {
        self.log(LogLevel::Error, message, context);
    }

    /// Nothing is buffered, so there is nothing to clear
    pub fn clear_logs(&self) {
        debug!("clear_logs requested; logger keeps no history");
    }

    pub fn subscribe<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&LogMessage) + Send + Sync + 'static,
    {
        self.messages.subscribe(handler)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.messages.unsubscribe(id)
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}
