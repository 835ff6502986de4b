//! Test configuration builder for writing config files to a temp directory

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestConfigBuilder {
    temp_dir: TempDir,
    threshold: String,
    include_timestamp: bool,
    default_url: String,
    timeout_seconds: f64,
    auto_initialize: bool,
}

impl TestConfigBuilder {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp dir"),
            threshold: "INFO".to_string(),
            include_timestamp: true,
            default_url: "https://example.test/status".to_string(),
            timeout_seconds: 30.0,
            auto_initialize: true,
        }
    }

    pub fn threshold(mut self, threshold: &str) -> Self {
        self.threshold = threshold.to_string();
        self
    }

    pub fn without_timestamp(mut self) -> Self {
        self.include_timestamp = false;
        self
    }

    pub fn default_url(mut self, url: &str) -> Self {
        self.default_url = url.to_string();
        self
    }

    pub fn timeout_seconds(mut self, seconds: f64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    pub fn auto_initialize(mut self, enabled: bool) -> Self {
        self.auto_initialize = enabled;
        self
    }

    fn to_toml(&self) -> String {
        format!(
            r#"[logging]
threshold = "{}"
include_timestamp = {}

[component]
default_url = "{}"
timeout_seconds = {:?}
auto_initialize = {}
"#,
            self.threshold,
            self.include_timestamp,
            self.default_url,
            self.timeout_seconds,
            self.auto_initialize
        )
    }

    pub fn build(self) -> TestConfig {
        let path = self.temp_dir.path().join("netbridge.toml");
        fs::write(&path, self.to_toml()).expect("Failed to write config");
        TestConfig {
            _temp_dir: self.temp_dir,
            path,
        }
    }
}

impl Default for TestConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Config file on disk; removed when dropped
pub struct TestConfig {
    _temp_dir: TempDir,
    pub path: PathBuf,
}

impl TestConfig {
    /// Write arbitrary content next to the generated file
    pub fn write_raw(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path.with_file_name(name);
        fs::write(&path, content).expect("Failed to write raw config");
        path
    }
}
