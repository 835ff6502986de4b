//! Common test data and constants

use netbridge::{LogLevel, LoggerSettings};

/// Logger settings that keep formatted lines deterministic
pub fn quiet_settings() -> LoggerSettings {
    LoggerSettings {
        threshold: LogLevel::Debug,
        include_timestamp: false,
        include_level: false,
    }
}

/// Common endpoint paths
pub mod endpoints {
    pub const OK: &str = "/ok";
    pub const USERS: &str = "/users";
    pub const MISSING: &str = "/missing";
    pub const BROKEN: &str = "/broken";
    pub const SLOW: &str = "/slow";
}

/// Common response bodies
pub mod bodies {
    pub const ID_ONE: &str = r#"{"id":1}"#;
    pub const NEW_USER: &str = r#"{"name":"ada"}"#;
    pub const CREATED: &str = r#"{"id":42,"name":"ada"}"#;
}

/// URL that never reaches the network
pub const STUB_URL: &str = "https://example.test/ok";
