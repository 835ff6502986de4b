//! Central repository for defaults and fixed strings
//!
//! Organized by category so the request manager, logger and component
//! agree on a single source of truth.

/// HTTP client constants
pub mod http {
    /// Timeout applied when the request manager is initialized without one
    pub const DEFAULT_TIMEOUT_SECONDS: f64 = 30.0;

    /// Content type sent with every POST body
    pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";
}

/// Log formatting constants
pub mod logging {
    /// Wall-clock timestamp with millisecond precision
    pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

    /// Prefix of the trailing context segment
    pub const CONTEXT_PREFIX: &str = "Context:";
}

/// Configuration constants
pub mod config {
    /// Config file read by the binary when no path is given
    pub const DEFAULT_CONFIG_PATH: &str = "config/netbridge.toml";

    /// Default tracing directives for the binary
    pub const DEFAULT_LOG_DIRECTIVES: [&str; 3] = ["netbridge=info", "hyper=warn", "reqwest=warn"];
}
