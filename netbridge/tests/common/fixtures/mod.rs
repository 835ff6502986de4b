//! This module provides reusable test utilities:
//! - Mock HTTP endpoints (wiremock)
//! - Stub transports for failure injection
//! - Notification recorders
//! - Config file builders
//! - Common test data

// Allow unused code in test fixtures - not every suite uses every helper
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod config_file;
pub mod mock_endpoint;
pub mod stub_transport;
pub mod test_data;

// Re-export commonly used items
pub use config_file::TestConfigBuilder;
pub use mock_endpoint::MockEndpoint;
pub use recorder::{record, record_log, Recorded};
pub use stub_transport::{StubFactory, StubTransport};
pub use test_data::*;
