pub mod component;
pub mod config;
pub mod constants;
pub mod context;
pub mod errors;
pub mod events;
pub mod http;
pub mod logging;

// Re-export commonly used types
pub use component::{ComponentEvents, ComponentRequest, RequestComponent};
pub use config::{ComponentConfig, Config, ConfigManager};
pub use context::BridgeContext;
pub use errors::RequestError;
pub use events::{Notifier, SubscriptionId};
pub use http::{RequestManager, ResponseReceived};
pub use logging::{LogLevel, LogMessage, Logger, LoggerSettings};
