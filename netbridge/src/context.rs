use std::sync::Arc;

use crate::http::{RequestManager, TransportFactory};
use crate::logging::{Logger, LoggerSettings};

/// Shared logger and request manager handed to every component.
///
/// Clones point at the same instances, so all components built from one
/// context share a single HTTP client.
#[derive(Debug, Clone)]
pub struct BridgeContext {
    pub logger: Arc<Logger>,
    pub requests: Arc<RequestManager>,
}

impl BridgeContext {
    pub fn new(settings: LoggerSettings) -> Self {
        let logger = Arc::new(Logger::with_settings(settings));
        let requests = Arc::new(RequestManager::new(logger.clone()));
        Self { logger, requests }
    }

    pub fn with_transport_factory(
        settings: LoggerSettings,
        factory: Arc<dyn TransportFactory>,
    ) -> Self {
        let logger = Arc::new(Logger::with_settings(settings));
        let requests = Arc::new(RequestManager::with_transport_factory(
            logger.clone(),
            factory,
        ));
        Self { logger, requests }
    }
}

impl Default for BridgeContext {
    fn default() -> Self {
        Self::new(LoggerSettings::default())
    }
}
