use anyhow::{anyhow, Result};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::instrument;

use super::transport::{
    is_timeout, PendingRequest, ReqwestTransportFactory, Transport, TransportFactory,
};
use crate::constants::http::DEFAULT_TIMEOUT_SECONDS;
use crate::errors::RequestError;
use crate::events::Notifier;
use crate::logging::Logger;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseReceived {
    pub url: String,
    pub body: String,
}

/// Notifications published by the request manager
#[derive(Debug)]
pub struct ManagerEvents {
    pub initialized: Notifier<()>,
    pub response_received: Notifier<ResponseReceived>,
    pub error: Notifier<String>,
}

impl ManagerEvents {
    fn new() -> Self {
        Self {
            initialized: Notifier::new("request_manager.initialized"),
            response_received: Notifier::new("request_manager.response_received"),
            error: Notifier::new("request_manager.error"),
        }
    }
}

/// Shared HTTP client with a guarded initialize/shutdown lifecycle.
///
/// `transport` is `Some` exactly when `initialized` is true. Both are only
/// changed while holding the write lock; `initialized` is an unsynchronized
/// fast path that is re-checked under the lock.
pub struct RequestManager {
    logger: Arc<Logger>,
    factory: Arc<dyn TransportFactory>,
    initialized: AtomicBool,
    transport: RwLock<Option<Arc<dyn Transport>>>,
    events: ManagerEvents,
}

impl RequestManager {
    pub fn new(logger: Arc<Logger>) -> Self {
        Self::with_transport_factory(logger, Arc::new(ReqwestTransportFactory))
    }

    pub fn with_transport_factory(logger: Arc<Logger>, factory: Arc<dyn TransportFactory>) -> Self {
        Self {
            logger,
            factory,
            initialized: AtomicBool::new(false),
            transport: RwLock::new(None),
            events: ManagerEvents::new(),
        }
    }

    pub fn events(&self) -> &ManagerEvents {
        &self.events
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    pub async fn initialize_default(&self) {
        self.initialize(DEFAULT_TIMEOUT_SECONDS).await
    }

    #[instrument(skip(self))]
    pub async fn initialize(&self, timeout_seconds: f64) {
        if self.is_initialized() {
            self.logger.warn("RequestManager is already initialized", None);
            return;
        }

        let mut slot = self.transport.write().await;
        if slot.is_some() {
            drop(slot);
            self.logger.warn("RequestManager is already initialized", None);
            return;
        }

        match self.build_transport(timeout_seconds) {
            Ok(transport) => {
                *slot = Some(transport);
                self.initialized.store(true, Ordering::Release);
                drop(slot);

                self.logger.info(
                    &format!(
                        "RequestManager initialized with {}s timeout",
                        timeout_seconds
                    ),
                    None,
                );
                self.events.initialized.publish(&());
            }
            Err(e) => {
                drop(slot);

                let message = format!("Failed to initialize RequestManager: {:#}", e);
                self.logger.error(&message, None);
                self.events.error.publish(&message);
            }
        }
    }

    fn build_transport(&self, timeout_seconds: f64) -> Result<Arc<dyn Transport>> {
        if !timeout_seconds.is_finite() || timeout_seconds <= 0.0 {
            return Err(anyhow!(
                "timeout must be a positive number of seconds, got {}",
                timeout_seconds
            ));
        }
        let timeout = Duration::try_from_secs_f64(timeout_seconds)
            .map_err(|e| anyhow!("timeout of {}s is out of range: {}", timeout_seconds, e))?;
        self.factory.connect(timeout)
    }

    /// GET `url` and return the body of a 2xx response
    pub async fn fetch_data(
        &self,
        url: &str,
        headers: Option<HashMap<String, String>>,
    ) -> Result<String, RequestError> {
        let transport = self.current_transport("fetch_data").await?;
        self.execute(transport, PendingRequest::get(url, headers), "fetching data from")
            .await
    }

    /// POST a JSON `body` to `url` and return the body of a 2xx response
    pub async fn post_data(
        &self,
        url: &str,
        body: &str,
        headers: Option<HashMap<String, String>>,
    ) -> Result<String, RequestError> {
        let transport = self.current_transport("post_data").await?;
        self.execute(transport, PendingRequest::post(url, body, headers), "posting data to")
            .await
    }

    pub async fn post_json<T>(
        &self,
        url: &str,
        payload: &T,
        headers: Option<HashMap<String, String>>,
    ) -> Result<String, RequestError>
    where
        T: Serialize + ?Sized,
    {
        let body = serde_json::to_string(payload)?;
        self.post_data(url, &body, headers).await
    }

    async fn current_transport(&self, operation: &str) -> Result<Arc<dyn Transport>, RequestError> {
        let transport = self.transport.read().await.clone();
        transport.ok_or_else(|| {
            self.logger.error(
                &format!("{} called before RequestManager was initialized", operation),
                None,
            );
            RequestError::NotInitialized {
                operation: operation.to_string(),
            }
        })
    }

    async fn execute(
        &self,
        transport: Arc<dyn Transport>,
        request: PendingRequest,
        action: &str,
    ) -> Result<String, RequestError> {
        let url = request.url.clone();
        let request_context = request.id.to_string();
        self.logger.debug(
            &format!("{} {}", request.method, url),
            Some(&request_context),
        );

        let outcome = match transport.send(request).await {
            Ok(response) if response.is_success() => Ok(response.body),
            Ok(response) => Err(RequestError::Status {
                url: url.clone(),
                status: response.status,
                body: response.body,
            }),
            Err(e) if is_timeout(&e) => Err(RequestError::Timeout { url: url.clone() }),
            Err(e) => Err(RequestError::Transport {
                url: url.clone(),
                reason: format!("{:#}", e),
            }),
        };

        match outcome {
            Ok(body) => {
                self.logger.debug(
                    &format!("Response from {}: {}", url, body),
                    Some(&request_context),
                );
                self.events.response_received.publish(&ResponseReceived {
                    url,
                    body: body.clone(),
                });
                Ok(body)
            }
            Err(err) => {
                let message = format!("Error {} {}: {}", action, url, err);
                self.logger.error(&message, Some(&request_context));
                self.events.error.publish(&message);
                Err(err)
            }
        }
    }

    /// Release the shared client. Always leaves the manager uninitialized,
    /// even when closing the transport fails.
    #[instrument(skip(self))]
    pub async fn shutdown(&self) {
        if !self.is_initialized() {
            return;
        }

        let mut slot = self.transport.write().await;
        let Some(transport) = slot.take() else {
            return;
        };
        self.initialized.store(false, Ordering::Release);
        drop(slot);

        if let Err(e) = transport.close() {
            let message = format!("Error disposing HTTP client: {:#}", e);
            self.logger.error(&message, None);
            self.events.error.publish(&message);
        }
        self.logger.info("RequestManager shut down", None);
    }
}

impl std::fmt::Debug for RequestManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestManager")
            .field("initialized", &self.is_initialized())
            .field("events", &self.events)
            .finish()
    }
}
