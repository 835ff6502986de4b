//! Host-bound request component
//!
//! A [`RequestComponent`] is attached to an object owned by a host (a scene
//! node, a plugin slot, a service). The host drives its lifecycle through
//! [`attach`](RequestComponent::attach), [`activate`](RequestComponent::activate)
//! and [`detach`](RequestComponent::detach). Requests are units of work that
//! never fail outward: results and failures both come back as notifications.
//!
//! # Usage
//!
//! ```ignore
//! let mut component = RequestComponent::new("status-panel", config, context);
//! component.events().data_received.subscribe(|body| println!("{}", body));
//! component.attach().await;
//! component.fetch_default_data().await;
//! component.detach();
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::instrument;

use crate::config::{is_valid_timeout, ComponentConfig};
use crate::context::BridgeContext;
use crate::events::{Notifier, SubscriptionId};
use crate::http::ResponseReceived;
use crate::logging::LogLevel;

#[derive(Debug)]
pub struct ComponentEvents {
    pub initialized: Notifier<()>,
    pub data_received: Notifier<String>,
    pub error_occurred: Notifier<String>,
}

impl ComponentEvents {
    fn new() -> Self {
        Self {
            initialized: Notifier::new("component.initialized"),
            data_received: Notifier::new("component.data_received"),
            error_occurred: Notifier::new("component.error_occurred"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentRequest {
    FetchDefault,
    Fetch { url: String },
    Post { url: String, body: String },
}

#[derive(Debug, Clone, Copy)]
struct ManagerSubscriptions {
    initialized: SubscriptionId,
    response_received: SubscriptionId,
    error: SubscriptionId,
}

pub struct RequestComponent {
    name: String,
    config: ComponentConfig,
    context: BridgeContext,
    initialized: Arc<AtomicBool>,
    events: Arc<ComponentEvents>,
    subscriptions: Option<ManagerSubscriptions>,
}

impl RequestComponent {
    pub fn new(name: &str, config: ComponentConfig, context: BridgeContext) -> Self {
        Self {
            name: name.to_string(),
            config,
            context,
            initialized: Arc::new(AtomicBool::new(false)),
            events: Arc::new(ComponentEvents::new()),
            subscriptions: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &ComponentConfig {
        &self.config
    }

    pub fn events(&self) -> &ComponentEvents {
        &self.events
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    pub fn set_default_url(&mut self, url: &str) {
        self.config.default_url = url.to_string();
    }

    /// Returns false and keeps the old value when `seconds` is not a positive,
    /// representable timeout
    pub fn set_timeout_seconds(&mut self, seconds: f64) -> bool {
        if !is_valid_timeout(seconds) {
            self.context.logger.warn(
                &format!(
                    "Timeout must be greater than 0, keeping {}s (got {})",
                    self.config.timeout_seconds, seconds
                ),
                Some(&self.name),
            );
            return false;
        }
        self.config.timeout_seconds = seconds;
        true
    }

    pub fn set_log_level(&mut self, level: LogLevel) {
        self.config.log_level = level;
        if self.is_initialized() {
            self.context.logger.set_threshold(level);
        }
    }

    pub fn set_auto_initialize(&mut self, enabled: bool) {
        self.config.auto_initialize = enabled;
    }

    pub fn set_events_enabled(&mut self, enabled: bool) {
        self.config.events_enabled = enabled;
    }

    /// Host created the component. Initializes when `auto_initialize` is set.
    #[instrument(skip(self), fields(component = %self.name))]
    pub async fn attach(&mut self) {
        if self.config.auto_initialize {
            self.initialize().await;
        }
    }

    /// Host enabled the component. Initializes when `auto_initialize` is off.
    #[instrument(skip(self), fields(component = %self.name))]
    pub async fn activate(&mut self) {
        if !self.config.auto_initialize {
            self.initialize().await;
        }
    }

    async fn initialize(&mut self) {
        if self.is_initialized() {
            return;
        }

        self.context
            .logger
            .apply(self.config.logger_settings());

        if self.config.events_enabled && self.subscriptions.is_none() {
            self.subscriptions = Some(self.subscribe_to_manager());
        }

        self.context
            .requests
            .initialize(self.config.timeout_seconds)
            .await;

        self.initialized.store(true, Ordering::Release);
        self.context
            .logger
            .info("Component initialized", Some(&self.name));
        self.events.initialized.publish(&());
    }

    fn subscribe_to_manager(&self) -> ManagerSubscriptions {
        let manager_events = self.context.requests.events();

        let logger = self.context.logger.clone();
        let name = self.name.clone();
        let initialized = manager_events.initialized.subscribe(move |_| {
            logger.debug("RequestManager initialized", Some(&name));
        });

        let logger = self.context.logger.clone();
        let name = self.name.clone();
        let response_received =
            manager_events
                .response_received
                .subscribe(move |event: &ResponseReceived| {
                    logger.debug(
                        &format!(
                            "Response received from {} ({} bytes)",
                            event.url,
                            event.body.len()
                        ),
                        Some(&name),
                    );
                });

        let logger = self.context.logger.clone();
        let name = self.name.clone();
        let error = manager_events.error.subscribe(move |message: &String| {
            logger.error(&format!("RequestManager error: {}", message), Some(&name));
        });

        ManagerSubscriptions {
            initialized,
            response_received,
            error,
        }
    }

    /// Host removed the component. The shared request manager stays up.
    pub fn detach(&mut self) {
        if let Some(subscriptions) = self.subscriptions.take() {
            let manager_events = self.context.requests.events();
            manager_events.initialized.unsubscribe(subscriptions.initialized);
            manager_events
                .response_received
                .unsubscribe(subscriptions.response_received);
            manager_events.error.unsubscribe(subscriptions.error);
        }
        self.initialized.store(false, Ordering::Release);
        self.context.logger.debug("Component detached", Some(&self.name));
    }

    pub async fn fetch_default_data(&self) {
        self.task(ComponentRequest::FetchDefault).run().await
    }

    pub async fn fetch_data(&self, url: &str) {
        self.task(ComponentRequest::Fetch {
            url: url.to_string(),
        })
        .run()
        .await
    }

    pub async fn post_data(&self, url: &str, body: &str) {
        self.task(ComponentRequest::Post {
            url: url.to_string(),
            body: body.to_string(),
        })
        .run()
        .await
    }

    /// Run `request` as a detached task; completion arrives as notifications
    pub fn schedule(&self, request: ComponentRequest) -> JoinHandle<()> {
        tokio::spawn(self.task(request).run())
    }

    fn task(&self, request: ComponentRequest) -> RequestTask {
        RequestTask {
            component: self.name.clone(),
            default_url: self.config.default_url.clone(),
            context: self.context.clone(),
            initialized: self.initialized.clone(),
            events: self.events.clone(),
            request,
        }
    }
}

impl std::fmt::Debug for RequestComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestComponent")
            .field("name", &self.name)
            .field("config", &self.config)
            .field("initialized", &self.is_initialized())
            .finish()
    }
}

/// One request issued by a component, detached from the component itself
struct RequestTask {
    component: String,
    default_url: String,
    context: BridgeContext,
    initialized: Arc<AtomicBool>,
    events: Arc<ComponentEvents>,
    request: ComponentRequest,
}

impl RequestTask {
    async fn run(self) {
        if !self.initialized.load(Ordering::Acquire) {
            self.fail("Component is not initialized".to_string());
            return;
        }

        let requests = &self.context.requests;
        let result = match &self.request {
            ComponentRequest::FetchDefault if self.default_url.is_empty() => {
                self.fail("No default URL configured".to_string());
                return;
            }
            ComponentRequest::FetchDefault => requests
                .fetch_data(&self.default_url, None)
                .await
                .map_err(|e| format!("Failed to fetch data: {}", e)),
            ComponentRequest::Fetch { url } => requests
                .fetch_data(url, None)
                .await
                .map_err(|e| format!("Failed to fetch data: {}", e)),
            ComponentRequest::Post { url, body } => requests
                .post_data(url, body, None)
                .await
                .map_err(|e| format!("Failed to post data: {}", e)),
        };

        match result {
            Ok(data) => self.events.data_received.publish(&data),
            Err(message) => self.fail(message),
        }
    }

    fn fail(&self, message: String) {
        self.context.logger.error(&message, Some(&self.component));
        self.events.error_occurred.publish(&message);
    }
}
