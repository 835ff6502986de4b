use anyhow::{anyhow, Result};
use futures::future::BoxFuture;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::constants::http::JSON_CONTENT_TYPE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => f.write_str("GET"),
            HttpMethod::Post => f.write_str("POST"),
        }
    }
}

/// One in-flight request, owned by the call that created it
#[derive(Debug, Clone)]
pub struct PendingRequest {
    pub id: Uuid,
    pub method: HttpMethod,
    pub url: String,
    pub headers: Option<HashMap<String, String>>,
    pub body: Option<String>,
}

impl PendingRequest {
    pub fn get(url: &str, headers: Option<HashMap<String, String>>) -> Self {
        Self {
            id: Uuid::new_v4(),
            method: HttpMethod::Get,
            url: url.to_string(),
            headers,
            body: None,
        }
    }

    pub fn post(url: &str, body: &str, headers: Option<HashMap<String, String>>) -> Self {
        Self {
            id: Uuid::new_v4(),
            method: HttpMethod::Post,
            url: url.to_string(),
            headers,
            body: Some(body.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends requests on behalf of the request manager.
///
/// Implementations are shared by every concurrent caller; `send` must not
/// assume exclusive access.
pub trait Transport: Send + Sync {
    fn send(&self, request: PendingRequest) -> BoxFuture<'_, Result<TransportResponse>>;

    /// Release the transport. Requests already holding a handle may still finish.
    fn close(&self) -> Result<()>;
}

/// Builds a transport for a given request timeout
pub trait TransportFactory: Send + Sync {
    fn connect(&self, timeout: Duration) -> Result<Arc<dyn Transport>>;
}

pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow!("Failed to create HTTP client: {}", e))?;

        Ok(Self { client })
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: PendingRequest) -> BoxFuture<'_, Result<TransportResponse>> {
        Box::pin(async move {
            let mut builder = match request.method {
                HttpMethod::Get => self.client.get(&request.url),
                HttpMethod::Post => self
                    .client
                    .post(&request.url)
                    .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
                    .body(request.body.unwrap_or_default()),
            };

            if let Some(headers) = &request.headers {
                for (name, value) in headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
            }

            // reqwest errors are kept intact so callers can tell timeouts apart
            let response = builder.send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;

            Ok(TransportResponse { status, body })
        })
    }

    fn close(&self) -> Result<()> {
        // Pooled connections are released when the last client handle drops
        Ok(())
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ReqwestTransportFactory;

impl TransportFactory for ReqwestTransportFactory {
    fn connect(&self, timeout: Duration) -> Result<Arc<dyn Transport>> {
        Ok(Arc::new(ReqwestTransport::new(timeout)?))
    }
}

/// True when the error chain ends in a reqwest timeout
pub fn is_timeout(err: &anyhow::Error) -> bool {
    err.chain()
        .filter_map(|cause| cause.downcast_ref::<reqwest::Error>())
        .any(|e| e.is_timeout())
}
