//! In-process transport doubles
//!
//! `StubFactory` counts client constructions and can be told to fail them;
//! `StubTransport` answers every request with a scripted outcome and records
//! what it was sent.

use anyhow::{anyhow, Result};
use futures::future::BoxFuture;
use netbridge::http::{PendingRequest, Transport, TransportFactory, TransportResponse};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone)]
pub enum StubOutcome {
    Respond { status: u16, body: String },
    Fail(String),
}

pub struct StubTransport {
    outcome: Mutex<StubOutcome>,
    fail_close: bool,
    pub sent: Mutex<Vec<PendingRequest>>,
    pub closes: AtomicUsize,
}

impl StubTransport {
    pub fn responding(status: u16, body: &str) -> Self {
        Self::with_outcome(StubOutcome::Respond {
            status,
            body: body.to_string(),
        })
    }

    pub fn failing(reason: &str) -> Self {
        Self::with_outcome(StubOutcome::Fail(reason.to_string()))
    }

    fn with_outcome(outcome: StubOutcome) -> Self {
        Self {
            outcome: Mutex::new(outcome),
            fail_close: false,
            sent: Mutex::new(Vec::new()),
            closes: AtomicUsize::new(0),
        }
    }

    pub fn with_failing_close(mut self) -> Self {
        self.fail_close = true;
        self
    }

    pub fn set_outcome(&self, outcome: StubOutcome) {
        *self.outcome.lock().unwrap() = outcome;
    }

    pub fn send_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

impl Transport for StubTransport {
    fn send(&self, request: PendingRequest) -> BoxFuture<'_, Result<TransportResponse>> {
        self.sent.lock().unwrap().push(request);
        let outcome = self.outcome.lock().unwrap().clone();
        Box::pin(async move {
            tokio::task::yield_now().await;
            match outcome {
                StubOutcome::Respond { status, body } => Ok(TransportResponse { status, body }),
                StubOutcome::Fail(reason) => Err(anyhow!(reason)),
            }
        })
    }

    fn close(&self) -> Result<()> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        if self.fail_close {
            return Err(anyhow!("stub close failure"));
        }
        Ok(())
    }
}

pub struct StubFactory {
    pub transport: Arc<StubTransport>,
    fail_connect: bool,
    pub connects: AtomicUsize,
    pub timeouts: Mutex<Vec<Duration>>,
}

impl StubFactory {
    pub fn new(transport: StubTransport) -> Arc<Self> {
        Arc::new(Self {
            transport: Arc::new(transport),
            fail_connect: false,
            connects: AtomicUsize::new(0),
            timeouts: Mutex::new(Vec::new()),
        })
    }

    pub fn failing_connect() -> Arc<Self> {
        Arc::new(Self {
            transport: Arc::new(StubTransport::responding(200, "")),
            fail_connect: true,
            connects: AtomicUsize::new(0),
            timeouts: Mutex::new(Vec::new()),
        })
    }

    pub fn connect_count(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }
}

impl TransportFactory for StubFactory {
    fn connect(&self, timeout: Duration) -> Result<Arc<dyn Transport>> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        self.timeouts.lock().unwrap().push(timeout);
        if self.fail_connect {
            return Err(anyhow!("stub connect failure"));
        }
        Ok(self.transport.clone())
    }
}
