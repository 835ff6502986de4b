//! HTTP request handling
//!
//! The [`RequestManager`] owns one shared transport for the whole process
//! and exposes awaited GET/POST calls on top of it.
//!
//! # Lifecycle
//!
//! ```text
//! Uninitialized --initialize--> Initialized --shutdown--> Uninitialized
//! ```
//!
//! Both transitions are serialized by one lock and are idempotent. Requests
//! are never serialized against each other; each takes its own handle of the
//! transport, so a shutdown does not cancel requests already in flight.
//!
//! # Transport
//!
//! [`Transport`] and [`TransportFactory`] are the seam to the HTTP stack.
//! The default factory builds a `reqwest::Client` with the configured
//! timeout.

pub mod request_manager;
pub mod transport;

pub use request_manager::{ManagerEvents, RequestManager, ResponseReceived};
pub use transport::{
    HttpMethod, PendingRequest, ReqwestTransport, ReqwestTransportFactory, Transport,
    TransportFactory, TransportResponse,
};
