//! Error type for request manager operations
//!
//! Callers match on the variant; notifications carry its `Display` text.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// Operation attempted before `initialize` (or after `shutdown`)
    NotInitialized { operation: String },

    /// Transport gave up waiting for the response
    Timeout { url: String },

    /// Connection, DNS, TLS or body read failure
    Transport { url: String, reason: String },

    /// Server answered with a non-success status
    Status {
        url: String,
        status: u16,
        body: String,
    },

    /// Payload could not be serialized
    Serialization { reason: String },
}

impl RequestError {
    pub fn is_not_initialized(&self) -> bool {
        matches!(self, RequestError::NotInitialized { .. })
    }
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::NotInitialized { operation } => {
                write!(
                    f,
                    "Invalid operation: request manager is not initialized ({})",
                    operation
                )
            }
            RequestError::Timeout { url } => {
                write!(f, "Request to {} timed out", url)
            }
            RequestError::Transport { url, reason } => {
                write!(f, "Request to {} failed: {}", url, reason)
            }
            RequestError::Status { url, status, body } => {
                if body.is_empty() {
                    write!(f, "Request to {} returned status {}", url, status)
                } else {
                    write!(f, "Request to {} returned status {}: {}", url, status, body)
                }
            }
            RequestError::Serialization { reason } => {
                write!(f, "Failed to serialize request body: {}", reason)
            }
        }
    }
}

impl std::error::Error for RequestError {}

impl From<serde_json::Error> for RequestError {
    fn from(err: serde_json::Error) -> Self {
        RequestError::Serialization {
            reason: err.to_string(),
        }
    }
}
